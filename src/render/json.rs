//! JSON rendering of document plans.

use crate::assemble::DocumentPlan;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document plan to JSON.
///
/// Logo bytes are left out; the plan only records that a header exists.
pub fn to_json(plan: &DocumentPlan, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(plan),
        JsonFormat::Compact => serde_json::to_string(plan),
    };

    result.map_err(|e| Error::Renderer(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::plan;
    use crate::color::Color;

    #[test]
    fn test_to_json_pretty() {
        let plan = plan("CONTRATO\nNome: Ana", Color::default(), None, "rodapé");
        let json = to_json(&plan, JsonFormat::Pretty).unwrap();

        assert!(json.contains("\"type\": \"title\""));
        assert!(json.contains("\"key\": \"Nome\""));
        assert!(json.contains("\"type\": \"footer\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_without_logo_bytes() {
        let plan = plan("Texto", Color::default(), Some(vec![1, 2, 3]), "f");
        let json = to_json(&plan, JsonFormat::Compact).unwrap();

        assert!(!json.contains('\n'));
        assert!(json.contains(r#"{"type":"header"}"#));
        assert!(!json.contains("logo"));
    }
}
