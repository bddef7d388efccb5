//! contractdoc CLI - contract draft to document tool

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use contractdoc::{
    classify_text, generate, generate_batch, ClassifiedLine, DocumentRequest, GenerateOptions,
    GenerateResult, OutputFormat, DEFAULT_FOOTER_TEXT,
};

#[derive(Parser)]
#[command(name = "contractdoc")]
#[command(version)]
#[command(about = "Turn plain-text contract drafts into styled DOCX documents", long_about = None)]
struct Cli {
    /// Input draft file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Primary color (#RRGGBB)
    #[arg(long, env = "CONTRACTDOC_PRIMARY_COLOR", default_value = "#4F46E5")]
    color: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a document from a draft
    #[command(alias = "gen")]
    Generate {
        /// Input draft file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (next to the input if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Primary color (#RRGGBB)
        #[arg(long, env = "CONTRACTDOC_PRIMARY_COLOR", default_value = "#4F46E5")]
        color: String,

        /// Logo image for the page header (PNG, JPEG, GIF or BMP)
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Footer text
        #[arg(long, default_value = DEFAULT_FOOTER_TEXT)]
        footer: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "docx")]
        format: FormatArg,
    },

    /// Show how each line of a draft is classified
    Classify {
        /// Input draft file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show draft statistics
    Info {
        /// Input draft file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Generate documents for several drafts in parallel
    Batch {
        /// Input draft files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Primary color (#RRGGBB)
        #[arg(long, env = "CONTRACTDOC_PRIMARY_COLOR", default_value = "#4F46E5")]
        color: String,

        /// Logo image for the page header
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "docx")]
        format: FormatArg,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Word document
    Docx,
    /// Markdown
    Markdown,
    /// JSON document plan
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Docx => OutputFormat::Docx,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate {
            input,
            output,
            color,
            logo,
            footer,
            format,
        }) => cmd_generate(
            &input,
            output.as_deref(),
            &color,
            logo.as_deref(),
            &footer,
            format.into(),
        ),
        Some(Commands::Classify { input, json }) => cmd_classify(&input, json),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Batch {
            inputs,
            output,
            color,
            logo,
            format,
        }) => cmd_batch(
            &inputs,
            output.as_deref(),
            &color,
            logo.as_deref(),
            format.into(),
        ),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: generate DOCX if input is provided
            if let Some(input) = cli.input {
                cmd_generate(
                    &input,
                    cli.output.as_deref(),
                    &cli.color,
                    None,
                    DEFAULT_FOOTER_TEXT,
                    OutputFormat::Docx,
                )
            } else {
                println!("{}", "Usage: contractdoc <FILE> [OUTPUT]".yellow());
                println!("       contractdoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Output path for `input` with the extension of `format`, inside `dir` if given.
///
/// When that path is the input itself, `.out` is added before the extension.
fn output_path(input: &Path, dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let place = |name: String| match dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    };

    let path = place(format!("{}.{}", stem, format.extension()));
    if same_file(&path, input) {
        place(format!("{}.out.{}", stem, format.extension()))
    } else {
        path
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Output paths for a batch, failing if two inputs would share one.
fn batch_output_paths(
    inputs: &[PathBuf],
    dir: Option<&Path>,
    format: OutputFormat,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(inputs.len());
    for input in inputs {
        let path = output_path(input, dir, format);
        if let Some(previous) = seen.insert(path.clone(), input) {
            return Err(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                path.display()
            )
            .into());
        }
        paths.push(path);
    }
    Ok(paths)
}

fn read_logo(logo: Option<&Path>) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error>> {
    match logo {
        Some(path) => Ok(Some(fs::read(path)?)),
        None => Ok(None),
    }
}

fn warn_missing_logo(result: &GenerateResult, requested: bool) {
    if requested && result.format == OutputFormat::Docx && !result.logo_applied {
        eprintln!(
            "{}: logo could not be read, document generated without header",
            "Warning".yellow().bold()
        );
    }
}

fn cmd_generate(
    input: &Path,
    output: Option<&Path>,
    color: &str,
    logo: Option<&Path>,
    footer: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = match output {
        Some(path) if same_file(path, input) => {
            return Err(format!("refusing to overwrite the draft {}", input.display()).into());
        }
        Some(path) => path.to_path_buf(),
        None => output_path(input, None, format),
    };
    log::debug!("Generating {} from {}", format, input.display());

    let text = fs::read_to_string(input)?;
    let mut request = DocumentRequest::new(text).with_color(color);
    if let Some(bytes) = read_logo(logo)? {
        request = request.with_logo(bytes);
    }

    let options = GenerateOptions::new()
        .with_footer_text(footer)
        .with_format(format);
    let result = generate(&request, &options)?;
    warn_missing_logo(&result, logo.is_some());

    result.save(&path)?;

    println!("{} {}", "Saved to".green(), path.display());
    println!(
        "  {} {} titles, {} paragraphs, {} list items, {} tables",
        "└─".dimmed(),
        result.stats.title_count,
        result.stats.paragraph_count,
        result.stats.list_item_count,
        result.stats.table_count
    );

    Ok(())
}

fn cmd_classify(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let lines = classify_text(&text);
    log::debug!("Classified {} lines of {}", lines.len(), input.display());

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    for (i, line) in lines.iter().enumerate() {
        let tag = match line {
            ClassifiedLine::Blank => "blank".dimmed(),
            ClassifiedLine::TableRow(_) => "row".cyan(),
            ClassifiedLine::Title { .. } => "title".magenta().bold(),
            ClassifiedLine::ListItem { .. } => "item".green(),
            ClassifiedLine::Paragraph { .. } => "text".normal(),
        };
        let content = match line {
            ClassifiedLine::Blank => String::new(),
            ClassifiedLine::TableRow(row) => format!("{} = {}", row.key, row.value),
            ClassifiedLine::Title { text }
            | ClassifiedLine::ListItem { text }
            | ClassifiedLine::Paragraph { text } => text.clone(),
        };
        println!("{:>4} {:<6} {}", (i + 1).to_string().dimmed(), tag, content);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let plan = contractdoc::plan(
        &text,
        contractdoc::Color::default(),
        None,
        DEFAULT_FOOTER_TEXT,
    );
    let stats = plan.stats();
    log::debug!("{} instructions planned for {}", plan.instructions.len(), input.display());

    println!("{}", "Draft Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Lines".bold(), text.lines().count());
    if let Some(title) = plan.first_title() {
        println!("{}: {}", "Title".bold(), title);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Titles".bold(), stats.title_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!(
        "{}: {} ({} rows)",
        "Tables".bold(),
        stats.table_count,
        stats.table_row_count
    );
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: Option<&Path>,
    color: &str,
    logo: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = batch_output_paths(inputs, output, format)?;
    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }
    let logo_bytes = read_logo(logo)?;
    log::debug!("Batch of {} drafts to {}", inputs.len(), format);

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading drafts...");
    let mut requests = Vec::with_capacity(inputs.len());
    for input in inputs {
        let mut request = DocumentRequest::new(fs::read_to_string(input)?).with_color(color);
        if let Some(ref bytes) = logo_bytes {
            request = request.with_logo(bytes.clone());
        }
        requests.push(request);
        pb.inc(1);
    }

    pb.set_message("Generating...");
    let options = GenerateOptions::new().with_format(format);
    let results = generate_batch(&requests, &options);

    let mut written = Vec::new();
    let mut failed = Vec::new();
    for ((input, path), result) in inputs.iter().zip(paths).zip(results) {
        match result {
            Ok(result) => {
                result.save(&path)?;
                written.push(path);
            }
            Err(e) => failed.push((input, e)),
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), path.display());
    }
    for (input, e) in &failed {
        eprintln!("{} {}: {}", "Failed".red(), input.display(), e);
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} drafts failed", failed.len(), inputs.len()).into())
    }
}

fn cmd_version() {
    println!("{} {}", "contractdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Contract draft to DOCX tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let input = Path::new("drafts/contrato.txt");
        assert_eq!(
            output_path(input, None, OutputFormat::Docx),
            PathBuf::from("drafts/contrato.docx")
        );
        assert_eq!(
            output_path(input, Some(Path::new("out")), OutputFormat::Markdown),
            PathBuf::from("out/contrato.md")
        );
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("contrato.txt");
        fs::write(&input, "CONTRATO\nNome: Ana\n- Item um").unwrap();

        cmd_generate(&input, None, "#4F46E5", None, "rodapé", OutputFormat::Docx).unwrap();

        let bytes = fs::read(dir.path().join("contrato.docx")).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_keeps_draft_with_matching_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("contrato.md");
        let draft = "CONTRATO\nNome: Ana\n\nTexto original do rascunho";
        fs::write(&input, draft).unwrap();

        cmd_generate(&input, None, "#4F46E5", None, "f", OutputFormat::Markdown).unwrap();

        assert_eq!(fs::read_to_string(&input).unwrap(), draft);
        let generated = fs::read_to_string(dir.path().join("contrato.out.md")).unwrap();
        assert!(generated.starts_with("## CONTRATO"));
    }

    #[test]
    fn test_generate_refuses_output_equal_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("contrato.json");
        fs::write(&input, "Texto").unwrap();

        let result = cmd_generate(
            &input,
            Some(&input),
            "#4F46E5",
            None,
            "f",
            OutputFormat::Json,
        );

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&input).unwrap(), "Texto");
    }

    #[test]
    fn test_batch_rejects_colliding_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a").join("contrato.txt");
        let second = dir.path().join("b").join("contrato.txt");
        for path in [&first, &second] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "Texto").unwrap();
        }
        let out = dir.path().join("out");

        let result = cmd_batch(
            &[first, second],
            Some(&out),
            "#4F46E5",
            None,
            OutputFormat::Docx,
        );

        let message = result.unwrap_err().to_string();
        assert!(message.contains("would both be written to"));
        assert!(!out.join("contrato.docx").exists());
    }

    #[test]
    fn test_batch_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.txt");
        let empty = dir.path().join("b.txt");
        fs::write(&good, "Texto").unwrap();
        fs::write(&empty, "   ").unwrap();
        let out = dir.path().join("out");

        let result = cmd_batch(
            &[good, empty],
            Some(&out),
            "#4F46E5",
            None,
            OutputFormat::Json,
        );

        assert!(result.is_err());
        assert!(out.join("a.json").exists());
        assert!(!out.join("b.json").exists());
    }
}
