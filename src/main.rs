use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use section_parse::{
    DocumentFamily, DocumentIdentity, ExportFormat, ParsedDocument, ParserConfig, SectionLabel,
    load_document,
};

#[derive(Parser, Debug)]
#[command(name = "section-parse")]
#[command(about = "Split policy and issuance documents into labeled sections")]
#[command(version)]
struct Cli {
    /// Document to parse (.docx, or plain text with one paragraph per line)
    #[arg(required_unless_present = "init_config")]
    file: Option<PathBuf>,

    /// Document type used for running-header removal (default: from file name)
    #[arg(long)]
    doc_type: Option<String>,

    /// Document number used for running-header removal (default: from file name)
    #[arg(long)]
    doc_num: Option<String>,

    /// Heading conventions to apply
    #[arg(long, value_enum)]
    family: Option<DocumentFamily>,

    /// Read column-major tables in their logical order
    #[arg(long)]
    fix_table_order: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    export: ExportFormat,

    /// Print only one labeled section (e.g. purpose, responsibilities)
    #[arg(long)]
    label: Option<SectionLabel>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        ParserConfig::init_default()?;
        if let Some(path) = ParserConfig::get_config_path() {
            info!(path = %path.display(), "wrote default config");
        }
        return Ok(());
    }

    let Some(file_path) = cli.file else {
        anyhow::bail!("no input file given");
    };

    let config = ParserConfig::load()?;
    let mut options = config.parse_options(cli.family);
    options.read.should_fix_order |= cli.fix_table_order;

    let mut identity = DocumentIdentity::from_filename(&file_path);
    if let Some(doc_type) = cli.doc_type {
        identity.doc_type = doc_type;
    }
    if let Some(doc_num) = cli.doc_num {
        identity.doc_num = doc_num;
    }

    let document = load_document(&file_path, identity, &options)
        .with_context(|| format!("failed to parse {}", file_path.display()))?;

    match cli.label {
        Some(label) => print_lines(&document.section(label)),
        None => export(&document, cli.export)?,
    }

    Ok(())
}

fn export(document: &ParsedDocument, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(&document.record())?;
            println!("{json}");
        }
        ExportFormat::Text => {
            let rule = "-".repeat(72);
            for (index, section) in document.all_sections.iter().enumerate() {
                if index > 0 {
                    println!("{rule}");
                }
                if let Some(label) = document.label_of(section) {
                    println!("[{label}]");
                }
                print_lines(section);
            }
        }
    }

    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
