use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use doccompare_core::{
    compare_files, CompareOptions, CompareRequest, DocumentParser, DocxParser, Granularity,
    OutputFormat,
};

/// Short commit hash embedded at compile time, "dev" outside a checkout
const COMMIT: &str = env!("DOCCOMPARE_COMMIT");

#[derive(Parser)]
#[command(name = "doccompare")]
#[command(about = "Document comparison (redlining) tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two documents and generate a redlined output
    Compare {
        /// Original document (before changes)
        original: PathBuf,

        /// Modified document (after changes)
        modified: PathBuf,

        /// Output document path (default: redline-DATETIME-COMMIT.docx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: word, pdf, html (default: detect from output extension)
        #[arg(short = 'f', long)]
        format: Option<String>,

        /// Pair identical deleted/inserted paragraphs as moves
        #[arg(long)]
        detect_moves: bool,

        /// Ignore case when matching words
        #[arg(long)]
        ignore_case: bool,

        /// Keep whitespace differences instead of collapsing them
        #[arg(long)]
        keep_whitespace: bool,

        /// Diff granularity: character, word, sentence, paragraph
        #[arg(long, default_value = "word")]
        granularity: String,

        /// Output statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report change statistics without writing an output document
    Stats {
        /// Original document (before changes)
        original: PathBuf,

        /// Modified document (after changes)
        modified: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display information about a document
    Info {
        /// Document to inspect
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            original,
            modified,
            output,
            format,
            detect_moves,
            ignore_case,
            keep_whitespace,
            granularity,
            json,
        } => run_compare(
            original,
            modified,
            output,
            format,
            detect_moves,
            ignore_case,
            keep_whitespace,
            &granularity,
            json,
        ),
        Commands::Stats {
            original,
            modified,
            json,
        } => run_stats(original, modified, json),
        Commands::Info { file } => run_info(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_granularity(value: &str) -> Result<Granularity, String> {
    match value {
        "character" => Ok(Granularity::Character),
        "word" => Ok(Granularity::Word),
        "sentence" => Ok(Granularity::Sentence),
        "paragraph" => Ok(Granularity::Paragraph),
        other => Err(format!("Unknown granularity: {}", other)),
    }
}

fn detect_output_format(output: &PathBuf, hint: Option<&str>) -> Result<OutputFormat, String> {
    if let Some(hint) = hint {
        return OutputFormat::from_name(hint)
            .ok_or_else(|| format!("Unknown output format: {}", hint));
    }

    match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => OutputFormat::from_name(ext)
            .ok_or_else(|| format!("Unknown output extension: .{}", ext)),
        None => Ok(OutputFormat::Word),
    }
}

/// Generate default output filename: redline-YYYYMMDD-HHMMSS-COMMIT.docx
fn generate_output_filename() -> PathBuf {
    let datetime = Local::now().format("%Y%m%d-%H%M%S").to_string();
    PathBuf::from(format!("redline-{}-{}.docx", datetime, COMMIT))
}

fn run_compare(
    original: PathBuf,
    modified: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    detect_moves: bool,
    ignore_case: bool,
    keep_whitespace: bool,
    granularity: &str,
    json: bool,
) -> Result<(), String> {
    let output = output.unwrap_or_else(generate_output_filename);
    let output_format = detect_output_format(&output, format.as_deref())?;

    let options = CompareOptions::new()
        .with_detect_moves(detect_moves)
        .with_ignore_case(ignore_case)
        .with_ignore_whitespace(!keep_whitespace)
        .with_granularity(parse_granularity(granularity)?);

    let request = CompareRequest::new(&original, &modified)
        .with_output(&output)
        .with_output_format(output_format)
        .with_options(options);

    let result = compare_files(&request);
    if !result.success {
        return Err(result
            .error_message
            .unwrap_or_else(|| "comparison failed".to_string()));
    }

    let stats = result.statistics;
    if json {
        let payload = serde_json::json!({
            "insertions": stats.insertions,
            "deletions": stats.deletions,
            "moves": stats.moves,
            "unchanged": stats.unchanged,
            "change_percentage": stats.change_percentage(),
            "output": output.display().to_string(),
            "commit": COMMIT,
        });
        println!("{}", payload);
    } else {
        println!("Comparison complete:");
        println!("  Insertions (blue bold):        {} words", stats.insertions);
        println!("  Deletions (red strikethrough): {} words", stats.deletions);
        if detect_moves {
            println!("  Moves (green):                 {} words", stats.moves);
        }
        println!("  Unchanged:                     {} words", stats.unchanged);
        println!("  Change percentage:             {:.1}%", stats.change_percentage());
        println!("  Output:                        {}", output.display());
    }

    Ok(())
}

fn run_stats(original: PathBuf, modified: PathBuf, json: bool) -> Result<(), String> {
    let request = CompareRequest::new(&original, &modified);
    let result = compare_files(&request);

    if !result.success {
        return Err(result
            .error_message
            .unwrap_or_else(|| "comparison failed".to_string()));
    }

    let stats = result.statistics;
    if json {
        let payload = serde_json::to_string(&stats).map_err(|e| e.to_string())?;
        println!("{}", payload);
    } else {
        println!("Change statistics:");
        println!("  Original paragraphs: {}", stats.original_paragraphs);
        println!("  Modified paragraphs: {}", stats.modified_paragraphs);
        println!("  Insertions:          {}", stats.insertions);
        println!("  Deletions:           {}", stats.deletions);
        println!("  Moves:               {}", stats.moves);
        println!("  Unchanged:           {}", stats.unchanged);
        println!("  Change percentage:   {:.1}%", stats.change_percentage());
    }

    Ok(())
}

fn run_info(file: &PathBuf) -> Result<(), String> {
    let parser = DocxParser;
    if !parser.can_parse(file) {
        return Err(format!("Unsupported file type: {}", file.display()));
    }

    let document = parser
        .parse_path(file)
        .map_err(|e| format!("Failed to parse {}: {}", file.display(), e))?;

    let paragraphs = document.paragraphs_flat();
    let words: usize = paragraphs.iter().map(|p| p.word_count()).sum();

    println!("Document: {}", file.display());
    if let Some(title) = &document.properties.title {
        println!("Title: {}", title);
    }
    if let Some(creator) = &document.properties.creator {
        println!("Creator: {}", creator);
    }
    println!("Sections: {}", document.sections.len());
    println!("Paragraphs: {}", paragraphs.len());
    println!("Words: {}", words);
    println!("Styles: {}", document.styles.len());
    println!(
        "Numbering: {} definitions, {} instances",
        document.numbering_definitions.len(),
        document.numbering_instances.len()
    );

    Ok(())
}
