use std::path::{Path, PathBuf};

use colored::Colorize;
use parascope_core::{
    analyze, matched_paragraphs_csv, Analysis, AnalysisRequest, CloudWord, KeywordSet, Paragraph,
    Tokenizer, DEFAULT_KEYWORDS, DEFAULT_MIN_LENGTH, DEFAULT_TOP_N, MAX_MIN_LENGTH,
    MIN_MIN_LENGTH,
};
use pdf::{LopdfTextSource, PageTextSource};

use crate::input::{extract_pages, show_progress, InputArgs, StopwordArgs};
use crate::prelude::{eprintln, println, *};

/// Paragraphs printed before the listing is cut short.
const DEFAULT_MAX_SHOWN: usize = 200;

/// Width of the weight bar at weight 1.0.
const BAR_WIDTH: usize = 20;

/// Long help for `scan`, naming the extractor's paragraph rule.
pub const SCAN_LONG_ABOUT: &str = "\
Filter paragraphs by keyword and rank their most frequent words.

Paragraphs are split at blank lines in the extracted page text. The extractor \
inserts a blank line wherever the vertical gap between two lines is more than \
1.4 times the font size of the upper line. Paragraph counts can therefore differ \
from other PDF text tools, which often emit no blank lines at all.";

#[derive(Debug, Clone, clap::Args)]
pub struct ScanOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Comma-separated keywords; a paragraph matches if it contains any of them
    #[arg(short, long, env = "PARASCOPE_KEYWORDS", default_value = DEFAULT_KEYWORDS)]
    pub keywords: String,

    /// Minimum paragraph length in characters
    #[arg(
        short,
        long,
        env = "PARASCOPE_MIN_LENGTH",
        default_value_t = DEFAULT_MIN_LENGTH,
        value_parser = parse_min_length,
    )]
    pub min_length: usize,

    /// Do not print the matched paragraphs
    #[arg(long)]
    pub hide_paragraphs: bool,

    /// Maximum number of matched paragraphs to print
    #[arg(long, default_value_t = DEFAULT_MAX_SHOWN)]
    pub max_shown: usize,

    /// Number of most frequent tokens to report
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    #[clap(flatten)]
    pub stopwords: StopwordArgs,

    /// Write the matched paragraphs to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_min_length(value: &str) -> Result<usize, String> {
    let n: usize = value
        .parse()
        .map_err(|_| f!("`{value}` is not a whole number"))?;
    if (MIN_MIN_LENGTH..=MAX_MIN_LENGTH).contains(&n) {
        Ok(n)
    } else {
        Err(f!("{n} is not in {MIN_MIN_LENGTH}..={MAX_MIN_LENGTH}"))
    }
}

/// Validate the options, extract page text and run the analysis.
///
/// Keywords and stopwords are checked before the PDF is touched.
pub fn scan_data(
    options: &ScanOptions,
    source: &dyn PageTextSource,
    global: &crate::Global,
) -> Result<Analysis> {
    let keywords = KeywordSet::parse(&options.keywords)?;
    let request = AnalysisRequest::new(keywords, options.min_length).with_top_n(options.top);
    let tokenizer = Tokenizer::new(options.stopwords.build()?);

    let bytes = options.input.read()?;
    if global.verbose {
        if let Some(path) = &options.input.path {
            eprintln!("Reading {} ({} bytes)", path.display(), bytes.len());
        }
        eprintln!(
            "Keywords: {}",
            request
                .keywords
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        eprintln!("Stopwords: {}", tokenizer.stopwords().len());
    }

    let pages = extract_pages(source, &bytes, show_progress(options.json))?;
    if global.verbose {
        eprintln!("Pages: {}", pages.len());
    }

    Ok(analyze(&pages, &request, &tokenizer))
}

pub fn handler(options: ScanOptions, global: crate::Global) -> Result<()> {
    let analysis = scan_data(&options, &LopdfTextSource, &global)?;

    if let Some(path) = &options.csv {
        write_csv(path, &analysis.matched)?;
        if global.verbose {
            eprintln!("Wrote {} rows to {}", analysis.matched_count(), path.display());
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    for line in summary_lines(&analysis) {
        println!("{}", line);
    }

    if analysis.is_empty() {
        println!(
            "\n{}",
            "No paragraphs matched. Try broader keywords or a lower --min-length.".yellow()
        );
        return Ok(());
    }

    if !options.hide_paragraphs {
        print_paragraphs(&analysis.matched, options.max_shown);
    }

    if let Some(frequencies) = &analysis.frequencies {
        println!(
            "\n{} ({} tokens counted)",
            "== Top tokens ==".bold().cyan(),
            frequencies.total_tokens
        );
        if frequencies.cloud.is_empty() {
            println!("No tokens left after stopword filtering.");
        } else {
            token_table(&frequencies.cloud).printstd();
        }
    }

    Ok(())
}

pub fn write_csv(path: &Path, paragraphs: &[Paragraph]) -> Result<(), Error> {
    std::fs::write(path, matched_paragraphs_csv(paragraphs)).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn summary_lines(analysis: &Analysis) -> Vec<String> {
    vec![
        f!("Extracted {} paragraphs", analysis.paragraph_count),
        f!(
            "Paragraphs matching keywords ({}): {}",
            analysis.keyword_count,
            analysis.matched_count()
        ),
    ]
}

fn print_paragraphs(paragraphs: &[Paragraph], max_shown: usize) {
    println!("\n{}", "== Matched paragraphs ==".bold().cyan());
    for (idx, paragraph) in paragraphs.iter().take(max_shown).enumerate() {
        println!(
            "\n{} {}\n{}",
            f!("[{}]", idx + 1).bright_yellow(),
            f!("page {}", paragraph.page()).bright_black(),
            paragraph
        );
    }
    if paragraphs.len() > max_shown {
        println!(
            "\n{}",
            f!("... {} more not shown", paragraphs.len() - max_shown).bright_black()
        );
    }
}

fn token_table(cloud: &[CloudWord]) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row!["Token", "Count", "Weight"]);
    for word in cloud {
        table.add_row(prettytable::row![
            &word.token,
            word.count,
            weight_bar(word.weight).green()
        ]);
    }
    table
}

/// A proportional bar, never empty for a positive weight.
pub fn weight_bar(weight: f64) -> String {
    let cells = (weight.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let cells = if weight > 0.0 { cells.max(1) } else { 0 };
    "#".repeat(cells)
}
