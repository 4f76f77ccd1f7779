use colored::Colorize;
use parascope_core::{extract_paragraphs, Paragraph};
use pdf::{LopdfTextSource, PageTextSource};

use crate::input::{extract_pages, show_progress, InputArgs};
use crate::prelude::{println, *};

#[derive(Debug, Clone, clap::Args)]
pub struct ParagraphsOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Only list paragraphs with at least this many characters
    #[arg(short, long, default_value_t = 0)]
    pub min_length: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Every paragraph of the document, unfiltered except for `min_length`.
pub fn paragraphs_data(
    options: &ParagraphsOptions,
    source: &dyn PageTextSource,
) -> Result<Vec<Paragraph>> {
    let bytes = options.input.read()?;
    let pages = extract_pages(source, &bytes, show_progress(options.json))?;

    Ok(extract_paragraphs(&pages)
        .into_iter()
        .filter(|p| p.char_len() >= options.min_length)
        .collect())
}

pub fn handler(options: ParagraphsOptions, _global: crate::Global) -> Result<()> {
    let paragraphs = paragraphs_data(&options, &LopdfTextSource)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&paragraphs)?);
        return Ok(());
    }

    println!("Extracted {} paragraphs", paragraphs.len());
    for (idx, paragraph) in paragraphs.iter().enumerate() {
        println!(
            "\n{} {}\n{}",
            f!("[{}]", idx + 1).bright_yellow(),
            f!("page {}, {} chars", paragraph.page(), paragraph.char_len()).bright_black(),
            paragraph
        );
    }

    Ok(())
}
