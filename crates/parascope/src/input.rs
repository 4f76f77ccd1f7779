use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use parascope_core::stopwords::parse_stopword_list;
use parascope_core::{require_input, BuiltinStopwords, Language, StopwordSet};
use pdf::PageTextSource;

use crate::prelude::*;

#[derive(Debug, Clone, Default, clap::Args)]
pub struct InputArgs {
    /// Path to the PDF file
    #[clap(env = "PARASCOPE_PDF")]
    pub path: Option<PathBuf>,
}

impl InputArgs {
    /// Read the PDF bytes. A missing path and an empty file are both
    /// reported as missing input.
    pub fn read(&self) -> Result<Vec<u8>, Error> {
        let bytes = match &self.path {
            Some(path) => std::fs::read(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?,
            None => Vec::new(),
        };
        require_input(Some(&bytes))?;
        Ok(bytes)
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct StopwordArgs {
    /// Extra word to ignore when counting tokens (repeatable)
    #[arg(long = "stopword", value_name = "WORD")]
    pub stopwords: Vec<String>,

    /// File of extra stopwords, one per line; `#` starts a comment
    #[arg(long, env = "PARASCOPE_STOPWORDS_FILE", value_name = "PATH")]
    pub stopwords_file: Option<PathBuf>,

    /// Leave out the built-in report vocabulary (company, annual, report, ...)
    #[arg(long)]
    pub no_default_stopwords: bool,
}

impl StopwordArgs {
    /// English stopwords, the domain list unless disabled, then the user's
    /// own words.
    pub fn build(&self) -> Result<StopwordSet, Error> {
        let base = if self.no_default_stopwords {
            StopwordSet::from_provider(&BuiltinStopwords, Language::English)
        } else {
            StopwordSet::english_with_domain_defaults()
        };

        let from_file = match &self.stopwords_file {
            Some(path) => {
                let contents = std::fs::read_to_string(path).map_err(|source| Error::Read {
                    path: path.clone(),
                    source,
                })?;
                parse_stopword_list(&contents)
            }
            None => Vec::new(),
        };

        Ok(base.with_words(&self.stopwords).with_words(from_file))
    }
}

/// Spinners are drawn only for interactive, non-JSON runs.
pub fn show_progress(json: bool) -> bool {
    !json && std::io::stderr().is_terminal()
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Run `source` over `bytes`, with a spinner while it works if `progress`.
pub fn extract_pages(
    source: &dyn PageTextSource,
    bytes: &[u8],
    progress: bool,
) -> Result<Vec<Option<String>>> {
    let spinner = if progress {
        Some(spinner("Extracting paragraphs...")?)
    } else {
        None
    };

    let pages = source.page_texts(bytes);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    Ok(pages.map_err(Error::from)?)
}
