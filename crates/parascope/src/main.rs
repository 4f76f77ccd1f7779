use crate::prelude::*;
use clap::Parser;

mod error;
mod info;
mod input;
mod paragraphs;
mod prelude;
mod scan;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Find the paragraphs of a PDF report that mention your keywords and rank the words they use"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "PARASCOPE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Filter paragraphs by keyword and rank their most frequent words
    #[command(long_about = crate::scan::SCAN_LONG_ABOUT)]
    Scan(crate::scan::ScanOptions),

    /// List every paragraph extracted from the PDF, split at blank lines
    Paragraphs(crate::paragraphs::ParagraphsOptions),

    /// Print document metadata
    Info(crate::info::InfoOptions),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    log::debug!("{:?}", app);

    match app.command {
        SubCommands::Scan(options) => crate::scan::handler(options, app.global),
        SubCommands::Paragraphs(options) => crate::paragraphs::handler(options, app.global),
        SubCommands::Info(options) => crate::info::handler(options, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
