use colored::Colorize;

use crate::input::InputArgs;
use crate::prelude::{println, *};

#[derive(Debug, Clone, clap::Args)]
pub struct InfoOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handler(options: InfoOptions, _global: crate::Global) -> Result<()> {
    let bytes = options.input.read()?;
    let meta = pdf::info(&bytes).map_err(Error::from)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&meta)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Pages".bold().cyan(),
        meta.page_count.to_string()
    ]);
    for (label, value) in [
        ("Title", &meta.title),
        ("Author", &meta.author),
        ("Subject", &meta.subject),
        ("Creator", &meta.creator),
        ("Producer", &meta.producer),
    ] {
        if let Some(value) = value {
            table.add_row(prettytable::row![label.bold().cyan(), value]);
        }
    }
    table.printstd();

    Ok(())
}
