use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtasks")]
#[command(about = "Run project tasks using rust instead of scripts")]
pub struct App {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Builds a binary and installs it at the given path
    Install(InstallArgs),
    /// Run formatting, clippy and the test suite
    Lint(LintArgs),
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Name of the binary to install
    #[arg(short, long, default_value = "parascope")]
    pub name: String,

    /// Directory to install the binary to (defaults to ~/.local/bin)
    #[arg(short, long)]
    pub path: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct LintArgs {
    /// Print the output of passing checks too
    #[arg(short, long)]
    pub verbose: bool,

    /// Apply formatting and clippy suggestions instead of only checking
    #[arg(long)]
    pub fix: bool,

    /// Skip `cargo fmt`
    #[arg(long)]
    pub no_fmt: bool,

    /// Skip `cargo clippy`
    #[arg(long)]
    pub no_clippy: bool,

    /// Skip `cargo test`
    #[arg(long)]
    pub no_test: bool,

    /// Skip `cargo machete`
    #[arg(long)]
    pub no_machete: bool,
}
