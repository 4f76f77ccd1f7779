use crate::cli::LintArgs;
use color_eyre::eyre::{bail, Result};
use duct::cmd;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fmt,
    Clippy,
    Test,
    Machete,
}

const STEPS: [Step; 4] = [Step::Fmt, Step::Clippy, Step::Test, Step::Machete];

impl Step {
    fn enabled(self, args: &LintArgs) -> bool {
        match self {
            Step::Fmt => !args.no_fmt,
            Step::Clippy => !args.no_clippy,
            Step::Test => !args.no_test,
            Step::Machete => !args.no_machete,
        }
    }

    /// Optional steps are skipped when their tool is not installed.
    fn optional(self) -> bool {
        matches!(self, Step::Machete)
    }

    fn cargo_args(self, fix: bool) -> Vec<&'static str> {
        match (self, fix) {
            (Step::Fmt, false) => vec!["fmt", "--check"],
            (Step::Fmt, true) => vec!["fmt"],
            (Step::Clippy, false) => vec!["clippy", "--all-targets", "--", "-D", "warnings"],
            (Step::Clippy, true) => vec![
                "clippy",
                "--all-targets",
                "--fix",
                "--allow-dirty",
                "--",
                "-D",
                "warnings",
            ],
            (Step::Test, _) => vec!["test", "--workspace"],
            (Step::Machete, _) => vec!["machete"],
        }
    }
}

#[derive(Debug)]
enum Outcome {
    Passed(String),
    Failed(String),
    Missing,
}

fn tool_missing(output: &str) -> bool {
    let lower = output.to_lowercase();
    lower.contains("no such command") || lower.contains("unrecognized subcommand")
}

fn classify(step: Step, success: bool, output: String) -> Outcome {
    if success {
        Outcome::Passed(output)
    } else if step.optional() && tool_missing(&output) {
        Outcome::Missing
    } else {
        Outcome::Failed(output)
    }
}

fn log_path() -> Result<PathBuf> {
    let target = std::env::current_dir()?.join("target");
    fs::create_dir_all(&target)?;
    Ok(target.join("xtask-lint.log"))
}

pub fn run(args: &LintArgs) -> Result<()> {
    let path = log_path()?;
    let mut log = fs::File::create(&path)?;

    for step in STEPS.into_iter().filter(|s| s.enabled(args)) {
        let cargo_args = step.cargo_args(args.fix);
        let name = format!("cargo {}", cargo_args.join(" "));
        println!("--> {name}");

        let output = cmd("cargo", &cargo_args)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()?;
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        writeln!(log, "=== {name} ===\n{text}")?;

        match classify(step, output.status.success(), text) {
            Outcome::Passed(text) => {
                if args.verbose {
                    print!("{text}");
                }
            }
            Outcome::Missing => println!("[skip] {name} (not installed)"),
            Outcome::Failed(text) => {
                print!("{text}");
                println!("log: {}", path.display());
                bail!("lint failed at: {name}");
            }
        }
    }

    println!("log: {}", path.display());
    Ok(())
}
