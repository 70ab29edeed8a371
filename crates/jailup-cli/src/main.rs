use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod completion;
mod dispatch;
mod render;

use dispatch::run_cli;
use render::{current_output_style, render_status_line};

const LOG_ENV: &str = "JAILUP_LOG";

#[derive(Parser, Debug)]
#[command(name = "jailup")]
#[command(version)]
#[command(about = "Upgrade iocage jails to a new FreeBSD release", long_about = None)]
struct Cli {
    /// Settings file; overrides JAILUP_CONFIG and the system default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Disable badges, colors and the progress spinner.
    #[arg(long, global = true)]
    plain: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upgrade a jail, starting it for the run if it is stopped.
    Upgrade {
        /// Uuid prefix or exact tag of the jail.
        jail: String,
        #[arg(short = 'r', long)]
        release: String,
    },
    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: CliCompletionShell,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl From<CliCompletionShell> for Shell {
    fn from(value: CliCompletionShell) -> Self {
        match value {
            CliCompletionShell::Bash => Shell::Bash,
            CliCompletionShell::Zsh => Shell::Zsh,
            CliCompletionShell::Fish => Shell::Fish,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let output_style = current_output_style(cli.plain);

    match run_cli(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!(
                "{}",
                render_status_line(output_style, "error", &format!("{err:#}"))
            );
            ExitCode::from(1)
        }
    }
}
