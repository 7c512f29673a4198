use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use action_trail::config::loader;
use action_trail::script;
use action_trail::session::{Session, StepReport};

#[derive(Parser)]
#[command(name = "action-trail", version, about = "Breadcrumb navigation session runner")]
struct Cli {
    /// Path to config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session script, printing the trail after every step.
    Replay {
        /// Session script to run.
        script: PathBuf,
        /// Print one JSON object per step instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Parse a session script without running it.
    Check {
        /// Session script to parse.
        script: PathBuf,
    },
}

fn read_script(path: &Path) -> Result<Vec<script::Step>> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    script::parse(&source).with_context(|| format!("parsing script {}", path.display()))
}

fn print_text(report: &StepReport, commit_message: &str) {
    println!("[{}] {}", report.step, report.command);
    for token in &report.undone {
        println!("    undo {token}");
    }
    if report.committed {
        println!("    {commit_message}");
    }
    println!("    trail: {}", report.trail);
    println!("    hash:  {:?}", report.snapshot.hash);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let config = loader::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { script } => {
            let steps = read_script(&script)?;
            println!("{}: {} step(s)", script.display(), steps.len());
        }
        Commands::Replay { script, json } => {
            let steps = read_script(&script)?;
            tracing::info!("replaying {} step(s) from {}", steps.len(), script.display());
            let mut session = Session::new(&config);
            for step in &steps {
                let report = session.apply(step);
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    print_text(&report, &config.session.commit_message);
                }
            }
        }
    }

    Ok(())
}
