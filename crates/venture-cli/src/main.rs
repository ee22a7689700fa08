mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::input::InputArgs;
use venture_core::metrics::Stage;

#[derive(Parser)]
#[command(
    name = "venture",
    about = "Deterministic strategic assessment — risk, execution readiness, and a stage-aware roadmap for a startup idea",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full assessment: risk, readiness, and the roadmap (or why it is blocked)
    Assess(InputArgs),

    /// Overall risk level, drivers, weaknesses, and structural constraints
    Risk(InputArgs),

    /// Readiness index, tier, gate violations, and improvement signal
    Readiness(InputArgs),

    /// Sequenced remediation roadmap (blocked when the idea is Not Ready)
    Roadmap(InputArgs),

    /// List the phase library, or show one phase
    Phases {
        /// Phase id (e.g. mvp-build)
        id: Option<String>,

        /// Show stage priority modifiers and effective priorities for this stage
        #[arg(long)]
        stage: Option<Stage>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Assess(input) => cmd::assess::run(&input, cli.json),
        Commands::Risk(input) => cmd::risk::run(&input, cli.json),
        Commands::Readiness(input) => cmd::readiness::run(&input, cli.json),
        Commands::Roadmap(input) => cmd::roadmap::run(&input, cli.json),
        Commands::Phases { id, stage } => cmd::phases::run(id.as_deref(), stage, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
