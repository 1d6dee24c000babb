mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    artifact::ArtifactSubcommand, assess::AssessSubcommand, config::ConfigSubcommand,
    context::ContextSubcommand, gate::GateSubcommand, prompt::PromptSubcommand,
    render::RenderSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "insight",
    about = "Phase-gated workflow state manager: artifacts, assessments, and gated transitions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .insight/ or .git/)
    #[arg(long, global = true, env = "INSIGHT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize insight in the current project
    Init,

    /// Show the current phase and the verdict of every gate
    Status,

    /// Attempt a gated phase transition
    Transition {
        /// Phase the transition starts from
        from: String,
        /// Phase to move to
        to: String,
    },

    /// Inspect and evaluate quality gates
    Gate {
        #[command(subcommand)]
        subcommand: GateSubcommand,
    },

    /// Record and inspect gate assessments
    Assess {
        #[command(subcommand)]
        subcommand: AssessSubcommand,
    },

    /// Store and read artifacts
    Artifact {
        #[command(subcommand)]
        subcommand: ArtifactSubcommand,
    },

    /// Read and replace structured phase context
    Context {
        #[command(subcommand)]
        subcommand: ContextSubcommand,
    },

    /// Artifacts and latest assessments attached to a phase
    History {
        /// Phase name (e.g. concept, unit-test-design)
        phase: String,
    },

    /// Look up guidance prompts
    Prompt {
        #[command(subcommand)]
        subcommand: PromptSubcommand,
    },

    /// Render stored context as Markdown
    Render {
        #[command(subcommand)]
        subcommand: RenderSubcommand,
    },

    /// Validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
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

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Transition { from, to } => cmd::transition::run(&root, &from, &to, cli.json),
        Commands::Gate { subcommand } => cmd::gate::run(&root, subcommand, cli.json),
        Commands::Assess { subcommand } => cmd::assess::run(&root, subcommand, cli.json),
        Commands::Artifact { subcommand } => cmd::artifact::run(&root, subcommand, cli.json),
        Commands::Context { subcommand } => cmd::context::run(&root, subcommand, cli.json),
        Commands::History { phase } => cmd::history::run(&root, &phase, cli.json),
        Commands::Prompt { subcommand } => cmd::prompt::run(&root, subcommand, cli.json),
        Commands::Render { subcommand } => cmd::render::run(&root, subcommand),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
