mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    exam::ExamSubcommand, learn::LearnSubcommand, register::RegisterArgs, tasks::TaskSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "trailhead",
    about = "Onboarding and training progression engine — registration, lessons, quizzes, gates, certification",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: auto-detect from .trailhead/ or .git/)
    #[arg(long, global = true, env = "TRAILHEAD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and a default config
    Init,

    /// Register a new hire and build their course plan
    Register(RegisterArgs),

    /// Show a user's profile
    Profile { id: u64 },

    /// Walk the training plan (next lesson, advance, run a quiz)
    Learn {
        #[command(subcommand)]
        subcommand: LearnSubcommand,
    },

    /// List and review remedial tasks
    Tasks {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// Show the gate conditions for a trainee
    Gates { id: u64 },

    /// Open or run the final certification exam
    Exam {
        #[command(subcommand)]
        subcommand: ExamSubcommand,
    },

    /// Promote a trainee to employee (requires all gates)
    Promote {
        /// Acting mentor id
        #[arg(long)]
        mentor: u64,
        trainee: u64,
    },

    /// List a mentor's trainees
    Trainees { mentor: u64 },

    /// Show a trainee's per-lesson progress
    Progress { trainee: u64 },

    /// List trainees and employees in the manager's city
    Employees { manager: u64 },

    /// Record a feedback message from a user
    Feedback {
        id: u64,
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Validate the configuration
    Check,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Register(args) => cmd::register::run(&root, args, cli.json),
        Commands::Profile { id } => cmd::profile::run(&root, id, cli.json),
        Commands::Learn { subcommand } => cmd::learn::run(&root, subcommand, cli.json),
        Commands::Tasks { subcommand } => cmd::tasks::run(&root, subcommand, cli.json),
        Commands::Gates { id } => cmd::gates::run(&root, id, cli.json),
        Commands::Exam { subcommand } => cmd::exam::run(&root, subcommand, cli.json),
        Commands::Promote { mentor, trainee } => cmd::promote::run(&root, mentor, trainee, cli.json),
        Commands::Trainees { mentor } => cmd::mentor::trainees(&root, mentor, cli.json),
        Commands::Progress { trainee } => cmd::mentor::progress(&root, trainee, cli.json),
        Commands::Employees { manager } => cmd::employees::run(&root, manager, cli.json),
        Commands::Feedback { id, text } => cmd::feedback::run(&root, id, &text.join(" ")),
        Commands::Check => cmd::check::run(&root, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
