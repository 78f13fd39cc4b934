mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{case::CaseSubcommand, message::MessageSubcommand};
use parcours_core::types::{ActionId, Role};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "parcours",
    about = "Patient-case workflow tracker — cases, statuses, actions, and messages",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .parcours/ or .git/)
    #[arg(long, global = true, env = "PARCOURS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize parcours in the current project
    Init {
        /// Project name (defaults to the root directory name)
        #[arg(long)]
        project: Option<String>,
    },

    /// Show project state
    State,

    /// Manage cases
    Case {
        #[command(subcommand)]
        subcommand: CaseSubcommand,
    },

    /// Show guidance and permitted actions for a role on a case
    Next {
        /// Case slug
        #[arg(long = "for")]
        case: String,

        /// Acting role (marcel, franchir, gilles, admin)
        #[arg(long)]
        role: Role,
    },

    /// Apply a workflow action to a case
    Act {
        /// Case slug
        slug: String,

        /// Action id (e.g. submit_to_medical)
        action: ActionId,

        /// Acting role (marcel, franchir, gilles, admin)
        #[arg(long)]
        role: Role,

        /// Display name recorded on the audit message
        #[arg(long)]
        actor: Option<String>,

        /// Free-text message input
        #[arg(long)]
        message: Option<String>,

        /// Justification input (rejections)
        #[arg(long)]
        justification: Option<String>,

        /// Recommended surgeon (repeat for a second one)
        #[arg(long = "surgeon")]
        surgeons: Vec<String>,

        /// Budget text input
        #[arg(long)]
        budget: Option<String>,

        /// Proposed-dates text input
        #[arg(long)]
        dates: Option<String>,
    },

    /// Show the progress timeline of a case
    Timeline { slug: String },

    /// Add and list case messages
    Message {
        #[command(subcommand)]
        subcommand: MessageSubcommand,
    },

    /// Show a role's notification feed
    Notifications {
        /// Role whose feed to show
        #[arg(long)]
        role: Role,

        /// Mark the feed read after listing
        #[arg(long)]
        mark_read: bool,
    },

    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3141")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init { project } => cmd::init::run(&root, project.as_deref()),
        Commands::State => cmd::state::run(&root, cli.json),
        Commands::Case { subcommand } => cmd::case::run(&root, subcommand, cli.json),
        Commands::Next { case, role } => cmd::next::run(&root, &case, role, cli.json),
        Commands::Act {
            slug,
            action,
            role,
            actor,
            message,
            justification,
            surgeons,
            budget,
            dates,
        } => cmd::act::run(
            &root,
            &slug,
            action,
            role,
            actor.as_deref(),
            cmd::act::Inputs {
                message,
                justification,
                surgeons,
                budget,
                dates,
            },
            cli.json,
        ),
        Commands::Timeline { slug } => cmd::timeline::run(&root, &slug, cli.json),
        Commands::Message { subcommand } => cmd::message::run(&root, subcommand, cli.json),
        Commands::Notifications { role, mark_read } => {
            cmd::notifications::run(&root, role, mark_read, cli.json)
        }
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
