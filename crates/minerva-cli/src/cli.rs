use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "minerva")]
#[command(about = "Task directory with an unlock-graph view", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Path to minerva data file (or set MINERVA_FILE env var)
    #[arg(long, value_name = "FILE", env = "MINERVA_FILE", global = true)]
    pub file: Option<String>,

    /// Acting profile id, used for permission checks (or MINERVA_ACTOR)
    #[arg(long, value_name = "UUID", env = "MINERVA_ACTOR", global = true)]
    pub actor: Option<Uuid>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Unlock-graph operations
    Flow(FlowCommand),
    /// Task operations
    Task(TaskCommand),
    /// Team operations
    Team(TeamCommand),
    /// Profile operations
    Profile(ProfileCommand),
    /// Permission flag operations
    Permission(PermissionCommand),
    /// Export directory data
    Export(ExportArgs),
    /// Import directory data
    Import(ImportArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Flow commands

#[derive(Args)]
pub struct FlowCommand {
    #[command(subcommand)]
    pub action: FlowAction,
}

#[derive(Subcommand)]
pub enum FlowAction {
    /// Rebuild the graph from the goal tasks and print it
    Goals,
    /// Expand one task's prerequisites into the graph
    Expand {
        /// Task to expand
        #[arg(long)]
        id: i64,
    },
    /// Create a task and merge it into the graph
    Create(FlowCreateArgs),
}

#[derive(Args)]
pub struct FlowCreateArgs {
    #[arg(long)]
    pub title: String,
    /// Task the new one unlocks; omit to create a goal
    #[arg(long)]
    pub unlocks: Option<i64>,
    #[arg(long)]
    pub team: Option<i64>,
    /// Profile the task is assigned to
    #[arg(long)]
    pub assign: Option<Uuid>,
    /// Due date (RFC 3339)
    #[arg(long)]
    pub due: Option<String>,
    /// Participant profile; repeat for several
    #[arg(long = "participant")]
    pub participants: Vec<Uuid>,
}

// Task commands

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List all tasks
    List,
    /// List tasks assigned to or involving a profile
    My {
        #[arg(long)]
        profile: Uuid,
    },
    /// Get a specific task
    Get {
        #[arg(long)]
        id: i64,
    },
}

// Team commands

#[derive(Args)]
pub struct TeamCommand {
    #[command(subcommand)]
    pub action: TeamAction,
}

#[derive(Subcommand)]
pub enum TeamAction {
    /// List all teams
    List,
}

// Profile commands

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub action: ProfileAction,
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,
    /// Get a specific profile
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Update a profile
    Update(ProfileUpdateArgs),
}

#[derive(Args)]
pub struct ProfileUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub avatar_url: Option<String>,
}

// Permission commands

#[derive(Args)]
pub struct PermissionCommand {
    #[command(subcommand)]
    pub action: PermissionAction,
}

#[derive(Subcommand)]
pub enum PermissionAction {
    /// List all granted flags
    List,
    /// Grant a flag to a profile
    Grant {
        #[arg(long)]
        profile: Uuid,
        /// Flag value; defaults to the goal-creation capability
        #[arg(long, default_value_t = minerva_domain::CAN_CREATE_GOAL)]
        permission: i32,
    },
    /// Revoke a flag from a profile
    Revoke {
        #[arg(long)]
        profile: Uuid,
        #[arg(long, default_value_t = minerva_domain::CAN_CREATE_GOAL)]
        permission: i32,
    },
}

// Export / import

#[derive(Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file with directory data
    #[arg(long)]
    pub input: String,
}
