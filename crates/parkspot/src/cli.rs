//! Clap derive structures for the `parkspot` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// parkspot -- parking occupancy and reservations from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "parkspot",
    version,
    about = "Check parking lot occupancy and manage reservations",
    long_about = "A CLI for the parkspot reservation backend.\n\n\
        Shows live lot occupancy with an animated gauge, and manages the\n\
        car, profile and reservation of the configured user.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "PARKSPOT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'b', env = "PARKSPOT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// User ID (overrides profile)
    #[arg(long, short = 'u', env = "PARKSPOT_USER", global = true)]
    pub user: Option<u64>,

    /// Car ID (overrides profile)
    #[arg(long, env = "PARKSPOT_CAR", global = true)]
    pub car: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PARKSPOT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PARKSPOT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "PARKSPOT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Where the animated gauge starts when occupancy changes.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StartFromArg {
    /// Restart from 0 %
    Zero,
    /// Continue from the value currently shown
    Previous,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List parking lots and their free spots
    #[command(alias = "l")]
    Lots(LotsArgs),

    /// Show overall occupancy across all lots
    #[command(alias = "occ")]
    Occupancy(OccupancyArgs),

    /// Show the user's parked car
    Car(CarArgs),

    /// Manage the user's parking profile
    Profile(ProfileArgs),

    /// Manage the car's reservation
    #[command(alias = "res")]
    Reservation(ReservationArgs),

    /// Show the usage history of a parking spot
    History {
        /// Parking spot ID
        spot: u64,
    },

    /// Show the user's status
    Status,

    /// Log in and print the user ID
    Login(LoginArgs),

    /// Render a client-side view by path (e.g. /dashboard/)
    View(ViewArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOTS / OCCUPANCY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LotsArgs {
    #[command(subcommand)]
    pub command: LotsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LotsCommand {
    /// List all parking lots
    #[command(alias = "ls")]
    List {
        /// Only show priority lots
        #[arg(long)]
        priority: bool,
    },
}

#[derive(Debug, Args)]
pub struct OccupancyArgs {
    /// Keep polling and animate the gauge until interrupted
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Milliseconds between gauge steps (overrides profile)
    #[arg(long, requires = "watch")]
    pub step_interval_ms: Option<u64>,

    /// Where the gauge restarts on change (overrides profile)
    #[arg(long, requires = "watch")]
    pub start_from: Option<StartFromArg>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CAR / PROFILE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CarArgs {
    #[command(subcommand)]
    pub command: CarCommand,
}

#[derive(Debug, Subcommand)]
pub enum CarCommand {
    /// Show where the user's car is parked
    Show,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the user's profile
    Show,

    /// Update preference, role and priority
    Update(ProfileFields),

    /// Create the user's profile
    Create(ProfileFields),
}

#[derive(Debug, Args)]
pub struct ProfileFields {
    /// Preferred parking area ID
    #[arg(long)]
    pub preference: i64,

    /// Role (e.g. "student", "staff")
    #[arg(long)]
    pub role: String,

    /// Priority class (e.g. "normal", "disabled")
    #[arg(long)]
    pub priority: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESERVATION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReservationArgs {
    #[command(subcommand)]
    pub command: ReservationCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReservationCommand {
    /// Show the car's reservation
    Show,

    /// Reserve a parking spot for the car
    Create {
        /// Parking spot ID
        spot: u64,
    },

    /// Cancel the car's reservation
    Cancel,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGIN / VIEW
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account name (defaults to the profile's account)
    pub account: Option<String>,

    /// Store the returned user ID in the active profile
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Client-side path; unknown paths show the main view
    #[arg(default_value = "/")]
    pub path: String,

    /// Spot ID for the guard view
    #[arg(long)]
    pub spot: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value on the active profile
    Set {
        /// Profile key (e.g. "base_url", "car_id", "display.step")
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the login password of the active profile in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
