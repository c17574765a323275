//! `parkspot-tui`: live terminal dashboard for parking occupancy.
//!
//! Polls `/parkinglots` in the background and animates the overall
//! occupancy toward each new value, one step per interval. Lots are listed
//! below the gauge with their priority marker.
//!
//! Logs are written to a file (default `/tmp/parkspot-tui.log`) to avoid
//! corrupting the terminal UI.

mod app;
mod event;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use parkspot_core::{GatewayConfig, TlsVerification};

use crate::app::App;

/// Terminal dashboard for parking lot occupancy.
#[derive(Parser, Debug)]
#[command(name = "parkspot-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short = 'p', long, env = "PARKSPOT_PROFILE")]
    profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(short = 'b', long, env = "PARKSPOT_BASE_URL")]
    base_url: Option<String>,

    /// Seconds between lot polls (overrides profile; 0 polls only on `r`)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Accept self-signed TLS certificates
    #[arg(short = 'k', long, env = "PARKSPOT_INSECURE")]
    insecure: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/parkspot-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Logging to stdout/stderr would corrupt the
/// TUI. The returned guard must live until exit so logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "parkspot_tui={log_level},parkspot_core={log_level},parkspot_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("parkspot-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve the backend from flags and the shared config file.
///
/// Priority: `--base-url` > profile. Display settings always come from the
/// profile when one exists.
fn gateway_config(cli: &Cli) -> Result<GatewayConfig> {
    let cfg = parkspot_config::load_config()?;
    let profile_name = cfg.active_profile_name(cli.profile.as_deref());

    let mut config = match (cfg.profiles.get(&profile_name), cli.base_url.as_deref()) {
        (Some(profile), url) => {
            let mut config = parkspot_config::profile_to_gateway_config(profile)?;
            if let Some(url) = url {
                config.base_url = parkspot_config::parse_base_url(url)?;
            }
            config
        }
        (None, Some(url)) => GatewayConfig::new(parkspot_config::parse_base_url(url)?),
        (None, None) => {
            return Err(eyre!(
                "no backend configured: pass --base-url or run `parkspot config init`"
            ));
        }
    };

    if let Some(secs) = cli.poll_interval {
        config.poll_interval = Duration::from_secs(secs);
    }
    if cli.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = gateway_config(&cli)?;
    info!(base_url = %config.base_url, "starting parkspot-tui");

    let mut app = App::new(config)?;
    app.run().await
}
