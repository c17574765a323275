//! Occupancy command: one-shot summary or a live, animated gauge.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;

use parkspot_core::{
    DisplayConfig, FeedStatus, Gateway, LotFeed, LotOccupancy, OccupancySummary, ProgressAnimator,
    StartFrom, summarize,
};

use crate::cli::{GlobalOpts, OccupancyArgs, OutputFormat, StartFromArg};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

const GAUGE_WIDTH: usize = 30;

/// Serialized shape of an occupancy summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct OccupancyReport {
    pub occupied: u64,
    pub capacity: u64,
    pub available: u64,
    pub percentage: u8,
}

impl From<OccupancySummary> for OccupancyReport {
    fn from(s: OccupancySummary) -> Self {
        Self {
            occupied: s.occupied,
            capacity: s.capacity,
            available: s.available(),
            percentage: s.percentage,
        }
    }
}

pub(crate) fn detail(report: &OccupancyReport, color: bool) -> String {
    let gauge = format!(
        "{} {}",
        output::text_gauge(report.percentage, GAUGE_WIDTH),
        output::paint_percentage(report.percentage, color)
    );
    output::detail_lines(&[
        ("Occupancy", gauge),
        ("Occupied", report.occupied.to_string()),
        ("Free", report.available.to_string()),
        ("Capacity", report.capacity.to_string()),
    ])
}

pub(crate) fn render(report: &OccupancyReport, global: &GlobalOpts) -> Result<String, CliError> {
    let color = output::should_color(&global.color);
    output::render_single(
        &global.output,
        report,
        |r| detail(r, color),
        |r| r.percentage.to_string(),
    )
}

pub async fn handle(
    gateway: &Gateway,
    session: &Session,
    args: OccupancyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.watch {
        let display = display_config(session.gateway.display, &args);
        return watch(gateway, display, session.gateway.poll_interval, global).await;
    }

    let (_, summary) = gateway.occupancy().await?;
    let out = render(&OccupancyReport::from(summary), global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn display_config(mut display: DisplayConfig, args: &OccupancyArgs) -> DisplayConfig {
    if let Some(ms) = args.step_interval_ms {
        display.step_interval = Duration::from_millis(ms.max(1));
    }
    if let Some(start) = args.start_from {
        display.start_from = match start {
            StartFromArg::Zero => StartFrom::Zero,
            StartFromArg::Previous => StartFrom::Previous,
        };
    }
    display
}

// ── Watch mode ──────────────────────────────────────────────────────

fn gauge_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{prefix:.bold} {wide_bar:.cyan/dim} {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    bar.set_prefix("Occupancy");
    bar.set_message("waiting for first poll…");
    bar
}

fn lots_message(lots: &[LotOccupancy]) -> String {
    let summary = summarize(lots);
    format!(
        "{}/{} free in {} lots",
        summary.available(),
        summary.capacity,
        lots.len()
    )
}

/// Bar message after a poll: the error if it failed, else the lot totals.
fn status_message(status: &FeedStatus, lots: &[LotOccupancy]) -> String {
    match status.last_error {
        Some(ref err) => format!("refresh failed: {err}"),
        None => lots_message(lots),
    }
}

/// Poll the lots and animate the percentage until Ctrl-C or the feed stops.
///
/// Table output draws an animated bar. Other formats print one line per
/// changed snapshot instead.
async fn watch(
    gateway: &Gateway,
    display: DisplayConfig,
    poll_interval: Duration,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let feed = LotFeed::spawn(gateway.clone(), poll_interval);
    let mut lots = feed.lots();
    let mut status = feed.subscribe_status();

    if !matches!(global.output, OutputFormat::Table) {
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                snapshot = lots.changed() => {
                    let Some(snapshot) = snapshot else { break };
                    let report = OccupancyReport::from(summarize(snapshot.iter()));
                    output::print_output(&render(&report, global)?, global.quiet);
                }
            }
        }
        return Ok(());
    }

    let animator = ProgressAnimator::spawn(display);
    let mut frames = animator.subscribe();
    let bar = if global.quiet {
        ProgressBar::hidden()
    } else {
        gauge_bar()
    };

    loop {
        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => break,
            snapshot = lots.changed() => {
                let Some(snapshot) = snapshot else { break };
                let summary = summarize(snapshot.iter());
                debug!(percentage = summary.percentage, "occupancy changed");
                animator.set_target(summary.percentage);
                bar.set_message(lots_message(&snapshot));
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let message = status_message(&status.borrow_and_update(), &feed.snapshot());
                bar.set_message(message);
            }
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = *frames.borrow_and_update();
                bar.set_position(u64::from(frame.displayed));
            }
        }
    }

    animator.shutdown();
    feed.shutdown();
    bar.abandon();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_available_spots() {
        let lots = [
            LotOccupancy::new("A", 34, 70),
            LotOccupancy::new("B", 32, 40),
            LotOccupancy::new("C", 3, 100),
        ];
        let report = OccupancyReport::from(summarize(&lots));
        assert_eq!(report.capacity, 210);
        assert_eq!(report.available, 69);
        assert_eq!(report.occupied, 141);
        assert_eq!(report.percentage, 67);
    }

    #[test]
    fn detail_shows_gauge_and_totals() {
        let report = OccupancyReport {
            occupied: 141,
            capacity: 210,
            available: 69,
            percentage: 67,
        };
        let out = detail(&report, false);
        assert!(out.contains("67%"));
        assert!(out.contains("Free       69"));
        assert!(out.starts_with("Occupancy  ["));
    }

    #[test]
    fn bar_message_follows_poll_outcome() {
        let lots = [LotOccupancy::new("A", 34, 70)];
        let failed = FeedStatus {
            last_refresh: None,
            last_error: Some("db down".into()),
        };
        assert_eq!(status_message(&failed, &lots), "refresh failed: db down");
        assert_eq!(
            status_message(&FeedStatus::default(), &lots),
            "34/70 free in 1 lots"
        );
        assert_eq!(
            status_message(&FeedStatus::default(), &[]),
            "0/0 free in 0 lots"
        );
    }

    #[test]
    fn flags_override_display_settings() {
        let args = OccupancyArgs {
            watch: true,
            step_interval_ms: Some(0),
            start_from: Some(StartFromArg::Zero),
        };
        let display = display_config(DisplayConfig::default(), &args);
        assert_eq!(display.step_interval, Duration::from_millis(1));
        assert_eq!(display.start_from, StartFrom::Zero);
        assert_eq!(display.step, 1);
    }
}
