//! Application core: event loop, feed wiring, and dashboard rendering.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Gauge, Paragraph, Row, Table},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use parkspot_core::{
    FeedStatus, Frame as ProgressFrame, Gateway, GatewayConfig, LotFeed, LotOccupancy,
    OccupancySummary, ProgressAnimator, View, summarize,
};

use crate::event::{Event, EventReader};
use crate::theme;
use crate::tui::Tui;

const RENDER_RATE: Duration = Duration::from_millis(33);

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
}

/// Map a key press to an action. Unbound keys yield `None`.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c'))
        | (KeyModifiers::NONE, KeyCode::Char('q') | KeyCode::Esc) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Action::Refresh),
        _ => None,
    }
}

// ── Dashboard state ─────────────────────────────────────────────────

/// Everything the main view draws. Updated from the feed and animator.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    view: View,
    lots: Arc<Vec<LotOccupancy>>,
    summary: OccupancySummary,
    progress: ProgressFrame,
    status: FeedStatus,
}

impl Dashboard {
    /// Take a new snapshot and return the percentage to animate toward.
    pub fn set_lots(&mut self, lots: Arc<Vec<LotOccupancy>>) -> u8 {
        self.summary = summarize(lots.iter());
        self.lots = lots;
        self.summary.percentage
    }

    pub fn set_progress(&mut self, progress: ProgressFrame) {
        self.progress = progress;
    }

    pub fn set_status(&mut self, status: FeedStatus) {
        self.status = status;
    }

    pub fn render(&self, frame: &mut Frame) {
        let [header, gauge, table, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header);
        self.render_gauge(frame, gauge);
        self.render_lots(frame, table);
        render_footer(frame, footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let refresh = match (&self.status.last_error, self.status.last_refresh) {
            (Some(err), _) => Span::styled(
                format!("refresh failed: {err}"),
                Style::default().fg(theme::ERROR_RED),
            ),
            (None, Some(at)) => Span::styled(
                format!(
                    "updated {}",
                    at.with_timezone(&chrono::Local).format("%H:%M:%S")
                ),
                theme::key_hint(),
            ),
            (None, None) => Span::styled("waiting for first poll…", theme::key_hint()),
        };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.view.title()), theme::title_style()),
            Span::styled("│ ", theme::key_hint()),
            refresh,
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(theme::BG_HIGHLIGHT)),
            area,
        );
    }

    fn render_gauge(&self, frame: &mut Frame, area: Rect) {
        let displayed = self.progress.displayed.min(100);
        let label = format!(
            "{displayed}%  ({}/{} occupied)",
            self.summary.occupied, self.summary.capacity
        );
        let gauge = Gauge::default()
            .block(panel(" Occupancy "))
            .gauge_style(
                Style::default()
                    .fg(theme::occupancy_color(displayed))
                    .add_modifier(Modifier::BOLD),
            )
            .percent(u16::from(displayed))
            .label(label);
        frame.render_widget(gauge, area);
    }

    fn render_lots(&self, frame: &mut Frame, area: Rect) {
        let header =
            Row::new(["Name", "Free", "Capacity", "Occupied", ""]).style(theme::table_header());
        let rows = self.lots.iter().map(|lot| {
            Row::new([
                Cell::from(lot.name.clone()),
                Cell::from(lot.available.to_string()),
                Cell::from(lot.capacity.to_string()),
                Cell::from(lot.occupied().to_string()),
                Cell::from(if lot.priority { "♿" } else { "" }),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Length(9),
                Constraint::Length(3),
            ],
        )
        .header(header)
        .block(panel(" Lots "));
        frame.render_widget(table, area);
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled("r", theme::key_hint_key()),
        Span::styled(" refresh  ", theme::key_hint()),
        Span::styled("q", theme::key_hint_key()),
        Span::styled(" quit", theme::key_hint()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

// ── App ─────────────────────────────────────────────────────────────

/// Top-level application state and event loop.
pub struct App {
    gateway: Gateway,
    poll_interval: Duration,
    dashboard: Dashboard,
    running: bool,
}

impl App {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let poll_interval = config.poll_interval;
        Ok(Self {
            gateway: Gateway::new(config)?,
            poll_interval,
            dashboard: Dashboard::default(),
            running: true,
        })
    }

    /// Run until the user quits. The feed and animator stop with the loop.
    pub async fn run(&mut self) -> Result<()> {
        let cancel = CancellationToken::new();
        let feed = LotFeed::spawn_with_token(self.gateway.clone(), self.poll_interval, &cancel);
        let animator =
            ProgressAnimator::spawn_with_token(self.gateway.config().display, &cancel);

        let mut lots = feed.lots();
        let mut status = feed.subscribe_status();
        let mut frames = animator.subscribe();

        let mut tui = Tui::new()?;
        tui.enter()?;
        let mut events = EventReader::new(RENDER_RATE, &cancel);

        info!("TUI event loop started");

        while self.running {
            tokio::select! {
                event = events.next() => match event {
                    Some(Event::Key(key)) => match map_key(key) {
                        Some(Action::Quit) => self.running = false,
                        Some(Action::Refresh) => {
                            debug!("manual refresh");
                            feed.refresh_now();
                        }
                        None => {}
                    },
                    Some(Event::Resize(..) | Event::Render) => {
                        tui.draw(|frame| self.dashboard.render(frame))?;
                    }
                    None => break,
                },

                Some(snapshot) = lots.changed() => {
                    let target = self.dashboard.set_lots(snapshot);
                    animator.set_target(target);
                }

                Ok(()) = status.changed() => {
                    self.dashboard.set_status(status.borrow_and_update().clone());
                }

                Ok(()) = frames.changed() => {
                    self.dashboard.set_progress(*frames.borrow_and_update());
                }
            }
        }

        cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use parkspot_core::Phase;

    use super::*;

    fn lots() -> Arc<Vec<LotOccupancy>> {
        Arc::new(vec![
            LotOccupancy::new("Parking Lot 1", 34, 70),
            LotOccupancy::new("Parking Lot 2", 32, 40).with_priority(true),
            LotOccupancy::new("Parking Lot 3", 3, 100),
        ])
    }

    fn screen(dashboard: &Dashboard) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|frame| dashboard.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn keys_map_to_actions() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Char('r'))), Some(Action::Refresh));
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn new_snapshot_yields_target() {
        let mut dashboard = Dashboard::default();
        assert_eq!(dashboard.set_lots(lots()), 67);
        assert_eq!(dashboard.set_lots(Arc::new(Vec::new())), 0);
    }

    #[test]
    fn renders_animated_value_and_lots() {
        let mut dashboard = Dashboard::default();
        dashboard.set_lots(lots());
        dashboard.set_progress(ProgressFrame {
            displayed: 30,
            target: 67,
            phase: Phase::Advancing,
        });

        let text = screen(&dashboard);
        assert!(text.contains("Parking occupancy"), "{text}");
        assert!(text.contains("30%  (141/210 occupied)"), "{text}");
        assert!(text.contains("Parking Lot 3"), "{text}");
        assert!(text.contains("♿"), "{text}");
        assert!(text.contains("waiting for first poll"), "{text}");
    }

    #[test]
    fn poll_error_shows_in_header() {
        let mut dashboard = Dashboard::default();
        dashboard.set_status(FeedStatus {
            last_refresh: None,
            last_error: Some("connection refused".into()),
        });
        assert!(screen(&dashboard).contains("refresh failed: connection refused"));
    }
}
