//! Spot history handler.

use tabled::Tabled;

use parkspot_core::{Gateway, HistoryEntry};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
pub(crate) struct HistoryRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "User")]
    user_id: u64,
    #[tabled(rename = "License")]
    license: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(e: &HistoryEntry) -> Self {
        Self {
            kind: e.kind.clone(),
            user_id: e.user_id,
            license: e.license.clone(),
            start: util::fmt_time(e.start_time),
            end: util::fmt_time(e.end_time),
        }
    }
}

pub(crate) fn render(entries: &[HistoryEntry], global: &GlobalOpts) -> Result<String, CliError> {
    output::render_list(&global.output, entries, |e| HistoryRow::from(e), |e| {
        format!("{}\t{}\t{}", e.kind, e.license, util::fmt_time(e.start_time))
    })
}

pub async fn handle(gateway: &Gateway, spot: u64, global: &GlobalOpts) -> Result<(), CliError> {
    let entries = gateway.history(spot).await?;
    let out = render(&entries, global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
