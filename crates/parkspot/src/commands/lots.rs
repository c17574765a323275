//! Lot command handlers.

use tabled::Tabled;

use parkspot_core::{Gateway, LotOccupancy};

use crate::cli::{GlobalOpts, LotsArgs, LotsCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct LotRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Free")]
    available: u32,
    #[tabled(rename = "Capacity")]
    capacity: u32,
    #[tabled(rename = "Occupied")]
    occupied: u32,
    #[tabled(rename = "Priority")]
    priority: &'static str,
}

impl From<&LotOccupancy> for LotRow {
    fn from(lot: &LotOccupancy) -> Self {
        Self {
            id: lot.id.map(|id| id.to_string()).unwrap_or_default(),
            name: lot.name.clone(),
            available: lot.available,
            capacity: lot.capacity,
            occupied: lot.occupied(),
            priority: if lot.priority { "♿" } else { "" },
        }
    }
}

/// Render a lot snapshot in the chosen format.
pub(crate) fn render(lots: &[LotOccupancy], global: &GlobalOpts) -> Result<String, CliError> {
    output::render_list(&global.output, lots, |l| LotRow::from(l), |l| {
        format!("{}\t{}/{}", l.name, l.available, l.capacity)
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    gateway: &Gateway,
    args: LotsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LotsCommand::List { priority } => {
            let mut lots = gateway.lots().await?;
            if priority {
                lots.retain(|l| l.priority);
            }
            let out = render(&lots, global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
