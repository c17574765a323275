//! Reservation command handlers.

use parkspot_core::{Gateway, Reservation, ReservationCreated};

use crate::cli::{GlobalOpts, ReservationArgs, ReservationCommand};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

pub(crate) fn detail(r: &Reservation, expired: bool) -> String {
    let mut lines = vec![
        ("Car", r.car_id.to_string()),
        ("License", r.car_license.clone().unwrap_or_default()),
        ("Lot", r.parking_lot_name.clone()),
        ("Area", r.area_name.clone()),
        ("Floor", r.area_floor.to_string()),
        ("Spot", r.parking_spot_number.to_string()),
        ("Reserved", util::fmt_time(r.reservation_time)),
        ("Expires", util::fmt_time(r.expired_time)),
    ];
    if expired {
        lines.push(("Status", "expired".into()));
    }
    output::detail_lines(&lines)
}

fn created_detail(c: &ReservationCreated) -> String {
    let mut lines = Vec::new();
    if let Some(id) = c.reservation_id {
        lines.push(("Reservation", id.to_string()));
    }
    if let Some(ref lot) = c.parking_lot_name {
        lines.push(("Lot", lot.clone()));
    }
    if let Some(ref area) = c.area_name {
        lines.push(("Area", area.clone()));
    }
    if let Some(spot) = c.parking_spot_number {
        lines.push(("Spot", spot.to_string()));
    }
    if c.expired_time.is_some() {
        lines.push(("Expires", util::fmt_time(c.expired_time)));
    }
    if lines.is_empty() {
        return "Reserved.".into();
    }
    output::detail_lines(&lines)
}

pub async fn handle(
    gateway: &Gateway,
    session: &Session,
    args: ReservationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let car_id = session.require_car()?;

    match args.command {
        ReservationCommand::Show => {
            let (reservation, expired) = gateway.reservation_state(car_id, util::now()).await?;
            let out = output::render_single(
                &global.output,
                &reservation,
                |r| detail(r, expired),
                |r| r.parking_spot_number.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReservationCommand::Create { spot } => {
            let created = gateway.reserve(car_id, spot).await?;
            let out = output::render_single(&global.output, &created, created_detail, |c| {
                util::fmt_opt(c.reservation_id)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReservationCommand::Cancel => {
            if !util::confirm(
                &format!("Cancel the reservation of car {car_id}?"),
                "reservation cancel",
                global.yes,
            )? {
                return Ok(());
            }
            let message = gateway.cancel_reservation(car_id).await?;
            if !global.quiet {
                if message.is_empty() {
                    eprintln!("Reservation cancelled.");
                } else {
                    eprintln!("{message}");
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_only_creation_still_renders() {
        let created = ReservationCreated {
            reservation_id: Some(42),
            ..ReservationCreated::default()
        };
        assert_eq!(created_detail(&created), "Reservation  42");
        assert_eq!(created_detail(&ReservationCreated::default()), "Reserved.");
    }
}
