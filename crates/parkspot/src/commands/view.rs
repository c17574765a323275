//! Client-side views: one command per page of the front end, resolved by path.

use serde::Serialize;

use parkspot_core::{
    Car, CoreError, Gateway, HistoryEntry, LotOccupancy, Profile, Reservation, UserStatus, View,
};

use crate::cli::{GlobalOpts, ViewArgs};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::history::HistoryRow;
use super::lots::LotRow;
use super::occupancy::{self, OccupancyReport};
use super::{car, profile, reservation, util};

/// Serialized page: which view rendered plus its content.
#[derive(Serialize)]
struct Page<T: Serialize> {
    view: View,
    path: &'static str,
    title: &'static str,
    #[serde(flatten)]
    content: T,
}

#[derive(Serialize)]
struct MainContent {
    summary: OccupancyReport,
    lots: Vec<LotOccupancy>,
}

#[derive(Serialize)]
struct GuardContent {
    spot: u64,
    history: Vec<HistoryEntry>,
}

#[derive(Serialize)]
struct DashboardContent {
    car: Option<Car>,
    profile: Profile,
    status: UserStatus,
}

#[derive(Serialize)]
struct ReservationContent {
    reservation: Reservation,
    expired: bool,
}

fn print_page<T: Serialize>(
    view: View,
    content: T,
    body: impl Fn(&T) -> String,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = Page {
        view,
        path: view.path(),
        title: view.title(),
        content,
    };
    let out = output::render_single(
        &global.output,
        &page,
        |p| format!("{}\n\n{}", p.title, body(&p.content)),
        |p| p.view.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    gateway: &Gateway,
    session: &Session,
    args: ViewArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let view = View::resolve(&args.path);
    tracing::debug!(path = %args.path, %view, "resolved view");

    match view {
        View::Main => {
            let (lots, summary) = gateway.occupancy().await?;
            let color = output::should_color(&global.color);
            let content = MainContent {
                summary: summary.into(),
                lots,
            };
            print_page(
                view,
                content,
                |c| {
                    let rows: Vec<LotRow> = c.lots.iter().map(LotRow::from).collect();
                    format!(
                        "{}\n\n{}",
                        occupancy::detail(&c.summary, color),
                        output::render_table(&rows)
                    )
                },
                global,
            )
        }

        View::Guard => {
            let spot = args.spot.ok_or_else(|| CliError::Validation {
                field: "--spot".into(),
                reason: "the guard view needs a parking spot ID".into(),
            })?;
            let history = gateway.history(spot).await?;
            print_page(
                view,
                GuardContent { spot, history },
                |c| {
                    let rows: Vec<HistoryRow> = c.history.iter().map(HistoryRow::from).collect();
                    format!("Spot {}\n{}", c.spot, output::render_table(&rows))
                },
                global,
            )
        }

        View::Dashboard => {
            let user_id = session.require_user()?;
            let (car, profile, status) = tokio::join!(
                gateway.car(user_id),
                gateway.profile(user_id),
                gateway.user_status(user_id),
            );
            // A user without a parked car still has a dashboard.
            let car = match car {
                Ok(car) => Some(car),
                Err(CoreError::NotFound { .. }) => None,
                Err(e) => return Err(e.into()),
            };
            let content = DashboardContent {
                car,
                profile: profile?,
                status: status?,
            };
            print_page(
                view,
                content,
                |c| {
                    let car = c
                        .car
                        .as_ref()
                        .map_or_else(|| "No car parked".into(), car::detail);
                    format!(
                        "{}\n\n{}\n\n{}",
                        output::detail_lines(&[("Status", c.status.status.clone())]),
                        car,
                        profile::detail(&c.profile)
                    )
                },
                global,
            )
        }

        View::ReservedSuccess | View::ReservedExpired => {
            let car_id = session.require_car()?;
            let (reservation, expired) = gateway.reservation_state(car_id, util::now()).await?;
            print_page(
                view,
                ReservationContent {
                    reservation,
                    expired,
                },
                |c| {
                    let detail = reservation::detail(&c.reservation, c.expired);
                    if c.expired {
                        format!(
                            "The hold on this spot lapsed at {}.\n\n{detail}",
                            util::fmt_time(c.reservation.expired_time)
                        )
                    } else {
                        detail
                    }
                },
                global,
            )
        }
    }
}
