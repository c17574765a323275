// ── View routing ──
//
// The client-side page table. Each view is one screen of the front ends;
// unknown paths resolve to `Main`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A client-side page, selected by path.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// `/`: occupancy summary and lot list.
    #[default]
    Main,
    /// `/guard/`: usage history of one spot.
    Guard,
    /// `/dashboard/`: the user's car, profile and status.
    Dashboard,
    /// `/reserved_expired/`: a reservation whose hold has lapsed.
    ReservedExpired,
    /// `/reserved_success/`: a confirmed reservation.
    ReservedSuccess,
}

impl View {
    /// Resolve a client-side path.
    ///
    /// The trailing slash is optional. Anything without a matching entry,
    /// including nested paths, falls back to [`View::Main`].
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim();
        let without_trailing = trimmed.strip_suffix('/').unwrap_or(trimmed);
        Self::iter()
            .find(|view| view.path().trim_end_matches('/') == without_trailing)
            .unwrap_or_default()
    }

    /// Canonical path of this view.
    pub fn path(self) -> &'static str {
        match self {
            Self::Main => "/",
            Self::Guard => "/guard/",
            Self::Dashboard => "/dashboard/",
            Self::ReservedExpired => "/reserved_expired/",
            Self::ReservedSuccess => "/reserved_success/",
        }
    }

    /// Human title for headers.
    pub fn title(self) -> &'static str {
        match self {
            Self::Main => "Parking occupancy",
            Self::Guard => "Spot history",
            Self::Dashboard => "Dashboard",
            Self::ReservedExpired => "Reservation expired",
            Self::ReservedSuccess => "Reservation confirmed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths_with_and_without_slash() {
        assert_eq!(View::resolve("/"), View::Main);
        assert_eq!(View::resolve(""), View::Main);
        assert_eq!(View::resolve("/guard/"), View::Guard);
        assert_eq!(View::resolve("/guard"), View::Guard);
        assert_eq!(View::resolve("/dashboard"), View::Dashboard);
        assert_eq!(View::resolve("/reserved_expired/"), View::ReservedExpired);
        assert_eq!(View::resolve("/reserved_success"), View::ReservedSuccess);
    }

    #[test]
    fn unknown_paths_fall_back_to_main() {
        assert_eq!(View::resolve("/nope"), View::Main);
        assert_eq!(View::resolve("/guard/extra"), View::Main);
        assert_eq!(View::resolve("guard"), View::Main);
    }

    #[test]
    fn every_path_round_trips() {
        for view in View::iter() {
            assert_eq!(View::resolve(view.path()), view);
        }
    }

    #[test]
    fn names_parse() {
        assert_eq!("reserved_success".parse::<View>().ok(), Some(View::ReservedSuccess));
        assert_eq!(View::ReservedExpired.to_string(), "reserved_expired");
    }
}
