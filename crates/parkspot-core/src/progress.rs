// ── Progress state machine ──
//
// Stepwise transition of a displayed percentage toward a target.
// Time is not modelled here: each `tick()` is one interval, driven by
// `ProgressAnimator` or by a UI event loop.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle of one progression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No target, or the progression was cancelled. The displayed value is frozen.
    #[default]
    Idle,
    /// Moving toward the target, one step per tick.
    Advancing,
    /// Target reached. Ticks are ignored until the next retarget.
    Holding,
}

/// Where a fresh progression begins when a new target arrives.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum StartFrom {
    /// Restart at 0 on every new target.
    Zero,
    /// Continue from whatever is displayed now.
    #[default]
    Previous,
}

/// Displayed percentage moving toward a target in fixed steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    displayed: u8,
    origin: u8,
    target: u8,
    step: u8,
    index: u32,
    phase: Phase,
}

impl Progression {
    /// A new idle progression showing 0. `step` is clamped to at least 1.
    pub fn new(step: u8) -> Self {
        Self {
            displayed: 0,
            origin: 0,
            target: 0,
            step: step.max(1),
            index: 0,
            phase: Phase::Idle,
        }
    }

    pub fn displayed(&self) -> u8 {
        self.displayed
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    /// Value the current progression started from.
    pub fn origin(&self) -> u8 {
        self.origin
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks applied since the last retarget.
    pub fn step_index(&self) -> u32 {
        self.index
    }

    /// Ticks still needed to reach the target; zero unless advancing.
    pub fn remaining_steps(&self) -> u32 {
        if self.phase != Phase::Advancing {
            return 0;
        }
        let distance = u32::from(self.displayed.abs_diff(self.target));
        distance.div_ceil(u32::from(self.step))
    }

    /// Abandon the current progression and start a new one toward `target`.
    ///
    /// Targets above 100 are clamped. Returns the new phase: `Holding` when
    /// the start value already equals the target.
    pub fn retarget(&mut self, target: u8, start: StartFrom) -> Phase {
        let target = target.min(100);
        self.origin = match start {
            StartFrom::Zero => 0,
            StartFrom::Previous => self.displayed,
        };
        self.displayed = self.origin;
        self.target = target;
        self.index = 0;
        self.phase = if self.displayed == target {
            Phase::Holding
        } else {
            Phase::Advancing
        };
        self.phase
    }

    /// Advance one step. Returns the new displayed value, or `None` when
    /// not advancing.
    pub fn tick(&mut self) -> Option<u8> {
        if self.phase != Phase::Advancing {
            return None;
        }
        self.index += 1;
        self.displayed = if self.target > self.displayed {
            self.displayed.saturating_add(self.step).min(self.target)
        } else {
            self.displayed.saturating_sub(self.step).max(self.target)
        };
        if self.displayed == self.target {
            self.phase = Phase::Holding;
        }
        Some(self.displayed)
    }

    /// Stop the current progression, freezing the displayed value.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_at_zero() {
        let p = Progression::default();
        assert_eq!(p.phase(), Phase::Idle);
        assert_eq!(p.displayed(), 0);
        assert_eq!(p.remaining_steps(), 0);
    }

    #[test]
    fn idle_ticks_do_nothing() {
        let mut p = Progression::default();
        assert_eq!(p.tick(), None);
        assert_eq!(p.step_index(), 0);
    }

    #[test]
    fn after_k_ticks_displays_min_k_target() {
        let mut p = Progression::default();
        assert_eq!(p.retarget(67, StartFrom::Zero), Phase::Advancing);
        for k in 1..=80u32 {
            p.tick();
            let expected = u8::try_from(k.min(67)).unwrap_or(u8::MAX);
            assert_eq!(p.displayed(), expected, "after {k} ticks");
        }
        assert_eq!(p.phase(), Phase::Holding);
        assert_eq!(p.step_index(), 67);
    }

    #[test]
    fn holding_ignores_ticks() {
        let mut p = Progression::default();
        p.retarget(2, StartFrom::Zero);
        p.tick();
        p.tick();
        assert_eq!(p.phase(), Phase::Holding);
        assert_eq!(p.tick(), None);
        assert_eq!(p.displayed(), 2);
    }

    #[test]
    fn retarget_from_previous_continues() {
        let mut p = Progression::default();
        p.retarget(67, StartFrom::Zero);
        for _ in 0..10 {
            p.tick();
        }
        p.retarget(20, StartFrom::Previous);
        assert_eq!(p.origin(), 10);
        assert_eq!(p.step_index(), 0);
        assert_eq!(p.remaining_steps(), 10);
    }

    #[test]
    fn retarget_from_zero_restarts() {
        let mut p = Progression::default();
        p.retarget(67, StartFrom::Zero);
        for _ in 0..10 {
            p.tick();
        }
        p.retarget(20, StartFrom::Zero);
        assert_eq!(p.displayed(), 0);
        assert_eq!(p.tick(), Some(1));
    }

    #[test]
    fn moves_downward() {
        let mut p = Progression::default();
        p.retarget(5, StartFrom::Zero);
        while p.tick().is_some() {}
        p.retarget(2, StartFrom::Previous);
        assert_eq!(p.tick(), Some(4));
        assert_eq!(p.tick(), Some(3));
        assert_eq!(p.tick(), Some(2));
        assert_eq!(p.phase(), Phase::Holding);
    }

    #[test]
    fn same_target_holds_immediately() {
        let mut p = Progression::default();
        assert_eq!(p.retarget(0, StartFrom::Previous), Phase::Holding);
    }

    #[test]
    fn larger_steps_never_overshoot() {
        let mut p = Progression::new(10);
        p.retarget(67, StartFrom::Zero);
        assert_eq!(p.remaining_steps(), 7);
        let values: Vec<u8> = std::iter::from_fn(|| p.tick()).collect();
        assert_eq!(values, vec![10, 20, 30, 40, 50, 60, 67]);
    }

    #[test]
    fn zero_step_is_clamped() {
        let mut p = Progression::new(0);
        p.retarget(1, StartFrom::Zero);
        assert_eq!(p.tick(), Some(1));
    }

    #[test]
    fn target_is_clamped_to_one_hundred() {
        let mut p = Progression::new(50);
        p.retarget(250, StartFrom::Zero);
        assert_eq!(p.target(), 100);
    }

    #[test]
    fn cancel_freezes_value() {
        let mut p = Progression::default();
        p.retarget(30, StartFrom::Zero);
        p.tick();
        p.tick();
        p.cancel();
        assert_eq!(p.phase(), Phase::Idle);
        assert_eq!(p.tick(), None);
        assert_eq!(p.displayed(), 2);
    }

    #[test]
    fn start_from_parses() {
        assert_eq!("zero".parse::<StartFrom>().ok(), Some(StartFrom::Zero));
        assert_eq!("Previous".parse::<StartFrom>().ok(), Some(StartFrom::Previous));
        assert_eq!(StartFrom::Previous.to_string(), "previous");
    }
}
