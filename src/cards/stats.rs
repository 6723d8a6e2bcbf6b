//! Time-of-day statistics carried by every card.
//!
//! Each card contributes to four demand windows:
//!
//! - `Night`
//! - `Day`
//! - `Eve` (evening peak)
//! - `Flex` (spare capacity)
//!
//! Generators carry positive values, consumers negative ones. Incentives
//! replace a consumer's values, so they may be either.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Index, Neg, Sub};

use serde::{Deserialize, Serialize};

/// One of the four balanced windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Night,
    Day,
    Eve,
    Flex,
}

impl StatKind {
    /// All windows in display order.
    pub const ALL: [StatKind; 4] = [StatKind::Night, StatKind::Day, StatKind::Eve, StatKind::Flex];

    /// Lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            StatKind::Night => "night",
            StatKind::Day => "day",
            StatKind::Eve => "eve",
            StatKind::Flex => "flex",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A four-window stat vector.
///
/// Used both for a single card's contribution and for grid totals.
///
/// ## Example
///
/// ```
/// use grid_balance::cards::Stats;
///
/// let fossil = Stats::new(2, 2, 2, 1);
/// let lights = Stats::new(-1, -1, -2, 0);
///
/// let total = fossil + lights;
/// assert_eq!(total, Stats::new(1, 1, 0, 1));
/// assert!(total.is_balanced());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub night: i32,
    pub day: i32,
    pub eve: i32,
    pub flex: i32,
}

impl Stats {
    /// The zero vector (what a face-down card contributes).
    pub const ZERO: Stats = Stats::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(night: i32, day: i32, eve: i32, flex: i32) -> Self {
        Self { night, day, eve, flex }
    }

    /// True when every window is non-negative.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.night >= 0 && self.day >= 0 && self.eve >= 0 && self.flex >= 0
    }
}

impl Index<StatKind> for Stats {
    type Output = i32;

    fn index(&self, kind: StatKind) -> &i32 {
        match kind {
            StatKind::Night => &self.night,
            StatKind::Day => &self.day,
            StatKind::Eve => &self.eve,
            StatKind::Flex => &self.flex,
        }
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        Stats::new(
            self.night + rhs.night,
            self.day + rhs.day,
            self.eve + rhs.eve,
            self.flex + rhs.flex,
        )
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        *self = *self + rhs;
    }
}

impl Sub for Stats {
    type Output = Stats;

    fn sub(self, rhs: Stats) -> Stats {
        self + -rhs
    }
}

impl Neg for Stats {
    type Output = Stats;

    fn neg(self) -> Stats {
        Stats::new(-self.night, -self.day, -self.eve, -self.flex)
    }
}

impl Sum for Stats {
    fn sum<I: Iterator<Item = Stats>>(iter: I) -> Stats {
        iter.fold(Stats::ZERO, Add::add)
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, kind) in StatKind::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{kind} {:+}", self[kind])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Stats::new(1, 4, 1, -1);
        let b = Stats::new(2, 2, 2, 1);

        assert_eq!(a + b, Stats::new(3, 6, 3, 0));
        assert_eq!(b - a, Stats::new(1, -2, 1, 2));
        assert_eq!(-a, Stats::new(-1, -4, -1, 1));

        let mut c = Stats::ZERO;
        c += a;
        assert_eq!(c, a);
    }

    #[test]
    fn test_sum() {
        let total: Stats = vec![Stats::new(1, 1, 1, 1); 3].into_iter().sum();
        assert_eq!(total, Stats::new(3, 3, 3, 3));

        let empty: Stats = std::iter::empty().sum();
        assert_eq!(empty, Stats::ZERO);
    }

    #[test]
    fn test_balanced() {
        assert!(Stats::ZERO.is_balanced());
        assert!(Stats::new(0, 4, 3, 0).is_balanced());
        assert!(!Stats::new(0, -1, 3, -2).is_balanced());
    }

    #[test]
    fn test_index() {
        let s = Stats::new(1, 2, 3, 4);
        let values: Vec<_> = StatKind::ALL.into_iter().map(|kind| s[kind]).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_display() {
        let s = Stats::new(1, 4, 1, -1);
        assert_eq!(format!("{}", s), "night +1 / day +4 / eve +1 / flex -1");
        assert_eq!(StatKind::Flex.to_string(), "flex");
    }
}
