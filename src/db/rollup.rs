//! Pure arithmetic for the incremental player statistics rollup.
//!
//! The milestone bands are half-open and mutually exclusive: an innings of
//! exactly 100 counts one hundred and zero fifties.

/// Milestone band for a single innings, classified on runs scored.
///
/// Bands are `[50, 100)` for a fifty and `[100, ∞)` for a hundred; anything
/// below 50 is unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MilestoneBand {
    /// Below 50 runs; no milestone.
    None,
    /// At least 50 and strictly below 100 runs.
    Fifty,
    /// 100 runs or more.
    Hundred,
}

impl MilestoneBand {
    /// Classifies an innings by runs scored.
    pub fn classify(runs_scored: i32) -> Self {
        if runs_scored >= 100 {
            Self::Hundred
        } else if runs_scored >= 50 {
            Self::Fifty
        } else {
            Self::None
        }
    }

    /// Increment applied to the fifty counter for this band.
    pub(crate) fn fifty_increment(self) -> i32 {
        match self {
            Self::Fifty => 1,
            Self::None | Self::Hundred => 0,
        }
    }

    /// Increment applied to the hundred counter for this band.
    pub(crate) fn hundred_increment(self) -> i32 {
        match self {
            Self::Hundred => 1,
            Self::None | Self::Fifty => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MilestoneBand;

    #[test]
    fn band_boundaries_are_half_open() {
        assert_eq!(MilestoneBand::classify(0), MilestoneBand::None);
        assert_eq!(MilestoneBand::classify(49), MilestoneBand::None);
        assert_eq!(MilestoneBand::classify(50), MilestoneBand::Fifty);
        assert_eq!(MilestoneBand::classify(99), MilestoneBand::Fifty);
        assert_eq!(MilestoneBand::classify(100), MilestoneBand::Hundred);
        assert_eq!(MilestoneBand::classify(264), MilestoneBand::Hundred);
    }

    #[test]
    fn exactly_one_hundred_does_not_count_a_fifty() {
        let band = MilestoneBand::classify(100);
        assert_eq!(band.fifty_increment(), 0);
        assert_eq!(band.hundred_increment(), 1);
    }

    #[test]
    fn increments_are_mutually_exclusive() {
        for runs in [0, 1, 49, 50, 51, 99, 100, 101, 400] {
            let band = MilestoneBand::classify(runs);
            assert!(band.fifty_increment() + band.hundred_increment() <= 1);
        }
    }
}
