//! Difficulty tiers and their raw numeric ranges.
//!
//! A map's difficulty is stored twice: as a label (`core.maps.difficulty`)
//! and as a raw value on a 0.0-10.0 scale (`core.maps.raw_difficulty`).
//! Every tier except Hell covers a half-open range `[lo, hi)` and is split
//! into three equal sub-tiers ("Easy -", "Easy", "Easy +"); Hell sits at the
//! top of the scale, owns its upper bound, and has no sub-tier variants.

use serde::{Deserialize, Serialize};

/// Top-level difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[serde(rename = "Very Hard")]
    VeryHard,
    Extreme,
    Hell,
}

/// Position of a sub-tier within its tier ("X -", "X", "X +").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTier {
    Lower,
    Mid,
    Upper,
}

impl Difficulty {
    /// Tiers in ascending order of raw difficulty.
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
        Difficulty::Extreme,
        Difficulty::Hell,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
            Difficulty::Extreme => "Extreme",
            Difficulty::Hell => "Hell",
        }
    }

    /// Raw bounds for the whole tier: `[lo, hi)`, except Hell which owns the
    /// closed top of the scale.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Difficulty::Easy => (0.0, 2.35),
            Difficulty::Medium => (2.35, 4.12),
            Difficulty::Hard => (4.12, 5.88),
            Difficulty::VeryHard => (5.88, 7.65),
            Difficulty::Extreme => (7.65, 9.41),
            Difficulty::Hell => (9.41, 10.0),
        }
    }

    /// Whether this is the top tier. The top tier is matched by label
    /// equality rather than a numeric range and has no sub-tier variants.
    pub fn is_top(self) -> bool {
        matches!(self, Difficulty::Hell)
    }

    /// Bounds of one sub-tier third. `None` for Hell.
    pub fn sub_tier_bounds(self, sub: SubTier) -> Option<(f64, f64)> {
        if self.is_top() {
            return None;
        }
        let (lo, hi) = self.bounds();
        let width = hi - lo;
        Some(match sub {
            SubTier::Lower => (lo, lo + width / 3.0),
            SubTier::Mid => (lo + width / 3.0, lo + 2.0 * width / 3.0),
            SubTier::Upper => (lo + 2.0 * width / 3.0, hi),
        })
    }

    /// Display label for a sub-tier ("Hard -", "Hard", "Hard +"). `None` for
    /// Hell.
    pub fn sub_tier_label(self, sub: SubTier) -> Option<String> {
        if self.is_top() {
            return None;
        }
        Some(match sub {
            SubTier::Lower => format!("{} -", self.as_str()),
            SubTier::Mid => self.as_str().to_string(),
            SubTier::Upper => format!("{} +", self.as_str()),
        })
    }
}

/// Resolve a range filter to raw bounds. Missing ends widen to the full
/// scale.
pub fn range_bounds(min: Option<Difficulty>, max: Option<Difficulty>) -> (f64, f64) {
    let lo = min.unwrap_or(Difficulty::Easy).bounds().0;
    let hi = max.unwrap_or(Difficulty::Hell).bounds().1;
    (lo, hi)
}

/// Tier owning a raw value. Boundary values belong to the upper tier; Hell
/// includes its own upper bound.
pub fn tier_for_raw(value: f64) -> Option<Difficulty> {
    for tier in Difficulty::ALL {
        let (lo, hi) = tier.bounds();
        let owned = if tier.is_top() {
            value >= lo && value <= hi
        } else {
            value >= lo && value < hi
        };
        if owned {
            return Some(tier);
        }
    }
    None
}
