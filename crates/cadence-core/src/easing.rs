use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    #[default]
    Linear,
    Fast,
    Slow,
    Instant,
}

impl Easing {
    pub const ALL: [Self; 4] = [Self::Linear, Self::Fast, Self::Slow, Self::Instant];

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "fast" => Self::Fast,
            "slow" => Self::Slow,
            "instant" => Self::Instant,
            _ => Self::Linear,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Fast => "fast",
            Self::Slow => "slow",
            Self::Instant => "instant",
        }
    }

    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => linear(t),
            Self::Fast => fast(t),
            Self::Slow => slow(t),
            Self::Instant => instant(t),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

#[must_use]
pub fn fast(t: f64) -> f64 {
    t * t
}

#[must_use]
pub fn slow(t: f64) -> f64 {
    t * (2.0 - t)
}

#[must_use]
pub fn instant(t: f64) -> f64 {
    if t < 1.0 { 0.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_match_reference_points() {
        assert!((Easing::Linear.apply(0.3) - 0.3).abs() < 1e-12);
        assert!((Easing::Fast.apply(0.5) - 0.25).abs() < 1e-12);
        assert!((Easing::Slow.apply(0.5) - 0.75).abs() < 1e-12);
        assert!(Easing::Instant.apply(0.999).abs() < f64::EPSILON);
        assert!((Easing::Instant.apply(1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn every_curve_is_anchored_at_both_ends() {
        for easing in Easing::ALL {
            assert!(easing.apply(0.0).abs() < f64::EPSILON, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < f64::EPSILON, "{easing} at 1");
        }
    }

    #[test]
    fn unknown_names_fall_back_to_linear() {
        assert_eq!(Easing::from_name("bounce"), Easing::Linear);
        assert_eq!(Easing::from_name(""), Easing::Linear);
        assert_eq!(Easing::from_name("slow"), Easing::Slow);
    }
}
