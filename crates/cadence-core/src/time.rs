use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::event::EventError;

/// Musical-time coordinate: a measure index plus the fraction of that measure
/// already elapsed. One measure is one unit of ordinal distance regardless of
/// its time signature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    measure_index: u32,
    measure_progress: f64,
}

#[derive(Deserialize)]
struct RawPosition {
    measure_index: u32,
    measure_progress: f64,
}

impl TryFrom<RawPosition> for Position {
    type Error = EventError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Self::new(raw.measure_index, raw.measure_progress)
    }
}

impl Position {
    pub fn new(measure_index: u32, measure_progress: f64) -> Result<Self, EventError> {
        if !measure_progress.is_finite() || !(0.0..1.0).contains(&measure_progress) {
            return Err(EventError::InvalidProgress(measure_progress));
        }
        Ok(Self {
            measure_index,
            // normalises -0.0
            measure_progress: measure_progress + 0.0,
        })
    }

    #[must_use]
    pub const fn at_measure(measure_index: u32) -> Self {
        Self {
            measure_index,
            measure_progress: 0.0,
        }
    }

    pub fn from_raw_index(measure_index: f64, measure_progress: f64) -> Result<Self, EventError> {
        if !measure_index.is_finite()
            || measure_index < 0.0
            || measure_index.fract() != 0.0
            || measure_index > f64::from(u32::MAX)
        {
            return Err(EventError::InvalidMeasureIndex(measure_index));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let measure_index = measure_index as u32;
        Self::new(measure_index, measure_progress)
    }

    #[must_use]
    pub const fn measure_index(self) -> u32 {
        self.measure_index
    }

    #[must_use]
    pub const fn measure_progress(self) -> f64 {
        self.measure_progress
    }

    #[must_use]
    pub fn ordinal(self) -> f64 {
        f64::from(self.measure_index) + self.measure_progress
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.measure_index
            .cmp(&other.measure_index)
            .then_with(|| self.measure_progress.total_cmp(&other.measure_progress))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{:.4}", self.measure_index, self.measure_progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteValue {
    #[serde(rename = "w_note")]
    Whole,
    #[serde(rename = "h_note")]
    Half,
    #[serde(rename = "q_note")]
    Quarter,
    #[serde(rename = "e_note")]
    Eighth,
    #[serde(rename = "s_note")]
    Sixteenth,
    #[serde(rename = "w_note_dotted")]
    DottedWhole,
    #[serde(rename = "h_note_dotted")]
    DottedHalf,
    #[serde(rename = "q_note_dotted")]
    DottedQuarter,
    #[serde(rename = "e_note_dotted")]
    DottedEighth,
    /// Any symbol without a duration entry; occupies no time.
    #[serde(other)]
    Unknown,
}

impl NoteValue {
    #[must_use]
    pub const fn beats(self) -> f64 {
        match self {
            Self::Whole => 4.0,
            Self::Half => 2.0,
            Self::Quarter => 1.0,
            Self::Eighth => 0.5,
            Self::Sixteenth => 0.25,
            Self::DottedWhole => 6.0,
            Self::DottedHalf => 3.0,
            Self::DottedQuarter => 1.5,
            Self::DottedEighth => 0.75,
            Self::Unknown => 0.0,
        }
    }

    #[must_use]
    pub const fn measure_fraction(self) -> f64 {
        self.beats() / 4.0
    }
}

#[must_use]
pub fn beats_to_progress(offset_beats: f64, measure_duration_beats: f64) -> f64 {
    if measure_duration_beats <= 0.0 {
        return 0.0;
    }

    offset_beats / measure_duration_beats
}

#[must_use]
pub fn note_start_fractions(notes: &[NoteValue]) -> Vec<f64> {
    let mut time = 0.0;
    notes
        .iter()
        .map(|note| {
            let start = time;
            time += note.measure_fraction();
            start
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_order_by_measure_then_progress() {
        let a = Position::new(1, 0.75).expect("valid position");
        let b = Position::new(2, 0.0).expect("valid position");
        let c = Position::new(2, 0.5).expect("valid position");
        assert!(a < b);
        assert!(b < c);
        assert_eq!(b, Position::at_measure(2));
    }

    #[test]
    fn progress_outside_unit_interval_is_rejected() {
        assert!(Position::new(0, 1.0).is_err());
        assert!(Position::new(0, -0.1).is_err());
        assert!(Position::new(0, f64::NAN).is_err());
        assert!(Position::new(0, -0.0).is_ok());
    }

    #[test]
    fn raw_index_must_be_a_non_negative_integer() {
        assert!(Position::from_raw_index(1.5, 0.0).is_err());
        assert!(Position::from_raw_index(-1.0, 0.0).is_err());
        let position = Position::from_raw_index(3.0, 0.25).expect("valid raw index");
        assert!((position.ordinal() - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn dotted_notes_last_one_and_a_half_times_longer() {
        let dotted = NoteValue::DottedQuarter.beats();
        assert!((dotted - 1.5 * NoteValue::Quarter.beats()).abs() < 1e-12);
        assert!((NoteValue::Half.measure_fraction() - 0.5).abs() < 1e-12);
        assert!(NoteValue::Unknown.beats().abs() < f64::EPSILON);
    }

    #[test]
    fn beat_offsets_convert_to_progress() {
        assert!((beats_to_progress(1.0, 4.0) - 0.25).abs() < 1e-12);
        assert!(beats_to_progress(1.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn start_fractions_accumulate() {
        let starts =
            note_start_fractions(&[NoteValue::Half, NoteValue::Quarter, NoteValue::Quarter]);
        assert_eq!(starts, vec![0.0, 0.5, 0.75]);
    }
}
