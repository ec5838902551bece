//! Editor-time preview of a property between explicitly authored overrides.
//!
//! Unlike playback resolution this walks the authored notes directly, never
//! touches an [`EventsArray`](crate::events_array::EventsArray), and is more
//! forgiving with color values: solid colors blend into gradients and
//! gradients with different stop counts are resampled before blending.

use thiserror::Error;
use tracing::{instrument, trace};

use crate::{
    authoring::{AuthoredContent, AuthoredNote},
    easing::Easing,
    event::EventError,
    interpolate::{Animatable, interpolate_payload},
    model::{ColorOrGradient, Gradient},
    payload::Payload,
    property::{PropertyKind, is_playback_state, property_kind},
    time::note_start_fractions,
};

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("unknown property id `{0}`")]
    UnknownProperty(String),
    #[error("note index {index} out of range for {len} notes")]
    NoteOutOfRange { index: usize, len: usize },
    #[error("note `{0}` not found")]
    UnknownNote(String),
    #[error("override of `{property}` on note `{note}` is malformed: {source}")]
    Override {
        property: String,
        note: String,
        #[source]
        source: EventError,
    },
}

#[derive(Debug, Clone)]
pub struct EffectiveValueResolver<'a> {
    notes: Vec<&'a AuthoredNote>,
    start_times: Vec<f64>,
}

struct Keyframe<'a> {
    note: Option<&'a AuthoredNote>,
    time: f64,
    value: Payload,
}

impl<'a> EffectiveValueResolver<'a> {
    #[must_use]
    pub fn new(content: &'a AuthoredContent) -> Self {
        let notes = content.flatten();
        let durations: Vec<_> = notes.iter().map(|note| note.note_value).collect();
        Self {
            start_times: note_start_fractions(&durations),
            notes,
        }
    }

    #[must_use]
    pub fn notes(&self) -> &[&'a AuthoredNote] {
        &self.notes
    }

    #[must_use]
    pub fn note_index(&self, note_id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == note_id)
    }

    /// Value of `property_id` as seen at note `index`, where `default` is the
    /// property's value before any override.
    #[instrument(skip(self, default), fields(notes = self.notes.len()))]
    pub fn effective_value(
        &self,
        index: usize,
        property_id: &str,
        default: &Payload,
    ) -> Result<Payload, ResolveError> {
        let kind = property_kind(property_id)
            .ok_or_else(|| ResolveError::UnknownProperty(property_id.to_string()))?;
        let len = self.notes.len();
        let target = *self
            .notes
            .get(index)
            .ok_or(ResolveError::NoteOutOfRange { index, len })?;

        if let Some(value) = decode_override(target, property_id, kind)? {
            return Ok(value);
        }

        let start = match self.find_override(property_id, kind, (0..index).rev())? {
            Some(keyframe) => keyframe,
            None => Keyframe {
                note: None,
                time: 0.0,
                value: default.clone(),
            },
        };
        let Some(end) = self.find_override(property_id, kind, index + 1..len)? else {
            return Ok(start.value);
        };

        let span = end.time - start.time;
        if span <= 0.0 {
            return Ok(start.value);
        }
        let t = ((self.start_times[index] - start.time) / span).clamp(0.0, 1.0);

        let instant = is_instant_transition(property_id, kind, &start.value, &end.value);
        let easing = if instant {
            Easing::Instant
        } else {
            end.note
                .and_then(|note| note.events.easing_for(property_id).ok())
                .unwrap_or_default()
        };
        let eased = easing.apply(t);
        trace!(t, eased, %easing, instant, "blending overrides");

        if instant {
            return Ok(if eased >= 1.0 { end.value } else { start.value });
        }
        Ok(blend(&start.value, &end.value, eased))
    }

    pub fn effective_value_by_id(
        &self,
        note_id: &str,
        property_id: &str,
        default: &Payload,
    ) -> Result<Payload, ResolveError> {
        let index = self
            .note_index(note_id)
            .ok_or_else(|| ResolveError::UnknownNote(note_id.to_string()))?;
        self.effective_value(index, property_id, default)
    }

    fn find_override(
        &self,
        property_id: &str,
        kind: PropertyKind,
        indices: impl Iterator<Item = usize>,
    ) -> Result<Option<Keyframe<'a>>, ResolveError> {
        for index in indices {
            let note = self.notes[index];
            if let Some(value) = decode_override(note, property_id, kind)? {
                return Ok(Some(Keyframe {
                    note: Some(note),
                    time: self.start_times[index],
                    value,
                }));
            }
        }
        Ok(None)
    }
}

fn decode_override(
    note: &AuthoredNote,
    property_id: &str,
    kind: PropertyKind,
) -> Result<Option<Payload>, ResolveError> {
    let Some(raw) = note.events.override_for(property_id) else {
        return Ok(None);
    };
    Payload::decode(kind, raw)
        .map(Some)
        .map_err(|source| ResolveError::Override {
            property: property_id.to_string(),
            note: note.id.clone(),
            source,
        })
}

pub fn effective_value(
    content: &AuthoredContent,
    index: usize,
    property_id: &str,
    default: &Payload,
) -> Result<Payload, ResolveError> {
    EffectiveValueResolver::new(content).effective_value(index, property_id, default)
}

/// Transitions that step instead of blending. A solid color next to a
/// gradient always blends.
#[must_use]
pub fn is_instant_transition(
    property_id: &str,
    kind: PropertyKind,
    start: &Payload,
    end: &Payload,
) -> bool {
    if kind == PropertyKind::Boolean || is_playback_state(property_id) {
        return true;
    }
    match (start, end) {
        (Payload::Size(a), Payload::Size(b)) => a.unit != b.unit,
        _ => match (as_gradient(start), as_gradient(end)) {
            (Some(a), Some(b)) => a.kind != b.kind,
            _ => false,
        },
    }
}

fn as_gradient(payload: &Payload) -> Option<&Gradient> {
    match payload {
        Payload::Gradient(gradient)
        | Payload::ColorOrGradient(ColorOrGradient::Gradient(gradient)) => Some(gradient),
        _ => None,
    }
}

fn blend(start: &Payload, end: &Payload, t: f64) -> Payload {
    match (start, end) {
        (Payload::ColorOrGradient(a), Payload::ColorOrGradient(b)) => {
            Payload::ColorOrGradient(blend_color_or_gradient(a, b, t))
        }
        (Payload::Gradient(a), Payload::Gradient(b)) => match match_stop_counts(a, b) {
            Some((a, b)) => Payload::Gradient(Gradient::interpolate(&a, &b, t)),
            None => start.clone(),
        },
        _ => interpolate_payload(start, end, t),
    }
}

/// Blends color-or-gradient payloads with the editor relaxations: a solid
/// color facing a gradient takes the gradient's shape, stop counts are
/// matched by resampling, and a two-stop single-color result collapses back
/// to a plain color.
#[must_use]
pub fn blend_color_or_gradient(
    start: &ColorOrGradient,
    end: &ColorOrGradient,
    t: f64,
) -> ColorOrGradient {
    let (from, to) = match (start, end) {
        (ColorOrGradient::Color(a), ColorOrGradient::Color(b)) => {
            return ColorOrGradient::Color(a.lerp(*b, t));
        }
        (ColorOrGradient::Color(color), ColorOrGradient::Gradient(gradient)) => {
            (Gradient::filled_like(gradient, *color), gradient.clone())
        }
        (ColorOrGradient::Gradient(gradient), ColorOrGradient::Color(color)) => {
            (gradient.clone(), Gradient::filled_like(gradient, *color))
        }
        (ColorOrGradient::Gradient(a), ColorOrGradient::Gradient(b)) => (a.clone(), b.clone()),
    };

    let Some((from, to)) = match_stop_counts(&from, &to) else {
        return start.clone();
    };
    let blended = Gradient::interpolate(&from, &to, t);
    match blended.color_stops.as_slice() {
        [first, second] if first.color == second.color => ColorOrGradient::Color(first.color),
        _ => ColorOrGradient::Gradient(blended),
    }
}

/// Resamples the gradient with fewer stops at the richer one's stop
/// positions. `None` when the pair cannot be blended at all.
#[must_use]
pub fn match_stop_counts(a: &Gradient, b: &Gradient) -> Option<(Gradient, Gradient)> {
    if a.kind != b.kind || a.color_stops.is_empty() || b.color_stops.is_empty() {
        return None;
    }
    let positions = |gradient: &Gradient| {
        gradient
            .color_stops
            .iter()
            .map(|stop| stop.position)
            .collect::<Vec<_>>()
    };
    let pair = match a.color_stops.len().cmp(&b.color_stops.len()) {
        std::cmp::Ordering::Equal => (a.clone(), b.clone()),
        std::cmp::Ordering::Less => (a.resampled_at(positions(b)), b.clone()),
        std::cmp::Ordering::Greater => (a.clone(), b.resampled_at(positions(a))),
    };
    Some(pair)
}
