use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    easing::Easing,
    interpolate::Animatable,
    model::{Color, ColorOrGradient, DynamicString, Gradient, Size},
    property::PropertyKind,
    time::Position,
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EventError {
    #[error("measure progress {0} outside [0, 1)")]
    InvalidProgress(f64),
    #[error("measure index {0} is not a non-negative integer")]
    InvalidMeasureIndex(f64),
    #[error("unrecognised unit `{0}`")]
    InvalidUnit(String),
    #[error("easing must be a string, got {0}")]
    InvalidEasing(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("{kind} property expects {expected}, got {found}")]
    PayloadType {
        kind: PropertyKind,
        expected: &'static str,
        found: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event<T> {
    id: Uuid,
    payload: T,
    easing: Easing,
    position: Position,
    #[serde(default)]
    transition: bool,
}

pub type NumberEvent = Event<f64>;
pub type SizeEvent = Event<Size>;
pub type BooleanEvent = Event<bool>;
pub type StringEvent = Event<String>;
pub type DynamicStringEvent = Event<DynamicString>;
pub type ColorEvent = Event<Color>;
pub type GradientEvent = Event<Gradient>;
pub type ColorOrGradientEvent = Event<ColorOrGradient>;

impl<T: Animatable> Event<T> {
    pub fn new(payload: T, easing: Easing, position: Position) -> Result<Self, EventError> {
        payload.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            payload,
            easing,
            position,
            transition: false,
        })
    }

    pub fn at(
        payload: T,
        easing: Easing,
        measure_index: u32,
        measure_progress: f64,
    ) -> Result<Self, EventError> {
        Self::new(payload, easing, Position::new(measure_index, measure_progress)?)
    }

    #[must_use]
    pub fn into_transition(mut self) -> Self {
        self.transition = true;
        self
    }
}

impl<T> Event<T> {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn is_transition(&self) -> bool {
        self.transition
    }
}

impl From<ColorEvent> for ColorOrGradientEvent {
    fn from(event: ColorEvent) -> Self {
        Self {
            id: event.id,
            payload: ColorOrGradient::Color(event.payload),
            easing: event.easing,
            position: event.position,
            transition: event.transition,
        }
    }
}

impl From<GradientEvent> for ColorOrGradientEvent {
    fn from(event: GradientEvent) -> Self {
        Self {
            id: event.id,
            payload: ColorOrGradient::Gradient(event.payload),
            easing: event.easing,
            position: event.position,
            transition: event.transition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorStop, SizeUnit};

    #[test]
    fn malformed_payloads_reject_construction() {
        assert!(NumberEvent::at(f64::NAN, Easing::Linear, 0, 0.0).is_err());
        assert!(
            SizeEvent::at(Size::new(f64::INFINITY, SizeUnit::Px), Easing::Linear, 0, 0.0).is_err()
        );
        assert!(ColorEvent::at(Color::rgba(0, 0, 0, 1.5), Easing::Linear, 0, 0.0).is_err());
        assert!(
            GradientEvent::at(Gradient::linear(90.0, Vec::new()), Easing::Linear, 0, 0.0).is_err()
        );
    }

    #[test]
    fn progress_must_stay_inside_the_measure() {
        let err =
            NumberEvent::at(1.0, Easing::Fast, 3, 1.0).expect_err("progress 1 is next measure");
        assert_eq!(err, EventError::InvalidProgress(1.0));
    }

    #[test]
    fn color_events_widen_into_color_or_gradient_events() {
        let color = ColorEvent::at(Color::WHITE, Easing::Slow, 1, 0.5).expect("valid color event");
        let id = color.id();
        let widened: ColorOrGradientEvent = color.into();
        assert_eq!(widened.id(), id);
        assert_eq!(widened.payload(), &ColorOrGradient::Color(Color::WHITE));
        assert_eq!(widened.easing(), Easing::Slow);

        let gradient = Gradient::radial(
            80.0,
            vec![ColorStop::new(0.0, Color::WHITE), ColorStop::new(100.0, Color::BLACK)],
        );
        let widened: ColorOrGradientEvent = GradientEvent::at(gradient, Easing::Linear, 0, 0.0)
            .expect("valid gradient event")
            .into();
        assert_eq!(widened.payload().mode(), "gradient");
    }
}
