use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    easing::Easing,
    event::EventError,
    interpolate::Animatable,
    model::{Color, ColorOrGradient, DynamicString, Gradient, Size},
    payload::Payload,
    property::{PROPERTIES, PropertyKind, default_payload, is_playback_state, property_spec},
    time::Position,
    value::AnimatedValue,
};

#[derive(Debug, Clone)]
pub enum AnyValue {
    Number(AnimatedValue<f64>),
    Size(AnimatedValue<Size>),
    Boolean(AnimatedValue<bool>),
    String(AnimatedValue<String>),
    DynamicString(AnimatedValue<DynamicString>),
    Color(AnimatedValue<Color>),
    Gradient(AnimatedValue<Gradient>),
    ColorOrGradient(AnimatedValue<ColorOrGradient>),
}

macro_rules! each_value {
    ($any:expr, $value:ident => $body:expr) => {
        match $any {
            AnyValue::Number($value) => $body,
            AnyValue::Size($value) => $body,
            AnyValue::Boolean($value) => $body,
            AnyValue::String($value) => $body,
            AnyValue::DynamicString($value) => $body,
            AnyValue::Color($value) => $body,
            AnyValue::Gradient($value) => $body,
            AnyValue::ColorOrGradient($value) => $body,
        }
    };
}

impl AnyValue {
    #[must_use]
    pub fn from_default(default: Payload) -> Self {
        match default {
            Payload::Number(value) => Self::Number(AnimatedValue::new(value)),
            Payload::Size(value) => Self::Size(AnimatedValue::new(value)),
            Payload::Boolean(value) => Self::Boolean(AnimatedValue::new(value)),
            Payload::String(value) => Self::String(AnimatedValue::new(value)),
            Payload::DynamicString(value) => Self::DynamicString(AnimatedValue::new(value)),
            Payload::Color(value) => Self::Color(AnimatedValue::new(value)),
            Payload::Gradient(value) => Self::Gradient(AnimatedValue::new(value)),
            Payload::ColorOrGradient(value) => Self::ColorOrGradient(AnimatedValue::new(value)),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Number(_) => PropertyKind::Number,
            Self::Size(_) => PropertyKind::Size,
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::String(_) => PropertyKind::String,
            Self::DynamicString(_) => PropertyKind::DynamicString,
            Self::Color(_) => PropertyKind::Color,
            Self::Gradient(_) => PropertyKind::Gradient,
            Self::ColorOrGradient(_) => PropertyKind::ColorOrGradient,
        }
    }

    #[must_use]
    pub fn payload(&self) -> Payload {
        each_value!(self, value => value.value().clone().into_payload())
    }

    #[must_use]
    pub fn default_payload(&self) -> Payload {
        each_value!(self, value => value.default_value().clone().into_payload())
    }

    #[must_use]
    pub fn css_value(&self) -> String {
        each_value!(self, value => value.css_value())
    }

    pub fn apply_event(&mut self, position: Position) -> bool {
        each_value!(self, value => value.apply_event(position))
    }

    pub fn apply_default_event(&mut self) -> bool {
        each_value!(self, value => value.apply_default_event())
    }

    pub fn add_payload_event(
        &mut self,
        payload: Payload,
        easing: Easing,
        position: Position,
    ) -> Result<Uuid, EventError> {
        each_value!(self, value => value.add_payload_event(payload, easing, position))
    }

    pub fn reset_events(&mut self, offset: f64) {
        each_value!(self, value => {
            let events = value.events_mut();
            events.clear();
            events.set_timeline_offset(offset);
        });
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        each_value!(self, value => value.events().len())
    }

    #[must_use]
    pub fn should_render(&self) -> bool {
        each_value!(self, value => value.should_render())
    }

    pub fn mark_as_rendered(&mut self) {
        each_value!(self, value => value.mark_as_rendered());
    }

    pub fn mark_as_dirty(&mut self) {
        each_value!(self, value => value.mark_as_dirty());
    }
}

#[derive(Debug, Clone, Default)]
pub struct ElementTimeline {
    values: BTreeMap<&'static str, AnyValue>,
    disabled_groups: BTreeSet<&'static str>,
}

impl ElementTimeline {
    #[must_use]
    pub fn with_properties<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut values = BTreeMap::new();
        for id in ids {
            let (Some(spec), Some(default)) = (property_spec(id), default_payload(id)) else {
                warn!(property = id, "unknown property id; no value created");
                continue;
            };
            values.insert(spec.id, AnyValue::from_default(default));
        }
        Self {
            values,
            disabled_groups: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn standard() -> Self {
        Self::with_properties(PROPERTIES.iter().map(|spec| spec.id))
    }

    #[must_use]
    pub fn value(&self, id: &str) -> Option<&AnyValue> {
        self.values.get(id)
    }

    pub fn value_mut(&mut self, id: &str) -> Option<&mut AnyValue> {
        self.values.get_mut(id)
    }

    pub fn property_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = (&'static str, &mut AnyValue)> {
        self.values.iter_mut().map(|(id, value)| (*id, value))
    }

    /// Resolves every value at `position` and returns how many changed.
    /// Play/pause state only animates while playback is active, and values of
    /// disabled groups hold their defaults.
    pub fn apply_events(&mut self, position: Position, playback_active: bool) -> usize {
        let mut changed = 0;
        for (id, value) in &mut self.values {
            let inactive = self
                .disabled_groups
                .contains(group_of(id))
                || (is_playback_state(id) && !playback_active);
            let updated = if inactive {
                value.apply_default_event()
            } else {
                value.apply_event(position)
            };
            changed += usize::from(updated);
        }
        changed
    }

    #[must_use]
    pub fn is_feature_enabled(&self, group: &str) -> bool {
        !self.disabled_groups.contains(group)
    }

    pub fn set_feature_enabled(&mut self, group: &str, enabled: bool) {
        let Some(group) = PROPERTIES
            .iter()
            .find(|spec| spec.group == group)
            .map(|spec| spec.group)
        else {
            warn!(group, "unknown property group");
            return;
        };

        if enabled {
            self.disabled_groups.remove(group);
        } else {
            self.disabled_groups.insert(group);
        }

        let members = self
            .values
            .iter_mut()
            .filter(|(id, _)| group_of(id) == group);
        let mut touched = 0_usize;
        for (_, value) in members {
            if enabled {
                value.mark_as_dirty();
            } else {
                value.apply_default_event();
            }
            touched += 1;
        }
        debug!(group, enabled, touched, "feature toggled");
    }

    #[must_use]
    pub fn dirty_ids(&self) -> Vec<&'static str> {
        self.values
            .iter()
            .filter(|(_, value)| value.should_render())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn mark_all_rendered(&mut self) {
        for value in self.values.values_mut() {
            value.mark_as_rendered();
        }
    }
}

fn group_of(id: &str) -> &'static str {
    property_spec(id).map_or("", |spec| spec.group)
}
