use uuid::Uuid;

use crate::{
    easing::Easing,
    event::{Event, EventError},
    events_array::EventsArray,
    interpolate::Animatable,
    model::{Color, ColorOrGradient, DynamicString, Gradient, Size, Viewport},
    payload::Payload,
    time::Position,
};

#[derive(Debug, Clone)]
pub struct AnimatedValue<T> {
    events: EventsArray<T>,
    value: T,
    should_render: bool,
}

pub type NumberValue = AnimatedValue<f64>;
pub type SizeValue = AnimatedValue<Size>;
pub type BooleanValue = AnimatedValue<bool>;
pub type StringValue = AnimatedValue<String>;
pub type DynamicStringValue = AnimatedValue<DynamicString>;
pub type ColorValue = AnimatedValue<Color>;
pub type GradientValue = AnimatedValue<Gradient>;
pub type ColorOrGradientValue = AnimatedValue<ColorOrGradient>;

impl<T: Animatable> AnimatedValue<T> {
    #[must_use]
    pub fn new(default_value: T) -> Self {
        Self {
            events: EventsArray::new(default_value.clone()),
            value: default_value,
            should_render: true,
        }
    }

    #[must_use]
    pub fn default_value(&self) -> &T {
        self.events.default_value()
    }

    pub fn set_default_value(&mut self, value: T) -> bool {
        if value.same_as(self.events.default_value()) {
            return false;
        }
        self.events.set_default_value(value.clone());
        self.set_value(value);
        true
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn set_value(&mut self, value: T) -> bool {
        if value.same_as(&self.value) {
            return false;
        }
        self.value = value;
        self.should_render = true;
        true
    }

    pub fn add_event(&mut self, event: Event<T>) {
        self.events.insert(event);
    }

    pub fn add_payload_event(
        &mut self,
        payload: Payload,
        easing: Easing,
        position: Position,
    ) -> Result<Uuid, EventError> {
        let found = payload.kind();
        let typed = T::from_payload(payload).ok_or_else(|| EventError::PayloadType {
            kind: T::KIND,
            expected: T::KIND.name(),
            found: found.name().to_string(),
        })?;
        let event = Event::new(typed, easing, position)?;
        let id = event.id();
        self.events.insert(event);
        Ok(id)
    }

    pub fn remove_event(&mut self, id: Uuid) -> bool {
        self.events.remove(id)
    }

    #[must_use]
    pub fn events(&self) -> &EventsArray<T> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventsArray<T> {
        &mut self.events
    }

    pub fn apply_event(&mut self, position: Position) -> bool {
        let resolved = self.events.resolve(position);
        self.set_value(resolved)
    }

    pub fn apply_default_event(&mut self) -> bool {
        let baseline = self.events.default_value().clone();
        self.set_value(baseline)
    }

    #[must_use]
    pub fn should_render(&self) -> bool {
        self.should_render
    }

    pub fn mark_as_rendered(&mut self) {
        self.should_render = false;
    }

    pub fn mark_as_dirty(&mut self) {
        self.should_render = true;
    }

    #[must_use]
    pub fn css_value(&self) -> String {
        self.value.css_value()
    }
}

impl DynamicStringValue {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.value.value
    }

    #[must_use]
    pub fn trigger_id(&self) -> Uuid {
        self.value.id
    }

    /// Sets `text` under a fresh correlation id, so repeating the current text
    /// still counts as a change.
    pub fn trigger(&mut self, text: impl Into<String>) -> bool {
        self.set_value(DynamicString::new(text))
    }
}

impl SizeValue {
    #[must_use]
    pub fn pixel_value(&self, viewport: &Viewport) -> Option<f64> {
        self.value.to_pixels(viewport)
    }

    #[must_use]
    pub fn font_pixel_value(&self, viewport: &Viewport) -> Option<f64> {
        self.value.to_font_pixels(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorStop, SizeUnit};

    fn at(measure_index: u32, progress: f64) -> Position {
        Position::new(measure_index, progress).expect("valid position")
    }

    #[test]
    fn fresh_values_render_once() {
        let mut value = NumberValue::new(1.0);
        assert!(value.should_render());
        value.mark_as_rendered();
        assert!(!value.should_render());
    }

    #[test]
    fn equal_payloads_leave_the_flag_alone() {
        let stops = vec![ColorStop::new(0.0, Color::WHITE), ColorStop::new(100.0, Color::BLACK)];
        let mut reversed = stops.clone();
        reversed.reverse();
        let mut value = GradientValue::new(Gradient::linear(90.0, stops));
        value.mark_as_rendered();

        assert!(!value.set_value(Gradient::linear(90.0, reversed.clone())));
        assert!(!value.set_default_value(Gradient::linear(90.0, reversed)));
        assert!(!value.should_render());
    }

    #[test]
    fn default_value_updates_the_current_value() {
        let mut value = ColorValue::new(Color::BLACK);
        value.mark_as_rendered();
        assert!(value.set_default_value(Color::WHITE));
        assert_eq!(value.value(), &Color::WHITE);
        assert!(value.should_render());
    }

    #[test]
    fn applying_events_commits_only_changes() {
        let mut value = NumberValue::new(0.0);
        value.add_event(Event::at(10.0, Easing::Linear, 1, 0.0).expect("event"));
        value.mark_as_rendered();

        assert!(value.apply_event(at(0, 0.5)));
        assert_eq!(value.css_value(), "5");
        value.mark_as_rendered();
        assert!(!value.apply_event(at(0, 0.5)));
        assert!(!value.should_render());

        assert!(value.apply_default_event());
        assert!((value.value() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_triggers_are_distinguishable() {
        let mut state = DynamicStringValue::new(DynamicString::new("paused"));
        assert!(state.trigger("playing"));
        let first = state.trigger_id();
        state.mark_as_rendered();

        assert!(state.trigger("playing"));
        assert_eq!(state.text(), "playing");
        assert_ne!(state.trigger_id(), first);
        assert!(state.should_render());
    }

    #[test]
    fn payload_events_must_match_the_value_kind() {
        let mut value = SizeValue::new(Size::px(0.0));
        let err = value
            .add_payload_event(Payload::Number(3.0), Easing::Linear, at(0, 0.0))
            .expect_err("number into a size value");
        assert!(matches!(err, EventError::PayloadType { .. }));

        let id = value
            .add_payload_event(
                Payload::Size(Size::new(50.0, SizeUnit::Pw)),
                Easing::Linear,
                at(0, 0.0),
            )
            .expect("size payload");
        assert_eq!(value.events().get(0).map(Event::id), Some(id));
    }

    #[test]
    fn sizes_resolve_to_pixels_against_the_viewport() {
        let mut value = SizeValue::new(Size::new(25.0, SizeUnit::Ph));
        let viewport = Viewport::root(800.0, 600.0);
        assert_eq!(value.pixel_value(&viewport), Some(150.0));
        value.set_value(Size::new(1.0, SizeUnit::Auto));
        assert_eq!(value.pixel_value(&viewport), None);
    }

    #[test]
    fn font_sizes_resolve_against_the_parent_font() {
        let viewport = Viewport::root(800.0, 600.0).with_font_sizes(16.0, 20.0);
        let mut value = SizeValue::new(Size::new(150.0, SizeUnit::Percent));
        assert_eq!(value.font_pixel_value(&viewport), Some(30.0));
        assert_eq!(value.pixel_value(&viewport), Some(1200.0));
        value.set_value(Size::new(1.5, SizeUnit::Em));
        assert_eq!(value.font_pixel_value(&viewport), Some(30.0));
    }
}
