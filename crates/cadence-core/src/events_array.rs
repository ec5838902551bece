use uuid::Uuid;

use crate::{event::Event, interpolate::Animatable, time::Position};

/// Position-sorted keyframes of one property plus the default value anchored
/// at `timeline_offset`, which covers the span before the first keyframe.
#[derive(Debug, Clone)]
pub struct EventsArray<T> {
    events: Vec<Event<T>>,
    default_value: T,
    timeline_offset: f64,
}

impl<T: Animatable> EventsArray<T> {
    #[must_use]
    pub fn new(default_value: T) -> Self {
        Self {
            events: Vec::new(),
            default_value,
            timeline_offset: 0.0,
        }
    }

    /// Interpolated payload at `position`. Past the last keyframe the last
    /// payload holds; before the first one the default blends into it.
    #[must_use]
    pub fn resolve(&self, position: Position) -> T {
        let (Some(first), Some(last)) = (self.events.first(), self.events.last()) else {
            return self.default_value.clone();
        };
        let target = position.ordinal();

        if position < first.position() {
            let span = first.position().ordinal() - self.timeline_offset;
            let raw = if span <= 0.0 {
                1.0
            } else {
                ((target - self.timeline_offset) / span).clamp(0.0, 1.0)
            };
            let eased = first.easing().apply(raw);
            return T::interpolate(&self.default_value, first.payload(), eased);
        }

        if position >= last.position() {
            return last.payload().clone();
        }

        // first <= position < last, so both neighbours exist.
        let next_index = self.events.partition_point(|event| event.position() <= position);
        let prev = &self.events[next_index - 1];
        let next = &self.events[next_index];

        let start = prev.position().ordinal();
        let span = next.position().ordinal() - start;
        let raw = if span > 0.0 { (target - start) / span } else { 1.0 };
        T::interpolate(prev.payload(), next.payload(), next.easing().apply(raw))
    }

    /// Inserts after every event at or before the new position, so the most
    /// recently inserted event wins a shared position.
    pub fn insert(&mut self, event: Event<T>) {
        let index = self
            .events
            .partition_point(|existing| existing.position() <= event.position());
        self.events.insert(index, event);
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        match self.events.iter().position(|event| event.id() == id) {
            Some(index) => {
                self.events.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn clear_transition_events(&mut self) {
        self.events.retain(|event| !event.is_transition());
    }

    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    pub fn set_default_value(&mut self, value: T) {
        self.default_value = value;
    }

    #[must_use]
    pub fn timeline_offset(&self) -> f64 {
        self.timeline_offset
    }

    pub fn set_timeline_offset(&mut self, offset: f64) {
        self.timeline_offset = offset;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Event<T>> {
        self.events.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event<T>> {
        self.events.iter()
    }

    #[must_use]
    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }
}

impl<T: Animatable + Default> Default for EventsArray<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
