pub mod authoring;
pub mod config;
pub mod css;
pub mod diagnostics;
pub mod easing;
pub mod element;
pub mod event;
pub mod events_array;
pub mod fixtures;
pub mod interpolate;
pub mod model;
pub mod payload;
pub mod persistence;
pub mod property;
pub mod rebuild;
pub mod resolver;
pub mod time;
pub mod value;

pub use authoring::{
    AuthoredContent, AuthoredNote, ElementDocument, MeasureInfo, NoteEvents, SongDocument,
    measure_map_from_beats,
};
pub use config::CadenceConfig;
pub use diagnostics::{TelemetryGuard, init_tracing_with_config, init_tracing_with_options};
pub use easing::Easing;
pub use element::{AnyValue, ElementTimeline};
pub use event::{
    BooleanEvent, ColorEvent, ColorOrGradientEvent, DynamicStringEvent, Event, EventError,
    GradientEvent, NumberEvent, SizeEvent, StringEvent,
};
pub use events_array::EventsArray;
pub use interpolate::{Animatable, interpolate_payload};
pub use model::{
    Color, ColorOrGradient, ColorStop, DynamicString, Gradient, GradientKind, Size, SizeUnit,
    Viewport,
};
pub use payload::Payload;
pub use property::{PropertyKind, default_payload, property_kind};
pub use rebuild::{RebuildReport, build_element_timeline, rebuild_timeline};
pub use resolver::{EffectiveValueResolver, ResolveError, effective_value};
pub use time::{NoteValue, Position};
pub use value::{
    AnimatedValue, BooleanValue, ColorOrGradientValue, ColorValue, DynamicStringValue,
    GradientValue, NumberValue, SizeValue, StringValue,
};
