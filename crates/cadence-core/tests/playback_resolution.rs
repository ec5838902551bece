use cadence_core::{
    Color, ColorEvent, ColorOrGradient, ColorOrGradientEvent, ColorStop, DynamicString,
    DynamicStringValue, Easing, Event, Gradient, NumberValue, Position, Size, SizeEvent, SizeUnit,
    SizeValue, Viewport,
};

fn at(measure_index: u32, progress: f64) -> Position {
    Position::new(measure_index, progress).expect("valid position")
}

#[test]
fn color_midpoint_between_measures() {
    let mut value = cadence_core::ColorValue::new(Color::BLACK);
    value.add_event(ColorEvent::at(Color::rgb(255, 0, 0), Easing::Linear, 0, 0.0).expect("red"));
    value.add_event(ColorEvent::at(Color::rgb(0, 0, 255), Easing::Linear, 2, 0.0).expect("blue"));

    assert!(value.apply_event(at(1, 0.0)));
    assert_eq!(value.value(), &Color::rgba(128, 0, 128, 1.0));
    assert_eq!(value.css_value(), "rgb(128, 0, 128)");
}

#[test]
fn mismatched_units_hold_the_start_until_the_next_keyframe() {
    let mut value = SizeValue::new(Size::px(0.0));
    value.add_event(SizeEvent::at(Size::px(10.0), Easing::Linear, 0, 0.0).expect("px"));
    value.add_event(
        SizeEvent::at(Size::new(20.0, SizeUnit::Pw), Easing::Linear, 1, 0.0).expect("pw"),
    );

    value.apply_event(at(0, 0.5));
    assert_eq!(value.value(), &Size::px(10.0));
    value.apply_event(at(1, 0.0));
    assert_eq!(value.css_value(), "20pw");

    let viewport = Viewport {
        root_width: 1920.0,
        root_height: 1080.0,
        parent_width: 640.0,
        parent_height: 360.0,
        ..Viewport::root(1920.0, 1080.0)
    };
    assert_eq!(value.pixel_value(&viewport), Some(128.0));
}

#[test]
fn render_flag_follows_actual_changes() {
    let mut value = NumberValue::new(0.0);
    value.add_event(Event::at(4.0, Easing::Linear, 2, 0.0).expect("event"));
    value.mark_as_rendered();

    // Still on the default: nothing to render.
    assert!(!value.apply_event(at(0, 0.0)));
    assert!(!value.should_render());

    assert!(value.apply_event(at(1, 0.0)));
    assert!(value.should_render());
    assert!((value.value() - 2.0).abs() < f64::EPSILON);

    value.mark_as_rendered();
    assert!(!value.set_value(2.0));
    assert!(!value.should_render());
    value.mark_as_dirty();
    assert!(value.should_render());
}

#[test]
fn color_to_gradient_switches_at_the_keyframe() {
    let gradient = Gradient::linear(
        0.0,
        vec![ColorStop::new(0.0, Color::WHITE), ColorStop::new(100.0, Color::BLACK)],
    );
    let mut value = cadence_core::ColorOrGradientValue::new(ColorOrGradient::Color(Color::BLACK));
    value.add_event(
        ColorEvent::at(Color::rgb(10, 10, 10), Easing::Linear, 0, 0.0)
            .expect("color")
            .into(),
    );
    let gradient_event: ColorOrGradientEvent = Event::at(gradient.clone(), Easing::Linear, 1, 0.0)
        .expect("gradient")
        .into();
    value.add_event(gradient_event);

    value.apply_event(at(0, 0.9));
    assert_eq!(value.value(), &ColorOrGradient::Color(Color::rgb(10, 10, 10)));
    value.apply_event(at(1, 0.0));
    assert_eq!(value.value(), &ColorOrGradient::Gradient(gradient));
    assert_eq!(
        value.css_value(),
        "linear-gradient(0deg, rgba(255, 255, 255, 1) 0%, rgba(0, 0, 0, 1) 100%)"
    );
}

#[test]
fn state_triggers_carry_fresh_correlation_ids() {
    let mut state = DynamicStringValue::new(DynamicString::new("paused"));
    let first = DynamicString::new("playing");
    let second = DynamicString::new("playing");
    let second_id = second.id;
    state.add_event(Event::at(first, Easing::Linear, 1, 0.0).expect("first trigger"));
    state.add_event(Event::at(second, Easing::Linear, 3, 0.0).expect("second trigger"));

    assert!(state.apply_event(at(2, 0.0)));
    let first_id = state.trigger_id();
    assert!(!state.apply_event(at(2, 0.5)));
    assert!(state.apply_event(at(3, 0.0)));
    assert_eq!(state.text(), "playing");
    assert_ne!(state.trigger_id(), first_id);
    assert_eq!(state.trigger_id(), second_id);
}
