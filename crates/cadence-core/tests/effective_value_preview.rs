use cadence_core::{
    AuthoredContent, AuthoredNote, Color, ColorOrGradient, EffectiveValueResolver, NoteValue,
    Payload, ResolveError, Size, default_payload, fixtures::demo_song,
};
use serde_json::{Value, json};

fn default_of(id: &str) -> Payload {
    default_payload(id).expect("known property")
}

fn gradient_json(kind: &str, stops: &[(f64, [u8; 3])]) -> Value {
    let stops: Vec<Value> = stops
        .iter()
        .map(|(position, [r, g, b])| {
            json!({ "position": position, "color": { "r": r, "g": g, "b": b } })
        })
        .collect();
    json!({ "mode": "gradient", "type": kind, "colorStops": stops })
}

fn three_quarters(first: Value, last: Value) -> AuthoredContent {
    AuthoredContent {
        content: vec![vec![
            AuthoredNote::new("first", NoteValue::Quarter).with_override("bgColor", first),
            AuthoredNote::new("between", NoteValue::Quarter),
            AuthoredNote::new("last", NoteValue::Quarter).with_override("bgColor", last),
        ]],
    }
}

#[test]
fn demo_notes_preview_eased_values_between_overrides() {
    let song = demo_song();
    let element = song.element("title-card").expect("demo element");
    let resolver = EffectiveValueResolver::new(&element.events);
    assert_eq!(resolver.notes().len(), 5);

    let opacity = resolver
        .effective_value_by_id("title-m0-n1", "opacity", &default_of("opacity"))
        .expect("opacity should resolve");
    let Payload::Number(opacity) = opacity else {
        panic!("opacity should be numeric, got {opacity:?}");
    };
    assert!((opacity - 0.75).abs() < 1e-9);

    let font_size = resolver
        .effective_value_by_id("title-m0-n2", "fontSize", &default_of("fontSize"))
        .expect("font size should resolve");
    assert_eq!(font_size, Payload::Size(Size::px(30.0)));

    let justify = resolver
        .effective_value_by_id("title-m2-n0", "justifyText", &default_of("justifyText"))
        .expect("justify should resolve");
    assert_eq!(justify, Payload::Boolean(true));
}

#[test]
fn demo_solid_color_blends_into_the_following_gradient() {
    let song = demo_song();
    let element = song.element("title-card").expect("demo element");
    let resolver = EffectiveValueResolver::new(&element.events);

    let halfway = resolver
        .effective_value_by_id("title-m0-n2", "textColor", &default_of("textColor"))
        .expect("text color should resolve");
    match halfway {
        Payload::ColorOrGradient(ColorOrGradient::Gradient(gradient)) => {
            assert_eq!(gradient.color_stops.len(), 2);
            assert_eq!(gradient.color_stops[0].color, Color::rgb(128, 0, 128));
            assert_eq!(gradient.color_stops[1].color, Color::rgb(255, 128, 128));
        }
        other => panic!("expected a blended gradient, got {other:?}"),
    }

    let held = resolver
        .effective_value_by_id("title-m2-n0", "textColor", &default_of("textColor"))
        .expect("text color should resolve");
    assert!(matches!(
        held,
        Payload::ColorOrGradient(ColorOrGradient::Gradient(ref gradient))
            if (gradient.angle - 45.0).abs() < f64::EPSILON
    ));
}

#[test]
fn gradients_with_different_stop_counts_are_resampled() {
    let content = three_quarters(
        gradient_json("linear", &[(0.0, [0, 0, 0]), (100.0, [255, 255, 255])]),
        gradient_json(
            "linear",
            &[(0.0, [255, 0, 0]), (50.0, [0, 255, 0]), (100.0, [0, 0, 255])],
        ),
    );
    let resolver = EffectiveValueResolver::new(&content);

    let blended = resolver
        .effective_value(1, "bgColor", &default_of("bgColor"))
        .expect("bgColor should resolve");
    let Payload::ColorOrGradient(ColorOrGradient::Gradient(gradient)) = blended else {
        panic!("expected a gradient, got {blended:?}");
    };
    let positions: Vec<f64> = gradient.color_stops.iter().map(|stop| stop.position).collect();
    assert_eq!(positions, [0.0, 50.0, 100.0]);
    assert_eq!(gradient.color_stops[0].color, Color::rgb(128, 0, 0));
    assert_eq!(gradient.color_stops[2].color, Color::rgb(128, 128, 255));
}

#[test]
fn gradients_of_another_type_switch_without_blending() {
    let first = gradient_json("linear", &[(0.0, [0, 0, 0]), (100.0, [255, 255, 255])]);
    let content = three_quarters(
        first,
        gradient_json("radial", &[(0.0, [255, 0, 0]), (100.0, [0, 0, 255])]),
    );
    let resolver = EffectiveValueResolver::new(&content);

    let between = resolver
        .effective_value(1, "bgColor", &default_of("bgColor"))
        .expect("bgColor should resolve");
    let own = resolver
        .effective_value(0, "bgColor", &default_of("bgColor"))
        .expect("bgColor should resolve");
    assert_eq!(between, own);
}

#[test]
fn malformed_overrides_and_unknown_lookups_are_errors() {
    let content = AuthoredContent {
        content: vec![vec![
            AuthoredNote::new("a", NoteValue::Half)
                .with_override("width", json!({ "value": 3, "unit": "cubit" })),
        ]],
    };
    let resolver = EffectiveValueResolver::new(&content);

    let error = resolver
        .effective_value(0, "width", &default_of("width"))
        .expect_err("cubit is not a size unit");
    assert!(matches!(error, ResolveError::Override { ref note, .. } if note == "a"));

    assert_eq!(
        resolver.effective_value(3, "width", &default_of("width")),
        Err(ResolveError::NoteOutOfRange { index: 3, len: 1 })
    );
    assert_eq!(
        resolver.effective_value_by_id("zz", "width", &default_of("width")),
        Err(ResolveError::UnknownNote("zz".to_string()))
    );
    assert!(matches!(
        resolver.effective_value(0, "sparkle", &Payload::Number(0.0)),
        Err(ResolveError::UnknownProperty(_))
    ));
}
