//! CSS text for resolved payloads, as handed to the rendering layer.

use std::fmt::Write;

use crate::model::{Color, DEFAULT_MIDPOINT, Gradient, GradientKind, Size, SizeUnit};

#[must_use]
pub fn color_css(color: &Color) -> String {
    if (color.a - 1.0).abs() < f64::EPSILON {
        format!("rgb({}, {}, {})", color.r, color.g, color.b)
    } else {
        format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, color.a)
    }
}

/// Stops are emitted in position order with the gradient opacity folded into
/// each stop's alpha. A midpoint other than 50 becomes a CSS color hint.
#[must_use]
pub fn gradient_css(gradient: &Gradient) -> String {
    let stops = gradient.sorted_stops();
    match stops.as_slice() {
        [] => return "none".to_string(),
        [only] => {
            let Color { r, g, b, a } = only.color;
            return format!("rgba({r}, {g}, {b}, {a})");
        }
        _ => {}
    }

    let mut body = String::new();
    for (index, stop) in stops.iter().enumerate() {
        let Color { r, g, b, a } = stop.color;
        let alpha = a * gradient.opacity;
        let _ = write!(body, "rgba({r}, {g}, {b}, {alpha}) {}%", stop.position);

        if let Some(next) = stops.get(index + 1) {
            if let Some(midpoint) = next.midpoint
                && (midpoint - DEFAULT_MIDPOINT).abs() > f64::EPSILON
            {
                let relative = midpoint.clamp(0.0, 100.0) / 100.0;
                let hint = stop.position + (next.position - stop.position) * relative;
                let _ = write!(body, ", {hint:.2}%");
            }
            body.push_str(", ");
        }
    }

    match gradient.kind {
        GradientKind::Linear => format!("linear-gradient({}deg, {body})", gradient.angle),
        GradientKind::Radial => format!("radial-gradient(circle, {body})"),
    }
}

#[must_use]
pub fn size_css(size: Size) -> String {
    match size.unit {
        SizeUnit::Auto => "auto".to_string(),
        unit => format!("{}{unit}", size.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColorStop;

    #[test]
    fn opaque_colors_use_rgb() {
        assert_eq!(color_css(&Color::rgb(1, 2, 3)), "rgb(1, 2, 3)");
        assert_eq!(color_css(&Color::rgba(1, 2, 3, 0.5)), "rgba(1, 2, 3, 0.5)");
    }

    #[test]
    fn gradients_sort_stops_and_emit_hints() {
        let mut end = ColorStop::new(100.0, Color::rgb(0, 0, 255));
        end.midpoint = Some(25.0);
        let mut gradient =
            Gradient::linear(45.0, vec![end, ColorStop::new(0.0, Color::rgb(255, 0, 0))]);
        gradient.opacity = 0.5;
        assert_eq!(
            gradient_css(&gradient),
            "linear-gradient(45deg, rgba(255, 0, 0, 0.5) 0%, 25.00%, rgba(0, 0, 255, 0.5) 100%)"
        );
    }

    #[test]
    fn degenerate_gradients_fall_back() {
        assert_eq!(gradient_css(&Gradient::radial(100.0, Vec::new())), "none");
        let single = Gradient::radial(100.0, vec![ColorStop::new(0.0, Color::WHITE)]);
        assert_eq!(gradient_css(&single), "rgba(255, 255, 255, 1)");
    }

    #[test]
    fn sizes_render_with_their_unit() {
        assert_eq!(size_css(Size::new(12.5, SizeUnit::Percent)), "12.5%");
        assert_eq!(size_css(Size::new(3.0, SizeUnit::Auto)), "auto");
        assert_eq!(size_css(Size::new(1.5, SizeUnit::Rem)), "1.5rem");
    }
}
