use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    event::EventError,
    interpolate::Animatable,
    model::{
        Color, ColorOrGradient, ColorStop, DEFAULT_GRADIENT_ANGLE, DynamicString, Gradient, Size,
        SizeUnit,
    },
    property::PropertyKind,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Payload {
    Number(f64),
    Size(Size),
    Boolean(bool),
    String(String),
    DynamicString(DynamicString),
    Color(Color),
    Gradient(Gradient),
    #[serde(rename = "color/gradient")]
    ColorOrGradient(ColorOrGradient),
}

impl Payload {
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
    pub fn default_for(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::Number => Self::Number(0.0),
            PropertyKind::Size => Self::Size(Size::default()),
            PropertyKind::Boolean => Self::Boolean(false),
            PropertyKind::String => Self::String(String::new()),
            PropertyKind::DynamicString => Self::DynamicString(DynamicString::default()),
            PropertyKind::Color => Self::Color(Color::default()),
            PropertyKind::Gradient => Self::Gradient(Gradient::linear(
                DEFAULT_GRADIENT_ANGLE,
                vec![ColorStop::new(0.0, Color::BLACK), ColorStop::new(100.0, Color::BLACK)],
            )),
            PropertyKind::ColorOrGradient => Self::ColorOrGradient(ColorOrGradient::default()),
        }
    }

    /// Decodes an authored JSON override into the payload of `kind`.
    pub fn decode(kind: PropertyKind, value: &Value) -> Result<Self, EventError> {
        let mismatch = |expected: &'static str| EventError::PayloadType {
            kind,
            expected,
            found: value.to_string(),
        };

        let payload = match kind {
            PropertyKind::Number => {
                let raw = match value {
                    Value::Object(map) => map.get("value").unwrap_or(value),
                    _ => value,
                };
                Self::Number(decode_number(raw).ok_or_else(|| mismatch("a number"))?)
            }
            PropertyKind::Size => {
                let Value::Object(map) = value else {
                    return Err(mismatch("a {value, unit} object"));
                };
                let magnitude = map
                    .get("value")
                    .and_then(decode_number)
                    .ok_or_else(|| mismatch("a {value, unit} object"))?;
                let unit = map
                    .get("unit")
                    .and_then(Value::as_str)
                    .ok_or_else(|| mismatch("a {value, unit} object"))?
                    .parse::<SizeUnit>()?;
                Self::Size(Size::new(magnitude, unit))
            }
            PropertyKind::Boolean => match value {
                Value::Bool(flag) => Self::Boolean(*flag),
                Value::String(text) if text == "true" => Self::Boolean(true),
                Value::String(text) if text == "false" => Self::Boolean(false),
                _ => return Err(mismatch("a boolean")),
            },
            PropertyKind::String => Self::String(
                value
                    .as_str()
                    .ok_or_else(|| mismatch("a string"))?
                    .to_string(),
            ),
            PropertyKind::DynamicString => Self::DynamicString(DynamicString::new(
                value.as_str().ok_or_else(|| mismatch("a string"))?,
            )),
            PropertyKind::Color => match decode_color_or_gradient(value)? {
                Some(ColorOrGradient::Color(color)) => Self::Color(color),
                _ => return Err(mismatch("a color")),
            },
            PropertyKind::Gradient => match decode_color_or_gradient(value)? {
                Some(ColorOrGradient::Gradient(gradient)) => Self::Gradient(gradient),
                _ => return Err(mismatch("a gradient")),
            },
            PropertyKind::ColorOrGradient => Self::ColorOrGradient(
                decode_color_or_gradient(value)?
                    .ok_or_else(|| mismatch("a color or gradient"))?,
            ),
        };
        payload.validate()?;
        Ok(payload)
    }

    pub fn validate(&self) -> Result<(), EventError> {
        match self {
            Self::Number(number) => number.validate(),
            Self::Size(size) => size.validate(),
            Self::Boolean(_) | Self::String(_) | Self::DynamicString(_) => Ok(()),
            Self::Color(color) => color.validate(),
            Self::Gradient(gradient) => gradient.validate(),
            Self::ColorOrGradient(value) => value.validate(),
        }
    }

    #[must_use]
    pub fn css_value(&self) -> String {
        match self {
            Self::Number(number) => number.css_value(),
            Self::Size(size) => size.css_value(),
            Self::Boolean(flag) => flag.css_value(),
            Self::String(text) => text.css_value(),
            Self::DynamicString(text) => text.css_value(),
            Self::Color(color) => color.css_value(),
            Self::Gradient(gradient) => gradient.css_value(),
            Self::ColorOrGradient(value) => value.css_value(),
        }
    }

    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.same_as(b),
            (Self::Size(a), Self::Size(b)) => a.same_as(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.same_as(b),
            (Self::String(a), Self::String(b)) => a.same_as(b),
            (Self::DynamicString(a), Self::DynamicString(b)) => a.same_as(b),
            (Self::Color(a), Self::Color(b)) => a.same_as(b),
            (Self::Gradient(a), Self::Gradient(b)) => a.same_as(b),
            (Self::ColorOrGradient(a), Self::ColorOrGradient(b)) => a.same_as(b),
            _ => false,
        }
    }
}

fn decode_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// The only place a color is told apart from a gradient by shape: an explicit
/// `mode` wins, otherwise `colorStops` means gradient and `r` means color.
fn decode_color_or_gradient(value: &Value) -> Result<Option<ColorOrGradient>, EventError> {
    let invalid = |error: serde_json::Error| EventError::InvalidPayload(error.to_string());
    match value {
        Value::String(text) => Ok(Some(ColorOrGradient::Color(text.parse()?))),
        Value::Object(map) => {
            let mode = map.get("mode").and_then(Value::as_str);
            let is_gradient = match mode {
                Some("gradient") => true,
                Some("color") => false,
                Some(other) => {
                    return Err(EventError::InvalidPayload(format!("unknown mode `{other}`")));
                }
                None if map.contains_key("colorStops") => true,
                None if map.contains_key("r") => false,
                None => return Ok(None),
            };
            let decoded = if is_gradient {
                ColorOrGradient::Gradient(serde_json::from_value(value.clone()).map_err(invalid)?)
            } else {
                ColorOrGradient::Color(serde_json::from_value(value.clone()).map_err(invalid)?)
            };
            Ok(Some(decoded))
        }
        _ => Ok(None),
    }
}
