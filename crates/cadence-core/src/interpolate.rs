use std::fmt;

use crate::{
    css,
    event::EventError,
    model::{Color, ColorOrGradient, ColorStop, DynamicString, Gradient, Size, lerp},
    payload::Payload,
    property::PropertyKind,
};

pub trait Animatable: Clone + fmt::Debug {
    const KIND: PropertyKind;

    /// Blend `start` towards `end` at eased progress `t`. Structurally
    /// incompatible pairs snap to `start`.
    fn interpolate(start: &Self, end: &Self, t: f64) -> Self;

    fn same_as(&self, other: &Self) -> bool;

    fn validate(&self) -> Result<(), EventError> {
        Ok(())
    }

    fn css_value(&self) -> String;

    fn into_payload(self) -> Payload;

    fn from_payload(payload: Payload) -> Option<Self>;
}

impl Animatable for f64 {
    const KIND: PropertyKind = PropertyKind::Number;

    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        lerp(*start, *end, t)
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }

    fn validate(&self) -> Result<(), EventError> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(EventError::InvalidPayload(format!("number {self} is not finite")))
        }
    }

    fn css_value(&self) -> String {
        self.to_string()
    }

    fn into_payload(self) -> Payload {
        Payload::Number(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::Number(number) => Some(number),
            _ => None,
        }
    }
}

impl Animatable for Size {
    const KIND: PropertyKind = PropertyKind::Size;

    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        if start.unit != end.unit {
            return *start;
        }
        Self::new(lerp(start.value, end.value, t), start.unit)
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }

    fn validate(&self) -> Result<(), EventError> {
        Self::validate(self)
    }

    fn css_value(&self) -> String {
        css::size_css(*self)
    }

    fn into_payload(self) -> Payload {
        Payload::Size(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::Size(size) => Some(size),
            _ => None,
        }
    }
}

impl Animatable for bool {
    const KIND: PropertyKind = PropertyKind::Boolean;

    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        if t < 0.5 { *start } else { *end }
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }

    fn css_value(&self) -> String {
        self.to_string()
    }

    fn into_payload(self) -> Payload {
        Payload::Boolean(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::Boolean(flag) => Some(flag),
            _ => None,
        }
    }
}

impl Animatable for String {
    const KIND: PropertyKind = PropertyKind::String;

    fn interpolate(start: &Self, _end: &Self, _t: f64) -> Self {
        start.clone()
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }

    fn css_value(&self) -> String {
        self.clone()
    }

    fn into_payload(self) -> Payload {
        Payload::String(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::String(text) => Some(text),
            _ => None,
        }
    }
}

impl Animatable for DynamicString {
    const KIND: PropertyKind = PropertyKind::DynamicString;

    fn interpolate(start: &Self, _end: &Self, _t: f64) -> Self {
        start.clone()
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }

    fn css_value(&self) -> String {
        self.value.clone()
    }

    fn into_payload(self) -> Payload {
        Payload::DynamicString(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::DynamicString(text) => Some(text),
            _ => None,
        }
    }
}

impl Animatable for Color {
    const KIND: PropertyKind = PropertyKind::Color;

    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        start.lerp(*end, t)
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }

    fn validate(&self) -> Result<(), EventError> {
        Self::validate(self)
    }

    fn css_value(&self) -> String {
        css::color_css(self)
    }

    fn into_payload(self) -> Payload {
        Payload::Color(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::Color(color) => Some(color),
            _ => None,
        }
    }
}

impl Animatable for Gradient {
    const KIND: PropertyKind = PropertyKind::Gradient;

    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        if !start.is_compatible_with(end) {
            return start.clone();
        }
        let color_stops = start
            .color_stops
            .iter()
            .zip(&end.color_stops)
            .map(|(from, to)| ColorStop {
                position: lerp(from.position, to.position, t),
                color: from.color.lerp(to.color, t),
                midpoint: match (from.midpoint, to.midpoint) {
                    (Some(a), Some(b)) => Some(lerp(a, b, t)),
                    _ => None,
                },
            })
            .collect();
        Self {
            kind: start.kind,
            angle: lerp(start.angle, end.angle, t),
            scale: lerp(start.scale, end.scale, t),
            opacity: lerp(start.opacity, end.opacity, t),
            color_stops,
        }
    }

    fn same_as(&self, other: &Self) -> bool {
        Self::same_as(self, other)
    }

    fn validate(&self) -> Result<(), EventError> {
        Self::validate(self)
    }

    fn css_value(&self) -> String {
        css::gradient_css(self)
    }

    fn into_payload(self) -> Payload {
        Payload::Gradient(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::Gradient(gradient) => Some(gradient),
            _ => None,
        }
    }
}

impl Animatable for ColorOrGradient {
    const KIND: PropertyKind = PropertyKind::ColorOrGradient;

    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        match (start, end) {
            (Self::Color(from), Self::Color(to)) => Self::Color(Color::interpolate(from, to, t)),
            (Self::Gradient(from), Self::Gradient(to)) => {
                Self::Gradient(Gradient::interpolate(from, to, t))
            }
            _ => start.clone(),
        }
    }

    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Color(a), Self::Color(b)) => a == b,
            (Self::Gradient(a), Self::Gradient(b)) => a.same_as(b),
            _ => false,
        }
    }

    fn validate(&self) -> Result<(), EventError> {
        Self::validate(self)
    }

    fn css_value(&self) -> String {
        match self {
            Self::Color(color) => css::color_css(color),
            Self::Gradient(gradient) => css::gradient_css(gradient),
        }
    }

    fn into_payload(self) -> Payload {
        Payload::ColorOrGradient(self)
    }

    fn from_payload(payload: Payload) -> Option<Self> {
        match payload {
            Payload::ColorOrGradient(value) => Some(value),
            Payload::Color(color) => Some(Self::Color(color)),
            Payload::Gradient(gradient) => Some(Self::Gradient(gradient)),
            _ => None,
        }
    }
}

#[must_use]
pub fn interpolate_payload(start: &Payload, end: &Payload, t: f64) -> Payload {
    match (start, end) {
        (Payload::Number(a), Payload::Number(b)) => Payload::Number(f64::interpolate(a, b, t)),
        (Payload::Size(a), Payload::Size(b)) => Payload::Size(Size::interpolate(a, b, t)),
        (Payload::Boolean(a), Payload::Boolean(b)) => Payload::Boolean(bool::interpolate(a, b, t)),
        (Payload::String(a), Payload::String(b)) => Payload::String(String::interpolate(a, b, t)),
        (Payload::DynamicString(a), Payload::DynamicString(b)) => {
            Payload::DynamicString(DynamicString::interpolate(a, b, t))
        }
        (Payload::Color(a), Payload::Color(b)) => Payload::Color(Color::interpolate(a, b, t)),
        (Payload::Gradient(a), Payload::Gradient(b)) => {
            Payload::Gradient(Gradient::interpolate(a, b, t))
        }
        (Payload::ColorOrGradient(a), Payload::ColorOrGradient(b)) => {
            Payload::ColorOrGradient(ColorOrGradient::interpolate(a, b, t))
        }
        _ => start.clone(),
    }
}
