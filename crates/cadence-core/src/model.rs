use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::EventError;

pub const DEFAULT_GRADIENT_ANGLE: f64 = 90.0;
pub const DEFAULT_GRADIENT_SCALE: f64 = 100.0;
pub const DEFAULT_OPACITY: f64 = 1.0;
pub const DEFAULT_MIDPOINT: f64 = 50.0;
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "default_opacity")]
    pub a: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if !self.a.is_finite() || !(0.0..=1.0).contains(&self.a) {
            return Err(EventError::InvalidPayload(format!(
                "alpha {} outside [0, 1]",
                self.a
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = EventError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let invalid = || EventError::InvalidPayload(format!("unrecognised color `{input}`"));

        if let Some(body) = input
            .strip_prefix("rgba(")
            .or_else(|| input.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            if parts.len() != 3 && parts.len() != 4 {
                return Err(invalid());
            }
            let channel = |part: &str| part.parse::<u8>().map_err(|_| invalid());
            let a = match parts.get(3) {
                Some(alpha) => alpha.parse::<f64>().map_err(|_| invalid())?,
                None => DEFAULT_OPACITY,
            };
            let color = Self::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a);
            color.validate()?;
            return Ok(color);
        }

        let hex = input.strip_prefix('#').unwrap_or(input);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        match hex.len() {
            3 => {
                let nibble = |index: usize| byte(index..index + 1).map(|value| value * 17);
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::rgba(
                byte(0..2)?,
                byte(2..4)?,
                byte(4..6)?,
                f64::from(byte(6..8)?) / 255.0,
            )),
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midpoint: Option<f64>,
}

impl ColorStop {
    #[must_use]
    pub const fn new(position: f64, color: Color) -> Self {
        Self {
            position,
            color,
            midpoint: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    #[serde(rename = "type", default)]
    pub kind: GradientKind,
    #[serde(default = "default_gradient_angle")]
    pub angle: f64,
    #[serde(default = "default_gradient_scale")]
    pub scale: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    pub color_stops: Vec<ColorStop>,
}

impl Gradient {
    #[must_use]
    pub fn new(kind: GradientKind, color_stops: Vec<ColorStop>) -> Self {
        Self {
            kind,
            angle: DEFAULT_GRADIENT_ANGLE,
            scale: DEFAULT_GRADIENT_SCALE,
            opacity: DEFAULT_OPACITY,
            color_stops,
        }
    }

    #[must_use]
    pub fn linear(angle: f64, color_stops: Vec<ColorStop>) -> Self {
        Self {
            angle,
            ..Self::new(GradientKind::Linear, color_stops)
        }
    }

    #[must_use]
    pub fn radial(scale: f64, color_stops: Vec<ColorStop>) -> Self {
        Self {
            scale,
            ..Self::new(GradientKind::Radial, color_stops)
        }
    }

    /// The one sanctioned solid-to-gradient conversion: copies the shape of
    /// `template` and paints every stop with `color`.
    #[must_use]
    pub fn filled_like(template: &Self, color: Color) -> Self {
        let mut gradient = template.clone();
        for stop in &mut gradient.color_stops {
            stop.color = color;
        }
        gradient
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if self.color_stops.is_empty() {
            return Err(EventError::InvalidPayload(
                "gradient needs at least one color stop".to_string(),
            ));
        }
        let finite = [self.angle, self.scale, self.opacity]
            .into_iter()
            .chain(self.color_stops.iter().map(|stop| stop.position))
            .chain(self.color_stops.iter().filter_map(|stop| stop.midpoint))
            .all(f64::is_finite);
        if !finite {
            return Err(EventError::InvalidPayload(
                "gradient fields must be finite".to_string(),
            ));
        }
        self.color_stops
            .iter()
            .try_for_each(|stop| stop.color.validate())
    }

    #[must_use]
    pub fn sorted_stops(&self) -> Vec<ColorStop> {
        let mut stops = self.color_stops.clone();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        stops
    }

    /// Piecewise-linear color lookup across the sorted stops, clamped at both ends.
    #[must_use]
    pub fn color_at(&self, position: f64) -> Color {
        let stops = self.sorted_stops();
        let Some(first) = stops.first() else {
            return Color::BLACK;
        };
        if position <= first.position {
            return first.color;
        }

        for pair in stops.windows(2) {
            let (before, after) = (pair[0], pair[1]);
            if position == after.position {
                return after.color;
            }
            if position < after.position {
                let range = after.position - before.position;
                if range <= 0.0 {
                    return before.color;
                }
                return before.color.lerp(after.color, (position - before.position) / range);
            }
        }

        stops.last().map_or(first.color, |last| last.color)
    }

    /// Samples this gradient at each of `positions`. Midpoints are not carried.
    #[must_use]
    pub fn resampled_at(&self, positions: impl IntoIterator<Item = f64>) -> Self {
        let color_stops = positions
            .into_iter()
            .map(|position| ColorStop::new(position, self.color_at(position)))
            .collect();
        Self {
            color_stops,
            ..self.clone()
        }
    }

    /// Structural equality: stop order is irrelevant, and only the shape
    /// parameter the kind renders (angle or scale) is compared.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn same_as(&self, other: &Self) -> bool {
        if self.kind != other.kind
            || self.opacity != other.opacity
            || self.color_stops.len() != other.color_stops.len()
        {
            return false;
        }
        let same_shape = match self.kind {
            GradientKind::Linear => self.angle == other.angle,
            GradientKind::Radial => self.scale == other.scale,
        };
        same_shape && self.sorted_stops() == other.sorted_stops()
    }

    #[must_use]
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.kind == other.kind && self.color_stops.len() == other.color_stops.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ColorOrGradient {
    Color(Color),
    Gradient(Gradient),
}

impl ColorOrGradient {
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Gradient(_) => "gradient",
        }
    }

    pub fn validate(&self) -> Result<(), EventError> {
        match self {
            Self::Color(color) => color.validate(),
            Self::Gradient(gradient) => gradient.validate(),
        }
    }
}

impl Default for ColorOrGradient {
    fn default() -> Self {
        Self::Color(Color::BLACK)
    }
}

impl From<Color> for ColorOrGradient {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Gradient> for ColorOrGradient {
    fn from(value: Gradient) -> Self {
        Self::Gradient(value)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    #[default]
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "pw")]
    Pw,
    #[serde(rename = "ph")]
    Ph,
    #[serde(rename = "vw")]
    Vw,
    #[serde(rename = "vh")]
    Vh,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "pt")]
    Pt,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "rem")]
    Rem,
    #[serde(rename = "auto")]
    Auto,
}

impl SizeUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Pw => "pw",
            Self::Ph => "ph",
            Self::Vw => "vw",
            Self::Vh => "vh",
            Self::Percent => "%",
            Self::Pt => "pt",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for SizeUnit {
    type Err = EventError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "px" => Ok(Self::Px),
            "pw" => Ok(Self::Pw),
            "ph" => Ok(Self::Ph),
            "vw" => Ok(Self::Vw),
            "vh" => Ok(Self::Vh),
            "%" => Ok(Self::Percent),
            "pt" => Ok(Self::Pt),
            "em" => Ok(Self::Em),
            "rem" => Ok(Self::Rem),
            "auto" => Ok(Self::Auto),
            other => Err(EventError::InvalidUnit(other.to_string())),
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub value: f64,
    pub unit: SizeUnit,
}

impl Size {
    #[must_use]
    pub const fn new(value: f64, unit: SizeUnit) -> Self {
        Self { value, unit }
    }

    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(value, SizeUnit::Px)
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if self.value.is_finite() {
            Ok(())
        } else {
            Err(EventError::InvalidPayload(format!(
                "size magnitude {} is not finite",
                self.value
            )))
        }
    }

    /// Pixel length in the given layout context, rounded to two decimals.
    /// `auto` has no pixel length.
    #[must_use]
    pub fn to_pixels(self, viewport: &Viewport) -> Option<f64> {
        let pixels = match self.unit {
            SizeUnit::Px => self.value,
            SizeUnit::Pw | SizeUnit::Percent => self.value * viewport.parent_width / 100.0,
            SizeUnit::Ph => self.value * viewport.parent_height / 100.0,
            SizeUnit::Vw => self.value * viewport.root_width / 100.0,
            SizeUnit::Vh => self.value * viewport.root_height / 100.0,
            SizeUnit::Pt => self.value * 4.0 / 3.0,
            SizeUnit::Em => self.value * viewport.parent_font_size,
            SizeUnit::Rem => self.value * viewport.root_font_size,
            SizeUnit::Auto => return None,
        };
        Some(round_pixels(pixels))
    }

    /// Like [`Size::to_pixels`], except `%` is relative to the parent font
    /// size, as for font sizes and text spacing.
    #[must_use]
    pub fn to_font_pixels(self, viewport: &Viewport) -> Option<f64> {
        match self.unit {
            SizeUnit::Percent => Some(round_pixels(self.value * viewport.parent_font_size / 100.0)),
            _ => self.to_pixels(viewport),
        }
    }
}

fn round_pixels(pixels: f64) -> f64 {
    (pixels * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub root_width: f64,
    pub root_height: f64,
    pub parent_width: f64,
    pub parent_height: f64,
    pub root_font_size: f64,
    pub parent_font_size: f64,
}

impl Viewport {
    #[must_use]
    pub const fn root(width: f64, height: f64) -> Self {
        Self {
            root_width: width,
            root_height: height,
            parent_width: width,
            parent_height: height,
            root_font_size: DEFAULT_FONT_SIZE,
            parent_font_size: DEFAULT_FONT_SIZE,
        }
    }

    #[must_use]
    pub const fn with_font_sizes(self, root_font_size: f64, parent_font_size: f64) -> Self {
        Self {
            root_font_size,
            parent_font_size,
            ..self
        }
    }
}

/// A string paired with a correlation id, so that re-triggering the same
/// text (e.g. `playing` twice) is observable downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DynamicString {
    pub value: String,
    pub id: Uuid,
}

impl DynamicString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            id: Uuid::new_v4(),
        }
    }

    #[must_use]
    pub fn with_id(value: impl Into<String>, id: Uuid) -> Self {
        Self {
            value: value.into(),
            id,
        }
    }
}

impl Default for DynamicString {
    fn default() -> Self {
        Self::with_id(String::new(), Uuid::nil())
    }
}

#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = lerp(f64::from(start), f64::from(end), t).round().clamp(0.0, 255.0) as u8;
    channel
}

const fn default_opacity() -> f64 {
    DEFAULT_OPACITY
}

const fn default_gradient_angle() -> f64 {
    DEFAULT_GRADIENT_ANGLE
}

const fn default_gradient_scale() -> f64 {
    DEFAULT_GRADIENT_SCALE
}
