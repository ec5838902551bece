use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    model::{Color, ColorOrGradient, DynamicString, Size, SizeUnit},
    payload::Payload,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    Number,
    Size,
    Boolean,
    String,
    DynamicString,
    Color,
    Gradient,
    #[serde(rename = "color/gradient")]
    ColorOrGradient,
}

impl PropertyKind {
    pub const ALL: [Self; 8] = [
        Self::Number,
        Self::Size,
        Self::Boolean,
        Self::String,
        Self::DynamicString,
        Self::Color,
        Self::Gradient,
        Self::ColorOrGradient,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Size => "size",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::DynamicString => "dynamic-string",
            Self::Color => "color",
            Self::Gradient => "gradient",
            Self::ColorOrGradient => "color/gradient",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub id: &'static str,
    pub kind: PropertyKind,
    pub group: &'static str,
    pub slot: &'static str,
}

const fn spec(
    id: &'static str,
    kind: PropertyKind,
    group: &'static str,
    slot: &'static str,
) -> PropertySpec {
    PropertySpec {
        id,
        kind,
        group,
        slot,
    }
}

use PropertyKind as K;

pub const PROPERTIES: &[PropertySpec] = &[
    spec("opacity", K::Number, "effects", "opacity"),
    spec("mixBlendMode", K::String, "effects", "mixBlendMode"),
    spec("width", K::Size, "dimensions", "width"),
    spec("height", K::Size, "dimensions", "height"),
    spec("top", K::Size, "margin", "top"),
    spec("left", K::Size, "margin", "left"),
    spec("right", K::Size, "margin", "right"),
    spec("bottom", K::Size, "margin", "bottom"),
    spec("bgEnabled", K::Boolean, "background", "enabled"),
    spec("bgColor", K::ColorOrGradient, "background", "background"),
    spec("borderEnabled", K::Boolean, "border", "enabled"),
    spec("borderSize", K::Size, "border", "width"),
    spec("borderRadius", K::Size, "border", "radius"),
    spec("borderColor", K::Color, "border", "color"),
    spec("shadowEnabled", K::Boolean, "boxShadow", "enabled"),
    spec("shadowInset", K::Boolean, "boxShadow", "inset"),
    spec("shadowAngle", K::Number, "boxShadow", "shadowAngle"),
    spec("shadowDistance", K::Size, "boxShadow", "shadowDistance"),
    spec("shadowOffsetX", K::Size, "boxShadow", "offsetX"),
    spec("shadowOffsetY", K::Size, "boxShadow", "offsetY"),
    spec("shadowBlur", K::Size, "boxShadow", "blur"),
    spec("shadowSpread", K::Size, "boxShadow", "spread"),
    spec("shadowColor", K::Color, "boxShadow", "color"),
    spec("paddingTop", K::Size, "inner_padding", "top"),
    spec("paddingLeft", K::Size, "inner_padding", "left"),
    spec("paddingBottom", K::Size, "inner_padding", "bottom"),
    spec("paddingRight", K::Size, "inner_padding", "right"),
    spec("content", K::String, "textContent", "content"),
    spec("fontFamily", K::String, "textStyle", "fontFamily"),
    spec("fontWeight", K::String, "textStyle", "fontWeight"),
    spec("fontStyle", K::String, "textStyle", "fontStyle"),
    spec("fontSize", K::Size, "textStyle", "fontSize"),
    spec("lineHeight", K::Size, "textStyle", "lineHeight"),
    spec("letterSpacing", K::Size, "textStyle", "letterSpacing"),
    spec("wordSpacing", K::Size, "textStyle", "wordSpacing"),
    spec("textAlign", K::String, "textStyle", "textAlign"),
    spec("justifyText", K::Boolean, "textStyle", "justifyText"),
    spec("textColor", K::ColorOrGradient, "textStyle", "textColor"),
    spec("karaokeColor", K::ColorOrGradient, "textStyle", "karaokeColor"),
    spec("textShadowEnabled", K::Boolean, "textShadow", "enabled"),
    spec("textShadowAngle", K::Number, "textShadow", "textShadowAngle"),
    spec("textShadowDistance", K::Size, "textShadow", "textShadowDistance"),
    spec("textShadowBlur", K::Size, "textShadow", "blur"),
    spec("textShadowColor", K::Color, "textShadow", "color"),
    spec("progressBgColor", K::ColorOrGradient, "progress", "backgroundColor"),
    spec("progressFillColor", K::ColorOrGradient, "progress", "fillColor"),
    spec("objectFit", K::String, "objectFit", "objectFit"),
    spec("videoSrc", K::String, "src", "src"),
    spec("audioSrc", K::String, "src", "src"),
    spec("videoState", K::DynamicString, "playback", "state"),
    spec("videoSpeed", K::Number, "playback", "speed"),
    spec("videoLoop", K::Boolean, "playback", "loop"),
    spec("audioState", K::DynamicString, "playback", "state"),
    spec("audioVolume", K::Number, "playback", "volume"),
    spec("audioLoop", K::Boolean, "playback", "loop"),
    spec("audioStartTime", K::Number, "playback", "startTime"),
    spec("audioEndTime", K::Number, "playback", "endTime"),
    spec("translateX", K::Size, "transform", "translateX"),
    spec("translateY", K::Size, "transform", "translateY"),
    spec("translateZ", K::Size, "transform", "translateZ"),
    spec("scaleX", K::Number, "transform", "scaleX"),
    spec("scaleY", K::Number, "transform", "scaleY"),
    spec("scaleZ", K::Number, "transform", "scaleZ"),
    spec("rotate", K::Number, "transform", "rotate"),
    spec("rotateX", K::Number, "transform", "rotateX"),
    spec("rotateY", K::Number, "transform", "rotateY"),
    spec("rotateZ", K::Number, "transform", "rotateZ"),
    spec("skewX", K::Number, "transform", "skewX"),
    spec("skewY", K::Number, "transform", "skewY"),
    spec("transform-origin-x", K::Size, "transform", "transform-origin-x"),
    spec("transform-origin-y", K::Size, "transform", "transform-origin-y"),
    spec("transform-origin-z", K::Size, "transform", "transform-origin-z"),
    spec("transform-style", K::String, "transform", "transform-style"),
    spec("backface-visibility", K::String, "transform", "backface-visibility"),
    spec("perspective", K::Size, "parentPerspective", "perspective"),
    spec("perspective-origin-x", K::Size, "parentPerspective", "perspective-origin-x"),
    spec("perspective-origin-y", K::Size, "parentPerspective", "perspective-origin-y"),
];

pub const EASING_KEY_SUFFIX: &str = "_easing";

#[must_use]
pub fn property_spec(id: &str) -> Option<&'static PropertySpec> {
    PROPERTIES.iter().find(|spec| spec.id == id)
}

#[must_use]
pub fn property_kind(id: &str) -> Option<PropertyKind> {
    property_spec(id).map(|spec| spec.kind)
}

#[must_use]
pub fn easing_key(id: &str) -> String {
    format!("{id}{EASING_KEY_SUFFIX}")
}

#[must_use]
pub fn is_easing_key(key: &str) -> bool {
    key.ends_with(EASING_KEY_SUFFIX)
}

/// Play/pause state properties: never interpolated and only animated while the
/// element's media is playing.
#[must_use]
pub fn is_playback_state(id: &str) -> bool {
    matches!(id, "videoState" | "audioState")
}

/// Font sizes and text spacing, whose `%` is relative to the parent font size.
#[must_use]
pub fn is_font_size(id: &str) -> bool {
    matches!(id, "fontSize" | "letterSpacing" | "wordSpacing")
}

#[must_use]
pub fn default_payload(id: &str) -> Option<Payload> {
    let kind = property_kind(id)?;
    let px = |value| Payload::Size(Size::px(value));
    let payload = match id {
        "opacity" | "videoSpeed" | "audioVolume" | "scaleX" | "scaleY" | "scaleZ" => {
            Payload::Number(1.0)
        }
        "shadowAngle" | "textShadowAngle" => Payload::Number(90.0),
        "width" => Payload::Size(Size::new(100.0, SizeUnit::Pw)),
        "height" => Payload::Size(Size::new(100.0, SizeUnit::Ph)),
        "borderSize" => px(1.0),
        "shadowDistance" => px(5.0),
        "shadowBlur" => px(20.0),
        "shadowSpread" => px(4.0),
        "fontSize" => px(16.0),
        "lineHeight" => px(1.2),
        "textShadowDistance" => px(2.0),
        "textShadowBlur" => px(4.0),
        "transform-origin-x" | "transform-origin-y" | "perspective-origin-x"
        | "perspective-origin-y" => Payload::Size(Size::new(50.0, SizeUnit::Percent)),
        "bgEnabled" | "videoLoop" | "audioLoop" => Payload::Boolean(true),
        "bgColor" => Payload::ColorOrGradient(ColorOrGradient::Color(Color::BLACK)),
        "textColor" => Payload::ColorOrGradient(ColorOrGradient::Color(Color::WHITE)),
        "karaokeColor" => Payload::ColorOrGradient(ColorOrGradient::Color(Color::rgb(255, 0, 0))),
        "progressBgColor" => {
            Payload::ColorOrGradient(ColorOrGradient::Color(Color::rgb(220, 220, 220)))
        }
        "progressFillColor" => {
            Payload::ColorOrGradient(ColorOrGradient::Color(Color::rgb(0, 120, 215)))
        }
        "borderColor" => Payload::Color(Color::WHITE),
        "shadowColor" | "textShadowColor" => Payload::Color(Color::rgba(0, 0, 0, 0.5)),
        "fontFamily" => Payload::String("Arial".to_string()),
        "fontWeight" | "fontStyle" | "mixBlendMode" => Payload::String("normal".to_string()),
        "textAlign" => Payload::String("left".to_string()),
        "objectFit" => Payload::String("cover".to_string()),
        "transform-style" => Payload::String("flat".to_string()),
        "backface-visibility" => Payload::String("visible".to_string()),
        "videoState" | "audioState" => Payload::DynamicString(DynamicString::new("paused")),
        _ => Payload::default_for(kind),
    };
    Some(payload)
}
