//! Extended graphics state (ExtGState) dictionaries, ISO 32000-1 §8.4.5.

use crate::objects::{Dictionary, Object, ObjectId};

/// Rendering intent values according to ISO 32000-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderingIntent {
    AbsoluteColorimetric,
    RelativeColorimetric,
    Saturation,
    Perceptual,
}

impl RenderingIntent {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AbsoluteColorimetric" => Some(RenderingIntent::AbsoluteColorimetric),
            "RelativeColorimetric" => Some(RenderingIntent::RelativeColorimetric),
            "Saturation" => Some(RenderingIntent::Saturation),
            "Perceptual" => Some(RenderingIntent::Perceptual),
            _ => None,
        }
    }

    pub fn pdf_name(&self) -> &'static str {
        match self {
            RenderingIntent::AbsoluteColorimetric => "AbsoluteColorimetric",
            RenderingIntent::RelativeColorimetric => "RelativeColorimetric",
            RenderingIntent::Saturation => "Saturation",
            RenderingIntent::Perceptual => "Perceptual",
        }
    }
}

/// Blend modes for transparency groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    SoftLight,
    HardLight,
    ColorDodge,
    ColorBurn,
    Darken,
    Lighten,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            // Compatible is a deprecated alias for Normal
            "Normal" | "Compatible" => Some(BlendMode::Normal),
            "Multiply" => Some(BlendMode::Multiply),
            "Screen" => Some(BlendMode::Screen),
            "Overlay" => Some(BlendMode::Overlay),
            "SoftLight" => Some(BlendMode::SoftLight),
            "HardLight" => Some(BlendMode::HardLight),
            "ColorDodge" => Some(BlendMode::ColorDodge),
            "ColorBurn" => Some(BlendMode::ColorBurn),
            "Darken" => Some(BlendMode::Darken),
            "Lighten" => Some(BlendMode::Lighten),
            "Difference" => Some(BlendMode::Difference),
            "Exclusion" => Some(BlendMode::Exclusion),
            "Hue" => Some(BlendMode::Hue),
            "Saturation" => Some(BlendMode::Saturation),
            "Color" => Some(BlendMode::Color),
            "Luminosity" => Some(BlendMode::Luminosity),
            _ => None,
        }
    }
}

/// Line cap styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(LineCap::Butt),
            1 => Some(LineCap::Round),
            2 => Some(LineCap::Square),
            _ => None,
        }
    }
}

/// Line join styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(LineJoin::Miter),
            1 => Some(LineJoin::Round),
            2 => Some(LineJoin::Bevel),
            _ => None,
        }
    }
}

/// Line dash pattern: dash/gap lengths plus phase offset.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDashPattern {
    pub array: Vec<f64>,
    pub phase: f64,
}

impl LineDashPattern {
    pub fn solid() -> Self {
        Self {
            array: Vec::new(),
            phase: 0.0,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
    }
}

/// An extended graphics state decoded from an `ExtGState` dictionary.
///
/// Construction never fails: unknown or malformed parameters are left
/// unset, which is how consumers treat an ExtGState that simply does
/// not mention them.
#[derive(Debug, Clone)]
pub struct ExtGState {
    dict: Dictionary,
    line_width: Option<f64>,
    line_cap: Option<LineCap>,
    line_join: Option<LineJoin>,
    miter_limit: Option<f64>,
    dash_pattern: Option<LineDashPattern>,
    rendering_intent: Option<RenderingIntent>,
    blend_mode: Option<BlendMode>,
    stroke_alpha: Option<f64>,
    fill_alpha: Option<f64>,
    alpha_is_shape: Option<bool>,
    font: Option<(ObjectId, f64)>,
}

impl ExtGState {
    pub fn from_dict(dict: &Dictionary) -> ExtGState {
        let dash_pattern = dict.get("D").and_then(Object::as_array).and_then(|d| {
            let array = d.first()?.as_array()?;
            Some(LineDashPattern {
                array: array.iter().filter_map(Object::as_real).collect(),
                phase: d.get(1).and_then(Object::as_real).unwrap_or(0.0),
            })
        });

        let blend_mode = match dict.get("BM") {
            Some(Object::Name(name)) => BlendMode::from_name(name),
            // An array lists fallbacks; the first recognized one wins.
            Some(Object::Array(names)) => names
                .iter()
                .filter_map(Object::as_name)
                .find_map(BlendMode::from_name),
            _ => None,
        };

        let font = dict.get("Font").and_then(Object::as_array).and_then(|f| {
            let id = f.first()?.as_reference()?;
            let size = f.get(1)?.as_real()?;
            Some((id, size))
        });

        ExtGState {
            dict: dict.clone(),
            line_width: dict.get_real("LW"),
            line_cap: dict.get_integer("LC").and_then(LineCap::from_value),
            line_join: dict.get_integer("LJ").and_then(LineJoin::from_value),
            miter_limit: dict.get_real("ML"),
            dash_pattern,
            rendering_intent: dict.get_name("RI").and_then(RenderingIntent::from_name),
            blend_mode,
            stroke_alpha: dict.get_real("CA"),
            fill_alpha: dict.get_real("ca"),
            alpha_is_shape: dict.get("AIS").and_then(Object::as_bool),
            font,
        }
    }

    pub fn line_width(&self) -> Option<f64> {
        self.line_width
    }

    pub fn line_cap(&self) -> Option<LineCap> {
        self.line_cap
    }

    pub fn line_join(&self) -> Option<LineJoin> {
        self.line_join
    }

    pub fn miter_limit(&self) -> Option<f64> {
        self.miter_limit
    }

    pub fn dash_pattern(&self) -> Option<&LineDashPattern> {
        self.dash_pattern.as_ref()
    }

    pub fn rendering_intent(&self) -> Option<RenderingIntent> {
        self.rendering_intent
    }

    pub fn blend_mode(&self) -> Option<BlendMode> {
        self.blend_mode
    }

    pub fn stroke_alpha(&self) -> Option<f64> {
        self.stroke_alpha
    }

    pub fn fill_alpha(&self) -> Option<f64> {
        self.fill_alpha
    }

    pub fn alpha_is_shape(&self) -> Option<bool> {
        self.alpha_is_shape
    }

    /// Font reference and size from the `Font` entry, if present.
    pub fn font(&self) -> Option<(ObjectId, f64)> {
        self.font
    }

    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    pub(crate) fn to_object(&self) -> Object {
        Object::Dictionary(self.dict.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dict_leaves_all_unset() {
        let state = ExtGState::from_dict(&Dictionary::new());
        assert!(state.line_width().is_none());
        assert!(state.blend_mode().is_none());
        assert!(state.dash_pattern().is_none());
        assert!(state.fill_alpha().is_none());
        assert!(state.font().is_none());
    }

    #[test]
    fn test_line_parameters() {
        let mut dict = Dictionary::new();
        dict.set("LW", Object::Real(2.5));
        dict.set("LC", 1);
        dict.set("LJ", 2);
        dict.set("ML", 10);

        let state = ExtGState::from_dict(&dict);
        assert_eq!(state.line_width(), Some(2.5));
        assert_eq!(state.line_cap(), Some(LineCap::Round));
        assert_eq!(state.line_join(), Some(LineJoin::Bevel));
        assert_eq!(state.miter_limit(), Some(10.0));
    }

    #[test]
    fn test_alpha_and_intent() {
        let mut dict = Dictionary::new();
        dict.set("CA", Object::Real(0.7));
        dict.set("ca", Object::Real(0.3));
        dict.set("RI", Object::Name("Perceptual".to_string()));
        dict.set("AIS", false);

        let state = ExtGState::from_dict(&dict);
        assert_eq!(state.stroke_alpha(), Some(0.7));
        assert_eq!(state.fill_alpha(), Some(0.3));
        assert_eq!(state.rendering_intent(), Some(RenderingIntent::Perceptual));
        assert_eq!(state.alpha_is_shape(), Some(false));
    }

    #[test]
    fn test_dash_pattern() {
        let mut dict = Dictionary::new();
        dict.set(
            "D",
            Object::Array(vec![
                Object::Array(vec![Object::Integer(3), Object::Integer(1)]),
                Object::Integer(2),
            ]),
        );

        let state = ExtGState::from_dict(&dict);
        let dash = state.dash_pattern().unwrap();
        assert_eq!(dash.array, vec![3.0, 1.0]);
        assert_eq!(dash.phase, 2.0);
        assert!(!dash.is_solid());
        assert!(LineDashPattern::solid().is_solid());
    }

    #[test]
    fn test_blend_mode_name_and_array() {
        let mut dict = Dictionary::new();
        dict.set("BM", Object::Name("Multiply".to_string()));
        assert_eq!(
            ExtGState::from_dict(&dict).blend_mode(),
            Some(BlendMode::Multiply)
        );

        dict.set(
            "BM",
            Object::Array(vec![
                Object::Name("NotAMode".to_string()),
                Object::Name("Screen".to_string()),
            ]),
        );
        assert_eq!(
            ExtGState::from_dict(&dict).blend_mode(),
            Some(BlendMode::Screen)
        );
    }

    #[test]
    fn test_compatible_aliases_normal() {
        assert_eq!(BlendMode::from_name("Compatible"), Some(BlendMode::Normal));
    }

    #[test]
    fn test_malformed_values_ignored() {
        let mut dict = Dictionary::new();
        dict.set("LC", 9);
        dict.set("LW", Object::Name("wide".to_string()));
        dict.set("BM", Object::Name("Vivid".to_string()));

        let state = ExtGState::from_dict(&dict);
        assert!(state.line_cap().is_none());
        assert!(state.line_width().is_none());
        assert!(state.blend_mode().is_none());
    }

    #[test]
    fn test_font_entry() {
        let mut dict = Dictionary::new();
        dict.set(
            "Font",
            Object::Array(vec![
                Object::Reference(ObjectId::new(8, 0)),
                Object::Integer(12),
            ]),
        );

        let state = ExtGState::from_dict(&dict);
        assert_eq!(state.font(), Some((ObjectId::new(8, 0), 12.0)));
    }

    #[test]
    fn test_keeps_source_dictionary() {
        let mut dict = Dictionary::new();
        dict.set("LW", 1);
        let state = ExtGState::from_dict(&dict);
        assert_eq!(state.to_object(), Object::Dictionary(dict));
    }
}
