//! Pattern resources, ISO 32000-1 §8.7.3.

use crate::error::{PdfError, Result};
use crate::graphics::shadings::Shading;
use crate::objects::{Dictionary, Object};

/// Tiling type for tiling patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilingType {
    ConstantSpacing,
    NoDistortion,
    ConstantSpacingFaster,
}

impl TilingType {
    fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(TilingType::ConstantSpacing),
            2 => Some(TilingType::NoDistortion),
            3 => Some(TilingType::ConstantSpacingFaster),
            _ => None,
        }
    }
}

/// Paint type for tiling patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintType {
    Colored,
    Uncolored,
}

impl PaintType {
    fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(PaintType::Colored),
            2 => Some(PaintType::Uncolored),
            _ => None,
        }
    }
}

/// A pattern decoded from a pattern dictionary.
#[derive(Debug, Clone)]
pub enum Pattern {
    Tiling(TilingPattern),
    Shading(ShadingPattern),
}

/// Tiling pattern (pattern type 1).
#[derive(Debug, Clone)]
pub struct TilingPattern {
    dict: Dictionary,
    pub paint_type: PaintType,
    pub tiling_type: TilingType,
    pub bbox: [f64; 4],
    pub x_step: f64,
    pub y_step: f64,
    pub matrix: [f64; 6],
}

/// Shading pattern (pattern type 2).
#[derive(Debug, Clone)]
pub struct ShadingPattern {
    dict: Dictionary,
    pub shading: Option<Shading>,
    pub matrix: [f64; 6],
}

const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

fn matrix_from(dict: &Dictionary) -> [f64; 6] {
    let Some(array) = dict.get("Matrix").and_then(Object::as_array) else {
        return IDENTITY;
    };
    let values: Vec<f64> = array.iter().filter_map(Object::as_real).collect();
    match <[f64; 6]>::try_from(values) {
        Ok(matrix) => matrix,
        Err(_) => IDENTITY,
    }
}

fn bbox_from(dict: &Dictionary) -> Result<[f64; 4]> {
    let array = dict
        .get("BBox")
        .and_then(Object::as_array)
        .ok_or_else(|| PdfError::PatternError("tiling pattern has no BBox".to_string()))?;
    let values: Vec<f64> = array.iter().filter_map(Object::as_real).collect();
    <[f64; 4]>::try_from(values)
        .map_err(|_| PdfError::PatternError("tiling pattern BBox is not 4 numbers".to_string()))
}

impl Pattern {
    /// Decodes a pattern, dispatching on `PatternType`.
    pub fn from_dict(dict: &Dictionary) -> Result<Pattern> {
        match dict.get_integer("PatternType") {
            Some(1) => Ok(Pattern::Tiling(TilingPattern::from_dict(dict)?)),
            Some(2) => Ok(Pattern::Shading(ShadingPattern::from_dict(dict)?)),
            Some(other) => Err(PdfError::PatternError(format!(
                "unknown pattern type: {other}"
            ))),
            None => Err(PdfError::PatternError(
                "pattern dictionary has no PatternType".to_string(),
            )),
        }
    }

    pub fn dict(&self) -> &Dictionary {
        match self {
            Pattern::Tiling(p) => &p.dict,
            Pattern::Shading(p) => &p.dict,
        }
    }

    pub(crate) fn to_object(&self) -> Object {
        Object::Dictionary(self.dict().clone())
    }
}

impl TilingPattern {
    fn from_dict(dict: &Dictionary) -> Result<TilingPattern> {
        let paint_type = dict
            .get_integer("PaintType")
            .and_then(PaintType::from_value)
            .ok_or_else(|| PdfError::PatternError("invalid or missing PaintType".to_string()))?;
        let tiling_type = dict
            .get_integer("TilingType")
            .and_then(TilingType::from_value)
            .ok_or_else(|| PdfError::PatternError("invalid or missing TilingType".to_string()))?;

        Ok(TilingPattern {
            bbox: bbox_from(dict)?,
            x_step: dict.get_real("XStep").unwrap_or(0.0),
            y_step: dict.get_real("YStep").unwrap_or(0.0),
            matrix: matrix_from(dict),
            dict: dict.clone(),
            paint_type,
            tiling_type,
        })
    }
}

impl ShadingPattern {
    fn from_dict(dict: &Dictionary) -> Result<ShadingPattern> {
        // The Shading entry may be an indirect reference; only inline
        // dictionaries are decoded here.
        let shading = match dict.get("Shading").and_then(Object::as_dict) {
            Some(sub) => Some(Shading::from_dict(sub)?),
            None => None,
        };

        Ok(ShadingPattern {
            matrix: matrix_from(dict),
            dict: dict.clone(),
            shading,
        })
    }
}
