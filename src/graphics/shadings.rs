//! Shading resources, ISO 32000-1 §8.7.4.

use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object};

/// Shading type enumeration according to ISO 32000-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingType {
    FunctionBased,
    Axial,
    Radial,
    FreeFormGouraud,
    LatticeFormGouraud,
    CoonsPatch,
    TensorProductPatch,
}

impl ShadingType {
    fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(ShadingType::FunctionBased),
            2 => Some(ShadingType::Axial),
            3 => Some(ShadingType::Radial),
            4 => Some(ShadingType::FreeFormGouraud),
            5 => Some(ShadingType::LatticeFormGouraud),
            6 => Some(ShadingType::CoonsPatch),
            7 => Some(ShadingType::TensorProductPatch),
            _ => None,
        }
    }
}

/// A shading decoded from a shading dictionary.
#[derive(Debug, Clone)]
pub struct Shading {
    dict: Dictionary,
    shading_type: ShadingType,
    color_space: Option<String>,
    coords: Vec<f64>,
    extend: (bool, bool),
    background: Vec<f64>,
}

impl Shading {
    pub fn from_dict(dict: &Dictionary) -> Result<Shading> {
        let shading_type = dict
            .get_integer("ShadingType")
            .ok_or_else(|| {
                PdfError::ShadingError("shading dictionary has no ShadingType".to_string())
            })
            .and_then(|value| {
                ShadingType::from_value(value)
                    .ok_or_else(|| PdfError::ShadingError(format!("unknown shading type: {value}")))
            })?;

        let coords = match dict.get("Coords").and_then(Object::as_array) {
            Some(array) => array.iter().filter_map(Object::as_real).collect(),
            None => Vec::new(),
        };

        let extend = match dict.get("Extend").and_then(Object::as_array) {
            Some(array) => (
                array.first().and_then(Object::as_bool).unwrap_or(false),
                array.get(1).and_then(Object::as_bool).unwrap_or(false),
            ),
            None => (false, false),
        };

        let background = match dict.get("Background").and_then(Object::as_array) {
            Some(array) => array.iter().filter_map(Object::as_real).collect(),
            None => Vec::new(),
        };

        Ok(Shading {
            dict: dict.clone(),
            shading_type,
            color_space: dict.get_name("ColorSpace").map(str::to_string),
            coords,
            extend,
            background,
        })
    }

    pub fn shading_type(&self) -> ShadingType {
        self.shading_type
    }

    /// Color space family name, when given as a name entry.
    pub fn color_space(&self) -> Option<&str> {
        self.color_space.as_deref()
    }

    /// Geometry coordinates: 4 numbers for axial, 6 for radial shadings.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn extend(&self) -> (bool, bool) {
        self.extend
    }

    pub fn background(&self) -> &[f64] {
        &self.background
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

    fn axial_dict() -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("ShadingType", 2);
        dict.set("ColorSpace", Object::Name("DeviceRGB".to_string()));
        dict.set(
            "Coords",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(100),
                Object::Integer(50),
            ]),
        );
        dict.set(
            "Extend",
            Object::Array(vec![Object::Boolean(true), Object::Boolean(false)]),
        );
        dict
    }

    #[test]
    fn test_axial_shading() {
        let shading = Shading::from_dict(&axial_dict()).unwrap();
        assert_eq!(shading.shading_type(), ShadingType::Axial);
        assert_eq!(shading.color_space(), Some("DeviceRGB"));
        assert_eq!(shading.coords(), &[0.0, 0.0, 100.0, 50.0]);
        assert_eq!(shading.extend(), (true, false));
        assert!(shading.background().is_empty());
    }

    #[test]
    fn test_radial_shading() {
        let mut dict = Dictionary::new();
        dict.set("ShadingType", 3);
        dict.set(
            "Coords",
            Object::Array(vec![
                Object::Integer(50),
                Object::Integer(50),
                Object::Integer(0),
                Object::Integer(50),
                Object::Integer(50),
                Object::Integer(40),
            ]),
        );

        let shading = Shading::from_dict(&dict).unwrap();
        assert_eq!(shading.shading_type(), ShadingType::Radial);
        assert_eq!(shading.coords().len(), 6);
        assert_eq!(shading.extend(), (false, false));
    }

    #[test]
    fn test_missing_shading_type() {
        let err = Shading::from_dict(&Dictionary::new()).unwrap_err();
        assert!(matches!(err, PdfError::ShadingError(_)));
    }

    #[test]
    fn test_unknown_shading_type() {
        let mut dict = Dictionary::new();
        dict.set("ShadingType", 9);
        let err = Shading::from_dict(&dict).unwrap_err();
        assert!(err.to_string().contains("unknown shading type"));
    }

    #[test]
    fn test_background() {
        let mut dict = axial_dict();
        dict.set(
            "Background",
            Object::Array(vec![
                Object::Real(1.0),
                Object::Real(0.0),
                Object::Real(0.0),
            ]),
        );
        let shading = Shading::from_dict(&dict).unwrap();
        assert_eq!(shading.background(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_keeps_source_dictionary() {
        let dict = axial_dict();
        let shading = Shading::from_dict(&dict).unwrap();
        assert_eq!(shading.to_object(), Object::Dictionary(dict));
    }
}
