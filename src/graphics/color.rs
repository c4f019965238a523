//! Color space resources, ISO 32000-1 §8.6.

use crate::error::{PdfError, Result};
use crate::graphics::Pattern;
use crate::objects::{Dictionary, Object};
use indexmap::IndexMap;
use std::rc::Rc;

/// A color space decoded from a name or array form.
#[derive(Debug, Clone)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
    CalGray(Dictionary),
    CalRgb(Dictionary),
    Lab(Dictionary),
    /// `N` channel count, available when the stream dictionary is inline.
    IccBased {
        components: Option<i64>,
        stream: Box<Object>,
    },
    Indexed {
        base: Box<ColorSpace>,
        hival: i64,
        lookup: Box<Object>,
    },
    Separation {
        name: String,
        alternate: Box<ColorSpace>,
        tint_transform: Box<Object>,
    },
    DeviceN {
        names: Vec<String>,
        alternate: Box<ColorSpace>,
        tint_transform: Box<Object>,
    },
    /// The pattern color space, carrying the patterns it can select.
    Pattern {
        underlying: Option<Box<ColorSpace>>,
        patterns: IndexMap<String, Rc<Pattern>>,
    },
}

impl ColorSpace {
    /// Decodes a color space from its name or array form.
    ///
    /// The pattern map is consulted only by the `Pattern` color space;
    /// callers materialize patterns before color spaces.
    pub fn create(
        object: &Object,
        patterns: Option<&IndexMap<String, Rc<Pattern>>>,
    ) -> Result<ColorSpace> {
        match object {
            Object::Name(name) => Self::from_name(name, patterns),
            Object::Array(elements) => Self::from_array(elements, patterns),
            other => Err(PdfError::ColorSpaceError(format!(
                "expected name or array, got {other:?}"
            ))),
        }
    }

    fn from_name(
        name: &str,
        patterns: Option<&IndexMap<String, Rc<Pattern>>>,
    ) -> Result<ColorSpace> {
        match name {
            "DeviceGray" | "G" => Ok(ColorSpace::DeviceGray),
            "DeviceRGB" | "RGB" => Ok(ColorSpace::DeviceRgb),
            "DeviceCMYK" | "CMYK" => Ok(ColorSpace::DeviceCmyk),
            "Pattern" => Ok(ColorSpace::Pattern {
                underlying: None,
                patterns: patterns.cloned().unwrap_or_default(),
            }),
            other => Err(PdfError::ColorSpaceError(format!(
                "unknown color space: {other}"
            ))),
        }
    }

    fn from_array(
        elements: &[Object],
        patterns: Option<&IndexMap<String, Rc<Pattern>>>,
    ) -> Result<ColorSpace> {
        let family = elements
            .first()
            .and_then(Object::as_name)
            .ok_or_else(|| PdfError::ColorSpaceError("empty color space array".to_string()))?;

        match family {
            "CalGray" => Ok(ColorSpace::CalGray(params_dict(elements, family)?)),
            "CalRGB" => Ok(ColorSpace::CalRgb(params_dict(elements, family)?)),
            "Lab" => Ok(ColorSpace::Lab(params_dict(elements, family)?)),
            "ICCBased" => {
                // The stream is usually indirect; channel count is only
                // available when it is inline.
                let stream = elements.get(1).cloned().unwrap_or(Object::Null);
                let components = stream.as_dict().and_then(|d| d.get_integer("N"));
                Ok(ColorSpace::IccBased {
                    components,
                    stream: Box::new(stream),
                })
            }
            "Indexed" | "I" => {
                let base = elements.get(1).ok_or_else(|| {
                    PdfError::ColorSpaceError("indexed color space has no base".to_string())
                })?;
                let hival = elements.get(2).and_then(Object::as_integer).ok_or_else(|| {
                    PdfError::ColorSpaceError("indexed color space has no hival".to_string())
                })?;
                let lookup = elements.get(3).cloned().unwrap_or(Object::Null);
                Ok(ColorSpace::Indexed {
                    base: Box::new(Self::create(base, patterns)?),
                    hival,
                    lookup: Box::new(lookup),
                })
            }
            "Separation" => {
                let name = elements.get(1).and_then(Object::as_name).ok_or_else(|| {
                    PdfError::ColorSpaceError("separation has no colorant name".to_string())
                })?;
                let alternate = elements.get(2).ok_or_else(|| {
                    PdfError::ColorSpaceError("separation has no alternate space".to_string())
                })?;
                let tint_transform = elements.get(3).cloned().unwrap_or(Object::Null);
                Ok(ColorSpace::Separation {
                    name: name.to_string(),
                    alternate: Box::new(Self::create(alternate, patterns)?),
                    tint_transform: Box::new(tint_transform),
                })
            }
            "DeviceN" => {
                let names = elements
                    .get(1)
                    .and_then(Object::as_array)
                    .ok_or_else(|| {
                        PdfError::ColorSpaceError("DeviceN has no colorant names".to_string())
                    })?
                    .iter()
                    .filter_map(Object::as_name)
                    .map(str::to_string)
                    .collect();
                let alternate = elements.get(2).ok_or_else(|| {
                    PdfError::ColorSpaceError("DeviceN has no alternate space".to_string())
                })?;
                let tint_transform = elements.get(3).cloned().unwrap_or(Object::Null);
                Ok(ColorSpace::DeviceN {
                    names,
                    alternate: Box::new(Self::create(alternate, patterns)?),
                    tint_transform: Box::new(tint_transform),
                })
            }
            "Pattern" => {
                let underlying = match elements.get(1) {
                    Some(base) => Some(Box::new(Self::create(base, patterns)?)),
                    None => None,
                };
                Ok(ColorSpace::Pattern {
                    underlying,
                    patterns: patterns.cloned().unwrap_or_default(),
                })
            }
            other => Err(PdfError::ColorSpaceError(format!(
                "unknown color space family: {other}"
            ))),
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRgb => "DeviceRGB",
            ColorSpace::DeviceCmyk => "DeviceCMYK",
            ColorSpace::CalGray(_) => "CalGray",
            ColorSpace::CalRgb(_) => "CalRGB",
            ColorSpace::Lab(_) => "Lab",
            ColorSpace::IccBased { .. } => "ICCBased",
            ColorSpace::Indexed { .. } => "Indexed",
            ColorSpace::Separation { .. } => "Separation",
            ColorSpace::DeviceN { .. } => "DeviceN",
            ColorSpace::Pattern { .. } => "Pattern",
        }
    }

    /// Rebuilds the name or array form this color space was decoded from.
    pub(crate) fn to_object(&self) -> Object {
        fn name(s: &str) -> Object {
            Object::Name(s.to_string())
        }
        match self {
            ColorSpace::DeviceGray | ColorSpace::DeviceRgb | ColorSpace::DeviceCmyk => {
                name(self.family())
            }
            ColorSpace::CalGray(params) | ColorSpace::CalRgb(params) | ColorSpace::Lab(params) => {
                Object::Array(vec![
                    name(self.family()),
                    Object::Dictionary(params.clone()),
                ])
            }
            ColorSpace::IccBased { stream, .. } => {
                Object::Array(vec![name("ICCBased"), (**stream).clone()])
            }
            ColorSpace::Indexed {
                base,
                hival,
                lookup,
            } => Object::Array(vec![
                name("Indexed"),
                base.to_object(),
                Object::Integer(*hival),
                (**lookup).clone(),
            ]),
            ColorSpace::Separation {
                name: colorant,
                alternate,
                tint_transform,
            } => Object::Array(vec![
                name("Separation"),
                Object::Name(colorant.clone()),
                alternate.to_object(),
                (**tint_transform).clone(),
            ]),
            ColorSpace::DeviceN {
                names,
                alternate,
                tint_transform,
            } => Object::Array(vec![
                name("DeviceN"),
                Object::Array(names.iter().map(|n| name(n)).collect()),
                alternate.to_object(),
                (**tint_transform).clone(),
            ]),
            ColorSpace::Pattern { underlying, .. } => match underlying {
                Some(base) => Object::Array(vec![name("Pattern"), base.to_object()]),
                None => name("Pattern"),
            },
        }
    }

    /// Number of color components, when the space has a fixed count.
    pub fn components(&self) -> Option<usize> {
        match self {
            ColorSpace::DeviceGray | ColorSpace::CalGray(_) => Some(1),
            ColorSpace::DeviceRgb | ColorSpace::CalRgb(_) | ColorSpace::Lab(_) => Some(3),
            ColorSpace::DeviceCmyk => Some(4),
            ColorSpace::IccBased { components, .. } => components.map(|n| n as usize),
            ColorSpace::Indexed { .. } | ColorSpace::Separation { .. } => Some(1),
            ColorSpace::DeviceN { names, .. } => Some(names.len()),
            ColorSpace::Pattern { .. } => None,
        }
    }
}

fn params_dict(elements: &[Object], family: &str) -> Result<Dictionary> {
    elements
        .get(1)
        .and_then(Object::as_dict)
        .cloned()
        .ok_or_else(|| {
            PdfError::ColorSpaceError(format!("{family} has no parameter dictionary"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_spaces_by_name() {
        for (name, family, n) in [
            ("DeviceGray", "DeviceGray", 1),
            ("G", "DeviceGray", 1),
            ("DeviceRGB", "DeviceRGB", 3),
            ("RGB", "DeviceRGB", 3),
            ("DeviceCMYK", "DeviceCMYK", 4),
            ("CMYK", "DeviceCMYK", 4),
        ] {
            let cs = ColorSpace::create(&Object::Name(name.to_string()), None).unwrap();
            assert_eq!(cs.family(), family);
            assert_eq!(cs.components(), Some(n));
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = ColorSpace::create(&Object::Name("DeviceHSV".to_string()), None).unwrap_err();
        assert!(matches!(err, PdfError::ColorSpaceError(_)));
    }

    #[test]
    fn test_wrong_object_type_fails() {
        assert!(ColorSpace::create(&Object::Integer(3), None).is_err());
    }

    #[test]
    fn test_indexed() {
        let array = Object::Array(vec![
            Object::Name("Indexed".to_string()),
            Object::Name("DeviceRGB".to_string()),
            Object::Integer(255),
            Object::String("lookup".to_string()),
        ]);

        let cs = ColorSpace::create(&array, None).unwrap();
        let ColorSpace::Indexed {
            ref base,
            hival,
            ref lookup,
        } = cs
        else {
            panic!("expected indexed color space");
        };
        assert_eq!(base.family(), "DeviceRGB");
        assert_eq!(hival, 255);
        assert_eq!(**lookup, Object::String("lookup".to_string()));
        assert_eq!(cs.to_object(), array);
    }

    #[test]
    fn test_indexed_missing_hival_fails() {
        let array = Object::Array(vec![
            Object::Name("Indexed".to_string()),
            Object::Name("DeviceRGB".to_string()),
        ]);
        assert!(ColorSpace::create(&array, None).is_err());
    }

    #[test]
    fn test_separation() {
        let array = Object::Array(vec![
            Object::Name("Separation".to_string()),
            Object::Name("Spot1".to_string()),
            Object::Name("DeviceCMYK".to_string()),
        ]);

        let cs = ColorSpace::create(&array, None).unwrap();
        let ColorSpace::Separation {
            name, alternate, ..
        } = cs
        else {
            panic!("expected separation color space");
        };
        assert_eq!(name, "Spot1");
        assert_eq!(alternate.family(), "DeviceCMYK");
    }

    #[test]
    fn test_name_form_round_trips() {
        let object = Object::Name("DeviceCMYK".to_string());
        let cs = ColorSpace::create(&object, None).unwrap();
        assert_eq!(cs.to_object(), object);
    }

    #[test]
    fn test_device_n() {
        let array = Object::Array(vec![
            Object::Name("DeviceN".to_string()),
            Object::Array(vec![
                Object::Name("Cyan".to_string()),
                Object::Name("Magenta".to_string()),
            ]),
            Object::Name("DeviceCMYK".to_string()),
        ]);

        let cs = ColorSpace::create(&array, None).unwrap();
        assert_eq!(cs.family(), "DeviceN");
        assert_eq!(cs.components(), Some(2));
    }

    #[test]
    fn test_icc_based_inline_components() {
        let mut params = Dictionary::new();
        params.set("N", 4);
        let array = Object::Array(vec![
            Object::Name("ICCBased".to_string()),
            Object::Dictionary(params),
        ]);

        let cs = ColorSpace::create(&array, None).unwrap();
        assert_eq!(cs.components(), Some(4));
        assert_eq!(cs.to_object(), array);
    }

    #[test]
    fn test_icc_based_indirect_stream() {
        let array = Object::Array(vec![
            Object::Name("ICCBased".to_string()),
            Object::Reference(crate::objects::ObjectId::new(9, 0)),
        ]);

        let cs = ColorSpace::create(&array, None).unwrap();
        assert_eq!(cs.components(), None);
        assert_eq!(cs.to_object(), array);
    }

    #[test]
    fn test_cal_spaces_require_params() {
        let array = Object::Array(vec![Object::Name("CalRGB".to_string())]);
        assert!(ColorSpace::create(&array, None).is_err());

        let mut params = Dictionary::new();
        params.set(
            "WhitePoint",
            Object::Array(vec![
                Object::Real(0.9505),
                Object::Real(1.0),
                Object::Real(1.089),
            ]),
        );
        let array = Object::Array(vec![
            Object::Name("CalRGB".to_string()),
            Object::Dictionary(params),
        ]);
        let cs = ColorSpace::create(&array, None).unwrap();
        assert_eq!(cs.family(), "CalRGB");
        assert_eq!(cs.components(), Some(3));
    }

    #[test]
    fn test_pattern_space_carries_patterns() {
        let mut tiling = Dictionary::new();
        tiling.set("PatternType", 2);
        let mut patterns = IndexMap::new();
        patterns.insert(
            "P0".to_string(),
            Rc::new(Pattern::from_dict(&tiling).unwrap()),
        );

        let cs = ColorSpace::create(&Object::Name("Pattern".to_string()), Some(&patterns)).unwrap();
        let ColorSpace::Pattern {
            underlying,
            patterns,
        } = cs
        else {
            panic!("expected pattern color space");
        };
        assert!(underlying.is_none());
        assert!(patterns.contains_key("P0"));
    }

    #[test]
    fn test_pattern_space_with_underlying() {
        let array = Object::Array(vec![
            Object::Name("Pattern".to_string()),
            Object::Name("DeviceRGB".to_string()),
        ]);
        let cs = ColorSpace::create(&array, None).unwrap();
        let ColorSpace::Pattern { underlying, .. } = cs else {
            panic!("expected pattern color space");
        };
        assert_eq!(underlying.map(|u| u.family()), Some("DeviceRGB"));
    }
}
