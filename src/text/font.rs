//! Font resources decoded from font dictionaries.

use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object};
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref DEFAULT_GLYPHS: HashMap<String, char> = {
        let mut map = HashMap::new();
        for c in 'A'..='Z' {
            map.insert(c.to_string(), c);
        }
        for c in 'a'..='z' {
            map.insert(c.to_string(), c);
        }
        let digits = [
            ("zero", '0'),
            ("one", '1'),
            ("two", '2'),
            ("three", '3'),
            ("four", '4'),
            ("five", '5'),
            ("six", '6'),
            ("seven", '7'),
            ("eight", '8'),
            ("nine", '9'),
        ];
        let punctuation = [
            ("space", ' '),
            ("exclam", '!'),
            ("quotedbl", '"'),
            ("numbersign", '#'),
            ("dollar", '$'),
            ("percent", '%'),
            ("ampersand", '&'),
            ("quotesingle", '\''),
            ("parenleft", '('),
            ("parenright", ')'),
            ("asterisk", '*'),
            ("plus", '+'),
            ("comma", ','),
            ("hyphen", '-'),
            ("period", '.'),
            ("slash", '/'),
            ("colon", ':'),
            ("semicolon", ';'),
            ("less", '<'),
            ("equal", '='),
            ("greater", '>'),
            ("question", '?'),
            ("at", '@'),
            ("bracketleft", '['),
            ("backslash", '\\'),
            ("bracketright", ']'),
            ("underscore", '_'),
            ("braceleft", '{'),
            ("bar", '|'),
            ("braceright", '}'),
        ];
        for (name, c) in digits.into_iter().chain(punctuation) {
            map.insert(name.to_string(), c);
        }
        map
    };
}

/// Glyph-name to Unicode mapping, optionally extended by the caller.
#[derive(Debug, Clone, Default)]
pub struct GlyphList {
    custom: HashMap<String, char>,
}

impl GlyphList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overrides a mapping on top of the built-in table.
    pub fn add(&mut self, name: impl Into<String>, value: char) {
        self.custom.insert(name.into(), value);
    }

    /// Looks up a glyph name, consulting custom entries first, then the
    /// built-in table, then the `uniXXXX` naming convention.
    pub fn to_unicode(&self, name: &str) -> Option<char> {
        if let Some(c) = self.custom.get(name) {
            return Some(*c);
        }
        if let Some(c) = DEFAULT_GLYPHS.get(name) {
            return Some(*c);
        }
        if let Some(hex) = name.strip_prefix("uni") {
            if hex.len() == 4 {
                if let Ok(code) = u32::from_str_radix(hex, 16) {
                    return char::from_u32(code);
                }
            }
        }
        None
    }
}

/// Font subtypes understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontType {
    Type0,
    Type1,
    MmType1,
    TrueType,
    Type3,
}

impl FontType {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Type0" => Some(FontType::Type0),
            "Type1" => Some(FontType::Type1),
            "MMType1" => Some(FontType::MmType1),
            "TrueType" => Some(FontType::TrueType),
            "Type3" => Some(FontType::Type3),
            _ => None,
        }
    }
}

/// A font decoded from a font dictionary.
///
/// Keeps the originating dictionary so the font can be written back
/// into a resource dictionary unchanged.
#[derive(Debug, Clone)]
pub struct Font {
    dict: Dictionary,
    subtype: FontType,
    base_font: Option<String>,
    first_char: Option<i64>,
    last_char: Option<i64>,
    widths: Vec<f64>,
    glyph_list: GlyphList,
}

impl Font {
    /// Decodes a font from its dictionary.
    ///
    /// A custom glyph list, when given, takes precedence over the
    /// built-in table for Unicode mapping.
    pub fn from_dict(dict: &Dictionary, glyph_list: Option<&GlyphList>) -> Result<Font> {
        let subtype_name = dict
            .get_name("Subtype")
            .ok_or_else(|| PdfError::FontError("font dictionary has no Subtype".to_string()))?;
        let subtype = FontType::from_name(subtype_name).ok_or_else(|| {
            PdfError::FontError(format!("unsupported font subtype: {subtype_name}"))
        })?;

        let widths = match dict.get("Widths").and_then(Object::as_array) {
            Some(array) => array.iter().filter_map(Object::as_real).collect(),
            None => Vec::new(),
        };

        Ok(Font {
            dict: dict.clone(),
            subtype,
            base_font: dict.get_name("BaseFont").map(str::to_string),
            first_char: dict.get_integer("FirstChar"),
            last_char: dict.get_integer("LastChar"),
            widths,
            glyph_list: glyph_list.cloned().unwrap_or_default(),
        })
    }

    pub fn subtype(&self) -> FontType {
        self.subtype
    }

    pub fn base_font(&self) -> Option<&str> {
        self.base_font.as_deref()
    }

    pub fn first_char(&self) -> Option<i64> {
        self.first_char
    }

    pub fn last_char(&self) -> Option<i64> {
        self.last_char
    }

    /// Glyph width for a character code, when the dictionary carries a
    /// `Widths` array covering it.
    pub fn width(&self, code: i64) -> Option<f64> {
        let first = self.first_char?;
        if code < first {
            return None;
        }
        self.widths.get((code - first) as usize).copied()
    }

    pub fn glyph_list(&self) -> &GlyphList {
        &self.glyph_list
    }

    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    pub(crate) fn to_object(&self) -> Object {
        Object::Dictionary(self.dict.clone())
    }
}
