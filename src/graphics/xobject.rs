//! External objects (XObjects): images and forms.

use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object, ObjectStore};
use crate::resources::Resources;
use std::rc::Rc;

/// An external object decoded from an `XObject` stream.
#[derive(Debug)]
pub enum XObject {
    Image(ImageXObject),
    Form(FormXObject),
}

/// An image XObject. Pixel data stays encoded; decoding filters is the
/// concern of an image codec, not of resource management.
#[derive(Debug)]
pub struct ImageXObject {
    name: String,
    dict: Dictionary,
    data: Vec<u8>,
    width: i64,
    height: i64,
    bits_per_component: Option<i64>,
    color_space: Option<String>,
    filter: Option<String>,
}

/// A form XObject: a self-contained content stream with its own
/// resource dictionary.
#[derive(Debug)]
pub struct FormXObject {
    name: String,
    dict: Dictionary,
    data: Vec<u8>,
    bbox: Option<[f64; 4]>,
    store: Rc<ObjectStore>,
}

impl XObject {
    /// Decodes an XObject from its stream, dispatching on `Subtype`.
    ///
    /// `name` is the label the object is known by, already decorated
    /// with the object number for indirect entries.
    pub fn create(object: &Object, name: &str, store: &Rc<ObjectStore>) -> Result<XObject> {
        let Object::Stream(dict, data) = object else {
            return Err(PdfError::InvalidStructure(format!(
                "xobject {name} is not a stream"
            )));
        };

        match dict.get_name("Subtype") {
            Some("Image") => Ok(XObject::Image(ImageXObject::from_stream(
                name,
                dict,
                data.clone(),
            )?)),
            Some("Form") => Ok(XObject::Form(FormXObject {
                name: name.to_string(),
                bbox: bbox_from(dict),
                dict: dict.clone(),
                data: data.clone(),
                store: Rc::clone(store),
            })),
            Some(other) => Err(PdfError::InvalidStructure(format!(
                "unsupported xobject subtype: {other}"
            ))),
            None => Err(PdfError::InvalidStructure(format!(
                "xobject {name} has no Subtype"
            ))),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            XObject::Image(image) => &image.name,
            XObject::Form(form) => &form.name,
        }
    }

    pub fn dict(&self) -> &Dictionary {
        match self {
            XObject::Image(image) => &image.dict,
            XObject::Form(form) => &form.dict,
        }
    }

    pub fn as_image(&self) -> Option<&ImageXObject> {
        match self {
            XObject::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_form(&self) -> Option<&FormXObject> {
        match self {
            XObject::Form(form) => Some(form),
            _ => None,
        }
    }

    pub(crate) fn to_object(&self) -> Object {
        match self {
            XObject::Image(image) => Object::Stream(image.dict.clone(), image.data.clone()),
            XObject::Form(form) => Object::Stream(form.dict.clone(), form.data.clone()),
        }
    }
}

impl ImageXObject {
    fn from_stream(name: &str, dict: &Dictionary, data: Vec<u8>) -> Result<ImageXObject> {
        let width = dict
            .get_integer("Width")
            .ok_or_else(|| PdfError::InvalidImage(format!("image {name} has no Width")))?;
        let height = dict
            .get_integer("Height")
            .ok_or_else(|| PdfError::InvalidImage(format!("image {name} has no Height")))?;

        let filter = match dict.get("Filter") {
            Some(Object::Name(filter)) => Some(filter.clone()),
            Some(Object::Array(filters)) => filters
                .first()
                .and_then(Object::as_name)
                .map(str::to_string),
            _ => None,
        };

        Ok(ImageXObject {
            name: name.to_string(),
            dict: dict.clone(),
            data,
            width,
            height,
            bits_per_component: dict.get_integer("BitsPerComponent"),
            color_space: dict.get_name("ColorSpace").map(str::to_string),
            filter,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn bits_per_component(&self) -> Option<i64> {
        self.bits_per_component
    }

    pub fn color_space(&self) -> Option<&str> {
        self.color_space.as_deref()
    }

    /// First filter name, e.g. `DCTDecode` for JPEG-encoded data.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Raw, still-encoded image data.
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }
}

impl FormXObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bbox(&self) -> Option<[f64; 4]> {
        self.bbox
    }

    /// Raw content stream of the form.
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    /// Builds a registry over the form's own resource dictionary.
    ///
    /// The registry shares the document's object store; each call
    /// returns a fresh registry, so the form never owns a cache that
    /// could go stale behind the caller's back.
    pub fn resources(&self) -> Option<Resources> {
        let entry = self.dict.get("Resources")?;
        match self.store.resolve(entry) {
            Object::Dictionary(dict) => {
                Some(Resources::from_dict(dict.clone(), Rc::clone(&self.store)))
            }
            _ => None,
        }
    }
}

fn bbox_from(dict: &Dictionary) -> Option<[f64; 4]> {
    let array = dict.get("BBox").and_then(Object::as_array)?;
    let values: Vec<f64> = array.iter().filter_map(Object::as_real).collect();
    <[f64; 4]>::try_from(values).ok()
}
