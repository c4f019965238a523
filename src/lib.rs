//! # patina-pdf
//!
//! A pure Rust library for working with PDF resource dictionaries: the named
//! fonts, images, color spaces, graphics states, patterns, shadings, and
//! marked-content properties a content stream draws with.
//!
//! ## Features
//!
//! - **Resource Registry**: Typed, lazily materialized views over a resource
//!   dictionary, with caching and name/identity bookkeeping
//! - **Resource Types**: Fonts, image and form XObjects, color spaces,
//!   graphics state parameters, patterns, and shadings
//! - **Object Model**: PDF primitive objects, ordered dictionaries, and an
//!   object store that resolves indirect references
//! - **Nested Resources**: Form XObjects expose their own registries over the
//!   shared object store
//! - **Pure Rust**: No C dependencies or external libraries
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use patina_pdf::{Dictionary, Font, Object, Resources, Result};
//!
//! # fn main() -> Result<()> {
//! let mut resources = Resources::new();
//!
//! // Register a font; the registry picks the next free name
//! let mut dict = Dictionary::new();
//! dict.set("Subtype", Object::Name("Type1".to_string()));
//! dict.set("BaseFont", Object::Name("Helvetica".to_string()));
//! let helvetica = Rc::new(Font::from_dict(&dict, None)?);
//!
//! let name = resources.add_font(Rc::clone(&helvetica))?;
//! assert_eq!(name, "F0");
//!
//! // Adding the same font again reuses the existing name
//! assert_eq!(resources.add_font(helvetica)?, "F0");
//!
//! // The backing dictionary mirrors every registration
//! let fonts = resources.dict().get_dict("Font").unwrap();
//! assert!(fonts.contains_key("F0"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graphics;
pub mod objects;
pub mod resources;
pub mod text;

pub use error::{PdfError, Result};
pub use graphics::{
    BlendMode, ColorSpace, ExtGState, FormXObject, ImageXObject, LineCap, LineDashPattern,
    LineJoin, PaintType, Pattern, RenderingIntent, Shading, ShadingPattern, ShadingType,
    TilingPattern, TilingType, XObject,
};
pub use objects::{Dictionary, Object, ObjectId, ObjectStore};
pub use resources::{PropertyList, ResourceKind, Resources};
pub use text::{Font, FontType, GlyphList};
