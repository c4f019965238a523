mod color;
mod patterns;
mod shadings;
mod state;
mod xobject;

pub use color::ColorSpace;
pub use patterns::{PaintType, Pattern, ShadingPattern, TilingPattern, TilingType};
pub use shadings::{Shading, ShadingType};
pub use state::{BlendMode, ExtGState, LineCap, LineDashPattern, LineJoin, RenderingIntent};
pub use xobject::{FormXObject, ImageXObject, XObject};
