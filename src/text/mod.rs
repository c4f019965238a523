mod font;

pub use font::{Font, FontType, GlyphList};
