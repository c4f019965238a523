use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid object reference: {0}")]
    InvalidReference(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Color space error: {0}")]
    ColorSpaceError(String),

    #[error("Pattern error: {0}")]
    PatternError(String),

    #[error("Shading error: {0}")]
    ShadingError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_error_display() {
        let error = PdfError::InvalidStructure("corrupted dictionary".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid PDF structure: corrupted dictionary"
        );

        let error = PdfError::FontError("missing Subtype".to_string());
        assert_eq!(error.to_string(), "Font error: missing Subtype");

        let error = PdfError::ColorSpaceError("unknown family".to_string());
        assert_eq!(error.to_string(), "Color space error: unknown family");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let pdf_error = PdfError::from(io_error);

        match pdf_error {
            PdfError::Io(ref err) => assert_eq!(err.kind(), ErrorKind::NotFound),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_all_variants_display() {
        let errors = vec![
            PdfError::InvalidStructure("structure".to_string()),
            PdfError::InvalidReference("12 0 R".to_string()),
            PdfError::FontError("font".to_string()),
            PdfError::ColorSpaceError("color space".to_string()),
            PdfError::PatternError("pattern".to_string()),
            PdfError::ShadingError("shading".to_string()),
            PdfError::InvalidImage("image".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PdfError>();
    }
}
