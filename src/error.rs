//! Error types for nameplot.
//!
//! This module defines a single error enum covering every failure a render can
//! hit. Variants group into three kinds (configuration, resource, render) via
//! [`NamePlotError::kind`], so callers can react to the category without
//! matching every variant.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for nameplot operations.
#[derive(Error, Debug)]
pub enum NamePlotError {
    /// Inconsistent or invalid parameter combination
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A single parameter failed validation
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Requested data (column, coordinate) is not present
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file or directory could not be read or written
    #[error("Resource error: {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors without an associated path
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure inside the mapping capability
    #[error("Render error: {message}")]
    Render { message: String },

    /// Image decoding/encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Coarse error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input parameters or data selection
    Configuration,
    /// Filesystem failures
    Resource,
    /// Failures inside the mapping capability
    Render,
}

impl NamePlotError {
    /// Get the category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            NamePlotError::Configuration { .. }
            | NamePlotError::InvalidParameter { .. }
            | NamePlotError::DataNotFound { .. }
            | NamePlotError::Json(_) => ErrorKind::Configuration,
            NamePlotError::Resource { .. } | NamePlotError::Io(_) => ErrorKind::Resource,
            NamePlotError::Image(image::ImageError::IoError(_)) => ErrorKind::Resource,
            NamePlotError::Render { .. } | NamePlotError::Image(_) => ErrorKind::Render,
        }
    }

    /// Wrap an IO error with the path it concerns
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NamePlotError::Resource {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for an invalid parameter error
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        NamePlotError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with NamePlotError
pub type Result<T> = std::result::Result<T, NamePlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = NamePlotError::Configuration {
            message: "bad".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = NamePlotError::invalid("colormap", "Unknown colormap: foo");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: colormap - Unknown colormap: foo"
        );

        let err = NamePlotError::resource(
            "zones.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert!(err.to_string().contains("zones.txt"));

        let err = NamePlotError::Render {
            message: "no canvas".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Render);
    }

    #[test]
    fn test_image_io_errors_are_resource_errors() {
        let err = NamePlotError::Image(image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert_eq!(err.kind(), ErrorKind::Resource);
    }
}
