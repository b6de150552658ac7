//! Error types for matbench-plot

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading results or writing the chart
#[derive(Error, Debug)]
pub enum PlotError {
    /// File could not be opened, read or written
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File the operation targeted
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV, missing column or non-numeric value
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Output path names an image format other than PNG or SVG
    #[error("Unsupported image format: {0} (expected png or svg)")]
    UnsupportedFormat(String),

    /// Framebuffer allocation or SVG embedding failed
    #[error("Render error: {0}")]
    Render(#[from] trueno_viz::Error),

    /// PNG encoder rejected the image
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

/// Result type alias for matbench-plot operations
pub type Result<T> = std::result::Result<T, PlotError>;
