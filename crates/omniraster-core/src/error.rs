//! Error types for omniraster

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RasterError>;

/// Main error type for omniraster
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Renderer not found: {0}")]
    RendererNotFound(String),

    #[error("Invalid geometry: {bytes_per_row} bytes per row, {num_rows} rows")]
    InvalidGeometry { bytes_per_row: usize, num_rows: usize },

    #[error("Style buffer length {style} does not match data length {data}")]
    StyleLengthMismatch { data: usize, style: usize },

    #[error("Invalid drawing codes: {0}")]
    InvalidDrawingCodes(String),

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Format not supported: {0}")]
    FormatNotSupported(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
