//! United Colors effect
//!
//! Builds a signed delta matrix from a still image once, then blends it back
//! into the original at a user-chosen intensity every time the slider moves.

pub mod blend;
pub mod codec;
pub mod delta;
pub mod path;
pub mod raster;
pub mod session;

pub use blend::{Intensity, Overflow, UnitedColorsConfig, blend};
pub use codec::{ChannelMode, decode, default_output_path, encode};
pub use delta::DeltaMatrix;
pub use raster::Image;
pub use session::{EffectConfig, EffectSession, Previewer, SessionState};

use std::path::PathBuf;

pub type UnitedColorsResult<T> = Result<T, UnitedColorsError>;

#[derive(thiserror::Error, Debug)]
pub enum UnitedColorsError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no input file path given")]
    MissingInput,
    #[error("unsupported channel count {channels}, expected 3 or 4")]
    UnsupportedFormat { channels: usize },
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Preview error: {0}")]
    Preview(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Effect {
    fn apply(&self, image: Image) -> UnitedColorsResult<Image>;
}
