use std::io;

use crate::icontype::OSType;
use crate::pipeline::SkippedTarget;

/// Errors produced while building an icon container.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source bytes are not a supported raster format, or are corrupt.
    #[error("failed to decode source image: {0}")]
    Decode(String),

    /// Resampling the source to a target size failed.
    #[error("failed to resample to {size}x{size}: {reason}")]
    Resample {
        /// The requested edge length, in pixels.
        size: u32,
        /// What went wrong.
        reason: String,
    },

    /// The chunk codec rejected a bitmap.
    #[error("failed to encode icon data: {0}")]
    Encode(String),

    /// The target table is malformed (duplicate tags, non-decreasing or
    /// zero sizes).
    #[error("invalid target table: {0}")]
    InvalidTargets(String),

    /// Every target was skipped, so the container would hold no icons.
    #[error("no icon could be generated ({} target(s) skipped)", .skipped.len())]
    NoIcons {
        /// The per-target failures, in table order.
        skipped: Vec<SkippedTarget>,
    },
}

impl Error {
    /// Returns the type tags of the targets that were skipped, if this is a
    /// `NoIcons` error; otherwise an empty list.
    pub fn skipped_ostypes(&self) -> Vec<OSType> {
        match self {
            Error::NoIcons { skipped } => {
                skipped.iter().map(|s| s.target.ostype).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        let kind = match &err {
            Error::Decode(_) => io::ErrorKind::InvalidData,
            Error::InvalidTargets(_) => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

/// A specialized `Result` type for icon building.
pub type Result<T> = std::result::Result<T, Error>;
