//! Library for building Apple Icon Image (.icns) files from a single source
//! image.
//!
//! The source (PNG, or JPEG 2000 with the `jp2io` feature) is decoded once,
//! resampled to each size in a target table with a Lanczos3 filter, encoded
//! as PNG, and packed into an ICNS container.  Targets that fail to resample
//! or encode are skipped and reported rather than aborting the build.
//!
//! ```
//! use icnsgen::{build_container, Image};
//!
//! let mut png = Vec::new();
//! Image::filled(64, 64, [255, 0, 0, 255]).write_png(&mut png).unwrap();
//! let report = build_container(&png).unwrap();
//! assert_eq!(&report.container[0..4], b"icns");
//! assert_eq!(report.included.len(), 7);
//! ```
//!
//! See https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more
//! information about the file format.

#![warn(missing_docs)]

mod chunk;
mod container;
mod error;
mod icontype;
mod image;
mod pipeline;
mod pngio;
mod resample;
mod source;

#[cfg(feature = "jp2io")]
mod jp2io;

pub use crate::chunk::{ChunkEncoder, IconChunk, PngEncoder};
pub use crate::container::{assemble, total_length, write_container,
                           ICNS_MAGIC_LITERAL};
pub use crate::error::{Error, Result};
pub use crate::icontype::{validate_targets, IconTarget, IconType, OSType,
                          DEFAULT_TARGETS};
pub use crate::image::{Image, PixelFormat};
pub use crate::pipeline::{build_container, IconsetBuilder, IconsetReport,
                          SkippedTarget};
pub use crate::source::{decode, decode_base64, sniff_format, SourceFormat};
