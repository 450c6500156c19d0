use log::{debug, info, warn};
use rayon::prelude::*;
use std::sync::Arc;

use crate::chunk::{ChunkEncoder, IconChunk, PngEncoder};
use crate::container::assemble;
use crate::error::{Error, Result};
use crate::icontype::{validate_targets, IconTarget, OSType, DEFAULT_TARGETS};
use crate::image::Image;
use crate::source;

/// A target that could not be resampled or encoded, and was left out of the
/// container.
#[derive(Debug)]
pub struct SkippedTarget {
    /// The target that was dropped.
    pub target: IconTarget,
    /// Why it was dropped.
    pub error: Error,
}

/// The result of a successful build: the container bytes plus a record of
/// which targets made it in.
#[derive(Debug)]
pub struct IconsetReport {
    /// The complete ICNS file.
    pub container: Vec<u8>,
    /// Type tags of the chunks in the container, in file order.
    pub included: Vec<OSType>,
    /// Targets that failed, in table order.
    pub skipped: Vec<SkippedTarget>,
}

impl IconsetReport {
    /// Returns the type tags of the skipped targets, in table order.
    pub fn skipped_ostypes(&self) -> Vec<OSType> {
        self.skipped.iter().map(|s| s.target.ostype).collect()
    }

    /// Returns true if every target in the table was included.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Configures and runs the source-to-container pipeline.
///
/// Each target is resampled and encoded independently; chunks are always
/// laid out in table order, so parallel and sequential builds of the same
/// source produce identical bytes.
#[derive(Clone)]
pub struct IconsetBuilder {
    targets: Vec<IconTarget>,
    encoder: Arc<dyn ChunkEncoder + Send>,
    parallel: bool,
    allow_empty: bool,
}

impl IconsetBuilder {
    /// Creates a builder using the standard target table, PNG payloads,
    /// and parallel scheduling.
    pub fn new() -> IconsetBuilder {
        IconsetBuilder {
            targets: DEFAULT_TARGETS.to_vec(),
            encoder: Arc::new(PngEncoder),
            parallel: true,
            allow_empty: false,
        }
    }

    /// Replaces the target table.  The table is validated when building.
    pub fn targets(mut self, targets: Vec<IconTarget>) -> IconsetBuilder {
        self.targets = targets;
        self
    }

    /// Replaces the payload encoder.
    pub fn encoder<E>(mut self, encoder: E) -> IconsetBuilder
        where E: ChunkEncoder + Send + 'static
    {
        self.encoder = Arc::new(encoder);
        self
    }

    /// Processes targets one after another on the calling thread.
    pub fn sequential(mut self) -> IconsetBuilder {
        self.parallel = false;
        self
    }

    /// Processes targets concurrently on the rayon thread pool.
    pub fn parallel(mut self) -> IconsetBuilder {
        self.parallel = true;
        self
    }

    /// If true, a build in which every target fails still succeeds, with a
    /// header-only container.  If false (the default), such a build fails
    /// with `Error::NoIcons`.
    pub fn allow_empty(mut self, allow: bool) -> IconsetBuilder {
        self.allow_empty = allow;
        self
    }

    /// Decodes the source bytes and builds a container from them.  Fails
    /// without producing any output if the target table is invalid or the
    /// source cannot be decoded; the table is checked first.
    pub fn build(&self, source_bytes: &[u8]) -> Result<IconsetReport> {
        validate_targets(&self.targets)?;
        let source = source::decode(source_bytes)?;
        self.build_image(&source)
    }

    /// Builds a container from an already-decoded source image.
    pub fn build_image(&self, source: &Image) -> Result<IconsetReport> {
        validate_targets(&self.targets)?;
        let encoder = self.encoder.as_ref();
        let encode = |target: &IconTarget| {
            IconChunk::encode_target(source, *target, encoder)
        };
        let results: Vec<Result<IconChunk>> = if self.parallel {
            self.targets.par_iter().map(encode).collect()
        } else {
            self.targets.iter().map(encode).collect()
        };

        let mut chunks = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for (target, result) in self.targets.iter().zip(results) {
            match result {
                Ok(chunk) => {
                    debug!("encoded {} as {} bytes", target, chunk.data.len());
                    chunks.push(chunk);
                }
                Err(error) => {
                    warn!("skipping {}: {}", target, error);
                    skipped.push(SkippedTarget {
                        target: *target,
                        error,
                    });
                }
            }
        }

        if chunks.is_empty() && !self.targets.is_empty() && !self.allow_empty {
            return Err(Error::NoIcons { skipped });
        }

        let container = assemble(&chunks);
        let included: Vec<OSType> = chunks.iter().map(|c| c.ostype).collect();
        info!("built {}-byte icns container with {} of {} icon(s)",
              container.len(),
              included.len(),
              self.targets.len());
        Ok(IconsetReport {
            container,
            included,
            skipped,
        })
    }
}

impl Default for IconsetBuilder {
    fn default() -> IconsetBuilder {
        IconsetBuilder::new()
    }
}

/// Builds an ICNS file from PNG (or JPEG 2000) source bytes, using the
/// standard target table.
pub fn build_container(source_bytes: &[u8]) -> Result<IconsetReport> {
    IconsetBuilder::new().build(source_bytes)
}
