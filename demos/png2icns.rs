//! Creates an ICNS file containing the full standard icon set, resampled
//! from a single source image.
//!
//! To create an ICNS file from a PNG (or JPEG 2000) image, run:
//!
//! ```shell
//! cargo run --example png2icns <path/to/file.png>
//! # ICNS will be saved to path/to/file.icns
//! ```
//!
//! The source may also be a text file holding base64 image data or a
//! `data:image/png;base64,...` URL, as returned by image-generation services.
//! Set `RUST_LOG=debug` to see each chunk as it is encoded.

extern crate icnsgen;

use icnsgen::{decode, decode_base64, sniff_format, IconsetBuilder};
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Error, ErrorKind, Write};
use std::path::Path;

fn main() -> io::Result<()> {
    env_logger::init();
    if env::args().count() != 2 {
        println!("Usage: png2icns <path>");
        return Ok(());
    }
    let source_path = env::args().nth(1).unwrap();
    let source_path = Path::new(&source_path);
    let bytes = fs::read(source_path)?;
    let image = if sniff_format(&bytes).is_some() {
        decode(&bytes)?
    } else {
        let text = String::from_utf8(bytes).map_err(|_| {
            Error::new(ErrorKind::InvalidData,
                       "source is neither an image nor base64 text")
        })?;
        decode_base64(&text)?
    };
    let report = IconsetBuilder::new().build_image(&image)?;
    let icns_path = source_path.with_extension("icns");
    let mut icns_file = BufWriter::new(File::create(&icns_path)?);
    icns_file.write_all(&report.container)?;
    icns_file.flush()?;
    println!("Wrote {} ({} bytes)",
             icns_path.display(),
             report.container.len());
    for ostype in &report.included {
        println!("  included {}", ostype);
    }
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.target, skipped.error);
    }
    Ok(())
}
