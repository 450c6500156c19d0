use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Types of PNG-encoded icon elements that this crate can produce.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IconType {
    /// 16x16 32-bit icon.
    RGBA32_16x16,
    /// 32x32 32-bit icon.
    RGBA32_32x32,
    /// 64x64 32-bit icon.
    RGBA32_64x64,
    /// 128x128 32-bit icon.
    RGBA32_128x128,
    /// 256x256 32-bit icon.
    RGBA32_256x256,
    /// 512x512 32-bit icon.
    RGBA32_512x512,
    /// 512x512 32-bit icon at 2x "retina" density (so, 1024 by 1024 pixels).
    RGBA32_512x512_2x,
}

impl IconType {
    /// Every icon type, largest first.
    pub const ALL: [IconType; 7] = [IconType::RGBA32_512x512_2x,
                                    IconType::RGBA32_512x512,
                                    IconType::RGBA32_256x256,
                                    IconType::RGBA32_128x128,
                                    IconType::RGBA32_64x64,
                                    IconType::RGBA32_32x32,
                                    IconType::RGBA32_16x16];

    /// Get the icon type associated with the given OSType, if any.
    pub fn from_ostype(ostype: OSType) -> Option<IconType> {
        let OSType(raw_ostype) = ostype;
        match &raw_ostype {
            b"icp4" => Some(IconType::RGBA32_16x16),
            b"icp5" => Some(IconType::RGBA32_32x32),
            b"icp6" => Some(IconType::RGBA32_64x64),
            b"ic07" => Some(IconType::RGBA32_128x128),
            b"ic08" => Some(IconType::RGBA32_256x256),
            b"ic09" => Some(IconType::RGBA32_512x512),
            b"ic10" => Some(IconType::RGBA32_512x512_2x),
            _ => None,
        }
    }

    /// Get the OSType that represents this icon type.
    pub const fn ostype(self) -> OSType {
        match self {
            IconType::RGBA32_16x16 => OSType(*b"icp4"),
            IconType::RGBA32_32x32 => OSType(*b"icp5"),
            IconType::RGBA32_64x64 => OSType(*b"icp6"),
            IconType::RGBA32_128x128 => OSType(*b"ic07"),
            IconType::RGBA32_256x256 => OSType(*b"ic08"),
            IconType::RGBA32_512x512 => OSType(*b"ic09"),
            IconType::RGBA32_512x512_2x => OSType(*b"ic10"),
        }
    }

    /// Returns the pixel data width of this icon type.  Normally this is the
    /// same as the screen width, but for 2x "retina" density icons, this will
    /// be twice that value.
    ///
    /// # Examples
    /// ```
    /// use icnsgen::IconType;
    /// assert_eq!(IconType::RGBA32_128x128.pixel_width(), 128);
    /// assert_eq!(IconType::RGBA32_512x512_2x.pixel_width(), 1024);
    /// ```
    pub const fn pixel_width(self) -> u32 {
        self.screen_width() * self.pixel_density()
    }

    /// Returns the pixel density for this icon type -- that is, 2 for 2x
    /// "retina" density icons, or 1 for other icon types.
    ///
    /// # Examples
    /// ```
    /// use icnsgen::IconType;
    /// assert_eq!(IconType::RGBA32_512x512.pixel_density(), 1);
    /// assert_eq!(IconType::RGBA32_512x512_2x.pixel_density(), 2);
    /// ```
    pub const fn pixel_density(self) -> u32 {
        match self {
            IconType::RGBA32_512x512_2x => 2,
            _ => 1,
        }
    }

    /// Returns the screen width of this icon type.
    pub const fn screen_width(self) -> u32 {
        match self {
            IconType::RGBA32_16x16 => 16,
            IconType::RGBA32_32x32 => 32,
            IconType::RGBA32_64x64 => 64,
            IconType::RGBA32_128x128 => 128,
            IconType::RGBA32_256x256 => 256,
            IconType::RGBA32_512x512 => 512,
            IconType::RGBA32_512x512_2x => 512,
        }
    }

    /// Returns the target descriptor (type tag plus pixel size) for this
    /// icon type.
    pub const fn target(self) -> IconTarget {
        IconTarget::new(self.ostype(), self.pixel_width())
    }
}

/// A Macintosh OSType (also known as a ResType), used in ICNS files to
/// identify the type of each icon element.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OSType(pub [u8; 4]);

impl fmt::Display for OSType {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        let &OSType(raw) = self;
        for &byte in &raw {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl FromStr for OSType {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<OSType, String> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 {
            Err(format!("OSType string must be 4 bytes (was {})", bytes.len()))
        } else {
            let mut raw = [0u8; 4];
            raw.clone_from_slice(bytes);
            Ok(OSType(raw))
        }
    }
}

/// One entry of a target table: the element type tag to emit and the edge
/// length, in pixels, of the square bitmap stored under it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IconTarget {
    /// The element type tag.
    pub ostype: OSType,
    /// Width and height of the encoded image.
    pub size: u32,
}

impl IconTarget {
    /// Creates a target descriptor.
    pub const fn new(ostype: OSType, size: u32) -> IconTarget {
        IconTarget { ostype, size }
    }
}

impl fmt::Display for IconTarget {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        write!(out, "{} ({}x{})", self.ostype, self.size, self.size)
    }
}

/// The standard table of PNG icon elements, largest first.
pub const DEFAULT_TARGETS: [IconTarget; 7] = default_targets();

const fn default_targets() -> [IconTarget; 7] {
    let mut targets = [IconTarget::new(OSType([0; 4]), 0); 7];
    let mut index = 0;
    while index < IconType::ALL.len() {
        targets[index] = IconType::ALL[index].target();
        index += 1;
    }
    targets
}

/// Checks that a target table has positive sizes, unique type tags, and
/// strictly decreasing sizes.
pub fn validate_targets(targets: &[IconTarget]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut previous: Option<&IconTarget> = None;
    for target in targets {
        if target.size == 0 {
            let msg = format!("target '{}' has zero size", target.ostype);
            return Err(Error::InvalidTargets(msg));
        }
        if !seen.insert(target.ostype) {
            let msg = format!("duplicate type tag '{}'", target.ostype);
            return Err(Error::InvalidTargets(msg));
        }
        if let Some(prev) = previous {
            if target.size >= prev.size {
                let msg = format!("sizes must strictly decrease ('{}' is \
                                   {}px after '{}' at {}px)",
                                  target.ostype,
                                  target.size,
                                  prev.ostype,
                                  prev.size);
                return Err(Error::InvalidTargets(msg));
            }
        }
        previous = Some(target);
    }
    Ok(())
}
