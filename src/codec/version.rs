//! Map file format versions understood by this build.

use crate::error::{Error, Result};

/// Format written by this build.
pub const CURRENT_FORMAT: u32 = 16;
/// Oldest format accepted when parsing.
pub const MIN_SUPPORTED_FORMAT: u32 = 14;
/// Newest format accepted when parsing.
pub const MAX_SUPPORTED_FORMAT: u32 = 16;

/// Startup self-check that the version constants agree with each other.
///
/// Hosting applications should call this once before using the codec.
pub fn check_build_configuration() -> Result<()> {
    check_format_range(CURRENT_FORMAT, MIN_SUPPORTED_FORMAT, MAX_SUPPORTED_FORMAT)
}

fn check_format_range(current: u32, min: u32, max: u32) -> Result<()> {
    if current < min || current > max {
        return Err(Error::InvalidBuildConfiguration { current, min, max });
    }
    Ok(())
}

pub fn is_supported_format(version: i64) -> bool {
    (i64::from(MIN_SUPPORTED_FORMAT)..=i64::from(MAX_SUPPORTED_FORMAT)).contains(&version)
}

/// Fails with `UnsupportedFormatVersion` outside the supported range.
pub fn ensure_supported_format(version: i64) -> Result<()> {
    if !is_supported_format(version) {
        return Err(Error::UnsupportedFormatVersion {
            version,
            min: MIN_SUPPORTED_FORMAT,
            max: MAX_SUPPORTED_FORMAT,
        });
    }
    Ok(())
}
