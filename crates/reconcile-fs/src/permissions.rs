//! Octal permission strings and the mode bits behind them
//!
//! Declared permissions arrive as octal text (`"0644"`) and are always
//! rendered back as four zero-padded digits, so state read from disk compares
//! stably against whatever formatting the declaration used.
//!
//! Accepted values cover the nine rwx bits plus setuid, setgid and sticky
//! (`0..=0o7777`). Anything larger is rejected rather than truncated.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest mode value accepted by [`parse_permissions`].
pub const MAX_MODE: u32 = 0o7777;

/// Permission bits of a file or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mode(u32);

impl Mode {
    /// Wrap raw mode bits, keeping only the permission portion.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & MAX_MODE)
    }

    /// The raw permission bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether the owner write bit is set.
    pub const fn owner_writable(self) -> bool {
        self.0 & 0o200 != 0
    }
}

/// Parse an octal permission string such as `"0644"` or `"755"`.
///
/// # Errors
///
/// Returns [`Error::InvalidPermissionFormat`] when the text is empty,
/// contains anything other than the digits `0`-`7`, or exceeds [`MAX_MODE`].
pub fn parse_permissions(text: &str) -> Result<Mode> {
    if text.is_empty() {
        return Err(Error::invalid_permissions(text, "empty string"));
    }

    if let Some(bad) = text.chars().find(|c| !matches!(c, '0'..='7')) {
        return Err(Error::invalid_permissions(
            text,
            format!("{bad:?} is not an octal digit"),
        ));
    }

    // Leading zeros carry no value; strip them so long zero-padded input
    // cannot overflow the integer parse.
    let significant = text.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(Mode(0));
    }

    let value = u32::from_str_radix(significant, 8)
        .map_err(|e| Error::invalid_permissions(text, e.to_string()))?;

    if value > MAX_MODE {
        return Err(Error::invalid_permissions(
            text,
            format!("exceeds maximum mode {MAX_MODE:04o}"),
        ));
    }

    Ok(Mode(value))
}

/// Render permission bits as a four digit, zero-padded octal string.
pub fn format_permissions(mode: Mode) -> String {
    format!("{:04o}", mode.0 & MAX_MODE)
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_permissions(*self))
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_permissions(s)
    }
}

impl TryFrom<String> for Mode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        parse_permissions(&value)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        format_permissions(mode)
    }
}
