//! Field separators for reading and writing delimited tables

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single-byte field delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Separator(u8);

impl Separator {
    pub const TAB: Separator = Separator(b'\t');
    pub const COMMA: Separator = Separator(b',');
    pub const SEMICOLON: Separator = Separator(b';');

    /// Build a separator from a raw byte, rejecting line breaks, quotes and
    /// non-ASCII bytes
    pub fn new(byte: u8) -> Option<Self> {
        match byte {
            b'\n' | b'\r' | b'"' => None,
            b if b.is_ascii() => Some(Separator(b)),
            _ => None,
        }
    }

    /// The delimiter byte handed to the csv reader/writer
    pub fn as_byte(self) -> u8 {
        self.0
    }

    /// Canonical name: "tab", "comma", "semicolon", or the character itself
    pub fn name(self) -> String {
        match self.0 {
            b'\t' => "tab".to_string(),
            b',' => "comma".to_string(),
            b';' => "semicolon".to_string(),
            b => (b as char).to_string(),
        }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator::TAB
    }
}

impl FromStr for Separator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let named = match s.to_ascii_lowercase().as_str() {
            "tab" | "\\t" | "tsv" => Some(Separator::TAB),
            "comma" | "csv" => Some(Separator::COMMA),
            "semicolon" => Some(Separator::SEMICOLON),
            _ => None,
        };
        if let Some(sep) = named {
            return Ok(sep);
        }

        match s.as_bytes() {
            [b] => Separator::new(*b).ok_or_else(|| Error::InvalidSeparator(s.to_string())),
            _ => Err(Error::InvalidSeparator(s.to_string())),
        }
    }
}

impl TryFrom<String> for Separator {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Separator> for String {
    fn from(sep: Separator) -> Self {
        sep.name()
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Input and output separators for one run; they are independent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeparatorConfig {
    pub input: Separator,
    pub output: Separator,
}

impl SeparatorConfig {
    pub fn new(input: Separator, output: Separator) -> Self {
        Self { input, output }
    }
}
