use serde_with::DeserializeFromStr;
use std::ffi::OsStr;
use std::fmt;
use std::str::FromStr;

use crate::error::*;

/// Encoding of the month and day labels handed over on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Ascii,
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::Utf8
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            other => Err(Error::new(
                ErrorKind::InvalidOption,
                &format!("unsupported encoding '{}'", other),
            )),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "utf-8"),
            TextEncoding::Latin1 => write!(f, "latin-1"),
            TextEncoding::Ascii => write!(f, "ascii"),
        }
    }
}

impl TextEncoding {
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| Error::new(ErrorKind::InvalidOption, &e.to_string())),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Ascii => {
                if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
                    Err(Error::new(
                        ErrorKind::InvalidOption,
                        &format!("non-ascii byte at offset {}", pos),
                    ))
                } else {
                    Ok(bytes.iter().map(|&b| char::from(b)).collect())
                }
            }
        }
    }

    /// Decodes a label, falling back to lossy UTF-8 when the label is not
    /// valid in this encoding.
    pub fn decode_label(&self, bytes: &[u8]) -> String {
        self.decode(bytes).unwrap_or_else(|e| {
            log::warn!(
                "Label is not valid {} ({}), you must select your correct system encoding. Falling back to utf-8.",
                self,
                e
            );
            String::from_utf8_lossy(bytes).into_owned()
        })
    }

    pub fn decode_os_label(&self, label: &OsStr) -> String {
        self.decode_label(&os_str_bytes(label))
    }
}

#[cfg(unix)]
fn os_str_bytes(s: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_str_bytes(s: &OsStr) -> Vec<u8> {
    s.to_string_lossy().into_owned().into_bytes()
}
