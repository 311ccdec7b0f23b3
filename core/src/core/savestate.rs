//! Key=value text save-state format with base-64-encoded binary blocks.
//!
//! One key per line, `key=value\n`; lines starting with `#` are comments.
//! A [`Document`] is built once by writing every field a subsystem wants to
//! persist, then serialized to text; loading parses the text back into a
//! lookup table that each subsystem pulls its own keys from.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug)]
pub enum SaveStateError {
    MissingKey(String),
    NotAnInteger { key: String, value: String },
    InvalidBase64 { key: String, reason: &'static str },
    WrongLength { key: String, expected: usize, got: usize },
}

impl fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "save state missing key: {key}"),
            Self::NotAnInteger { key, value } => {
                write!(f, "key {key}: value {value:?} is not an integer")
            }
            Self::InvalidBase64 { key, reason } => {
                write!(f, "key {key}: invalid base64 ({reason})")
            }
            Self::WrongLength { key, expected, got } => write!(
                f,
                "key {key}: decoded {got} bytes, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for SaveStateError {}

/// A save-state document being built for writing.
#[derive(Default)]
pub struct Writer {
    lines: Vec<String>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_uint(&mut self, key: &str, value: u64) {
        self.lines.push(format!("{key}={value}"));
    }

    pub fn save_int(&mut self, key: &str, value: i64) {
        self.lines.push(format!("{key}={value}"));
    }

    pub fn save_bool(&mut self, key: &str, value: bool) {
        self.save_uint(key, value as u64);
    }

    pub fn save_memory(&mut self, key: &str, bytes: &[u8]) {
        self.lines.push(format!("{key}={}", encode_base64(bytes)));
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// A save-state document parsed for reading.
pub struct Reader {
    values: HashMap<String, String>,
}

impl Reader {
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = match line.find('#') {
                Some(idx) => &line[..idx],
                None => line,
            };
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.to_string(), value.to_string());
            }
        }
        Self { values }
    }

    fn get(&self, key: &str) -> Result<&str, SaveStateError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| SaveStateError::MissingKey(key.to_string()))
    }

    pub fn load_uint(&self, key: &str) -> Result<u64, SaveStateError> {
        let raw = self.get(key)?;
        raw.parse()
            .map_err(|_| SaveStateError::NotAnInteger { key: key.to_string(), value: raw.to_string() })
    }

    pub fn load_int(&self, key: &str) -> Result<i64, SaveStateError> {
        let raw = self.get(key)?;
        raw.parse()
            .map_err(|_| SaveStateError::NotAnInteger { key: key.to_string(), value: raw.to_string() })
    }

    pub fn load_bool(&self, key: &str) -> Result<bool, SaveStateError> {
        Ok(self.load_uint(key)? != 0)
    }

    pub fn load_memory(&self, key: &str, expected_len: usize) -> Result<Vec<u8>, SaveStateError> {
        let raw = self.get(key)?;
        let decoded = decode_base64(raw).map_err(|reason| SaveStateError::InvalidBase64 {
            key: key.to_string(),
            reason,
        })?;
        if decoded.len() != expected_len {
            return Err(SaveStateError::WrongLength {
                key: key.to_string(),
                expected: expected_len,
                got: decoded.len(),
            });
        }
        Ok(decoded)
    }
}

const B64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn encode_base64(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len().div_ceil(3) * 4);
    for chunk in raw.chunks(3) {
        let b = [chunk[0], *chunk.get(1).unwrap_or(&0), *chunk.get(2).unwrap_or(&0)];
        let word = ((b[0] as u32) << 16) | ((b[1] as u32) << 8) | b[2] as u32;
        out.push(B64[((word >> 18) & 0x3f) as usize] as char);
        out.push(B64[((word >> 12) & 0x3f) as usize] as char);
        out.push(if chunk.len() > 1 {
            B64[((word >> 6) & 0x3f) as usize] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            B64[(word & 0x3f) as usize] as char
        } else {
            '='
        });
    }
    out
}

fn base64_lookup(c: u8) -> Option<u8> {
    if c == b'=' {
        return Some(64);
    }
    B64.iter().position(|&b| b == c).map(|i| i as u8)
}

fn decode_base64(enc: &str) -> Result<Vec<u8>, &'static str> {
    let enc = enc.as_bytes();
    if !enc.len().is_multiple_of(4) {
        return Err("length not a multiple of 4");
    }
    let mut out = Vec::with_capacity((enc.len() / 4) * 3);
    for quad in enc.chunks(4) {
        let mut word = 0u32;
        let mut padding = 0;
        for (i, &c) in quad.iter().enumerate() {
            let v = base64_lookup(c).ok_or("invalid character")?;
            if v == 64 {
                padding += 1;
            } else if padding > 0 {
                return Err("data after padding");
            }
            word |= ((v & 0x3f) as u32) << (6 * (3 - i));
        }
        if padding > 2 {
            return Err("too much padding");
        }
        let bytes = word.to_be_bytes();
        out.extend_from_slice(&bytes[1..4 - padding]);
    }
    Ok(out)
}
