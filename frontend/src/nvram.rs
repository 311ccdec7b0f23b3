//! Reading and writing the `.sav` file beside a ROM: battery-backed
//! cartridge RAM, plus the RTC block for MBC3 carts.

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum CartridgeIoError {
    Io(std::io::Error),
}

impl fmt::Display for CartridgeIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "nvram i/o error: {e}"),
        }
    }
}

impl std::error::Error for CartridgeIoError {}

impl From<std::io::Error> for CartridgeIoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub fn load(path: &Path) -> Result<Vec<u8>, CartridgeIoError> {
    Ok(std::fs::read(path)?)
}

pub fn save(path: &Path, data: &[u8]) -> Result<(), CartridgeIoError> {
    std::fs::write(path, data)?;
    Ok(())
}
