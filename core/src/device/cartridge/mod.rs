//! Cartridge header parsing, bank-controller dispatch, and the battery/RTC
//! save file.

mod mbc;
mod rtc;

pub use mbc::{BankUpdate, Mbc, Mode};
pub use rtc::Rtc;

use std::fmt;

use crate::core::savestate::{Reader, Writer};

const HEADER_LOGO: usize = 0x0104;
const HEADER_TITLE: usize = 0x0134;
const HEADER_COLOR_FLAG: usize = 0x0143;
const HEADER_SGB_FLAG: usize = 0x0146;
const HEADER_CART_TYPE: usize = 0x0147;
const HEADER_ROM_SIZE: usize = 0x0148;
const HEADER_RAM_SIZE: usize = 0x0149;

/// The reference Nintendo boot logo, checked byte-for-byte against the
/// cartridge header as the standard "is this actually a ROM" sanity check.
const REFERENCE_LOGO: [u8; 48] = [
    0xce, 0xed, 0x66, 0x66, 0xcc, 0x0d, 0x00, 0x0b, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0c, 0x00, 0x0d,
    0x00, 0x08, 0x11, 0x1f, 0x88, 0x89, 0x00, 0x0e, 0xdc, 0xcc, 0x6e, 0xe6, 0xdd, 0xdd, 0xd9, 0x99,
    0xbb, 0xbb, 0x67, 0x63, 0x6e, 0x0e, 0xec, 0xcc, 0xdd, 0xdc, 0x99, 0x9f, 0xbb, 0xb9, 0x33, 0x3e,
];

#[derive(Debug)]
pub enum RomError {
    TooSmall(usize),
    InvalidLogo,
    UnsupportedCartridgeType(u8),
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall(len) => write!(f, "rom error: {len} bytes is smaller than one 32KiB bank"),
            Self::InvalidLogo => write!(f, "invalid rom: scrolling graphic mismatch"),
            Self::UnsupportedCartridgeType(code) => {
                write!(f, "unrecognised cartridge type {code:#04x}")
            }
        }
    }
}

impl std::error::Error for RomError {}

#[derive(Debug, Clone, Copy, Default)]
pub struct Features {
    pub ram: bool,
    pub battery: bool,
    pub timer: bool,
    pub rumble: bool,
}

pub struct Cartridge {
    pub title: String,
    pub is_color: bool,
    pub is_super_gb: bool,
    pub features: Features,
    pub rom: Vec<u8>,
    pub ram: Vec<u8>,
    pub mbc: Mbc,
    pub rtc: Option<Rtc>,
    ram_enabled: bool,
}

impl Cartridge {
    pub fn load(rom: Vec<u8>) -> Result<Self, RomError> {
        if rom.len() < 32 * 1024 {
            return Err(RomError::TooSmall(rom.len()));
        }
        if rom[HEADER_LOGO..HEADER_LOGO + 48] != REFERENCE_LOGO {
            return Err(RomError::InvalidLogo);
        }

        let title_bytes = &rom[HEADER_TITLE..HEADER_TITLE + 16];
        let title_end = title_bytes.iter().position(|&b| b == 0).unwrap_or(16);
        let title = String::from_utf8_lossy(&title_bytes[..title_end]).into_owned();

        let is_color = matches!(rom[HEADER_COLOR_FLAG], 0x80 | 0xc0);
        let is_super_gb = rom[HEADER_SGB_FLAG] == 0x03;

        let (mbc_kind, features) = cartridge_type(rom[HEADER_CART_TYPE])?;
        let ram_size = ram_size_bytes(rom[HEADER_RAM_SIZE], mbc_kind_is_mbc2(&mbc_kind));

        let mbc = match mbc_kind {
            MbcKind::None => Mbc::None,
            MbcKind::Mbc1 => Mbc::Mbc1 { bank: 1, block: 0, mode: Mode::Rom16MbitRam8Kb },
            MbcKind::Mbc2 => Mbc::Mbc2 { bank: 1 },
            MbcKind::Mbc3 => Mbc::Mbc3 { bank: 1, rtc_map: 0, ram_bank: 0 },
            MbcKind::Mbc5 => Mbc::Mbc5 { bank_lo: 1, bank_hi: 0, ram_bank: 0 },
        };
        let rtc = features.timer.then(Rtc::new);

        log::info!(
            "rom \"{title}\" loaded ({} bytes, {mbc_kind:?}, ram {ram_size}B, color={is_color})",
            rom.len()
        );

        Ok(Self {
            title,
            is_color,
            is_super_gb,
            features,
            rom,
            ram: vec![0; ram_size],
            mbc,
            rtc,
            ram_enabled: false,
        })
    }

    pub fn reset(&mut self) {
        self.mbc.reset();
        self.ram_enabled = false;
    }

    pub fn read_rom(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x3fff => self.rom[address as usize],
            0x4000..=0x7fff => {
                let bank = self.mbc.rom_bank() as usize;
                let block = self.mbc.rom_block() as usize;
                let offset = (address as usize - 0x4000) + bank * 0x4000 + block * 0x80000;
                self.rom.get(offset).copied().unwrap_or(0xff)
            }
            _ => 0xff,
        }
    }

    pub fn write_control(&mut self, address: u16, value: u8) {
        if let Mbc::Mbc3 { .. } = &self.mbc {
            if (0x6000..=0x7fff).contains(&address) {
                if let Some(rtc) = &mut self.rtc {
                    rtc.handle_latch_write(value);
                }
                return;
            }
        }
        let update = self.mbc.write_control(address, value);
        if let Some(enabled) = update.ram_enabled {
            self.ram_enabled = enabled;
        }
    }

    pub fn read_ram(&self, address: u16) -> u8 {
        let rtc_map = self.mbc.rtc_map();
        if rtc_map != 0 {
            return self.rtc.as_ref().map(|r| r.get_register(rtc_map)).unwrap_or(0xff);
        }
        if self.ram.is_empty() {
            return 0xff;
        }
        let offset = self.ram_offset(address);
        self.ram.get(offset).copied().unwrap_or(0xff)
    }

    pub fn write_ram(&mut self, address: u16, value: u8) {
        let rtc_map = self.mbc.rtc_map();
        if rtc_map != 0 {
            if let Some(rtc) = &mut self.rtc {
                rtc.set_register(rtc_map, value);
            }
            return;
        }
        if self.ram.is_empty() {
            return;
        }
        let value = if self.mbc.masks_ram_to_nibble() { value & 0x0f } else { value };
        let offset = self.ram_offset(address);
        if let Some(slot) = self.ram.get_mut(offset) {
            *slot = value;
        }
    }

    fn ram_offset(&self, address: u16) -> usize {
        let bank = self.mbc.ram_bank() as usize;
        (address as usize - 0xa000) + bank * 0x2000
    }

    /// Battery-backed RAM, plus the 20-byte RTC block for MBC3, ready for
    /// the frontend to write alongside the ROM path with `.sav` appended.
    pub fn save_nvram(&self) -> Option<Vec<u8>> {
        if !self.features.battery && self.rtc.is_none() {
            return None;
        }
        let mut out = self.ram.clone();
        if let Some(rtc) = &self.rtc {
            out.extend_from_slice(&rtc.save_block());
        }
        Some(out)
    }

    pub fn load_nvram(&mut self, data: &[u8]) {
        let ram_len = self.ram.len();
        if data.len() < ram_len {
            log::warn!("save data shorter than expected cartridge ram ({}, want {ram_len})", data.len());
            return;
        }
        self.ram.copy_from_slice(&data[..ram_len]);
        if let Some(rtc) = &mut self.rtc {
            if let Ok(block) = data[ram_len..].try_into() {
                rtc.load_block(&block);
            }
        }
    }

    pub fn save_state(&self, w: &mut Writer) {
        w.save_memory("cart.ram", &self.ram);
        w.save_uint("cart.rom_bank", self.mbc.rom_bank() as u64);
        w.save_uint("cart.rom_block", self.mbc.rom_block() as u64);
        w.save_uint("cart.ram_bank", self.mbc.ram_bank() as u64);
        w.save_bool("cart.ram_enabled", self.ram_enabled);
    }

    pub fn load_state(&mut self, r: &Reader) -> Result<(), crate::core::savestate::SaveStateError> {
        let ram = r.load_memory("cart.ram", self.ram.len())?;
        self.ram.copy_from_slice(&ram);
        self.ram_enabled = r.load_bool("cart.ram_enabled")?;
        let rom_bank = r.load_uint("cart.rom_bank")? as u32;
        let rom_block = r.load_uint("cart.rom_block")? as u32;
        let ram_bank = r.load_uint("cart.ram_bank")? as u32;
        self.mbc.set_bank_state(rom_bank, rom_block, ram_bank);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum MbcKind {
    None,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
}

fn mbc_kind_is_mbc2(kind: &MbcKind) -> bool {
    matches!(kind, MbcKind::Mbc2)
}

fn cartridge_type(code: u8) -> Result<(MbcKind, Features), RomError> {
    use MbcKind::*;
    let (mbc, ram, battery, timer, rumble) = match code {
        0x00 => (None, false, false, false, false),
        0x01 => (Mbc1, false, false, false, false),
        0x02 => (Mbc1, true, false, false, false),
        0x03 => (Mbc1, true, true, false, false),
        0x05 => (Mbc2, false, false, false, false),
        0x06 => (Mbc2, false, true, false, false),
        0x08 => (None, true, false, false, false),
        0x09 => (None, true, true, false, false),
        0x0f => (Mbc3, false, true, true, false),
        0x10 => (Mbc3, true, true, true, false),
        0x11 => (Mbc3, false, false, false, false),
        0x12 => (Mbc3, true, false, false, false),
        0x13 => (Mbc3, true, true, false, false),
        0x19 => (Mbc5, false, false, false, false),
        0x1a => (Mbc5, true, false, false, false),
        0x1b => (Mbc5, true, true, false, false),
        0x1c => (Mbc5, false, false, false, true),
        0x1d => (Mbc5, true, false, false, true),
        0x1e => (Mbc5, true, true, false, true),
        0xfd | 0xfe | 0xff => return Err(RomError::UnsupportedCartridgeType(code)),
        other => {
            log::warn!("unrecognised cartridge type {other:#04x}; assuming ROM only");
            (None, false, false, false, false)
        }
    };
    Ok((mbc, Features { ram, battery, timer, rumble }))
}

fn ram_size_bytes(code: u8, is_mbc2: bool) -> usize {
    if is_mbc2 {
        // Fixed 512 x 4-bit nibbles, stored one nibble per byte.
        return 512;
    }
    match code {
        0x00 => 0,
        0x01 => 2 * 1024,
        0x02 => 8 * 1024,
        0x03 => 32 * 1024,
        0x04 => 128 * 1024,
        _ => 0,
    }
}
