pub mod apu;
pub mod cartridge;
pub mod joypad;
pub mod ppu;
pub mod timer;

pub use apu::Apu;
pub use cartridge::Cartridge;
pub use joypad::Joypad;
pub use ppu::Ppu;
pub use timer::Timer;
