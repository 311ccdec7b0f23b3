/// Identifies which component currently drives the address bus, for components
/// (OAM DMA, H-blank DMA) that need to know whether they're allowed to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusMaster {
    Cpu,
    OamDma,
    HBlankDma,
}

/// The five interrupt sources, as a bitmask matching IF/IE bit positions.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterruptState {
    pub pending: u8,
}

impl InterruptState {
    pub const VBLANK: u8 = 1 << 0;
    pub const STAT: u8 = 1 << 1;
    pub const TIMER: u8 = 1 << 2;
    pub const SERIAL: u8 = 1 << 3;
    pub const JOYPAD: u8 = 1 << 4;

    /// Priority order, highest first.
    pub const PRIORITY: [u8; 5] = [
        Self::VBLANK,
        Self::STAT,
        Self::TIMER,
        Self::SERIAL,
        Self::JOYPAD,
    ];

    pub fn any(&self) -> bool {
        self.pending != 0
    }

    /// The highest-priority pending interrupt and its vector, if any.
    pub fn highest(&self) -> Option<(u8, u16)> {
        Self::PRIORITY
            .into_iter()
            .find(|&bit| self.pending & bit != 0)
            .map(|bit| (bit, vector_for(bit)))
    }
}

pub fn vector_for(bit: u8) -> u16 {
    match bit {
        InterruptState::VBLANK => 0x0040,
        InterruptState::STAT => 0x0048,
        InterruptState::TIMER => 0x0050,
        InterruptState::SERIAL => 0x0058,
        InterruptState::JOYPAD => 0x0060,
        _ => unreachable!("not a single interrupt bit: {bit:#04x}"),
    }
}

/// The 16-bit guest address space, as seen by the CPU and DMA engines.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);

    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    fn write_word(&mut self, addr: u16, value: u16) {
        self.write(addr, (value & 0xff) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// I/O-window reads default to a plain read; overridden where a register
    /// reads back something other than its stored byte (e.g. joypad).
    fn io_read(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn io_write(&mut self, addr: u16, value: u8) {
        self.write(addr, value)
    }

    fn is_halted_for(&self, _master: BusMaster) -> bool {
        false
    }

    /// IF & IE, consulted by the CPU at each instruction boundary and while halted.
    fn check_interrupts(&mut self) -> InterruptState;

    /// Clears the IF bit for an accepted interrupt.
    fn ack_interrupt(&mut self, bit: u8);
}
