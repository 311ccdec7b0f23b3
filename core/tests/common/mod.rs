use gb_core::core::bus::{Bus, InterruptState};

/// A flat 64 KiB memory with a software IF/IE pair, standing in for the
/// full `GameBoySystem` bus so SM83 opcode semantics can be tested in
/// isolation from cartridge/PPU/APU wiring.
pub struct TestBus {
    pub memory: [u8; 0x10000],
    pub ie: u8,
    pub iflag: u8,
}

impl TestBus {
    pub fn new() -> Self {
        Self { memory: [0; 0x10000], ie: 0, iflag: 0 }
    }

    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let start = addr as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
    }
}

impl Bus for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn check_interrupts(&mut self) -> InterruptState {
        InterruptState { pending: self.ie & self.iflag & 0x1f }
    }

    fn ack_interrupt(&mut self, bit: u8) {
        self.iflag &= !bit;
    }
}
