//! Block 1: the uniform `LD r[y], r[z]` grid, with opcode 0x76 (which would
//! otherwise be `LD (HL), (HL)`) special-cased as `HALT`.

use crate::core::bus::Bus;

use super::Sm83;

pub(super) fn execute_block1(cpu: &mut Sm83, bus: &mut dyn Bus, y: u8, z: u8) -> u32 {
    if y == super::REG_HL_IND && z == super::REG_HL_IND {
        // HALT. With IME=0 and an interrupt already pending, the CPU does
        // not actually sleep and the next fetch skips its PC increment.
        if !cpu.ime && bus.check_interrupts().any() {
            cpu.halt_bug_set();
        } else {
            cpu.halted = true;
        }
        return 4;
    }

    let value = cpu.read_r(bus, z);
    cpu.write_r(bus, y, value);
    if y == super::REG_HL_IND || z == super::REG_HL_IND { 8 } else { 4 }
}
