//! Blocks 0 and 3: everything that isn't a uniform `r[z]`/`r[y]` load or ALU
//! op — 16-bit loads, INC/DEC, jumps, calls, stack ops, and the handful of
//! irregular single opcodes (STOP, DAA, EI/DI, RST, LDH).

use crate::core::bus::Bus;

use super::{alu, bit};
use super::Sm83;

pub(super) fn execute_block0(
    cpu: &mut Sm83,
    bus: &mut dyn Bus,
    opcode: u8,
    y: u8,
    z: u8,
    p: u8,
    q: u8,
) -> u32 {
    match z {
        0 => match y {
            0 => 4, // NOP
            1 => {
                let addr = cpu.fetch_word(bus);
                bus.write_word(addr, cpu.sp);
                20
            }
            2 => {
                // STOP is followed by a mandatory padding byte on real hardware.
                let _padding = cpu.fetch_byte(bus);
                cpu.stopped = true;
                4
            }
            3 => {
                let offset = cpu.fetch_byte(bus) as i8;
                cpu.pc = cpu.pc.wrapping_add(offset as i16 as u16);
                12
            }
            4..=7 => {
                let offset = cpu.fetch_byte(bus) as i8;
                if cpu.check_cond(y - 4) {
                    cpu.pc = cpu.pc.wrapping_add(offset as i16 as u16);
                    12
                } else {
                    8
                }
            }
            _ => unreachable!(),
        },
        1 => {
            if q == 0 {
                let value = cpu.fetch_word(bus);
                cpu.set_rp(p, value);
                12
            } else {
                alu::add_hl(cpu, cpu.rp(p));
                8
            }
        }
        2 => {
            if q == 0 {
                let addr = match p {
                    0 => cpu.bc(),
                    1 => cpu.de(),
                    2 => {
                        let hl = cpu.hl();
                        cpu.set_hl(hl.wrapping_add(1));
                        hl
                    }
                    3 => {
                        let hl = cpu.hl();
                        cpu.set_hl(hl.wrapping_sub(1));
                        hl
                    }
                    _ => unreachable!(),
                };
                bus.write(addr, cpu.a);
            } else {
                let addr = match p {
                    0 => cpu.bc(),
                    1 => cpu.de(),
                    2 => {
                        let hl = cpu.hl();
                        cpu.set_hl(hl.wrapping_add(1));
                        hl
                    }
                    3 => {
                        let hl = cpu.hl();
                        cpu.set_hl(hl.wrapping_sub(1));
                        hl
                    }
                    _ => unreachable!(),
                };
                cpu.a = bus.read(addr);
            }
            8
        }
        3 => {
            let value = cpu.rp(p);
            cpu.set_rp(p, if q == 0 { value.wrapping_add(1) } else { value.wrapping_sub(1) });
            8
        }
        4 => {
            let value = cpu.read_r(bus, y);
            let result = alu::inc8(cpu, value);
            cpu.write_r(bus, y, result);
            if y == super::REG_HL_IND { 12 } else { 4 }
        }
        5 => {
            let value = cpu.read_r(bus, y);
            let result = alu::dec8(cpu, value);
            cpu.write_r(bus, y, result);
            if y == super::REG_HL_IND { 12 } else { 4 }
        }
        6 => {
            let value = cpu.fetch_byte(bus);
            cpu.write_r(bus, y, value);
            if y == super::REG_HL_IND { 12 } else { 8 }
        }
        7 => {
            match y {
                0..=3 => bit::rotate_a(cpu, y),
                4 => alu::daa(cpu),
                5 => {
                    cpu.a = !cpu.a;
                    cpu.flag_n = true;
                    cpu.flag_h = true;
                }
                6 => {
                    cpu.flag_n = false;
                    cpu.flag_h = false;
                    cpu.flag_c = true;
                }
                7 => {
                    cpu.flag_n = false;
                    cpu.flag_h = false;
                    cpu.flag_c = !cpu.flag_c;
                }
                _ => unreachable!(),
            }
            4
        }
        _ => {
            let pc = cpu.pc.wrapping_sub(1);
            cpu.unimplemented(pc, opcode)
        }
    }
}

pub(super) fn execute_block3(
    cpu: &mut Sm83,
    bus: &mut dyn Bus,
    opcode: u8,
    y: u8,
    z: u8,
    p: u8,
    q: u8,
) -> u32 {
    match z {
        0 => match y {
            0..=3 => {
                if cpu.check_cond(y) {
                    cpu.pc = cpu.pop(bus);
                    20
                } else {
                    8
                }
            }
            4 => {
                let offset = cpu.fetch_byte(bus);
                bus.write(0xff00 | offset as u16, cpu.a);
                12
            }
            5 => {
                let offset = cpu.fetch_byte(bus) as i8;
                cpu.sp = alu::add_sp_signed(cpu, cpu.sp, offset);
                16
            }
            6 => {
                let offset = cpu.fetch_byte(bus);
                cpu.a = bus.read(0xff00 | offset as u16);
                12
            }
            7 => {
                let offset = cpu.fetch_byte(bus) as i8;
                cpu.set_hl(alu::add_sp_signed(cpu, cpu.sp, offset));
                12
            }
            _ => unreachable!(),
        },
        1 => {
            if q == 0 {
                let value = cpu.pop(bus);
                cpu.set_rp2(p, value);
                12
            } else {
                match p {
                    0 => {
                        cpu.pc = cpu.pop(bus);
                        16
                    }
                    1 => {
                        cpu.pc = cpu.pop(bus);
                        cpu.ime = true;
                        16
                    }
                    2 => {
                        cpu.pc = cpu.hl();
                        4
                    }
                    3 => {
                        cpu.sp = cpu.hl();
                        8
                    }
                    _ => unreachable!(),
                }
            }
        }
        2 => match y {
            0..=3 => {
                let addr = cpu.fetch_word(bus);
                if cpu.check_cond(y) {
                    cpu.pc = addr;
                    16
                } else {
                    12
                }
            }
            4 => {
                bus.write(0xff00 | cpu.c as u16, cpu.a);
                8
            }
            5 => {
                let addr = cpu.fetch_word(bus);
                bus.write(addr, cpu.a);
                16
            }
            6 => {
                cpu.a = bus.read(0xff00 | cpu.c as u16);
                8
            }
            7 => {
                let addr = cpu.fetch_word(bus);
                cpu.a = bus.read(addr);
                16
            }
            _ => unreachable!(),
        },
        3 => match y {
            0 => {
                cpu.pc = cpu.fetch_word(bus);
                16
            }
            1 => unreachable!("CB prefix dispatched before execute_block3"),
            6 => {
                cpu.ime = false;
                cpu.ei_delay = 0;
                4
            }
            7 => {
                // IME actually engages after the instruction that follows EI.
                cpu.ei_delay = 2;
                4
            }
            _ => {
                let pc = cpu.pc.wrapping_sub(1);
                cpu.unimplemented(pc, opcode)
            }
        },
        4 => {
            if y <= 3 {
                let addr = cpu.fetch_word(bus);
                if cpu.check_cond(y) {
                    cpu.push(bus, cpu.pc);
                    cpu.pc = addr;
                    24
                } else {
                    12
                }
            } else {
                let pc = cpu.pc.wrapping_sub(1);
                cpu.unimplemented(pc, opcode)
            }
        }
        5 => {
            if q == 0 {
                let value = cpu.rp2(p);
                cpu.push(bus, value);
                16
            } else if p == 0 {
                let addr = cpu.fetch_word(bus);
                cpu.push(bus, cpu.pc);
                cpu.pc = addr;
                24
            } else {
                let pc = cpu.pc.wrapping_sub(1);
                cpu.unimplemented(pc, opcode)
            }
        }
        6 => {
            let operand = cpu.fetch_byte(bus);
            alu::apply_alu(cpu, y, operand);
            8
        }
        7 => {
            cpu.push(bus, cpu.pc);
            cpu.pc = (y as u16) * 8;
            16
        }
        _ => unreachable!(),
    }
}
