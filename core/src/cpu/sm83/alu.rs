//! Block-2 opcodes (`ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, r[z]`) plus the shared
//! 8-bit arithmetic helpers also used by the immediate (block-3) ALU forms
//! and by `INC`/`DEC`/`DAA`/`CPL`/`SCF`/`CCF` in the other blocks.

use crate::core::bus::Bus;

use super::Sm83;

/// Flag bit positions, for code that wants to test `f()` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Z = 0x80,
    N = 0x40,
    H = 0x20,
    C = 0x10,
}

pub(super) fn execute_block2(cpu: &mut Sm83, bus: &mut dyn Bus, y: u8, z: u8) -> u32 {
    let operand = cpu.read_r(bus, z);
    apply_alu(cpu, y, operand);
    if z == super::REG_HL_IND { 8 } else { 4 }
}

/// The eight `alu[y]` operations, shared by block 2 and the block-3 `*I A, n` forms.
pub(super) fn apply_alu(cpu: &mut Sm83, y: u8, operand: u8) {
    match y {
        0 => add(cpu, operand, false),
        1 => add(cpu, operand, true),
        2 => sub(cpu, operand, false, false),
        3 => sub(cpu, operand, true, false),
        4 => and(cpu, operand),
        5 => xor(cpu, operand),
        6 => or(cpu, operand),
        7 => sub(cpu, operand, false, true),
        _ => unreachable!(),
    }
}

fn add(cpu: &mut Sm83, operand: u8, with_carry: bool) {
    let carry_in = if with_carry && cpu.flag_c { 1u16 } else { 0 };
    let a = cpu.a as u16;
    let sum = a + operand as u16 + carry_in;
    cpu.flag_h = (a & 0xf) + (operand as u16 & 0xf) + carry_in > 0xf;
    cpu.flag_c = sum > 0xff;
    cpu.a = sum as u8;
    cpu.flag_z = cpu.a == 0;
    cpu.flag_n = false;
}

/// `compare_only` computes flags without writing A back (the CP instruction).
fn sub(cpu: &mut Sm83, operand: u8, with_carry: bool, compare_only: bool) {
    let carry_in = if with_carry && cpu.flag_c { 1i16 } else { 0 };
    let a = cpu.a as i16;
    let diff = a - operand as i16 - carry_in;
    cpu.flag_h = (a & 0xf) - (operand as i16 & 0xf) - carry_in < 0;
    cpu.flag_c = diff < 0;
    cpu.flag_z = (diff as u8) == 0;
    cpu.flag_n = true;
    if !compare_only {
        cpu.a = diff as u8;
    }
}

fn and(cpu: &mut Sm83, operand: u8) {
    cpu.a &= operand;
    cpu.flag_z = cpu.a == 0;
    cpu.flag_n = false;
    cpu.flag_h = true;
    cpu.flag_c = false;
}

fn xor(cpu: &mut Sm83, operand: u8) {
    cpu.a ^= operand;
    cpu.flag_z = cpu.a == 0;
    cpu.flag_n = false;
    cpu.flag_h = false;
    cpu.flag_c = false;
}

fn or(cpu: &mut Sm83, operand: u8) {
    cpu.a |= operand;
    cpu.flag_z = cpu.a == 0;
    cpu.flag_n = false;
    cpu.flag_h = false;
    cpu.flag_c = false;
}

pub(super) fn inc8(cpu: &mut Sm83, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    cpu.flag_h = (value & 0xf) == 0xf;
    cpu.flag_z = result == 0;
    cpu.flag_n = false;
    result
}

pub(super) fn dec8(cpu: &mut Sm83, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    cpu.flag_h = (value & 0xf) == 0;
    cpu.flag_z = result == 0;
    cpu.flag_n = true;
    result
}

/// Binary-coded-decimal correction following an `ADD`/`ADC`/`SUB`/`SBC`.
/// The additive/subtractive nature of the prior op is read off N; H and C
/// record whether that op produced a half/full BCD-digit carry.
pub(super) fn daa(cpu: &mut Sm83) {
    let mut correction = 0u8;
    let mut set_carry = cpu.flag_c;

    if cpu.flag_h || (!cpu.flag_n && (cpu.a & 0xf) > 9) {
        correction |= 0x06;
    }
    if cpu.flag_c || (!cpu.flag_n && cpu.a > 0x99) {
        correction |= 0x60;
        set_carry = true;
    }

    cpu.a = if cpu.flag_n {
        cpu.a.wrapping_sub(correction)
    } else {
        cpu.a.wrapping_add(correction)
    };

    cpu.flag_z = cpu.a == 0;
    cpu.flag_h = false;
    cpu.flag_c = set_carry;
}

pub(super) fn add_hl(cpu: &mut Sm83, value: u16) {
    let hl = cpu.hl();
    let sum = hl as u32 + value as u32;
    cpu.flag_h = (hl & 0xfff) + (value & 0xfff) > 0xfff;
    cpu.flag_c = sum > 0xffff;
    cpu.flag_n = false;
    cpu.set_hl(sum as u16);
}

/// `ADD SP, e` and `LD HL, SP+e` share this: flags computed on the low byte
/// as if it were an 8-bit unsigned add of SP's low byte and the operand.
pub(super) fn add_sp_signed(cpu: &mut Sm83, sp: u16, offset: i8) -> u16 {
    let offset = offset as i16 as u16;
    let result = sp.wrapping_add(offset);
    cpu.flag_z = false;
    cpu.flag_n = false;
    cpu.flag_h = (sp & 0xf) + (offset & 0xf) > 0xf;
    cpu.flag_c = (sp & 0xff) + (offset & 0xff) > 0xff;
    result
}
