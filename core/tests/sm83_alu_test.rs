use gb_core::cpu::Sm83;

mod common;
use common::TestBus;

fn cpu_at(pc: u16) -> Sm83 {
    let mut cpu = Sm83::new();
    cpu.pc = pc;
    cpu
}

/// `LD B,n ; ADD A,B` starting wherever `cpu.pc` is.
fn run_add(cpu: &mut Sm83, bus: &mut TestBus, operand: u8) {
    bus.load(cpu.pc, &[0x06, operand, 0x80]);
    cpu.step(bus);
    cpu.step(bus);
}

fn run_adc(cpu: &mut Sm83, bus: &mut TestBus, operand: u8) {
    bus.load(cpu.pc, &[0x06, operand, 0x88]);
    cpu.step(bus);
    cpu.step(bus);
}

fn run_sub(cpu: &mut Sm83, bus: &mut TestBus, operand: u8) {
    bus.load(cpu.pc, &[0x06, operand, 0x90]);
    cpu.step(bus);
    cpu.step(bus);
}

fn run_sbc(cpu: &mut Sm83, bus: &mut TestBus, operand: u8) {
    bus.load(cpu.pc, &[0x06, operand, 0x98]);
    cpu.step(bus);
    cpu.step(bus);
}

/// Quantified invariant: for all A,B in 0..255, ADD A,B sets Z iff the sum
/// mod 256 is zero, H iff the low nibbles carry, C iff the full add carries,
/// and N is always clear.
#[test]
fn add_flag_invariant_holds_across_a_representative_sweep() {
    let mut bus = TestBus::new();
    for a in (0u16..=255).step_by(17) {
        for b in (0u16..=255).step_by(23) {
            let mut cpu = Sm83::new();
            cpu.a = a as u8;
            run_add(&mut cpu, &mut bus, b as u8);
            let sum = a + b;
            assert_eq!(cpu.a, sum as u8, "a={a:#x} b={b:#x}");
            assert_eq!(cpu.flag_z, sum & 0xff == 0, "Z a={a:#x} b={b:#x}");
            assert_eq!(cpu.flag_h, (a & 0xf) + (b & 0xf) > 0xf, "H a={a:#x} b={b:#x}");
            assert_eq!(cpu.flag_c, sum > 0xff, "C a={a:#x} b={b:#x}");
            assert!(!cpu.flag_n);
        }
    }
}

#[test]
fn add_known_good_reference_table() {
    let mut bus = TestBus::new();
    let cases = [
        (0x00u8, 0x00u8, 0x00u8, true, false, false),
        (0x0f, 0x01, 0x10, false, true, false),
        (0xf0, 0x10, 0x00, true, false, true),
        (0xff, 0xff, 0xfe, false, true, true),
        (0x3a, 0xc5, 0xff, false, false, false),
    ];
    for (a, b, expected, z, h, c) in cases {
        let mut cpu = Sm83::new();
        cpu.a = a;
        run_add(&mut cpu, &mut bus, b);
        assert_eq!(cpu.a, expected, "a={a:#x} b={b:#x}");
        assert_eq!(cpu.flag_z, z);
        assert_eq!(cpu.flag_h, h);
        assert_eq!(cpu.flag_c, c);
    }
}

#[test]
fn adc_includes_incoming_carry() {
    let mut bus = TestBus::new();
    let mut cpu = Sm83::new();
    cpu.a = 0x0f;
    cpu.flag_c = true;
    run_adc(&mut cpu, &mut bus, 0x00);
    assert_eq!(cpu.a, 0x10);
    assert!(cpu.flag_h);
    assert!(!cpu.flag_c);
}

#[test]
fn sub_known_good_reference_table() {
    let mut bus = TestBus::new();
    let cases = [
        (0x10u8, 0x10u8, 0x00u8, true, false, false),
        (0x10, 0x01, 0x0f, false, true, false),
        (0x00, 0x01, 0xff, false, true, true),
    ];
    for (a, b, expected, z, h, c) in cases {
        let mut cpu = Sm83::new();
        cpu.a = a;
        run_sub(&mut cpu, &mut bus, b);
        assert_eq!(cpu.a, expected);
        assert_eq!(cpu.flag_z, z);
        assert_eq!(cpu.flag_h, h);
        assert_eq!(cpu.flag_c, c);
        assert!(cpu.flag_n);
    }
}

#[test]
fn sbc_includes_incoming_borrow() {
    let mut bus = TestBus::new();
    let mut cpu = Sm83::new();
    cpu.a = 0x00;
    cpu.flag_c = true;
    run_sbc(&mut cpu, &mut bus, 0x00);
    assert_eq!(cpu.a, 0xff);
    assert!(cpu.flag_c);
    assert!(cpu.flag_h);
}

#[test]
fn cp_compares_without_writing_a() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0x06, 0x10, 0xb8]); // LD B,0x10 ; CP B
    let mut cpu = cpu_at(0xc000);
    cpu.a = 0x10;
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x10); // unchanged
    assert!(cpu.flag_z);
}

#[test]
fn and_or_xor_set_half_carry_and_clear_it_per_operation() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xe6, 0x0f, 0xf6, 0xf0, 0xee, 0xff]); // AND 0x0f ; OR 0xf0 ; XOR 0xff
    let mut cpu = cpu_at(0xc000);
    cpu.a = 0xff;
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x0f);
    assert!(cpu.flag_h); // AND always sets H
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0xff);
    assert!(!cpu.flag_h); // OR always clears H
    cpu.step(&mut bus);
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.flag_z);
}

#[test]
fn inc_dec_8_bit_set_half_carry_boundaries() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0x06, 0x0f, 0x04, 0x05]); // LD B,0x0f ; INC B ; DEC B
    let mut cpu = cpu_at(0xc000);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.b, 0x10);
    assert!(cpu.flag_h);
    assert!(!cpu.flag_n);
    cpu.step(&mut bus);
    assert_eq!(cpu.b, 0x0f);
    assert!(cpu.flag_h); // borrow out of bit 4
    assert!(cpu.flag_n);
}

#[test]
fn daa_corrects_bcd_addition_and_subtraction() {
    let mut bus = TestBus::new();
    // LD A,0x45 ; LD B,0x38 ; ADD A,B ; DAA  => 0x45 + 0x38 = 0x7d BCD-adjusted to 0x83
    bus.load(0xc000, &[0x3e, 0x45, 0x06, 0x38, 0x80, 0x27]);
    let mut cpu = cpu_at(0xc000);
    for _ in 0..4 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.a, 0x7d);
    cpu.step(&mut bus); // DAA
    assert_eq!(cpu.a, 0x83);
    assert!(!cpu.flag_h);

    // Subtractive DAA: 0x32 - 0x28 (BCD) = 0x0a binary, corrected to 0x04.
    let mut cpu2 = cpu_at(0xc000);
    bus.load(0xc000, &[0x3e, 0x32, 0x06, 0x28, 0x90, 0x27]);
    for _ in 0..4 {
        cpu2.step(&mut bus);
    }
    assert_eq!(cpu2.a, 0x0a);
    cpu2.step(&mut bus);
    assert_eq!(cpu2.a, 0x04);
}

#[test]
fn add_hl_pair_sets_h_and_c_from_16_bit_math_and_preserves_z() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0x09]); // ADD HL,BC
    let mut cpu = cpu_at(0xc000);
    cpu.set_hl(0x0fff);
    cpu.set_bc(0x0001);
    cpu.flag_z = true; // ADD HL,rr must not touch Z
    cpu.step(&mut bus);
    assert_eq!(cpu.hl(), 0x1000);
    assert!(cpu.flag_h);
    assert!(!cpu.flag_c);
    assert!(cpu.flag_z);
}

#[test]
fn add_sp_signed_offset_never_sets_zero_flag() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xe8, 0x02]); // ADD SP,2
    let mut cpu = cpu_at(0xc000);
    cpu.sp = 0xfffe;
    cpu.flag_z = true;
    cpu.step(&mut bus);
    assert_eq!(cpu.sp, 0x0000);
    assert!(!cpu.flag_z);
    assert!(cpu.flag_c);
    assert!(cpu.flag_h);
}
