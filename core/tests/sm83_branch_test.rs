use gb_core::cpu::Sm83;

mod common;
use common::TestBus;

fn cpu_at(pc: u16) -> Sm83 {
    let mut cpu = Sm83::new();
    cpu.pc = pc;
    cpu
}

#[test]
fn jp_nn_sets_pc_and_costs_16_cycles() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xc3, 0x34, 0x12]); // JP 0x1234
    let mut cpu = cpu_at(0xc000);
    let cycles = cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0x1234);
    assert_eq!(cycles, 16);
}

#[test]
fn jp_cond_takes_or_skips_based_on_flag() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xca, 0x00, 0xd0]); // JP Z,0xd000
    let mut cpu = cpu_at(0xc000);
    cpu.flag_z = false;
    let cycles = cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xc003); // fell through
    assert_eq!(cycles, 12);

    let mut cpu2 = cpu_at(0xc000);
    cpu2.flag_z = true;
    let cycles2 = cpu2.step(&mut bus);
    assert_eq!(cpu2.pc, 0xd000);
    assert_eq!(cycles2, 16);
}

#[test]
fn jr_signed_offset_can_branch_backward() {
    let mut bus = TestBus::new();
    bus.load(0xc010, &[0x18, 0xfe]); // JR -2 (infinite loop back to itself)
    let mut cpu = cpu_at(0xc010);
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xc010);
}

#[test]
fn call_and_ret_round_trip_through_the_stack() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xcd, 0x00, 0xd0]); // CALL 0xd000
    bus.load(0xd000, &[0xc9]); // RET
    let mut cpu = cpu_at(0xc000);
    cpu.sp = 0xfffe;
    let call_cycles = cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xd000);
    assert_eq!(call_cycles, 24);
    let ret_cycles = cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xc003);
    assert_eq!(ret_cycles, 16);
    assert_eq!(cpu.sp, 0xfffe); // stack balanced
}

#[test]
fn call_cond_false_does_not_push_and_costs_12_cycles() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xc4, 0x00, 0xd0]); // CALL NZ,0xd000
    let mut cpu = cpu_at(0xc000);
    cpu.sp = 0xfffe;
    cpu.flag_z = true; // NZ is false
    let cycles = cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0xc003);
    assert_eq!(cpu.sp, 0xfffe);
    assert_eq!(cycles, 12);
}

#[test]
fn rst_vectors_push_return_address_and_jump_to_fixed_slot() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xef]); // RST 0x28
    let mut cpu = cpu_at(0xc000);
    cpu.sp = 0xfffe;
    cpu.step(&mut bus);
    assert_eq!(cpu.pc, 0x0028);
    assert_eq!(cpu.sp, 0xfffc);
    assert_eq!(bus.read_word(0xfffc), 0xc001);
}

#[test]
fn push_pop_bc_round_trips() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xc5, 0xd1]); // PUSH BC ; POP DE
    let mut cpu = cpu_at(0xc000);
    cpu.sp = 0xfffe;
    cpu.set_bc(0xbeef);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.de(), 0xbeef);
}

#[test]
fn stop_consumes_a_padding_byte_and_sets_stopped() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0x10, 0x00, 0x00]); // STOP ; (padding) ; NOP
    let mut cpu = cpu_at(0xc000);
    cpu.step(&mut bus);
    assert!(cpu.stopped);
    assert_eq!(cpu.pc, 0xc002);
}

#[test]
fn illegal_opcode_is_reported_and_does_not_advance_execution() {
    let mut bus = TestBus::new();
    bus.load(0xc000, &[0xdd]); // illegal on SM83
    let mut cpu = cpu_at(0xc000);
    cpu.step(&mut bus);
    assert_eq!(cpu.stuck, Some((0xc000, 0xdd)));
}
