// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Exercises the instruction decode logic.
use super::*;
use crate::cpu::mem::FONT;

const INDX: &[u8; 16] = b"\0\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\x0d\x0e\x0f";

/// runs one arbitrary operation on a brand new CPU
/// returns the CPU for inspection
fn run_single_op(op: &[u8]) -> CPU {
    let (mut cpu, mut screen) = (CPU::default(), Screen::default());
    cpu.load_program_bytes(op).unwrap();
    cpu.v = *INDX;
    cpu.tick(&mut screen);
    cpu
}

#[rustfmt::skip]
mod sys {
    use super::*;
    #[test] fn cls()   { assert_eq!(0x202, run_single_op(b"\x00\xe0").pc); }
    #[test] fn ret()   { assert!(run_single_op(b"\x00\xee").fault().is_some()); }
    #[test] fn halt()  { assert!(run_single_op(b"\x00\x00").is_halted()); }
    #[test] fn u0420() { assert_eq!(0x202, run_single_op(b"\x04\x20").pc); }
    #[test] fn u00e1() { assert_eq!(0x202, run_single_op(b"\x00\xe1").pc); }
}
#[rustfmt::skip]
mod jump {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x12\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x12\x31").pc); }
}
#[rustfmt::skip]
mod call {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x22\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x22\x31").pc); }
    #[test] fn pushes()    { assert_eq!([0x200], run_single_op(b"\x22\x30").stack()); }
}
#[rustfmt::skip]
mod skeqb {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x30\x00").pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x30\x01").pc); }
}
#[rustfmt::skip]
mod skneb {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x40\x01").pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x40\x00").pc); }
}
#[rustfmt::skip]
mod skeq {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x50\x00").pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x50\x10").pc); }
    #[test] fn n1_skip()    { assert_eq!(0x204, run_single_op(b"\x5f\xf1").pc); }
    #[test] fn n7_skip()    { assert_eq!(0x204, run_single_op(b"\x5f\xf7").pc); }
    #[test] fn nf_skip()    { assert_eq!(0x204, run_single_op(b"\x5f\xff").pc); }
    #[test] fn n1_no_skip() { assert_eq!(0x202, run_single_op(b"\x51\x21").pc); }
}
#[rustfmt::skip]
mod movb {
    use super::*;
    #[test] fn w00() { assert_eq!(0x00, run_single_op(b"\x61\x00").v[1]); }
    #[test] fn wc5() { assert_eq!(0xc5, run_single_op(b"\x62\xc5").v[2]); }
    #[test] fn wff() { assert_eq!(0xff, run_single_op(b"\x63\xff").v[3]); }
}
#[rustfmt::skip]
mod addb {
    use super::*;
    #[test] fn p00() { assert_eq!(0x01, run_single_op(b"\x71\x00").v[1]); }
    #[test] fn pc5() { assert_eq!(0xc7, run_single_op(b"\x72\xc5").v[2]); }
    #[test] fn pff() { assert_eq!(0x02, run_single_op(b"\x73\xff").v[3]); }
    #[test] fn vf()  { assert_eq!(0x0f, run_single_op(b"\x73\xff").v[0xf]); }
}
#[rustfmt::skip]
mod alu {
    use super::*;
    #[test] fn mov()     { assert_eq!(0x02, run_single_op(b"\x81\x20").v[1]); }
    #[test] fn or()      { assert_eq!(0x03, run_single_op(b"\x81\x21").v[1]); }
    #[test] fn and()     { assert_eq!(0x00, run_single_op(b"\x81\x22").v[1]); }
    #[test] fn xor()     { assert_eq!(0x03, run_single_op(b"\x81\x23").v[1]); }
    #[test] fn add()     { assert_eq!(0x03, run_single_op(b"\x81\x24").v[1]); }
    #[test] fn add_vf()  { assert_eq!(0x00, run_single_op(b"\x81\x24").v[0xf]); }
    #[test] fn sub()     { assert_eq!(0xff, run_single_op(b"\x81\x25").v[1]); }
    #[test] fn sub_vf()  { assert_eq!(0x00, run_single_op(b"\x81\x25").v[0xf]); }
    #[test] fn shr()     { assert_eq!(0x00, run_single_op(b"\x81\x26").v[1]); }
    #[test] fn shr_vf()  { assert_eq!(0x01, run_single_op(b"\x81\x26").v[0xf]); }
    #[test] fn rsb()     { assert_eq!(0x01, run_single_op(b"\x81\x27").v[1]); }
    #[test] fn rsb_vf()  { assert_eq!(0x01, run_single_op(b"\x81\x27").v[0xf]); }
    #[test] fn shl()     { assert_eq!(0x02, run_single_op(b"\x81\x2e").v[1]); }
    #[test] fn shl_vf()  { assert_eq!(0x00, run_single_op(b"\x81\x2e").v[0xf]); }
    #[test] fn u8128()   { assert_eq!(0x202, run_single_op(b"\x81\x28").pc); }
    #[test] fn u812d()   { assert_eq!(0x202, run_single_op(b"\x81\x2d").pc); }
    #[test] fn u812f()   { assert_eq!(INDX, run_single_op(b"\x81\x2f").v()); }
}
#[rustfmt::skip]
mod skne {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x90\x10").pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x90\x00").pc); }
    #[test] fn n1_skip()    { assert_eq!(0x204, run_single_op(b"\x91\x21").pc); }
    #[test] fn nf_skip()    { assert_eq!(0x204, run_single_op(b"\x91\x2f").pc); }
    #[test] fn n1_no_skip() { assert_eq!(0x202, run_single_op(b"\x9f\xf1").pc); }
    #[test] fn nf_no_skip() { assert_eq!(0x202, run_single_op(b"\x9f\xff").pc); }
}
#[rustfmt::skip]
mod mvi {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\xa2\x30").i()); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\xa2\x31").i()); }
}
#[rustfmt::skip]
mod jmi {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\xb2\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\xb2\x31").pc); }
}
#[rustfmt::skip]
mod rand {
    use super::*;
    // for exhaustive testing, see src/cpu/tests.rs
    #[test] fn rand() { assert!(run_single_op(b"\xc0\x01").v[0] <= 1); }
    #[test] fn zero() { assert_eq!(0, run_single_op(b"\xc5\x00").v[5]); }
}
#[rustfmt::skip]
mod sprite {
    use super::*;
    #[test] fn draw()    { assert_eq!(0x202, run_single_op(b"\xd0\x0f").pc); }
    #[test] fn no_hit()  { assert_eq!(0x00, run_single_op(b"\xd0\x0f").v[0xf]); }
}
#[rustfmt::skip]
mod key {
    use super::*;
    #[test] fn skip_key_down() { assert_eq!(0x202, run_single_op(b"\xe0\x9e").pc); }
    #[test] fn skip_key_up()   { assert_eq!(0x204, run_single_op(b"\xe0\xa1").pc); }
    #[test] fn uefff()         { assert_eq!(0x202, run_single_op(b"\xef\xff").pc); }
}
#[rustfmt::skip]
mod io {
    use super::*;
    #[test] fn load_delay_timer()  { assert_eq!(0x0, run_single_op(b"\xf7\x07").v[7]);    }
    #[test] fn wait_for_key()      { assert!(run_single_op(b"\xf0\x0a").flags.keypause);  }
    #[test] fn wait_stalls()       { assert_eq!(0x200, run_single_op(b"\xf0\x0a").pc);    }
    // the first cycle lands on a timer tick
    #[test] fn store_delay_timer() { assert_eq!(0xe, run_single_op(b"\xff\x15").delay()); }
    #[test] fn store_sound_timer() { assert_eq!(0xe, run_single_op(b"\xff\x18").sound()); }
    #[test] fn sound_tone()        { assert!(run_single_op(b"\xff\x18").tone());          }
    #[test] fn add_i()             { assert_eq!(0x5, run_single_op(b"\xf5\x1e").i);       }
    #[test] fn load_sprite()       { assert_eq!(0x19, run_single_op(b"\xf5\x29").i);      }
    #[test] fn bcd_convert()       { assert_eq!(0x0, run_single_op(b"\xfc\x33").mem.read(0)); }
    #[test] fn store_dma()         { assert_eq!(INDX, &run_single_op(b"\xff\x55").mem.as_slice()[..16]); }
    #[test] fn load_dma()          { assert_eq!(&FONT[..16], run_single_op(b"\xff\x65").v()); }
    // unimplemented
    #[test] fn uffff()             { assert_eq!(0x202, run_single_op(b"\xff\xff").pc);    }
}
