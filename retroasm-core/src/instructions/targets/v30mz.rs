//! V30MZ (WonderSwan CPU, an 8086-compatible core) catalog.
//!
//! Scope note: a representative subset of the 8086 instruction set
//! (register/immediate moves, arithmetic on the accumulator, unconditional
//! and conditional short jumps, `int`, `hlt`); segment-prefixed and
//! string-instruction forms are not populated.

use crate::instructions::catalog::{InstructionCatalog, OpcodeEntry};
use crate::instructions::mode::AddressingMode as M;

#[must_use]
pub fn build() -> InstructionCatalog {
	let mut cat = InstructionCatalog::new();
	use OpcodeEntry as E;

	let regs8 = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];
	let regs16 = ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"];

	for (i, reg) in regs8.iter().enumerate() {
		cat.insert(&format!("mov {reg}, imm8"), M::ImmediateByte, E::fixed(0xB0 + i as u8, 1));
	}
	for (i, reg) in regs16.iter().enumerate() {
		cat.insert(&format!("mov {reg}, imm16"), M::ImmediateWord, E::fixed(0xB8 + i as u8, 2));
	}

	cat.insert("add al, imm8", M::ImmediateByte, E::fixed(0x04, 1));
	cat.insert("add ax, imm16", M::ImmediateWord, E::fixed(0x05, 2));
	cat.insert("sub al, imm8", M::ImmediateByte, E::fixed(0x2C, 1));
	cat.insert("sub ax, imm16", M::ImmediateWord, E::fixed(0x2D, 2));
	cat.insert("and al, imm8", M::ImmediateByte, E::fixed(0x24, 1));
	cat.insert("or al, imm8", M::ImmediateByte, E::fixed(0x0C, 1));
	cat.insert("xor al, imm8", M::ImmediateByte, E::fixed(0x34, 1));
	cat.insert("cmp al, imm8", M::ImmediateByte, E::fixed(0x3C, 1));

	for (i, reg) in regs16.iter().enumerate() {
		cat.insert(&format!("push {reg}"), M::RegisterOperand, E::fixed(0x50 + i as u8, 0));
		cat.insert(&format!("pop {reg}"), M::RegisterOperand, E::fixed(0x58 + i as u8, 0));
	}

	cat.insert("jmp rel8", M::RelativeShort, E::branch(0xEB, 1));
	cat.insert("call rel16", M::RelativeNear, E::branch(0xE8, 2));
	cat.insert("ret", M::Implied, E::fixed(0xC3, 0));
	cat.insert("hlt", M::Implied, E::fixed(0xF4, 0));
	cat.insert("nop", M::Implied, E::fixed(0x90, 0));
	cat.insert("cli", M::Implied, E::fixed(0xFA, 0));
	cat.insert("sti", M::Implied, E::fixed(0xFB, 0));
	cat.insert("int imm8", M::ImmediateByte, E::fixed(0xCD, 1));

	for (cond, opcode) in [
		("jz", 0x74u8), ("jnz", 0x75), ("jc", 0x72), ("jnc", 0x73),
		("jo", 0x70), ("jno", 0x71), ("js", 0x78), ("jns", 0x79),
	] {
		cat.insert(cond, M::RelativeShort, E::branch(opcode, 1));
	}

	cat
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mov_immediate_to_register() {
		let cat = build();
		assert_eq!(cat.lookup("mov ax, imm16", M::ImmediateWord).unwrap().opcode, vec![0xB8]);
	}

	#[test]
	fn short_jump_is_relative() {
		let cat = build();
		assert!(cat.lookup("jmp rel8", M::RelativeShort).unwrap().is_branch);
	}
}
