//! Z80 catalog. Built the same way as the SM83 table (register operands
//! folded into the mnemonic) since the two CPUs share a common ancestor.
//!
//! Scope note: IX/IY displacement-indexed forms (`DD`/`FD`-prefixed
//! opcodes) and the extended `ED`-prefixed block/I/R instructions beyond
//! the core set below are not populated. A target this size would need its
//! own dedicated operand parser rather than the folded-mnemonic scheme used
//! here; left as a known gap rather than guessed at.

use crate::instructions::catalog::{InstructionCatalog, OpcodeEntry};
use crate::instructions::mode::AddressingMode as M;

const REGS: [&str; 8] = ["b", "c", "d", "e", "h", "l", "(hl)", "a"];

#[must_use]
pub fn build() -> InstructionCatalog {
	let mut cat = InstructionCatalog::new();
	use OpcodeEntry as E;

	for (dst_i, dst) in REGS.iter().enumerate() {
		for (src_i, src) in REGS.iter().enumerate() {
			let opcode = 0x40 + (dst_i as u8) * 8 + src_i as u8;
			if opcode == 0x76 {
				continue;
			}
			cat.insert(&format!("ld {dst}, {src}"), M::Implied, E::fixed(opcode, 0));
		}
	}
	cat.insert("halt", M::Implied, E::fixed(0x76, 0));

	for (i, reg) in REGS.iter().enumerate() {
		let opcode = 0x06 + (i as u8) * 8;
		cat.insert(&format!("ld {reg}, n"), M::Immediate8, E::fixed(opcode, 1));
	}

	cat.insert("ld a, (bc)", M::Implied, E::fixed(0x0A, 0));
	cat.insert("ld a, (de)", M::Implied, E::fixed(0x1A, 0));
	cat.insert("ld (bc), a", M::Implied, E::fixed(0x02, 0));
	cat.insert("ld (de), a", M::Implied, E::fixed(0x12, 0));
	cat.insert("ld a, (nn)", M::Extended, E::fixed(0x3A, 2));
	cat.insert("ld (nn), a", M::Extended, E::fixed(0x32, 2));
	cat.insert("ld hl, (nn)", M::Extended, E::fixed(0x2A, 2));
	cat.insert("ld (nn), hl", M::Extended, E::fixed(0x22, 2));
	cat.insert("ld sp, hl", M::Implied, E::fixed(0xF9, 0));

	for (rp, base) in [("bc", 0x01u8), ("de", 0x11), ("hl", 0x21), ("sp", 0x31)] {
		cat.insert(&format!("ld {rp}, nn"), M::Immediate16, E::fixed(base, 2));
	}
	for (rp, base) in [("bc", 0xC5u8), ("de", 0xD5), ("hl", 0xE5), ("af", 0xF5)] {
		cat.insert(&format!("push {rp}"), M::Implied, E::fixed(base, 0));
	}
	for (rp, base) in [("bc", 0xC1u8), ("de", 0xD1), ("hl", 0xE1), ("af", 0xF1)] {
		cat.insert(&format!("pop {rp}"), M::Implied, E::fixed(base, 0));
	}

	let arith: [(&str, u8); 8] = [
		("add a,", 0x80), ("adc a,", 0x88), ("sub", 0x90), ("sbc a,", 0x98),
		("and", 0xA0), ("xor", 0xA8), ("or", 0xB0), ("cp", 0xB8),
	];
	let arith_imm: [(&str, u8); 8] = [
		("add a,", 0xC6), ("adc a,", 0xCE), ("sub", 0xD6), ("sbc a,", 0xDE),
		("and", 0xE6), ("xor", 0xEE), ("or", 0xF6), ("cp", 0xFE),
	];
	for (mnemonic, base) in arith {
		for (i, reg) in REGS.iter().enumerate() {
			cat.insert(&format!("{mnemonic} {reg}"), M::Implied, E::fixed(base + i as u8, 0));
		}
	}
	for (mnemonic, opcode) in arith_imm {
		cat.insert(&format!("{mnemonic} n"), M::Immediate8, E::fixed(opcode, 1));
	}

	for (i, reg) in REGS.iter().enumerate() {
		cat.insert(&format!("inc {reg}"), M::Implied, E::fixed(0x04 + (i as u8) * 8, 0));
		cat.insert(&format!("dec {reg}"), M::Implied, E::fixed(0x05 + (i as u8) * 8, 0));
	}
	for (rp, base) in [("bc", 0x03u8), ("de", 0x13), ("hl", 0x23), ("sp", 0x33)] {
		cat.insert(&format!("inc {rp}"), M::Implied, E::fixed(base, 0));
	}
	for (rp, base) in [("bc", 0x09u8), ("de", 0x19), ("hl", 0x29), ("sp", 0x39)] {
		cat.insert(&format!("add hl, {rp}"), M::Implied, E::fixed(base, 0));
	}

	for (mnemonic, opcode) in [
		("nop", 0x00), ("daa", 0x27), ("cpl", 0x2F), ("scf", 0x37), ("ccf", 0x3F),
		("di", 0xF3), ("ei", 0xFB), ("exx", 0xD9), ("rlca", 0x07), ("rrca", 0x0F),
		("rla", 0x17), ("rra", 0x1F), ("ret", 0xC9),
		("ex af, af'", 0x08), ("ex de, hl", 0xEB), ("ex (sp), hl", 0xE3),
	] {
		cat.insert(mnemonic, M::Implied, E::fixed(opcode, 0));
	}

	cat.insert("jp nn", M::Extended, E::fixed(0xC3, 2));
	cat.insert("jp (hl)", M::Implied, E::fixed(0xE9, 0));
	cat.insert("call nn", M::Extended, E::fixed(0xCD, 2));
	cat.insert("djnz e", M::RelativeSigned, E::branch(0x10, 1));
	cat.insert("jr e", M::RelativeSigned, E::branch(0x18, 1));
	for (cond, jp, jr, call, ret) in [
		("nz", 0xC2u8, Some(0x20u8), 0xC4u8, 0xC0u8),
		("z", 0xCA, Some(0x28), 0xCC, 0xC8),
		("nc", 0xD2, Some(0x30), 0xD4, 0xD0),
		("c", 0xDA, Some(0x38), 0xDC, 0xD8),
		("po", 0xE2, None, 0xE4, 0xE0),
		("pe", 0xEA, None, 0xEC, 0xE8),
		("p", 0xF2, None, 0xF4, 0xF0),
		("m", 0xFA, None, 0xFC, 0xF8),
	] {
		cat.insert(&format!("jp {cond}, nn"), M::Extended, E::fixed(jp, 2));
		if let Some(jr_op) = jr {
			cat.insert(&format!("jr {cond}, e"), M::RelativeSigned, E::branch(jr_op, 1));
		}
		cat.insert(&format!("call {cond}, nn"), M::Extended, E::fixed(call, 2));
		cat.insert(&format!("ret {cond}"), M::Implied, E::fixed(ret, 0));
	}

	for n in 0u8..8 {
		cat.insert(&format!("rst {:02x}h", n * 8), M::Restart, E::fixed(0xC7 + n * 8, 0));
	}

	cat
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_load_and_jump() {
		let cat = build();
		assert_eq!(cat.lookup("ld a, (nn)", M::Extended).unwrap().opcode, vec![0x3A]);
		assert_eq!(cat.lookup("jp nn", M::Extended).unwrap().opcode, vec![0xC3]);
	}

	#[test]
	fn djnz_is_a_branch() {
		let cat = build();
		assert!(cat.lookup("djnz e", M::RelativeSigned).unwrap().is_branch);
	}
}
