//! SPC700 (SNES audio co-processor) catalog.
//!
//! Scope note: representative subset covering accumulator load/store,
//! direct-page addressing, branches and the common control instructions;
//! not the complete SPC700 ISA.

use crate::instructions::catalog::{InstructionCatalog, OpcodeEntry};
use crate::instructions::mode::AddressingMode as M;

#[must_use]
pub fn build() -> InstructionCatalog {
	let mut cat = InstructionCatalog::new();
	use OpcodeEntry as E;

	cat.insert("mov a, #imm", M::Immediate, E::fixed(0xE8, 1));
	cat.insert("mov a, dp", M::ZeroPage, E::fixed(0xE4, 1));
	cat.insert("mov a, dp+x", M::ZeroPageX, E::fixed(0xF4, 1));
	cat.insert("mov a, !abs", M::Absolute, E::fixed(0xE5, 2));
	cat.insert("mov a, !abs+x", M::AbsoluteX, E::fixed(0xF5, 2));
	cat.insert("mov a, !abs+y", M::AbsoluteY, E::fixed(0xF6, 2));
	cat.insert("mov a, (x)", M::RegisterIndirect, E::fixed(0xE6, 0));
	cat.insert("mov a, [dp+x]", M::IndexedIndirect, E::fixed(0xE7, 1));
	cat.insert("mov a, [dp]+y", M::IndirectIndexed, E::fixed(0xF7, 1));

	cat.insert("mov dp, a", M::ZeroPage, E::fixed(0xC4, 1));
	cat.insert("mov !abs, a", M::Absolute, E::fixed(0xC5, 2));
	cat.insert("mov x, #imm", M::Immediate, E::fixed(0xCD, 1));
	cat.insert("mov y, #imm", M::Immediate, E::fixed(0x8D, 1));

	cat.insert("adc a, #imm", M::Immediate, E::fixed(0x88, 1));
	cat.insert("sbc a, #imm", M::Immediate, E::fixed(0xA8, 1));
	cat.insert("and a, #imm", M::Immediate, E::fixed(0x28, 1));
	cat.insert("or a, #imm", M::Immediate, E::fixed(0x08, 1));
	cat.insert("eor a, #imm", M::Immediate, E::fixed(0x48, 1));
	cat.insert("cmp a, #imm", M::Immediate, E::fixed(0x68, 1));

	cat.insert("inc a", M::Implied, E::fixed(0xBC, 0));
	cat.insert("dec a", M::Implied, E::fixed(0x9C, 0));
	cat.insert("inc x", M::Implied, E::fixed(0x3D, 0));
	cat.insert("dec x", M::Implied, E::fixed(0x1D, 0));
	cat.insert("inc y", M::Implied, E::fixed(0xFC, 0));
	cat.insert("dec y", M::Implied, E::fixed(0xDC, 0));

	cat.insert("nop", M::Implied, E::fixed(0x00, 0));
	cat.insert("sleep", M::Implied, E::fixed(0xEF, 0));
	cat.insert("stop", M::Implied, E::fixed(0xFF, 0));
	cat.insert("ret", M::Implied, E::fixed(0x6F, 0));
	cat.insert("reti", M::Implied, E::fixed(0x7F, 0));
	cat.insert("ei", M::Implied, E::fixed(0xA0, 0));
	cat.insert("di", M::Implied, E::fixed(0xC0, 0));

	cat.insert("jmp !abs", M::Absolute, E::fixed(0x5F, 2));
	cat.insert("call !abs", M::Absolute, E::fixed(0x3F, 2));
	cat.insert("bra r", M::Relative, E::branch(0x2F, 1));
	for (cond, opcode) in [("beq", 0xF0u8), ("bne", 0xD0), ("bcs", 0xB0), ("bcc", 0x90), ("bvs", 0x70), ("bvc", 0x50), ("bmi", 0x30), ("bpl", 0x10)] {
		cat.insert(cond, M::Relative, E::branch(opcode, 1));
	}

	cat
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accumulator_immediate_load() {
		let cat = build();
		assert_eq!(cat.lookup("mov a, #imm", M::Immediate).unwrap().opcode, vec![0xE8]);
	}

	#[test]
	fn branch_present() {
		let cat = build();
		assert!(cat.lookup("bra r", M::Relative).unwrap().is_branch);
	}
}
