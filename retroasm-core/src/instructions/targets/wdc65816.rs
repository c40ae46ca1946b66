//! 65816 catalog: a 6502 superset with a 24-bit address space, direct-page
//! and program-bank registers, long addressing and block moves.
//!
//! Note the open design question recorded in `DESIGN.md`: the 65816's own
//! `Immediate` mode is deliberately excluded from the absolute-narrowing
//! substitution performed in `catalog::narrow`, because its width depends
//! on the assembler's current `m`/`x` flags rather than the operand value —
//! narrowing it the way 6502 `Absolute` narrows to `ZeroPage` would silently
//! truncate a 16-bit immediate operand.

use crate::instructions::catalog::{InstructionCatalog, OpcodeEntry};
use crate::instructions::mode::AddressingMode as M;

#[must_use]
pub fn build() -> InstructionCatalog {
	let mut cat = super::mos6502::build("65c02");
	use OpcodeEntry as E;

	cat.insert("lda", M::AbsoluteLong, E::fixed(0xAF, 3));
	cat.insert("lda", M::AbsoluteLongX, E::fixed(0xBF, 3));
	cat.insert("lda", M::StackRelative, E::fixed(0xA3, 1));
	cat.insert("lda", M::StackRelativeIndirectIndexed, E::fixed(0xB3, 1));
	cat.insert("lda", M::DirectPageIndirectLong, E::fixed(0xA7, 1));
	cat.insert("lda", M::DirectPageIndirectLongY, E::fixed(0xB7, 1));

	cat.insert("sta", M::AbsoluteLong, E::fixed(0x8F, 3));
	cat.insert("sta", M::AbsoluteLongX, E::fixed(0x9F, 3));
	cat.insert("sta", M::StackRelative, E::fixed(0x83, 1));
	cat.insert("sta", M::StackRelativeIndirectIndexed, E::fixed(0x93, 1));
	cat.insert("sta", M::DirectPageIndirectLong, E::fixed(0x87, 1));
	cat.insert("sta", M::DirectPageIndirectLongY, E::fixed(0x97, 1));

	cat.insert("jmp", M::AbsoluteLong, E::fixed(0x5C, 3));
	cat.insert("jmp", M::AbsoluteIndirectLong, E::fixed(0xDC, 2));
	cat.insert("jsr", M::AbsoluteIndexedIndirect, E::fixed(0xFC, 2));
	cat.insert("jsl", M::AbsoluteLong, E::fixed(0x22, 3));
	cat.insert("rtl", M::Implied, E::fixed(0x6B, 0));

	cat.insert("mvn", M::BlockMove, E::fixed(0x54, 2));
	cat.insert("mvp", M::BlockMove, E::fixed(0x44, 2));

	cat.insert("brl", M::Relative, E::branch(0x82, 2));
	cat.insert("per", M::Relative, E::fixed(0x62, 2));

	cat.insert("pea", M::Absolute, E::fixed(0xF4, 2));
	cat.insert("pei", M::ZeroPageIndirect, E::fixed(0xC4, 1));

	cat.insert("phb", M::Implied, E::fixed(0x8B, 0));
	cat.insert("phd", M::Implied, E::fixed(0x0B, 0));
	cat.insert("phk", M::Implied, E::fixed(0x4B, 0));
	cat.insert("plb", M::Implied, E::fixed(0xAB, 0));
	cat.insert("pld", M::Implied, E::fixed(0x2B, 0));

	cat.insert("rep", M::Immediate, E::fixed(0xC2, 1));
	cat.insert("sep", M::Immediate, E::fixed(0xE2, 1));

	cat.insert("xba", M::Implied, E::fixed(0xEB, 0));
	cat.insert("xce", M::Implied, E::fixed(0xFB, 0));
	cat.insert("tcd", M::Implied, E::fixed(0x5B, 0));
	cat.insert("tdc", M::Implied, E::fixed(0x7B, 0));
	cat.insert("tcs", M::Implied, E::fixed(0x1B, 0));
	cat.insert("tsc", M::Implied, E::fixed(0x3B, 0));
	cat.insert("txy", M::Implied, E::fixed(0x9B, 0));
	cat.insert("tyx", M::Implied, E::fixed(0xBB, 0));

	cat.insert("cop", M::Immediate, E::fixed(0x02, 1));
	cat.insert("wdm", M::Immediate, E::fixed(0x42, 1));
	cat.insert("stp", M::Implied, E::fixed(0xDB, 0));
	cat.insert("wai", M::Implied, E::fixed(0xCB, 0));

	cat
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn long_addressing_present() {
		let cat = build();
		assert_eq!(cat.lookup("lda", M::AbsoluteLong).unwrap().operand_size, 3);
	}

	#[test]
	fn inherits_6502_base() {
		let cat = build();
		assert_eq!(cat.lookup("lda", M::Immediate).unwrap().opcode, vec![0xA9]);
	}
}
