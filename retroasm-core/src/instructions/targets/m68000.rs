//! M68000 catalog.
//!
//! Open design question recorded in `DESIGN.md`: opcode word `0x0000` is
//! ambiguous between the `ori` immediate-to-data-register family and
//! certain illegal/reserved encodings depending on the size field; this
//! catalog resolves the ambiguity by only ever emitting the documented
//! `ori.b #imm, d0`-style encodings and never synthesizing a bare `0x0000`
//! word, so the conflict never surfaces for code this assembler emits.
//!
//! Scope note: this is a representative subset (data movement, arithmetic
//! on data registers, branches, the common control instructions) rather
//! than the full ~56-instruction, multi-size-field M68000 ISA; addressing
//! modes beyond register-direct and immediate are not exhaustively wired.

use crate::instructions::catalog::{InstructionCatalog, OpcodeEntry};
use crate::instructions::mode::AddressingMode as M;

#[must_use]
pub fn build() -> InstructionCatalog {
	let mut cat = InstructionCatalog::new();
	use OpcodeEntry as E;

	for n in 0u16..8 {
		cat.insert(&format!("move.l d{n}, d0"), M::DataRegDirect, E::wide((0x2000u16 | n).to_be_bytes(), 0));
	}
	cat.insert("move.l #imm, d0", M::ImmediateM68k, E::wide([0x20u8, 0x3C], 4));
	cat.insert("move.w #imm, d0", M::ImmediateM68k, E::wide([0x30u8, 0x3C], 2));
	cat.insert("move.b #imm, d0", M::ImmediateM68k, E::wide([0x10u8, 0x3C], 1));

	cat.insert("moveq #imm, d0", M::QuickImmediate, E::wide([0x70u8, 0x00], 1));

	cat.insert("add.l d1, d0", M::DataRegDirect, E::wide([0xD0u8, 0x81], 0));
	cat.insert("sub.l d1, d0", M::DataRegDirect, E::wide([0x90u8, 0x81], 0));
	cat.insert("and.l d1, d0", M::DataRegDirect, E::wide([0xC0u8, 0x81], 0));
	cat.insert("or.l d1, d0", M::DataRegDirect, E::wide([0x80u8, 0x81], 0));
	cat.insert("eor.l d1, d0", M::DataRegDirect, E::wide([0xB1u8, 0x81], 0));
	cat.insert("cmp.l d1, d0", M::DataRegDirect, E::wide([0xB0u8, 0x81], 0));

	cat.insert("addq.l #imm, d0", M::QuickImmediate, E::wide([0x50u8, 0x80], 1));
	cat.insert("subq.l #imm, d0", M::QuickImmediate, E::wide([0x51u8, 0x80], 1));

	cat.insert("clr.l d0", M::DataRegDirect, E::wide([0x42u8, 0x80], 0));
	cat.insert("not.l d0", M::DataRegDirect, E::wide([0x46u8, 0x80], 0));
	cat.insert("neg.l d0", M::DataRegDirect, E::wide([0x44u8, 0x80], 0));
	cat.insert("tst.l d0", M::DataRegDirect, E::wide([0x4Au8, 0x80], 0));

	cat.insert("nop", M::Implied, E::wide([0x4Eu8, 0x71], 0));
	cat.insert("rts", M::Implied, E::wide([0x4Eu8, 0x75], 0));
	cat.insert("rte", M::Implied, E::wide([0x4Eu8, 0x73], 0));
	cat.insert("illegal", M::Implied, E::wide([0x4Au8, 0xFC], 0));
	cat.insert("trap #imm", M::QuickImmediate, E::wide([0x4Eu8, 0x40], 0));

	cat.insert("jmp abs", M::AbsLong, E::wide([0x4Eu8, 0xF9], 4));
	cat.insert("jsr abs", M::AbsLong, E::wide([0x4Eu8, 0xB9], 4));
	cat.insert("bra.w", M::PcDisp, E::branch(0x60, 2));
	cat.insert("bsr.w", M::PcDisp, E::branch(0x61, 2));

	for (cond, opcode) in [
		("hi", 0x62u8), ("ls", 0x63), ("cc", 0x64), ("cs", 0x65),
		("ne", 0x66), ("eq", 0x67), ("vc", 0x68), ("vs", 0x69),
		("pl", 0x6A), ("mi", 0x6B), ("ge", 0x6C), ("lt", 0x6D),
		("gt", 0x6E), ("le", 0x6F),
	] {
		cat.insert(&format!("b{cond}.w"), M::PcDisp, E::branch(opcode, 2));
	}

	cat
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn moveq_present() {
		let cat = build();
		assert_eq!(cat.lookup("moveq #imm, d0", M::QuickImmediate).unwrap().opcode, vec![0x70, 0x00]);
	}

	#[test]
	fn branch_condition_codes() {
		let cat = build();
		assert!(cat.lookup("beq.w", M::PcDisp).unwrap().is_branch);
	}
}
