//! Catalog builder shared by the 6502, 6507, 65C02 and HuC6280 targets.
//!
//! The four targets are one family with a strictly growing instruction set:
//! 6507 is a pin-reduced 6502 (same opcodes, smaller address bus), 65C02
//! adds a handful of new mnemonics and addressing modes, HuC6280 adds a
//! further block-transfer and zero-page-bit set on top of 65C02. Each
//! `build_*` function starts from the previous tier's table.

use crate::instructions::catalog::{InstructionCatalog, OpcodeEntry};
use crate::instructions::mode::AddressingMode as M;

fn insert_base(cat: &mut InstructionCatalog) {
	use OpcodeEntry as E;

	let group = [
		("lda", [0xA9, 0xA5, 0xB5, 0xAD, 0xBD, 0xB9, 0xA1, 0xB1]),
		("adc", [0x69, 0x65, 0x75, 0x6D, 0x7D, 0x79, 0x61, 0x71]),
		("sbc", [0xE9, 0xE5, 0xF5, 0xED, 0xFD, 0xF9, 0xE1, 0xF1]),
		("and", [0x29, 0x25, 0x35, 0x2D, 0x3D, 0x39, 0x21, 0x31]),
		("ora", [0x09, 0x05, 0x15, 0x0D, 0x1D, 0x19, 0x01, 0x11]),
		("eor", [0x49, 0x45, 0x55, 0x4D, 0x5D, 0x59, 0x41, 0x51]),
		("cmp", [0xC9, 0xC5, 0xD5, 0xCD, 0xDD, 0xD9, 0xC1, 0xD1]),
	];
	// modes: Immediate, ZeroPage, ZeroPageX, Absolute, AbsoluteX, AbsoluteY, IndexedIndirect, IndirectIndexed
	let modes = [
		M::Immediate,
		M::ZeroPage,
		M::ZeroPageX,
		M::Absolute,
		M::AbsoluteX,
		M::AbsoluteY,
		M::IndexedIndirect,
		M::IndirectIndexed,
	];
	let sizes = [1u8, 1, 1, 2, 2, 2, 1, 1];
	for (mnemonic, opcodes) in group {
		for (i, op) in opcodes.into_iter().enumerate() {
			cat.insert(mnemonic, modes[i], E::fixed(op, sizes[i]));
		}
	}

	cat.insert("ldx", M::Immediate, E::fixed(0xA2, 1));
	cat.insert("ldx", M::ZeroPage, E::fixed(0xA6, 1));
	cat.insert("ldx", M::ZeroPageY, E::fixed(0xB6, 1));
	cat.insert("ldx", M::Absolute, E::fixed(0xAE, 2));
	cat.insert("ldx", M::AbsoluteY, E::fixed(0xBE, 2));

	cat.insert("ldy", M::Immediate, E::fixed(0xA0, 1));
	cat.insert("ldy", M::ZeroPage, E::fixed(0xA4, 1));
	cat.insert("ldy", M::ZeroPageX, E::fixed(0xB4, 1));
	cat.insert("ldy", M::Absolute, E::fixed(0xAC, 2));
	cat.insert("ldy", M::AbsoluteX, E::fixed(0xBC, 2));

	cat.insert("sta", M::ZeroPage, E::fixed(0x85, 1));
	cat.insert("sta", M::ZeroPageX, E::fixed(0x95, 1));
	cat.insert("sta", M::Absolute, E::fixed(0x8D, 2));
	cat.insert("sta", M::AbsoluteX, E::fixed(0x9D, 2));
	cat.insert("sta", M::AbsoluteY, E::fixed(0x99, 2));
	cat.insert("sta", M::IndexedIndirect, E::fixed(0x81, 1));
	cat.insert("sta", M::IndirectIndexed, E::fixed(0x91, 1));

	cat.insert("stx", M::ZeroPage, E::fixed(0x86, 1));
	cat.insert("stx", M::ZeroPageY, E::fixed(0x96, 1));
	cat.insert("stx", M::Absolute, E::fixed(0x8E, 2));

	cat.insert("sty", M::ZeroPage, E::fixed(0x84, 1));
	cat.insert("sty", M::ZeroPageX, E::fixed(0x94, 1));
	cat.insert("sty", M::Absolute, E::fixed(0x8C, 2));

	for (mnemonic, opcode) in [
		("tax", 0xAA), ("tay", 0xA8), ("txa", 0x8A), ("tya", 0x98), ("tsx", 0xBA), ("txs", 0x9A),
		("pha", 0x48), ("php", 0x08), ("pla", 0x68), ("plp", 0x28),
		("inx", 0xE8), ("iny", 0xC8), ("dex", 0xCA), ("dey", 0x88),
		("clc", 0x18), ("sec", 0x38), ("cli", 0x58), ("sei", 0x78),
		("clv", 0xB8), ("cld", 0xD8), ("sed", 0xF8),
		("nop", 0xEA), ("rti", 0x40), ("rts", 0x60), ("brk", 0x00),
	] {
		cat.insert(mnemonic, M::Implied, E::fixed(opcode, 0));
	}

	cat.insert("asl", M::Accumulator, E::fixed(0x0A, 0));
	cat.insert("asl", M::ZeroPage, E::fixed(0x06, 1));
	cat.insert("asl", M::ZeroPageX, E::fixed(0x16, 1));
	cat.insert("asl", M::Absolute, E::fixed(0x0E, 2));
	cat.insert("asl", M::AbsoluteX, E::fixed(0x1E, 2));

	cat.insert("lsr", M::Accumulator, E::fixed(0x4A, 0));
	cat.insert("lsr", M::ZeroPage, E::fixed(0x46, 1));
	cat.insert("lsr", M::ZeroPageX, E::fixed(0x56, 1));
	cat.insert("lsr", M::Absolute, E::fixed(0x4E, 2));
	cat.insert("lsr", M::AbsoluteX, E::fixed(0x5E, 2));

	cat.insert("rol", M::Accumulator, E::fixed(0x2A, 0));
	cat.insert("rol", M::ZeroPage, E::fixed(0x26, 1));
	cat.insert("rol", M::ZeroPageX, E::fixed(0x36, 1));
	cat.insert("rol", M::Absolute, E::fixed(0x2E, 2));
	cat.insert("rol", M::AbsoluteX, E::fixed(0x3E, 2));

	cat.insert("ror", M::Accumulator, E::fixed(0x6A, 0));
	cat.insert("ror", M::ZeroPage, E::fixed(0x66, 1));
	cat.insert("ror", M::ZeroPageX, E::fixed(0x76, 1));
	cat.insert("ror", M::Absolute, E::fixed(0x6E, 2));
	cat.insert("ror", M::AbsoluteX, E::fixed(0x7E, 2));

	cat.insert("inc", M::ZeroPage, E::fixed(0xE6, 1));
	cat.insert("inc", M::ZeroPageX, E::fixed(0xF6, 1));
	cat.insert("inc", M::Absolute, E::fixed(0xEE, 2));
	cat.insert("inc", M::AbsoluteX, E::fixed(0xFE, 2));

	cat.insert("dec", M::ZeroPage, E::fixed(0xC6, 1));
	cat.insert("dec", M::ZeroPageX, E::fixed(0xD6, 1));
	cat.insert("dec", M::Absolute, E::fixed(0xCE, 2));
	cat.insert("dec", M::AbsoluteX, E::fixed(0xDE, 2));

	cat.insert("bit", M::ZeroPage, E::fixed(0x24, 1));
	cat.insert("bit", M::Absolute, E::fixed(0x2C, 2));

	cat.insert("cpx", M::Immediate, E::fixed(0xE0, 1));
	cat.insert("cpx", M::ZeroPage, E::fixed(0xE4, 1));
	cat.insert("cpx", M::Absolute, E::fixed(0xEC, 2));

	cat.insert("cpy", M::Immediate, E::fixed(0xC0, 1));
	cat.insert("cpy", M::ZeroPage, E::fixed(0xC4, 1));
	cat.insert("cpy", M::Absolute, E::fixed(0xCC, 2));

	cat.insert("jmp", M::Absolute, E::fixed(0x4C, 2));
	cat.insert("jmp", M::Indirect, E::fixed(0x6C, 2));
	cat.insert("jsr", M::Absolute, E::fixed(0x20, 2));

	for (mnemonic, opcode) in [
		("bpl", 0x10), ("bmi", 0x30), ("bvc", 0x50), ("bvs", 0x70),
		("bcc", 0x90), ("bcs", 0xB0), ("bne", 0xD0), ("beq", 0xF0),
	] {
		cat.insert(mnemonic, M::Relative, E::branch(opcode, 1));
	}
}

fn insert_65c02(cat: &mut InstructionCatalog) {
	use OpcodeEntry as E;

	cat.insert("sta", M::ZeroPageIndirect, E::fixed(0x92, 1));
	cat.insert("lda", M::ZeroPageIndirect, E::fixed(0xB2, 1));
	cat.insert("adc", M::ZeroPageIndirect, E::fixed(0x72, 1));
	cat.insert("sbc", M::ZeroPageIndirect, E::fixed(0xF2, 1));
	cat.insert("and", M::ZeroPageIndirect, E::fixed(0x32, 1));
	cat.insert("ora", M::ZeroPageIndirect, E::fixed(0x12, 1));
	cat.insert("eor", M::ZeroPageIndirect, E::fixed(0x52, 1));
	cat.insert("cmp", M::ZeroPageIndirect, E::fixed(0xD2, 1));

	cat.insert("bra", M::Relative, E::branch(0x80, 1));
	cat.insert("phx", M::Implied, E::fixed(0xDA, 0));
	cat.insert("phy", M::Implied, E::fixed(0x5A, 0));
	cat.insert("plx", M::Implied, E::fixed(0xFA, 0));
	cat.insert("ply", M::Implied, E::fixed(0x7A, 0));
	cat.insert("stz", M::ZeroPage, E::fixed(0x64, 1));
	cat.insert("stz", M::ZeroPageX, E::fixed(0x74, 1));
	cat.insert("stz", M::Absolute, E::fixed(0x9C, 2));
	cat.insert("stz", M::AbsoluteX, E::fixed(0x9E, 2));
	cat.insert("trb", M::ZeroPage, E::fixed(0x14, 1));
	cat.insert("trb", M::Absolute, E::fixed(0x1C, 2));
	cat.insert("tsb", M::ZeroPage, E::fixed(0x04, 1));
	cat.insert("tsb", M::Absolute, E::fixed(0x0C, 2));
	cat.insert("inc", M::Accumulator, E::fixed(0x1A, 0));
	cat.insert("dec", M::Accumulator, E::fixed(0x3A, 0));
	cat.insert("jmp", M::AbsoluteIndirectX, E::fixed(0x7C, 2));
}

fn insert_huc6280(cat: &mut InstructionCatalog) {
	use OpcodeEntry as E;

	cat.insert("sax", M::Implied, E::fixed(0x22, 0));
	cat.insert("say", M::Implied, E::fixed(0x42, 0));
	cat.insert("sxy", M::Implied, E::fixed(0x02, 0));
	cat.insert("csl", M::Implied, E::fixed(0x54, 0));
	cat.insert("csh", M::Implied, E::fixed(0xD4, 0));
	cat.insert("cla", M::Implied, E::fixed(0x62, 0));
	cat.insert("clx", M::Implied, E::fixed(0x82, 0));
	cat.insert("cly", M::Implied, E::fixed(0xC2, 0));
	cat.insert("set", M::Implied, E::fixed(0xF4, 0));
	cat.insert("tii", M::BlockTransfer, E::wide([0x73u8], 6));
	cat.insert("tdd", M::BlockTransfer, E::wide([0xC3u8], 6));
	cat.insert("tin", M::BlockTransfer, E::wide([0xD3u8], 6));
	cat.insert("tia", M::BlockTransfer, E::wide([0xE3u8], 6));
	cat.insert("tai", M::BlockTransfer, E::wide([0xF3u8], 6));
	cat.insert("tst", M::ZeroPageRelative, E::wide([0x83u8], 3));
	for (bit_mnemonic, opcode) in [("smb", 0x87u8), ("rmb", 0x07u8)] {
		cat.insert(bit_mnemonic, M::ZeroPageBit, E::fixed(opcode, 1));
	}
}

/// Build the catalog for `target`, one of `"6502"`, `"6507"`, `"65c02"`,
/// `"huc6280"` (case-insensitive).
#[must_use]
pub fn build(target: &str) -> InstructionCatalog {
	let mut cat = InstructionCatalog::new();
	insert_base(&mut cat);
	match target.to_ascii_lowercase().as_str() {
		"65c02" => insert_65c02(&mut cat),
		"huc6280" => {
			insert_65c02(&mut cat);
			insert_huc6280(&mut cat);
		}
		_ => {}
	}
	cat
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_lda_immediate() {
		let cat = build("6502");
		assert_eq!(cat.lookup("lda", M::Immediate).unwrap().opcode, vec![0xA9]);
		assert!(cat.lookup("bra", M::Relative).is_none());
	}

	#[test]
	fn c02_adds_bra_but_6502_lacks_it() {
		let cat = build("65c02");
		assert_eq!(cat.lookup("bra", M::Relative).unwrap().opcode, vec![0x80]);
	}

	#[test]
	fn huc6280_adds_block_transfer() {
		let cat = build("huc6280");
		assert_eq!(cat.lookup("tii", M::BlockTransfer).unwrap().operand_size, 6);
		assert_eq!(cat.lookup("bra", M::Relative).unwrap().opcode, vec![0x80]);
	}
}
