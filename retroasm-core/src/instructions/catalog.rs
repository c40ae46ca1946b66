//! The instruction-set catalog: the single source of truth mapping a
//! `(mnemonic, addressing mode)` pair to an opcode encoding for a given
//! target.
//!
//! Each target family (6502-and-kin, 65816, SM83, Z80, M68000, ARM7TDMI,
//! V30MZ) populates one of these tables. Lookup is case-insensitive on the
//! mnemonic; the table itself stores lower-case keys.

use std::collections::HashMap;

use crate::instructions::mode::AddressingMode;

/// A single catalog entry: the opcode byte sequence to emit ahead of the
/// operand bytes, and how many operand bytes follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeEntry {
	/// Opcode bytes emitted verbatim before the operand (usually one byte;
	/// two for 65C02/HuC6280 some-prefixed forms is not needed here, but
	/// M68000 word opcodes use this to carry a 16-bit base word).
	pub opcode: Vec<u8>,
	/// Size in bytes of the operand that follows the opcode bytes. Zero for
	/// implied-style modes.
	pub operand_size: u8,
	/// Whether this opcode counts as a branch/relative-jump instruction for
	/// the purposes of §4.2 step 8's displacement calculation.
	pub is_branch: bool,
}

impl OpcodeEntry {
	#[must_use]
	pub fn fixed(opcode: u8, operand_size: u8) -> Self {
		Self { opcode: vec![opcode], operand_size, is_branch: false }
	}

	#[must_use]
	pub fn branch(opcode: u8, operand_size: u8) -> Self {
		Self { opcode: vec![opcode], operand_size, is_branch: true }
	}

	#[must_use]
	pub fn wide(opcode: impl Into<Vec<u8>>, operand_size: u8) -> Self {
		Self { opcode: opcode.into(), operand_size, is_branch: false }
	}
}

/// Per-target instruction table, built once and looked up many times during
/// code generation.
#[derive(Debug, Default)]
pub struct InstructionCatalog {
	entries: HashMap<(String, AddressingMode), OpcodeEntry>,
}

impl InstructionCatalog {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, mnemonic: &str, mode: AddressingMode, entry: OpcodeEntry) {
		self.entries.insert((mnemonic.to_ascii_lowercase(), mode), entry);
	}

	/// Look up an exact `(mnemonic, mode)` pair. Callers implement the
	/// absolute-to-zero-page narrowing fallback themselves (see
	/// [`AddressingMode::narrowed_zero_page_form`]) before calling this a
	/// second time, since narrowing is target-family-specific policy, not a
	/// catalog concern.
	#[must_use]
	pub fn lookup(&self, mnemonic: &str, mode: AddressingMode) -> Option<&OpcodeEntry> {
		self.entries.get(&(mnemonic.to_ascii_lowercase(), mode))
	}

	/// True if the mnemonic exists in the catalog under any addressing mode.
	/// Used to distinguish "bad mnemonic" from "bad mode for this mnemonic"
	/// when building a [`crate::core::interfaces::CodeError`].
	#[must_use]
	pub fn knows_mnemonic(&self, mnemonic: &str) -> bool {
		let lower = mnemonic.to_ascii_lowercase();
		self.entries.keys().any(|(m, _)| m == &lower)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_and_lookup_is_case_insensitive() {
		let mut cat = InstructionCatalog::new();
		cat.insert("LDA", AddressingMode::Immediate, OpcodeEntry::fixed(0xA9, 1));
		assert_eq!(cat.lookup("lda", AddressingMode::Immediate).unwrap().opcode, vec![0xA9]);
		assert!(cat.lookup("lda", AddressingMode::Absolute).is_none());
		assert!(cat.knows_mnemonic("LdA"));
		assert!(!cat.knows_mnemonic("xyz"));
	}
}
