//! Instruction catalogs for every supported target CPU.
//!
//! [`Target`] identifies a CPU variant; [`Target::catalog`] builds (and, via
//! [`Target::cached_catalog`], memoizes) the [`catalog::InstructionCatalog`]
//! that the code generator looks mnemonics up against.

pub mod catalog;
pub mod mode;
mod targets;

pub use catalog::{InstructionCatalog, OpcodeEntry};
pub use mode::{AddressingMode, SizeSuffix};

use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::RwLock;

/// Every CPU this assembler can emit code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Target {
	Mos6502,
	Mos6507,
	Wdc65C02,
	Wdc65816,
	Sm83,
	Z80,
	M68000,
	Arm7Tdmi,
	HuC6280,
	Spc700,
	V30Mz,
}

impl Target {
	/// Whether this family participates in the absolute-to-zero-page
	/// addressing mode narrowing described in §4.1, and whether its
	/// `Immediate` mode is excluded from that narrowing (true only for
	/// 65816, whose immediate width depends on the `m`/`x` flags rather
	/// than the operand's numeric value).
	#[must_use]
	pub fn narrows_absolute_to_zero_page(self) -> bool {
		matches!(self, Self::Mos6502 | Self::Mos6507 | Self::Wdc65C02 | Self::Wdc65816 | Self::HuC6280)
	}

	#[must_use]
	pub fn excludes_immediate_from_narrowing(self) -> bool {
		matches!(self, Self::Wdc65816)
	}

	/// Build a fresh instruction catalog for this target.
	#[must_use]
	pub fn build_catalog(self) -> InstructionCatalog {
		match self {
			Self::Mos6502 | Self::Mos6507 => targets::mos6502::build("6502"),
			Self::Wdc65C02 => targets::mos6502::build("65c02"),
			Self::HuC6280 => targets::mos6502::build("huc6280"),
			Self::Wdc65816 => targets::wdc65816::build(),
			Self::Sm83 => targets::sm83::build(),
			Self::Z80 => targets::z80::build(),
			Self::M68000 => targets::m68000::build(),
			Self::Arm7Tdmi => targets::arm7tdmi::build(),
			Self::Spc700 => targets::spc700::build(),
			Self::V30Mz => targets::v30mz::build(),
		}
	}

	/// Return a cached catalog for this target, building it once per
	/// process. Catalog construction touches hundreds of hash-map inserts;
	/// this avoids repeating it once per assembled file or test.
	#[must_use]
	pub fn cached_catalog(self) -> &'static InstructionCatalog {
		static CACHE: OnceLock<RwLock<HashMap<Target, &'static InstructionCatalog>>> = OnceLock::new();
		let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));

		if let Some(cat) = cache.read().unwrap().get(&self) {
			return cat;
		}

		let built: &'static InstructionCatalog = Box::leak(Box::new(self.build_catalog()));
		cache.write().unwrap().insert(self, built);
		built
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn each_target_has_a_catalog() {
		for target in [
			Target::Mos6502,
			Target::Mos6507,
			Target::Wdc65C02,
			Target::Wdc65816,
			Target::Sm83,
			Target::Z80,
			Target::M68000,
			Target::Arm7Tdmi,
			Target::HuC6280,
			Target::Spc700,
			Target::V30Mz,
		] {
			let cat = target.cached_catalog();
			assert!(cat.knows_mnemonic("nop") || cat.knows_mnemonic("mov a, #imm"));
		}
	}

	#[test]
	fn only_65816_excludes_immediate_from_narrowing() {
		assert!(Target::Wdc65816.excludes_immediate_from_narrowing());
		assert!(!Target::Mos6502.excludes_immediate_from_narrowing());
	}
}
