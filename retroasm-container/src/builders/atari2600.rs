//! Atari 2600: a raw 2 KiB or 4 KiB ROM image with no header at all —
//! the cartridge's bank-switching method is a physical property of the
//! board, not an in-file field, so it's only used here to validate the
//! image size and to fill in a default reset vector when the caller
//! hasn't already placed one.

use retroasm_core::core::FlattenedImage;

use super::ContainerBuilder;
use crate::err::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankSwitching {
	None,
	F8,
	F6,
	F4,
	Fe,
	E0,
	Tristar3F,
	E7,
}

impl BankSwitching {
	#[must_use]
	pub fn rom_size(self) -> usize {
		match self {
			BankSwitching::None => 2 * 1024,
			BankSwitching::F8 | BankSwitching::Fe => 8 * 1024,
			BankSwitching::F6 | BankSwitching::Tristar3F => 16 * 1024,
			BankSwitching::F4 => 32 * 1024,
			BankSwitching::E0 => 8 * 1024,
			BankSwitching::E7 => 16 * 1024,
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Atari2600Config {
	pub bank_switching: BankSwitching,
	/// Reset vector; if `None`, defaults to the start of the image.
	pub reset_vector: Option<u16>,
}

pub struct Atari2600;

impl ContainerBuilder for Atari2600 {
	type Config = Atari2600Config;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let expected_size = config.bank_switching.rom_size();
		if image.data.len() > expected_size {
			return Err(Error::InvalidRomSize {
				actual: image.data.len(),
				reason: "larger than the selected bank-switching method's ROM size",
			});
		}

		let mut rom = image.data.clone();
		rom.resize(expected_size, 0xFF);

		let vector = config.reset_vector.unwrap_or(image.start as u16);
		let len = rom.len();
		rom[len - 4..len - 2].copy_from_slice(&vector.to_le_bytes());

		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pads_to_bank_size_and_writes_default_reset_vector() {
		let image = FlattenedImage { start: 0xF000, data: vec![0xEA; 100] };
		let config = Atari2600Config { bank_switching: BankSwitching::None, reset_vector: None };
		let rom = Atari2600::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 2048);
		let vector = u16::from_le_bytes([rom[2044], rom[2045]]);
		assert_eq!(vector, 0xF000);
	}

	#[test]
	fn rejects_oversized_image() {
		let image = FlattenedImage { start: 0, data: vec![0; 3000] };
		let config = Atari2600Config { bank_switching: BankSwitching::None, reset_vector: None };
		assert!(Atari2600::build(&image, &config).is_err());
	}
}
