//! NES: 16-byte header prepended to the PRG+CHR ROM image. NES has no
//! built-in checksum field, so there's nothing to patch after assembly —
//! the header bytes and the flattened image are simply concatenated and
//! padded to the declared PRG/CHR size.

use retroasm_core::core::FlattenedImage;

use super::{pad_to, ContainerBuilder};
use crate::err::Error;
use crate::header::ines1::InesHeaderConfig;
use crate::header::ines2::Ines2HeaderConfig;

pub struct Nes;

impl ContainerBuilder for Nes {
	type Config = InesHeaderConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		config.validate()?;
		let prg_size = usize::from(config.prg_16k_units) * 16 * 1024;
		let chr_size = usize::from(config.chr_8k_units) * 8 * 1024;
		let mut rom = Vec::with_capacity(16 + prg_size + chr_size);
		rom.extend_from_slice(&config.build());
		rom.extend_from_slice(&image.data);
		Ok(pad_to(rom, 16 + prg_size + chr_size, 0))
	}
}

/// The NES 2.0 variant, identical in assembly shape — only the header
/// layout differs.
pub struct Nes2;

impl ContainerBuilder for Nes2 {
	type Config = Ines2HeaderConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		config.validate()?;
		let prg_size = usize::from(config.prg_16k_units) * 16 * 1024;
		let chr_size = usize::from(config.chr_8k_units) * 8 * 1024;
		let mut rom = Vec::with_capacity(16 + prg_size + chr_size);
		rom.extend_from_slice(&config.build());
		rom.extend_from_slice(&image.data);
		Ok(pad_to(rom, 16 + prg_size + chr_size, 0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::header::Mirroring;

	#[test]
	fn pads_to_declared_prg_chr_size() {
		let image = FlattenedImage { start: 0x8000, data: vec![0xEA; 10] };
		let config = InesHeaderConfig {
			prg_16k_units: 1,
			chr_8k_units: 0,
			mapper: 0,
			mirroring: Mirroring::Horizontal,
			battery: false,
			trainer: false,
			vs_unisystem: false,
			playchoice10: false,
		};
		let rom = Nes::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 16 + 16 * 1024);
		assert_eq!(&rom[0..4], b"NES\x1a");
		assert_eq!(&rom[16..26], &[0xEA; 10]);
	}
}
