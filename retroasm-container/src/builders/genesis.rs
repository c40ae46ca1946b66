//! Sega Genesis / Mega Drive: 512-byte header placed at offset 0x100,
//! with 512 bytes of vector table and working RAM conventionally
//! preceding it — the flattened image is expected to already carry the
//! vector table at its start, so this builder only overlays the header
//! region and patches the checksum.

use retroasm_core::core::FlattenedImage;

use super::ContainerBuilder;
use crate::err::Error;
use crate::header::genesis::{checksum, GenesisHeaderConfig};

pub struct Genesis;

impl ContainerBuilder for Genesis {
	type Config = GenesisHeaderConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let header = config.build()?;

		let content_len = image.data.len().max(0x100 + header.len());
		let mut rom = vec![0u8; content_len];
		rom[..image.data.len()].copy_from_slice(&image.data);
		rom[0x100..0x100 + header.len()].copy_from_slice(&header);

		let checksum = checksum(&rom);
		rom[0x18E..0x190].copy_from_slice(&checksum.to_be_bytes());

		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn places_header_and_patches_checksum() {
		let image = FlattenedImage { start: 0, data: vec![0x11; 0x300] };
		let config = GenesisHeaderConfig {
			console_name: "SEGA MEGA DRIVE".into(),
			copyright: String::new(),
			domestic_name: String::new(),
			overseas_name: String::new(),
			product_code: String::new(),
			io_support: String::new(),
			rom_start: 0,
			rom_end: 0x2FF,
			ram_start: 0xFF0000,
			ram_end: 0xFFFFFF,
			sram_type: None,
			sram_start: 0,
			sram_end: 0,
			modem: String::new(),
			memo: String::new(),
			region: "JUE".into(),
		};
		let rom = Genesis::build(&image, &config).unwrap();
		assert_eq!(&rom[0x100..0x10F], b"SEGA MEGA DRIV");
	}
}
