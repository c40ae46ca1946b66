//! Game Boy / Game Boy Color: header embedded at 0x100, two checksums
//! patched in afterward, ROM padded to the next power-of-two size ≥
//! 32 KiB.

use retroasm_core::core::FlattenedImage;

use super::ContainerBuilder;
use crate::err::Error;
use crate::header::gb::{global_checksum, header_checksum, GbHeaderConfig};

pub struct GameBoy;

impl ContainerBuilder for GameBoy {
	type Config = GbHeaderConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let header = config.build()?;

		let content_len = image.data.len().max(header.len());
		let rom_size = content_len.max(32 * 1024).next_power_of_two();

		let mut rom = vec![0u8; rom_size];
		rom[..image.data.len()].copy_from_slice(&image.data);
		rom[..header.len()].copy_from_slice(&header);

		rom[0x14D] = header_checksum(&rom);
		let global = global_checksum(&rom);
		rom[0x14E..0x150].copy_from_slice(&global.to_be_bytes());

		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::header::gb::CgbFlag;

	#[test]
	fn pads_to_32kib_and_patches_checksums() {
		let image = FlattenedImage { start: 0, data: vec![0x00; 4] };
		let config = GbHeaderConfig {
			title: "GAME".into(),
			cgb_flag: CgbFlag::None,
			sgb_supported: false,
			cartridge_type: 0,
			rom_size_kb: 32,
			ram_size_kb: 0,
			japanese: false,
			version: 0,
			entry_point: 0x150,
		};
		let rom = GameBoy::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 32 * 1024);
		assert_eq!(&rom[0x104..0x134], &crate::header::gb::NINTENDO_LOGO);
	}
}
