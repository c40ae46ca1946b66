//! Game Boy Advance: 192-byte header prepended to the ROM image, header
//! checksum patched in afterward.

use retroasm_core::core::FlattenedImage;

use super::ContainerBuilder;
use crate::err::Error;
use crate::header::gba::{header_checksum, GbaHeaderConfig};

pub struct Gba;

impl ContainerBuilder for Gba {
	type Config = GbaHeaderConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let header = config.build()?;

		let mut rom = Vec::with_capacity(header.len() + image.data.len());
		rom.extend_from_slice(&header);
		rom.extend_from_slice(&image.data);
		if rom.len() < header.len() {
			rom.resize(header.len(), 0);
		}

		rom[0xBD] = header_checksum(&rom);

		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prepends_header_and_patches_checksum() {
		let image = FlattenedImage { start: 0x0800_0000, data: vec![0x00; 32] };
		let config = GbaHeaderConfig {
			title: "GAME".into(),
			game_code: "AGME".into(),
			maker_code: "01".into(),
			main_unit_code: 0,
			device_type: 0,
			version: 0,
			entry_point: 0x0800_00C0,
		};
		let rom = Gba::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 0xC0 + 32);
		assert_ne!(rom[0xBD], 0);
	}
}
