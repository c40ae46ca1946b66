//! WonderSwan: 10-byte footer appended after the ROM image, whole-image
//! checksum patched into the footer's own checksum field afterward.

use retroasm_core::core::FlattenedImage;

use super::{pad_to, ContainerBuilder};
use crate::err::Error;
use crate::header::wonderswan::{checksum, smallest_valid_size_kb, WonderSwanFooterConfig};

pub struct WonderSwan;

impl ContainerBuilder for WonderSwan {
	type Config = WonderSwanFooterConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let footer = config.build();
		let minimum_kb = ((image.data.len() + footer.len()) as u32).div_ceil(1024);
		let rom_size_kb = smallest_valid_size_kb(minimum_kb);
		WonderSwanFooterConfig::validate_size(rom_size_kb)?;
		let rom_size = (rom_size_kb as usize) * 1024;

		let mut rom = pad_to(image.data.clone(), rom_size - footer.len(), 0xFF);
		rom.extend_from_slice(&footer);

		let checksum_offset = rom.len() - 2;
		let checksum = checksum(&rom, checksum_offset);
		rom[checksum_offset..checksum_offset + 2].copy_from_slice(&checksum.to_le_bytes());

		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn appends_footer_and_patches_checksum() {
		let image = FlattenedImage { start: 0, data: vec![0x00; 1024] };
		let config = WonderSwanFooterConfig {
			publisher: 1,
			color: false,
			game_id: 1,
			revision: 0,
			rom_size_code: 0,
			save_type_code: 0,
			flags: 0,
			rtc_present: false,
		};
		let rom = WonderSwan::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 128 * 1024);
		assert_eq!(rom[rom.len() - 10], 1);
	}
}
