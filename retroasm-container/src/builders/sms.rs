//! Master System / Game Gear: "TMR SEGA" footer written at a
//! size-dependent offset near the end of the ROM, with a checksum over
//! everything before it.

use retroasm_core::core::FlattenedImage;

use super::{pad_to, ContainerBuilder};
use crate::err::Error;
use crate::header::sms::{checksum, SmsHeaderConfig};

pub struct Sms;

impl ContainerBuilder for Sms {
	type Config = SmsHeaderConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let footer = config.build()?;
		let footer_offset = SmsHeaderConfig::footer_offset(config.rom_size_kb);
		let rom_size = (config.rom_size_kb as usize) * 1024;

		let mut rom = pad_to(image.data.clone(), rom_size.max(footer_offset + footer.len()), 0);
		rom[footer_offset..footer_offset + footer.len()].copy_from_slice(&footer);

		let checksum = checksum(&rom, footer_offset);
		rom[footer_offset + 10..footer_offset + 12].copy_from_slice(&checksum.to_le_bytes());

		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::header::sms::Region;

	#[test]
	fn writes_footer_at_size_dependent_offset() {
		let image = FlattenedImage { start: 0, data: vec![0x00; 0x4000] };
		let config = SmsHeaderConfig { product_code: 1, version: 0, region: Region::Export, rom_size_kb: 32 };
		let rom = Sms::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 32 * 1024);
		assert_eq!(&rom[0x7FF0..0x7FF8], b"TMR SEGA");
	}
}
