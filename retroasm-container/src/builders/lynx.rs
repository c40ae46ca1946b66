//! Atari Lynx: 64-byte LNX header prepended to the raw bank-switched ROM
//! image. The Lynx has no built-in ROM checksum, so there's nothing to
//! patch after assembly.

use retroasm_core::core::FlattenedImage;

use super::ContainerBuilder;
use crate::err::Error;
use crate::header::lynx::LynxHeaderConfig;

pub struct Lynx;

impl ContainerBuilder for Lynx {
	type Config = LynxHeaderConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let header = config.build()?;
		let mut rom = Vec::with_capacity(header.len() + image.data.len());
		rom.extend_from_slice(&header);
		rom.extend_from_slice(&image.data);
		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::header::lynx::Rotation;

	#[test]
	fn prepends_header() {
		let image = FlattenedImage { start: 0, data: vec![0x42; 16] };
		let config = LynxHeaderConfig {
			bank0_pages: 8,
			bank1_pages: 0,
			version: 1,
			cart_name: "GAME".into(),
			manufacturer: "ME".into(),
			rotation: Rotation::None,
		};
		let rom = Lynx::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 64 + 16);
		assert_eq!(&rom[0..4], b"LYNX");
		assert_eq!(&rom[64..], &[0x42; 16]);
	}
}
