//! SNES: internal header embedded at a map-mode-dependent offset inside
//! the ROM, plus a whole-image checksum patched in afterward.
//!
//! The flattened image's bytes are treated as already linearly addressed
//! by ROM file offset (the caller is responsible for writing code at the
//! addresses its chosen map mode implies) — this builder doesn't perform
//! LoROM/HiROM bank-address translation itself.

use retroasm_core::core::FlattenedImage;

use super::ContainerBuilder;
use crate::err::Error;
use crate::header::snes::SnesHeaderConfig;

pub struct Snes;

impl ContainerBuilder for Snes {
	type Config = SnesHeaderConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let header = config.build()?;
		let offset = config.map_mode.header_offset();
		let minimum = config.map_mode.minimum_rom_size();

		let content_len = image.data.len().max(offset + header.len());
		let rom_size = content_len.max(minimum).next_power_of_two();

		let mut rom = vec![0u8; rom_size];
		rom[..image.data.len()].copy_from_slice(&image.data);
		rom[offset..offset + header.len()].copy_from_slice(&header);

		// Checksum is computed with both checksum fields zeroed (already
		// true here) over the image mirrored (repeated) up to the full
		// power-of-two rom_size, rather than zero-padded.
		let mut mirrored = vec![0u8; rom_size];
		for chunk_start in (0..rom_size).step_by(content_len) {
			let chunk_len = content_len.min(rom_size - chunk_start);
			mirrored[chunk_start..chunk_start + chunk_len].copy_from_slice(&rom[..chunk_len]);
		}
		let checksum: u32 = mirrored.iter().fold(0u32, |acc, &b| acc + u32::from(b));
		let checksum = (checksum & 0xFFFF) as u16;
		let complement = checksum ^ 0xFFFF;

		rom[offset + 0x1C..offset + 0x1E].copy_from_slice(&complement.to_le_bytes());
		rom[offset + 0x1E..offset + 0x20].copy_from_slice(&checksum.to_le_bytes());

		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::header::snes::{MapMode, Region, Vectors};

	#[test]
	fn places_header_and_patches_checksum() {
		let image = FlattenedImage { start: 0x8000, data: vec![0xAA; 1024] };
		let config = SnesHeaderConfig {
			title: "TEST".into(),
			map_mode: MapMode::LoRom,
			fast_rom: false,
			cartridge_type: 0,
			rom_size_kb: 32,
			ram_size_kb: 0,
			region: Region::NorthAmerica,
			developer_id: 0,
			version: 0,
			native_vectors: Vectors::default(),
			emulation_vectors: Vectors::default(),
		};
		let rom = Snes::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 32 * 1024);
		assert_eq!(&rom[0x7FC0..0x7FC4], b"TEST");
		let complement = u16::from_le_bytes([rom[0x7FDC], rom[0x7FDD]]);
		let checksum = u16::from_le_bytes([rom[0x7FDE], rom[0x7FDF]]);
		assert_eq!(complement ^ checksum, 0xFFFF);
	}
}
