//! SNES internal 64-byte header (LoROM/HiROM/ExHiROM), embedded in the
//! ROM image rather than prepended — [`crate::builders::snes`] is
//! responsible for placing it at the map-dependent offset and patching in
//! the checksum once the whole image is assembled.

use crate::err::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
	LoRom,
	HiRom,
	ExHiRom,
}

impl MapMode {
	/// Byte offset of the header within the final ROM image.
	#[must_use]
	pub fn header_offset(self) -> usize {
		match self {
			Self::LoRom => 0x7FC0,
			Self::HiRom => 0xFFC0,
			Self::ExHiRom => 0x40FFC0,
		}
	}

	/// Minimum valid ROM size for this map mode, in bytes.
	#[must_use]
	pub fn minimum_rom_size(self) -> usize {
		match self {
			Self::LoRom => 32 * 1024,
			Self::HiRom | Self::ExHiRom => 64 * 1024,
		}
	}

	#[must_use]
	fn map_byte(self, fast_rom: bool) -> u8 {
		let base = match self {
			Self::LoRom => 0x20,
			Self::HiRom => 0x21,
			Self::ExHiRom => 0x25,
		};
		base | if fast_rom { 0x10 } else { 0x00 }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
	Japan,
	NorthAmerica,
	Europe,
	Other(u8),
}

impl Region {
	#[must_use]
	fn code(self) -> u8 {
		match self {
			Self::Japan => 0,
			Self::NorthAmerica => 1,
			Self::Europe => 2,
			Self::Other(c) => c,
		}
	}
}

/// The six native-mode and six emulation-mode vectors stored at the end
/// of the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vectors {
	pub cop: u16,
	pub brk: u16,
	pub abort: u16,
	pub nmi: u16,
	pub reset: u16,
	pub irq: u16,
}

#[derive(Debug, Clone)]
pub struct SnesHeaderConfig {
	pub title: String,
	pub map_mode: MapMode,
	pub fast_rom: bool,
	pub cartridge_type: u8,
	pub rom_size_kb: u32,
	pub ram_size_kb: u32,
	pub region: Region,
	pub developer_id: u8,
	pub version: u8,
	pub native_vectors: Vectors,
	pub emulation_vectors: Vectors,
}

impl SnesHeaderConfig {
	/// `rom_size_code = ceil(log2(kb))`, per spec.
	fn rom_size_code(&self) -> u8 {
		let kb = self.rom_size_kb.max(1);
		(32 - (kb - 1).leading_zeros()) as u8
	}

	fn ram_size_code(&self) -> u8 {
		if self.ram_size_kb == 0 {
			0
		} else {
			(32 - (self.ram_size_kb - 1).leading_zeros()) as u8
		}
	}

	/// Build the 64-byte header with the checksum fields left zeroed;
	/// [`crate::builders::snes`] computes and patches those in afterward
	/// since they depend on the whole assembled image.
	pub fn build(&self) -> Result<[u8; 64], Error> {
		let title_bytes = self.title.as_bytes();
		if title_bytes.len() > 21 {
			return Err(Error::StringTooLong { field: "title", len: title_bytes.len(), max: 21 });
		}

		let mut header = [0u8; 64];
		header[0..21].fill(b' ');
		header[0..title_bytes.len()].copy_from_slice(title_bytes);

		header[0x15] = self.map_mode.map_byte(self.fast_rom);
		header[0x16] = self.cartridge_type;
		header[0x17] = self.rom_size_code();
		header[0x18] = self.ram_size_code();
		header[0x19] = self.region.code();
		header[0x1A] = self.developer_id;
		header[0x1B] = self.version;
		// 0x1C..0x1E checksum-complement, 0x1E..0x20 checksum: left zero here.

		write_vectors(&mut header, 0x24, &self.native_vectors);
		write_vectors(&mut header, 0x34, &self.emulation_vectors);

		Ok(header)
	}
}

fn write_vectors(header: &mut [u8; 64], base: usize, vectors: &Vectors) {
	let slots = [vectors.cop, vectors.brk, vectors.abort, vectors.nmi, vectors.reset, vectors.irq];
	for (i, v) in slots.iter().enumerate() {
		let offset = base + i * 2;
		header[offset..offset + 2].copy_from_slice(&v.to_le_bytes());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rom_size_code_rounds_up_to_power_of_two() {
		let cfg = SnesHeaderConfig {
			title: "TEST".into(),
			map_mode: MapMode::LoRom,
			fast_rom: false,
			cartridge_type: 0,
			rom_size_kb: 48,
			ram_size_kb: 0,
			region: Region::NorthAmerica,
			developer_id: 0,
			version: 0,
			native_vectors: Vectors::default(),
			emulation_vectors: Vectors::default(),
		};
		// 48 KiB rounds up to 64 KiB = 2^6.
		assert_eq!(cfg.rom_size_code(), 6);
	}

	#[test]
	fn title_padded_with_spaces() {
		let cfg = SnesHeaderConfig {
			title: "GAME".into(),
			map_mode: MapMode::HiRom,
			fast_rom: true,
			cartridge_type: 0,
			rom_size_kb: 64,
			ram_size_kb: 8,
			region: Region::Japan,
			developer_id: 0,
			version: 0,
			native_vectors: Vectors { reset: 0x8000, ..Vectors::default() },
			emulation_vectors: Vectors::default(),
		};
		let header = cfg.build().unwrap();
		assert_eq!(&header[0..4], b"GAME");
		assert_eq!(header[4], b' ');
		assert_eq!(header[0x15], 0x31);
		assert_eq!(&header[0x24 + 8..0x24 + 10], &0x8000u16.to_le_bytes());
	}
}
