//! NES 2.0 16-byte header: a superset of iNES 1.0 that widens PRG/CHR
//! size and mapper number, and adds submapper, RAM-size and TV-timing
//! fields the original format had no room for.

use super::Mirroring;
use crate::err::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvSystem {
	Ntsc,
	Pal,
	Multi,
	Dendy,
}

#[derive(Debug, Clone)]
pub struct Ines2HeaderConfig {
	pub prg_16k_units: u16,
	pub chr_8k_units: u16,
	pub mapper: u16,
	pub submapper: u8,
	pub mirroring: Mirroring,
	pub battery: bool,
	pub trainer: bool,
	pub vs_unisystem: bool,
	pub playchoice10: bool,
	pub prg_ram_shift: u8,
	pub prg_nvram_shift: u8,
	pub chr_ram_shift: u8,
	pub chr_nvram_shift: u8,
	pub tv_system: TvSystem,
}

impl Ines2HeaderConfig {
	#[must_use]
	pub fn build(&self) -> [u8; 16] {
		let mut header = [0u8; 16];
		header[0..4].copy_from_slice(b"NES\x1a");
		header[4] = (self.prg_16k_units & 0xFF) as u8;
		header[5] = (self.chr_8k_units & 0xFF) as u8;

		let mapper_low = (self.mapper & 0x0F) as u8;
		let mapper_mid = ((self.mapper >> 4) & 0x0F) as u8;
		let mapper_high = ((self.mapper >> 8) & 0x0F) as u8;

		let mut flags6 = mapper_low << 4;
		if matches!(self.mirroring, Mirroring::Vertical) {
			flags6 |= 0x01;
		}
		if self.battery {
			flags6 |= 0x02;
		}
		if self.trainer {
			flags6 |= 0x04;
		}
		if matches!(self.mirroring, Mirroring::FourScreen) {
			flags6 |= 0x08;
		}
		header[6] = flags6;

		let mut flags7 = (mapper_mid << 4) | 0x08; // format id = 2 (0b10) at bits 2-3
		if self.vs_unisystem {
			flags7 |= 0x01;
		}
		if self.playchoice10 {
			flags7 |= 0x02;
		}
		header[7] = flags7;

		header[8] = (self.submapper & 0x0F) | (mapper_high << 4);

		let prg_msb = ((self.prg_16k_units >> 8) & 0x0F) as u8;
		let chr_msb = ((self.chr_8k_units >> 8) & 0x0F) as u8;
		header[9] = chr_msb | (prg_msb << 4);

		header[10] = (self.prg_ram_shift & 0x0F) | (self.prg_nvram_shift << 4);
		header[11] = (self.chr_ram_shift & 0x0F) | (self.chr_nvram_shift << 4);

		header[12] = match self.tv_system {
			TvSystem::Ntsc => 0,
			TvSystem::Pal => 1,
			TvSystem::Multi => 2,
			TvSystem::Dendy => 3,
		};

		header
	}

	pub fn validate(&self) -> Result<(), Error> {
		if self.mapper > 0x0FFF {
			return Err(Error::FieldOutOfRange { field: "mapper", value: i64::from(self.mapper), min: 0, max: 0x0FFF });
		}
		if self.submapper > 0x0F {
			return Err(Error::FieldOutOfRange { field: "submapper", value: i64::from(self.submapper), min: 0, max: 0x0F });
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn marks_nes2_format_id() {
		let cfg = Ines2HeaderConfig {
			prg_16k_units: 256,
			chr_8k_units: 0,
			mapper: 0x123,
			submapper: 5,
			mirroring: Mirroring::Horizontal,
			battery: false,
			trainer: false,
			vs_unisystem: false,
			playchoice10: false,
			prg_ram_shift: 0,
			prg_nvram_shift: 0,
			chr_ram_shift: 0,
			chr_nvram_shift: 0,
			tv_system: TvSystem::Ntsc,
		};
		let header = cfg.build();
		assert_eq!(header[7] & 0x0C, 0x08);
		assert_eq!(header[8], 0x15);
		assert_eq!(header[9] >> 4, 1);
	}
}
