//! TurboGrafx-16 / PC Engine: a raw HuC6280 ROM image, power-of-two
//! sized between 8 KiB and 1 MiB, with a vector table in its final 10
//! bytes.
//!
//! The HuC6280 shares one vector between IRQ2 and BRK, so the table
//! holds five 16-bit words (IRQ2/BRK, IRQ1, Timer, NMI, RESET), not six
//! — `TurboGrafxVectors` exposes `irq2` and `brk` separately but
//! `build` errors if they disagree, since only one slot exists to store
//! them.

use retroasm_core::core::FlattenedImage;

use super::ContainerBuilder;
use crate::err::Error;

#[derive(Debug, Clone, Copy, Default)]
pub struct TurboGrafxVectors {
	pub irq2: u16,
	pub brk: u16,
	pub irq1: u16,
	pub timer: u16,
	pub nmi: u16,
	pub reset: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct TurboGrafxConfig {
	pub vectors: TurboGrafxVectors,
}

pub struct TurboGrafx;

impl ContainerBuilder for TurboGrafx {
	type Config = TurboGrafxConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		let v = &config.vectors;
		if v.irq2 != v.brk {
			return Err(Error::FieldOutOfRange { field: "brk", value: i64::from(v.brk), min: i64::from(v.irq2), max: i64::from(v.irq2) });
		}

		let min_size = 8 * 1024;
		let max_size = 1024 * 1024;
		let content_len = image.data.len().max(min_size);
		if content_len > max_size {
			return Err(Error::InvalidRomSize { actual: image.data.len(), reason: "exceeds the 1 MiB TurboGrafx-16 ROM limit" });
		}
		let rom_size = content_len.next_power_of_two();

		let mut rom = vec![0u8; rom_size];
		rom[..image.data.len()].copy_from_slice(&image.data);

		let tail = rom_size - 10;
		rom[tail..tail + 2].copy_from_slice(&v.irq2.to_le_bytes());
		rom[tail + 2..tail + 4].copy_from_slice(&v.irq1.to_le_bytes());
		rom[tail + 4..tail + 6].copy_from_slice(&v.timer.to_le_bytes());
		rom[tail + 6..tail + 8].copy_from_slice(&v.nmi.to_le_bytes());
		rom[tail + 8..tail + 10].copy_from_slice(&v.reset.to_le_bytes());

		Ok(rom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pads_to_power_of_two_and_writes_vectors() {
		let image = FlattenedImage { start: 0, data: vec![0x00; 9000] };
		let config = TurboGrafxConfig {
			vectors: TurboGrafxVectors { irq2: 0x1111, brk: 0x1111, irq1: 0x3333, timer: 0x4444, nmi: 0x5555, reset: 0xE000 },
		};
		let rom = TurboGrafx::build(&image, &config).unwrap();
		assert_eq!(rom.len(), 16 * 1024);
		let reset = u16::from_le_bytes([rom[rom.len() - 2], rom[rom.len() - 1]]);
		assert_eq!(reset, 0xE000);
	}

	#[test]
	fn rejects_mismatched_irq2_brk() {
		let image = FlattenedImage { start: 0, data: vec![0x00; 8 * 1024] };
		let config = TurboGrafxConfig {
			vectors: TurboGrafxVectors { irq2: 0x1111, brk: 0x2222, irq1: 0, timer: 0, nmi: 0, reset: 0 },
		};
		assert!(TurboGrafx::build(&image, &config).is_err());
	}
}
