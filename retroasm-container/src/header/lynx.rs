//! Atari Lynx 64-byte LNX header, prepended before the ROM image.

use crate::err::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
	None,
	Left,
	Right,
}

#[derive(Debug, Clone)]
pub struct LynxHeaderConfig {
	pub bank0_pages: u16,
	pub bank1_pages: u16,
	pub version: u16,
	pub cart_name: String,
	pub manufacturer: String,
	pub rotation: Rotation,
}

impl LynxHeaderConfig {
	#[must_use]
	pub fn build(&self) -> Result<[u8; 64], Error> {
		if self.cart_name.len() > 32 {
			return Err(Error::StringTooLong { field: "cart_name", len: self.cart_name.len(), max: 32 });
		}
		if self.manufacturer.len() > 16 {
			return Err(Error::StringTooLong { field: "manufacturer", len: self.manufacturer.len(), max: 16 });
		}

		let mut header = [0u8; 64];
		header[0..4].copy_from_slice(b"LYNX");
		header[4..6].copy_from_slice(&self.bank0_pages.to_le_bytes());
		header[6..8].copy_from_slice(&self.bank1_pages.to_le_bytes());
		header[8..10].copy_from_slice(&self.version.to_le_bytes());
		header[10..10 + self.cart_name.len()].copy_from_slice(self.cart_name.as_bytes());
		header[42..42 + self.manufacturer.len()].copy_from_slice(self.manufacturer.as_bytes());
		header[58] = match self.rotation {
			Rotation::None => 0,
			Rotation::Left => 1,
			Rotation::Right => 2,
		};

		Ok(header)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_signature_and_pages() {
		let cfg = LynxHeaderConfig {
			bank0_pages: 64,
			bank1_pages: 0,
			version: 1,
			cart_name: "GAME".into(),
			manufacturer: "ME".into(),
			rotation: Rotation::None,
		};
		let header = cfg.build().unwrap();
		assert_eq!(&header[0..4], b"LYNX");
		assert_eq!(&header[4..6], &64u16.to_le_bytes());
	}
}
