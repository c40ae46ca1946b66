//! Fixed-layout header/footer byte construction for every supported
//! container format. Each submodule exposes a `*HeaderConfig` struct and
//! a `build` method that produces the header's raw bytes in isolation,
//! independent of the ROM payload; [`crate::builders`] combines that
//! output with a flattened image and, where the format requires it,
//! patches in a checksum computed over the whole assembled file.

pub mod gb;
pub mod gba;
pub mod genesis;
pub mod ines1;
pub mod ines2;
pub mod lynx;
pub mod sms;
pub mod snes;
pub mod wonderswan;

pub use ines1::INesHeaderInfo;

/// Nametable mirroring, shared by every format that exposes the concept
/// (NES, and reused loosely by others that just need a two-way flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
	Vertical,
	Horizontal,
	FourScreen,
}
