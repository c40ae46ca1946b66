//! Per-target container builders: combine a [`FlattenedImage`] with a
//! caller-supplied configuration to produce the final ROM/cartridge byte
//! sequence, patching in whatever checksum the format requires.
//!
//! Every builder is deterministic in its input — same image, same
//! config, same output bytes — and never mutates the image it's given.

pub mod atari2600;
pub mod gb;
pub mod gba;
pub mod genesis;
pub mod lynx;
pub mod nes;
pub mod sms;
pub mod snes;
pub mod spc;
pub mod turbografx;
pub mod wonderswan;

use retroasm_core::core::FlattenedImage;

use crate::err::Error;

/// A per-target container builder, parameterized by its own configuration
/// type. `Self` is typically a zero-sized marker (`pub struct Nes;`) —
/// the real state lives in `Config`.
pub trait ContainerBuilder {
	type Config;

	/// Produce the final container bytes from a flattened code-generation
	/// image and this target's configuration.
	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error>;
}

/// Pad `data` up to `size` bytes with `fill`, leaving it unchanged if
/// already at least that long.
pub(crate) fn pad_to(mut data: Vec<u8>, size: usize, fill: u8) -> Vec<u8> {
	if data.len() < size {
		data.resize(size, fill);
	}
	data
}
