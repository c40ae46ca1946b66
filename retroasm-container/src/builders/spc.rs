//! SPC700 sound file: a fixed 66 KiB container — signature, register
//! snapshot, an ID666 metadata tag, then raw APU RAM, DSP registers and
//! extra RAM copied verbatim from the flattened image.

use retroasm_core::core::FlattenedImage;

use super::ContainerBuilder;
use crate::err::Error;

const FILE_SIZE: usize = 0x1_0200;
const SIGNATURE: &[u8] = b"SNES-SPC700 Sound File Data v0.30";

#[derive(Debug, Clone)]
pub struct Id666Tag {
	pub song_title: String,
	pub game_title: String,
	pub dumper_name: String,
	pub comments: String,
	pub dump_date: String,
	pub fade_out_seconds: String,
	pub fade_length_ms: String,
	pub artist: String,
	pub default_channel_disables: u8,
	pub emulator_id: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct SpcRegisters {
	pub pc: u16,
	pub a: u8,
	pub x: u8,
	pub y: u8,
	pub psw: u8,
	pub sp: u8,
}

#[derive(Debug, Clone)]
pub struct SpcConfig {
	pub has_id666_tag: bool,
	pub registers: SpcRegisters,
	pub tag: Id666Tag,
}

fn write_ascii_field(buf: &mut [u8], text: &str, field: &'static str) -> Result<(), Error> {
	let bytes = text.as_bytes();
	if bytes.len() > buf.len() {
		return Err(Error::StringTooLong { field, len: bytes.len(), max: buf.len() });
	}
	buf[..bytes.len()].copy_from_slice(bytes);
	Ok(())
}

pub struct Spc;

impl ContainerBuilder for Spc {
	type Config = SpcConfig;

	fn build(image: &FlattenedImage, config: &Self::Config) -> Result<Vec<u8>, Error> {
		if image.data.len() > 0x1_0100 {
			return Err(Error::InvalidRomSize {
				actual: image.data.len(),
				reason: "exceeds the combined 64 KiB APU RAM + 128 DSP register + 64-byte extra RAM region",
			});
		}

		let mut file = vec![0u8; FILE_SIZE];
		file[0..SIGNATURE.len()].copy_from_slice(SIGNATURE);
		file[0x22] = 0x26;
		file[0x23] = if config.has_id666_tag { 0x1A } else { 0x1B };
		file[0x24] = 30;

		let r = &config.registers;
		file[0x25..0x27].copy_from_slice(&r.pc.to_le_bytes());
		file[0x27] = r.a;
		file[0x28] = r.x;
		file[0x29] = r.y;
		file[0x2A] = r.psw;
		file[0x2B] = r.sp;

		let tag = &config.tag;
		write_ascii_field(&mut file[0x2E..0x4E], &tag.song_title, "song_title")?;
		write_ascii_field(&mut file[0x4E..0x6E], &tag.game_title, "game_title")?;
		write_ascii_field(&mut file[0x6E..0x7E], &tag.dumper_name, "dumper_name")?;
		write_ascii_field(&mut file[0x7E..0xAE], &tag.comments, "comments")?;
		write_ascii_field(&mut file[0xAE..0xB8], &tag.dump_date, "dump_date")?;
		write_ascii_field(&mut file[0xB8..0xBB], &tag.fade_out_seconds, "fade_out_seconds")?;
		write_ascii_field(&mut file[0xBB..0xBF], &tag.fade_length_ms, "fade_length_ms")?;
		write_ascii_field(&mut file[0xBF..0xCF], &tag.artist, "artist")?;
		file[0xCF] = tag.default_channel_disables;
		file[0xD0] = tag.emulator_id;

		file[0x100..0x100 + image.data.len()].copy_from_slice(&image.data);

		Ok(file)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_tag() -> Id666Tag {
		Id666Tag {
			song_title: "Title".into(),
			game_title: "Game".into(),
			dumper_name: "Dumper".into(),
			comments: String::new(),
			dump_date: String::new(),
			fade_out_seconds: "000".into(),
			fade_length_ms: "0000".into(),
			artist: String::new(),
			default_channel_disables: 0,
			emulator_id: 0,
		}
	}

	#[test]
	fn writes_signature_and_tag() {
		let image = FlattenedImage { start: 0, data: vec![0x00; 256] };
		let config = SpcConfig {
			has_id666_tag: true,
			registers: SpcRegisters { pc: 0x0400, a: 0, x: 0, y: 0, psw: 0, sp: 0xEF },
			tag: sample_tag(),
		};
		let file = Spc::build(&image, &config).unwrap();
		assert_eq!(file.len(), 0x1_0200);
		assert_eq!(&file[0..SIGNATURE.len()], SIGNATURE);
		assert_eq!(file[0x23], 0x1A);
		assert_eq!(&file[0x2E..0x33], b"Title");
	}

	#[test]
	fn rejects_oversized_apu_image() {
		let image = FlattenedImage { start: 0, data: vec![0x00; 0x20000] };
		let config = SpcConfig { has_id666_tag: false, registers: SpcRegisters { pc: 0, a: 0, x: 0, y: 0, psw: 0, sp: 0 }, tag: sample_tag() };
		assert!(Spc::build(&image, &config).is_err());
	}
}
