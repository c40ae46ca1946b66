use std::path::PathBuf;

use clap::{Args, ValueEnum};
use retroasm_container::builders::atari2600::{Atari2600, Atari2600Config, BankSwitching};
use retroasm_container::builders::gb::GameBoy;
use retroasm_container::builders::gba::Gba;
use retroasm_container::builders::genesis::Genesis;
use retroasm_container::builders::nes::Nes;
use retroasm_container::builders::snes::Snes;
use retroasm_container::builders::sms::Sms;
use retroasm_container::builders::spc::{Id666Tag, Spc, SpcConfig, SpcRegisters};
use retroasm_container::builders::turbografx::{TurboGrafx, TurboGrafxConfig, TurboGrafxVectors};
use retroasm_container::builders::wonderswan::WonderSwan;
use retroasm_container::builders::ContainerBuilder;
use retroasm_container::header::gb::{CgbFlag, GbHeaderConfig};
use retroasm_container::header::gba::GbaHeaderConfig;
use retroasm_container::header::genesis::GenesisHeaderConfig;
use retroasm_container::header::ines1::InesHeaderConfig;
use retroasm_container::header::snes::{MapMode, Region as SnesRegion, SnesHeaderConfig, Vectors as SnesVectors};
use retroasm_container::header::sms::{Region as SmsRegion, SmsHeaderConfig};
use retroasm_container::header::wonderswan::WonderSwanFooterConfig;
use retroasm_container::header::Mirroring;
use retroasm_core::core::interfaces::{MacroTable, SymbolTable};
use retroasm_core::core::FlattenedImage;
use retroasm_core::macros::MacroRegistry;
use retroasm_core::parsing::Parser;
use retroasm_core::symbols::DefaultEvaluator;
use retroasm_core::{CodeGenerator, Target};

use crate::err::Error;

/// The CPU target to assemble for. Mirrors [`retroasm_core::Target`] as a
/// `clap`-friendly enum; [`default_rom`] maps each one to the console it's
/// most commonly paired with.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetArg {
	Mos6502,
	Mos6507,
	Wdc65C02,
	Wdc65816,
	Sm83,
	Z80,
	M68000,
	Arm7Tdmi,
	HuC6280,
	Spc700,
	V30Mz,
}

impl From<TargetArg> for Target {
	fn from(value: TargetArg) -> Self {
		match value {
			TargetArg::Mos6502 => Target::Mos6502,
			TargetArg::Mos6507 => Target::Mos6507,
			TargetArg::Wdc65C02 => Target::Wdc65C02,
			TargetArg::Wdc65816 => Target::Wdc65816,
			TargetArg::Sm83 => Target::Sm83,
			TargetArg::Z80 => Target::Z80,
			TargetArg::M68000 => Target::M68000,
			TargetArg::Arm7Tdmi => Target::Arm7Tdmi,
			TargetArg::HuC6280 => Target::HuC6280,
			TargetArg::Spc700 => Target::Spc700,
			TargetArg::V30Mz => Target::V30Mz,
		}
	}
}

#[derive(Args, Debug)]
pub(super) struct AssembleCommandArguments {
	#[arg(short, long, help = "path to the assembly source file")]
	src: String,

	#[arg(short, long, help = "output ROM/image path")]
	out: String,

	#[arg(short, long, help = "target CPU", value_enum)]
	target: TargetArg,

	#[arg(long, help = "write the output even if code generation reported errors")]
	force: bool,
}

struct EmptySymbols;
impl SymbolTable for EmptySymbols {
	fn try_lookup(&self, _name: &str) -> Option<i64> {
		None
	}
}

pub(super) async fn exec(args: AssembleCommandArguments) -> Result<(), Error> {
	let source = tokio::fs::read_to_string(&args.src).await?;
	let target: Target = args.target.into();

	let (program, parse_errors) = Parser::new(&source, PathBuf::from(&args.src), target).parse_program();
	for e in &parse_errors {
		warn!("parse error: {e}");
	}
	if !parse_errors.is_empty() && !args.force {
		return Err(Error::Assembly(format!("{} parse error(s), pass --force to write anyway", parse_errors.len())));
	}

	let symbols = EmptySymbols;
	let macros = MacroRegistry::new();
	let mut evaluator = DefaultEvaluator::new(&symbols);
	let result = CodeGenerator::new(target, &symbols, &macros, &mut evaluator).generate(&program);

	for e in &result.errors {
		warn!("code generation error: {e}");
	}
	if !result.errors.is_empty() && !args.force {
		return Err(Error::Assembly(format!("{} code generation error(s), pass --force to write anyway", result.errors.len())));
	}

	let image = result.segments.flatten();
	let rom = default_rom(target, &image)?;

	tokio::fs::write(&args.out, &rom).await?;
	info!("wrote {} bytes to {}", rom.len(), args.out);
	Ok(())
}

/// Build a ROM image using each target's most common console and a
/// reasonable default configuration sized to the assembled image.
///
/// This does not yet expose per-format header fields (mapper number,
/// region, cartridge metadata, ...) as CLI flags — today's caller gets
/// the defaults below. A `--config <path>` flag accepting a per-format
/// TOML/JSON override is the natural next step once one format's config
/// needs customizing beyond its defaults.
#[allow(clippy::cast_possible_truncation)]
fn default_rom(target: Target, image: &FlattenedImage) -> Result<Vec<u8>, Error> {
	let rom_size_kb = (image.data.len() as u32).div_ceil(1024).max(1);

	let rom = match target {
		Target::Mos6502 | Target::Wdc65C02 => {
			let prg_16k_units = u8::try_from((image.data.len()).div_ceil(16 * 1024).max(1)).unwrap_or(u8::MAX);
			let config = InesHeaderConfig {
				prg_16k_units,
				chr_8k_units: 0,
				mapper: 0,
				mirroring: Mirroring::Horizontal,
				battery: false,
				trainer: false,
				vs_unisystem: false,
				playchoice10: false,
			};
			Nes::build(image, &config)?
		}
		Target::Mos6507 => {
			let config = Atari2600Config { bank_switching: BankSwitching::None, reset_vector: None };
			Atari2600::build(image, &config)?
		}
		Target::HuC6280 => {
			let config = TurboGrafxConfig {
				vectors: TurboGrafxVectors { irq2: 0, brk: 0, irq1: 0, timer: 0, nmi: 0, reset: image.start as u16 },
			};
			TurboGrafx::build(image, &config)?
		}
		Target::Wdc65816 => {
			let config = SnesHeaderConfig {
				title: "UNTITLED".to_string(),
				map_mode: MapMode::LoRom,
				fast_rom: false,
				cartridge_type: 0,
				rom_size_kb,
				ram_size_kb: 0,
				region: SnesRegion::NorthAmerica,
				developer_id: 0,
				version: 0,
				native_vectors: SnesVectors { reset: image.start as u16, ..SnesVectors::default() },
				emulation_vectors: SnesVectors { reset: image.start as u16, ..SnesVectors::default() },
			};
			Snes::build(image, &config)?
		}
		Target::Sm83 => {
			let config = GbHeaderConfig {
				title: "UNTITLED".to_string(),
				cgb_flag: CgbFlag::None,
				sgb_supported: false,
				cartridge_type: 0,
				rom_size_kb: rom_size_kb.max(32).next_power_of_two(),
				ram_size_kb: 0,
				japanese: false,
				version: 0,
				entry_point: u16::try_from(image.start).unwrap_or(0x150),
			};
			GameBoy::build(image, &config)?
		}
		Target::Z80 => {
			let config = SmsHeaderConfig { product_code: 0, version: 0, region: SmsRegion::Export, rom_size_kb };
			Sms::build(image, &config)?
		}
		Target::M68000 => {
			let config = GenesisHeaderConfig {
				console_name: "SEGA MEGA DRIVE".to_string(),
				copyright: String::new(),
				domestic_name: "UNTITLED".to_string(),
				overseas_name: "UNTITLED".to_string(),
				product_code: String::new(),
				io_support: "J".to_string(),
				rom_start: image.start,
				rom_end: image.start + image.data.len() as u32,
				ram_start: 0x00FF_0000,
				ram_end: 0x00FF_FFFF,
				sram_type: None,
				sram_start: 0,
				sram_end: 0,
				modem: String::new(),
				memo: String::new(),
				region: "JUE".to_string(),
			};
			Genesis::build(image, &config)?
		}
		Target::Arm7Tdmi => {
			let config = GbaHeaderConfig {
				title: "UNTITLED".to_string(),
				game_code: "AGBE".to_string(),
				maker_code: "00".to_string(),
				main_unit_code: 0,
				device_type: 0,
				version: 0,
				entry_point: image.start,
			};
			Gba::build(image, &config)?
		}
		Target::Spc700 => {
			let config = SpcConfig {
				has_id666_tag: true,
				registers: SpcRegisters { pc: image.start as u16, a: 0, x: 0, y: 0, psw: 0, sp: 0xEF },
				tag: Id666Tag {
					song_title: String::new(),
					game_title: String::new(),
					dumper_name: String::new(),
					comments: String::new(),
					dump_date: String::new(),
					fade_out_seconds: "000".to_string(),
					fade_length_ms: "0000".to_string(),
					artist: String::new(),
					default_channel_disables: 0,
					emulator_id: 0,
				},
			};
			Spc::build(image, &config)?
		}
		Target::V30Mz => {
			let config = WonderSwanFooterConfig {
				publisher: 0,
				color: false,
				game_id: 0,
				revision: 0,
				rom_size_code: 0,
				save_type_code: 0,
				flags: 0,
				rtc_present: false,
			};
			WonderSwan::build(image, &config)?
		}
	};
	Ok(rom)
}
