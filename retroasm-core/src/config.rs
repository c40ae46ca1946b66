//! Configuration management for the assembler.
//!
//! This module provides configuration options for controlling assembler
//! behavior and auxiliary output. Anything specific to a single target's
//! ROM container (header layout, checksums, bank sizing) lives in
//! `retroasm-container` instead, selected by a caller once it knows which
//! [`Target`] it's assembling for.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AssemblyError, AssemblyResult};
use crate::instructions::Target;

/// Main configuration for an assembly job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	/// Input file settings
	pub input: InputConfig,

	/// Output file settings
	pub output: OutputConfig,

	/// Assembly behavior settings
	pub assembly: AssemblyConfig,

	/// Target CPU
	pub target: Target,

	/// Debug and logging settings
	pub debug: DebugConfig,

	/// Predefined symbols with integer values
	pub predefined_symbols: HashMap<String, i32>,

	/// Predefined symbols with string values
	pub predefined_strings: HashMap<String, String>,
}

/// Input file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
	/// Main assembly source file
	pub source_file: Option<PathBuf>,

	/// Additional include directories
	pub include_dirs: Vec<PathBuf>,

	/// Maximum include depth to prevent infinite recursion
	pub max_include_depth: usize,

	/// Character encoding for source files
	pub encoding: FileEncoding,

	/// Case sensitivity for symbols and labels
	pub case_sensitive: bool,
}

/// Output file configuration. `rom_file`'s bytes are whatever the caller's
/// container builder produces; this module has no opinion on its format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
	/// Output ROM/image file path
	pub rom_file: Option<PathBuf>,

	/// Generate listing file
	pub listing_file: Option<PathBuf>,

	/// Generate symbol file
	pub symbol_file: Option<PathBuf>,

	/// Generate debug information
	pub debug_file: Option<PathBuf>,

	/// Generate map file
	pub map_file: Option<PathBuf>,
}

/// Assembly behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
	/// Maximum number of assembly passes
	pub max_passes: usize,

	/// Allow undefined symbols in final pass
	pub allow_undefined_symbols: bool,

	/// Warn on unused symbols
	pub warn_unused_symbols: bool,

	/// Maximum number of errors before stopping
	pub max_errors: Option<usize>,

	/// Enable macro expansion
	pub enable_macros: bool,

	/// Maximum macro recursion depth
	pub max_macro_depth: usize,

	/// Enable conditional assembly
	pub enable_conditionals: bool,

	/// Maximum conditional nesting depth
	pub max_conditional_depth: usize,
}

/// Debug and logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
	/// Verbose output
	pub verbose: bool,

	/// Debug level
	pub debug_level: DebugLevel,

	/// Generate timing information
	pub timing: bool,

	/// Generate memory usage statistics
	pub memory_stats: bool,

	/// Dump intermediate representations
	pub dump_ir: bool,
}

/// File encoding options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FileEncoding {
	/// UTF-8 encoding
	Utf8,
	/// ASCII encoding
	Ascii,
	/// Latin-1 encoding
	Latin1,
}

/// Debug level options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum DebugLevel {
	/// No debug output
	None,
	/// Basic debug information
	Basic,
	/// Detailed debug information
	Detailed,
	/// Verbose debug information
	Verbose,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			input: InputConfig::default(),
			output: OutputConfig::default(),
			assembly: AssemblyConfig::default(),
			target: Target::Mos6502,
			debug: DebugConfig::default(),
			predefined_symbols: HashMap::new(),
			predefined_strings: HashMap::new(),
		}
	}
}

impl Default for InputConfig {
	fn default() -> Self {
		Self {
			source_file: None,
			include_dirs: vec![PathBuf::from(".")],
			max_include_depth: 16,
			encoding: FileEncoding::Utf8,
			case_sensitive: false,
		}
	}
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self { rom_file: None, listing_file: None, symbol_file: None, debug_file: None, map_file: None }
	}
}

impl Default for AssemblyConfig {
	fn default() -> Self {
		Self {
			max_passes: 3,
			allow_undefined_symbols: false,
			warn_unused_symbols: true,
			max_errors: Some(100),
			enable_macros: true,
			max_macro_depth: 64,
			enable_conditionals: true,
			max_conditional_depth: 32,
		}
	}
}

impl Default for DebugConfig {
	fn default() -> Self {
		Self { verbose: false, debug_level: DebugLevel::None, timing: false, memory_stats: false, dump_ir: false }
	}
}

impl Config {
	/// Create a new configuration with default values.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Load configuration from a file.
	pub fn from_file(path: &std::path::Path) -> AssemblyResult<Self> {
		let content = std::fs::read_to_string(path).map_err(|e| AssemblyError::Io { pos: None, source: e })?;

		let config: Config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
			toml::from_str(&content).map_err(|e| AssemblyError::config(format!("Invalid TOML: {e}")))?
		} else {
			serde_json::from_str(&content).map_err(|e| AssemblyError::config(format!("Invalid JSON: {e}")))?
		};

		config.validate()?;
		Ok(config)
	}

	/// Save configuration to a file.
	pub fn to_file(&self, path: &std::path::Path) -> AssemblyResult<()> {
		let content = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
			toml::to_string_pretty(self).map_err(|e| AssemblyError::config(format!("Failed to serialize TOML: {e}")))?
		} else {
			serde_json::to_string_pretty(self)
				.map_err(|e| AssemblyError::config(format!("Failed to serialize JSON: {e}")))?
		};

		std::fs::write(path, content).map_err(|e| AssemblyError::Io { pos: None, source: e })?;

		Ok(())
	}

	/// Validate the configuration.
	pub fn validate(&self) -> AssemblyResult<()> {
		if self.assembly.max_passes == 0 {
			return Err(AssemblyError::config("max_passes must be greater than 0"));
		}

		if self.assembly.max_passes > 10 {
			return Err(AssemblyError::config("max_passes must not exceed 10"));
		}

		if self.assembly.max_macro_depth == 0 {
			return Err(AssemblyError::config("max_macro_depth must be greater than 0"));
		}

		if self.assembly.max_conditional_depth == 0 {
			return Err(AssemblyError::config("max_conditional_depth must be greater than 0"));
		}

		if self.input.max_include_depth == 0 {
			return Err(AssemblyError::config("max_include_depth must be greater than 0"));
		}

		Ok(())
	}

	/// Set the input file.
	#[must_use]
	pub fn with_input_file(mut self, path: PathBuf) -> Self {
		self.input.source_file = Some(path);
		self
	}

	/// Set the output file.
	#[must_use]
	pub fn with_output_file(mut self, path: PathBuf) -> Self {
		self.output.rom_file = Some(path);
		self
	}

	/// Enable verbose output.
	#[must_use]
	pub fn with_verbose(mut self, verbose: bool) -> Self {
		self.debug.verbose = verbose;
		self
	}

	/// Set the target CPU.
	#[must_use]
	pub fn with_target(mut self, target: Target) -> Self {
		self.target = target;
		self
	}

	/// Add an include directory.
	#[must_use]
	pub fn add_include_dir(mut self, path: PathBuf) -> Self {
		self.input.include_dirs.push(path);
		self
	}

	/// Define a predefined numeric symbol, as `-D NAME=VALUE` would on the
	/// command line.
	#[must_use]
	pub fn with_predefined_symbol(mut self, name: impl Into<String>, value: i32) -> Self {
		self.predefined_symbols.insert(name.into(), value);
		self
	}

	/// Get effective include directories (including current directory).
	#[must_use]
	pub fn include_directories(&self) -> &[PathBuf] {
		&self.input.include_dirs
	}

	/// Check if a feature is enabled.
	#[must_use]
	pub fn is_feature_enabled(&self, feature: &str) -> bool {
		match feature {
			"macros" => self.assembly.enable_macros,
			"conditionals" => self.assembly.enable_conditionals,
			"verbose" => self.debug.verbose,
			"timing" => self.debug.timing,
			"memory_stats" => self.debug.memory_stats,
			_ => false,
		}
	}

	/// Get configuration value by key.
	#[must_use]
	pub fn get_value(&self, key: &str) -> Option<String> {
		match key {
			"max_passes" => Some(self.assembly.max_passes.to_string()),
			"max_errors" => self.assembly.max_errors.map(|v| v.to_string()),
			"max_macro_depth" => Some(self.assembly.max_macro_depth.to_string()),
			"max_conditional_depth" => Some(self.assembly.max_conditional_depth.to_string()),
			"max_include_depth" => Some(self.input.max_include_depth.to_string()),
			_ => None,
		}
	}
}

/// Builder for creating configurations.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
	config: Config,
}

impl ConfigBuilder {
	/// Create a new configuration builder.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Set input file.
	#[must_use]
	pub fn input_file(mut self, path: PathBuf) -> Self {
		self.config.input.source_file = Some(path);
		self
	}

	/// Set output file.
	#[must_use]
	pub fn output_file(mut self, path: PathBuf) -> Self {
		self.config.output.rom_file = Some(path);
		self
	}

	/// Set verbose mode.
	#[must_use]
	pub fn verbose(mut self, verbose: bool) -> Self {
		self.config.debug.verbose = verbose;
		self
	}

	/// Set target CPU.
	#[must_use]
	pub fn target(mut self, target: Target) -> Self {
		self.config.target = target;
		self
	}

	/// Add include directory.
	#[must_use]
	pub fn include_dir(mut self, path: PathBuf) -> Self {
		self.config.input.include_dirs.push(path);
		self
	}

	/// Build the configuration.
	pub fn build(self) -> AssemblyResult<Config> {
		self.config.validate()?;
		Ok(self.config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config() {
		let config = Config::default();
		assert_eq!(config.assembly.max_passes, 3);
		assert_eq!(config.target, Target::Mos6502);
		assert!(!config.debug.verbose);
	}

	#[test]
	fn test_config_validation() {
		let mut config = Config::default();
		assert!(config.validate().is_ok());

		config.assembly.max_passes = 0;
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_config_builder() {
		let config = ConfigBuilder::new()
			.input_file(PathBuf::from("test.asm"))
			.output_file(PathBuf::from("test.nes"))
			.verbose(true)
			.target(Target::Sm83)
			.build()
			.unwrap();

		assert_eq!(config.input.source_file, Some(PathBuf::from("test.asm")));
		assert_eq!(config.output.rom_file, Some(PathBuf::from("test.nes")));
		assert!(config.debug.verbose);
		assert_eq!(config.target, Target::Sm83);
	}

	#[test]
	fn test_feature_flags() {
		let config = Config::default();
		assert!(config.is_feature_enabled("macros"));
		assert!(config.is_feature_enabled("conditionals"));
		assert!(!config.is_feature_enabled("verbose"));
	}

	#[test]
	fn test_config_values() {
		let config = Config::default();
		assert_eq!(config.get_value("max_passes"), Some("3".to_string()));
		assert_eq!(config.get_value("nonexistent"), None);
	}

	#[test]
	fn test_fluent_interface() {
		let config = Config::new()
			.with_input_file(PathBuf::from("test.asm"))
			.with_output_file(PathBuf::from("test.nes"))
			.with_verbose(true)
			.with_target(Target::Z80)
			.with_predefined_symbol("SCREEN_WIDTH", 160);

		assert_eq!(config.input.source_file, Some(PathBuf::from("test.asm")));
		assert!(config.debug.verbose);
		assert_eq!(config.target, Target::Z80);
		assert_eq!(config.predefined_symbols.get("SCREEN_WIDTH"), Some(&160));
	}
}
