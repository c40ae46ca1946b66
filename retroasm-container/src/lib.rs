//! # retroasm-container
//!
//! Turns a [`retroasm_core::core::FlattenedImage`] into the final bytes
//! of a real ROM or cartridge file: headers, fixed logos, checksums,
//! interrupt-vector placement and padding to whatever size each target
//! format demands.
//!
//! [`header`] builds each format's fixed-layout header or footer bytes
//! in isolation; [`builders`] combines that output with a flattened
//! image through the [`builders::ContainerBuilder`] trait, patching in
//! any whole-image checksum the format requires. Every builder is
//! deterministic: the same image and configuration always produce
//! byte-identical output.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retroasm_container::builders::{nes::Nes, ContainerBuilder};
//! use retroasm_container::header::ines1::InesHeaderConfig;
//! use retroasm_container::header::Mirroring;
//! use retroasm_core::core::FlattenedImage;
//!
//! let image = FlattenedImage { start: 0x8000, data: vec![0xEA; 16 * 1024] };
//! let config = InesHeaderConfig {
//!     prg_16k_units: 1,
//!     chr_8k_units: 0,
//!     mapper: 0,
//!     mirroring: Mirroring::Horizontal,
//!     battery: false,
//!     trainer: false,
//!     vs_unisystem: false,
//!     playchoice10: false,
//! };
//! let rom = Nes::build(&image, &config).unwrap();
//! assert_eq!(&rom[0..4], b"NES\x1a");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builders;
pub mod err;
pub mod header;

pub use builders::ContainerBuilder;
pub use err::Error;
