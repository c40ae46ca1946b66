//! Container-builder validation errors.
//!
//! These are distinct from [`retroasm_core::CodeError`]: a malformed
//! header or an out-of-range ROM size means the builder cannot produce
//! even a partial image, so these surface as a hard `Result::Err` rather
//! than accumulating the way code generation's statement-level errors do.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("invalid iNES file header")]
	InvalidHeader,
	#[error("unsupported file version")]
	UnsupportedVersion,
	#[error("{field} value {value} is out of range ({min}..={max})")]
	FieldOutOfRange { field: &'static str, value: i64, min: i64, max: i64 },
	#[error("ROM image is {actual} bytes, which is not a valid size for this target ({reason})")]
	InvalidRomSize { actual: usize, reason: &'static str },
	#[error("string field {field} is {len} bytes, longer than its {max}-byte slot")]
	StringTooLong { field: &'static str, len: usize, max: usize },
}
