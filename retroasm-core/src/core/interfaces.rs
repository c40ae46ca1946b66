//! Out-of-scope collaborators the code generator depends on by trait only:
//! symbol lookup, macro lookup and expression evaluation. Concrete
//! implementations (backed by this crate's own `symbols`/`macros` modules,
//! or supplied by a caller) are wired in at the point code generation is
//! invoked; the generator itself only ever sees these trait objects.

use thiserror::Error;

use crate::core::ast::{Expression, Statement};
use crate::error::SourcePos;

/// A symbol-value lookup, external to code generation. `None` means
/// "not yet defined" rather than an error — forward references are
/// legitimate and surface as [`CodeError::UnresolvedExpression`] only if
/// still unresolved when the generator actually needs the value.
pub trait SymbolTable {
	fn try_lookup(&self, name: &str) -> Option<i64>;
}

/// A macro-body lookup, external to code generation.
pub trait MacroTable {
	fn get(&self, name: &str) -> Option<&MacroBody>;
}

/// The statements and formal parameters of a registered macro.
#[derive(Debug, Clone)]
pub struct MacroBody {
	pub params: Vec<String>,
	pub body: Vec<Statement>,
}

/// Expression evaluation, external to code generation. `evaluate` resolves
/// an [`Expression`] to its numeric value against whatever symbol table and
/// current-address cursor the evaluator was constructed with; the generator
/// calls it once per operand/argument and threads any failure into a
/// [`CodeError::UnresolvedExpression`].
pub trait Evaluator {
	fn evaluate(&self, expr: &Expression, pos: &SourcePos) -> Result<i64, CodeError>;

	/// Evaluate an expression used as a conditional's predicate (`if`/
	/// `ifdef`/`ifndef` guard). Kept distinct from [`Evaluator::evaluate`]
	/// because some evaluators treat an undefined symbol as `false` here
	/// rather than as a hard evaluation failure.
	fn evaluate_condition(&self, expr: &Expression, pos: &SourcePos) -> Result<bool, CodeError>;

	/// Publish the current output address so a subsequent `evaluate` call
	/// (e.g. one resolving `*` / the current-address token inside the
	/// operand of the instruction at this very address) sees it.
	fn set_current_address(&mut self, address: u32);
}

/// A single non-fatal code generation failure. Errors of this kind
/// accumulate rather than abort the generation pass — per statement, the
/// generator records a `CodeError` and moves on to the next statement so a
/// single typo doesn't hide every other problem in the file.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodeError {
	#[error("{pos}: unresolved expression: {message}")]
	UnresolvedExpression { pos: SourcePos, message: String },

	#[error("{pos}: invalid addressing mode for `{mnemonic}`")]
	InvalidAddressingMode { pos: SourcePos, mnemonic: String },

	#[error("{pos}: branch target out of range ({offset} does not fit in i8)")]
	BranchOutOfRange { pos: SourcePos, offset: i64 },

	#[error("{pos}: pad target {target:#x} is behind the current address {current:#x}")]
	PadBackwards { pos: SourcePos, current: u32, target: u32 },

	#[error("{pos}: invalid alignment {alignment} (must be a power of two)")]
	InvalidAlignment { pos: SourcePos, alignment: i64 },

	#[error("{pos}: failed to read included binary `{path}`: {message}")]
	IncbinFailure { pos: SourcePos, path: String, message: String },

	#[error("{pos}: repeat count {count} is negative")]
	NegativeRepeat { pos: SourcePos, count: i64 },

	#[error("{pos}: macro expansion failed: {message}")]
	MacroExpansion { pos: SourcePos, message: String },

	#[error("{pos}: unknown mnemonic `{mnemonic}`")]
	UnknownMnemonic { pos: SourcePos, mnemonic: String },
}

impl CodeError {
	#[must_use]
	pub fn pos(&self) -> &SourcePos {
		match self {
			Self::UnresolvedExpression { pos, .. }
			| Self::InvalidAddressingMode { pos, .. }
			| Self::BranchOutOfRange { pos, .. }
			| Self::PadBackwards { pos, .. }
			| Self::InvalidAlignment { pos, .. }
			| Self::IncbinFailure { pos, .. }
			| Self::NegativeRepeat { pos, .. }
			| Self::MacroExpansion { pos, .. }
			| Self::UnknownMnemonic { pos, .. } => pos,
		}
	}
}
