//! Turns assembly source text into a [`crate::core::ast::Program`].
//!
//! The parser is deliberately the only place in this crate that is
//! target-aware without being a code generator: it needs [`Target`] to
//! decide whether an instruction's operand should be parsed as one of the
//! typed [`OperandSyntax`] shapes (6502-family/65816/HuC6280, which encode
//! addressing mode from operand syntax) or folded verbatim against the
//! mnemonic (SM83/Z80/M68000/ARM7TDMI/SPC700/V30MZ, whose catalogs key on
//! the whole folded operand text) — see [`core::codegen`]'s module docs for
//! why code generation itself never needs to make that distinction again.
//! It otherwise never resolves symbols, expands macros or evaluates
//! expressions; those stay the code generator's external collaborators.

pub mod expr;
pub mod lexer;

use std::path::PathBuf;

use crate::core::ast::{
	ConditionalNode, DirectiveKind, DirectiveNode, EnumerationBlockNode, EnumerationEntry, Expression,
	InstructionNode, MacroDefinitionNode, MacroInvocationNode, OperandSyntax, Program, RepeatNode, Statement,
	UnaryOp,
};
use crate::core::codegen::VERBATIM_SLOT;
use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::instructions::Target;
use crate::parsing::expr::parse_expression;
use crate::parsing::lexer::{strip_comment, tokenize, Token};

/// Register, register-pair and condition-code names these folded-mnemonic
/// catalogs use as fixed operand text, never as a free expression slot.
/// Matched against a whole rendered segment (parens included), so `(hl)`
/// and `hl` are both listed explicitly rather than derived from one
/// another.
const REGISTER_LIKE: &[&str] = &[
	"a", "b", "c", "d", "e", "h", "l", "af", "bc", "de", "hl", "sp", "ix", "iy", "ixh", "ixl", "iyh", "iyl", "nz",
	"z", "nc", "p", "m", "pe", "po", "(bc)", "(de)", "(hl)", "(hli)", "(hld)", "(ix)", "(iy)", "(sp)", "d0", "d1",
	"d2", "d3", "d4", "d5", "d6", "d7", "a0", "a1", "a2", "a3", "a4", "a5", "a6", "a7", "sr", "ccr", "usp", "pc",
	"r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "r13", "r14", "r15", "lr",
	"al", "ah", "bl", "bh", "cl", "ch", "dl", "dh", "ax", "bx", "cx", "dx", "bp", "si", "di", "cs", "ds", "es", "ss",
];

/// Recursive-descent parser over a whole source file's lines. Block
/// constructs (`if`/`repeat`/`macro`/`enum`) recurse into
/// [`Parser::parse_block`]; everything else is one line, one [`Statement`].
pub struct Parser {
	lines: Vec<String>,
	file: PathBuf,
	index: usize,
	target: Target,
	errors: Vec<AssemblyError>,
}

impl Parser {
	#[must_use]
	pub fn new(source: &str, file: PathBuf, target: Target) -> Self {
		Self { lines: source.lines().map(str::to_string).collect(), file, index: 0, target, errors: Vec::new() }
	}

	/// Parse the whole source into a [`Program`], collecting parse errors
	/// rather than aborting on the first one, the same way code generation
	/// accumulates [`crate::core::CodeError`]s.
	#[must_use]
	pub fn parse_program(mut self) -> (Program, Vec<AssemblyError>) {
		let statements = self.parse_block(&[]);
		(Program::new(statements), self.errors)
	}

	fn pos_at(&self, line: usize) -> SourcePos {
		SourcePos::new(self.file.clone(), line, 1)
	}

	/// The lower-cased first keyword of the current (not-yet-consumed)
	/// line, ignoring any label prefix — used to recognize block
	/// terminators (`endif`, `endr`, ...) without consuming the line.
	fn peek_keyword(&self) -> Option<String> {
		self.lines.get(self.index).and_then(|line| {
			let code = strip_comment(line);
			let (_, rest) = split_label(code.trim());
			rest.trim().split_whitespace().next().map(|w| w.trim_start_matches('.').to_ascii_lowercase())
		})
	}

	fn parse_block(&mut self, terminators: &[&str]) -> Vec<Statement> {
		let mut statements = Vec::new();
		while self.index < self.lines.len() {
			if let Some(word) = self.peek_keyword() {
				if terminators.contains(&word.as_str()) {
					break;
				}
			}
			statements.extend(self.parse_line());
		}
		statements
	}

	/// Consume and parse exactly one source line, recursing to consume an
	/// entire nested block if that's what the line starts.
	fn parse_line(&mut self) -> Vec<Statement> {
		let line_no = self.index + 1;
		let raw = self.lines[self.index].clone();
		self.index += 1;
		let pos = self.pos_at(line_no);

		let code = strip_comment(&raw);
		let trimmed = code.trim();
		if trimmed.is_empty() {
			return Vec::new();
		}

		let (label, rest) = split_label(trimmed);
		let mut statements = Vec::new();
		if let Some(name) = label {
			statements.push(Statement::Label { name: name.to_string(), pos: pos.clone() });
		}
		let rest = rest.trim();
		if rest.is_empty() {
			return statements;
		}

		let tokens = match tokenize(rest, &pos) {
			Ok(t) => t,
			Err(e) => {
				self.errors.push(e);
				return statements;
			}
		};
		let Some(Token::Ident(first)) = tokens.first().cloned() else {
			self.errors.push(AssemblyError::parse(pos, "expected a mnemonic, directive or label"));
			return statements;
		};
		let keyword = first.trim_start_matches('.').to_ascii_lowercase();

		match keyword.as_str() {
			"if" | "ifdef" | "ifndef" => statements.push(self.parse_conditional(&keyword, &tokens[1..], pos)),
			"repeat" | "rept" => statements.push(self.parse_repeat(&tokens[1..], pos)),
			"macro" => statements.push(self.parse_macro_definition(&tokens[1..], pos)),
			"enum" => statements.push(self.parse_enum(&tokens[1..], pos)),
			"org" | "byte" | "db" | "word" | "dw" | "long" | "dl" | "dd" | "ds" | "fill" | "res" | "incbin"
			| "align" | "pad" => match self.parse_directive(&keyword, &tokens[1..], &pos) {
				Ok(kind) => statements.push(Statement::Directive(DirectiveNode { kind, pos })),
				Err(e) => self.errors.push(e),
			},
			_ => {
				let catalog = self.target.cached_catalog();
				let looks_like_call = matches!(tokens.get(1), Some(Token::LParen)) && !catalog.knows_mnemonic(&first);
				if looks_like_call {
					match self.parse_macro_invocation(&first, &tokens[1..], pos.clone()) {
						Ok(stmt) => statements.push(stmt),
						Err(e) => self.errors.push(e),
					}
				} else {
					match self.parse_operand(&first, &tokens[1..], &pos) {
						Ok(operand) => {
							statements.push(Statement::Instruction(InstructionNode { mnemonic: first, operand, pos }));
						}
						Err(e) => self.errors.push(e),
					}
				}
			}
		}
		statements
	}

	fn parse_expr_tokens(&mut self, tokens: &[Token], pos: &SourcePos) -> Expression {
		match parse_expression(tokens, pos.clone()) {
			Ok(e) => e,
			Err(e) => {
				self.errors.push(e);
				Expression::Number(0)
			}
		}
	}

	fn parse_conditional(&mut self, keyword: &str, rest: &[Token], pos: SourcePos) -> Statement {
		let condition = match keyword {
			"ifdef" | "ifndef" => match rest.first() {
				Some(Token::Ident(name)) => {
					let sym = Expression::Symbol(name.clone());
					if keyword == "ifndef" {
						Expression::Unary(UnaryOp::Not, Box::new(sym))
					} else {
						sym
					}
				}
				_ => {
					self.errors.push(AssemblyError::parse(pos.clone(), format!("`{keyword}` requires a symbol name")));
					Expression::Number(0)
				}
			},
			_ => self.parse_expr_tokens(rest, &pos),
		};

		let then_branch = self.parse_block(&["else", "endif"]);
		let else_branch = if self.peek_keyword().as_deref() == Some("else") {
			self.index += 1;
			self.parse_block(&["endif"])
		} else {
			Vec::new()
		};
		if self.peek_keyword().as_deref() == Some("endif") {
			self.index += 1;
		} else {
			self.errors.push(AssemblyError::parse(pos.clone(), "missing `endif`"));
		}
		Statement::Conditional(ConditionalNode { condition, then_branch, else_branch, pos })
	}

	fn parse_repeat(&mut self, rest: &[Token], pos: SourcePos) -> Statement {
		let count = self.parse_expr_tokens(rest, &pos);
		let body = self.parse_block(&["endr"]);
		if self.peek_keyword().as_deref() == Some("endr") {
			self.index += 1;
		} else {
			self.errors.push(AssemblyError::parse(pos.clone(), "missing `endr`"));
		}
		Statement::Repeat(RepeatNode { count, body, pos })
	}

	fn parse_macro_definition(&mut self, rest: &[Token], pos: SourcePos) -> Statement {
		let name = match rest.first() {
			Some(Token::Ident(n)) => n.clone(),
			_ => {
				self.errors.push(AssemblyError::parse(pos.clone(), "macro definition requires a name"));
				String::new()
			}
		};
		let mut params = Vec::new();
		if matches!(rest.get(1), Some(Token::LParen)) {
			for tok in &rest[2..] {
				match tok {
					Token::Ident(p) => params.push(p.clone()),
					Token::RParen => break,
					_ => {}
				}
			}
		}
		let body = self.parse_block(&["endmacro", "endm"]);
		if matches!(self.peek_keyword().as_deref(), Some("endmacro" | "endm")) {
			self.index += 1;
		} else {
			self.errors.push(AssemblyError::parse(pos.clone(), "missing `endmacro`"));
		}
		Statement::MacroDefinition(MacroDefinitionNode { name, params, body, pos })
	}

	fn parse_macro_invocation(&mut self, name: &str, tokens: &[Token], pos: SourcePos) -> AssemblyResult<Statement> {
		let close = match_paren(tokens, 0, &pos)?;
		let inner = &tokens[1..close];
		let args = if inner.is_empty() {
			Vec::new()
		} else {
			split_top_level_commas(inner).into_iter().map(|seg| parse_expression(seg, pos.clone())).collect::<AssemblyResult<Vec<_>>>()?
		};
		Ok(Statement::MacroInvocation(MacroInvocationNode { name: name.to_string(), args, pos }))
	}

	fn parse_enum(&mut self, rest: &[Token], pos: SourcePos) -> Statement {
		let base = self.parse_expr_tokens(rest, &pos);
		let mut entries = Vec::new();
		while self.index < self.lines.len() {
			match self.peek_keyword() {
				Some(w) if w == "ende" || w == "endenum" => break,
				None => {
					self.index += 1;
					continue;
				}
				_ => {}
			}
			let line_no = self.index + 1;
			let raw = self.lines[self.index].clone();
			self.index += 1;
			let entry_pos = self.pos_at(line_no);
			let trimmed = strip_comment(&raw).trim();
			if trimmed.is_empty() {
				continue;
			}
			let (label, rest) = split_label(trimmed);
			let Some(name) = label else {
				self.errors.push(AssemblyError::parse(entry_pos, "expected `name: size` inside enum block"));
				continue;
			};
			let rest = rest.trim();
			let size = if rest.is_empty() {
				Expression::Number(1)
			} else {
				match tokenize(rest, &entry_pos).and_then(|toks| parse_expression(&toks, entry_pos.clone())) {
					Ok(e) => e,
					Err(e) => {
						self.errors.push(e);
						Expression::Number(1)
					}
				}
			};
			entries.push(EnumerationEntry { name: name.to_string(), size });
		}
		if matches!(self.peek_keyword().as_deref(), Some("ende" | "endenum")) {
			self.index += 1;
		} else {
			self.errors.push(AssemblyError::parse(pos.clone(), "missing `ende`"));
		}
		Statement::EnumerationBlock(EnumerationBlockNode { base, entries, pos })
	}

	fn parse_directive(&mut self, keyword: &str, tokens: &[Token], pos: &SourcePos) -> AssemblyResult<DirectiveKind> {
		match keyword {
			"org" => Ok(DirectiveKind::Org(parse_expression(tokens, pos.clone())?)),
			"byte" | "db" => Ok(DirectiveKind::Byte(parse_byte_list(tokens, pos)?)),
			"word" | "dw" => Ok(DirectiveKind::Word(parse_expr_list(tokens, pos)?)),
			"long" | "dl" | "dd" => Ok(DirectiveKind::Long(parse_expr_list(tokens, pos)?)),
			"ds" | "fill" | "res" => {
				let segs = split_top_level_commas(tokens);
				let count = parse_expression(segs.first().copied().unwrap_or(&[]), pos.clone())?;
				let fill = match segs.get(1) {
					Some(seg) => Some(parse_expression(seg, pos.clone())?),
					None => None,
				};
				Ok(DirectiveKind::Ds(count, fill))
			}
			"incbin" => {
				let segs = split_top_level_commas(tokens);
				let Some(path_seg) = segs.first() else {
					return Err(AssemblyError::parse(pos.clone(), "incbin requires a file path"));
				};
				let path = match path_seg {
					[Token::Str(s)] => s.clone(),
					_ => return Err(AssemblyError::parse(pos.clone(), "incbin's path must be a quoted string")),
				};
				let offset = match segs.get(1) {
					Some(seg) => Some(parse_expression(seg, pos.clone())?),
					None => None,
				};
				let length = match segs.get(2) {
					Some(seg) => Some(parse_expression(seg, pos.clone())?),
					None => None,
				};
				Ok(DirectiveKind::Incbin(path, offset, length))
			}
			"align" => {
				let segs = split_top_level_commas(tokens);
				let alignment = parse_expression(segs.first().copied().unwrap_or(&[]), pos.clone())?;
				let fill = match segs.get(1) {
					Some(seg) => Some(parse_expression(seg, pos.clone())?),
					None => None,
				};
				Ok(DirectiveKind::Align(alignment, fill))
			}
			"pad" => {
				let segs = split_top_level_commas(tokens);
				let target = parse_expression(segs.first().copied().unwrap_or(&[]), pos.clone())?;
				let fill = match segs.get(1) {
					Some(seg) => Some(parse_expression(seg, pos.clone())?),
					None => None,
				};
				Ok(DirectiveKind::Pad(target, fill))
			}
			_ => unreachable!("dispatched only for recognized directive keywords"),
		}
	}

	fn parse_operand(&mut self, mnemonic: &str, tokens: &[Token], pos: &SourcePos) -> AssemblyResult<OperandSyntax> {
		if tokens.is_empty() {
			return Ok(OperandSyntax::None);
		}
		if self.target.narrows_absolute_to_zero_page() {
			parse_typed_operand(tokens, pos)
		} else {
			parse_verbatim_operand(mnemonic, tokens, pos)
		}
	}
}

// --- typed (6502-family/65816/HuC6280) operand syntax ---

fn parse_typed_operand(tokens: &[Token], pos: &SourcePos) -> AssemblyResult<OperandSyntax> {
	match tokens[0] {
		Token::Hash => Ok(OperandSyntax::Immediate(parse_expression(&tokens[1..], pos.clone())?)),
		Token::LParen => {
			let close = match_paren(tokens, 0, pos)?;
			let inner = &tokens[1..close];
			let after = &tokens[close + 1..];
			let inner_segs = split_top_level_commas(inner);
			if inner_segs.len() == 2 && is_ident(inner_segs[1], "s") {
				if is_suffix(after, "y") {
					Ok(OperandSyntax::StackRelativeIndirectY(parse_expression(inner_segs[0], pos.clone())?))
				} else {
					Err(AssemblyError::parse(pos.clone(), "expected `, y` after `(expr, s)`"))
				}
			} else if inner_segs.len() == 2 && is_ident(inner_segs[1], "x") {
				if after.is_empty() {
					Ok(OperandSyntax::IndirectX(parse_expression(inner_segs[0], pos.clone())?))
				} else {
					Err(AssemblyError::parse(pos.clone(), "unexpected tokens after `(expr, x)`"))
				}
			} else if inner_segs.len() == 1 {
				let expr = parse_expression(inner_segs[0], pos.clone())?;
				if after.is_empty() {
					Ok(OperandSyntax::Indirect(expr))
				} else if is_suffix(after, "y") {
					Ok(OperandSyntax::IndirectY(expr))
				} else {
					Err(AssemblyError::parse(pos.clone(), "unexpected tokens after `(expr)`"))
				}
			} else {
				Err(AssemblyError::parse(pos.clone(), "malformed indirect operand"))
			}
		}
		Token::LBracket => {
			let close = match_paren(tokens, 0, pos)?;
			let inner = &tokens[1..close];
			let after = &tokens[close + 1..];
			let expr = parse_expression(inner, pos.clone())?;
			if after.is_empty() {
				Ok(OperandSyntax::IndirectLong(expr))
			} else if is_suffix(after, "y") {
				Ok(OperandSyntax::IndirectLongY(expr))
			} else {
				Err(AssemblyError::parse(pos.clone(), "unexpected tokens after `[expr]`"))
			}
		}
		_ => {
			let segs = split_top_level_commas(tokens);
			match segs.as_slice() {
				[one] => Ok(OperandSyntax::Direct(parse_expression(one, pos.clone())?)),
				[first, second] if is_ident(second, "x") => Ok(OperandSyntax::DirectX(parse_expression(first, pos.clone())?)),
				[first, second] if is_ident(second, "y") => Ok(OperandSyntax::DirectY(parse_expression(first, pos.clone())?)),
				[first, second] if is_ident(second, "s") => Ok(OperandSyntax::StackRelative(parse_expression(first, pos.clone())?)),
				[first, second, ..] => {
					// Two-operand block-transfer forms (65816 `mvn`/`mvp`,
					// HuC6280's block-move family); a third operand, where
					// one is written, has no slot in `OperandSyntax::Pair`
					// and is dropped.
					Ok(OperandSyntax::Pair(parse_expression(first, pos.clone())?, parse_expression(second, pos.clone())?))
				}
				[] => Ok(OperandSyntax::None),
			}
		}
	}
}

// --- folded-mnemonic (SM83/Z80/M68000/ARM7TDMI/SPC700/V30MZ) operand syntax ---

fn parse_verbatim_operand(mnemonic: &str, tokens: &[Token], pos: &SourcePos) -> AssemblyResult<OperandSyntax> {
	let lower_mnemonic = mnemonic.to_ascii_lowercase();

	// `rst` and the CB-prefixed bit family fold a small enumerated constant
	// directly into the catalog key text (`"rst 00h"`, `"bit 7, h"`) rather
	// than leaving it as a free operand slot, so a plain numeric literal
	// there needs that exact text reproduced, not substituted later.
	if lower_mnemonic == "rst" {
		if let [Token::Number(n)] = tokens {
			return Ok(OperandSyntax::Verbatim(format!("{:02x}h", n & 0xFF)));
		}
	}
	if matches!(lower_mnemonic.as_str(), "bit" | "res" | "set") {
		let segs = split_top_level_commas(tokens);
		if let [bit_seg, reg_seg] = segs.as_slice() {
			if let [Token::Number(n)] = *bit_seg {
				return Ok(OperandSyntax::Verbatim(format!("{n}, {}", render_tokens(reg_seg))));
			}
		}
	}

	let segments = split_top_level_commas(tokens);
	if let Some(last) = segments.last() {
		if !is_bare_register_like(last) {
			let (prefix, value_tokens) = strip_free_slot_prefix(last);
			if !value_tokens.is_empty() {
				if let Ok(expr) = parse_expression(value_tokens, pos.clone()) {
					let mut parts: Vec<String> = segments[..segments.len() - 1].iter().map(|seg| render_tokens(seg)).collect();
					parts.push(format!("{prefix}{VERBATIM_SLOT}"));
					return Ok(OperandSyntax::VerbatimImmediate { template: parts.join(", "), value: expr });
				}
			}
		}
	}

	Ok(OperandSyntax::Verbatim(render_tokens(tokens)))
}

fn is_bare_register_like(tokens: &[Token]) -> bool {
	REGISTER_LIKE.contains(&render_tokens(tokens).as_str())
}

fn strip_free_slot_prefix(tokens: &[Token]) -> (&'static str, &[Token]) {
	match tokens.first() {
		Some(Token::Hash) => ("#", &tokens[1..]),
		Some(Token::Bang) => ("!", &tokens[1..]),
		_ => ("", tokens),
	}
}

/// Reconstruct lower-cased, catalog-convention source text from a token
/// slice: no space after `(`, `[` or a prefix marker, no space before `)`
/// or `]`, single spaces elsewhere.
fn render_tokens(tokens: &[Token]) -> String {
	let mut out = String::new();
	let mut prev_tight = false;
	for tok in tokens {
		let word = match tok {
			Token::Ident(id) => id.to_ascii_lowercase(),
			Token::Number(n) => n.to_string(),
			Token::LParen => "(".to_string(),
			Token::RParen => ")".to_string(),
			Token::LBracket => "[".to_string(),
			Token::RBracket => "]".to_string(),
			Token::Bang => "!".to_string(),
			Token::Plus => "+".to_string(),
			Token::Minus => "-".to_string(),
			Token::Hash => "#".to_string(),
			_ => continue,
		};
		let tight_open = matches!(tok, Token::LParen | Token::LBracket | Token::Bang | Token::Hash);
		let needs_space = !out.is_empty() && !prev_tight && !matches!(tok, Token::RParen | Token::RBracket | Token::Plus);
		if needs_space {
			out.push(' ');
		}
		out.push_str(&word);
		prev_tight = tight_open;
	}
	out
}

fn parse_byte_list(tokens: &[Token], pos: &SourcePos) -> AssemblyResult<Vec<Expression>> {
	let mut out = Vec::new();
	for seg in split_top_level_commas(tokens) {
		if let [Token::Str(s)] = seg {
			out.extend(s.bytes().map(|b| Expression::Number(i64::from(b))));
		} else {
			out.push(parse_expression(seg, pos.clone())?);
		}
	}
	Ok(out)
}

fn parse_expr_list(tokens: &[Token], pos: &SourcePos) -> AssemblyResult<Vec<Expression>> {
	split_top_level_commas(tokens).into_iter().map(|seg| parse_expression(seg, pos.clone())).collect()
}

/// Split a token slice on commas that aren't nested inside `(`/`[`/`{`.
fn split_top_level_commas(tokens: &[Token]) -> Vec<&[Token]> {
	let mut result = Vec::new();
	let mut depth = 0i32;
	let mut start = 0;
	for (i, tok) in tokens.iter().enumerate() {
		match tok {
			Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
			Token::RParen | Token::RBracket | Token::RBrace => depth -= 1,
			Token::Comma if depth == 0 => {
				result.push(&tokens[start..i]);
				start = i + 1;
			}
			_ => {}
		}
	}
	result.push(&tokens[start..]);
	result
}

/// Find the index of the `)`/`]` matching `tokens[open_idx]`.
fn match_paren(tokens: &[Token], open_idx: usize, pos: &SourcePos) -> AssemblyResult<usize> {
	let mut depth = 0i32;
	for (i, tok) in tokens.iter().enumerate().skip(open_idx) {
		match tok {
			Token::LParen | Token::LBracket => depth += 1,
			Token::RParen | Token::RBracket => {
				depth -= 1;
				if depth == 0 {
					return Ok(i);
				}
			}
			_ => {}
		}
	}
	Err(AssemblyError::parse(pos.clone(), "unmatched '(' or '['"))
}

fn is_ident(tokens: &[Token], name: &str) -> bool {
	matches!(tokens, [Token::Ident(s)] if s.eq_ignore_ascii_case(name))
}

fn is_suffix(tokens: &[Token], name: &str) -> bool {
	matches!(tokens, [Token::Comma, Token::Ident(s)] if s.eq_ignore_ascii_case(name))
}

/// Split a `name: rest` line prefix. Local labels (leading `.`) are valid
/// identifiers too, so `.loop: dex` splits the same way.
fn split_label(line: &str) -> (Option<&str>, &str) {
	if let Some(idx) = line.find(':') {
		let candidate = line[..idx].trim();
		if !candidate.is_empty() && utils::is_valid_identifier(candidate) {
			return (Some(candidate), &line[idx + 1..]);
		}
	}
	(None, line)
}

/// Generic lexical helpers shared by the tokenizer and the statement
/// parser.
pub mod utils {
	use crate::error::{AssemblyError, AssemblyResult, SourcePos};

	/// Parse a numeric literal (supports `$hex`, `0xhex`, `hexh`, `%binary`,
	/// `0bbinary`, octal and decimal).
	pub fn parse_number(s: &str, pos: &SourcePos) -> AssemblyResult<i32> {
		let trimmed = s.trim();

		if trimmed.is_empty() {
			return Err(AssemblyError::parse(pos.clone(), "empty number literal".to_string()));
		}

		if let Some(hex_str) = trimmed.strip_prefix('$') {
			return i32::from_str_radix(hex_str, 16)
				.map_err(|_| AssemblyError::parse(pos.clone(), format!("invalid hex number: {s}")));
		}
		if let Some(hex_str) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
			return i32::from_str_radix(hex_str, 16)
				.map_err(|_| AssemblyError::parse(pos.clone(), format!("invalid hex number: {s}")));
		}
		if let Some(hex_str) = trimmed.strip_suffix('h').or_else(|| trimmed.strip_suffix('H')) {
			return i32::from_str_radix(hex_str, 16)
				.map_err(|_| AssemblyError::parse(pos.clone(), format!("invalid hex number: {s}")));
		}
		if let Some(bin_str) = trimmed.strip_prefix('%') {
			return i32::from_str_radix(bin_str, 2)
				.map_err(|_| AssemblyError::parse(pos.clone(), format!("invalid binary number: {s}")));
		}
		if let Some(bin_str) = trimmed.strip_prefix("0b").or_else(|| trimmed.strip_prefix("0B")) {
			return i32::from_str_radix(bin_str, 2)
				.map_err(|_| AssemblyError::parse(pos.clone(), format!("invalid binary number: {s}")));
		}
		if trimmed.starts_with('0') && trimmed.len() > 1 && trimmed.chars().all(|c| c.is_ascii_digit()) {
			return i32::from_str_radix(trimmed, 8)
				.map_err(|_| AssemblyError::parse(pos.clone(), format!("invalid octal number: {s}")));
		}

		trimmed.parse::<i32>().map_err(|_| AssemblyError::parse(pos.clone(), format!("invalid number: {s}")))
	}

	/// Check if a string is a valid identifier (label or symbol name).
	#[must_use]
	pub fn is_valid_identifier(s: &str) -> bool {
		if s.is_empty() {
			return false;
		}
		let first_char = s.chars().next().unwrap();
		if !first_char.is_ascii_alphabetic() && first_char != '_' && first_char != '.' {
			return false;
		}
		s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
	}

	/// Normalize identifier case.
	#[must_use]
	pub fn normalize_identifier(s: &str, case_sensitive: bool) -> String {
		if case_sensitive {
			s.to_string()
		} else {
			s.to_uppercase()
		}
	}

	/// Parse a quoted string literal with C-style escape sequences.
	pub fn parse_string_literal(s: &str, pos: &SourcePos) -> AssemblyResult<String> {
		if !s.starts_with('"') || !s.ends_with('"') || s.len() < 2 {
			return Err(AssemblyError::parse(pos.clone(), "string literal must be quoted".to_string()));
		}

		let content = &s[1..s.len() - 1];
		let mut result = String::new();
		let mut chars = content.chars();

		while let Some(ch) = chars.next() {
			if ch == '\\' {
				match chars.next() {
					Some('n') => result.push('\n'),
					Some('r') => result.push('\r'),
					Some('t') => result.push('\t'),
					Some('\\') => result.push('\\'),
					Some('"') => result.push('"'),
					Some('0') => result.push('\0'),
					Some(c) => return Err(AssemblyError::parse(pos.clone(), format!("invalid escape sequence: \\{c}"))),
					None => return Err(AssemblyError::parse(pos.clone(), "unterminated escape sequence".to_string())),
				}
			} else {
				result.push(ch);
			}
		}

		Ok(result)
	}

	#[cfg(test)]
	mod tests {
		use super::*;
		use std::path::PathBuf;

		fn test_pos() -> SourcePos {
			SourcePos::new(PathBuf::from("test.asm"), 1, 1)
		}

		#[test]
		fn test_parse_number() {
			let pos = test_pos();
			assert_eq!(parse_number("42", &pos).unwrap(), 42);
			assert_eq!(parse_number("$FF", &pos).unwrap(), 255);
			assert_eq!(parse_number("0xFF", &pos).unwrap(), 255);
			assert_eq!(parse_number("FFh", &pos).unwrap(), 255);
			assert_eq!(parse_number("%11111111", &pos).unwrap(), 255);
			assert_eq!(parse_number("0b11111111", &pos).unwrap(), 255);
			assert!(parse_number("", &pos).is_err());
			assert!(parse_number("xyz", &pos).is_err());
		}

		#[test]
		fn test_valid_identifier() {
			assert!(is_valid_identifier("label"));
			assert!(is_valid_identifier("_start"));
			assert!(is_valid_identifier(".local"));
			assert!(!is_valid_identifier(""));
			assert!(!is_valid_identifier("123label"));
			assert!(!is_valid_identifier("label-name"));
		}

		#[test]
		fn test_normalize_identifier() {
			assert_eq!(normalize_identifier("Label", true), "Label");
			assert_eq!(normalize_identifier("Label", false), "LABEL");
		}

		#[test]
		fn test_parse_string_literal() {
			let pos = test_pos();
			assert_eq!(parse_string_literal("\"hello\"", &pos).unwrap(), "hello");
			assert_eq!(parse_string_literal("\"line\\nbreak\"", &pos).unwrap(), "line\nbreak");
			assert!(parse_string_literal("hello", &pos).is_err());
			assert!(parse_string_literal("\"unterminated", &pos).is_err());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::ast::BinaryOp;

	fn parse(source: &str, target: Target) -> Program {
		let (program, errors) = Parser::new(source, PathBuf::from("t.asm"), target).parse_program();
		assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
		program
	}

	#[test]
	fn parses_label_and_immediate_instruction() {
		let program = parse("start:\n lda #$42\n", Target::Mos6502);
		assert_eq!(program.statements.len(), 2);
		assert!(matches!(&program.statements[0], Statement::Label { name, .. } if name == "start"));
		match &program.statements[1] {
			Statement::Instruction(node) => {
				assert_eq!(node.mnemonic, "lda");
				assert!(matches!(node.operand, OperandSyntax::Immediate(Expression::Number(0x42))));
			}
			other => panic!("expected instruction, got {other:?}"),
		}
	}

	#[test]
	fn parses_indexed_and_indirect_operands() {
		let program = parse("lda $10, x\nlda ($20), y\nlda ($30, x)\n", Target::Mos6502);
		assert!(matches!(
			&program.statements[0],
			Statement::Instruction(n) if matches!(n.operand, OperandSyntax::DirectX(Expression::Number(0x10)))
		));
		assert!(matches!(
			&program.statements[1],
			Statement::Instruction(n) if matches!(n.operand, OperandSyntax::IndirectY(Expression::Number(0x20)))
		));
		assert!(matches!(
			&program.statements[2],
			Statement::Instruction(n) if matches!(n.operand, OperandSyntax::IndirectX(Expression::Number(0x30)))
		));
	}

	#[test]
	fn parses_directives_with_string_expansion() {
		let program = parse("org $8000\ndb \"hi\", 0\n", Target::Mos6502);
		match &program.statements[1] {
			Statement::Directive(node) => match &node.kind {
				DirectiveKind::Byte(exprs) => {
					assert_eq!(exprs, &vec![Expression::Number(b'h' as i64), Expression::Number(b'i' as i64), Expression::Number(0)]);
				}
				other => panic!("expected byte directive, got {other:?}"),
			},
			other => panic!("expected directive, got {other:?}"),
		}
	}

	#[test]
	fn parses_sm83_folded_immediate() {
		let program = parse("ld a, 5\n", Target::Sm83);
		match &program.statements[0] {
			Statement::Instruction(node) => match &node.operand {
				OperandSyntax::VerbatimImmediate { template, value } => {
					assert_eq!(template, &format!("a, {VERBATIM_SLOT}"));
					assert!(matches!(value, Expression::Number(5)));
				}
				other => panic!("expected verbatim-immediate, got {other:?}"),
			},
			other => panic!("expected instruction, got {other:?}"),
		}
	}

	#[test]
	fn parses_sm83_register_to_register_as_verbatim() {
		let program = parse("ld a, b\n", Target::Sm83);
		match &program.statements[0] {
			Statement::Instruction(node) => assert!(matches!(&node.operand, OperandSyntax::Verbatim(t) if t == "a, b")),
			other => panic!("expected instruction, got {other:?}"),
		}
	}

	#[test]
	fn parses_conditional_block() {
		let program = parse("if 1\n lda #1\nelse\n lda #2\nendif\n", Target::Mos6502);
		assert_eq!(program.statements.len(), 1);
		match &program.statements[0] {
			Statement::Conditional(node) => {
				assert_eq!(node.then_branch.len(), 1);
				assert_eq!(node.else_branch.len(), 1);
			}
			other => panic!("expected conditional, got {other:?}"),
		}
	}

	#[test]
	fn parses_macro_definition_and_invocation() {
		let program = parse("macro inc_both(a, b)\n inc a\n inc b\nendmacro\ninc_both(x, y)\n", Target::Mos6502);
		assert_eq!(program.statements.len(), 2);
		match &program.statements[0] {
			Statement::MacroDefinition(node) => {
				assert_eq!(node.name, "inc_both");
				assert_eq!(node.params, vec!["a".to_string(), "b".to_string()]);
				assert_eq!(node.body.len(), 2);
			}
			other => panic!("expected macro definition, got {other:?}"),
		}
		match &program.statements[1] {
			Statement::MacroInvocation(node) => {
				assert_eq!(node.name, "inc_both");
				assert_eq!(node.args.len(), 2);
			}
			other => panic!("expected macro invocation, got {other:?}"),
		}
	}

	#[test]
	fn parses_expression_with_current_address_and_shift() {
		let program = parse("org 0\ndw (1 << 4) + *\n", Target::Mos6502);
		match &program.statements[1] {
			Statement::Directive(node) => match &node.kind {
				DirectiveKind::Word(exprs) => {
					assert!(matches!(&exprs[0], Expression::Binary(BinaryOp::Add, ..)));
				}
				other => panic!("expected word directive, got {other:?}"),
			},
			other => panic!("expected directive, got {other:?}"),
		}
	}
}
