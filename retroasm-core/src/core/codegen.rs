//! The code generator: walks a [`Program`]'s statements and emits bytes
//! into a [`SegmentList`], accumulating [`CodeError`]s rather than
//! aborting on the first one.

use crate::core::ast::{
	BinaryOp, ConditionalNode, DirectiveKind, DirectiveNode, EnumerationBlockNode, Expression,
	InstructionNode, MacroDefinitionNode, MacroInvocationNode, OperandSyntax, Program, RepeatNode,
	Statement, UnaryOp,
};
use crate::core::interfaces::{CodeError, Evaluator, MacroBody, MacroTable, SymbolTable};
use crate::core::segment::SegmentList;
use crate::error::SourcePos;
use crate::instructions::{AddressingMode, SizeSuffix, Target};

/// Placeholder the parser writes into a [`OperandSyntax::VerbatimImmediate`]
/// template in place of its one free expression slot; substituted for the
/// catalog's own `n`/`nn`/`e` placeholder token once the matching addressing
/// mode (and therefore operand width) is known.
pub const VERBATIM_SLOT: &str = "\u{1}";

/// Generates code for one [`Program`] against a given [`Target`], using
/// caller-supplied symbol table, macro table and evaluator. Fields are
/// mutable across the whole walk since instructions publish the current
/// address to the evaluator before evaluating their own operand (so `*`
/// inside an operand resolves to that instruction's own address).
pub struct CodeGenerator<'a> {
	target: Target,
	segments: SegmentList,
	errors: Vec<CodeError>,
	current_address: u32,
	symbols: &'a dyn SymbolTable,
	macros: &'a dyn MacroTable,
	evaluator: &'a mut dyn Evaluator,
}

/// What a successful generation pass produced.
pub struct GenerationResult {
	pub segments: SegmentList,
	pub errors: Vec<CodeError>,
}

impl<'a> CodeGenerator<'a> {
	pub fn new(
		target: Target,
		symbols: &'a dyn SymbolTable,
		macros: &'a dyn MacroTable,
		evaluator: &'a mut dyn Evaluator,
	) -> Self {
		Self {
			target,
			segments: SegmentList::new(),
			errors: Vec::new(),
			current_address: 0,
			symbols,
			macros,
			evaluator,
		}
	}

	#[must_use]
	pub fn generate(mut self, program: &Program) -> GenerationResult {
		self.run_statements(&program.statements);
		GenerationResult { segments: self.segments, errors: self.errors }
	}

	fn run_statements(&mut self, statements: &[Statement]) {
		for statement in statements {
			self.run_statement(statement);
		}
	}

	fn run_statement(&mut self, statement: &Statement) {
		match statement {
			Statement::Label { .. } => {
				// Labels are resolved into the symbol table by whatever
				// built this program; code generation itself does not
				// assign addresses to labels.
			}
			Statement::Instruction(node) => self.run_instruction(node),
			Statement::Directive(node) => self.run_directive(node),
			Statement::Conditional(node) => self.run_conditional(node),
			Statement::Repeat(node) => self.run_repeat(node),
			Statement::MacroInvocation(node) => self.run_macro_invocation(node),
			Statement::MacroDefinition(node) => self.run_macro_definition(node),
			Statement::EnumerationBlock(node) => self.run_enumeration_block(node),
		}
	}

	fn eval(&mut self, expr: &Expression, pos: &SourcePos) -> Option<i64> {
		match self.evaluator.evaluate(expr, pos) {
			Ok(v) => Some(v),
			Err(e) => {
				self.errors.push(e);
				None
			}
		}
	}

	// --- §4.2: instruction emission ---
	fn run_instruction(&mut self, node: &InstructionNode) {
		self.segments.ensure_segment_at(self.current_address);

		self.evaluator.set_current_address(self.current_address);

		let catalog = self.target.cached_catalog();

		// Folded-mnemonic targets (SM83, Z80, M68000, ARM7TDMI, SPC700,
		// V30MZ) bake any `.b`/`.w`/`.l` size marker into the catalog key
		// itself (`"move.l #imm, d0"`) rather than treating it as a
		// generic operand-width override, so the two `Verbatim*` branches
		// look the mnemonic up unstripped.
		let verbatim_mnemonic = node.mnemonic.to_ascii_lowercase();

		if let OperandSyntax::Verbatim(text) = &node.operand {
			let key = format!("{verbatim_mnemonic} {text}").trim().to_string();
			let key = if text.is_empty() { verbatim_mnemonic.clone() } else { key };
			match catalog.lookup(&key, AddressingMode::Implied).or_else(|| {
				[AddressingMode::Bit, AddressingMode::Restart]
					.iter()
					.find_map(|mode| catalog.lookup(&key, *mode))
			}) {
				Some(entry) => {
					self.segments.current_mut().extend(&entry.opcode);
					self.current_address += entry.opcode.len() as u32;
				}
				None => self.errors.push(CodeError::UnknownMnemonic {
					pos: node.pos.clone(),
					mnemonic: node.mnemonic.clone(),
				}),
			}
			return;
		}

		if let OperandSyntax::VerbatimImmediate { template, value } = &node.operand {
			// Every placeholder word any supported catalog folds into a key
			// in place of a free operand, paired with the addressing mode
			// that placeholder denotes for that family. Lookup simply tries
			// each against this target's own catalog; a mismatched family
			// never has an entry under that key, so there's no cross-talk.
			let candidates = [
				("n", AddressingMode::Immediate8),
				("nn", AddressingMode::Immediate16),
				("nn", AddressingMode::Extended),
				("e", AddressingMode::RelativeSigned),
				("imm", AddressingMode::Immediate),
				("dp", AddressingMode::ZeroPage),
				("abs", AddressingMode::Absolute),
				("imm8", AddressingMode::ImmediateByte),
				("imm16", AddressingMode::ImmediateWord),
				("rel8", AddressingMode::RelativeShort),
				("rel16", AddressingMode::RelativeNear),
				("imm", AddressingMode::ImmediateM68k),
				("imm", AddressingMode::QuickImmediate),
				("imm", AddressingMode::DataProcessingImmediate),
				("imm", AddressingMode::SoftwareInterrupt),
				("abs", AddressingMode::AbsLong),
				// ARM's `b`/`bl` catalog keys carry no placeholder word at
				// all (the whole mnemonic plus a bare label is the key);
				// an empty substitution reproduces that. The 24-bit
				// word-aligned PC-relative encoding itself isn't computed
				// here (see the `is_branch` note below) — this only gets
				// the lookup to succeed.
				("", AddressingMode::BranchOffset),
			];
			let found = candidates.iter().find_map(|(placeholder, mode)| {
				let key = format!("{verbatim_mnemonic} {}", template.replace(VERBATIM_SLOT, placeholder)).trim().to_string();
				catalog.lookup(&key, *mode).map(|entry| (entry, *mode))
			});
			let Some((entry, mode)) = found else {
				self.errors.push(CodeError::UnknownMnemonic {
					pos: node.pos.clone(),
					mnemonic: node.mnemonic.clone(),
				});
				return;
			};
			let entry = entry.clone();
			self.segments.current_mut().extend(&entry.opcode);
			self.current_address += entry.opcode.len() as u32;

			let Some(operand_value) = self.eval(value, &node.pos) else { return };

			// ARM's `BranchOffset` is deliberately excluded here: its 24-bit
			// word-aligned, divided-by-4 encoding isn't the simple signed
			// single-byte displacement this branch computes, and the
			// catalog's representative `b`/`bl` entries aren't reached
			// through this slot-substitution path in practice (both take
			// a bare label with no literal prefix, so they match
			// `OperandSyntax::Verbatim` with the label folded into
			// `text`, never `VerbatimImmediate`).
			let is_branch = matches!(
				mode,
				AddressingMode::RelativeSigned | AddressingMode::RelativeShort | AddressingMode::RelativeNear
			);
			if is_branch {
				let displacement =
					operand_value - i64::from(self.current_address) - i64::from(entry.operand_size);
				if displacement < i64::from(i8::MIN) || displacement > i64::from(i8::MAX) {
					self.errors.push(CodeError::BranchOutOfRange { pos: node.pos.clone(), offset: displacement });
					return;
				}
				#[allow(clippy::cast_possible_truncation)]
				let byte = displacement as i8 as u8;
				self.segments.current_mut().push(byte);
				self.current_address += 1;
			} else {
				let width = usize::from(entry.operand_size);
				let bytes = (operand_value as i128 as u128).to_le_bytes();
				for byte in bytes.iter().take(width) {
					self.segments.current_mut().push(*byte);
				}
				self.current_address += width as u32;
			}
			return;
		}

		// Only the 6502-family/65816/HuC6280 catalogs key on a bare
		// mnemonic plus a real `AddressingMode`, so a `.b`/`.w`/`.l` suffix
		// here is a generic operand-width override rather than part of the
		// catalog key — safe to strip only once the folded-key targets
		// above have already returned.
		let (base_mnemonic, suffix) = strip_size_suffix(&node.mnemonic);

		let (mode, operand_expr) = match classify_mode(&node.operand) {
			Some(v) => v,
			None => {
				self.errors.push(CodeError::InvalidAddressingMode {
					pos: node.pos.clone(),
					mnemonic: node.mnemonic.clone(),
				});
				return;
			}
		};

		let operand_value = match &operand_expr {
			Some(e) => self.eval(e, &node.pos),
			None => Some(0),
		};
		let Some(operand_value) = operand_value else { return };

		let narrowed = narrow_mode(self.target, mode, operand_value);

		let entry = catalog
			.lookup(&base_mnemonic, narrowed)
			.or_else(|| catalog.lookup(&base_mnemonic, mode));

		let Some(entry) = entry else {
			self.errors.push(CodeError::InvalidAddressingMode {
				pos: node.pos.clone(),
				mnemonic: node.mnemonic.clone(),
			});
			return;
		};
		let entry = entry.clone();

		self.segments.current_mut().extend(&entry.opcode);
		self.current_address += entry.opcode.len() as u32;

		if entry.is_branch {
			let displacement = operand_value - i64::from(self.current_address) - i64::from(entry.operand_size);
			if displacement < i64::from(i8::MIN) || displacement > i64::from(i8::MAX) {
				self.errors.push(CodeError::BranchOutOfRange { pos: node.pos.clone(), offset: displacement });
				return;
			}
			#[allow(clippy::cast_possible_truncation)]
			let byte = displacement as i8 as u8;
			self.segments.current_mut().push(byte);
			self.current_address += 1;
		} else {
			let width = suffix.map_or(usize::from(entry.operand_size), |s| {
				s.width_bytes(self.target == Target::Wdc65816)
			});
			let bytes = (operand_value as i128 as u128).to_le_bytes();
			for byte in bytes.iter().take(width) {
				self.segments.current_mut().push(*byte);
			}
			self.current_address += width as u32;
		}
	}

	// --- §4.2: directives ---
	fn run_directive(&mut self, node: &DirectiveNode) {
		match &node.kind {
			DirectiveKind::Org(expr) => {
				if let Some(addr) = self.eval(expr, &node.pos) {
					#[allow(clippy::cast_sign_loss)]
					let addr = addr as u32;
					self.current_address = addr;
					self.segments.ensure_segment_at(addr);
				}
			}
			DirectiveKind::Byte(exprs) => {
				self.segments.ensure_segment_at(self.current_address);
				for expr in exprs {
					if let Some(v) = self.eval(expr, &node.pos) {
						self.segments.current_mut().push((v & 0xFF) as u8);
						self.current_address += 1;
					}
				}
			}
			DirectiveKind::Word(exprs) => {
				self.segments.ensure_segment_at(self.current_address);
				for expr in exprs {
					if let Some(v) = self.eval(expr, &node.pos) {
						let v = v & 0xFFFF;
						self.segments.current_mut().extend(&(v as u16).to_le_bytes());
						self.current_address += 2;
					}
				}
			}
			DirectiveKind::Long(exprs) => {
				self.segments.ensure_segment_at(self.current_address);
				let width: u32 = if self.target == Target::Wdc65816 { 3 } else { 4 };
				for expr in exprs {
					if let Some(v) = self.eval(expr, &node.pos) {
						let v = (v & 0xFFFF_FFFF) as u32;
						let bytes = v.to_le_bytes();
						self.segments.current_mut().extend(&bytes[..width as usize]);
						self.current_address += width;
					}
				}
			}
			DirectiveKind::Ds(count_expr, fill_expr) => {
				self.segments.ensure_segment_at(self.current_address);
				let Some(count) = self.eval(count_expr, &node.pos) else { return };
				if count < 0 {
					self.errors.push(CodeError::NegativeRepeat { pos: node.pos.clone(), count });
					return;
				}
				let fill = match fill_expr {
					Some(e) => match self.eval(e, &node.pos) {
						Some(v) => (v & 0xFF) as u8,
						None => return,
					},
					None => 0,
				};
				#[allow(clippy::cast_sign_loss)]
				for _ in 0..count as u64 {
					self.segments.current_mut().push(fill);
				}
				self.current_address += count as u32;
			}
			DirectiveKind::Incbin(path, offset_expr, length_expr) => {
				self.segments.ensure_segment_at(self.current_address);
				match std::fs::read(path) {
					Ok(bytes) => {
						let offset = match offset_expr.as_ref().map(|e| self.eval(e, &node.pos)) {
							Some(Some(v)) => v.max(0) as usize,
							Some(None) => return,
							None => 0,
						};
						if offset >= bytes.len() {
							self.errors.push(CodeError::IncbinFailure {
								pos: node.pos.clone(),
								path: path.clone(),
								message: format!("offset {offset} out of range for {}-byte file", bytes.len()),
							});
							return;
						}
						let available = bytes.len() - offset;
						let length = match length_expr.as_ref().map(|e| self.eval(e, &node.pos)) {
							Some(Some(v)) => v.max(0) as usize,
							Some(None) => return,
							None => available,
						};
						if offset + length > bytes.len() {
							self.errors.push(CodeError::IncbinFailure {
								pos: node.pos.clone(),
								path: path.clone(),
								message: format!(
									"offset {offset} + length {length} exceeds {}-byte file",
									bytes.len()
								),
							});
							return;
						}
						let slice = &bytes[offset..offset + length];
						self.segments.current_mut().extend(slice);
						self.current_address += slice.len() as u32;
					}
					Err(e) => self.errors.push(CodeError::IncbinFailure {
						pos: node.pos.clone(),
						path: path.clone(),
						message: e.to_string(),
					}),
				}
			}
			DirectiveKind::Align(align_expr, fill_expr) => {
				let Some(alignment) = self.eval(align_expr, &node.pos) else { return };
				if alignment <= 0 || (alignment & (alignment - 1)) != 0 {
					self.errors.push(CodeError::InvalidAlignment { pos: node.pos.clone(), alignment });
					return;
				}
				#[allow(clippy::cast_sign_loss)]
				let alignment = alignment as u32;
				let remainder = self.current_address % alignment;
				let pad_len = if remainder == 0 { 0 } else { alignment - remainder };
				self.pad_with(pad_len, fill_expr, &node.pos);
			}
			DirectiveKind::Pad(target_expr, fill_expr) => {
				let Some(target) = self.eval(target_expr, &node.pos) else { return };
				#[allow(clippy::cast_sign_loss)]
				let target = target as u32;
				if target < self.current_address {
					self.errors.push(CodeError::PadBackwards {
						pos: node.pos.clone(),
						current: self.current_address,
						target,
					});
					return;
				}
				self.pad_with(target - self.current_address, fill_expr, &node.pos);
			}
		}
	}

	fn pad_with(&mut self, count: u32, fill_expr: &Option<Expression>, pos: &SourcePos) {
		self.segments.ensure_segment_at(self.current_address);
		let fill = match fill_expr {
			Some(e) => match self.eval(e, pos) {
				Some(v) => (v & 0xFF) as u8,
				None => return,
			},
			None => 0,
		};
		for _ in 0..count {
			self.segments.current_mut().push(fill);
		}
		self.current_address += count;
	}

	fn run_conditional(&mut self, node: &ConditionalNode) {
		match self.evaluator.evaluate_condition(&node.condition, &node.pos) {
			Ok(true) => self.run_statements(&node.then_branch),
			Ok(false) => self.run_statements(&node.else_branch),
			Err(e) => self.errors.push(e),
		}
	}

	fn run_repeat(&mut self, node: &RepeatNode) {
		let Some(count) = self.eval(&node.count, &node.pos) else { return };
		if count < 0 {
			self.errors.push(CodeError::NegativeRepeat { pos: node.pos.clone(), count });
			return;
		}
		for _ in 0..count {
			self.run_statements(&node.body);
		}
	}

	fn run_macro_invocation(&mut self, node: &MacroInvocationNode) {
		let Some(MacroBody { params, body }) = self.macros.get(&node.name) else {
			self.errors.push(CodeError::MacroExpansion {
				pos: node.pos.clone(),
				message: format!("macro `{}` is not defined", node.name),
			});
			return;
		};
		if params.len() != node.args.len() {
			self.errors.push(CodeError::MacroExpansion {
				pos: node.pos.clone(),
				message: format!(
					"macro `{}` takes {} argument(s), {} given",
					node.name,
					params.len(),
					node.args.len()
				),
			});
			return;
		}
		let bindings: Vec<(String, Expression)> =
			params.iter().cloned().zip(node.args.iter().cloned()).collect();
		let body = substitute_statements(body, &bindings);
		self.run_statements(&body);
	}

	fn run_macro_definition(&mut self, _node: &MacroDefinitionNode) {
		// Registration into the MacroTable happens before generation starts
		// (the table is external); nothing to emit here.
	}

	fn run_enumeration_block(&mut self, node: &EnumerationBlockNode) {
		// No bytes are emitted; label addresses for the enumeration's
		// entries are assigned by whoever owns the symbol table, using the
		// same base-plus-running-offset arithmetic this loop performs, so
		// this is a structural no-op from the generator's point of view.
		let _ = (&node.base, &node.entries);
	}
}

/// Strip a trailing `.b`/`.w`/`.l` size suffix from a mnemonic (§4.2 step
/// 2), returning the bare mnemonic and the suffix if one was present.
fn strip_size_suffix(mnemonic: &str) -> (String, Option<SizeSuffix>) {
	if let Some((base, suffix)) = mnemonic.rsplit_once('.') {
		if suffix.len() == 1 {
			if let Some(s) = SizeSuffix::from_letter(suffix.chars().next().unwrap()) {
				return (base.to_string(), Some(s));
			}
		}
	}
	(mnemonic.to_string(), None)
}

/// Map source-level operand syntax onto a default (un-narrowed)
/// addressing mode, plus the expression (if any) whose value the mode
/// narrowing and operand emission need.
fn classify_mode(operand: &OperandSyntax) -> Option<(AddressingMode, Option<Expression>)> {
	use OperandSyntax as S;
	Some(match operand {
		S::None => (AddressingMode::Implied, None),
		S::Immediate(e) => (AddressingMode::Immediate, Some(e.clone())),
		S::Direct(e) => (AddressingMode::Absolute, Some(e.clone())),
		S::DirectX(e) => (AddressingMode::AbsoluteX, Some(e.clone())),
		S::DirectY(e) => (AddressingMode::AbsoluteY, Some(e.clone())),
		S::Indirect(e) => (AddressingMode::Indirect, Some(e.clone())),
		S::IndirectX(e) => (AddressingMode::IndexedIndirect, Some(e.clone())),
		S::IndirectY(e) => (AddressingMode::IndirectIndexed, Some(e.clone())),
		S::IndirectLong(e) => (AddressingMode::DirectPageIndirectLong, Some(e.clone())),
		S::IndirectLongY(e) => (AddressingMode::DirectPageIndirectLongY, Some(e.clone())),
		S::StackRelative(e) => (AddressingMode::StackRelative, Some(e.clone())),
		S::StackRelativeIndirectY(e) => (AddressingMode::StackRelativeIndirectIndexed, Some(e.clone())),
		S::Pair(_, _) | S::Verbatim(_) | S::VerbatimImmediate { .. } => return None,
	})
}

/// §4.1's mode-narrowing tie-break: substitute the zero/direct-page form
/// when the operand value fits in a byte, for every family that performs
/// narrowing, except that 65816's `Immediate` is never narrowed (its width
/// depends on the `m`/`x` flags, not the operand value).
fn narrow_mode(target: Target, mode: AddressingMode, value: i64) -> AddressingMode {
	if !target.narrows_absolute_to_zero_page() {
		return mode;
	}
	if mode == AddressingMode::Immediate && target.excludes_immediate_from_narrowing() {
		return mode;
	}
	if (0..=0xFF).contains(&value) {
		if let Some(narrowed) = mode.narrowed_zero_page_form() {
			return narrowed;
		}
	}
	mode
}

/// Replace every `Expression::Symbol` matching a macro parameter name with
/// its bound argument expression, recursively through a macro body's
/// statement tree. Symbols that aren't parameter names (ordinary labels and
/// constants the macro body references) pass through untouched.
fn substitute_statements(statements: &[Statement], bindings: &[(String, Expression)]) -> Vec<Statement> {
	statements.iter().map(|s| substitute_statement(s, bindings)).collect()
}

fn substitute_statement(statement: &Statement, bindings: &[(String, Expression)]) -> Statement {
	match statement {
		Statement::Label { .. } => statement.clone(),
		Statement::Instruction(node) => Statement::Instruction(InstructionNode {
			mnemonic: node.mnemonic.clone(),
			operand: substitute_operand(&node.operand, bindings),
			pos: node.pos.clone(),
		}),
		Statement::Directive(node) => Statement::Directive(DirectiveNode {
			kind: substitute_directive(&node.kind, bindings),
			pos: node.pos.clone(),
		}),
		Statement::Conditional(node) => Statement::Conditional(ConditionalNode {
			condition: substitute_expr(&node.condition, bindings),
			then_branch: substitute_statements(&node.then_branch, bindings),
			else_branch: substitute_statements(&node.else_branch, bindings),
			pos: node.pos.clone(),
		}),
		Statement::Repeat(node) => Statement::Repeat(RepeatNode {
			count: substitute_expr(&node.count, bindings),
			body: substitute_statements(&node.body, bindings),
			pos: node.pos.clone(),
		}),
		Statement::MacroInvocation(node) => Statement::MacroInvocation(MacroInvocationNode {
			name: node.name.clone(),
			args: node.args.iter().map(|e| substitute_expr(e, bindings)).collect(),
			pos: node.pos.clone(),
		}),
		// Nested macro definitions and enumeration blocks don't carry
		// expressions a parameter substitution would touch in a way code
		// generation inspects, so they pass through unchanged.
		Statement::MacroDefinition(_) | Statement::EnumerationBlock(_) => statement.clone(),
	}
}

fn substitute_operand(operand: &OperandSyntax, bindings: &[(String, Expression)]) -> OperandSyntax {
	use OperandSyntax as S;
	let e = |expr: &Expression| substitute_expr(expr, bindings);
	match operand {
		S::None => S::None,
		S::Immediate(x) => S::Immediate(e(x)),
		S::Direct(x) => S::Direct(e(x)),
		S::DirectX(x) => S::DirectX(e(x)),
		S::DirectY(x) => S::DirectY(e(x)),
		S::Indirect(x) => S::Indirect(e(x)),
		S::IndirectX(x) => S::IndirectX(e(x)),
		S::IndirectY(x) => S::IndirectY(e(x)),
		S::IndirectLong(x) => S::IndirectLong(e(x)),
		S::IndirectLongY(x) => S::IndirectLongY(e(x)),
		S::StackRelative(x) => S::StackRelative(e(x)),
		S::StackRelativeIndirectY(x) => S::StackRelativeIndirectY(e(x)),
		S::Pair(a, b) => S::Pair(e(a), e(b)),
		S::Verbatim(text) => S::Verbatim(text.clone()),
		S::VerbatimImmediate { template, value } => {
			S::VerbatimImmediate { template: template.clone(), value: e(value) }
		}
	}
}

fn substitute_directive(kind: &DirectiveKind, bindings: &[(String, Expression)]) -> DirectiveKind {
	let e = |expr: &Expression| substitute_expr(expr, bindings);
	let e_opt = |expr: &Option<Expression>| expr.as_ref().map(&e);
	let e_vec = |exprs: &[Expression]| exprs.iter().map(&e).collect();
	match kind {
		DirectiveKind::Org(x) => DirectiveKind::Org(e(x)),
		DirectiveKind::Byte(xs) => DirectiveKind::Byte(e_vec(xs)),
		DirectiveKind::Word(xs) => DirectiveKind::Word(e_vec(xs)),
		DirectiveKind::Long(xs) => DirectiveKind::Long(e_vec(xs)),
		DirectiveKind::Ds(count, fill) => DirectiveKind::Ds(e(count), e_opt(fill)),
		DirectiveKind::Incbin(path, offset, length) => {
			DirectiveKind::Incbin(path.clone(), e_opt(offset), e_opt(length))
		}
		DirectiveKind::Align(align, fill) => DirectiveKind::Align(e(align), e_opt(fill)),
		DirectiveKind::Pad(target, fill) => DirectiveKind::Pad(e(target), e_opt(fill)),
	}
}

fn substitute_expr(expr: &Expression, bindings: &[(String, Expression)]) -> Expression {
	match expr {
		Expression::Symbol(name) => bindings
			.iter()
			.find(|(param, _)| param == name)
			.map_or_else(|| expr.clone(), |(_, bound)| bound.clone()),
		Expression::Number(_) | Expression::CurrentAddress => expr.clone(),
		Expression::Unary(op, inner) => Expression::Unary(*op, Box::new(substitute_expr(inner, bindings))),
		Expression::Binary(op, lhs, rhs) => Expression::Binary(
			*op,
			Box::new(substitute_expr(lhs, bindings)),
			Box::new(substitute_expr(rhs, bindings)),
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::collections::HashMap;
	use std::path::PathBuf;

	struct FixedEvaluator {
		values: HashMap<String, i64>,
		current_address: RefCell<u32>,
	}

	impl Evaluator for FixedEvaluator {
		fn evaluate(&self, expr: &Expression, pos: &SourcePos) -> Result<i64, CodeError> {
			match expr {
				Expression::Number(n) => Ok(*n),
				Expression::CurrentAddress => Ok(i64::from(*self.current_address.borrow())),
				Expression::Symbol(name) => self.values.get(name).copied().ok_or_else(|| {
					CodeError::UnresolvedExpression { pos: pos.clone(), message: name.clone() }
				}),
				Expression::Unary(op, inner) => {
					let v = self.evaluate(inner, pos)?;
					Ok(match op {
						UnaryOp::Neg => -v,
						UnaryOp::Not => i64::from(v == 0),
						UnaryOp::BitNot => !v,
						UnaryOp::LowByte => v & 0xFF,
						UnaryOp::HighByte => (v >> 8) & 0xFF,
						UnaryOp::BankByte => (v >> 16) & 0xFF,
					})
				}
				Expression::Binary(op, lhs, rhs) => {
					let l = self.evaluate(lhs, pos)?;
					let r = self.evaluate(rhs, pos)?;
					Ok(match op {
						BinaryOp::Add => l + r,
						BinaryOp::Sub => l - r,
						BinaryOp::Mul => l * r,
						BinaryOp::Div => l / r,
						BinaryOp::Mod => l % r,
						BinaryOp::And => l & r,
						BinaryOp::Or => l | r,
						BinaryOp::Xor => l ^ r,
						BinaryOp::Shl => l << r,
						BinaryOp::Shr => l >> r,
					})
				}
			}
		}

		fn evaluate_condition(&self, expr: &Expression, pos: &SourcePos) -> Result<bool, CodeError> {
			Ok(self.evaluate(expr, pos)? != 0)
		}

		fn set_current_address(&mut self, address: u32) {
			*self.current_address.borrow_mut() = address;
		}
	}

	struct EmptySymbols;
	impl SymbolTable for EmptySymbols {
		fn try_lookup(&self, _name: &str) -> Option<i64> {
			None
		}
	}

	struct EmptyMacros;
	impl MacroTable for EmptyMacros {
		fn get(&self, _name: &str) -> Option<&MacroBody> {
			None
		}
	}

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("t.asm"), 1, 1)
	}

	fn instr(mnemonic: &str, operand: OperandSyntax) -> Statement {
		Statement::Instruction(InstructionNode { mnemonic: mnemonic.into(), operand, pos: pos() })
	}

	#[test]
	fn lda_immediate_emits_two_bytes() {
		let symbols = EmptySymbols;
		let macros = EmptyMacros;
		let mut evaluator = FixedEvaluator { values: HashMap::new(), current_address: RefCell::new(0) };
		let program = Program::new(vec![
			Statement::Directive(DirectiveNode { kind: DirectiveKind::Org(Expression::Number(0x8000)), pos: pos() }),
			instr("lda", OperandSyntax::Immediate(Expression::Number(0x42))),
		]);
		let gen = CodeGenerator::new(Target::Mos6502, &symbols, &macros, &mut evaluator);
		let result = gen.generate(&program);
		assert!(result.errors.is_empty());
		let img = result.segments.flatten();
		assert_eq!(img.start, 0x8000);
		assert_eq!(img.data, vec![0xA9, 0x42]);
	}

	#[test]
	fn absolute_operand_narrows_to_zero_page() {
		let symbols = EmptySymbols;
		let macros = EmptyMacros;
		let mut evaluator = FixedEvaluator { values: HashMap::new(), current_address: RefCell::new(0) };
		let program = Program::new(vec![
			Statement::Directive(DirectiveNode { kind: DirectiveKind::Org(Expression::Number(0)), pos: pos() }),
			instr("lda", OperandSyntax::Direct(Expression::Number(0x10))),
		]);
		let gen = CodeGenerator::new(Target::Mos6502, &symbols, &macros, &mut evaluator);
		let result = gen.generate(&program);
		assert!(result.errors.is_empty());
		assert_eq!(result.segments.flatten().data, vec![0xA5, 0x10]);
	}

	#[test]
	fn wdc65816_immediate_is_not_narrowed() {
		let symbols = EmptySymbols;
		let macros = EmptyMacros;
		let mut evaluator = FixedEvaluator { values: HashMap::new(), current_address: RefCell::new(0) };
		let program = Program::new(vec![
			Statement::Directive(DirectiveNode { kind: DirectiveKind::Org(Expression::Number(0)), pos: pos() }),
			instr("lda", OperandSyntax::Immediate(Expression::Number(0x10))),
		]);
		let gen = CodeGenerator::new(Target::Wdc65816, &symbols, &macros, &mut evaluator);
		let result = gen.generate(&program);
		assert!(result.errors.is_empty());
		// Still the Immediate opcode (0xA9, 1-byte operand table entry),
		// never substituted for a zero-page opcode.
		assert_eq!(result.segments.flatten().data[0], 0xA9);
	}

	#[test]
	fn branch_out_of_range_is_reported() {
		let symbols = EmptySymbols;
		let macros = EmptyMacros;
		let mut evaluator = FixedEvaluator { values: HashMap::new(), current_address: RefCell::new(0) };
		let program = Program::new(vec![
			Statement::Directive(DirectiveNode { kind: DirectiveKind::Org(Expression::Number(0)), pos: pos() }),
			instr("beq", OperandSyntax::Direct(Expression::Number(1000))),
		]);
		let gen = CodeGenerator::new(Target::Mos6502, &symbols, &macros, &mut evaluator);
		let result = gen.generate(&program);
		assert!(matches!(result.errors.first(), Some(CodeError::BranchOutOfRange { .. })));
	}

	#[test]
	fn ds_directive_fills_and_advances() {
		let symbols = EmptySymbols;
		let macros = EmptyMacros;
		let mut evaluator = FixedEvaluator { values: HashMap::new(), current_address: RefCell::new(0) };
		let program = Program::new(vec![
			Statement::Directive(DirectiveNode { kind: DirectiveKind::Org(Expression::Number(0)), pos: pos() }),
			Statement::Directive(DirectiveNode {
				kind: DirectiveKind::Ds(Expression::Number(4), Some(Expression::Number(0xEA))),
				pos: pos(),
			}),
		]);
		let gen = CodeGenerator::new(Target::Mos6502, &symbols, &macros, &mut evaluator);
		let result = gen.generate(&program);
		assert!(result.errors.is_empty());
		assert_eq!(result.segments.flatten().data, vec![0xEA; 4]);
	}

	#[test]
	fn pad_backwards_is_reported() {
		let symbols = EmptySymbols;
		let macros = EmptyMacros;
		let mut evaluator = FixedEvaluator { values: HashMap::new(), current_address: RefCell::new(0) };
		let program = Program::new(vec![
			Statement::Directive(DirectiveNode { kind: DirectiveKind::Org(Expression::Number(0x10)), pos: pos() }),
			Statement::Directive(DirectiveNode { kind: DirectiveKind::Pad(Expression::Number(4), None), pos: pos() }),
		]);
		let gen = CodeGenerator::new(Target::Mos6502, &symbols, &macros, &mut evaluator);
		let result = gen.generate(&program);
		assert!(matches!(result.errors.first(), Some(CodeError::PadBackwards { .. })));
	}
}
