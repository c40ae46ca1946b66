//! End-to-end integration tests: source text through the parser and code
//! generator to a flattened image.

use std::collections::HashMap;
use std::path::PathBuf;

use retroasm_core::core::interfaces::{MacroTable, SymbolTable};
use retroasm_core::macros::MacroRegistry;
use retroasm_core::parsing::Parser;
use retroasm_core::symbols::DefaultEvaluator;
use retroasm_core::{CodeGenerator, Target};

struct ConstTable(HashMap<&'static str, i64>);

impl SymbolTable for ConstTable {
	fn try_lookup(&self, name: &str) -> Option<i64> {
		self.0.get(name).copied()
	}
}

fn assemble(source: &str, target: Target, symbols: &dyn SymbolTable, macros: &dyn MacroTable) -> (Vec<u8>, usize) {
	let (program, parse_errors) = Parser::new(source, PathBuf::from("test.asm"), target).parse_program();
	assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");

	let mut evaluator = DefaultEvaluator::new(symbols);
	let result = CodeGenerator::new(target, symbols, macros, &mut evaluator).generate(&program);
	let image = result.segments.flatten();
	(image.data, result.errors.len())
}

#[test]
fn assembles_simple_6502_program() {
	let source = r"
        .org $8000
        start:
            lda #$01
            sta $00
            rts
    ";
	let symbols = ConstTable(HashMap::new());
	let macros = MacroRegistry::new();
	let (bytes, error_count) = assemble(source, Target::Mos6502, &symbols, &macros);

	assert_eq!(error_count, 0);
	assert_eq!(bytes, vec![0xA9, 0x01, 0x85, 0x00, 0x60]);
}

#[test]
fn narrows_absolute_to_zero_page_when_value_fits() {
	let source = r"
        .org $8000
        lda $00EE
    ";
	let symbols = ConstTable(HashMap::new());
	let macros = MacroRegistry::new();
	let (bytes, error_count) = assemble(source, Target::Mos6502, &symbols, &macros);

	assert_eq!(error_count, 0);
	assert_eq!(bytes, vec![0xA5, 0xEE]);
}

#[test]
fn reports_invalid_addressing_mode_without_aborting() {
	let source = r"
        .org $8000
        sei
        jmp #$01
        cld
    ";
	let symbols = ConstTable(HashMap::new());
	let macros = MacroRegistry::new();
	let (bytes, error_count) = assemble(source, Target::Mos6502, &symbols, &macros);

	assert_eq!(error_count, 1);
	assert_eq!(bytes[0], 0x78);
	assert_eq!(*bytes.last().unwrap(), 0xD8);
}

#[test]
fn resolves_predefined_symbols_in_expressions() {
	let source = r"
        .org $8000
        lda #BASE_OFFSET
    ";
	let symbols = ConstTable(HashMap::from([("BASE_OFFSET", 0x10)]));
	let macros = MacroRegistry::new();
	let (bytes, error_count) = assemble(source, Target::Mos6502, &symbols, &macros);

	assert_eq!(error_count, 0);
	assert_eq!(bytes, vec![0xA9, 0x10]);
}

#[test]
fn assembles_sm83_folded_mnemonics() {
	let source = r"
        .org $0150
        ld a, $01
        ld (hl), a
        ret
    ";
	let symbols = ConstTable(HashMap::new());
	let macros = MacroRegistry::new();
	let (bytes, error_count) = assemble(source, Target::Sm83, &symbols, &macros);

	assert_eq!(error_count, 0);
	assert_eq!(bytes, vec![0x3E, 0x01, 0x77, 0xC9]);
}
