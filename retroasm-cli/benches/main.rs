use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, Criterion};
use retroasm_core::core::interfaces::SymbolTable;
use retroasm_core::macros::MacroRegistry;
use retroasm_core::parsing::Parser;
use retroasm_core::symbols::DefaultEvaluator;
use retroasm_core::{CodeGenerator, Target};

struct EmptySymbols;
impl SymbolTable for EmptySymbols {
	fn try_lookup(&self, _name: &str) -> Option<i64> {
		None
	}
}

const SOURCE: &str = r"
    .org $8000
    start:
        lda #$01
        sta $00
        inx
        bne start
        rts
";

fn bench_parse_and_generate(c: &mut Criterion) {
	c.bench_function("parse_and_generate_6502", |b| {
		b.iter(|| {
			let (program, _) = Parser::new(SOURCE, PathBuf::from("bench.asm"), Target::Mos6502).parse_program();
			let symbols = EmptySymbols;
			let macros = MacroRegistry::new();
			let mut evaluator = DefaultEvaluator::new(&symbols);
			let result = CodeGenerator::new(Target::Mos6502, &symbols, &macros, &mut evaluator).generate(&program);
			result.segments.flatten()
		});
	});
}

criterion_group!(benches, bench_parse_and_generate);
criterion_main!(benches);
