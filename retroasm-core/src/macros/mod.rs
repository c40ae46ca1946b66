//! Macro registration for the code generator's external `MacroTable`
//! collaborator.
//!
//! Unlike a text-substitution macro preprocessor, a macro body here is
//! already a parsed, nested [`crate::core::ast::Statement`] tree — the
//! parser builds it once from a `macro ... endmacro` block, and invocation
//! just hands that tree back to the generator to run in place. Parameter
//! names are recorded alongside the body so a future substitution pass (or
//! a smarter parser) can bind them to call-site argument expressions.

use std::collections::HashMap;

use crate::core::interfaces::{MacroBody, MacroTable};

/// A simple name-to-body registry. Redefinition overwrites the previous
/// definition rather than erroring, matching how most one-pass assemblers
/// treat a repeated `macro` block (last one wins).
#[derive(Debug, Default)]
pub struct MacroRegistry {
	macros: HashMap<String, MacroBody>,
}

impl MacroRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn define_macro(&mut self, name: String, body: MacroBody) {
		self.macros.insert(name, body);
	}

	#[must_use]
	pub fn has_macro(&self, name: &str) -> bool {
		self.macros.contains_key(name)
	}

	#[must_use]
	pub fn macro_count(&self) -> usize {
		self.macros.len()
	}

	#[must_use]
	pub fn macro_names(&self) -> Vec<&str> {
		self.macros.keys().map(String::as_str).collect()
	}
}

impl MacroTable for MacroRegistry {
	fn get(&self, name: &str) -> Option<&MacroBody> {
		self.macros.get(name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn register_and_lookup() {
		let mut reg = MacroRegistry::new();
		reg.define_macro("inc_both".to_string(), MacroBody { params: vec!["a".into(), "b".into()], body: vec![] });
		assert!(reg.has_macro("inc_both"));
		assert_eq!(reg.macro_count(), 1);
		assert!(reg.get("inc_both").is_some());
		assert!(reg.get("missing").is_none());
	}

	#[test]
	fn redefinition_overwrites() {
		let mut reg = MacroRegistry::new();
		reg.define_macro("m".to_string(), MacroBody { params: vec![], body: vec![] });
		reg.define_macro("m".to_string(), MacroBody { params: vec!["x".into()], body: vec![] });
		assert_eq!(reg.get("m").unwrap().params, vec!["x".to_string()]);
	}
}
