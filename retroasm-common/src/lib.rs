#![deny(clippy::mem_forget)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate tracing;

#[macro_use]
mod macros;

pub mod cst;
pub mod env;
pub mod mem;
