//! subc-gen - x86-64 Intel-syntax assembly emission.
//!
//! Walks the typed AST produced by `subc-par` and emits a stack-machine
//! style sequence of instructions targeting the System V AMD64 calling
//! convention. Code generation is infallible here: every failure mode this
//! compiler recognizes (undefined identifiers, bad operand types) is
//! already caught during parsing.

mod asm;

pub use asm::AsmGenerator;
