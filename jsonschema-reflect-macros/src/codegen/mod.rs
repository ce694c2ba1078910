//! Rust code generation module.
//!
//! Emits the `Reflect` impl for a parsed [`ReflectIR`](crate::ir::ReflectIR).

pub mod impl_block;

pub use impl_block::ImplBlockGenerator;
