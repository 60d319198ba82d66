//! JavaScript syntax builders for controller modules.
//!
//! Each builder implements [`Renderable`](rewire_codegen::builder::Renderable)
//! and is written out through a [`CodeFile`](crate::CodeFile).

mod export;
mod function;
mod require;

pub use export::Export;
pub use function::Function;
pub use require::Require;
