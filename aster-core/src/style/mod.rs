//! Stylesheet pipeline: fragments are assembled into one intermediate source
//! behind the user's color import, written to a scratch file, then compiled
//! by an external process into the stylesheet the runtime loads.

mod assemble;
mod compile;
mod fragments;

pub use assemble::{assemble, write_scratch};
pub use compile::{
    compile_stylesheet, CompileError, CompileOutput, SassCompiler, StyleCompiler,
};
pub use fragments::{FragmentSet, FragmentSlot};
