#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

//! Symbolic x86-64 program model and its fasm rendering.
//!
//! A [`Module`] is built by sequential `add_*` calls, rendered once with a
//! [`Syntax`], and handed to an [`ExecutableEmitter`] to become a binary.

mod constant;
mod emit;
mod error;
mod function;
mod instruction;
mod module;
mod operand;
mod register;
mod syntax;

pub use constant::Constant;
pub use emit::{Assembler, ExecutableEmitter};
pub use error::BackendError;
pub use function::{Function, SYSCALL_ARGS};
pub use instruction::{Instruction, Line, Op2Kind};
pub use module::{Module, Symbol};
pub use operand::Operand;
pub use register::{is_register, Register, REGISTERS};
pub use syntax::{Fasm, Syntax};

pub type Result<T> = std::result::Result<T, BackendError>;
