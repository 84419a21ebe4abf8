use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid operation '{op}' (expected one of mov, add, sub, div, mul, or, xor, and)")]
    InvalidOperation { op: String },

    #[error("syscall takes at most 6 arguments, got {given}")]
    SyscallArity { given: usize },

    #[error("'{name}' is a constant and cannot be the entry point")]
    InvalidEntryPoint { name: String },

    #[error("unknown symbol '{name}'")]
    UnknownSymbol { name: String },

    #[error("assembler `{program}` failed with {status}; assembly kept at {}", .asm_path.display())]
    AssemblerFailure {
        program: String,
        status: ExitStatus,
        asm_path: PathBuf,
    },

    #[error("assembler `{program}` could not be started")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("assembler reported success but {} does not exist", .path.display())]
    MissingArtifact { path: PathBuf },

    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
