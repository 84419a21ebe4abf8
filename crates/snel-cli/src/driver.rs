//! Compilation stages shared by the `snel` subcommands.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use snel_ast::ast::SrcFile;
use snel_backend::{Constant, Function, Module};

/// Maximum source file size in bytes (1MB)
pub const MAX_SOURCE_SIZE: usize = 1_000_000;

pub fn load_source(path: &Path) -> Result<String> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    if src.len() > MAX_SOURCE_SIZE {
        bail!(
            "source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
    }
    Ok(src)
}

/// Read, parse and lower one source file.
pub fn front_end(path: &Path) -> Result<SrcFile> {
    let src = load_source(path)?;
    let file = snel_parse::parse_str(&path.display().to_string(), &src)?;
    Ok(file)
}

/// The write-then-exit program: prints `message` and a newline, exits 0.
pub fn hello_module(name: &str, message: &str) -> Result<Module> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        bail!("invalid module name '{name}': use letters, digits, '_' or '-'");
    }

    let msg = Constant::new("msg", format!("{message}\n"));
    let mut main = Function::new("main");
    main.op_syscall_write(1, msg.name(), msg.len_placeholder());
    main.op_syscall_exit(0);

    let mut module = Module::new(name);
    module.add_function(main);
    module.add_constant(msg);
    module.set_entry_point("main")?;
    Ok(module)
}

/// SHA-256 hex digest of a string, prefixed with "sha256:".
pub fn sha256_hex(data: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

/// What `snel check` reports about a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub imports: Vec<String>,
    pub modules: Vec<String>,
    pub functions: usize,
}

impl Summary {
    pub fn of(file: &SrcFile) -> Self {
        Self {
            imports: file.imports.iter().map(|i| i.path.clone()).collect(),
            modules: file.modules.iter().map(|m| m.name.text.clone()).collect(),
            functions: file.modules.iter().map(|m| m.fns.len()).sum(),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} import(s), {} module(s), {} function(s)",
            self.imports.len(),
            self.modules.len(),
            self.functions
        )
    }
}
