//! Writing a module to disk and running the external assembler on it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::BackendError;
use crate::module::Module;
use crate::Result;

/// External assembler command. The `.asm` path is appended as the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembler {
    pub program: String,
    pub args: Vec<String>,
}

impl Assembler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Assembler::new("fasm")
    }
}

/// Turns a [`Module`] into `<out_dir>/<name>.asm` and `<out_dir>/<name>`.
#[derive(Debug, Clone)]
pub struct ExecutableEmitter {
    assembler: Assembler,
    out_dir: PathBuf,
    remove_asm: bool,
}

impl ExecutableEmitter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            assembler: Assembler::default(),
            out_dir: out_dir.into(),
            remove_asm: false,
        }
    }

    pub fn with_assembler(mut self, assembler: Assembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Delete the `.asm` file after a successful assembly.
    pub fn remove_asm(mut self, yes: bool) -> Self {
        self.remove_asm = yes;
        self
    }

    pub fn asm_path(&self, module: &Module) -> PathBuf {
        self.out_dir.join(format!("{}.asm", module.name()))
    }

    pub fn binary_path(&self, module: &Module) -> PathBuf {
        self.out_dir.join(module.name())
    }

    /// Render `module` and write it to [`ExecutableEmitter::asm_path`].
    pub fn write_asm(&self, module: &Module) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir).map_err(|source| BackendError::Io {
            action: "creating output directory",
            path: self.out_dir.clone(),
            source,
        })?;
        let asm_path = self.asm_path(module);
        fs::write(&asm_path, module.render()).map_err(|source| BackendError::Io {
            action: "writing",
            path: asm_path.clone(),
            source,
        })?;
        Ok(asm_path)
    }

    /// Write the assembly, assemble it and mark the result executable.
    /// Blocks until the assembler exits. Returns the executable's path.
    pub fn emit(&self, module: &Module) -> Result<PathBuf> {
        let asm_path = self.write_asm(module)?;

        let status = Command::new(&self.assembler.program)
            .args(&self.assembler.args)
            .arg(&asm_path)
            .status()
            .map_err(|source| BackendError::Spawn {
                program: self.assembler.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(BackendError::AssemblerFailure {
                program: self.assembler.program.clone(),
                status,
                asm_path,
            });
        }

        let binary = self.binary_path(module);
        if !binary.is_file() {
            return Err(BackendError::MissingArtifact { path: binary });
        }
        set_executable(&binary)?;

        if self.remove_asm {
            fs::remove_file(&asm_path).map_err(|source| BackendError::Io {
                action: "removing",
                path: asm_path,
                source,
            })?;
        }
        Ok(binary)
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let io_err = |source| BackendError::Io {
        action: "setting permissions on",
        path: path.to_path_buf(),
        source,
    };
    let mut perms = fs::metadata(path).map_err(io_err)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms).map_err(io_err)
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
