use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use snel_ast::ToDict;
use snel_backend::{Assembler, ExecutableEmitter};
use snel_cli::driver::{self, Summary};

#[derive(Parser, Debug)]
#[command(name = "snel")]
#[command(about = "Snel: a minimal compiled language targeting fasm")]
struct Cli {
    /// Report each stage on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a source file and dump the AST
    Parse {
        /// Path to .snel source file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Dump the concrete syntax tree as JSON
    Cst {
        /// Path to .snel source file
        file: PathBuf,
    },

    /// Parse and lower a source file, print a summary
    Check {
        /// Path to .snel source file
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the hello-world executable with the assembly backend
    Hello {
        /// Module name, used for `<name>.asm` and the executable
        #[arg(long, default_value = "hello")]
        name: String,

        /// Text to print (a newline is appended)
        #[arg(long, default_value = "Hello, world!")]
        message: String,

        /// Directory for the assembly and the executable
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Assembler program, called with the .asm path
        #[arg(long, env = "SNEL_ASSEMBLER", default_value = "fasm")]
        assembler: String,

        /// Extra assembler argument, placed before the .asm path (repeatable)
        #[arg(long = "assembler-arg", allow_hyphen_values = true)]
        assembler_args: Vec<String>,

        /// Delete the .asm file after a successful build
        #[arg(long)]
        remove_asm: bool,

        /// Write the .asm file without assembling it
        #[arg(long)]
        emit_asm_only: bool,

        /// Print the SHA-256 of the rendered assembly
        #[arg(long)]
        digest: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pretty,
    Json,
    /// `{type, children, value}` nodes
    Dict,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log = Log {
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Parse { file, format } => cmd_parse(&log, &file, format),
        Commands::Cst { file } => cmd_cst(&log, &file),
        Commands::Check { file, json } => cmd_check(&log, &file, json),
        Commands::Hello {
            name,
            message,
            out_dir,
            assembler,
            assembler_args,
            remove_asm,
            emit_asm_only,
            digest,
        } => cmd_hello(
            &log,
            HelloArgs {
                name,
                message,
                out_dir,
                assembler,
                assembler_args,
                remove_asm,
                emit_asm_only,
                digest,
            },
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Stage progress on stderr, only with `--verbose`.
struct Log {
    verbose: bool,
}

impl Log {
    fn step(&self, msg: impl std::fmt::Display) {
        if self.verbose {
            eprintln!("snel: {msg}");
        }
    }
}

fn cmd_parse(log: &Log, file: &Path, format: Format) -> Result<()> {
    let ast = driver::front_end(file)?;
    log.step(format_args!("parsed {}", file.display()));

    match format {
        Format::Pretty => println!("{:#?}", ast),
        Format::Json => println!("{}", serde_json::to_string_pretty(&ast)?),
        Format::Dict => println!("{}", serde_json::to_string_pretty(&ast.to_dict(true))?),
    }
    Ok(())
}

fn cmd_cst(log: &Log, file: &Path) -> Result<()> {
    let src = driver::load_source(file)?;
    let cst = snel_parse::parse_cst(&src).map_err(|e| e.with_file(&file.display().to_string()))?;
    log.step(format_args!("parsed {}", file.display()));
    println!("{}", serde_json::to_string_pretty(&cst.to_json())?);
    Ok(())
}

fn cmd_check(log: &Log, file: &Path, json: bool) -> Result<()> {
    let ast = driver::front_end(file)?;
    log.step(format_args!("lowered {}", file.display()));

    let summary = Summary::of(&ast);
    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("ok: {summary}");
    }
    Ok(())
}

struct HelloArgs {
    name: String,
    message: String,
    out_dir: PathBuf,
    assembler: String,
    assembler_args: Vec<String>,
    remove_asm: bool,
    emit_asm_only: bool,
    digest: bool,
}

fn cmd_hello(log: &Log, args: HelloArgs) -> Result<()> {
    let module = driver::hello_module(&args.name, &args.message)?;

    if args.digest {
        println!("{}", driver::sha256_hex(&module.render()));
    }

    let assembler = args
        .assembler_args
        .iter()
        .fold(Assembler::new(&args.assembler), |a, arg| a.arg(arg));
    let emitter = ExecutableEmitter::new(&args.out_dir)
        .with_assembler(assembler)
        .remove_asm(args.remove_asm);

    if args.emit_asm_only {
        let asm = emitter
            .write_asm(&module)
            .context("could not write assembly")?;
        log.step(format_args!("wrote {}", asm.display()));
        println!("{}", asm.display());
        return Ok(());
    }

    log.step(format_args!(
        "assembling {} with {}",
        emitter.asm_path(&module).display(),
        args.assembler
    ));
    let binary = emitter
        .emit(&module)
        .with_context(|| format!("could not build '{}'", args.name))?;
    log.step(format_args!("wrote {}", binary.display()));
    println!("{}", binary.display());
    Ok(())
}
