//! Text rendering of a [`crate::Module`], kept apart from its accumulation.

use crate::constant::Constant;
use crate::function::Function;
use crate::instruction::Line;

/// One assembler dialect. Every method returns text without a trailing newline.
pub trait Syntax {
    fn header(&self) -> String;
    fn entry(&self, name: &str) -> String;
    fn code_segment(&self) -> String;
    fn function(&self, f: &Function) -> String;
    fn data_segment(&self) -> String;
    fn constant(&self, c: &Constant) -> String;
}

/// flat assembler, ELF64 executable output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fasm;

impl Syntax for Fasm {
    fn header(&self) -> String {
        "format ELF64 executable".to_string()
    }

    fn entry(&self, name: &str) -> String {
        format!("entry {name}")
    }

    fn code_segment(&self) -> String {
        "segment readable executable".to_string()
    }

    fn function(&self, f: &Function) -> String {
        let mut out = format!("{}:", f.name());
        for line in f.lines() {
            match line {
                Line::Label(name) => out.push_str(&format!("\n.{name}:")),
                Line::Instr(instr) => out.push_str(&format!("\n    {instr}")),
            }
        }
        out
    }

    fn data_segment(&self) -> String {
        "segment readable writable".to_string()
    }

    fn constant(&self, c: &Constant) -> String {
        match c.asm() {
            Some(asm) => format!("{} db {asm}", c.name()),
            // `db` needs at least one value
            None if c.is_empty() => format!("{} rb 0", c.name()),
            None => format!("{} db {}", c.name(), c.db_list()),
        }
    }
}
