use std::fmt;
use std::str::FromStr;

use crate::error::BackendError;
use crate::operand::Operand;

/// The two-operand instructions a [`crate::Function`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op2Kind {
    Mov,
    Add,
    Sub,
    Div,
    Mul,
    Or,
    Xor,
    And,
}

impl Op2Kind {
    pub const ALL: [Op2Kind; 8] = [
        Op2Kind::Mov,
        Op2Kind::Add,
        Op2Kind::Sub,
        Op2Kind::Div,
        Op2Kind::Mul,
        Op2Kind::Or,
        Op2Kind::Xor,
        Op2Kind::And,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Op2Kind::Mov => "mov",
            Op2Kind::Add => "add",
            Op2Kind::Sub => "sub",
            Op2Kind::Div => "div",
            Op2Kind::Mul => "mul",
            Op2Kind::Or => "or",
            Op2Kind::Xor => "xor",
            Op2Kind::And => "and",
        }
    }
}

impl FromStr for Op2Kind {
    type Err = BackendError;

    fn from_str(op: &str) -> Result<Self, Self::Err> {
        Op2Kind::ALL
            .into_iter()
            .find(|k| k.mnemonic() == op)
            .ok_or_else(|| BackendError::InvalidOperation { op: op.to_string() })
    }
}

impl fmt::Display for Op2Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Op2 {
        op: Op2Kind,
        dst: Operand,
        src: Operand,
    },
    Push(Operand),
    Pop(Operand),
    Ret,
    Syscall,
    /// Emitted verbatim.
    Raw(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Op2 { op, dst, src } => write!(f, "{op} {dst}, {src}"),
            Instruction::Push(src) => write!(f, "push {src}"),
            Instruction::Pop(dst) => write!(f, "pop {dst}"),
            Instruction::Ret => f.write_str("ret"),
            Instruction::Syscall => f.write_str("syscall"),
            Instruction::Raw(text) => f.write_str(text),
        }
    }
}

/// One line of a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Instr(Instruction),
    /// Local label, rendered as `.name:`.
    Label(String),
}
