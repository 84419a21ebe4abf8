use crate::error::BackendError;
use crate::instruction::{Instruction, Line, Op2Kind};
use crate::operand::Operand;
use crate::register::Register;
use crate::Result;

/// Linux x86-64 syscall argument registers, in order.
pub const SYSCALL_ARGS: [&str; 6] = ["rdi", "rsi", "rdx", "r10", "r8", "r9"];

const SYS_WRITE: i64 = 1;
const SYS_EXIT: i64 = 60;

/// A named label followed by an ordered list of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    name: String,
    lines: Vec<Line>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn push(&mut self, instr: Instruction) {
        self.lines.push(Line::Instr(instr));
    }

    /// Append one instruction verbatim.
    pub fn add_code(&mut self, text: impl Into<String>) {
        self.push(Instruction::Raw(text.into()));
    }

    pub fn add_label(&mut self, name: impl Into<String>) {
        self.lines.push(Line::Label(name.into()));
    }

    /// Two-operand instruction from its mnemonic. Only the mnemonics of
    /// [`Op2Kind`] are accepted.
    pub fn op_2(
        &mut self,
        op: &str,
        dst: impl Into<Operand>,
        src: impl Into<Operand>,
    ) -> Result<()> {
        let op: Op2Kind = op.parse()?;
        self.op2(op, dst, src);
        Ok(())
    }

    pub fn op2(&mut self, op: Op2Kind, dst: impl Into<Operand>, src: impl Into<Operand>) {
        self.push(Instruction::Op2 {
            op,
            dst: dst.into(),
            src: src.into(),
        });
    }

    pub fn op_mov(&mut self, dst: impl Into<Operand>, src: impl Into<Operand>) {
        self.op2(Op2Kind::Mov, dst, src);
    }

    pub fn op_ret(&mut self) {
        self.push(Instruction::Ret);
    }

    pub fn op_push(&mut self, src: impl Into<Operand>) {
        self.push(Instruction::Push(src.into()));
    }

    pub fn op_pop(&mut self, dst: impl Into<Operand>) {
        self.push(Instruction::Pop(dst.into()));
    }

    /// `rax` gets `nr`, the arguments go to [`SYSCALL_ARGS`] in order, then
    /// `syscall`. Nothing is appended when there are more than six arguments.
    pub fn op_syscall<I>(&mut self, nr: i64, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let args: Vec<Operand> = args.into_iter().map(Into::into).collect();
        if args.len() > SYSCALL_ARGS.len() {
            return Err(BackendError::SyscallArity { given: args.len() });
        }
        self.load_syscall(nr, args);
        Ok(())
    }

    /// `write(fd, buf, len)`
    pub fn op_syscall_write(
        &mut self,
        fd: impl Into<Operand>,
        buf: impl Into<Operand>,
        len: impl Into<Operand>,
    ) {
        self.load_syscall(SYS_WRITE, vec![fd.into(), buf.into(), len.into()]);
    }

    /// `exit(code)`
    pub fn op_syscall_exit(&mut self, code: impl Into<Operand>) {
        self.load_syscall(SYS_EXIT, vec![code.into()]);
    }

    fn load_syscall(&mut self, nr: i64, args: Vec<Operand>) {
        self.op_mov(reg("rax"), nr);
        for (dst, arg) in SYSCALL_ARGS.iter().zip(args) {
            self.op_mov(reg(dst), arg);
        }
        self.push(Instruction::Syscall);
    }
}

fn reg(name: &str) -> Operand {
    match Register::lookup(name) {
        Some(r) => Operand::Register(r),
        None => Operand::Symbol(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(f: &Function) -> Vec<String> {
        f.lines()
            .iter()
            .map(|l| match l {
                Line::Instr(i) => i.to_string(),
                Line::Label(name) => format!(".{name}:"),
            })
            .collect()
    }

    #[test]
    fn op_2_accepts_the_allow_list_only() {
        let mut f = Function::new("main");
        f.op_2("mov", "rax", "1").unwrap();
        assert_eq!(rendered(&f), ["mov rax, 1"]);

        let err = f.op_2("jmp", "rax", "1").unwrap_err();
        assert!(matches!(err, BackendError::InvalidOperation { .. }));
        assert_eq!(f.lines().len(), 1);
    }

    #[test]
    fn operand_text_is_emitted_as_written() {
        let mut f = Function::new("main");
        f.op_mov("rax", "+5");
        f.op_mov("rdi", "007");
        assert_eq!(rendered(&f), ["mov rax, +5", "mov rdi, 007"]);
    }

    #[test]
    fn syscall_loads_registers_in_convention_order() {
        let mut f = Function::new("main");
        f.op_syscall(9, [0, 4096, 3, 34, -1, 0]).unwrap();
        assert_eq!(
            rendered(&f),
            [
                "mov rax, 9",
                "mov rdi, 0",
                "mov rsi, 4096",
                "mov rdx, 3",
                "mov r10, 34",
                "mov r8, -1",
                "mov r9, 0",
                "syscall",
            ]
        );
    }

    #[test]
    fn seventh_syscall_argument_is_rejected() {
        let mut f = Function::new("main");
        let err = f.op_syscall(1, [1, 2, 3, 4, 5, 6, 7]).unwrap_err();
        assert!(matches!(err, BackendError::SyscallArity { given: 7 }));
        assert!(f.lines().is_empty());
    }

    #[test]
    fn write_and_exit_helpers() {
        let mut f = Function::new("main");
        f.op_syscall_write(1, "msg", "$$msg.len$$");
        f.add_label("done");
        f.op_syscall_exit(0);
        assert_eq!(
            rendered(&f),
            [
                "mov rax, 1",
                "mov rdi, 1",
                "mov rsi, msg",
                "mov rdx, $$msg.len$$",
                "syscall",
                ".done:",
                "mov rax, 60",
                "mov rdi, 0",
                "syscall",
            ]
        );
    }

    #[test]
    fn stack_and_raw_lines() {
        let mut f = Function::new("helper");
        f.op_push("rbp");
        f.add_code("nop");
        f.op_pop("rbp");
        f.op_ret();
        assert_eq!(rendered(&f), ["push rbp", "nop", "pop rbp", "ret"]);
    }
}
