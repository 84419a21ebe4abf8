//! General purpose registers and their narrower aliases.

/// `[64-bit, low 32, low 16, low 8]` for every general purpose register.
pub const REGISTERS: [[&str; 4]; 16] = [
    ["rax", "eax", "ax", "al"],
    ["rbx", "ebx", "bx", "bl"],
    ["rcx", "ecx", "cx", "cl"],
    ["rdx", "edx", "dx", "dl"],
    ["rsi", "esi", "si", "sil"],
    ["rdi", "edi", "di", "dil"],
    ["rbp", "ebp", "bp", "bpl"],
    ["rsp", "esp", "sp", "spl"],
    ["r8", "r8d", "r8w", "r8b"],
    ["r9", "r9d", "r9w", "r9b"],
    ["r10", "r10d", "r10w", "r10b"],
    ["r11", "r11d", "r11w", "r11b"],
    ["r12", "r12d", "r12w", "r12b"],
    ["r13", "r13d", "r13w", "r13b"],
    ["r14", "r14d", "r14w", "r14b"],
    ["r15", "r15d", "r15w", "r15b"],
];

const WIDTHS: [u8; 4] = [64, 32, 16, 8];

/// Any alias counts: `al` is as much a register as `rax`.
pub fn is_register(name: &str) -> bool {
    Register::lookup(name).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    row: u8,
    col: u8,
}

impl Register {
    pub fn lookup(name: &str) -> Option<Register> {
        REGISTERS.iter().enumerate().find_map(|(row, aliases)| {
            aliases
                .iter()
                .position(|a| *a == name)
                .map(|col| Register {
                    row: row as u8,
                    col: col as u8,
                })
        })
    }

    pub fn name(self) -> &'static str {
        REGISTERS[self.row as usize][self.col as usize]
    }

    /// Width in bits.
    pub fn width(self) -> u8 {
        WIDTHS[self.col as usize]
    }

    /// The 64-bit register this alias belongs to.
    pub fn full(self) -> Register {
        Register {
            row: self.row,
            col: 0,
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_width_alias_is_a_register() {
        for name in ["rax", "eax", "ax", "al"] {
            assert!(is_register(name), "{name}");
        }
        assert!(!is_register("zzz"));
        assert!(!is_register("RAX"));
        assert!(!is_register(""));
    }

    #[test]
    fn aliases_know_their_width_and_parent() {
        let sil = Register::lookup("sil").unwrap();
        assert_eq!(sil.width(), 8);
        assert_eq!(sil.full().name(), "rsi");
        let r10d = Register::lookup("r10d").unwrap();
        assert_eq!((r10d.width(), r10d.full().to_string()), (32, "r10".to_string()));
    }
}
