use crate::register::Register;

/// Instruction operand. Text naming a register becomes [`Operand::Register`],
/// text in canonical integer form becomes [`Operand::Immediate`], anything
/// else is a symbol passed through verbatim (labels, constants, placeholders,
/// `+5`, `007`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Immediate(i64),
    Symbol(String),
}

impl From<Register> for Operand {
    fn from(r: Register) -> Self {
        Operand::Register(r)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Immediate(v)
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Immediate(v.into())
    }
}

impl From<u32> for Operand {
    fn from(v: u32) -> Self {
        Operand::Immediate(v.into())
    }
}

impl From<&str> for Operand {
    fn from(text: &str) -> Self {
        if let Some(r) = Register::lookup(text) {
            return Operand::Register(r);
        }
        match text.parse::<i64>() {
            Ok(v) if v.to_string() == text => Operand::Immediate(v),
            _ => Operand::Symbol(text.to_string()),
        }
    }
}

impl From<String> for Operand {
    fn from(text: String) -> Self {
        match Operand::from(text.as_str()) {
            Operand::Symbol(_) => Operand::Symbol(text),
            other => other,
        }
    }
}

impl From<&String> for Operand {
    fn from(text: &String) -> Self {
        Operand::from(text.as_str())
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register(r) => write!(f, "{r}"),
            Operand::Immediate(v) => write!(f, "{v}"),
            Operand::Symbol(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_classified() {
        assert!(matches!(Operand::from("rdi"), Operand::Register(_)));
        assert_eq!(Operand::from("-3"), Operand::Immediate(-3));
        assert_eq!(
            Operand::from("$$msg.len$$"),
            Operand::Symbol("$$msg.len$$".into())
        );
        assert_eq!(Operand::from(String::from("msg")).to_string(), "msg");
    }

    #[test]
    fn non_canonical_numbers_render_as_written() {
        for text in ["+5", "007", "-0"] {
            assert_eq!(Operand::from(text), Operand::Symbol(text.into()));
            assert_eq!(Operand::from(text).to_string(), text);
        }
        assert_eq!(Operand::from("0"), Operand::Immediate(0));
    }
}
