/// Named bytes in the writable data segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    name: String,
    data: Vec<u8>,
    /// Assembler literal to emit instead of the rendered bytes.
    asm: Option<String>,
}

impl Constant {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            asm: None,
        }
    }

    /// `data` still decides [`Constant::len`]; `asm` only changes the text.
    pub fn with_asm(
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        asm: impl Into<String>,
    ) -> Self {
        Self {
            asm: Some(asm.into()),
            ..Self::new(name, data)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn asm(&self) -> Option<&str> {
        self.asm.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Text substituted with [`Constant::len`] once the module is rendered.
    pub fn len_placeholder(&self) -> String {
        format!("$${}.len$$", self.name)
    }

    /// `db` operand list: printable runs quoted, other bytes as numbers.
    pub fn db_list(&self) -> String {
        let mut items = Vec::new();
        let mut run = String::new();
        for &b in &self.data {
            if (b' '..=b'~').contains(&b) && b != b'"' {
                run.push(b as char);
                continue;
            }
            if !run.is_empty() {
                items.push(format!("\"{run}\""));
                run.clear();
            }
            items.push(b.to_string());
        }
        if !run.is_empty() {
            items.push(format!("\"{run}\""));
        }
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_runs_are_quoted() {
        let c = Constant::new("msg", "Hello, world!\n");
        assert_eq!(c.db_list(), "\"Hello, world!\", 10");
        assert_eq!(c.len(), 14);
    }

    #[test]
    fn quotes_and_control_bytes_are_numbers() {
        let c = Constant::new("q", b"\"a\"\0".to_vec());
        assert_eq!(c.db_list(), "34, \"a\", 34, 0");
    }

    #[test]
    fn asm_override_keeps_the_data_length() {
        let c = Constant::with_asm("msg", "hi", "'hi'");
        assert_eq!(c.asm(), Some("'hi'"));
        assert_eq!(c.len(), 2);
        assert_eq!(c.len_placeholder(), "$$msg.len$$");
    }
}
