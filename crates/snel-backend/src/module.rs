use crate::constant::Constant;
use crate::error::BackendError;
use crate::function::Function;
use crate::syntax::{Fasm, Syntax};
use crate::Result;

/// What a name in a [`Module`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol<'m> {
    Function(&'m Function),
    Constant(&'m Constant),
}

/// One compilation unit: functions, constants and an optional entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    name: String,
    functions: Vec<Function>,
    constants: Vec<Constant>,
    /// Index into `functions`.
    entry: Option<usize>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn add_function(&mut self, f: Function) {
        self.functions.push(f);
    }

    pub fn add_constant(&mut self, c: Constant) {
        self.constants.push(c);
    }

    /// Functions are searched before constants; the first match wins.
    pub fn find_symbol(&self, name: &str) -> Result<Symbol<'_>> {
        if let Some(f) = self.functions.iter().find(|f| f.name() == name) {
            return Ok(Symbol::Function(f));
        }
        if let Some(c) = self.constants.iter().find(|c| c.name() == name) {
            return Ok(Symbol::Constant(c));
        }
        Err(BackendError::UnknownSymbol {
            name: name.to_string(),
        })
    }

    pub fn set_entry_point(&mut self, name: &str) -> Result<()> {
        match self.find_symbol(name)? {
            Symbol::Function(_) => {
                self.entry = self.functions.iter().position(|f| f.name() == name);
                Ok(())
            }
            Symbol::Constant(_) => Err(BackendError::InvalidEntryPoint {
                name: name.to_string(),
            }),
        }
    }

    pub fn entry_point(&self) -> Option<&Function> {
        self.entry.and_then(|i| self.functions.get(i))
    }

    /// Render as fasm source.
    pub fn render(&self) -> String {
        self.render_with(&Fasm)
    }

    pub fn render_with(&self, syntax: &dyn Syntax) -> String {
        let mut out = String::new();
        let mut line = |text: String| {
            out.push_str(&text);
            out.push('\n');
        };

        line(syntax.header());
        if let Some(entry) = self.entry_point() {
            line(syntax.entry(entry.name()));
        }
        line(syntax.code_segment());
        for f in &self.functions {
            line(syntax.function(f));
        }
        line(syntax.data_segment());
        for c in &self.constants {
            line(syntax.constant(c));
        }

        // constants may refer to their own length before it is known
        for c in &self.constants {
            out = out.replace(&c.len_placeholder(), &c.len().to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Module {
        let mut m = Module::new("hello");
        m.add_function(Function::new("main"));
        m.add_constant(Constant::new("msg", "hi"));
        m
    }

    #[test]
    fn functions_shadow_constants() {
        let mut m = sample();
        m.add_constant(Constant::new("main", "x"));
        assert!(matches!(m.find_symbol("main"), Ok(Symbol::Function(_))));
        assert!(matches!(m.find_symbol("msg"), Ok(Symbol::Constant(_))));
    }

    #[test]
    fn entry_point_must_be_a_function() {
        let mut m = sample();
        let err = m.set_entry_point("msg").unwrap_err();
        assert!(matches!(err, BackendError::InvalidEntryPoint { ref name } if name == "msg"));
        let err = m.set_entry_point("nope").unwrap_err();
        assert!(matches!(err, BackendError::UnknownSymbol { .. }));
        assert!(m.entry_point().is_none());

        m.set_entry_point("main").unwrap();
        assert_eq!(m.entry_point().map(Function::name), Some("main"));
    }

    #[test]
    fn no_entry_directive_without_entry_point() {
        let text = sample().render();
        assert!(!text.contains("entry"), "{text}");
        assert!(text.starts_with("format ELF64 executable\nsegment readable executable\n"));
    }
}
