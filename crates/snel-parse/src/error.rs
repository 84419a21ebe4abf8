use thiserror::Error;

/// Characters of source shown on each side of a syntax error.
const CONTEXT_RADIUS: usize = 20;

/// The source does not match the grammar. Nothing is lowered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub file: Option<String>,
    /// Byte offset of the first position the grammar could not match.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub message: String,
    /// Source window around `offset`, second line marked `<- here`.
    pub context: String,
}

impl SyntaxError {
    pub(crate) fn at(src: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = floor_boundary(src, offset.min(src.len()));
        let before = &src[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        Self {
            file: None,
            offset,
            line,
            column,
            message: message.into(),
            context: context_window(src, offset),
        }
    }

    pub fn with_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:", file)?;
        }
        write!(
            f,
            "{}:{}: syntax error: {}\n{}",
            self.line, self.column, self.message, self.context
        )
    }
}

impl std::error::Error for SyntaxError {}

fn floor_boundary(src: &str, mut i: usize) -> usize {
    while !src.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_boundary(src: &str, mut i: usize) -> usize {
    while !src.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn context_window(src: &str, offset: usize) -> String {
    let lo = floor_boundary(src, offset.saturating_sub(CONTEXT_RADIUS));
    let hi = ceil_boundary(src, (offset + CONTEXT_RADIUS).min(src.len()));
    format!("{}\n{} <- here", &src[lo..hi], &src[lo..offset])
}

/// The CST does not have the shape the lowering engine expects.
///
/// `StructuralMismatch` and `UnknownNode` mean the grammar and the lowering
/// engine disagree; a valid parse from the bundled grammar never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    #[error("structural mismatch in {rule} at offset {offset}: expected [{expected}], found [{found}]")]
    StructuralMismatch {
        rule: String,
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("no lowering for CST rule '{rule}' at offset {offset}")]
    UnknownNode { rule: String, offset: usize },
    #[error("{construct} is not supported (offset {offset})")]
    UnsupportedConstruct {
        construct: &'static str,
        offset: usize,
    },
    #[error("invalid literal '{text}' at offset {offset}: {reason}")]
    InvalidLiteral {
        text: String,
        offset: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Lower(#[from] LowerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_one_based() {
        let src = "module m {\n  fn ?";
        let err = SyntaxError::at(src, src.len() - 1, "expected identifier");
        assert_eq!((err.line, err.column), (2, 6));
    }

    #[test]
    fn context_marks_the_failure_point() {
        let src = "import io from \"std/io\" oops";
        let err = SyntaxError::at(src, 24, "expected `;`");
        let mut lines = err.context.lines();
        assert_eq!(lines.next(), Some("rt io from \"std/io\" oops"));
        assert_eq!(lines.next(), Some("rt io from \"std/io\"  <- here"));
    }

    #[test]
    fn file_name_prefixes_the_message() {
        let err = SyntaxError::at("x", 0, "boom").with_file("main.snel");
        assert!(err.to_string().starts_with("main.snel:1:1: syntax error: boom"));
    }
}
