//! Rule identifiers carried by concrete syntax tree nodes.

/// Every identifier the Snel grammar can put on a CST node.
///
/// Named grammar rules and terminals use the grammar's own names
/// (`s_expr`, `r_identifier`, `t_open_paren`, ...). Unnamed composite
/// elements are identified by their element kind (`Sequence`, `List`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    // lexemes
    Identifier,
    Int,
    Float,
    Str,
    Char,
    // keywords
    KwFn,
    KwModule,
    KwImport,
    KwFrom,
    // punctuation
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    SemiColon,
    Colon,
    Comma,
    Dot,
    Equal,
    Plus,
    Minus,
    Times,
    Slash,
    And,
    Or,
    // named rules
    Name,
    BinOp,
    Expr,
    FnDecl,
    VarDec,
    VarDef,
    VarAss,
    Scope,
    FnDef,
    Module,
    Import,
    Start,
    // anonymous composites
    Sequence,
    Choice,
    Repeat,
    List,
    Optional,
    This,
}

impl Rule {
    pub const ALL: [Rule; 42] = [
        Rule::Identifier,
        Rule::Int,
        Rule::Float,
        Rule::Str,
        Rule::Char,
        Rule::KwFn,
        Rule::KwModule,
        Rule::KwImport,
        Rule::KwFrom,
        Rule::OpenParen,
        Rule::CloseParen,
        Rule::OpenBrace,
        Rule::CloseBrace,
        Rule::SemiColon,
        Rule::Colon,
        Rule::Comma,
        Rule::Dot,
        Rule::Equal,
        Rule::Plus,
        Rule::Minus,
        Rule::Times,
        Rule::Slash,
        Rule::And,
        Rule::Or,
        Rule::Name,
        Rule::BinOp,
        Rule::Expr,
        Rule::FnDecl,
        Rule::VarDec,
        Rule::VarDef,
        Rule::VarAss,
        Rule::Scope,
        Rule::FnDef,
        Rule::Module,
        Rule::Import,
        Rule::Start,
        Rule::Sequence,
        Rule::Choice,
        Rule::Repeat,
        Rule::List,
        Rule::Optional,
        Rule::This,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Rule::Identifier => "r_identifier",
            Rule::Int => "r_int",
            Rule::Float => "r_float",
            Rule::Str => "r_string",
            Rule::Char => "r_char",
            Rule::KwFn => "k_fn",
            Rule::KwModule => "k_module",
            Rule::KwImport => "k_import",
            Rule::KwFrom => "k_from",
            Rule::OpenParen => "t_open_paren",
            Rule::CloseParen => "t_close_paren",
            Rule::OpenBrace => "t_open_brace",
            Rule::CloseBrace => "t_close_brace",
            Rule::SemiColon => "t_semi_colon",
            Rule::Colon => "t_colon",
            Rule::Comma => "t_comma",
            Rule::Dot => "t_dot",
            Rule::Equal => "t_equal",
            Rule::Plus => "t_plus",
            Rule::Minus => "t_minus",
            Rule::Times => "t_times",
            Rule::Slash => "t_slash",
            Rule::And => "t_and",
            Rule::Or => "t_or",
            Rule::Name => "s_name",
            Rule::BinOp => "s_binop",
            Rule::Expr => "s_expr",
            Rule::FnDecl => "s_fndecl",
            Rule::VarDec => "s_vardec",
            Rule::VarDef => "s_vardef",
            Rule::VarAss => "s_varass",
            Rule::Scope => "s_scope",
            Rule::FnDef => "s_fndef",
            Rule::Module => "s_module",
            Rule::Import => "s_import",
            Rule::Start => "START",
            Rule::Sequence => "Sequence",
            Rule::Choice => "Choice",
            Rule::Repeat => "Repeat",
            Rule::List => "List",
            Rule::Optional => "Optional",
            Rule::This => "This",
        }
    }

    pub fn from_id(id: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|r| r.id() == id)
    }

    /// True for rules the grammar names explicitly (terminals included).
    pub fn is_named(self) -> bool {
        !matches!(
            self,
            Rule::Sequence | Rule::Choice | Rule::Repeat | Rule::List | Rule::Optional | Rule::This
        )
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_and_are_unique() {
        for rule in Rule::ALL {
            assert_eq!(Rule::from_id(rule.id()), Some(rule));
        }
        let mut ids: Vec<_> = Rule::ALL.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Rule::ALL.len());
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert_eq!(Rule::from_id("s_while"), None);
        assert_eq!(Rule::from_id(""), None);
    }
}
