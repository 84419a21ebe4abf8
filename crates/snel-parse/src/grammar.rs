//! Element combinators and the Snel grammar built from them.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::lexer::Lexeme;
use crate::rule::Rule;

/// Shape of a grammar element, reported in CST dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Keyword,
    Token,
    Regex,
    Sequence,
    Choice,
    Repeat,
    List,
    Optional,
    Prio,
    This,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Keyword => "Keyword",
            ElementKind::Token => "Token",
            ElementKind::Regex => "Regex",
            ElementKind::Sequence => "Sequence",
            ElementKind::Choice => "Choice",
            ElementKind::Repeat => "Repeat",
            ElementKind::List => "List",
            ElementKind::Optional => "Optional",
            ElementKind::Prio => "Prio",
            ElementKind::This => "This",
        }
    }
}

#[derive(Debug)]
pub(crate) enum Element {
    Keyword(&'static str),
    Token(&'static str),
    Lexeme(Lexeme),
    Sequence(Vec<Element>),
    /// Most greedy: the longest alternative wins, the earliest on a tie.
    Choice(Vec<Element>),
    Repeat(Box<Element>),
    /// Items separated by `delim`; the delimiters stay in the tree.
    List {
        item: Box<Element>,
        delim: Box<Element>,
        min: usize,
    },
    Optional(Box<Element>),
    /// Ordered alternatives that may refer back to the enclosing rule via `This`.
    Prio(Vec<Element>),
    This,
    Ref(Rule),
}

impl Element {
    pub(crate) fn kind(&self) -> ElementKind {
        match self {
            Element::Keyword(_) => ElementKind::Keyword,
            Element::Token(_) => ElementKind::Token,
            Element::Lexeme(_) => ElementKind::Regex,
            Element::Sequence(_) => ElementKind::Sequence,
            Element::Choice(_) => ElementKind::Choice,
            Element::Repeat(_) => ElementKind::Repeat,
            Element::List { .. } => ElementKind::List,
            Element::Optional(_) => ElementKind::Optional,
            Element::Prio(_) => ElementKind::Prio,
            Element::This => ElementKind::This,
            Element::Ref(_) => ElementKind::Sequence,
        }
    }

    /// Rule id an unnamed composite gets on its CST node.
    pub(crate) fn anonymous_rule(&self) -> Rule {
        match self {
            Element::Choice(_) => Rule::Choice,
            Element::Repeat(_) => Rule::Repeat,
            Element::List { .. } => Rule::List,
            Element::Optional(_) => Rule::Optional,
            Element::This => Rule::This,
            _ => Rule::Sequence,
        }
    }
}

fn r(rule: Rule) -> Element {
    Element::Ref(rule)
}

fn seq<const N: usize>(items: [Element; N]) -> Element {
    Element::Sequence(items.into())
}

fn choice<const N: usize>(items: [Element; N]) -> Element {
    Element::Choice(items.into())
}

fn repeat(item: Element) -> Element {
    Element::Repeat(Box::new(item))
}

fn list(item: Element, delim: Rule, min: usize) -> Element {
    Element::List {
        item: Box::new(item),
        delim: Box::new(r(delim)),
        min,
    }
}

pub(crate) struct Grammar {
    rules: HashMap<Rule, Element>,
}

impl Grammar {
    pub(crate) fn snel() -> &'static Grammar {
        static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
        GRAMMAR.get_or_init(Grammar::build)
    }

    pub(crate) fn definition(&self, rule: Rule) -> Option<&Element> {
        self.rules.get(&rule)
    }

    fn build() -> Grammar {
        use Rule::*;

        let mut rules = HashMap::new();
        let mut def = |rule: Rule, el: Element| {
            rules.insert(rule, el);
        };

        def(Identifier, Element::Lexeme(Lexeme::Identifier));
        def(Int, Element::Lexeme(Lexeme::Int));
        def(Float, Element::Lexeme(Lexeme::Float));
        def(Str, Element::Lexeme(Lexeme::Str));
        def(Char, Element::Lexeme(Lexeme::Char));

        def(KwFn, Element::Keyword("fn"));
        def(KwModule, Element::Keyword("module"));
        def(KwImport, Element::Keyword("import"));
        def(KwFrom, Element::Keyword("from"));

        def(OpenParen, Element::Token("("));
        def(CloseParen, Element::Token(")"));
        def(OpenBrace, Element::Token("{"));
        def(CloseBrace, Element::Token("}"));
        def(SemiColon, Element::Token(";"));
        def(Colon, Element::Token(":"));
        def(Comma, Element::Token(","));
        def(Dot, Element::Token("."));
        def(Equal, Element::Token("="));
        def(Plus, Element::Token("+"));
        def(Minus, Element::Token("-"));
        def(Times, Element::Token("*"));
        def(Slash, Element::Token("/"));
        def(And, Element::Token("&"));
        def(Or, Element::Token("|"));

        def(Name, choice([list(r(Identifier), Dot, 1), r(Identifier)]));
        def(
            BinOp,
            choice([r(Plus), r(Minus), r(Times), r(Slash), r(And), r(Or)]),
        );
        def(
            Expr,
            Element::Prio(vec![
                // value
                choice([r(Name), r(Int), r(Float), r(Str), r(Char)]),
                // (value)
                seq([r(OpenParen), Element::This, r(CloseParen)]),
                // value op value
                seq([Element::This, r(BinOp), Element::This]),
                // (value, value, ...)
                seq([r(OpenParen), list(Element::This, Comma, 0), r(CloseParen)]),
            ]),
        );
        // (arg: type, ...) return_type
        def(
            FnDecl,
            seq([
                r(OpenParen),
                list(seq([r(Identifier), r(Colon), r(Expr)]), Comma, 0),
                r(CloseParen),
                r(Expr),
            ]),
        );
        def(VarDec, seq([r(Identifier), r(Colon), r(Expr)]));
        def(
            VarDef,
            seq([r(Identifier), r(Colon), r(Expr), r(Equal), r(Expr)]),
        );
        def(VarAss, seq([r(Name), r(Equal), r(Expr)]));
        def(
            Scope,
            seq([
                r(OpenBrace),
                repeat(seq([
                    choice([r(Expr), r(VarDec), r(VarDef), r(VarAss)]),
                    r(SemiColon),
                ])),
                Element::Optional(Box::new(r(Expr))),
                r(CloseBrace),
            ]),
        );
        def(FnDef, seq([r(KwFn), r(Identifier), r(FnDecl), r(Scope)]));
        def(
            Module,
            seq([
                r(KwModule),
                r(Identifier),
                r(OpenBrace),
                repeat(r(FnDef)),
                r(CloseBrace),
            ]),
        );
        def(
            Import,
            seq([r(KwImport), r(Identifier), r(KwFrom), r(Str), r(SemiColon)]),
        );
        def(Start, seq([repeat(r(Import)), repeat(r(Module))]));

        Grammar { rules }
    }
}
