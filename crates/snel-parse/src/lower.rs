//! Lowering from the concrete syntax tree to the Snel AST.
//!
//! Every fixed-shape rule checks the rule ids of its children before it
//! reads them. A mismatch means the grammar and this module have drifted.

use snel_ast::ast::{
    AstNode, BinOp, Expr, FnDecl, FnDef, Import, Lit, Module, Name, Param, Scope, SrcFile, Stmt,
};
use snel_ast::span::Span;

use crate::cst::SyntaxNode;
use crate::error::LowerError;
use crate::rule::Rule;

type Result<T> = std::result::Result<T, LowerError>;

/// Lower any node the grammar can produce.
pub fn lower_any<N: SyntaxNode>(node: &N) -> Result<AstNode> {
    match rule_of(node)? {
        Rule::Start => lower_src_file(node).map(AstNode::SrcFile),
        Rule::Import => lower_import(node).map(AstNode::Import),
        Rule::Module => lower_module(node).map(AstNode::Module),
        Rule::FnDef => lower_fn_def(node).map(AstNode::FnDef),
        Rule::FnDecl => lower_fn_decl(node).map(AstNode::FnDecl),
        Rule::Scope => lower_scope(node).map(AstNode::Scope),
        Rule::Expr => lower_expr(node).map(AstNode::Expr),
        Rule::Name => lower_name(node).map(AstNode::Name),
        Rule::BinOp => lower_binop(node).map(AstNode::BinOp),
        Rule::VarDec => lower_var_declaration(node).map(AstNode::Stmt),
        Rule::VarDef => lower_var_definition(node).map(AstNode::Stmt),
        Rule::VarAss => lower_var_assignment(node).map(AstNode::Stmt),
        // only reachable as children of the rules above
        Rule::Identifier
        | Rule::Int
        | Rule::Float
        | Rule::Str
        | Rule::Char
        | Rule::KwFn
        | Rule::KwModule
        | Rule::KwImport
        | Rule::KwFrom
        | Rule::OpenParen
        | Rule::CloseParen
        | Rule::OpenBrace
        | Rule::CloseBrace
        | Rule::SemiColon
        | Rule::Colon
        | Rule::Comma
        | Rule::Dot
        | Rule::Equal
        | Rule::Plus
        | Rule::Minus
        | Rule::Times
        | Rule::Slash
        | Rule::And
        | Rule::Or
        | Rule::Sequence
        | Rule::Choice
        | Rule::Repeat
        | Rule::List
        | Rule::Optional
        | Rule::This => Err(unknown(node)),
    }
}

// ======= helpers =======

fn span<N: SyntaxNode>(node: &N) -> Span {
    Span::new(node.start(), node.end())
}

fn unknown<N: SyntaxNode>(node: &N) -> LowerError {
    LowerError::UnknownNode {
        rule: node.rule_id().to_string(),
        offset: node.start(),
    }
}

fn rule_of<N: SyntaxNode>(node: &N) -> Result<Rule> {
    Rule::from_id(node.rule_id()).ok_or_else(|| unknown(node))
}

fn child_ids<N: SyntaxNode>(node: &N) -> String {
    node.children()
        .iter()
        .map(|c| c.rule_id())
        .collect::<Vec<_>>()
        .join(", ")
}

fn mismatch<N: SyntaxNode>(node: &N, expected: &[Rule]) -> LowerError {
    LowerError::StructuralMismatch {
        rule: node.rule_id().to_string(),
        expected: expected
            .iter()
            .map(|r| r.id())
            .collect::<Vec<_>>()
            .join(", "),
        found: child_ids(node),
        offset: node.start(),
    }
}

fn expect_rule<N: SyntaxNode>(node: &N, rule: Rule) -> Result<()> {
    if node.rule_id() == rule.id() {
        Ok(())
    } else {
        Err(LowerError::StructuralMismatch {
            rule: rule.id().to_string(),
            expected: rule.id().to_string(),
            found: node.rule_id().to_string(),
            offset: node.start(),
        })
    }
}

/// Check that `node` has exactly the children `expected`, in order.
fn shape<'n, N: SyntaxNode, const K: usize>(
    node: &'n N,
    expected: [Rule; K],
) -> Result<[&'n N; K]> {
    let children = node.children();
    let fits = children.len() == K
        && children
            .iter()
            .zip(expected.iter())
            .all(|(c, r)| c.rule_id() == r.id());
    if !fits {
        return Err(mismatch(node, &expected));
    }
    Ok(std::array::from_fn(|i| &children[i]))
}

/// The single child of a choice-like wrapper (`Choice`, `This`, `Prio`).
fn only_child<N: SyntaxNode>(node: &N) -> Result<&N> {
    match node.children() {
        [child] => Ok(child),
        _ => Err(LowerError::StructuralMismatch {
            rule: node.rule_id().to_string(),
            expected: "exactly one child".to_string(),
            found: child_ids(node),
            offset: node.start(),
        }),
    }
}

fn ident<N: SyntaxNode>(node: &N) -> Name {
    Name {
        text: node.text().to_string(),
        span: span(node),
    }
}

// ======= program structure =======

/// `START`: all imports, then all modules.
pub fn lower_src_file<N: SyntaxNode>(node: &N) -> Result<SrcFile> {
    expect_rule(node, Rule::Start)?;
    let [imports, modules] = shape(node, [Rule::Repeat, Rule::Repeat])?;
    Ok(SrcFile {
        imports: imports
            .children()
            .iter()
            .map(lower_import)
            .collect::<Result<_>>()?,
        modules: modules
            .children()
            .iter()
            .map(lower_module)
            .collect::<Result<_>>()?,
        span: span(node),
    })
}

pub fn lower_import<N: SyntaxNode>(node: &N) -> Result<Import> {
    expect_rule(node, Rule::Import)?;
    let [_, name, _, path, _] = shape(
        node,
        [
            Rule::KwImport,
            Rule::Identifier,
            Rule::KwFrom,
            Rule::Str,
            Rule::SemiColon,
        ],
    )?;
    Ok(Import {
        name: ident(name),
        path: string_content(path)?,
        span: span(node),
    })
}

pub fn lower_module<N: SyntaxNode>(node: &N) -> Result<Module> {
    expect_rule(node, Rule::Module)?;
    let [_, name, _, fns, _] = shape(
        node,
        [
            Rule::KwModule,
            Rule::Identifier,
            Rule::OpenBrace,
            Rule::Repeat,
            Rule::CloseBrace,
        ],
    )?;
    Ok(Module {
        name: ident(name),
        fns: fns
            .children()
            .iter()
            .map(lower_fn_def)
            .collect::<Result<_>>()?,
        span: span(node),
    })
}

pub fn lower_fn_def<N: SyntaxNode>(node: &N) -> Result<FnDef> {
    expect_rule(node, Rule::FnDef)?;
    let [_, name, decl, body] = shape(
        node,
        [Rule::KwFn, Rule::Identifier, Rule::FnDecl, Rule::Scope],
    )?;
    Ok(FnDef {
        name: ident(name),
        decl: lower_fn_decl(decl)?,
        body: lower_scope(body)?,
        span: span(node),
    })
}

/// `( name: type, ... ) return_type`
pub fn lower_fn_decl<N: SyntaxNode>(node: &N) -> Result<FnDecl> {
    expect_rule(node, Rule::FnDecl)?;
    let [_, list, _, ret] = shape(
        node,
        [Rule::OpenParen, Rule::List, Rule::CloseParen, Rule::Expr],
    )?;

    let mut params = Vec::new();
    for item in list.children() {
        match rule_of(item)? {
            Rule::Comma => continue,
            Rule::Sequence => {
                let [name, _, ty] = shape(item, [Rule::Identifier, Rule::Colon, Rule::Expr])?;
                params.push(Param {
                    name: ident(name),
                    ty: lower_expr(ty)?,
                    span: span(item),
                });
            }
            _ => return Err(mismatch(list, &[Rule::Sequence, Rule::Comma])),
        }
    }

    Ok(FnDecl {
        params,
        ret: lower_expr(ret)?,
        span: span(node),
    })
}

/// `{ (expr|decl|def|assign) ; ... tail? }`
pub fn lower_scope<N: SyntaxNode>(node: &N) -> Result<Scope> {
    expect_rule(node, Rule::Scope)?;
    let [_, entries, tail, _] = shape(
        node,
        [
            Rule::OpenBrace,
            Rule::Repeat,
            Rule::Optional,
            Rule::CloseBrace,
        ],
    )?;

    let mut stmts = Vec::with_capacity(entries.children().len());
    for entry in entries.children() {
        let [choice, _] = shape(entry, [Rule::Choice, Rule::SemiColon])?;
        let inner = only_child(choice)?;
        let stmt = match rule_of(inner)? {
            Rule::Expr => Stmt::Expr(lower_expr(inner)?),
            Rule::VarDec => lower_var_declaration(inner)?,
            Rule::VarDef => lower_var_definition(inner)?,
            Rule::VarAss => lower_var_assignment(inner)?,
            _ => {
                return Err(mismatch(
                    choice,
                    &[Rule::Expr, Rule::VarDec, Rule::VarDef, Rule::VarAss],
                ))
            }
        };
        stmts.push(stmt);
    }

    let tail = match tail.children() {
        [] => None,
        [value] => Some(Box::new(lower_expr(value)?)),
        _ => return Err(mismatch(tail, &[Rule::Expr])),
    };

    Ok(Scope {
        stmts,
        tail,
        span: span(node),
    })
}

// ======= statements =======

pub fn lower_var_declaration<N: SyntaxNode>(node: &N) -> Result<Stmt> {
    expect_rule(node, Rule::VarDec)?;
    let [name, _, ty] = shape(node, [Rule::Identifier, Rule::Colon, Rule::Expr])?;
    Ok(Stmt::Declare {
        name: ident(name),
        ty: lower_expr(ty)?,
        span: span(node),
    })
}

pub fn lower_var_definition<N: SyntaxNode>(node: &N) -> Result<Stmt> {
    expect_rule(node, Rule::VarDef)?;
    let [name, _, ty, _, value] = shape(
        node,
        [
            Rule::Identifier,
            Rule::Colon,
            Rule::Expr,
            Rule::Equal,
            Rule::Expr,
        ],
    )?;
    Ok(Stmt::Define {
        name: ident(name),
        ty: lower_expr(ty)?,
        value: lower_expr(value)?,
        span: span(node),
    })
}

pub fn lower_var_assignment<N: SyntaxNode>(node: &N) -> Result<Stmt> {
    expect_rule(node, Rule::VarAss)?;
    let [target, _, value] = shape(node, [Rule::Name, Rule::Equal, Rule::Expr])?;
    Ok(Stmt::Assign {
        target: lower_name(target)?,
        value: lower_expr(value)?,
        span: span(node),
    })
}

// ======= expressions =======

/// Resolve which `s_expr` alternative matched, in grammar order:
/// value, `(value)`, `value op value`, `(value, ...)`.
pub fn lower_expr<N: SyntaxNode>(node: &N) -> Result<Expr> {
    expect_rule(node, Rule::Expr)?;
    let alt = only_child(node)?;
    match rule_of(alt)? {
        Rule::Choice => lower_value(only_child(alt)?),
        Rule::Sequence => {
            let Some(first) = alt.children().first() else {
                return Err(mismatch(alt, &[Rule::OpenParen]));
            };
            match rule_of(first)? {
                Rule::OpenParen => match alt.children().get(1).map(rule_of).transpose()? {
                    Some(Rule::This) => {
                        let [_, inner, _] =
                            shape(alt, [Rule::OpenParen, Rule::This, Rule::CloseParen])?;
                        lower_this(inner)
                    }
                    Some(Rule::List) => Err(LowerError::UnsupportedConstruct {
                        construct: "parenthesised expression list",
                        offset: alt.start(),
                    }),
                    _ => Err(mismatch(alt, &[Rule::OpenParen, Rule::This, Rule::CloseParen])),
                },
                Rule::This => {
                    let [lhs, op, rhs] = shape(alt, [Rule::This, Rule::BinOp, Rule::This])?;
                    Ok(Expr::Binary {
                        lhs: Box::new(lower_this(lhs)?),
                        op: lower_binop(op)?,
                        rhs: Box::new(lower_this(rhs)?),
                        span: span(node),
                    })
                }
                _ => Err(mismatch(alt, &[Rule::This, Rule::BinOp, Rule::This])),
            }
        }
        _ => Err(mismatch(node, &[Rule::Choice])),
    }
}

fn lower_this<N: SyntaxNode>(node: &N) -> Result<Expr> {
    expect_rule(node, Rule::This)?;
    lower_expr(only_child(node)?)
}

fn lower_value<N: SyntaxNode>(node: &N) -> Result<Expr> {
    let lit = match rule_of(node)? {
        Rule::Name => return lower_name(node).map(Expr::Name),
        Rule::Int => node
            .text()
            .parse::<i64>()
            .map(Lit::Int)
            .map_err(|e| invalid_literal(node, e.to_string()))?,
        Rule::Float => {
            let v = node
                .text()
                .parse::<f64>()
                .map_err(|e| invalid_literal(node, e.to_string()))?;
            if !v.is_finite() {
                return Err(invalid_literal(node, "out of range"));
            }
            Lit::Float(v)
        }
        Rule::Str => Lit::Str(string_content(node)?),
        Rule::Char => Lit::Char(char_content(node)?),
        _ => {
            return Err(LowerError::StructuralMismatch {
                rule: Rule::Choice.id().to_string(),
                expected: [Rule::Name, Rule::Int, Rule::Float, Rule::Str, Rule::Char]
                    .map(Rule::id)
                    .join(", "),
                found: node.rule_id().to_string(),
                offset: node.start(),
            })
        }
    };
    Ok(Expr::Lit(lit, span(node)))
}

fn invalid_literal<N: SyntaxNode>(node: &N, reason: impl Into<String>) -> LowerError {
    LowerError::InvalidLiteral {
        text: node.text().to_string(),
        offset: node.start(),
        reason: reason.into(),
    }
}

fn string_content<N: SyntaxNode>(node: &N) -> Result<String> {
    node.text()
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .map(str::to_string)
        .ok_or_else(|| invalid_literal(node, "missing double quotes"))
}

fn char_content<N: SyntaxNode>(node: &N) -> Result<char> {
    let inner = node
        .text()
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .ok_or_else(|| invalid_literal(node, "missing single quotes"))?;
    let mut chars = inner.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid_literal(node, "expected exactly one character")),
    }
}

/// `a.b.c` flattens to one name; the `.` delimiters are dropped.
pub fn lower_name<N: SyntaxNode>(node: &N) -> Result<Name> {
    expect_rule(node, Rule::Name)?;
    let inner = only_child(node)?;
    let text = match rule_of(inner)? {
        Rule::Identifier => inner.text().to_string(),
        Rule::List => {
            let mut segments = Vec::new();
            for seg in inner.children() {
                match rule_of(seg)? {
                    Rule::Identifier => segments.push(seg.text()),
                    Rule::Dot => {}
                    _ => return Err(mismatch(inner, &[Rule::Identifier, Rule::Dot])),
                }
            }
            segments.join(".")
        }
        _ => return Err(mismatch(node, &[Rule::List])),
    };
    Ok(Name {
        text,
        span: span(node),
    })
}

pub fn lower_binop<N: SyntaxNode>(node: &N) -> Result<BinOp> {
    expect_rule(node, Rule::BinOp)?;
    let tok = only_child(node)?;
    match rule_of(tok)? {
        Rule::Plus => Ok(BinOp::Add),
        Rule::Minus => Ok(BinOp::Sub),
        Rule::Times => Ok(BinOp::Mul),
        Rule::Slash => Ok(BinOp::Div),
        Rule::And => Ok(BinOp::And),
        Rule::Or => Ok(BinOp::Or),
        _ => Err(mismatch(
            node,
            &[
                Rule::Plus,
                Rule::Minus,
                Rule::Times,
                Rule::Slash,
                Rule::And,
                Rule::Or,
            ],
        )),
    }
}
