//! Uniform `{type, children, value}` view of a lowered tree.
//!
//! Tooling written against the first Snel front end consumes this shape, so
//! child order and payload placement are fixed per node kind.

use serde_json::{json, Map, Value};

use crate::ast::{
    AstKind, AstNode, BinOp, Expr, FnDecl, FnDef, Import, Lit, Module, Name, Scope, SrcFile, Stmt,
};

pub trait ToDict {
    /// With `include_value == false` every `value` key is omitted.
    fn to_dict(&self, include_value: bool) -> Value;
}

fn node(kind: AstKind, children: Vec<Value>, value: Value, include_value: bool) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), Value::String(kind.as_str().into()));
    map.insert("children".into(), Value::Array(children));
    if include_value {
        map.insert("value".into(), value);
    }
    Value::Object(map)
}

impl ToDict for Name {
    fn to_dict(&self, include_value: bool) -> Value {
        node(AstKind::Name, vec![], json!(self.text), include_value)
    }
}

impl ToDict for BinOp {
    fn to_dict(&self, include_value: bool) -> Value {
        node(AstKind::Binop, vec![], json!(self.symbol()), include_value)
    }
}

impl ToDict for Import {
    fn to_dict(&self, include_value: bool) -> Value {
        node(
            AstKind::Import,
            vec![self.name.to_dict(include_value)],
            json!(self.path),
            include_value,
        )
    }
}

impl ToDict for Module {
    fn to_dict(&self, include_value: bool) -> Value {
        let children = self.fns.iter().map(|f| f.to_dict(include_value)).collect();
        node(
            AstKind::Module,
            children,
            self.name.to_dict(include_value),
            include_value,
        )
    }
}

impl ToDict for SrcFile {
    fn to_dict(&self, include_value: bool) -> Value {
        let children = self
            .imports
            .iter()
            .map(|i| i.to_dict(include_value))
            .chain(self.modules.iter().map(|m| m.to_dict(include_value)))
            .collect();
        node(AstKind::SrcFile, children, Value::Null, include_value)
    }
}

impl ToDict for FnDecl {
    fn to_dict(&self, include_value: bool) -> Value {
        let params = self
            .params
            .iter()
            .map(|p| json!([p.name.text, p.ty.to_dict(include_value)]))
            .collect();
        node(
            AstKind::FnDecl,
            vec![self.ret.to_dict(include_value)],
            Value::Array(params),
            include_value,
        )
    }
}

impl ToDict for FnDef {
    fn to_dict(&self, include_value: bool) -> Value {
        node(
            AstKind::FnDef,
            vec![
                self.decl.to_dict(include_value),
                self.body.to_dict(include_value),
            ],
            json!(self.name.text),
            include_value,
        )
    }
}

impl ToDict for Scope {
    fn to_dict(&self, include_value: bool) -> Value {
        // the tail value goes last, after every statement
        let mut children: Vec<Value> = self
            .stmts
            .iter()
            .map(|s| s.to_dict(include_value))
            .collect();
        if let Some(tail) = &self.tail {
            children.push(tail.to_dict(include_value));
        }
        node(AstKind::Scope, children, Value::Null, include_value)
    }
}

impl ToDict for Stmt {
    fn to_dict(&self, include_value: bool) -> Value {
        let children = match self {
            Stmt::Expr(expr) => return expr.to_dict(include_value),
            Stmt::Assign { target, value, .. } => {
                vec![target.to_dict(include_value), value.to_dict(include_value)]
            }
            Stmt::Define {
                name, ty, value, ..
            } => vec![
                name.to_dict(include_value),
                ty.to_dict(include_value),
                value.to_dict(include_value),
            ],
            Stmt::Declare { name, ty, .. } => {
                vec![name.to_dict(include_value), ty.to_dict(include_value)]
            }
        };
        node(self.kind(), children, Value::Null, include_value)
    }
}

impl ToDict for Expr {
    fn to_dict(&self, include_value: bool) -> Value {
        match self {
            Expr::Lit(lit, _) => {
                let value = match lit {
                    Lit::Int(v) => json!(v),
                    Lit::Float(v) => json!(v),
                    Lit::Str(s) => json!(s),
                    Lit::Char(c) => json!(c.to_string()),
                };
                node(self.kind(), vec![], value, include_value)
            }
            Expr::Name(name) => name.to_dict(include_value),
            Expr::Binary { op, lhs, rhs, .. } => node(
                AstKind::BinopExpr,
                vec![
                    op.to_dict(include_value),
                    lhs.to_dict(include_value),
                    rhs.to_dict(include_value),
                ],
                Value::Null,
                include_value,
            ),
        }
    }
}

impl ToDict for AstNode {
    fn to_dict(&self, include_value: bool) -> Value {
        match self {
            AstNode::SrcFile(n) => n.to_dict(include_value),
            AstNode::Import(n) => n.to_dict(include_value),
            AstNode::Module(n) => n.to_dict(include_value),
            AstNode::FnDef(n) => n.to_dict(include_value),
            AstNode::FnDecl(n) => n.to_dict(include_value),
            AstNode::Scope(n) => n.to_dict(include_value),
            AstNode::Stmt(n) => n.to_dict(include_value),
            AstNode::Expr(n) => n.to_dict(include_value),
            AstNode::Name(n) => n.to_dict(include_value),
            AstNode::BinOp(n) => n.to_dict(include_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use pretty_assertions::assert_eq;

    fn sp() -> Span {
        Span::new(0, 0)
    }

    fn name(text: &str) -> Name {
        Name {
            text: text.into(),
            span: sp(),
        }
    }

    #[test]
    fn binop_expr_children_are_op_left_right() {
        let e = Expr::Binary {
            op: BinOp::Sub,
            lhs: Box::new(Expr::Lit(Lit::Int(1), sp())),
            rhs: Box::new(Expr::Name(name("x"))),
            span: sp(),
        };
        assert_eq!(
            e.to_dict(true),
            json!({
                "type": "binop_expr",
                "value": null,
                "children": [
                    {"type": "binop", "children": [], "value": "-"},
                    {"type": "integer", "children": [], "value": 1},
                    {"type": "name", "children": [], "value": "x"},
                ]
            })
        );
    }

    #[test]
    fn without_values_only_type_and_children_remain() {
        let imp = Import {
            name: name("io"),
            path: "std/io".into(),
            span: sp(),
        };
        assert_eq!(
            imp.to_dict(false),
            json!({
                "type": "import",
                "children": [{"type": "name", "children": []}]
            })
        );
    }

    #[test]
    fn scope_tail_is_last_child() {
        let scope = Scope {
            stmts: vec![Stmt::Declare {
                name: name("a"),
                ty: Expr::Name(name("int")),
                span: sp(),
            }],
            tail: Some(Box::new(Expr::Lit(Lit::Char('z'), sp()))),
            span: sp(),
        };
        let dict = scope.to_dict(true);
        let children = dict["children"].as_array().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0]["type"], "var_declaration");
        assert_eq!(children[1], json!({"type": "char", "children": [], "value": "z"}));
    }

    #[test]
    fn module_value_is_its_name_node() {
        let m = Module {
            name: name("app"),
            fns: vec![],
            span: sp(),
        };
        assert_eq!(
            m.to_dict(true)["value"],
            json!({"type": "name", "children": [], "value": "app"})
        );
    }
}
