use std::fmt;

use crate::ast::{
    AstNode, BinOp, Expr, FnDecl, FnDef, Import, Lit, Module, Name, Scope, SrcFile, Stmt,
};

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {} from \"{}\"", self.name, self.path)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mod {};", self.name)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lit::Int(v) => write!(f, "{v}"),
            Lit::Float(v) => write!(f, "{v:?}"),
            Lit::Str(s) => write!(f, "\"{s}\""),
            Lit::Char(c) => write!(f, "'{c}'"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Lit(lit, _) => write!(f, "{lit}"),
            Expr::Name(name) => write!(f, "{name}"),
            // grouping is printed explicitly, there is no precedence to rely on
            Expr::Binary { op, lhs, rhs, .. } => write!(f, "({lhs} {op} {rhs})"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(expr) => write!(f, "{expr};"),
            Stmt::Assign { target, value, .. } => write!(f, "{target} = {value};"),
            Stmt::Define {
                name, ty, value, ..
            } => write!(f, "{name}: {ty} = {value};"),
            Stmt::Declare { name, ty, .. } => write!(f, "{name}: {ty};"),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.stmts {
            write!(f, " {stmt}")?;
        }
        if let Some(tail) = &self.tail {
            write!(f, " {tail}")?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for FnDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, ") {}", self.ret)
    }
}

impl fmt::Display for FnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}{} {}", self.name, self.decl, self.body)
    }
}

impl fmt::Display for SrcFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for import in &self.imports {
            writeln!(f, "{import};")?;
        }
        for module in &self.modules {
            writeln!(f, "module {} {{", module.name)?;
            for def in &module.fns {
                writeln!(f, "    {def}")?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::SrcFile(n) => n.fmt(f),
            AstNode::Import(n) => n.fmt(f),
            AstNode::Module(n) => n.fmt(f),
            AstNode::FnDef(n) => n.fmt(f),
            AstNode::FnDecl(n) => n.fmt(f),
            AstNode::Scope(n) => n.fmt(f),
            AstNode::Stmt(n) => n.fmt(f),
            AstNode::Expr(n) => n.fmt(f),
            AstNode::Name(n) => n.fmt(f),
            AstNode::BinOp(n) => n.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn name(text: &str) -> Name {
        Name {
            text: text.into(),
            span: Span::new(0, text.len()),
        }
    }

    #[test]
    fn import_and_module_render_like_source() {
        let imp = Import {
            name: name("io"),
            path: "std/io".into(),
            span: Span::new(0, 0),
        };
        assert_eq!(imp.to_string(), "import io from \"std/io\"");

        let m = Module {
            name: name("app.core"),
            fns: vec![],
            span: Span::new(0, 0),
        };
        assert_eq!(m.to_string(), "mod app.core;");
    }

    #[test]
    fn binary_expressions_are_fully_parenthesised() {
        let sp = Span::new(0, 0);
        let e = Expr::Binary {
            op: BinOp::Add,
            lhs: Box::new(Expr::Lit(Lit::Int(1), sp)),
            rhs: Box::new(Expr::Binary {
                op: BinOp::Mul,
                lhs: Box::new(Expr::Name(name("x"))),
                rhs: Box::new(Expr::Lit(Lit::Float(2.5), sp)),
                span: sp,
            }),
            span: sp,
        };
        assert_eq!(e.to_string(), "(1 + (x * 2.5))");
    }
}
