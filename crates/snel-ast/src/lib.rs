pub mod span {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub start: u32,
        pub end: u32,
    }

    impl Span {
        /// Offsets past `u32::MAX` saturate.
        pub fn new(start: usize, end: usize) -> Self {
            Span {
                start: u32::try_from(start).unwrap_or(u32::MAX),
                end: u32::try_from(end).unwrap_or(u32::MAX),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        #[cfg(target_pointer_width = "64")]
        fn offsets_past_u32_saturate() {
            assert_eq!(Span::new(3, 9), Span { start: 3, end: 9 });
            let far = u32::MAX as usize + 10;
            assert_eq!(
                Span::new(7, far),
                Span {
                    start: 7,
                    end: u32::MAX
                }
            );
            assert_eq!(Span::new(far, far).start, u32::MAX);
        }
    }
}

pub mod ast {
    use super::span::Span;
    use serde::Serialize;

    /// The closed set of node tags a lowered tree can contain.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AstKind {
        Import,
        Name,
        Module,
        SrcFile,
        FnDecl,
        Integer,
        String,
        Float,
        Char,
        Binop,
        FnDef,
        BinopExpr,
        Scope,
        VarAssignment,
        VarDefinition,
        VarDeclaration,
    }

    impl AstKind {
        pub const ALL: [AstKind; 16] = [
            AstKind::Import,
            AstKind::Name,
            AstKind::Module,
            AstKind::SrcFile,
            AstKind::FnDecl,
            AstKind::Integer,
            AstKind::String,
            AstKind::Float,
            AstKind::Char,
            AstKind::Binop,
            AstKind::FnDef,
            AstKind::BinopExpr,
            AstKind::Scope,
            AstKind::VarAssignment,
            AstKind::VarDefinition,
            AstKind::VarDeclaration,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                AstKind::Import => "import",
                AstKind::Name => "name",
                AstKind::Module => "module",
                AstKind::SrcFile => "src_file",
                AstKind::FnDecl => "fn_decl",
                AstKind::Integer => "integer",
                AstKind::String => "string",
                AstKind::Float => "float",
                AstKind::Char => "char",
                AstKind::Binop => "binop",
                AstKind::FnDef => "fn_def",
                AstKind::BinopExpr => "binop_expr",
                AstKind::Scope => "scope",
                AstKind::VarAssignment => "var_assignment",
                AstKind::VarDefinition => "var_definition",
                AstKind::VarDeclaration => "var_declaration",
            }
        }
    }

    /// A dotted identifier path, stored flattened (`a.b.c`).
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Name {
        pub text: String,
        pub span: Span,
    }

    impl Name {
        pub fn segments(&self) -> impl Iterator<Item = &str> {
            self.text.split('.')
        }
    }

    /// `import io from "std/io";`
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Import {
        pub name: Name,
        /// Module path without the surrounding quotes.
        pub path: String,
        pub span: Span,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Module {
        pub name: Name,
        pub fns: Vec<FnDef>,
        pub span: Span,
    }

    /// Root of a lowered compilation unit: imports first, then modules.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct SrcFile {
        pub imports: Vec<Import>,
        pub modules: Vec<Module>,
        pub span: Span,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Param {
        pub name: Name,
        pub ty: Expr,
        pub span: Span,
    }

    /// `(a: T, b: U) R`
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct FnDecl {
        pub params: Vec<Param>,
        pub ret: Expr,
        pub span: Span,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct FnDef {
        pub name: Name,
        pub decl: FnDecl,
        pub body: Scope,
        pub span: Span,
    }

    /// `{ stmt; stmt; tail }`
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Scope {
        pub stmts: Vec<Stmt>,
        /// Un-terminated final expression, the value the scope produces.
        pub tail: Option<Box<Expr>>,
        pub span: Span,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Stmt {
        Expr(Expr),
        /// `name = value`
        Assign { target: Name, value: Expr, span: Span },
        /// `name: ty = value`
        Define {
            name: Name,
            ty: Expr,
            value: Expr,
            span: Span,
        },
        /// `name: ty`
        Declare { name: Name, ty: Expr, span: Span },
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Expr {
        Lit(Lit, Span),
        Name(Name),
        Binary {
            op: BinOp,
            lhs: Box<Expr>,
            rhs: Box<Expr>,
            span: Span,
        },
    }

    impl Expr {
        pub fn span(&self) -> Span {
            match self {
                Expr::Lit(_, span) => *span,
                Expr::Name(name) => name.span,
                Expr::Binary { span, .. } => *span,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum Lit {
        Int(i64),
        Float(f64),
        Str(String),
        Char(char),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum BinOp {
        Add,
        Sub,
        Mul,
        Div,
        And,
        Or,
    }

    impl BinOp {
        pub fn symbol(self) -> &'static str {
            match self {
                BinOp::Add => "+",
                BinOp::Sub => "-",
                BinOp::Mul => "*",
                BinOp::Div => "/",
                BinOp::And => "&",
                BinOp::Or => "|",
            }
        }
    }

    /// Any lowered node, tagged by its variant.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub enum AstNode {
        SrcFile(SrcFile),
        Import(Import),
        Module(Module),
        FnDef(FnDef),
        FnDecl(FnDecl),
        Scope(Scope),
        Stmt(Stmt),
        Expr(Expr),
        Name(Name),
        BinOp(BinOp),
    }

    impl AstNode {
        pub fn kind(&self) -> AstKind {
            match self {
                AstNode::SrcFile(_) => AstKind::SrcFile,
                AstNode::Import(_) => AstKind::Import,
                AstNode::Module(_) => AstKind::Module,
                AstNode::FnDef(_) => AstKind::FnDef,
                AstNode::FnDecl(_) => AstKind::FnDecl,
                AstNode::Scope(_) => AstKind::Scope,
                AstNode::Stmt(stmt) => stmt.kind(),
                AstNode::Expr(expr) => expr.kind(),
                AstNode::Name(_) => AstKind::Name,
                AstNode::BinOp(_) => AstKind::Binop,
            }
        }
    }

    impl Stmt {
        pub fn kind(&self) -> AstKind {
            match self {
                Stmt::Expr(expr) => expr.kind(),
                Stmt::Assign { .. } => AstKind::VarAssignment,
                Stmt::Define { .. } => AstKind::VarDefinition,
                Stmt::Declare { .. } => AstKind::VarDeclaration,
            }
        }
    }

    impl Expr {
        pub fn kind(&self) -> AstKind {
            match self {
                Expr::Lit(Lit::Int(_), _) => AstKind::Integer,
                Expr::Lit(Lit::Float(_), _) => AstKind::Float,
                Expr::Lit(Lit::Str(_), _) => AstKind::String,
                Expr::Lit(Lit::Char(_), _) => AstKind::Char,
                Expr::Name(_) => AstKind::Name,
                Expr::Binary { .. } => AstKind::BinopExpr,
            }
        }
    }
}

mod dict;
mod display;

pub use dict::ToDict;
