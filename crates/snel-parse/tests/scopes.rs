use snel_ast::ast::{AstKind, Expr, Scope, Stmt};
use snel_parse::parse_str;

fn body(src: &str) -> Scope {
    let src = format!("module m {{ fn f() int {{ {src} }} }}");
    parse_str("<mem>", &src).unwrap().modules[0].fns[0]
        .body
        .clone()
}

#[test]
fn empty_scope() {
    let s = body("");
    assert!(s.stmts.is_empty());
    assert!(s.tail.is_none());
}

#[test]
fn statement_kinds_in_order() {
    let s = body("x: int; y: int = 1; x = y + 1; x;");
    let kinds: Vec<_> = s.stmts.iter().map(Stmt::kind).collect();
    assert_eq!(
        kinds,
        [
            AstKind::VarDeclaration,
            AstKind::VarDefinition,
            AstKind::VarAssignment,
            AstKind::Name,
        ]
    );
    assert!(s.tail.is_none());
}

#[test]
fn trailing_expression_becomes_the_tail() {
    let s = body("x: int = 1; x + 1");
    assert_eq!(s.stmts.len(), 1);
    let Some(tail) = s.tail.as_deref() else {
        panic!("expected a tail");
    };
    assert_eq!(tail.to_string(), "(x + 1)");
}

#[test]
fn assignment_to_a_dotted_name() {
    let s = body("cfg.level = 3;");
    let Stmt::Assign { target, value, .. } = &s.stmts[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(target.text, "cfg.level");
    assert_eq!(value.to_string(), "3");
}

#[test]
fn definition_with_an_expression_value() {
    let s = body("total: int = a * (b + c);");
    let Stmt::Define { name, ty, value, .. } = &s.stmts[0] else {
        panic!("expected a definition");
    };
    assert_eq!(name.text, "total");
    assert!(matches!(ty, Expr::Name(n) if n.text == "int"));
    assert_eq!(value.to_string(), "(a * (b + c))");
}

#[test]
fn scope_display_round_trips_the_shape() {
    let s = body("x: int = 1; x = 2; x");
    assert_eq!(s.to_string(), "{ x: int = 1; x = 2; x }");
}
