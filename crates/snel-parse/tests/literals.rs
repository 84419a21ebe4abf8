use snel_ast::ast::{Expr, Lit, Stmt};
use snel_parse::{parse_str, ParseError};

fn values(body: &str) -> Vec<Expr> {
    let src = format!("module m {{ fn f() int {{ {body} }} }}");
    let f = parse_str("<mem>", &src).unwrap();
    f.modules[0].fns[0]
        .body
        .stmts
        .iter()
        .map(|s| match s {
            Stmt::Define { value, .. } => value.clone(),
            other => panic!("expected a definition, got {other}"),
        })
        .collect()
}

#[test]
fn ints_floats_strings_chars() {
    let v = values(r#"a: int = 42; b: int = -7; c: f64 = 3.5; d: str = "hi there"; e: char = 'x';"#);
    assert!(matches!(v[0], Expr::Lit(Lit::Int(42), _)));
    assert!(matches!(v[1], Expr::Lit(Lit::Int(-7), _)));
    assert!(matches!(v[2], Expr::Lit(Lit::Float(f), _) if (f - 3.5).abs() < 1e-9));
    assert!(matches!(&v[3], Expr::Lit(Lit::Str(s), _) if s == "hi there"));
    assert!(matches!(v[4], Expr::Lit(Lit::Char('x'), _)));
}

#[test]
fn whole_numbers_stay_integers() {
    let v = values("a: int = 10;");
    assert!(matches!(v[0], Expr::Lit(Lit::Int(10), _)));
}

#[test]
fn strings_keep_their_content_verbatim() {
    let v = values(r#"s: str = "a\nb";"#);
    assert!(matches!(&v[0], Expr::Lit(Lit::Str(s), _) if s == r"a\nb"));
}

#[test]
fn out_of_range_integer_is_rejected() {
    let err = parse_str(
        "<mem>",
        "module m { fn f() int { 123456789012345678901234567890 } }",
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::Lower(_)), "{err}");
    assert!(err.to_string().contains("invalid literal"), "{err}");
}

#[test]
fn out_of_range_decimal_is_rejected() {
    let src = format!("module m {{ fn f() int {{ {}.5 }} }}", "9".repeat(400));
    let err = parse_str("<mem>", &src).unwrap_err();
    assert!(matches!(err, ParseError::Lower(_)), "{err}");
    assert!(err.to_string().contains("out of range"), "{err}");
}
