use snel_parse::{parse_str, LowerError, ParseError};

#[test]
fn missing_semicolon_after_import() {
    let err = parse_str("<mem>", r#"import io from "std/io""#).unwrap_err();
    let ParseError::Syntax(e) = &err else {
        panic!("expected a syntax error, got {err}");
    };
    assert_eq!(e.offset, 23);
    assert!(e.message.contains("`;`"), "{}", e.message);
}

#[test]
fn error_names_file_and_position() {
    let err = parse_str("main.snel", "module m {\n  fn ( }")
        .unwrap_err()
        .to_string();
    assert!(err.starts_with("main.snel:2:6: syntax error: expected identifier"), "{err}");
    assert!(err.contains("<- here"), "{err}");
}

#[test]
fn stray_top_level_expression() {
    let err = parse_str("<mem>", "42;").unwrap_err();
    let ParseError::Syntax(e) = err else {
        panic!("expected a syntax error");
    };
    assert_eq!((e.line, e.column), (1, 1));
}

#[test]
fn tuple_expressions_parse_but_do_not_lower() {
    let err = parse_str("<mem>", "module m { fn f() int { (1, 2) } }").unwrap_err();
    assert!(
        matches!(
            err,
            ParseError::Lower(LowerError::UnsupportedConstruct { offset: 24, .. })
        ),
        "{err}"
    );
}

#[test]
fn trailing_comma_in_params_is_rejected() {
    let err = parse_str("<mem>", "module m { fn f(a: int,) int { 0 } }").unwrap_err();
    assert!(matches!(err, ParseError::Syntax(_)), "{err}");
}

#[test]
fn keywords_are_not_prefixes() {
    // `modulem` is an identifier, not `module m`
    assert!(parse_str("<mem>", "modulem { }").is_err());
}
