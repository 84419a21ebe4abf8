use snel_parse::{parse_str, ParseError, MAX_PRIO_DEPTH};

fn nested(depth: usize) -> String {
    format!(
        "module m {{ fn f() int {{ {}1{} }} }}",
        "(".repeat(depth),
        ")".repeat(depth)
    )
}

#[test]
fn moderate_nesting_is_fine() {
    let f = parse_str("<mem>", &nested(50)).unwrap();
    assert_eq!(
        f.modules[0].fns[0].body.tail.as_deref().map(|t| t.to_string()),
        Some("1".to_string())
    );
}

#[test]
fn excessive_nesting_is_a_syntax_error() {
    let err = parse_str("<mem>", &nested(MAX_PRIO_DEPTH + 1)).unwrap_err();
    let ParseError::Syntax(e) = err else {
        panic!("expected a syntax error");
    };
    assert!(e.message.contains("nesting"), "{}", e.message);
}

fn chain(terms: usize) -> String {
    let chain = vec!["x"; terms].join(" + ");
    format!("module m {{ fn f() int {{ {chain} }} }}")
}

#[test]
fn long_operator_chain() {
    assert!(parse_str("<mem>", &chain(MAX_PRIO_DEPTH - 1)).is_ok());
    let err = parse_str("<mem>", &chain(MAX_PRIO_DEPTH + 1)).unwrap_err();
    assert!(matches!(err, ParseError::Syntax(_)), "{err}");
}

#[test]
fn limits_hold_on_a_spawned_thread() {
    let worker = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(|| {
            assert!(parse_str("<mem>", &nested(MAX_PRIO_DEPTH - 2)).is_ok());
            assert!(parse_str("<mem>", &chain(MAX_PRIO_DEPTH - 1)).is_ok());
            let err = parse_str("<mem>", &nested(MAX_PRIO_DEPTH + 1)).unwrap_err();
            let ParseError::Syntax(e) = err else {
                panic!("expected a syntax error");
            };
            assert!(e.message.contains("nesting"), "{}", e.message);
        })
        .unwrap();
    worker.join().unwrap();
}
