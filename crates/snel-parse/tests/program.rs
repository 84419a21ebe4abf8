use snel_ast::ast::{Expr, SrcFile};
use snel_parse::parse_str;

const HELLO: &str = r#"
import io from "std/io";
import os from "std/os";

module main {
    fn greet(who: str, times: int) int {
        io.out = who;
        0
    }

    fn main() int {
        0
    }
}

module util {
}
"#;

fn parse(src: &str) -> SrcFile {
    parse_str("<mem>", src).unwrap()
}

#[test]
fn empty_source_is_an_empty_file() {
    let f = parse("");
    assert!(f.imports.is_empty());
    assert!(f.modules.is_empty());
    let f = parse("  \n\t ");
    assert!(f.imports.is_empty() && f.modules.is_empty());
}

#[test]
fn imports_keep_name_and_path() {
    let f = parse(HELLO);
    let names: Vec<_> = f.imports.iter().map(|i| i.name.text.as_str()).collect();
    let paths: Vec<_> = f.imports.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(names, ["io", "os"]);
    assert_eq!(paths, ["std/io", "std/os"]);
}

#[test]
fn modules_and_functions_in_source_order() {
    let f = parse(HELLO);
    let modules: Vec<_> = f.modules.iter().map(|m| m.name.text.as_str()).collect();
    assert_eq!(modules, ["main", "util"]);

    let fns: Vec<_> = f.modules[0].fns.iter().map(|d| d.name.text.as_str()).collect();
    assert_eq!(fns, ["greet", "main"]);
    assert!(f.modules[1].fns.is_empty());
}

#[test]
fn fn_decl_params_and_return_type() {
    let f = parse(HELLO);
    let decl = &f.modules[0].fns[0].decl;
    let params: Vec<_> = decl
        .params
        .iter()
        .map(|p| (p.name.text.as_str(), p.ty.to_string()))
        .collect();
    assert_eq!(params, [("who", "str".to_string()), ("times", "int".to_string())]);
    let Expr::Name(ret) = &decl.ret else {
        panic!("expected a name as return type");
    };
    assert_eq!(ret.text, "int");
}

#[test]
fn no_params_is_an_empty_list() {
    let f = parse(HELLO);
    assert!(f.modules[0].fns[1].decl.params.is_empty());
}

#[test]
fn dotted_names_are_flattened() {
    let f = parse("module m { fn f() a.b.c { std.io.out } }");
    let def = &f.modules[0].fns[0];
    let Expr::Name(ret) = &def.decl.ret else {
        panic!("expected a name");
    };
    assert_eq!(ret.text, "a.b.c");
    assert_eq!(ret.segments().collect::<Vec<_>>(), ["a", "b", "c"]);

    let Some(Expr::Name(tail)) = def.body.tail.as_deref() else {
        panic!("expected a name tail");
    };
    assert_eq!(tail.text, "std.io.out");
}

#[test]
fn imports_must_come_before_modules() {
    let err = parse_str("<mem>", r#"module m { } import io from "std/io";"#).unwrap_err();
    assert!(err.to_string().contains("syntax error"), "{err}");
}
