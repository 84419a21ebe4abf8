use pretty_assertions::assert_eq;
use snel_backend::{Constant, Function, Module};

fn hello() -> Module {
    let msg = Constant::new("msg", "Hello, world!\n");
    let mut main = Function::new("main");
    main.op_syscall_write(1, msg.name(), msg.len_placeholder());
    main.op_syscall_exit(0);

    let mut m = Module::new("hello");
    m.add_function(main);
    m.add_constant(msg);
    m.set_entry_point("main").unwrap();
    m
}

#[test]
fn hello_world_renders_in_fixed_order() {
    let expected = "\
format ELF64 executable
entry main
segment readable executable
main:
    mov rax, 1
    mov rdi, 1
    mov rsi, msg
    mov rdx, 14
    syscall
    mov rax, 60
    mov rdi, 0
    syscall
segment readable writable
msg db \"Hello, world!\", 10
";
    assert_eq!(hello().render(), expected);
}

#[test]
fn single_mov_is_the_only_instruction() {
    let mut f = Function::new("start");
    f.op_2("mov", "rax", "1").unwrap();
    let mut m = Module::new("t");
    m.add_function(f);
    let text = m.render();
    let body: Vec<_> = text
        .lines()
        .skip_while(|l| *l != "start:")
        .skip(1)
        .take_while(|l| l.starts_with("    "))
        .collect();
    assert_eq!(body, ["    mov rax, 1"]);
}

#[test]
fn every_length_placeholder_is_backpatched() {
    let msg = Constant::new("msg", "hi");
    let placeholder = msg.len_placeholder();
    let mut f = Function::new("main");
    f.op_mov("rdx", placeholder.as_str());
    f.add_code(format!("add rdx, {placeholder}"));

    let mut m = Module::new("t");
    m.add_function(f);
    // the constant may mention its own length too
    m.add_constant(Constant::with_asm("msg", "hi", format!("'hi' ; {placeholder} bytes")));
    let text = m.render();

    assert!(!text.contains("$$"), "{text}");
    assert!(text.contains("mov rdx, 2\n"), "{text}");
    assert!(text.contains("add rdx, 2\n"), "{text}");
    assert!(text.contains("msg db 'hi' ; 2 bytes\n"), "{text}");
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(hello().render(), hello().render());
}
