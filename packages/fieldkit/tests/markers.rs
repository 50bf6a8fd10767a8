mod common;

use common::SignUp;
use fieldkit::{auto_wire, gather_tracked, Injectable, SimpleContainer, Tracked, WireType};

#[test]
fn tracked_fields_in_declaration_order() {
    let form = SignUp {
        email: Tracked::new("a@b.c".into()),
        password: Tracked::new("secret".into()),
        remember_me: true,
    };
    assert_eq!(gather_tracked(&form), vec!["email", "password"]);
}

#[test]
fn tracked_fields_render_transparently() {
    let form = SignUp::default();
    assert_eq!(
        fieldkit::describe(&form),
        "email: , password: , remember_me: false"
    );
}

#[derive(Debug, Default, PartialEq)]
struct Mailer {
    host: String,
}

impl Injectable for Mailer {}

#[derive(Default)]
struct Clock;

impl Injectable for Clock {}

struct Database;

#[test]
fn auto_wire_registers_only_injectables() {
    let mut container = SimpleContainer::new();
    let registered = auto_wire(
        &[
            WireType::injectable::<Mailer>(),
            WireType::opaque::<Database>(),
            WireType::injectable::<Clock>(),
        ],
        &mut container,
    );
    assert_eq!(registered, 2);
    assert_eq!(container.len(), 2);
    assert_eq!(container.resolve::<Mailer>(), Some(&Mailer::default()));
    assert!(container.resolve::<Database>().is_none());
}
