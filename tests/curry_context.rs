//! Integration tests for curried functions fed from contexts

use plumbline::curry::{
    apply_curried_function, curry, curry2, nest, to_context_predicate, Applied, CurriedFunction,
};
use plumbline::error::CurryError;
use plumbline::prelude::*;
use plumbline::testing::ReportText;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn starts_with_fn() -> CurriedFunction {
    curry2("startsWith", |s: String, p: String| s.starts_with(&p))
}

#[test]
fn context_predicate_over_nested_contexts() {
    let words = ["hello", "help", "world"];
    let prefixes = [Value::from("he"), Value::from("wo")];
    let node = to_context_predicate(starts_with_fn(), is_true(), vec![0, 1]);

    let passing: Vec<String> = nest(words, &prefixes)
        .filter(|ctx| node.test(&Value::from(ctx.clone())).unwrap())
        .map(|ctx| ctx.to_string())
        .collect();

    assert_eq!(
        passing,
        vec![
            r#"ctx["hello","he"]"#,
            r#"ctx["help","he"]"#,
            r#"ctx["world","wo"]"#
        ]
    );
}

#[test]
fn argument_order_selects_context_slots() {
    let apply = apply_curried_function(&starts_with_fn(), &[1, 0]);
    let ctx = Context::of("he").append("hello");
    assert_eq!(apply(&ctx).unwrap(), Value::from(true));
}

#[test]
fn arity_is_checked_before_the_body_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let func = curry(
        "count3",
        vec![ValueKind::Any, ValueKind::Any, ValueKind::Any],
        move |_: &[Value]| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        },
    );

    let short = Context::of(1).append(2);
    let fault = func.apply_context(&short, &[]).unwrap_err();
    assert_eq!(
        fault.downcast_ref::<CurryError>(),
        Some(&CurryError::Arity {
            function: "count3".to_owned(),
            expected: 3,
            actual: 2,
        })
    );

    let fault = func.apply_context(&short, &[0, 1, 5]).unwrap_err();
    assert!(matches!(
        fault.downcast_ref::<CurryError>(),
        Some(CurryError::IndexOutOfRange { index: 5, size: 2, .. })
    ));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn type_mismatch_names_the_parameter() {
    let add = curry2("add", |a: i64, b: i64| a + b);
    let fault = add.apply_next("one").unwrap_err();
    assert_eq!(fault.kind(), "curry");
    assert_eq!(
        fault.to_string(),
        r#"add: parameter 0: cannot coerce string "one" to int"#
    );
}

#[test]
fn int_arguments_widen_to_float_slots() {
    let scale = curry2("scale", |x: f64, k: f64| x * k);
    let ctx = Context::of(3).append(0.5);
    assert_eq!(scale.apply_context(&ctx, &[]).unwrap(), Value::from(1.5));
}

#[test]
fn partial_application_leaves_originals_untouched() {
    let add = curry2("add", |a: i64, b: i64| a + b);
    let one = match add.apply_next(1).unwrap() {
        Applied::Partial(f) => f,
        Applied::Done(_) => panic!("expected a partial application"),
    };
    let sum = one.apply_next(2).unwrap().into_value();
    assert_eq!(sum, Some(Value::from(3)));

    // The original function and the partial are untouched.
    assert_eq!(add.remaining(), 2);
    assert_eq!(one.remaining(), 1);
}

#[test]
fn applying_past_the_last_slot_is_an_arity_fault() {
    let constant = curry("answer", Vec::<ValueKind>::new(), |_: &[Value]| {
        Ok(Value::from(42))
    });
    let fault = constant.apply_next(1).unwrap_err();
    assert!(matches!(
        fault.downcast_ref::<CurryError>(),
        Some(CurryError::Arity { expected: 0, actual: 1, .. })
    ));
    assert_eq!(constant.apply_context(&Context::empty(), &[]).unwrap(), Value::from(42));
}

#[test]
fn curry_fault_appears_in_the_report() {
    let node = to_context_predicate(starts_with_fn(), is_true(), vec![0, 2]);
    let rejection = Validator::new()
        .check(Context::of("hello").append("he"), &node)
        .unwrap_err();
    assert!(rejection.is_fault());

    let report = ReportText::parse(rejection.report());
    let records = report.records();
    let line = &records[0];
    assert_eq!(line.label, "startsWith->isTrue[0,2]");
    assert_eq!(line.result, "fault: curry");
    assert!(report
        .detail(1)
        .unwrap()
        .contains("argument index 2 is out of range for a context of size 2"));
}

#[test]
fn context_predicates_compose_with_quantifiers() {
    let node = all_match(to_context_predicate(starts_with_fn(), is_true(), vec![]));
    let pairs = Value::from(vec![
        Value::from(Context::of("abc").append("a")),
        Value::from(Context::of("xyz").append("x")),
    ]);
    assert!(Validator::new().check(pairs, &node).is_ok());
}

#[test]
fn structural_equality_of_context_predicates() {
    let a = to_context_predicate(starts_with_fn(), is_true(), vec![0, 1]);
    let b = to_context_predicate(starts_with_fn(), is_true(), vec![0, 1]);
    let c = to_context_predicate(starts_with_fn(), is_true(), vec![1, 0]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}
