//! Diagnostics emitted by the validator under the `tracing` feature
#![cfg(feature = "tracing")]

use plumbline::prelude::*;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn rejection_is_logged_at_debug() {
    let result = Validator::new().check(false, &is_true());
    assert!(result.is_err());
    assert!(logs_contain("isTrue rejected false: Failed"));
}

#[test]
#[traced_test]
fn fault_is_logged_with_its_verdict() {
    let node = is_not_null().and(gt(0));
    let result = Validator::new().check("seven", &node);
    assert!(result.is_err());
    assert!(logs_contain("and rejected \"seven\": Faulted"));
}

#[test]
#[traced_test]
fn success_is_logged_at_trace() {
    let node = gt(0).and(lt(10));
    assert!(Validator::new().check(5, &node).is_ok());
    assert!(logs_contain("and(greaterThan[0],lessThan[10]) held for 5"));
    assert!(!logs_contain("rejected"));
}
