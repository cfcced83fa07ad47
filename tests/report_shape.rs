//! End-to-end tests of rendered report shape
//!
//! These tests go through `validate`/`check` and assert on the parsed report,
//! the way downstream code greps failure messages.

use plumbline::prelude::*;
use plumbline::testing::{ReportLine, ReportText};
use plumbline::{assert_rejects, ReportOptions};

fn one_string() -> Node {
    is_not_null()
        .and(size().check(is_equal_to(1)))
        .and(element_at(0).check(is_instance_of(ValueKind::Str)))
}

fn labels(report: &ReportText) -> Vec<String> {
    report.records().into_iter().map(|line| line.label).collect()
}

#[test]
fn report_lines_follow_construction_order() {
    let err = validate(vec![123], &one_string(), Violation::validation).unwrap_err();
    let report = ReportText::parse(err.message());

    assert_eq!(
        labels(&report),
        vec!["and", "isNotNull", "size", "isEqualTo[1]", "at[0]", "isInstanceOf[string]"]
    );

    let depths: Vec<usize> = report.records().iter().map(|l| l.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2, 1, 2]);
}

#[test]
fn transform_output_is_the_check_subject() {
    let rejection = assert_rejects!(vec![123], one_string());
    let records = ReportText::parse(rejection.report()).records();

    assert_eq!(records[4].result, "123");
    assert_eq!(
        records[5],
        ReportLine {
            depth: 2,
            label: "isInstanceOf[string]".to_owned(),
            subject: Some("123".to_owned()),
            result: "false".to_owned(),
            detail: None,
        }
    );
}

#[test]
fn false_is_true_first_line() {
    let err = validate(false, &is_true(), Violation::precondition).unwrap_err();
    let first = err.message().lines().next().unwrap();
    assert!(first.contains("isTrue"));
    assert!(first.contains("false"));
    assert_eq!(first, "Value:false violated: isTrue");
}

#[test]
fn all_match_short_circuits_at_null() {
    let value = Value::from(vec![Some("hello"), Some("world"), None]);
    let node = stream().check(all_match(is_not_null()));
    let rejection = assert_rejects!(value, node, "(at [2])");

    let records = ReportText::parse(rejection.report()).records();
    assert_eq!(records[1].label, "allMatch");
    assert_eq!(records[1].result, "false (at [2])");
    assert_eq!(records[2].subject.as_deref(), Some("null"));
}

#[test]
fn skipped_siblings_are_reported() {
    let node = gt(0).and(lt(10)).and(is_not_null());
    let rejection = assert_rejects!(-1, node);
    let records = ReportText::parse(rejection.report()).records();

    let skipped: Vec<&str> = records
        .iter()
        .filter(|line| line.subject.is_none())
        .map(|line| line.label.as_str())
        .collect();
    assert_eq!(skipped, vec!["lessThan[10]", "isNotNull"]);
}

#[test]
fn or_stops_at_first_success() {
    let node = lt(0).or(gt(100)).or(between(40, 60));
    assert_passes_ok(50, &node);

    let rejection = assert_rejects!(70, node);
    let records = ReportText::parse(rejection.report()).records();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|line| line.subject.is_some()));
}

#[test]
fn or_skips_the_rest_after_a_success() {
    let node = gt(0).or(lt(-5)).and(is_null());
    let rejection = assert_rejects!(3, node);
    let report = ReportText::parse(rejection.report());
    let records = report.records();

    assert_eq!(
        labels(&report),
        vec!["and", "or", "greaterThan[0]", "lessThan[-5]", "isNull"]
    );
    assert_eq!(records[1].result, "true");
    assert_eq!(records[2].result, "true");
    assert_eq!(records[3].depth, 2);
    assert_eq!(records[3].subject, None);
    assert_eq!(records[3].result, "(not evaluated)");
    assert_eq!(records[4].result, "false");
}

fn assert_passes_ok(value: i32, node: &Node) {
    assert_eq!(
        Validator::new().check(value, node).unwrap(),
        Value::from(value)
    );
}

#[test]
fn fault_is_reported_in_place_of_a_verdict() {
    let node = is_not_null().and(is_true());
    let rejection = Validator::new().check("maybe", &node).unwrap_err();
    assert!(rejection.is_fault());

    let report = ReportText::parse(rejection.report());
    let records = report.records();
    assert_eq!(records[0].result, "(aborted)");
    assert_eq!(records[2].result, "fault: coercion");
    assert_eq!(records[2].detail, Some(1));

    let detail = report.detail(1).unwrap();
    assert!(detail.starts_with("cause: cannot coerce string"));
}

#[test]
fn raised_error_keeps_its_type() {
    #[derive(Debug)]
    struct Unreachable;

    impl std::fmt::Display for Unreachable {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("service unreachable")
        }
    }

    impl std::error::Error for Unreachable {}

    let node = Node::try_leaf("isReachable", |_: &Value| Err::<bool, _>(Unreachable));
    let rejection = Validator::new().check("host", &node).unwrap_err();
    let fault = rejection.fault().unwrap();
    assert!(fault.downcast_ref::<Unreachable>().is_some());
    assert!(rejection.report().contains("cause: service unreachable"));
}

#[test]
fn panicking_leaf_is_a_fault() {
    let node = Node::leaf("explodes", |_: &Value| panic!("leaf blew up"));
    let rejection = Validator::new().check(1, &node).unwrap_err();
    assert!(rejection.fault().unwrap().is_panic());
    assert!(rejection.report().contains("fault: panic [#1]"));
}

#[test]
fn long_subjects_move_to_detail_blocks() {
    let long: Vec<i32> = (0..40).collect();
    let validator = Validator::with_options(ReportOptions::default().with_subject_width(20));
    let rejection = validator.check(long.clone(), &size().check(lt(5))).unwrap_err();
    let report = ReportText::parse(rejection.report());

    let summary = report.summary();
    assert_eq!(summary[0].label, "size");
    assert!(summary[0].has_detail());
    assert!(!summary[1].has_detail());

    let full = Value::from(long).to_string();
    assert_eq!(report.detail(1), Some(format!("value: {}", full)));
}

#[test]
fn crlf_reports_parse_like_lf() {
    let err = validate(vec![123], &one_string(), Violation::validation).unwrap_err();
    let crlf = err.message().replace('\n', "\r\n");
    assert_eq!(ReportText::parse(&crlf), ReportText::parse(err.message()));
    assert_eq!(ReportText::parse(&crlf).line_count(), 7);
}

#[test]
fn report_is_exactly_the_violation_message() {
    let node = gt(0);
    let rejection = Validator::new().check(0, &node).unwrap_err();
    let violation = validate(0, &node, Violation::postcondition).unwrap_err();
    assert_eq!(violation.message(), rejection.report());
    assert_eq!(violation.to_string(), rejection.to_string());
}
