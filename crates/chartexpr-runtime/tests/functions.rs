//! Built-in functions evaluated through programs.

use chartexpr_ast::chart::TimeSeries;
use chartexpr_ast::{Chart, ChartMap, Point, Timestamp};
use chartexpr_parser::parse_program;
use chartexpr_runtime::{execute_program, EvalContext, Execution, EvaluationError, RuntimeValue};
use chrono::{TimeDelta, TimeZone, Utc};
use std::rc::Rc;

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

fn minute(n: i64) -> Timestamp {
    t0() + TimeDelta::minutes(n)
}

fn fixed_now() -> Timestamp {
    minute(3)
}

fn per_minute(values: &[f64]) -> Rc<Chart> {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, y)| Point::new(minute(i as i64), *y))
        .collect();
    Rc::new(Chart::time_series(points))
}

fn charts(entries: &[(&str, Rc<Chart>)]) -> ChartMap {
    entries
        .iter()
        .map(|(name, chart)| (name.to_string(), chart.clone()))
        .collect()
}

fn run(source: &str, inputs: &ChartMap) -> Result<Execution, EvaluationError> {
    let program = parse_program(source).unwrap();
    execute_program(&program, EvalContext::new(inputs, &fixed_now))
}

fn series<'a>(execution: &'a Execution, name: &str) -> &'a TimeSeries {
    execution.derived_charts[name].as_time_series().unwrap()
}

fn values(execution: &Execution, name: &str) -> Vec<f64> {
    series(execution, name).values().collect()
}

#[test]
fn test_moving_avg() {
    let inputs = charts(&[("A", per_minute(&[1.0, 2.0, 3.0, 4.0]))]);
    let result = run("B = moving_avg(A, 2m);", &inputs).unwrap();
    assert_eq!(values(&result, "B"), vec![1.0, 1.5, 2.5, 3.5]);
}

#[test]
fn test_resample_named_arguments_any_order() {
    let inputs = charts(&[("A", per_minute(&[1.0, 3.0, 5.0, 7.0]))]);
    let result = run(
        "S = resample(A, window=2m, method=\"sum\"); \
         L = resample(A, method=\"last\", window=2m); \
         M = resample(A, window=2m);",
        &inputs,
    )
    .unwrap();
    assert_eq!(values(&result, "S"), vec![4.0, 12.0]);
    assert_eq!(values(&result, "L"), vec![3.0, 7.0]);
    assert_eq!(values(&result, "M"), vec![2.0, 6.0]);
}

#[test]
fn test_align_default_is_linear() {
    let source = Rc::new(Chart::time_series(vec![
        Point::new(minute(0), 0.0),
        Point::new(minute(10), 10.0),
    ]));
    let target = Rc::new(Chart::time_series(
        (0..4).map(|i| Point::new(minute(i * 5), 0.0)).collect(),
    ));
    let inputs = charts(&[("S", source), ("T", target)]);

    let result = run(
        "L = align(S, to=T); St = align(S, to=T, method=\"step\"); E = align(S, to=T, method=\"exact\");",
        &inputs,
    )
    .unwrap();
    assert_eq!(values(&result, "L"), vec![0.0, 5.0, 10.0, 10.0]);
    assert_eq!(values(&result, "St"), vec![0.0, 0.0, 10.0, 10.0]);
    assert_eq!(values(&result, "E"), vec![0.0, 10.0]);
}

#[test]
fn test_shift_and_normalize() {
    let inputs = charts(&[("A", per_minute(&[2.0, 4.0, 6.0]))]);
    let result = run("S = shift(A, 1h); N = normalize(A);", &inputs).unwrap();
    assert_eq!(series(&result, "S").points[0].x, minute(60));
    assert_eq!(values(&result, "N"), vec![0.0, 0.5, 1.0]);
}

#[test]
fn test_filter_by_value_and_time() {
    let inputs = charts(&[("A", per_minute(&[5.0, 1.0, 7.0, 3.0, 9.0]))]);
    let result = run(
        "High = filter(A, value > 4); Recent = filter(A, time >= now() - 1m);",
        &inputs,
    )
    .unwrap();
    assert_eq!(values(&result, "High"), vec![5.0, 7.0, 9.0]);
    let recent: Vec<Timestamp> = series(&result, "Recent").points.iter().map(|p| p.x).collect();
    assert_eq!(recent, vec![minute(2), minute(3), minute(4)]);
}

#[test]
fn test_filter_sees_outer_variables_without_leaking() {
    let inputs = charts(&[("A", per_minute(&[1.0, 2.0, 3.0]))]);
    let result = run("Limit = 1; F = filter(A, value > Limit);", &inputs).unwrap();
    assert_eq!(values(&result, "F"), vec![2.0, 3.0]);
    assert!(!result.variables.contains_key("value"));
    assert!(!result.variables.contains_key("time"));
}

#[test]
fn test_filter_predicate_error_is_surfaced() {
    let inputs = charts(&[("A", per_minute(&[1.0, 2.0, 3.0]))]);
    let err = run("F = filter(A, time + 100000000w > time);", &inputs).unwrap_err();
    assert!(matches!(err, EvaluationError::TimeOutOfRange { .. }));
}

#[test]
fn test_now_is_injected() {
    let result = run("N = now();", &ChartMap::new()).unwrap();
    assert_eq!(result.variables["N"], RuntimeValue::Time(minute(3)));
}

#[test]
fn test_reassignment_keeps_first_position() {
    let inputs = charts(&[("A", per_minute(&[1.0]))]);
    let result = run("X = A; Y = 2; X = 3;", &inputs).unwrap();
    let names: Vec<&str> = result.variables.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["X", "Y"]);
    assert_eq!(result.variables["X"], RuntimeValue::Number(3.0));
    assert!(result.derived_charts.contains_key("X"));
}

#[test]
fn test_time_zone_preserved() {
    let chart = Rc::new(Chart::time_series_in(
        "Europe/Stockholm",
        vec![Point::new(minute(0), 1.0), Point::new(minute(1), 2.0)],
    ));
    let inputs = charts(&[("A", chart)]);
    let result = run("B = moving_avg(A, 5m);", &inputs).unwrap();
    assert_eq!(series(&result, "B").time_zone, "Europe/Stockholm");
}
