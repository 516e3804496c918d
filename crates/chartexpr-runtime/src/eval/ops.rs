//! Operator dispatch on runtime values.
//!
//! Mirrors the type checker's operator table. Combinations outside it can
//! only come from an engine defect.

use crate::chart_ops::{self, apply_arithmetic, ScalarSide};
use crate::error::EvaluationError;
use crate::series::offset_time;
use crate::value::RuntimeValue;
use chartexpr_ast::foundation::Span;
use chartexpr_ast::{BinaryOp, UnaryOp};
use std::rc::Rc;

pub(super) fn unary(op: UnaryOp, operand: RuntimeValue) -> RuntimeValue {
    match (op, operand) {
        (UnaryOp::Not, RuntimeValue::Boolean(b)) => RuntimeValue::Boolean(!b),
        (UnaryOp::Neg, RuntimeValue::Number(n)) => RuntimeValue::Number(-n),
        (op, operand) => bug!(
            "type checker admitted '{}' on {}",
            op,
            operand.value_type()
        ),
    }
}

pub(super) fn binary(
    op: BinaryOp,
    left: RuntimeValue,
    right: RuntimeValue,
    span: Span,
) -> Result<RuntimeValue, EvaluationError> {
    if op.is_arithmetic() {
        arithmetic(op, left, right, span)
    } else if op.is_comparison() {
        Ok(RuntimeValue::Boolean(comparison(op, &left, &right)))
    } else if op.is_logical() {
        Ok(RuntimeValue::Boolean(logical(op, &left, &right)))
    } else {
        bug!("'{}' has no evaluation rule", op)
    }
}

fn arithmetic(
    op: BinaryOp,
    left: RuntimeValue,
    right: RuntimeValue,
    span: Span,
) -> Result<RuntimeValue, EvaluationError> {
    use RuntimeValue::*;

    let time_offset = |t, ms: i64| {
        offset_time(t, ms)
            .map(Time)
            .ok_or(EvaluationError::TimeOutOfRange { span })
    };

    match (left, right) {
        (Number(l), Number(r)) => Ok(Number(apply_arithmetic(op, l, r))),
        (Time(t), Duration(d)) if op == BinaryOp::Add => time_offset(t, d),
        (Time(t), Duration(d)) if op == BinaryOp::Sub => match d.checked_neg() {
            Some(back) => time_offset(t, back),
            None => Err(EvaluationError::TimeOutOfRange { span }),
        },
        (Duration(d), Time(t)) if op == BinaryOp::Add => time_offset(t, d),
        (Chart(l), Chart(r)) => chart_ops::chart_chart(op, &l, &r)
            .map(|chart| Chart(Rc::new(chart)))
            .map_err(|reason| EvaluationError::misaligned(reason, span)),
        (Chart(c), Number(n)) => Ok(Chart(Rc::new(chart_ops::chart_scalar(
            op,
            &c,
            n,
            ScalarSide::Right,
        )))),
        (Number(n), Chart(c)) => Ok(Chart(Rc::new(chart_ops::chart_scalar(
            op,
            &c,
            n,
            ScalarSide::Left,
        )))),
        (l, r) => bug!(
            "type checker admitted {} {} {}",
            l.value_type(),
            op,
            r.value_type()
        ),
    }
}

fn comparison(op: BinaryOp, left: &RuntimeValue, right: &RuntimeValue) -> bool {
    use RuntimeValue::*;

    match (left, right) {
        (Number(l), Number(r)) => compare(op, l, r),
        (Time(l), Time(r)) => compare(op, &l.timestamp_millis(), &r.timestamp_millis()),
        (Boolean(l), Boolean(r)) if op == BinaryOp::Eq => l == r,
        (l, r) => bug!(
            "type checker admitted {} {} {}",
            l.value_type(),
            op,
            r.value_type()
        ),
    }
}

fn compare<T: PartialOrd>(op: BinaryOp, left: &T, right: &T) -> bool {
    match op {
        BinaryOp::Gt => left > right,
        BinaryOp::GtEq => left >= right,
        BinaryOp::Lt => left < right,
        BinaryOp::LtEq => left <= right,
        BinaryOp::Eq => left == right,
        other => bug!("'{}' is not a comparison operator", other),
    }
}

fn logical(op: BinaryOp, left: &RuntimeValue, right: &RuntimeValue) -> bool {
    match (op, left.as_boolean(), right.as_boolean()) {
        (BinaryOp::And, Some(l), Some(r)) => l && r,
        (BinaryOp::Or, Some(l), Some(r)) => l || r,
        (op, _, _) => bug!(
            "type checker admitted {} {} {}",
            left.value_type(),
            op,
            right.value_type()
        ),
    }
}
