//! Chart arithmetic.
//!
//! Two charts combine pointwise only when they are aligned: same domain
//! (including time zone or unit), same number of points and identical x
//! values at every index. A chart combines with a scalar by applying the
//! operator to every y value, keeping the operand order.

use crate::error::MisalignmentReason;
use chartexpr_ast::chart::{CategorySeries, NumericSeries, TimeSeries};
use chartexpr_ast::{BinaryOp, Chart, Point};

/// Apply an arithmetic operator to two numbers.
pub fn apply_arithmetic(op: BinaryOp, left: f64, right: f64) -> f64 {
    match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
        other => bug!("'{}' is not an arithmetic operator", other),
    }
}

/// Check that two charts may be combined pointwise.
pub fn check_alignment(left: &Chart, right: &Chart) -> Result<(), MisalignmentReason> {
    let (left_domain, right_domain) = (left.domain(), right.domain());
    if left_domain != right_domain {
        return Err(MisalignmentReason::DomainMismatch {
            left: left_domain,
            right: right_domain,
        });
    }
    if left.len() != right.len() {
        return Err(MisalignmentReason::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    // Instants match at whole epoch milliseconds.
    let mismatch = match (left, right) {
        (Chart::Time(l), Chart::Time(r)) => first_x_mismatch(&l.points, &r.points, |l, r| {
            l.timestamp_millis() == r.timestamp_millis()
        }),
        (Chart::Numeric(l), Chart::Numeric(r)) => {
            first_x_mismatch(&l.points, &r.points, PartialEq::eq)
        }
        (Chart::Category(l), Chart::Category(r)) => {
            first_x_mismatch(&l.points, &r.points, PartialEq::eq)
        }
        _ => bug!("equal domains with different chart variants"),
    };
    match mismatch {
        Some(index) => Err(MisalignmentReason::PointMismatch { index }),
        None => Ok(()),
    }
}

/// Index of the first point pair whose x values are not `same`.
fn first_x_mismatch<X>(
    left: &[Point<X>],
    right: &[Point<X>],
    same: impl Fn(&X, &X) -> bool,
) -> Option<usize> {
    left.iter().zip(right).position(|(l, r)| !same(&l.x, &r.x))
}

/// `left op right` for two aligned charts.
pub fn chart_chart(op: BinaryOp, left: &Chart, right: &Chart) -> Result<Chart, MisalignmentReason> {
    check_alignment(left, right)?;
    Ok(match (left, right) {
        (Chart::Time(l), Chart::Time(r)) => Chart::Time(TimeSeries {
            time_zone: l.time_zone.clone(),
            points: zip_points(op, &l.points, &r.points),
        }),
        (Chart::Numeric(l), Chart::Numeric(r)) => Chart::Numeric(NumericSeries {
            unit: l.unit.clone(),
            points: zip_points(op, &l.points, &r.points),
        }),
        (Chart::Category(l), Chart::Category(r)) => Chart::Category(CategorySeries {
            points: zip_points(op, &l.points, &r.points),
        }),
        _ => bug!("aligned charts with different variants"),
    })
}

fn zip_points<X: Clone>(op: BinaryOp, left: &[Point<X>], right: &[Point<X>]) -> Vec<Point<X>> {
    left.iter()
        .zip(right)
        .map(|(l, r)| Point::new(l.x.clone(), apply_arithmetic(op, l.y, r.y)))
        .collect()
}

/// Which side of the operator the scalar sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSide {
    Left,
    Right,
}

/// `chart op scalar` or `scalar op chart`, depending on `side`.
pub fn chart_scalar(op: BinaryOp, chart: &Chart, scalar: f64, side: ScalarSide) -> Chart {
    let apply = |y: f64| match side {
        ScalarSide::Left => apply_arithmetic(op, scalar, y),
        ScalarSide::Right => apply_arithmetic(op, y, scalar),
    };
    match chart {
        Chart::Time(series) => Chart::Time(TimeSeries {
            time_zone: series.time_zone.clone(),
            points: map_points(&series.points, apply),
        }),
        Chart::Numeric(series) => Chart::Numeric(NumericSeries {
            unit: series.unit.clone(),
            points: map_points(&series.points, apply),
        }),
        Chart::Category(series) => Chart::Category(CategorySeries {
            points: map_points(&series.points, apply),
        }),
    }
}

fn map_points<X: Clone>(points: &[Point<X>], f: impl Fn(f64) -> f64) -> Vec<Point<X>> {
    points.iter().map(|p| Point::new(p.x.clone(), f(p.y))).collect()
}
