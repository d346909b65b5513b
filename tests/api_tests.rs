mod common;

use approx::assert_relative_eq;
use common::{bilinear, quadratic, x_squared_plus_x_plus_one};
use jaxlet::{
    derivative_at, differentiate, evaluate, from_fn, jvp, mul, optimize, replay, trace, Value,
};

// ── evaluate ──

#[test]
fn evaluate_quadratic() {
    assert_relative_eq!(evaluate(&quadratic, &[2.0]).unwrap(), 9.0);
    assert_relative_eq!(evaluate(&quadratic, &[-1.0]).unwrap(), 0.0);
}

#[test]
fn evaluate_closure() {
    let y = 5.0;
    let scale = from_fn(move |cx, x| cx.interpret(mul(&x[0], y)));
    assert_relative_eq!(evaluate(&scale, &[3.0]).unwrap(), 15.0);
}

#[test]
fn evaluate_rejects_symbolic_completion() {
    let t = trace(&quadratic, 1).unwrap();
    let leak = from_fn(|_cx, _x| Ok(Value::Reg(t.params()[0])));
    assert!(evaluate(&leak, &[1.0]).is_err());
}

// ── differentiate ──

#[test]
fn differentiate_matches_derivative_at() {
    for x in [-2.0, 0.5, 4.0] {
        assert_relative_eq!(
            differentiate(&x_squared_plus_x_plus_one, &[x], &[1.0]).unwrap(),
            derivative_at(&x_squared_plus_x_plus_one, x).unwrap()
        );
    }
    assert_relative_eq!(derivative_at(&x_squared_plus_x_plus_one, 3.0).unwrap(), 7.0);
}

#[test]
fn differentiate_scales_with_tangent() {
    assert_relative_eq!(differentiate(&quadratic, &[2.0], &[0.5]).unwrap(), 3.0);
    assert_relative_eq!(differentiate(&bilinear, &[1.0, 1.0], &[1.0, 1.0]).unwrap(), 3.0);
}

// ── trace / replay / optimize ──

#[test]
fn end_to_end_pipeline() {
    let d2 = trace(&jvp(&jvp(&quadratic, [1.0]), [1.0]), 1).unwrap();
    let small = optimize(&d2, 4).unwrap().dead_code_elimination();
    assert_eq!(small.num_equations(), 1);
    let bound = replay(&small, [123.0]).unwrap();
    assert_relative_eq!(evaluate(&bound, &[]).unwrap(), 2.0);
}
