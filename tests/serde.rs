#![cfg(feature = "serde")]

mod common;

use common::{quadratic, select};
use jaxlet::{evaluate, jvp, optimize, trace, OpCode, Trace};

#[test]
fn roundtrip_trace_json() {
    let t = trace(&jvp(&quadratic, [1.0]), 1).unwrap();

    let json = serde_json::to_string(&t).unwrap();
    let t2: Trace = serde_json::from_str(&json).unwrap();

    assert_eq!(t2, t);
    assert_eq!(t2.to_string(), t.to_string());
    for x in [-2.0, 0.0, 3.5] {
        assert_eq!(evaluate(&t2, &[x]).unwrap(), evaluate(&t, &[x]).unwrap());
    }
}

#[test]
fn roundtrip_optimized_trace() {
    let t = optimize(&trace(&select, 2).unwrap(), 2).unwrap();
    let json = serde_json::to_string_pretty(&t).unwrap();
    let t2: Trace = serde_json::from_str(&json).unwrap();
    t2.validate().unwrap();
    assert_eq!(evaluate(&t2, &[1.0, 3.0]).unwrap(), 9.0);
    assert_eq!(evaluate(&t2, &[0.0, 3.0]).unwrap(), 4.0);
}

#[test]
fn opcodes_serialize_by_name() {
    assert_eq!(serde_json::to_string(&OpCode::Iif).unwrap(), "\"iif\"");
    let op: OpCode = serde_json::from_str("\"mul\"").unwrap();
    assert_eq!(op, OpCode::Mul);
}
