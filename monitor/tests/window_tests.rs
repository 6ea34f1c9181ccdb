use proptest::prelude::*;
use pulsemon::WindowBuffer;

#[test]
fn window_bound_holds_after_overflow() {
    let buffer = WindowBuffer::new(50);
    for i in 0..73 {
        buffer.push("hr", i as f64);
    }
    let snap = buffer.snapshot("hr");
    assert_eq!(snap.len(), 50);
    let expected: Vec<f64> = (23..73).map(|i| i as f64).collect();
    assert_eq!(snap, expected);
}

#[test]
fn windows_are_independent_per_metric() {
    let buffer = WindowBuffer::new(3);
    buffer.push("hr", 70.0);
    buffer.push("chol", 200.0);
    buffer.push("hr", 72.0);
    assert_eq!(buffer.snapshot("hr"), vec![70.0, 72.0]);
    assert_eq!(buffer.snapshot("chol"), vec![200.0]);
}

#[test]
fn capacity_one_keeps_only_latest() {
    let buffer = WindowBuffer::new(1);
    buffer.push("hr", 1.0);
    buffer.push("hr", 2.0);
    buffer.push("hr", 3.0);
    assert_eq!(buffer.snapshot("hr"), vec![3.0]);
}

proptest! {
    /// After any sequence of pushes the snapshot is exactly the last
    /// `capacity` values in push order.
    #[test]
    fn snapshot_equals_suffix_of_pushes(
        values in proptest::collection::vec(-1000.0f64..1000.0, 0..200),
        capacity in 1usize..64,
    ) {
        let buffer = WindowBuffer::new(capacity);
        for &v in &values {
            buffer.push("m", v);
        }
        let start = values.len().saturating_sub(capacity);
        prop_assert_eq!(buffer.snapshot("m"), values[start..].to_vec());
        prop_assert!(buffer.len("m") <= capacity);
    }
}
