use engine::dive::{DataShapeError, Dive, DiveStore, PathPoint};

fn dive(id: u32, len: usize) -> Dive {
    Dive {
        id,
        path: (0..len)
            .map(|i| PathPoint { x: i as f32, depth: i as f32 * 0.5, z: 0.0 })
            .collect(),
        twistiness: vec![0.5; len],
        max_depth_m: 0.0,
        duration_s: 0.0,
        start_time: String::new(),
    }
}

#[test]
fn malformed_dive_is_dropped_and_named() {
    // Load 3 dives with path lengths 10, 0, and 5: the empty one is
    // rejected, the other two survive, and the drop record carries its id.
    let store = DiveStore::from_records(vec![dive(1, 10), dive(2, 0), dive(3, 5)]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.dives()[0].id, 1);
    assert_eq!(store.dives()[1].id, 3);
    assert_eq!(store.dropped().len(), 1);
    assert_eq!(store.dropped()[0].0, 2);
    assert_eq!(store.dropped()[0].1, DataShapeError::PathTooShort { id: 2, len: 0 });
}

#[test]
fn mismatched_twistiness_is_dropped() {
    let mut bad = dive(4, 6);
    bad.twistiness.pop();
    let store = DiveStore::from_records(vec![dive(1, 4), bad]);
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.dropped()[0].1,
        DataShapeError::LengthMismatch { id: 4, path_len: 6, twist_len: 5 }
    );
}

#[test]
fn empty_input_yields_empty_store() {
    let store = DiveStore::from_records(Vec::new());
    assert!(store.is_empty());
    assert!(store.dropped().is_empty());
}

#[test]
fn validation_is_not_clamping() {
    // A dive that validates keeps its full arrays untouched.
    let store = DiveStore::from_records(vec![dive(9, 12)]);
    assert_eq!(store.dives()[0].path.len(), 12);
    assert_eq!(store.dives()[0].twistiness.len(), 12);
}
