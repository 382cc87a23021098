use viewer::emphasis::{style_for, BASELINE, EMPHASIZED};

#[test]
fn exactly_one_trajectory_boosted() {
    let selected = Some(2);
    for i in 0..5 {
        let s = style_for(i, selected);
        if i == 2 {
            assert_eq!(s, EMPHASIZED);
        } else {
            assert_eq!(s, BASELINE);
        }
    }
}

#[test]
fn clearing_selection_restores_uniform_baseline() {
    for i in 0..5 {
        assert_eq!(style_for(i, None), BASELINE);
    }
}

#[test]
fn reapplying_same_selection_is_idempotent() {
    let a = style_for(3, Some(3));
    let b = style_for(3, Some(3));
    assert_eq!(a, b);
    assert_eq!(style_for(1, Some(3)), style_for(1, Some(3)));
}

#[test]
fn emphasis_weights_exceed_baseline() {
    assert!(EMPHASIZED.opacity > BASELINE.opacity);
    assert!(EMPHASIZED.width_px > BASELINE.width_px);
    assert!(BASELINE.opacity > 0.0 && BASELINE.opacity <= 1.0);
    assert!(EMPHASIZED.opacity <= 1.0);
}
