use super::*;
use proptest::prelude::*;

#[test]
fn axis_index_roundtrip_and_order() {
    for (i, d) in Dir3::AXES.iter().enumerate() {
        assert_eq!(d.axis_index(), i);
        assert_eq!(Dir3::from_axis_index(i), *d);
        assert!(d.is_axis_aligned());
    }
    // Opposite axes are three slots apart.
    for d in Dir3::AXES {
        assert_eq!((-d).axis_index(), (d.axis_index() + 3) % 6);
    }
}

#[test]
fn neighbor_index_covers_block_without_center() {
    let mut seen = [false; NEIGHBOR_SLOTS];
    for d in Dir3::neighbor_offsets() {
        let i = d.neighbor_index();
        assert!(!seen[i]);
        seen[i] = true;
        assert_eq!(Dir3::from_neighbor_index(i), d);
    }
    assert_eq!(seen.iter().filter(|&&s| s).count(), 26);
    assert!(!seen[CENTER_SLOT]);
}

#[test]
fn orthogonal_is_cyclic_and_planar() {
    for d in Dir3::AXES {
        let o = d.orthogonal();
        for i in 0..4 {
            assert_eq!(o[i].dot(d), 0);
            assert_eq!(o[(i + 2) % 4], -o[i]);
            // consecutive directions are perpendicular, so o[i]+o[i+1] is a corner offset
            assert_eq!(o[i].dot(o[(i + 1) % 4]), 0);
            assert!((o[i] + o[(i + 1) % 4] + d).is_neighbor_offset());
        }
        assert_eq!(d.orthogonal(), (-d).orthogonal());
    }
}

#[test]
#[should_panic(expected = "axis direction required")]
fn axis_index_rejects_diagonal() {
    let _ = Dir3::new(1, 1, 0).axis_index();
}

#[test]
#[should_panic(expected = "orthogonal() needs an axis direction")]
fn orthogonal_rejects_zero() {
    let _ = Dir3::ZERO.orthogonal();
}

#[test]
#[should_panic(expected = "neighbour offset required")]
fn neighbor_index_rejects_zero() {
    let _ = Dir3::ZERO.neighbor_index();
}

#[test]
fn labels() {
    assert_eq!(Dir3::PX.label(), "x");
    assert_eq!(Dir3::MZ.label(), "-z");
    assert_eq!(Dir3::ZERO.label(), "0");
    assert_eq!(Dir3::new(1, 1, 0).label(), "0");
}

proptest! {
    #[test]
    fn arithmetic_is_componentwise(a in -1i32..=1, b in -1i32..=1, c in -1i32..=1, k in -3i32..=3) {
        let d = Dir3::new(a, b, c);
        prop_assert_eq!(d + (-d), Dir3::ZERO);
        prop_assert_eq!(d - d, Dir3::ZERO);
        prop_assert_eq!(d * k, Dir3::new(a * k, b * k, c * k));
        if !d.is_zero() {
            prop_assert_eq!(Dir3::from_neighbor_index(d.neighbor_index()), d);
        }
    }
}
