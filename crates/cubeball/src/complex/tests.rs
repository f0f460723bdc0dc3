use super::*;
use crate::geom::Dir3;
use nalgebra::Vector3;

#[test]
fn seed_cube_has_six_boundary_faces_with_orthogonal_neighbours() {
    let ball = Ball::new();
    assert_eq!(ball.volume(), 1);
    assert_eq!(ball.face_count(), 6);
    assert_eq!(ball.boundary_len(), 6);
    let cube = ball.cube_by_id(0);
    for dir in Dir3::AXES {
        let f = ball.cube(cube).face(dir).expect("seed face");
        let face = ball.face(f);
        assert!(face.is_boundary());
        assert_eq!(face.outward(), dir);
        assert_eq!(face.sole_cube(), Some(cube));
        assert_eq!(face.cube(-dir), Some(cube));
        for o in dir.orthogonal() {
            assert_eq!(face.adjacent(o), ball.cube(cube).face(o));
        }
        assert_eq!(face.adjacent(dir), None);
        assert_eq!(face.adjacent(-dir), None);
    }
    ball.assert_consistent();
}

#[test]
fn registry_bids_match_positions() {
    let ball = Ball::new();
    for bid in 0..ball.boundary_len() {
        assert_eq!(ball.face(ball.boundary_face(bid)).bid(), Some(bid));
    }
}

#[test]
fn start_blocks_have_six_n_squared_boundary_faces() {
    for n in 1..=4usize {
        let ball = Ball::with_start_size(n);
        assert_eq!(ball.volume(), n * n * n);
        assert_eq!(ball.boundary_len(), 6 * n * n);
        assert_eq!(ball.face_count(), 3 * n * n * (n + 1));
        ball.assert_consistent();
    }
}

#[test]
fn start_block_ids_follow_row_order() {
    let n = 3;
    let ball = Ball::with_start_size(n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let key = ball.cube_by_id(z * n * n + y * n + x);
                assert_eq!(
                    ball.cube(key).coord(),
                    Vector3::new(x as i32, y as i32, z as i32)
                );
            }
        }
    }
}

#[test]
fn boundary_cube_detection() {
    let ball = Ball::with_start_size(3);
    let centre = ball.cube_by_id(13);
    assert!(!ball.is_boundary_cube(centre));
    assert!(ball.is_boundary_cube(ball.cube_by_id(0)));
}

#[test]
fn remove_and_restore_keeps_registry_compact() {
    let mut ball = Ball::new();
    let first = ball.boundary_face(0);
    let last = ball.boundary_face(5);
    ball.remove_face_boundary(first);
    assert_eq!(ball.boundary_len(), 5);
    assert_eq!(ball.face(first).bid(), None);
    assert_eq!(ball.face(first).adjacent_faces().count(), 0);
    // the last entry fills the hole
    assert_eq!(ball.boundary_face(0), last);
    assert_eq!(ball.face(last).bid(), Some(0));

    ball.restore_face_boundary(first, Dir3::PX);
    assert_eq!(ball.face(first).bid(), Some(5));
    assert_eq!(ball.face(first).outward(), Dir3::PX);
}

#[test]
fn checker_flags_asymmetric_neighbours() {
    let mut ball = Ball::with_start_size(2);
    let a = ball.cube_by_id(0);
    ball.cubes.get_mut(a).unset_neighbor(Dir3::PX);
    assert!(matches!(
        ball.check_consistency(),
        Err(ConsistencyError::AsymmetricNeighbor { .. })
    ));
}

#[test]
fn checker_flags_broken_face_adjacency() {
    let mut ball = Ball::new();
    let f = ball.boundary_face(0);
    // the -x face is not adjacent to the +x face
    let wrong = ball.boundary_face(3);
    let d = ball.face(f).outward();
    let o = d.orthogonal()[0];
    ball.faces.get_mut(f).set_adjacent(o, wrong);
    let err = ball.check_consistency().unwrap_err();
    assert!(
        matches!(err, ConsistencyError::BrokenBackReference { .. }),
        "unexpected {err}"
    );
    assert!(err.to_string().contains("in direction y)"), "{err}");
}

#[test]
fn checker_flags_registry_drift() {
    let mut ball = Ball::new();
    let f = ball.boundary_face(2);
    ball.faces.get_mut(f).bid = Some(4);
    assert_eq!(
        ball.check_consistency(),
        Err(ConsistencyError::RegistryMismatch {
            bid: 2,
            face: ball.face(f).id()
        })
    );
}

#[test]
#[should_panic(expected = "inconsistent complex")]
fn assert_consistent_panics_with_message() {
    let mut ball = Ball::new();
    let f = ball.boundary_face(0);
    ball.faces.get_mut(f).clear_adjacent();
    ball.assert_consistent();
}

#[test]
#[should_panic(expected = "already borders two cubes")]
fn third_cube_on_a_face_panics() {
    let mut ball = Ball::new();
    let a = ball.create_cube(Vector3::zeros());
    let b = ball.create_cube(Vector3::zeros());
    let c = ball.create_cube(Vector3::zeros());
    let f = ball.create_face();
    let face = ball.faces.get_mut(f);
    face.set_cube(Dir3::PX, a);
    face.set_cube(Dir3::MX, b);
    face.set_cube(Dir3::PY, c);
}

#[test]
#[should_panic(expected = "already has a neighbour")]
fn occupied_neighbour_slot_panics() {
    let mut ball = Ball::new();
    let a = ball.cube_by_id(0);
    let b = ball.create_cube(Vector3::new(1, 0, 0));
    let c = ball.create_cube(Vector3::new(1, 0, 0));
    ball.link_cubes(a, b, Dir3::PX);
    ball.link_cubes(a, c, Dir3::PX);
}

#[test]
fn second_cube_makes_face_interior() {
    let mut ball = Ball::new();
    let a = ball.create_cube(Vector3::zeros());
    let b = ball.create_cube(Vector3::zeros());
    let f = ball.create_face();
    ball.faces.get_mut(f).set_outward(Dir3::PZ);
    ball.faces.get_mut(f).set_cube(Dir3::MZ, a);
    assert!(ball.face(f).is_boundary());
    ball.faces.get_mut(f).set_cube(Dir3::PZ, b);
    assert!(!ball.face(f).is_boundary());
    assert!(ball.face(f).outward().is_zero());
    ball.faces.get_mut(f).unset_cube(Dir3::PZ);
    assert!(ball.face(f).is_boundary());
    assert_eq!(ball.face(f).cube_count(), 1);
}

#[test]
#[should_panic(expected = "cannot hold a single cube")]
fn tiny_capacity_is_rejected() {
    let _ = Ball::with_capacity(3);
}
