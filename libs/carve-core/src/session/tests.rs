//! # Session Tests
//!
//! End-to-end scenarios through the public session surface.

use super::*;
use crate::geometry::orient2d;
use glam::DVec2;

fn session(kind: LatticeKind, mode: SelectionMode, grid_size: usize) -> CarveSession {
    CarveSession::new(SessionConfig {
        grid_size,
        kind,
        mode,
    })
    .unwrap()
}

/// Picks in lattice coordinates.
struct LatticePicker<'a>(&'a Lattice);

impl Picker for LatticePicker<'_> {
    fn pick_cell(&self, x: f64, y: f64) -> Option<usize> {
        let p = DVec2::new(x, y);
        self.0.cells().iter().find_map(|cell| {
            let [a, b, c] = cell.points.map(|id| self.0.points()[id].position.truncate());
            let inside = orient2d(a, b, p) > 0.0 && orient2d(b, c, p) > 0.0 && orient2d(c, a, p) > 0.0;
            inside.then_some(cell.id)
        })
    }

    fn pick_point(&self, x: f64, y: f64) -> Option<usize> {
        let p = DVec2::new(x, y);
        self.0
            .points()
            .iter()
            .find(|lp| lp.position.truncate().distance(p) < 0.2)
            .map(|lp| lp.id)
    }
}

/// Anchor of quad (1, 1) on a 4x4 grid.
const CENTER: PointId = 20;

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_quad_single_anchor_scenario() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    assert_eq!(s.lattice().base_count(), 16);
    assert_eq!(s.lattice().anchor_count(), 9);

    assert!(s.select(CENTER, false).unwrap());
    assert_eq!(s.selection().active_cell_count(), 4);

    s.apply_pattern(CENTER, 5).unwrap();
    assert_eq!(s.selection().active_cell_count(), 1);
    let slots = s.lattice().adjacency(CENTER).unwrap();
    assert_eq!(s.selection().active_cells(), vec![slots[3]]);
}

#[test]
fn test_hex_pair_counts_cells_once() {
    let mut s = session(LatticeKind::Hex, SelectionMode::Cell, 2);
    let anchors: Vec<PointId> = s.lattice().anchor_ids().collect();
    assert_eq!(anchors.len(), 2);

    for &a in &anchors {
        s.select(a, false).unwrap();
    }
    let active = s.selection().active_cells();
    let mut union: Vec<usize> = anchors
        .iter()
        .flat_map(|&a| s.lattice().adjacency(a).unwrap().to_vec())
        .collect();
    union.sort_unstable();
    union.dedup();
    assert_eq!(active, union);
}

#[test]
fn test_point_mode_scenario() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Point, 4);
    for p in [4, 1, 11, 14] {
        s.select(p, false).unwrap();
    }

    let ExportArtifact::Enclosed(result) = s.export().unwrap() else {
        panic!("point mode exports an enclosed triangulation");
    };
    assert_eq!(result.enclosed, vec![5, 10]);
    assert_eq!(result.boundary, vec![4, 1, 11, 14]);
    assert_eq!(result.mesh.vertex_count(), 6);
}

#[test]
fn test_point_mode_too_few_points() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Point, 4);
    s.select(4, false).unwrap();
    s.select(1, false).unwrap();
    assert!(matches!(s.export(), Err(CarveError::NoSelection { .. })));
    assert_eq!(s.selection().boundary_points(), &[4, 1]);
}

#[test]
fn test_cell_mode_empty_export() {
    let s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    assert!(matches!(s.export(), Err(CarveError::NoSelection { .. })));
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn test_select_round_trip_restores_state() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 5);
    let anchors: Vec<PointId> = s.lattice().anchor_ids().collect();
    s.select(anchors[0], false).unwrap();
    let before = s.selection().active_cells();

    for &a in &anchors[1..] {
        s.select(a, false).unwrap();
        s.select(a, true).unwrap();
        assert_eq!(s.selection().active_cells(), before);
    }
}

#[test]
fn test_pattern_codes_are_periodic() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    s.select(CENTER, false).unwrap();
    for code in 0..9_i64 {
        s.apply_pattern(CENTER, code).unwrap();
        let expected = s.selection().active_cells();
        for k in [-2_i64, -1, 1, 3] {
            s.apply_pattern(CENTER, code + 9 * k).unwrap();
            assert_eq!(s.selection().active_cells(), expected);
        }
    }
}

#[test]
fn test_export_faces_have_three_or_four_vertices() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    for a in s.lattice().anchor_ids().collect::<Vec<_>>() {
        s.select(a, false).unwrap();
        s.apply_pattern(a, a as i64).unwrap();
    }
    let artifact = s.export().unwrap();
    assert!(artifact.warnings().is_empty());
    for face in artifact.mesh().faces() {
        assert!((3..=4).contains(&face.arity()));
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn test_init_lattice_discards_selection() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    s.select(CENTER, false).unwrap();

    s.init_lattice(LatticeKind::Hex).unwrap();
    assert_eq!(s.kind(), LatticeKind::Hex);
    assert_eq!(s.selection().kind(), LatticeKind::Hex);
    assert!(s.selection().is_empty());
    assert!(matches!(s.export(), Err(CarveError::NoSelection { .. })));
}

#[test]
fn test_init_mode_discards_selection() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    s.select(CENTER, false).unwrap();
    s.init_mode(SelectionMode::Point);
    assert_eq!(s.mode(), SelectionMode::Point);
    assert!(s.selection().is_empty());
}

#[test]
fn test_invalid_grid_size() {
    let result = CarveSession::new(SessionConfig {
        grid_size: 1,
        ..SessionConfig::default()
    });
    assert!(matches!(result, Err(CarveError::InvalidConfig(_))));
}

#[test]
fn test_context_pattern_flow() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    assert_eq!(s.context_candidate_count(CENTER), 0);
    s.select(CENTER, false).unwrap();
    assert_eq!(s.context_candidate_count(CENTER), 9);
    assert!(s.apply_context_pattern(5).unwrap());
    assert_eq!(s.selection().active_cell_count(), 1);
}

#[test]
fn test_save_writes_export() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    s.select(CENTER, false).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cut.obj");
    s.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 1);
    assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 25);
}

#[test]
fn test_lattice_mesh_covers_every_cell() {
    let s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    let mesh = s.lattice_mesh();
    assert_eq!(mesh.face_count(), 36);
    assert_eq!(mesh.vertex_count(), 25);
}

#[test]
fn test_config_serde() {
    let config: SessionConfig =
        serde_json::from_str(r#"{"grid_size": 6, "kind": "hex", "mode": "point"}"#).unwrap();
    assert_eq!(config.kind, LatticeKind::Hex);
    assert_eq!(config.mode, SelectionMode::Point);

    let json = serde_json::to_string(&SessionConfig::default()).unwrap();
    assert!(json.contains("\"quad\""));
    assert!(json.contains("\"cell\""));
}

#[test]
fn test_mode_name_matches_serde() {
    for mode in [SelectionMode::Cell, SelectionMode::Point] {
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{}\"", mode.name()));
    }
}

// =============================================================================
// POINTER INTERACTION
// =============================================================================

#[test]
fn test_left_press_selects_anchor_of_picked_cell() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    let lattice = s.lattice().clone();
    let picker = LatticePicker(&lattice);

    let outcome = s
        .pointer_press(&picker, PointerButton::Left, 1.5, 1.2, Modifiers::default())
        .unwrap();
    assert_eq!(outcome, PointerOutcome::Selected(1));
    assert!(s.selection().is_selected(CENTER));
    assert!(s.is_dragging());

    // Dragging into the neighbouring quad extends the selection
    let outcome = s.pointer_move(&picker, 2.5, 1.2).unwrap();
    assert_eq!(outcome, PointerOutcome::Selected(1));
    assert!(s.selection().is_selected(CENTER + 1));

    s.pointer_release(PointerButton::Left);
    assert!(!s.is_dragging());
    assert_eq!(s.pointer_move(&picker, 0.5, 0.2).unwrap(), PointerOutcome::Ignored);
}

#[test]
fn test_control_press_removes() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    let lattice = s.lattice().clone();
    let picker = LatticePicker(&lattice);
    s.select(CENTER, false).unwrap();

    let control = Modifiers {
        control: true,
        ..Modifiers::default()
    };
    s.pointer_press(&picker, PointerButton::Left, 1.5, 1.2, control)
        .unwrap();
    assert!(!s.selection().is_selected(CENTER));
}

#[test]
fn test_shift_press_is_left_to_host() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    let lattice = s.lattice().clone();
    let picker = LatticePicker(&lattice);
    let shift = Modifiers {
        shift: true,
        ..Modifiers::default()
    };
    let outcome = s
        .pointer_press(&picker, PointerButton::Left, 1.5, 1.2, shift)
        .unwrap();
    assert_eq!(outcome, PointerOutcome::Ignored);
    assert!(s.selection().is_empty());
}

#[test]
fn test_press_outside_lattice_starts_drag() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    let lattice = s.lattice().clone();
    let picker = LatticePicker(&lattice);
    let outcome = s
        .pointer_press(&picker, PointerButton::Left, -5.0, -5.0, Modifiers::default())
        .unwrap();
    assert_eq!(outcome, PointerOutcome::Missed);
    assert!(s.is_dragging());
    assert!(s.selection().is_empty());

    // Dragging onto the lattice selects as if the press had landed there
    let outcome = s.pointer_move(&picker, 1.5, 1.2).unwrap();
    assert_eq!(outcome, PointerOutcome::Selected(1));
    assert!(s.selection().is_selected(CENTER));

    s.pointer_release(PointerButton::Left);
    assert!(!s.is_dragging());
}

#[test]
fn test_right_press_opens_context_menu() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Cell, 4);
    let lattice = s.lattice().clone();
    let picker = LatticePicker(&lattice);
    s.select(CENTER, false).unwrap();

    let outcome = s
        .pointer_press(&picker, PointerButton::Right, 1.5, 1.2, Modifiers::default())
        .unwrap();
    assert_eq!(
        outcome,
        PointerOutcome::ContextMenu {
            point: CENTER,
            candidates: 9
        }
    );
    s.apply_context_pattern(1).unwrap();
    assert_eq!(s.selection().active_cell_count(), 2);
}

#[test]
fn test_point_mode_press_builds_boundary() {
    let mut s = session(LatticeKind::Quad, SelectionMode::Point, 4);
    let lattice = s.lattice().clone();
    let picker = LatticePicker(&lattice);

    for (x, y) in [(0.0, 1.0), (1.0, 0.0), (3.0, 2.0), (2.0, 3.0)] {
        let outcome = s
            .pointer_press(&picker, PointerButton::Left, x, y, Modifiers::default())
            .unwrap();
        assert_eq!(outcome, PointerOutcome::Selected(1));
        s.pointer_release(PointerButton::Left);
    }
    assert_eq!(s.selection().boundary_points(), &[4, 1, 11, 14]);
    assert!(!s.is_dragging());
}
