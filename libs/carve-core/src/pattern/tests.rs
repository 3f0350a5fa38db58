//! # Pattern Table Tests

use super::*;

#[test]
fn test_code_zero_excludes_nothing() {
    for kind in [LatticeKind::Quad, LatticeKind::Hex] {
        assert!(PatternTable::excluded(kind, PatternCode::FULL).is_empty());
    }
}

#[test]
fn test_quad_table_entries() {
    let expect = |code: i64, slots: &[usize]| {
        let code = PatternCode::wrap(LatticeKind::Quad, code);
        assert_eq!(PatternTable::excluded(LatticeKind::Quad, code), slots);
    };
    expect(1, &[0, 1]);
    expect(4, &[1, 3]);
    expect(5, &[0, 1, 2]);
    expect(8, &[0, 1, 3]);
}

#[test]
fn test_hex_table_entries() {
    let expect = |code: i64, slots: &[usize]| {
        let code = PatternCode::wrap(LatticeKind::Hex, code);
        assert_eq!(PatternTable::excluded(LatticeKind::Hex, code), slots);
    };
    expect(1, &[0, 2, 4]);
    expect(10, &[0, 1, 3, 5]);
    expect(13, &[0, 2, 3, 4, 5]);
    expect(18, &[1, 2, 3, 4, 5]);
}

#[test]
fn test_every_code_keeps_at_least_one_slot() {
    for kind in [LatticeKind::Quad, LatticeKind::Hex] {
        for code in 0..kind.pattern_count() as i64 {
            let code = PatternCode::wrap(kind, code);
            let excluded = PatternTable::excluded(kind, code);
            assert!(excluded.len() < kind.slot_count());
            assert!(excluded.iter().all(|&s| s < kind.slot_count()));
        }
    }
}

#[test]
fn test_active_cells_removes_exactly_excluded() {
    let adjacency = [40, 41, 42, 43];
    for code in 1..9 {
        let code = PatternCode::wrap(LatticeKind::Quad, code);
        let active = PatternTable::active_cells(LatticeKind::Quad, code, &adjacency);
        let excluded = PatternTable::excluded(LatticeKind::Quad, code);
        assert_eq!(active.len(), 4 - excluded.len());
        for &slot in excluded {
            assert!(!active.contains(&adjacency[slot]));
        }
    }
}

#[test]
fn test_wrap_is_periodic() {
    for k in -3..4 {
        for code in 0..9 {
            assert_eq!(
                PatternCode::wrap(LatticeKind::Quad, code + 9 * k),
                PatternCode::wrap(LatticeKind::Quad, code)
            );
        }
    }
    assert_eq!(PatternCode::wrap(LatticeKind::Hex, -20).value(), 18);
}

#[test]
fn test_triangle_flips_are_quad_only() {
    let quad = |c| PatternCode::wrap(LatticeKind::Quad, c);
    assert!(PatternTable::flips_triangle(LatticeKind::Quad, quad(3)));
    assert!(PatternTable::flips_triangle(LatticeKind::Quad, quad(7)));
    assert!(!PatternTable::flips_triangle(LatticeKind::Quad, quad(5)));
    let hex = PatternCode::wrap(LatticeKind::Hex, 3);
    assert!(!PatternTable::flips_triangle(LatticeKind::Hex, hex));
}
