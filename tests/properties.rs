use lifegrid::patterns::{self, GLIDER};
use lifegrid::{Coord, EdgePolicy, LifeError, Universe};
use pretty_assertions::assert_eq;

fn snapshot(u: &Universe) -> Vec<u8> {
    u.cells().to_vec()
}

#[test]
fn clear_then_tick_stays_empty() {
    for (w, h) in [(1, 1), (2, 3), (7, 5), (64, 64)] {
        let mut u = Universe::random(w, h, Some(11));
        u.clear();
        u.tick();
        assert_eq!(u.live_count(), 0, "{w}x{h}");
    }
}

#[test]
fn clear_is_idempotent() {
    let mut u = Universe::random(9, 9, Some(2));
    u.clear();
    let once = snapshot(&u);
    u.clear();
    assert_eq!(snapshot(&u), once);
}

#[test]
fn toggle_twice_is_identity() {
    let mut u = Universe::random(13, 7, Some(5));
    let before = snapshot(&u);
    for row in 0..7 {
        for col in 0..13 {
            let c = Coord::new(col, row);
            u.toggle_cell(c).unwrap();
            u.toggle_cell(c).unwrap();
        }
    }
    assert_eq!(snapshot(&u), before);
}

#[test]
fn tick_is_deterministic() {
    let mut a = Universe::random(40, 30, Some(77));
    let mut b = a.clone();
    for _ in 0..10 {
        a.tick();
        b.tick();
        assert_eq!(snapshot(&a), snapshot(&b));
    }
}

#[test]
fn isolated_cell_dies() {
    let mut u = Universe::new(10, 10);
    u.toggle_cell(Coord::new(4, 4)).unwrap();
    u.tick();
    assert_eq!(u.live_count(), 0);
}

#[test]
fn isolated_cell_dies_on_one_cell_wide_strips() {
    for (w, h, c) in [(5, 1, Coord::new(2, 0)), (1, 5, Coord::new(0, 2)), (1, 1, Coord::new(0, 0))] {
        let mut u = Universe::new(w, h);
        u.toggle_cell(c).unwrap();
        u.tick();
        assert_eq!(u.live_count(), 0, "{w}x{h}");
    }
}

#[test]
fn block_is_still_life() {
    let mut u = Universe::new(10, 10);
    patterns::find("block").unwrap().stamp(&mut u, 4, 4).unwrap();
    let before = snapshot(&u);
    for _ in 0..5 {
        u.tick();
        assert_eq!(snapshot(&u), before);
    }
}

#[test]
fn block_across_corner_is_still_life_on_torus() {
    let mut u = Universe::new(6, 6);
    u.set_cells_by_coords(&[5, 5, 0, 5, 5, 0, 0, 0]).unwrap();
    let before = snapshot(&u);
    u.tick();
    assert_eq!(snapshot(&u), before);

    let mut u = Universe::with_edges(6, 6, EdgePolicy::Dead);
    u.set_cells_by_coords(&[5, 5, 0, 5, 5, 0, 0, 0]).unwrap();
    u.tick();
    assert_eq!(u.live_count(), 0);
}

#[test]
fn glider_moves_one_cell_diagonally_every_four_ticks() {
    let mut u = Universe::new(20, 20);
    GLIDER.stamp(&mut u, 5, 5).unwrap();
    for _ in 0..4 {
        u.tick();
    }
    let mut expected = Universe::new(20, 20);
    GLIDER.stamp(&mut expected, 6, 6).unwrap();
    assert_eq!(snapshot(&u), snapshot(&expected));
    assert_eq!(u.generation(), 4);
}

#[test]
fn glider_wraps_around_the_torus() {
    // A glider on an 8x8 torus returns home after 8 * 4 ticks.
    let mut u = Universe::new(8, 8);
    GLIDER.stamp(&mut u, 2, 2).unwrap();
    let start = snapshot(&u);
    for _ in 0..32 {
        u.tick();
    }
    assert_eq!(snapshot(&u), start);
}

#[test]
fn odd_length_list_is_malformed() {
    let mut u = Universe::random(8, 8, Some(9));
    let before = snapshot(&u);
    assert_eq!(
        u.set_cells_by_coords(&[0, 1, 2]),
        Err(LifeError::MalformedInput { len: 3 })
    );
    assert_eq!(snapshot(&u), before);
}

#[test]
fn out_of_range_pair_applies_nothing() {
    let mut u = Universe::new(8, 6);
    let err = u.set_cells_by_coords(&[0, 0, 1, 1, 2, 2, 8, 0]).unwrap_err();
    assert_eq!(
        err,
        LifeError::InvalidCoordinate {
            column: 8,
            row: 0,
            width: 8,
            height: 6
        }
    );
    assert_eq!(u.live_count(), 0);

    assert!(u.set_cells_by_coords(&[3, 3, 0, 6]).is_err());
    assert_eq!(u.live_count(), 0);
}

#[test]
fn empty_list_is_accepted() {
    let mut u = Universe::new(4, 4);
    u.set_cells_by_coords(&[]).unwrap();
    assert_eq!(u.live_count(), 0);
}

#[test]
fn seeded_randomize_is_reproducible() {
    let mut a = Universe::new(32, 32);
    let mut b = Universe::new(32, 32);
    a.randomize_state(Some(2024));
    b.randomize_state(Some(2024));
    assert_eq!(snapshot(&a), snapshot(&b));

    b.randomize_state(Some(2025));
    assert_ne!(snapshot(&a), snapshot(&b));
}

#[test]
fn unseeded_randomize_varies() {
    let mut u = Universe::new(32, 32);
    u.randomize_state(None);
    let first = snapshot(&u);
    let differs = (0..10).any(|_| {
        u.randomize_state(None);
        snapshot(&u) != first
    });
    assert!(differs);
}

#[test]
fn packed_view_layout() {
    let mut u = Universe::new(5, 5);
    u.toggle_cell(Coord::new(3, 2)).unwrap();
    let cells = u.cells();
    assert_eq!(cells.as_bytes().len(), 4);
    // n = 2 * 5 + 3 = 13 -> byte 1, bit 5
    assert_eq!(cells.as_bytes(), &[0, 1 << 5, 0, 0]);
    let n = 13;
    assert_eq!(cells.get(n as u32 / 5, n as u32 % 5), Some(true));
}
