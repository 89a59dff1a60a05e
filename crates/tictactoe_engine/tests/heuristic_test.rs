//! Behaviour of the computer opponent on hand-built boards.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use tictactoe_engine::heuristic::decide;
use tictactoe_engine::{Cell, Mark, Position, Rule, select_move};

fn board(x: &[usize], o: &[usize]) -> [Cell; 9] {
    let mut cells = [Cell::Empty; 9];
    for &i in x {
        cells[i] = Cell::Occupied(Mark::X);
    }
    for &i in o {
        cells[i] = Cell::Occupied(Mark::O);
    }
    cells
}

#[test]
fn test_empty_board_always_center() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(
            select_move(&[Cell::Empty; 9], Mark::O, &mut rng),
            Some(Position::Center)
        );
    }
}

#[test]
fn test_win_dominates_block() {
    // O: 6, 7 (bottom row open at 8). X: 0, 1 (top row open at 2).
    let cells = board(&[0, 1, 4], &[6, 7]);
    let mut rng = StdRng::seed_from_u64(0);
    let decision = decide(&cells, Mark::O, &mut rng).unwrap();
    assert_eq!(decision.position, Position::BottomRight);
    assert_eq!(decision.rule, Rule::Win);
}

#[test]
fn test_selects_gap_in_any_line() {
    // Each line in turn holds two O marks and one gap.
    for line in tictactoe_engine::Line::ALL {
        let [a, b, c] = line.indices();
        let cells = board(&[], &[a, b]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            select_move(&cells, Mark::O, &mut rng),
            Position::from_index(c),
            "line {line}"
        );
    }
}

#[test]
fn test_edges_only_board_over_many_trials() {
    // Center and all corners taken, no open threats: X O X / . X . / O X O
    let cells = board(&[0, 2, 4, 7], &[1, 6, 8]);
    let open_edges: HashSet<Position> = [Position::MiddleLeft, Position::MiddleRight].into();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let pos = select_move(&cells, Mark::O, &mut rng).unwrap();
        assert!(Position::EDGES.contains(&pos));
        assert!(open_edges.contains(&pos));
        seen.insert(pos);
    }
    assert_eq!(seen, open_edges);
}
