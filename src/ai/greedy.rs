use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::ai::MoveSelector;
use crate::board::{Board, LegalMoveMap};
use crate::types::{Player, Position};

/// Returns the move flipping the most discs. Ties are broken uniformly at
/// random with `rng`. Returns `None` for an empty map.
pub fn choose_greedy<R: Rng + ?Sized>(moves: &LegalMoveMap, rng: &mut R) -> Option<Position> {
    let max_flips = moves.values().map(Vec::len).max()?;
    let best: Vec<Position> = moves
        .iter()
        .filter(|(_, flips)| flips.len() == max_flips)
        .map(|(mv, _)| *mv)
        .collect();

    best.choose(rng).copied()
}

/// One-ply greedy opponent: no lookahead, no positional weighting.
#[derive(Debug, Clone)]
pub struct GreedySelector<R = StdRng> {
    rng: R,
}

impl<R: Rng> GreedySelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl GreedySelector<StdRng> {
    /// Deterministic tie-breaking for a given seed; entropy when `None`.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> MoveSelector for GreedySelector<R> {
    fn select_move(
        &mut self,
        _board: &Board,
        _player: Player,
        moves: &LegalMoveMap,
    ) -> Option<Position> {
        choose_greedy(moves, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn map(entries: &[(Position, usize)]) -> LegalMoveMap {
        entries
            .iter()
            .map(|&(mv, n)| (mv, vec![at(7, 7); n]))
            .collect()
    }

    #[test]
    fn empty_map_yields_no_move() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(choose_greedy(&LegalMoveMap::new(), &mut rng), None);
    }

    #[test]
    fn unique_maximum_is_always_chosen() {
        let moves = map(&[(at(0, 0), 1), (at(2, 3), 4), (at(5, 5), 2)]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(choose_greedy(&moves, &mut rng), Some(at(2, 3)));
        }
    }

    #[test]
    fn ties_resolve_within_the_maximal_set() {
        let moves = map(&[(at(0, 0), 3), (at(1, 1), 1), (at(4, 6), 3), (at(6, 2), 3)]);
        let best = [at(0, 0), at(4, 6), at(6, 2)];

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = choose_greedy(&moves, &mut rng).unwrap();
            assert!(best.contains(&choice));
        }
    }

    #[test]
    fn ties_reach_every_maximal_move() {
        let moves = map(&[(at(0, 0), 2), (at(7, 7), 2)]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::BTreeSet::new();

        for _ in 0..64 {
            seen.insert(choose_greedy(&moves, &mut rng).unwrap());
        }

        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn stubbed_source_picks_first_of_the_tied_moves() {
        let moves = map(&[(at(3, 5), 2), (at(1, 0), 2), (at(6, 6), 1)]);
        let mut rng = StepRng::new(0, 0);

        assert_eq!(choose_greedy(&moves, &mut rng), Some(at(1, 0)));
    }

    #[test]
    fn same_seed_same_choice() {
        let board = Board::new();
        let moves = board.legal_moves(Player::Black);

        let mut a = GreedySelector::from_seed(Some(42));
        let mut b = GreedySelector::from_seed(Some(42));

        for _ in 0..10 {
            assert_eq!(
                a.select_move(&board, Player::Black, &moves),
                b.select_move(&board, Player::Black, &moves)
            );
        }
    }
}
