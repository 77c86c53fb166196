use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use twenty48_core::{is_valid_value, Board, Direction, Tile, MAX_TILE_VALUE};
use twenty48_engine::{resolve, Game, GameConfig};

fn row_game(row: [u32; 4]) -> Game {
    let board = Board::from_rows([row, [0; 4], [0; 4], [0; 4]]).expect("valid rows");
    Game::from_board(board, 0, GameConfig::twos_only(), 11).expect("valid game")
}

fn random_direction(rng: &mut StdRng) -> Direction {
    Direction::ALL[rng.gen_range(0..4)]
}

/// Drive a seeded game with random moves, calling `check` around every move.
fn random_walk(seed: u64, moves: usize, mut check: impl FnMut(&Board, Direction, &Game)) {
    let mut game = Game::classic(seed);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x2048);
    for _ in 0..moves {
        if game.status().game_over {
            break;
        }
        let dir = random_direction(&mut rng);
        let before = game.board().clone();
        game.apply_move(dir);
        check(&before, dir, &game);
    }
}

fn spawned(game: &Game) -> Vec<&Tile> {
    game.tiles().into_iter().filter(|t| t.is_new).collect()
}

mod conservation {
    use super::*;

    #[test]
    fn test_resolution_preserves_tile_sum() {
        random_walk(1, 300, |before, dir, _| {
            let res = resolve(before, dir);
            assert_eq!(res.board.total_value(), before.total_value());
        });
    }

    #[test]
    fn test_score_gain_equals_merged_values() {
        random_walk(2, 300, |before, dir, _| {
            let res = resolve(before, dir);
            let merged: u32 = res
                .board
                .tiles()
                .filter(|t| t.is_merged())
                .map(|t| t.value)
                .sum();
            assert_eq!(res.score_gain, merged);
        });
    }

    #[test]
    fn test_spawn_is_only_addition() {
        random_walk(3, 300, |before, dir, game| {
            if !resolve(before, dir).moved {
                return;
            }
            let added: u64 = spawned(game).iter().map(|t| t.value as u64).sum();
            assert_eq!(game.board().total_value() - added, before.total_value());
        });
    }
}

mod merges {
    use super::*;

    #[test]
    fn test_merge_sources_predate_move() {
        random_walk(4, 300, |before, dir, _| {
            let res = resolve(before, dir);
            for tile in res.board.tiles().filter(|t| t.is_merged()) {
                for source in tile.merged_from.expect("merged") {
                    let original = before.tile(source.id).expect("source existed before move");
                    assert_eq!(original.value * 2, tile.value);
                }
            }
        });
    }

    #[test]
    fn test_row_of_four_twos_settles() {
        let mut game = row_game([2, 2, 2, 2]);
        let outcome = game.apply_move(Direction::Left);
        assert!(outcome.moved);
        assert_eq!(outcome.score_gain, 8);
        assert_eq!(&game.board().values()[0][..2], &[4, 4]);

        let row = |r: [u32; 4]| Board::from_rows([r, [0; 4], [0; 4], [0; 4]]).expect("valid rows");
        let second = resolve(&row([4, 4, 0, 0]), Direction::Left);
        assert!(second.moved);
        assert_eq!(second.board.values()[0], [8, 0, 0, 0]);
        let third = resolve(&second.board, Direction::Left);
        assert!(!third.moved);
    }

    #[test]
    fn test_values_stay_legal_near_cap() {
        let m = MAX_TILE_VALUE;
        let board = Board::from_rows([
            [m, m, m / 2, m / 2],
            [m / 4, m / 4, m / 8, m / 8],
            [0; 4],
            [0; 4],
        ])
        .expect("valid rows");
        let mut game = Game::from_board(board, 0, GameConfig::classic(), 13).expect("valid game");
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..300 {
            if game.status().game_over {
                break;
            }
            let outcome = game.apply_move(random_direction(&mut rng));
            assert!(outcome.score_gain <= 8 * m);
            assert!(game.tiles().iter().all(|t| is_valid_value(t.value)));
            // capped tiles can slide but never disappear
            let capped = game.tiles().iter().filter(|t| t.value == m).count();
            assert!(capped >= 2);
        }
    }

    #[test]
    fn test_end_to_end_row() {
        let board = Board::from_rows([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]).expect("valid rows");
        let first = resolve(&board, Direction::Left);
        assert!(first.moved);
        assert_eq!(first.score_gain, 4);
        assert_eq!(first.board.values()[0], [4, 4, 0, 0]);

        let second = resolve(&first.board, Direction::Left);
        assert!(!second.moved);
        assert_eq!(second.board.values(), first.board.values());
    }
}

mod spawning {
    use super::*;

    #[test]
    fn test_exactly_one_spawn_per_real_move() {
        random_walk(5, 400, |before, dir, game| {
            let res = resolve(before, dir);
            let new_tiles = spawned(game);
            if res.moved {
                assert_eq!(new_tiles.len(), 1);
                assert!(matches!(new_tiles[0].value, 2 | 4));
                assert_eq!(game.board().len(), res.board.len() + 1);
            } else {
                assert_eq!(game.board(), before);
            }
        });
    }

    #[test]
    fn test_spawn_leaves_other_tiles_alone() {
        random_walk(6, 400, |before, dir, game| {
            let res = resolve(before, dir);
            if !res.moved {
                return;
            }
            let kept: Vec<&Tile> = game.tiles().into_iter().filter(|t| !t.is_new).collect();
            assert_eq!(kept, res.board.tiles_sorted());
        });
    }
}

mod terminal {
    use super::*;

    const PACKED: [[u32; 4]; 4] = [
        [2, 4, 8, 16],
        [16, 8, 4, 2],
        [2, 4, 8, 16],
        [16, 8, 4, 2],
    ];

    #[test]
    fn test_packed_board_reports_game_over() {
        let board = Board::from_rows(PACKED).expect("valid rows");
        let game = Game::from_board(board, 0, GameConfig::classic(), 0).expect("valid game");
        assert!(game.status().game_over);
        for dir in Direction::ALL {
            assert!(!resolve(game.board(), dir).moved);
        }
    }

    #[test]
    fn test_single_pair_is_not_game_over() {
        let mut rows = PACKED;
        rows[3][3] = 4;
        let board = Board::from_rows(rows).expect("valid rows");
        let game = Game::from_board(board, 0, GameConfig::classic(), 0).expect("valid game");
        assert!(!game.status().game_over);
    }

    #[test]
    fn test_win_flag_with_other_tiles() {
        let board = Board::from_rows([[2048, 2, 4, 8], [2, 4, 8, 16], [0; 4], [0; 4]])
            .expect("valid rows");
        let game = Game::from_board(board, 0, GameConfig::classic(), 0).expect("valid game");
        assert!(game.status().won);
        assert!(!game.status().game_over);
    }

    #[test]
    fn test_game_over_after_last_move() {
        // right merges the 2s; the spawn lands in the freed corner
        let board = Board::from_rows([
            [4, 8, 16, 32],
            [32, 16, 8, 4],
            [8, 4, 32, 16],
            [64, 128, 2, 2],
        ])
        .expect("valid rows");
        let config = GameConfig {
            four_probability: 1.0,
            ..GameConfig::classic()
        };
        let mut game = Game::from_board(board, 0, config, 0).expect("valid game");
        let outcome = game.apply_move(Direction::Right);
        assert!(outcome.moved);
        assert_eq!(outcome.score_gain, 4);
        // row 3 is now [_, 64, 128, 4] with the spawned 4 in the gap
        assert_eq!(game.board().values()[3], [4, 64, 128, 4]);
        assert!(outcome.game_over);
    }
}
