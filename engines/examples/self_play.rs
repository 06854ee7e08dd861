//! Plays a full game between two engines and prints every position.
//!
//! Usage: `cargo run --example self_play [black.json] [white.json]`
//! Each optional argument is an `EngineConfig` JSON file. Black defaults to
//! depth-4 alpha-beta, White to the static player.

use othello::{Board, Player};
use othello_engines::{apply_move, Engine, EngineConfig, EngineError, MoveOrdering, Strategy};

fn load(path: Option<String>, fallback: EngineConfig) -> Result<Engine, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => EngineConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => fallback,
    };
    Ok(Engine::new(config)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let black = load(
        args.next(),
        EngineConfig::new(Strategy::Minimax { depth: 4 })
            .with_pruning(true)
            .with_ordering(MoveOrdering::Positional),
    )?;
    let white = load(args.next(), EngineConfig::new(Strategy::Static))?;

    let mut board = Board::new();
    let mut player = Player::Black;
    print_board(&board);

    while !board.is_terminal() {
        let engine = match player {
            Player::Black => &black,
            Player::White => &white,
        };

        match engine.choose_move(&board, player) {
            Ok(mv) => {
                board = apply_move(&board, &mv)?;
                println!("{} plays {} flipping {}", player, mv, mv.flip_count());
                print_board(&board);
            }
            Err(EngineError::NoLegalMove { .. }) => println!("{} passes\n", player),
            Err(e) => return Err(e.into()),
        }
        player = player.opponent();
    }

    let (black_discs, white_discs) = board.score_discs(Player::Black);
    match board.winner() {
        Some(winner) => println!("{} wins {}-{}", winner, black_discs, white_discs),
        None => println!("Draw {}-{}", black_discs, white_discs),
    }
    Ok(())
}

fn print_board(board: &Board) {
    let (black, white) = board.score_discs(Player::Black);
    println!("  a b c d e f g h");
    for (row, line) in board.to_string().lines().enumerate() {
        let symbols: Vec<_> = line
            .chars()
            .map(|c| match c {
                'B' => "●",
                'W' => "○",
                _ => ".",
            })
            .collect();
        println!("{} {}", row + 1, symbols.join(" "));
    }
    println!("Black: {}, White: {}\n", black, white);
}
