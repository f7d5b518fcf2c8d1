//! Random self-play.
//!
//! Plays games by picking a uniformly random legal move each ply and checks
//! the board invariants after every move. Each game owns its own board, so
//! games run independently on a rayon pool when more than one thread is
//! configured. Records are written as JSONL.

use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Board;
use crate::movegen::{random_move, MoveKind};
use crate::protocol::json::{to_data, BoardData};

/// Errors that abort a self-play run.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write records: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for self-play.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Plies after which a game is cut off. A ply is one `move` call.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Promote eligible pawns after each completed move.
    pub auto_promote: bool,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_plies: 200,
            threads: 4,
            seed: 0,
            auto_promote: true,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub start: String,
    pub target: String,
    pub kind: &'static str,
}

/// The outcome of one self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub plies: usize,
    pub unions: usize,
    pub chains: usize,
    pub promotions: usize,
    /// The side to move had no legal move.
    pub stuck: bool,
    /// First invariant violation, if any. Ends the game.
    pub violation: Option<String>,
    pub moves: Vec<MoveRecord>,
    pub final_board: BoardData,
}

/// Plays a single game from the initial setup.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut board = Board::new();
    let mut record = GameRecord {
        game_id,
        plies: 0,
        unions: 0,
        chains: 0,
        promotions: 0,
        stuck: false,
        violation: None,
        moves: Vec::new(),
        final_board: to_data(&board),
    };

    while record.plies < config.max_plies {
        let (start, target) = match random_move(&board, rng) {
            Ok(Some(m)) => m,
            Ok(None) => {
                record.stuck = true;
                break;
            }
            Err(e) => {
                record.violation = Some(e.to_string());
                break;
            }
        };

        let report = match board.apply_move(start, target.target) {
            Ok(r) => r,
            Err(e) => {
                record.violation = Some(format!("move {} {}: {}", start, target.target, e));
                break;
            }
        };
        match report.kind {
            MoveKind::Plain => {}
            MoveKind::Union => record.unions += 1,
            MoveKind::Chain => record.chains += 1,
        }
        record.moves.push(MoveRecord {
            start: start.to_string(),
            target: target.target.to_string(),
            kind: report.kind.name(),
        });
        record.plies += 1;

        if config.auto_promote && report.turn_passed {
            for id in board.promotable() {
                if let Some(square) = board.piece(id).map(|p| p.position()) {
                    if board.promote_at(square).is_ok() {
                        record.promotions += 1;
                    }
                }
            }
        }

        if let Err(e) = board.check_invariants() {
            record.violation = Some(e.to_string());
            break;
        }
    }

    record.final_board = to_data(&board);
    record
}

fn seeded_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn report_progress(config: &SelfPlayConfig, game: &GameRecord, elapsed: f64) {
    if config.quiet {
        return;
    }
    let outcome = match (&game.violation, game.stuck) {
        (Some(v), _) => format!("violation: {}", v),
        (None, true) => "stuck".to_string(),
        (None, false) => "cut off".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} after {} plies, {} unions, {} chains ({:.3}s)",
        game.game_id + 1,
        config.num_games,
        outcome,
        game.plies,
        game.unions,
        game.chains,
        elapsed,
    );
}

/// Runs self-play, producing one record per game in game-id order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let play = |i: usize| {
        let mut rng = seeded_rng(config.seed, i);
        let start = Instant::now();
        let game = play_game(config, i, &mut rng);
        report_progress(config, &game, start.elapsed().as_secs_f64());
        game
    };

    if config.threads > 1 {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        Ok(pool.install(|| (0..config.num_games).into_par_iter().map(play).collect()))
    } else {
        Ok((0..config.num_games).map(play).collect())
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> Result<(), SelfPlayError> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Prints aggregate statistics to stderr.
pub fn print_summary(games: &[GameRecord]) {
    if games.is_empty() {
        return;
    }
    let n = games.len() as f64;
    let plies: usize = games.iter().map(|g| g.plies).sum();
    let unions: usize = games.iter().map(|g| g.unions).sum();
    let chains: usize = games.iter().map(|g| g.chains).sum();
    let promotions: usize = games.iter().map(|g| g.promotions).sum();
    let stuck = games.iter().filter(|g| g.stuck).count();
    let violations = games.iter().filter(|g| g.violation.is_some()).count();

    eprintln!("--- Summary ---");
    eprintln!("  average plies:  {:.1}", plies as f64 / n);
    eprintln!("  unions/game:    {:.1}", unions as f64 / n);
    eprintln!("  chains/game:    {:.1}", chains as f64 / n);
    eprintln!("  promotions:     {}", promotions);
    eprintln!("  stuck games:    {}", stuck);
    eprintln!("  violations:     {}", violations);
}
