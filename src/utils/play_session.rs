//! Text play session and its command-line configuration.
//!
//! Each side is a human reading long algebraic moves from the input stream,
//! or an engine. The board is printed after every move and the game record
//! is printed once the game ends or the session is left.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::{debug, info};

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams, DEFAULT_SEARCH_DEPTH};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};
use crate::utils::pgn::{game_result, write_pgn};
use crate::utils::render_game_state::render_game_state;

pub const DEFAULT_MAX_PLIES: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Minimax,
    Random,
}

impl FromStr for PlayerKind {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "minimax" => Ok(PlayerKind::Minimax),
            "random" => Ok(PlayerKind::Random),
            _ => Err(ChessError::InvalidArgument(format!("unknown player kind '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub white: PlayerKind,
    pub black: PlayerKind,
    pub depth: u8,
    pub seed: Option<u64>,
    pub fen: Option<String>,
    pub max_plies: usize,
    pub verbose: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            white: PlayerKind::Human,
            black: PlayerKind::Minimax,
            depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
            fen: None,
            max_plies: DEFAULT_MAX_PLIES,
            verbose: false,
        }
    }
}

impl SessionConfig {
    /// Parses command-line flags, program name excluded.
    pub fn from_args<I>(args: I) -> ChessResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--verbose" | "-v" => config.verbose = true,
                "--white" => config.white = flag_value(&flag, args.next())?.parse()?,
                "--black" => config.black = flag_value(&flag, args.next())?.parse()?,
                "--depth" => {
                    let depth = parse_number::<u8>(&flag, args.next())?;
                    if depth == 0 {
                        return Err(ChessError::InvalidArgument("--depth must be at least 1".to_owned()));
                    }
                    config.depth = depth;
                }
                "--seed" => config.seed = Some(parse_number(&flag, args.next())?),
                "--max-plies" => config.max_plies = parse_number(&flag, args.next())?,
                "--fen" => config.fen = Some(flag_value(&flag, args.next())?),
                _ => return Err(ChessError::InvalidArgument(format!("unknown flag '{flag}'"))),
            }
        }

        Ok(config)
    }
}

fn flag_value(flag: &str, value: Option<String>) -> ChessResult<String> {
    value.ok_or_else(|| ChessError::InvalidArgument(format!("missing value for {flag}")))
}

fn parse_number<T: FromStr>(flag: &str, value: Option<String>) -> ChessResult<T> {
    let value = flag_value(flag, value)?;
    value
        .parse::<T>()
        .map_err(|_| ChessError::InvalidArgument(format!("invalid value '{value}' for {flag}")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub result: String,
    pub plies: usize,
    pub record: String,
}

/// Plays one session, reading human input from `input` and writing to `out`.
/// End of input counts as `quit`.
pub fn run_session<R: BufRead, W: Write>(
    config: &SessionConfig,
    input: R,
    out: &mut W,
) -> ChessResult<SessionOutcome> {
    PlaySession::new(config)?.run(input, out)
}

enum Player {
    Human,
    Engine(Box<dyn Engine>),
}

impl Player {
    fn build(kind: PlayerKind, depth: u8, seed: Option<u64>) -> Self {
        match (kind, seed) {
            (PlayerKind::Human, _) => Player::Human,
            (PlayerKind::Minimax, Some(seed)) => Player::Engine(Box::new(MinimaxEngine::with_seed(depth, seed))),
            (PlayerKind::Minimax, None) => Player::Engine(Box::new(MinimaxEngine::new(depth))),
            (PlayerKind::Random, Some(seed)) => Player::Engine(Box::new(RandomEngine::with_seed(seed))),
            (PlayerKind::Random, None) => Player::Engine(Box::new(RandomEngine::new())),
        }
    }

    fn name(&self) -> String {
        match self {
            Player::Human => "Human".to_owned(),
            Player::Engine(engine) => engine.name().to_owned(),
        }
    }

    fn is_human(&self) -> bool {
        matches!(self, Player::Human)
    }
}

enum HumanAction {
    Play(Move),
    Continue,
    Quit,
}

struct PlaySession {
    game_state: GameState,
    initial_state: GameState,
    players: [Player; 2],
    max_plies: usize,
}

impl PlaySession {
    fn new(config: &SessionConfig) -> ChessResult<Self> {
        let initial_state = GameState::from_fen(config.fen.as_deref().unwrap_or(STARTING_POSITION_FEN))?;
        let players = [
            Player::build(config.white, config.depth, config.seed),
            Player::build(config.black, config.depth, config.seed.map(|s| s.wrapping_add(1))),
        ];

        Ok(Self {
            game_state: initial_state.clone(),
            initial_state,
            players,
            max_plies: config.max_plies,
        })
    }

    fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> ChessResult<SessionOutcome> {
        let mut lines = input.lines();
        info!(
            white = %self.players[Color::White.index()].name(),
            black = %self.players[Color::Black.index()].name(),
            fen = %self.initial_state.get_fen(),
            "session started"
        );
        writeln!(out, "{}", render_game_state(&self.game_state))?;

        loop {
            let legal_moves = self.game_state.generate_legal_moves();
            if legal_moves.is_empty() {
                if self.game_state.is_checkmate() {
                    let winner = self.game_state.side_to_move.opposite();
                    writeln!(out, "Checkmate. {winner:?} wins.")?;
                } else {
                    writeln!(out, "Stalemate.")?;
                }
                break;
            }
            if self.game_state.ply() >= self.max_plies {
                writeln!(out, "Ply limit of {} reached.", self.max_plies)?;
                break;
            }

            let side = self.game_state.side_to_move;
            let mv = if self.players[side.index()].is_human() {
                write!(out, "{side:?} to move> ")?;
                out.flush()?;
                let Some(line) = lines.next() else {
                    writeln!(out)?;
                    break;
                };
                match self.handle_human_command(line?.trim(), &legal_moves, out)? {
                    HumanAction::Play(mv) => mv,
                    HumanAction::Continue => continue,
                    HumanAction::Quit => break,
                }
            } else {
                self.engine_move(side)?
            };

            self.game_state.apply_move(&mv);
            writeln!(out, "{side:?} plays {}", mv.chess_notation())?;
            writeln!(out, "{}", render_game_state(&self.game_state))?;
        }

        let result = game_result(&self.game_state).to_owned();
        let record = write_pgn(
            &self.game_state,
            &self.players[Color::White.index()].name(),
            &self.players[Color::Black.index()].name(),
        );
        writeln!(out, "{record}")?;
        out.flush()?;
        info!(result = %result, plies = self.game_state.ply(), "session finished");

        Ok(SessionOutcome {
            result,
            plies: self.game_state.ply(),
            record,
        })
    }

    fn engine_move(&mut self, side: Color) -> ChessResult<Move> {
        let Player::Engine(engine) = &mut self.players[side.index()] else {
            return Err(ChessError::InvalidArgument(format!("{side:?} is not an engine")));
        };

        let output = engine.choose_move(&self.game_state, &GoParams::default())?;
        for line in &output.info_lines {
            debug!(engine = engine.name(), "{line}");
        }
        output.best_move.ok_or(ChessError::NoLegalMoves)
    }

    fn handle_human_command<W: Write>(
        &mut self,
        command: &str,
        legal_moves: &[Move],
        out: &mut W,
    ) -> ChessResult<HumanAction> {
        match command {
            "" => {}
            "quit" | "exit" => return Ok(HumanAction::Quit),
            "undo" => {
                if self.undo_turn() {
                    writeln!(out, "{}", render_game_state(&self.game_state))?;
                } else {
                    writeln!(out, "Nothing to undo.")?;
                }
            }
            "moves" => {
                let listed: Vec<String> = legal_moves.iter().map(move_to_long_algebraic).collect();
                writeln!(out, "{}", listed.join(" "))?;
            }
            "fen" => writeln!(out, "{}", self.game_state.get_fen())?,
            "board" => writeln!(out, "{}", render_game_state(&self.game_state))?,
            "reset" => {
                self.game_state = self.initial_state.clone();
                for player in &mut self.players {
                    if let Player::Engine(engine) = player {
                        engine.new_game();
                    }
                }
                writeln!(out, "{}", render_game_state(&self.game_state))?;
            }
            text => match long_algebraic_to_move(text, legal_moves) {
                Ok(mv) => return Ok(HumanAction::Play(mv)),
                Err(err) => writeln!(out, "error: {err}")?,
            },
        }

        Ok(HumanAction::Continue)
    }

    /// Takes back the last move, and the engine reply before it when the
    /// side to move afterwards is an engine.
    fn undo_turn(&mut self) -> bool {
        if self.game_state.undo_move().is_none() {
            return false;
        }
        if !self.players[self.game_state.side_to_move.index()].is_human() && self.game_state.ply() > 0 {
            self.game_state.undo_move();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(config: &SessionConfig, script: &str) -> (SessionOutcome, String) {
        let mut out = Vec::<u8>::new();
        let outcome = run_session(config, script.as_bytes(), &mut out).expect("session runs");
        (outcome, String::from_utf8(out).expect("utf-8 output"))
    }

    fn two_humans() -> SessionConfig {
        SessionConfig {
            white: PlayerKind::Human,
            black: PlayerKind::Human,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn parses_command_line_flags() {
        let config = SessionConfig::from_args([
            "--white", "random", "--black", "human", "--depth", "3", "--seed", "11", "--max-plies",
            "40", "--fen", "4k3/8/8/8/8/8/8/4K3 w - - 0 1", "--verbose",
        ])
        .expect("flags parse");

        assert_eq!(config.white, PlayerKind::Random);
        assert_eq!(config.black, PlayerKind::Human);
        assert_eq!(config.depth, 3);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.max_plies, 40);
        assert_eq!(config.fen.as_deref(), Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(config.verbose);

        assert_eq!(SessionConfig::from_args(Vec::<String>::new()).expect("defaults"), SessionConfig::default());
    }

    #[test]
    fn rejects_bad_flags() {
        for args in [
            vec!["--white", "grandmaster"],
            vec!["--depth", "0"],
            vec!["--depth", "many"],
            vec!["--seed"],
            vec!["--colour", "white"],
        ] {
            assert!(
                matches!(SessionConfig::from_args(args.clone()), Err(ChessError::InvalidArgument(_))),
                "{args:?} should be rejected"
            );
        }
    }

    #[test]
    fn fools_mate_between_humans() {
        let (outcome, output) = run_script(&two_humans(), "f2f3\ne7e5\ng2g4\nd8h4\n");

        assert_eq!(outcome.result, "0-1");
        assert_eq!(outcome.plies, 4);
        assert!(output.contains("Black plays Qh4"));
        assert!(output.contains("Checkmate. Black wins."));
        assert!(outcome.record.ends_with("1. f3 e5 2. g4 Qh4 0-1\n"));
    }

    #[test]
    fn human_commands_inspect_and_rewind() {
        let script = "e2e4\ne7e5\nundo\nfen\nmoves\ne2e5\nreset\nfen\nquit\n";
        let (outcome, output) = run_script(&two_humans(), script);

        assert!(output.contains("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"));
        assert!(output.contains("e7e5"));
        assert!(output.contains("error: invalid move: e2e5"));
        assert!(output.contains(STARTING_POSITION_FEN));
        assert_eq!(outcome.plies, 0);
        assert_eq!(outcome.result, "*");
    }

    #[test]
    fn undo_against_engine_takes_back_the_reply() {
        let config = SessionConfig {
            white: PlayerKind::Human,
            black: PlayerKind::Minimax,
            depth: 1,
            seed: Some(5),
            ..SessionConfig::default()
        };
        let (outcome, output) = run_script(&config, "e2e4\nundo\nfen\n");

        assert!(output.contains("White plays e4"));
        assert!(output.contains("Black plays"));
        assert!(output.contains(STARTING_POSITION_FEN));
        assert_eq!(outcome.plies, 0);
    }

    #[test]
    fn engines_play_until_ply_limit() {
        let config = SessionConfig {
            white: PlayerKind::Random,
            black: PlayerKind::Minimax,
            depth: 1,
            seed: Some(99),
            max_plies: 12,
            ..SessionConfig::default()
        };
        let (outcome, output) = run_script(&config, "");

        assert!(outcome.plies <= 12);
        assert!(output.contains("[White \"Mailbox Random\"]"));
        assert!(output.contains("[Black \"Mailbox Minimax\"]"));
    }

    /// Writer that remembers how much output had been flushed.
    #[derive(Default)]
    struct FlushTracker {
        written: Vec<u8>,
        flushed: usize,
    }

    impl Write for FlushTracker {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed = self.written.len();
            Ok(())
        }
    }

    #[test]
    fn game_record_is_flushed_before_returning() {
        let config = SessionConfig {
            white: PlayerKind::Random,
            black: PlayerKind::Random,
            seed: Some(3),
            max_plies: 4,
            ..SessionConfig::default()
        };
        let mut out = FlushTracker::default();
        let outcome = run_session(&config, "".as_bytes(), &mut out).expect("session runs");

        assert_eq!(outcome.plies, 4);
        assert!(!out.written.is_empty());
        assert_eq!(out.flushed, out.written.len());
    }

    #[test]
    fn custom_start_position_is_used() {
        let config = SessionConfig {
            fen: Some("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".to_owned()),
            ..two_humans()
        };
        let (outcome, output) = run_script(&config, "");
        assert_eq!(outcome.result, "1/2-1/2");
        assert!(output.contains("Stalemate."));
        assert!(outcome.record.contains("[SetUp \"1\"]"));

        let bad = SessionConfig {
            fen: Some("not a fen".to_owned()),
            ..SessionConfig::default()
        };
        assert!(run_session(&bad, "".as_bytes(), &mut Vec::new()).is_err());
    }
}
