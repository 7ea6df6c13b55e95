//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current position, routes `go` requests
//! to the selected engine and writes protocol output. Errors never end the
//! loop: they are logged and echoed as `info string` lines.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::engine_negamax::{parse_check, NegamaxEngine, MAX_DEPTH, MIN_DEPTH};
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move_in_place;
use crate::move_generation::legal_move_generator::generate_legal_move_descriptions_in_place;
use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to};
use crate::search::board_scoring::{MaterialScorer, MobilityScorer};
use crate::search::move_selector::SearchConfig;
use crate::search::piece_values::PieceValueTable;
use crate::utils::long_algebraic::{
    long_algebraic_to_move_description, move_description_to_long_algebraic,
};
use crate::utils::render_game_state::render_game_state;

const UCI_ENGINE_NAME: &str = "Challenge Bot";
const UCI_ENGINE_AUTHOR: &str = "challenge_bot developers";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opponent {
    Negamax,
    Greedy,
}

impl Opponent {
    fn parse(value: &str) -> Result<Self, String> {
        if value.eq_ignore_ascii_case("negamax") {
            Ok(Self::Negamax)
        } else if value.eq_ignore_ascii_case("greedy") {
            Ok(Self::Greedy)
        } else {
            Err(format!("invalid Opponent value '{}'", value))
        }
    }
}

struct UciState {
    game_state: GameState,
    engine: Box<dyn Engine>,
    values: PieceValueTable,
    opponent: Opponent,
    mobility: bool,
    /// Engine options accepted so far, replayed when the engine is rebuilt.
    engine_options: Vec<(String, String)>,
}

impl UciState {
    fn new() -> Self {
        let values = PieceValueTable::default();
        Self {
            game_state: GameState::new_game(),
            engine: build_engine(Opponent::Negamax, false, values),
            values,
            opponent: Opponent::Negamax,
            mobility: false,
            engine_options: Vec::new(),
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        debug!(command = trimmed, "uci command");

        let cmd = trimmed.split_whitespace().next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min {} max {}",
                    SearchConfig::default().max_depth,
                    MIN_DEPTH,
                    MAX_DEPTH
                )?;
                writeln!(out, "option name UseHash type check default true")?;
                writeln!(out, "option name Mobility type check default false")?;
                writeln!(out, "option name ExtendedOrdering type check default true")?;
                writeln!(out, "option name RandomTieBreak type check default true")?;
                writeln!(out, "option name MateChargesKing type check default true")?;
                writeln!(
                    out,
                    "option name Seed type spin default 0 min 0 max 4294967295"
                )?;
                writeln!(
                    out,
                    "option name Opponent type combo default negamax var negamax var greedy"
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    warn!(error = %err, "setoption failed");
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    warn!(error = %err, "position failed");
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out) {
                    warn!(error = %err, "go failed");
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            }
            "d" => {
                writeln!(out, "{}", render_game_state(&self.game_state))?;
            }
            "stop" => {
                // Search is synchronous; nothing to stop.
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                // Unknown commands are ignored for UCI compatibility.
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Opponent") {
            self.opponent = Opponent::parse(&value)?;
            self.rebuild_engine();
        } else if name.eq_ignore_ascii_case("Mobility") {
            self.mobility = parse_check(&value)?;
            self.rebuild_engine();
        } else {
            self.engine.set_option(&name, &value)?;
            self.engine_options
                .retain(|(known, _)| !known.eq_ignore_ascii_case(&name));
            self.engine_options.push((name, value));
        }

        Ok(())
    }

    fn rebuild_engine(&mut self) {
        self.engine = build_engine(self.opponent, self.mobility, self.values);
        for (name, value) in &self.engine_options {
            // Already accepted once, so a rejection here is a bug, not input.
            if let Err(err) = self.engine.set_option(name, value) {
                warn!(option = %name, error = %err, "option not replayed on new engine");
            }
        }
        self.engine.new_game();
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut base_state = match tokens.next() {
            Some("startpos") => GameState::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(next) = tokens.next_if(|tok| *tok != "moves") {
                    fen_parts.push(next);
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                GameState::from_fen(&fen_parts.join(" "))?
            }
            Some(other) => return Err(format!("unsupported position token '{}'", other)),
            None => return Err("incomplete position command".to_owned()),
        };

        if tokens.next_if_eq(&"moves").is_some() {
            for lan in tokens {
                let mv = find_legal_move(&mut base_state, lan)?;
                make_move_in_place(&mut base_state, mv)?;
            }
        }

        self.game_state = base_state;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> Result<(), String> {
        let params = parse_go_params(line);
        let result = self
            .engine
            .choose_move(&self.game_state, &params)
            .map_err(|e| e.to_string())?;

        for info in &result.info_lines {
            writeln!(out, "{}", info).map_err(|e| e.to_string())?;
        }

        match result.best_move {
            Some(best_move) => {
                let lan = move_description_to_long_algebraic(best_move)?;
                writeln!(out, "bestmove {}", lan).map_err(|e| e.to_string())?;
            }
            None => writeln!(out, "bestmove 0000").map_err(|e| e.to_string())?,
        }

        Ok(())
    }
}

/// Resolve `lan` to the generated legal move with the same squares and
/// promotion, rejecting anything the side to move cannot play.
fn find_legal_move(game_state: &mut GameState, lan: &str) -> Result<u64, String> {
    let parsed = long_algebraic_to_move_description(lan, game_state)?;
    let legal = generate_legal_move_descriptions_in_place(game_state).map_err(|e| e.to_string())?;
    legal
        .into_iter()
        .find(|&mv| {
            move_from(mv) == move_from(parsed)
                && move_to(mv) == move_to(parsed)
                && move_promotion_piece(mv) == move_promotion_piece(parsed)
        })
        .ok_or_else(|| format!("illegal move '{}'", lan))
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace().skip(1);
    while let Some(tok) = tokens.next() {
        let mut number = || tokens.next().and_then(|x| x.parse::<u64>().ok());
        match tok {
            "depth" => params.depth = number().and_then(|d| u8::try_from(d).ok()),
            "movetime" => params.movetime_ms = number(),
            "wtime" => params.wtime_ms = number(),
            "btime" => params.btime_ms = number(),
            "winc" => params.winc_ms = number(),
            "binc" => params.binc_ms = number(),
            "movestogo" => params.movestogo = number().and_then(|n| u16::try_from(n).ok()),
            _ => {}
        }
    }
    params
}

fn build_engine(opponent: Opponent, mobility: bool, values: PieceValueTable) -> Box<dyn Engine> {
    match (opponent, mobility) {
        (Opponent::Greedy, _) => Box::new(GreedyEngine::new(values, None)),
        (Opponent::Negamax, true) => Box::new(NegamaxEngine::new(
            SearchConfig::default(),
            values,
            MobilityScorer::new(values),
            "negamax mobility",
        )),
        (Opponent::Negamax, false) => Box::new(NegamaxEngine::new(
            SearchConfig::default(),
            values,
            MaterialScorer::new(values),
            "negamax",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_go_params, Opponent, UciState};
    use crate::game_state::chess_types::Color;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    fn run(state: &mut UciState, commands: &[&str]) -> String {
        let mut out = Vec::new();
        for command in commands {
            state
                .handle_command(command, &mut out)
                .expect("writing to a Vec cannot fail");
        }
        String::from_utf8(out).expect("output should be UTF-8")
    }

    #[test]
    fn handshake_lists_options() {
        let mut state = UciState::new();
        let out = run(&mut state, &["uci", "isready"]);
        assert!(out.starts_with("id name Challenge Bot\n"));
        assert!(out.contains("option name Depth type spin default 4 min 1 max 8\n"));
        assert!(out.contains("option name Opponent type combo"));
        assert!(out.ends_with("uciok\nreadyok\n"));
    }

    #[test]
    fn position_startpos_with_moves_updates_state() {
        let mut state = UciState::new();
        state
            .handle_position("position startpos moves e2e4 e7e5 g1f3")
            .expect("position command should parse");
        assert_eq!(state.game_state.side_to_move, Color::Dark);
        assert_eq!(
            state.game_state.get_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn position_fen_without_moves_updates_state() {
        let mut state = UciState::new();
        state
            .handle_position("position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")
            .expect("position fen should parse");
        assert_eq!(state.game_state.get_fen(), "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    }

    #[test]
    fn illegal_moves_leave_the_position_untouched() {
        let mut state = UciState::new();
        let out = run(
            &mut state,
            &["position startpos moves e2e4", "position startpos moves e2e4 e2e4"],
        );
        assert!(out.contains("position error: "));
        assert_eq!(state.game_state.side_to_move, Color::Dark);

        // Pinned knight may not move.
        assert!(state
            .handle_position("position fen 4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1 moves e2c3")
            .is_err());
    }

    #[test]
    fn go_returns_a_bestmove() {
        let mut state = UciState::new();
        let out = run(
            &mut state,
            &[
                "setoption name Seed value 3",
                "position fen 6k1/5ppp/8/8/8/2N5/q7/1R4K1 w - - 0 1",
                "go depth 2",
            ],
        );
        assert!(out.contains("score mate 1"));
        assert!(out.ends_with("bestmove b1b8\n"));
    }

    #[test]
    fn go_in_a_finished_game_answers_null_move() {
        let mut state = UciState::new();
        let out = run(
            &mut state,
            &["position fen R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", "go"],
        );
        assert!(out.ends_with("bestmove 0000\n"));
    }

    #[test]
    fn opponent_switch_keeps_forwarded_options() {
        let mut state = UciState::new();
        let out = run(
            &mut state,
            &[
                "setoption name Depth value 2",
                "setoption name Opponent value greedy",
                "setoption name Mobility value true",
            ],
        );
        assert!(out.is_empty(), "unexpected output: {out}");
        assert_eq!(state.opponent, Opponent::Greedy);
        assert_eq!(state.engine.name(), "greedy");
        assert!(state.mobility);

        run(&mut state, &["setoption name Opponent value negamax"]);
        assert_eq!(state.engine.name(), "negamax mobility");
        assert_eq!(
            state.engine_options,
            vec![("Depth".to_owned(), "2".to_owned())]
        );
    }

    #[test]
    fn bad_options_are_reported() {
        let mut state = UciState::new();
        let out = run(
            &mut state,
            &[
                "setoption name Depth value 12",
                "setoption name Opponent value stockfish",
            ],
        );
        assert_eq!(out.matches("setoption error: ").count(), 2);
        assert!(state.engine_options.is_empty());
    }

    #[test]
    fn greedy_rejects_what_negamax_would_reject() {
        let mut state = UciState::new();
        let out = run(
            &mut state,
            &[
                "setoption name Opponent value greedy",
                "setoption name Threads value 4",
                "setoption name UseHash value maybe",
                "setoption name RandomTieBreak value false",
            ],
        );
        assert_eq!(out.matches("setoption error: ").count(), 2);
        assert_eq!(
            state.engine_options,
            vec![("RandomTieBreak".to_owned(), "false".to_owned())]
        );
    }

    #[test]
    fn newgame_and_display() {
        let mut state = UciState::new();
        let out = run(&mut state, &["position startpos moves d2d4", "ucinewgame", "d"]);
        assert!(out.contains(&format!("Fen: {STARTING_POSITION_FEN}")));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut state = UciState::new();
        let mut out = Vec::new();
        assert!(state.handle_command("quit", &mut out).expect("write should succeed"));
        assert!(!state.handle_command("stop", &mut out).expect("write should succeed"));
    }

    #[test]
    fn parse_go_params_reads_clock_fields() {
        let params = parse_go_params("go wtime 120000 btime 60000 winc 1000 binc 500 movestogo 30");
        assert_eq!(params.movetime_ms, None);
        assert_eq!(params.wtime_ms, Some(120_000));
        assert_eq!(params.btime_ms, Some(60_000));
        assert_eq!(params.winc_ms, Some(1_000));
        assert_eq!(params.binc_ms, Some(500));
        assert_eq!(params.movestogo, Some(30));
        assert_eq!(parse_go_params("go depth 3 movetime 250").depth, Some(3));
        assert_eq!(parse_go_params("go depth 300").depth, None);
    }
}
