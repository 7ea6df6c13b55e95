//! Crate root module declarations for the challenge bot.
//!
//! The search core (`search`) picks a move by fixed-depth negamax with
//! alpha-beta pruning against the `SearchPosition` abstraction. The bitboard
//! board (`game_state`, `moves`, `move_generation`) is the concrete position it
//! plays on; `engines`, `uci` and `utils` wire everything into a playable engine.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod search_position;
    pub mod undo_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod move_descriptions;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod move_selector;
    pub mod negamax;
    pub mod piece_values;
    pub mod position;
    pub mod time_budget;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_negamax;
    pub mod engine_trait;
}

pub mod uci {
    pub mod uci_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod engine_match_harness;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
