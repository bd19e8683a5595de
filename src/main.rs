use std::io::{self, BufRead, Write};

use clap::arg;
use clap::command;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use chesslogic::{ChessField, Color, GameState, GameStatus, Move, MoveKind, INITIAL_POSITION};

fn main() {
    let matches = command!()
        .propagate_version(true)
        .subcommand(
            Command::new("play").about("Play a game on the terminal").arg(
                arg!(
                -f --fen <FEN> "Starting position"
                        )
                .default_value(INITIAL_POSITION),
            ),
        )
        .subcommand(
            Command::new("legal")
                .about("List the legal moves of one piece")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                )
                .arg(arg!(
                    -s --square <SQUARE> "Square of the piece, e.g. e2"
                )),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("play", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").unwrap();
            play(fen);
        }
        Some(("legal", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").unwrap();
            let square = arg_matches.get_one::<String>("square");
            legal(fen, square.map(String::as_str));
        }
        None => {
            play(INITIAL_POSITION);
        }
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn play(fen: &str) {
    let mut game = match GameState::from_fen(fen) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid FEN string: {}", e);
            return;
        }
    };

    let stdin = io::stdin();
    loop {
        println!("{}", game.board().render_to_string());
        match game.status() {
            GameStatus::Checkmate { winner } => {
                println!("Checkmate. {} wins.", color_name(winner));
                return;
            }
            GameStatus::Stalemate => {
                println!("Stalemate.");
                return;
            }
            GameStatus::Active => {}
        }
        if game.is_in_check(game.side_to_move()) {
            println!("{} is in check.", color_name(game.side_to_move()));
        }

        print!("{} to move (e.g. e2e4): ", color_name(game.side_to_move()));
        io::stdout().flush().unwrap();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let input = line.trim();
        if input == "quit" {
            return;
        }
        if input == "fen" {
            println!("{}", game.to_fen());
            continue;
        }

        let Some((from, to)) = parse_input_move(input) else {
            println!("Cannot read '{}' as a move.", input);
            continue;
        };
        if let Err(e) = game.apply_move(from, to) {
            println!("{}", e);
        }
    }
}

fn parse_input_move(input: &str) -> Option<(ChessField, ChessField)> {
    if input.len() != 4 || !input.is_ascii() {
        return None;
    }
    Some((ChessField::from_algebraic(&input[0..2])?, ChessField::from_algebraic(&input[2..4])?))
}

#[derive(Tabled)]
struct LegalMoveRow {
    from: String,
    to: String,
    kind: &'static str,
}

impl LegalMoveRow {
    fn from_move(mv: &Move) -> Self {
        LegalMoveRow {
            from: mv.from.as_algebraic(),
            to: mv.to.as_algebraic(),
            kind: match mv.kind {
                MoveKind::Normal => "normal",
                MoveKind::EnPassant { .. } => "en passant",
                MoveKind::Castling { .. } => "castling",
                MoveKind::Promotion { .. } => "promotion",
            },
        }
    }
}

fn legal(fen: &str, square: Option<&str>) {
    let game = match GameState::from_fen(fen) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid FEN string: {}", e);
            return;
        }
    };

    let fields: Vec<ChessField> = match square {
        Some(s) => match ChessField::from_algebraic(s) {
            Some(field) => vec![field],
            None => {
                eprintln!("Invalid square: {}", s);
                return;
            }
        },
        None => game
            .board()
            .pieces()
            .filter(|(_, piece)| piece.color == game.side_to_move())
            .map(|(field, _)| field)
            .collect(),
    };

    let mut rows: Vec<LegalMoveRow> = fields
        .iter()
        .flat_map(|&field| game.legal_moves(field))
        .map(|mv| LegalMoveRow::from_move(&mv))
        .collect();
    rows.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));

    println!("{}", game.board().render_to_string());
    println!("{}", Table::new(rows).with(Style::modern()));
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
