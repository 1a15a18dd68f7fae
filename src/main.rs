use std::io;
use std::io::Write;

use crate::board::Board;
use crate::protocol::parse_promotion;
use crate::session::GameSession;

mod board;
mod errors;
mod history;
mod moves;
mod protocol;
mod session;

const HISTORY_CAPACITY: usize = 100;

fn draw_board(board: &Board) {
    for row in board.display() {
        for cell in &row {
            print!("|{}", cell);
        }
        println!("|");
    }
}

fn prompt(label: &str) -> Option<String> {
    print!("{} ", label);
    io::stdout().flush().ok();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            log::error!("Cannot read input: {}", e);
            None
        }
    }
}

fn promotion_prompt(session: &mut GameSession) {
    while session.can_promote() {
        let at = match session.promotable_square() {
            Some(at) => at,
            None => return,
        };
        let line = match prompt("Promote pawn to (r=Rook, k=Knight, b=Bishop, q=Queen):") {
            Some(l) => l,
            None => return,
        };
        match parse_promotion(&line).and_then(|choice| session.promote(at, choice)) {
            Ok(()) => draw_board(session.board()),
            Err(e) => println!("{}", e),
        }
    }
}

fn main() {
    let logger_env = env_logger::Env::default().filter_or("LOG_LEVEL", "INFO");
    env_logger::Builder::from_env(logger_env).format_timestamp_millis().init();

    let mut session = GameSession::new(HISTORY_CAPACITY).expect("Cannot create game session");
    session.start();
    draw_board(session.board());

    loop {
        let label = match session.winner() {
            Some(winner) => format!("{} won, type new for a rematch:", winner),
            None => format!("{} player:", session.turn()),
        };
        let line = match prompt(&label) {
            Some(l) => l,
            None => break,
        };
        match line.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "new" => {
                session.start();
                draw_board(session.board());
            }
            "undo" => match session.undo() {
                Ok(record) => {
                    log::debug!("Took back {} -> {}", record.from, record.to);
                    draw_board(session.board());
                }
                Err(e) => println!("{}", e),
            },
            "json" => match serde_json::to_string(&session.state_msg()) {
                Ok(msg) => println!("{}", msg),
                Err(e) => log::error!("Cannot serialize state: {}", e),
            },
            input => match session.submit(input) {
                Ok(outcome) => {
                    log::debug!("{:?} played", outcome.kind);
                    draw_board(session.board());
                    if outcome.promotion_pending {
                        promotion_prompt(&mut session);
                    }
                    if let Some(winner) = outcome.winner {
                        println!("{} wins!", winner);
                    }
                }
                Err(e) => println!("{}", e),
            },
        }
    }
}
