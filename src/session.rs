use crate::board::{Board, Color, Coord, PromotionKind};
use crate::errors::GameError;
use crate::history::{MoveHistory, MoveRecord};
use crate::moves::{classify, is_legal_move, MoveKind};
use crate::protocol::{parse_move, StateMsg};

/// One game: a board plus its undo buffer, owned by the caller. The shell
/// drives exactly one of these per process.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    history: MoveHistory,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MoveOutcome {
    pub kind: MoveKind,
    pub winner: Option<Color>,
    pub promotion_pending: bool,
}

impl GameSession {
    pub fn new(history_capacity: usize) -> Result<Self, GameError> {
        Ok(GameSession {
            board: Board::empty(),
            history: MoveHistory::new(history_capacity)?,
        })
    }

    /// Resets to the standard 32-piece layout, white to move, history
    /// cleared.
    pub fn start(&mut self) {
        log::info!("New game, white to play");
        self.board.start();
        self.history.clear();
    }

    fn describe(&self, at: Coord) -> String {
        match self.board.piece_at(at) {
            Some(piece) => piece.to_string(),
            None => format!("empty square {}", at),
        }
    }

    /// Syntactic and legality check without mutating anything.
    pub fn parse_and_validate(&self, input: &str) -> Result<(Coord, Coord), GameError> {
        let (start, end) = parse_move(input)?;
        if !is_legal_move(&self.board, start, end) {
            return Err(GameError::IllegalMove { piece: self.describe(start) });
        }
        Ok((start, end))
    }

    /// Parses, classifies, applies and records one half-move, then passes
    /// the turn. Rejected input leaves board and history untouched.
    pub fn submit(&mut self, input: &str) -> Result<MoveOutcome, GameError> {
        let (start, end) = self.parse_and_validate(input)?;
        let kind = match classify(&self.board, start, end) {
            Some(kind) => kind,
            None => return Err(GameError::IllegalMove { piece: self.describe(start) }),
        };
        log::debug!("{} -> {} classified as {:?}", start, end, kind);
        let record = self.board.apply(start, end, kind)?;
        self.history.push(record);
        self.board.next_turn();
        Ok(MoveOutcome {
            kind,
            winner: self.board.winner,
            promotion_pending: self.board.can_promote(),
        })
    }

    /// Takes back the most recent move and gives the turn back.
    pub fn undo(&mut self) -> Result<MoveRecord, GameError> {
        if self.history.empty() {
            return Err(GameError::EmptyHistory);
        }
        let record = self.history.pop()?;
        self.board.revert(record);
        self.board.next_turn();
        log::debug!("Undid {} -> {}", record.from, record.to);
        Ok(record)
    }

    pub fn can_promote(&self) -> bool {
        self.board.can_promote()
    }

    pub fn promotable_square(&self) -> Option<Coord> {
        self.board.promotable_square()
    }

    pub fn promote(&mut self, at: Coord, choice: PromotionKind) -> Result<(), GameError> {
        self.board.promote(at, choice)
    }

    pub fn turn(&self) -> Color {
        self.board.turn
    }

    pub fn winner(&self) -> Option<Color> {
        self.board.winner
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state_msg(&self) -> StateMsg<'_> {
        StateMsg {
            board: &self.board,
            turn: self.board.turn,
            winner: self.board.winner,
            promotion_pending: self.board.can_promote(),
        }
    }
}
