use std::fmt;

use serde::Serializer;

use crate::board::Color::{Black, White};
use crate::errors::GameError;
use crate::history::MoveRecord;
use crate::moves::{classify, MoveKind};

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Coord {
    pub file: usize,
    pub rank: usize,
}

impl Coord {
    pub fn new(file: usize, rank: usize) -> Self {
        Coord { file, rank }
    }

    pub fn in_bounds(&self) -> bool {
        self.file < WIDTH && self.rank < HEIGHT
    }

    pub fn delta(&self, other: Coord) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        if self == &White {
            Black
        } else {
            White
        }
    }

    pub fn forward(&self) -> i8 {
        match self {
            White => 1,
            Black => -1,
        }
    }

    pub fn pawn_rank(&self) -> usize {
        match self {
            White => 1,
            Black => 6,
        }
    }

    pub fn promotion_rank(&self) -> usize {
        match self {
            White => 7,
            Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            White => write!(f, "white"),
            Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Pawn => "pawn",
        };
        write!(f, "{}", name)
    }
}

/// Promotion targets, the only kinds a pawn may become.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PromotionKind {
    Rook,
    Knight,
    Bishop,
    Queen,
}

impl PromotionKind {
    pub fn kind(&self) -> PieceKind {
        match self {
            PromotionKind::Rook => PieceKind::Rook,
            PromotionKind::Knight => PieceKind::Knight,
            PromotionKind::Bishop => PieceKind::Bishop,
            PromotionKind::Queen => PieceKind::Queen,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind, has_moved: false }
    }

    pub fn symbol(&self) -> char {
        match (self.color, self.kind) {
            (White, PieceKind::King) => '♔',
            (White, PieceKind::Queen) => '♕',
            (White, PieceKind::Rook) => '♖',
            (White, PieceKind::Bishop) => '♗',
            (White, PieceKind::Knight) => '♘',
            (White, PieceKind::Pawn) => '♙',
            (Black, PieceKind::King) => '♚',
            (Black, PieceKind::Queen) => '♛',
            (Black, PieceKind::Rook) => '♜',
            (Black, PieceKind::Bishop) => '♝',
            (Black, PieceKind::Knight) => '♞',
            (Black, PieceKind::Pawn) => '♟',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    pub squares: [[Option<Piece>; WIDTH]; HEIGHT],
    pub turn: Color,
    pub winner: Option<Color>,
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [[None; WIDTH]; HEIGHT],
            turn: White,
            winner: None,
        }
    }

    pub fn start(&mut self) {
        *self = new_board();
    }

    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        if !at.in_bounds() {
            return None;
        }
        self.squares[at.rank][at.file]
    }

    pub fn place(&mut self, at: Coord, piece: Piece) {
        if at.in_bounds() {
            self.squares[at.rank][at.file] = Some(piece);
        }
    }

    pub fn remove(&mut self, at: Coord) -> Option<Piece> {
        if !at.in_bounds() {
            return None;
        }
        self.squares[at.rank][at.file].take()
    }

    fn relocate(&mut self, from: Coord, to: Coord) {
        if let Some(mut piece) = self.remove(from) {
            piece.has_moved = true;
            self.place(to, piece);
        }
    }

    pub fn next_turn(&mut self) {
        self.turn = self.turn.opposite();
    }

    pub fn king_alive(&self, color: Color) -> bool {
        self.squares
            .iter()
            .flatten()
            .flatten()
            .any(|p| p.color == color && p.kind == PieceKind::King)
    }

    pub fn apply(&mut self, from: Coord, to: Coord, kind: MoveKind) -> Result<MoveRecord, GameError> {
        if classify(self, from, to) != Some(kind) {
            return Err(GameError::IllegalApply { from, to });
        }
        let mover = match self.piece_at(from) {
            Some(p) => p,
            None => return Err(GameError::IllegalApply { from, to }),
        };

        let captured = match kind {
            MoveKind::Capture => self.remove(to),
            _ => None,
        };
        self.relocate(from, to);
        if kind == MoveKind::Castling {
            // the rook has been validated, the king hops to file 2 or 6
            let king_to = if from.file == 0 {
                Coord::new(2, from.rank)
            } else {
                Coord::new(6, from.rank)
            };
            self.relocate(Coord::new(4, from.rank), king_to);
        }

        match (kind, captured) {
            (MoveKind::Castling, _) => log::info!("{} {} -> {} (castling)", mover, from, to),
            (_, Some(victim)) => log::info!("{} {} -> {} captures {}", mover, from, to, victim),
            _ => log::info!("{} {} -> {}", mover, from, to),
        }
        self.update_winner();

        Ok(MoveRecord {
            from,
            to,
            kind,
            captured,
            first_move: !mover.has_moved,
        })
    }

    /// Reverses an applied move. The record carries everything needed to
    /// put back captured pieces and to walk a castled king home.
    pub fn revert(&mut self, record: MoveRecord) {
        if let Some(mut piece) = self.remove(record.to) {
            piece.has_moved = !record.first_move;
            self.place(record.from, piece);
        }
        if let Some(victim) = record.captured {
            self.place(record.to, victim);
        }
        if record.kind == MoveKind::Castling {
            let king_at = if record.from.file == 0 {
                Coord::new(2, record.from.rank)
            } else {
                Coord::new(6, record.from.rank)
            };
            if let Some(mut king) = self.remove(king_at) {
                king.has_moved = false;
                self.place(Coord::new(4, record.from.rank), king);
            }
        }
        self.winner = if !self.king_alive(White) {
            Some(Black)
        } else if !self.king_alive(Black) {
            Some(White)
        } else {
            None
        };
    }

    fn update_winner(&mut self) {
        if self.winner.is_some() {
            return;
        }
        if !self.king_alive(White) {
            self.winner = Some(Black);
        } else if !self.king_alive(Black) {
            self.winner = Some(White);
        }
        if let Some(winner) = self.winner {
            log::info!("{} wins by king capture", winner);
        }
    }

    pub fn promotable_square(&self) -> Option<Coord> {
        (0..HEIGHT)
            .flat_map(|rank| (0..WIDTH).map(move |file| Coord::new(file, rank)))
            .find(|&at| {
                self.piece_at(at)
                    .is_some_and(|p| p.kind == PieceKind::Pawn && at.rank == p.color.promotion_rank())
            })
    }

    pub fn can_promote(&self) -> bool {
        self.promotable_square().is_some()
    }

    pub fn promote(&mut self, at: Coord, choice: PromotionKind) -> Result<(), GameError> {
        match self.piece_at(at) {
            Some(pawn) if pawn.kind == PieceKind::Pawn && at.rank == pawn.color.promotion_rank() => {
                self.place(
                    at,
                    Piece { color: pawn.color, kind: choice.kind(), has_moved: true },
                );
                log::info!("{} pawn at {} promoted to {}", pawn.color, at, choice.kind());
                Ok(())
            }
            _ => Err(GameError::NoPromotion { at }),
        }
    }

    /// A header row of file labels, then ranks 7 down to 0, each row
    /// prefixed with its rank label. Consumed by renderers as-is.
    pub fn display(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(HEIGHT + 1);
        let mut header: Vec<String> = vec![" ".to_string()];
        header.extend((0..WIDTH).map(|file| file.to_string()));
        rows.push(header);
        for rank in (0..HEIGHT).rev() {
            let mut row: Vec<String> = vec![rank.to_string()];
            for file in 0..WIDTH {
                row.push(match self.squares[rank][file] {
                    None => " ".to_string(),
                    Some(p) => p.symbol().to_string(),
                });
            }
            rows.push(row);
        }
        rows
    }
}

impl serde::Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.display())
    }
}

fn home_row(color: Color) -> [Option<Piece>; WIDTH] {
    [
        Some(Piece::new(color, PieceKind::Rook)),
        Some(Piece::new(color, PieceKind::Knight)),
        Some(Piece::new(color, PieceKind::Bishop)),
        Some(Piece::new(color, PieceKind::Queen)),
        Some(Piece::new(color, PieceKind::King)),
        Some(Piece::new(color, PieceKind::Bishop)),
        Some(Piece::new(color, PieceKind::Knight)),
        Some(Piece::new(color, PieceKind::Rook)),
    ]
}

fn pawn_row(color: Color) -> [Option<Piece>; WIDTH] {
    [Some(Piece::new(color, PieceKind::Pawn)); WIDTH]
}

fn empty_row() -> [Option<Piece>; WIDTH] {
    [None; WIDTH]
}

pub fn new_board() -> Board {
    Board {
        squares: [
            home_row(White),
            pawn_row(White),
            empty_row(),
            empty_row(),
            empty_row(),
            empty_row(),
            pawn_row(Black),
            home_row(Black),
        ],
        turn: White,
        winner: None,
    }
}
