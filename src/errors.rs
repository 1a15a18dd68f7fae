use crate::board::Coord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid input, expected two squares like '07 27', file digit then rank digit")]
    InvalidFormat,
    #[error("invalid input, move digits must be between 0 and 7")]
    InvalidDigit,
    #[error("invalid move for {piece}")]
    IllegalMove { piece: String },
    #[error("apply called with an unconfirmed move {from} -> {to}")]
    IllegalApply { from: Coord, to: Coord },
    #[error("move history is empty")]
    EmptyHistory,
    #[error("move history capacity must be a positive integer")]
    InvalidCapacity,
    #[error("promotion must be one of r, k, b or q")]
    InvalidPromotion,
    #[error("no pawn eligible for promotion at {at}")]
    NoPromotion { at: Coord },
}
