use crate::board::{Board, Color, Coord, PromotionKind};
use crate::errors::GameError;

/// Parses a 5-character move string, file digit then rank digit per square,
/// the two squares separated by one space, e.g. "07 27".
pub fn parse_move(input: &str) -> Result<(Coord, Coord), GameError> {
    let bytes = input.as_bytes();
    if bytes.len() != 5 || bytes[2] != b' ' {
        return Err(GameError::InvalidFormat);
    }
    let mut digits = [0usize; 4];
    for (i, &b) in [bytes[0], bytes[1], bytes[3], bytes[4]].iter().enumerate() {
        if !b.is_ascii_digit() {
            return Err(GameError::InvalidFormat);
        }
        if b > b'7' {
            return Err(GameError::InvalidDigit);
        }
        digits[i] = (b - b'0') as usize;
    }
    Ok((
        Coord::new(digits[0], digits[1]),
        Coord::new(digits[2], digits[3]),
    ))
}

pub fn parse_promotion(input: &str) -> Result<PromotionKind, GameError> {
    match input.trim() {
        "r" => Ok(PromotionKind::Rook),
        "k" => Ok(PromotionKind::Knight),
        "b" => Ok(PromotionKind::Bishop),
        "q" => Ok(PromotionKind::Queen),
        _ => Err(GameError::InvalidPromotion),
    }
}

/// Snapshot handed to external renderers; the board serializes as its
/// display grid.
#[derive(serde::Serialize)]
pub struct StateMsg<'a> {
    pub board: &'a Board,
    pub turn: Color,
    pub winner: Option<Color>,
    pub promotion_pending: bool,
}

#[cfg(test)]
mod test {
    use crate::board::{new_board, Coord, PromotionKind};
    use crate::errors::GameError;
    use crate::protocol::{parse_move, parse_promotion, StateMsg};

    #[test]
    fn test_parse_move_ok() {
        assert_eq!(
            parse_move("07 27"),
            Ok((Coord::new(0, 7), Coord::new(2, 7)))
        );
        assert_eq!(
            parse_move("01 03"),
            Ok((Coord::new(0, 1), Coord::new(0, 3)))
        );
    }

    #[test]
    fn test_parse_move_rejects_bad_format() {
        assert_eq!(parse_move(""), Err(GameError::InvalidFormat));
        assert_eq!(parse_move("0727"), Err(GameError::InvalidFormat));
        assert_eq!(parse_move("07 277"), Err(GameError::InvalidFormat));
        assert_eq!(parse_move("07-27"), Err(GameError::InvalidFormat));
        assert_eq!(parse_move("ab cd"), Err(GameError::InvalidFormat));
        assert_eq!(parse_move("0a 27"), Err(GameError::InvalidFormat));
    }

    #[test]
    fn test_parse_move_rejects_digits_out_of_range() {
        assert_eq!(parse_move("08 27"), Err(GameError::InvalidDigit));
        assert_eq!(parse_move("07 29"), Err(GameError::InvalidDigit));
        assert_eq!(parse_move("97 27"), Err(GameError::InvalidDigit));
    }

    #[test]
    fn test_parse_promotion() {
        assert_eq!(parse_promotion("r"), Ok(PromotionKind::Rook));
        assert_eq!(parse_promotion("k"), Ok(PromotionKind::Knight));
        assert_eq!(parse_promotion("b"), Ok(PromotionKind::Bishop));
        assert_eq!(parse_promotion("q "), Ok(PromotionKind::Queen));
        assert_eq!(parse_promotion("x"), Err(GameError::InvalidPromotion));
        assert_eq!(parse_promotion("queen"), Err(GameError::InvalidPromotion));
    }

    #[test]
    fn test_state_msg_serializes() {
        let board = new_board();
        let msg = StateMsg {
            board: &board,
            turn: board.turn,
            winner: board.winner,
            promotion_pending: false,
        };
        let json = serde_json::to_string(&msg).expect("Cannot serialize");
        assert!(json.contains("\"turn\":\"White\""));
        assert!(json.contains("\"winner\":null"));
        assert!(json.contains("♜"));
    }
}
