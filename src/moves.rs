use crate::board::{Board, Coord, Piece, PieceKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveKind {
    Move,
    Capture,
    Castling,
}

fn straight(dx: i8, dy: i8) -> bool {
    (dx == 0) != (dy == 0)
}

fn diagonal(dx: i8, dy: i8) -> bool {
    dx.abs() == dy.abs() && dx != 0
}

/// Pure geometry, blind to occupancy. Pawn captures and castling are the
/// classifier's business.
pub fn shape_legal(piece: Piece, start: Coord, end: Coord) -> bool {
    let (dx, dy) = start.delta(end);
    match piece.kind {
        PieceKind::King => dx.abs().max(dy.abs()) == 1,
        PieceKind::Queen => straight(dx, dy) || diagonal(dx, dy),
        PieceKind::Bishop => diagonal(dx, dy),
        PieceKind::Rook => straight(dx, dy),
        PieceKind::Knight => {
            (dx.abs() == 1 && dy.abs() == 2) || (dx.abs() == 2 && dy.abs() == 1)
        }
        PieceKind::Pawn => {
            let forward = piece.color.forward();
            dx == 0
                && (dy == forward
                    || (dy == 2 * forward && start.rank == piece.color.pawn_rank()))
        }
    }
}

fn pawn_capture_shape(piece: Piece, start: Coord, end: Coord) -> bool {
    let (dx, dy) = start.delta(end);
    dx.abs() == 1 && dy == piece.color.forward()
}

fn path_clear(board: &Board, start: Coord, end: Coord) -> bool {
    let (dx, dy) = start.delta(end);
    let (step_file, step_rank) = (dx.signum(), dy.signum());
    let mut file = start.file as i8 + step_file;
    let mut rank = start.rank as i8 + step_rank;
    while (file, rank) != (end.file as i8, end.rank as i8) {
        if board.piece_at(Coord::new(file as usize, rank as usize)).is_some() {
            return false;
        }
        file += step_file;
        rank += step_rank;
    }
    true
}

fn clear_for(kind: PieceKind, board: &Board, start: Coord, end: Coord) -> bool {
    match kind {
        PieceKind::Queen | PieceKind::Bishop | PieceKind::Rook | PieceKind::Pawn => {
            path_clear(board, start, end)
        }
        PieceKind::King | PieceKind::Knight => true,
    }
}

fn castling_shape(start: Coord, end: Coord) -> bool {
    start.rank == end.rank
        && ((start.file == 0 && end.file == 3) || (start.file == 7 && end.file == 5))
}

fn castling_eligible(board: &Board, mover: Piece, start: Coord, end: Coord) -> bool {
    if mover.kind != PieceKind::Rook || mover.has_moved || !castling_shape(start, end) {
        return false;
    }
    let king = match board.piece_at(Coord::new(4, start.rank)) {
        Some(p) => p,
        None => return false,
    };
    if king.kind != PieceKind::King || king.color != mover.color || king.has_moved {
        return false;
    }
    let between = if start.file == 0 { 1..4 } else { 5..7 };
    between.into_iter().all(|file| board.piece_at(Coord::new(file, start.rank)).is_none())
}

/// Classifies a candidate move against the current position and side to
/// move. `None` means illegal.
pub fn classify(board: &Board, start: Coord, end: Coord) -> Option<MoveKind> {
    if !start.in_bounds() || !end.in_bounds() {
        return None;
    }
    let mover = board.piece_at(start)?;
    if mover.color != board.turn {
        return None;
    }
    match board.piece_at(end) {
        Some(target) if target.color == mover.color => None,
        Some(_) => {
            let shape_ok = match mover.kind {
                PieceKind::Pawn => pawn_capture_shape(mover, start, end),
                _ => shape_legal(mover, start, end),
            };
            (shape_ok && clear_for(mover.kind, board, start, end)).then_some(MoveKind::Capture)
        }
        None => {
            if castling_eligible(board, mover, start, end) {
                Some(MoveKind::Castling)
            } else {
                (shape_legal(mover, start, end) && clear_for(mover.kind, board, start, end))
                    .then_some(MoveKind::Move)
            }
        }
    }
}

pub fn is_legal_move(board: &Board, start: Coord, end: Coord) -> bool {
    classify(board, start, end).is_some()
}
