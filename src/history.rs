use crate::board::{Coord, Piece};
use crate::errors::GameError;
use crate::moves::MoveKind;

/// One applied half-move, with enough context to reverse it: the captured
/// piece (if any) and whether this was the mover's first relocation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub kind: MoveKind,
    pub captured: Option<Piece>,
    pub first_move: bool,
}

/// Fixed-capacity circular buffer of applied moves. Once full, each push
/// overwrites the oldest entry, so undo depth is bounded by the capacity.
#[derive(Debug, Clone)]
pub struct MoveHistory {
    slots: Vec<Option<MoveRecord>>,
    head: Option<usize>,
}

impl MoveHistory {
    pub fn new(capacity: usize) -> Result<Self, GameError> {
        if capacity == 0 {
            return Err(GameError::InvalidCapacity);
        }
        Ok(MoveHistory { slots: vec![None; capacity], head: None })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn push(&mut self, record: MoveRecord) {
        let head = match self.head {
            None => 0,
            Some(h) => (h + 1) % self.capacity(),
        };
        self.slots[head] = Some(record);
        self.head = Some(head);
    }

    pub fn pop(&mut self) -> Result<MoveRecord, GameError> {
        let head = self.head.ok_or(GameError::EmptyHistory)?;
        let record = self.slots[head].take().ok_or(GameError::EmptyHistory)?;
        let previous = if head == 0 { self.slots.len() - 1 } else { head - 1 };
        // a vacant slot behind the head means the buffer has drained
        self.head = self.slots[previous].is_some().then_some(previous);
        Ok(record)
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.head = None;
    }
}

#[cfg(test)]
mod test {
    use crate::board::Coord;
    use crate::errors::GameError;
    use crate::history::{MoveHistory, MoveRecord};
    use crate::moves::MoveKind;

    fn record(n: usize) -> MoveRecord {
        MoveRecord {
            from: Coord::new(n % 8, 0),
            to: Coord::new(n % 8, 1),
            kind: MoveKind::Move,
            captured: None,
            first_move: true,
        }
    }

    #[test]
    fn test_zero_capacity_fails() {
        assert!(matches!(MoveHistory::new(0), Err(GameError::InvalidCapacity)));
        assert_eq!(MoveHistory::new(1).unwrap().capacity(), 1);
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = MoveHistory::new(5).unwrap();
        assert!(history.empty());
        history.push(record(1));
        history.push(record(2));
        history.push(record(3));
        assert!(!history.empty());
        assert_eq!(history.pop().unwrap(), record(3));
        assert_eq!(history.pop().unwrap(), record(2));
        assert_eq!(history.pop().unwrap(), record(1));
        assert!(history.empty());
        assert_eq!(history.pop(), Err(GameError::EmptyHistory));
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut history = MoveHistory::new(3).unwrap();
        for n in 1..=4 {
            history.push(record(n));
        }
        assert_eq!(history.pop().unwrap(), record(4));
        assert_eq!(history.pop().unwrap(), record(3));
        assert_eq!(history.pop().unwrap(), record(2));
        // the first push was overwritten and is gone for good
        assert_eq!(history.pop(), Err(GameError::EmptyHistory));
        assert!(history.empty());
    }

    #[test]
    fn test_push_after_drain_restarts_cleanly() {
        let mut history = MoveHistory::new(2).unwrap();
        history.push(record(1));
        history.pop().unwrap();
        assert!(history.empty());
        history.push(record(2));
        assert!(!history.empty());
        assert_eq!(history.pop().unwrap(), record(2));
        assert!(history.empty());
    }

    #[test]
    fn test_wrap_around_many_times() {
        let mut history = MoveHistory::new(3).unwrap();
        for n in 1..=10 {
            history.push(record(n));
        }
        assert_eq!(history.pop().unwrap(), record(10));
        assert_eq!(history.pop().unwrap(), record(9));
        assert_eq!(history.pop().unwrap(), record(8));
        assert!(history.empty());
    }

    #[test]
    fn test_clear() {
        let mut history = MoveHistory::new(4).unwrap();
        history.push(record(1));
        history.push(record(2));
        history.clear();
        assert!(history.empty());
        assert_eq!(history.pop(), Err(GameError::EmptyHistory));
    }
}
