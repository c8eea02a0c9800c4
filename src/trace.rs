//! Turning a found path into the robot commands the game engine replays, one per tick.
use core::fmt;
use std::time::Duration;

use grid_util::point::Point;
use itertools::Itertools;

use crate::error::TraceError;

/// Default pause between two replayed steps.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(200);

/// A single robot command as understood by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    Wait,
    Abort,
}

impl Move {
    pub fn as_char(self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Wait => 'W',
            Move::Abort => 'A',
        }
    }

    /// Column and row offset of the move. Up decreases the row.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
            Move::Wait | Move::Abort => (0, 0),
        }
    }

    /// The move leading from `from` to the 4-adjacent cell `to`.
    pub fn between(from: Point, to: Point) -> Option<Move> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Move::Up),
            (0, 1) => Some(Move::Down),
            (-1, 0) => Some(Move::Left),
            (1, 0) => Some(Move::Right),
            _ => None,
        }
    }

    pub fn apply(self, cell: Point) -> Point {
        let (dx, dy) = self.delta();
        Point::new(cell.x + dx, cell.y + dy)
    }
}

impl TryFrom<char> for Move {
    type Error = TraceError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'U' => Ok(Move::Up),
            'D' => Ok(Move::Down),
            'L' => Ok(Move::Left),
            'R' => Ok(Move::Right),
            'W' => Ok(Move::Wait),
            'A' => Ok(Move::Abort),
            _ => Err(TraceError::UnknownCommand(c)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Converts a path into the moves that walk it. Every pair of consecutive cells must be
/// 4-adjacent.
pub fn moves_from_path(path: &[Point]) -> Result<Vec<Move>, TraceError> {
    path.iter()
        .tuple_windows()
        .map(|(&from, &to)| Move::between(from, to).ok_or(TraceError::NotAdjacent { from, to }))
        .collect()
}

/// The command string for a list of moves, e.g. `"RRDD"`.
pub fn trace_string(moves: &[Move]) -> String {
    moves.iter().map(|m| m.as_char()).collect()
}

/// Parses a command string such as one typed by the player.
pub fn parse_trace(trace: &str) -> Result<Vec<Move>, TraceError> {
    trace.chars().map(Move::try_from).collect()
}

/// One tick of a replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackStep {
    pub mv: Move,
    /// Cell the robot stands on after the move.
    pub cell: Point,
    /// How long to wait before playing this step.
    pub delay: Duration,
}

/// Steps through a path one move per tick. The iterator never sleeps; the caller waits
/// [PlaybackStep::delay] before applying each step.
#[derive(Clone, Debug)]
pub struct Playback {
    moves: Vec<Move>,
    cells: Vec<Point>,
    next: usize,
    delay: Duration,
}

impl Playback {
    pub fn new(path: &[Point], delay: Duration) -> Result<Playback, TraceError> {
        Ok(Playback {
            moves: moves_from_path(path)?,
            cells: path.iter().skip(1).copied().collect(),
            next: 0,
            delay,
        })
    }

    pub fn with_default_delay(path: &[Point]) -> Result<Playback, TraceError> {
        Playback::new(path, DEFAULT_STEP_DELAY)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Total time the remaining steps take to replay, saturating at [Duration::MAX].
    pub fn remaining_time(&self) -> Duration {
        u32::try_from(self.len())
            .ok()
            .and_then(|steps| self.delay.checked_mul(steps))
            .unwrap_or(Duration::MAX)
    }

    pub fn trace(&self) -> String {
        trace_string(&self.moves)
    }
}

impl Iterator for Playback {
    type Item = PlaybackStep;

    fn next(&mut self) -> Option<PlaybackStep> {
        let step = PlaybackStep {
            mv: *self.moves.get(self.next)?,
            cell: self.cells[self.next],
            delay: self.delay,
        };
        self.next += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.moves.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Playback {}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
            Point::new(0, 0),
        ]
    }

    #[test]
    fn path_to_trace() {
        let moves = moves_from_path(&path()).unwrap();
        assert_eq!(trace_string(&moves), "RDLU");
        assert_eq!(parse_trace("rdlu").unwrap(), moves);
    }

    #[test]
    fn moves_replay_path() {
        let path = path();
        let moves = moves_from_path(&path).unwrap();
        let mut cell = path[0];
        for (mv, expected) in moves.iter().zip(path.iter().skip(1)) {
            cell = mv.apply(cell);
            assert_eq!(cell, *expected);
        }
    }

    #[test]
    fn short_paths_have_no_moves() {
        assert!(moves_from_path(&[]).unwrap().is_empty());
        assert!(moves_from_path(&[Point::new(3, 3)]).unwrap().is_empty());
    }

    #[test]
    fn rejects_jumps() {
        let from = Point::new(0, 0);
        let to = Point::new(1, 1);
        assert_eq!(
            moves_from_path(&[from, to]),
            Err(TraceError::NotAdjacent { from, to })
        );
        assert_eq!(parse_trace("UX"), Err(TraceError::UnknownCommand('X')));
    }

    #[test]
    fn playback_yields_one_step_per_tick() {
        let playback = Playback::new(&path(), Duration::from_millis(50)).unwrap();
        assert_eq!(playback.len(), 4);
        assert_eq!(playback.remaining_time(), Duration::from_millis(200));
        assert_eq!(playback.trace(), "RDLU");
        let steps = playback.collect::<Vec<_>>();
        assert_eq!(steps[0].mv, Move::Right);
        assert_eq!(steps[0].cell, Point::new(1, 0));
        assert_eq!(steps[3].cell, Point::new(0, 0));
        assert!(steps.iter().all(|s| s.delay == Duration::from_millis(50)));
    }

    #[test]
    fn remaining_time_saturates() {
        let playback = Playback::new(&path(), Duration::MAX).unwrap();
        assert_eq!(playback.remaining_time(), Duration::MAX);
        let mut playback = Playback::new(&path(), Duration::from_secs(1)).unwrap();
        playback.next();
        assert_eq!(playback.remaining_time(), Duration::from_secs(3));
    }

    #[test]
    fn default_delay() {
        let playback = Playback::with_default_delay(&path()).unwrap();
        assert_eq!(playback.delay(), DEFAULT_STEP_DELAY);
    }
}
