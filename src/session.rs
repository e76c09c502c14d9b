//! One game session: the move, spawn, terminal-check cycle driven by player input.
//!
//! ```
//! use grid_2048::engine::{Engine, Move};
//! use grid_2048::session::{Outcome, Phase, Session, SpawnRule};
//!
//! let mut session = Session::new(Engine::new(42), SpawnRule::Always);
//! assert_eq!(session.phase(), Phase::Active);
//! match session.play(Move::Left) {
//!     Outcome::Moved(turn) => assert!(turn.spawned.is_some()),
//!     Outcome::Ignored => unreachable!("a fresh game is never over"),
//! }
//! assert_eq!(session.moves(), 1);
//! ```

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Engine, Grid, Move, Position, Score};

/// Whether input is still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Active,
    /// No move can change the grid. Absorbing until [`Session::restart`].
    Terminal,
}

/// When a new tile appears after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnRule {
    /// After every processed move, even one that left the grid untouched.
    #[default]
    Always,
    /// Only after a move that changed the grid.
    OnChange,
}

/// What one processed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub direction: Move,
    /// Points gained from merges in this move.
    pub points: Score,
    /// Whether sliding/merging changed the grid.
    pub changed: bool,
    /// Where the new tile landed, if one was spawned.
    pub spawned: Option<Position>,
    /// Phase after the move and spawn.
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved(Turn),
    /// The session was already terminal; nothing happened.
    Ignored,
}

/// Render-ready view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: Score,
    pub moves: u64,
    pub phase: Phase,
}

#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    engine: Engine<R>,
    rule: SpawnRule,
    phase: Phase,
    moves: u64,
}

impl<R: Rng> Session<R> {
    pub fn new(engine: Engine<R>, rule: SpawnRule) -> Self {
        let phase = phase_of(&engine);
        Session { engine, rule, phase, moves: 0 }
    }

    /// Apply `direction`, spawn per the spawn rule, then re-evaluate the phase.
    ///
    /// Input is ignored once the session is terminal.
    pub fn play(&mut self, direction: Move) -> Outcome {
        if self.phase == Phase::Terminal {
            debug!("ignoring {direction}: game is over");
            return Outcome::Ignored;
        }

        let before = *self.engine.grid();
        let points = self.engine.shift(direction);
        let changed = *self.engine.grid() != before;
        let spawned = match self.rule {
            SpawnRule::Always => self.engine.spawn_tile(),
            SpawnRule::OnChange if changed => self.engine.spawn_tile(),
            SpawnRule::OnChange => None,
        };
        self.moves += 1;
        self.phase = phase_of(&self.engine);

        debug!(
            "move {} {direction}: +{points} (score {}), changed={changed}",
            self.moves,
            self.engine.score()
        );
        if self.phase == Phase::Terminal {
            info!(
                "game over after {} moves, score {}, highest tile {}",
                self.moves,
                self.engine.score(),
                self.engine.grid().highest_tile()
            );
        }

        Outcome::Moved(Turn { direction, points, changed, spawned, phase: self.phase })
    }

    /// Start a fresh game on the same random source.
    pub fn restart(&mut self) {
        info!("restarting (previous score {})", self.engine.score());
        self.engine.initialize();
        self.moves = 0;
        self.phase = phase_of(&self.engine);
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminal
    }

    #[inline]
    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    #[inline]
    pub fn rule(&self) -> SpawnRule {
        self.rule
    }

    /// Moves processed since the last (re)start.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: *self.engine.grid(),
            score: self.engine.score(),
            moves: self.moves,
            phase: self.phase,
        }
    }
}

fn phase_of<R: Rng>(engine: &Engine<R>) -> Phase {
    if engine.is_terminal() { Phase::Terminal } else { Phase::Active }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Tile, SIZE};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    fn grid(rows: [[Tile; SIZE]; SIZE]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    fn session(rows: [[Tile; SIZE]; SIZE], rule: SpawnRule) -> Session<StdRng> {
        let engine = Engine::from_parts(grid(rows), 0, StdRng::seed_from_u64(5));
        Session::new(engine, rule)
    }

    #[test]
    fn noop_move_still_spawns_by_default() {
        // everything already packed to the left: Left changes nothing
        let mut s = session([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]], SpawnRule::Always);
        let before = s.engine().grid().count_empty();
        let Outcome::Moved(turn) = s.play(Move::Left) else {
            panic!("move was ignored");
        };
        assert!(!turn.changed);
        assert_eq!(turn.points, 0);
        assert!(turn.spawned.is_some());
        assert_eq!(s.engine().grid().count_empty(), before - 1);
    }

    #[test]
    fn on_change_rule_skips_spawn_for_noop() {
        let mut s = session([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]], SpawnRule::OnChange);
        let before = *s.engine().grid();
        let Outcome::Moved(turn) = s.play(Move::Left) else {
            panic!("move was ignored");
        };
        assert!(!turn.changed);
        assert_eq!(turn.spawned, None);
        assert_eq!(s.engine().grid(), &before);
        assert_eq!(s.moves(), 1);

        let Outcome::Moved(turn) = s.play(Move::Right) else {
            panic!("move was ignored");
        };
        assert!(turn.changed);
        assert!(turn.spawned.is_some());
    }

    #[test]
    fn move_then_spawn_scores_merges() {
        let mut s = session([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], SpawnRule::Always);
        let Outcome::Moved(turn) = s.play(Move::Left) else {
            panic!("move was ignored");
        };
        assert_eq!(turn.points, 4);
        assert_eq!(s.engine().score(), 4);
        assert_eq!(s.engine().grid().get(Position::new(0, 0)), 4);
        assert_eq!(s.engine().grid().count_empty(), SIZE * SIZE - 2);
    }

    #[test]
    fn reaches_terminal_and_ignores_input() {
        // one hole; whatever fills it, the board must lock up with a zero rng (always a 2)
        let rows = [
            [4, 8, 4, 8],
            [8, 4, 8, 4],
            [4, 8, 4, 8],
            [8, 4, 8, 0],
        ];
        let engine = Engine::from_parts(grid(rows), 0, StepRng::new(0, 0));
        let mut s = Session::new(engine, SpawnRule::Always);
        assert_eq!(s.phase(), Phase::Active);

        // Up does nothing to the grid, the spawn fills (3, 3) with a 2
        let Outcome::Moved(turn) = s.play(Move::Up) else {
            panic!("move was ignored");
        };
        assert!(!turn.changed);
        assert_eq!(turn.spawned, Some(Position::new(3, 3)));
        assert_eq!(turn.phase, Phase::Terminal);
        assert!(s.is_over());

        let frozen = s.snapshot();
        assert_eq!(s.play(Move::Left), Outcome::Ignored);
        assert_eq!(s.snapshot(), frozen);
    }

    #[test]
    fn restart_returns_to_active() {
        let rows = [
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ];
        let mut s = session(rows, SpawnRule::Always);
        assert!(s.is_over());
        s.restart();
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(s.moves(), 0);
        assert_eq!(s.engine().score(), 0);
        assert_eq!(s.engine().grid().count_empty(), SIZE * SIZE - 2);
    }

    #[test]
    fn score_never_decreases_during_play() {
        let mut s = Session::new(Engine::new(2024), SpawnRule::Always);
        let mut last = s.engine().score();
        for step in 0..500 {
            if s.is_over() {
                break;
            }
            s.play(Move::ALL[step % 4]);
            assert!(s.engine().score() >= last);
            last = s.engine().score();
            for &v in s.engine().grid().rows().iter().flatten() {
                assert!(v == 0 || (v >= 2 && v.is_power_of_two()));
            }
        }
    }

    #[test]
    fn snapshot_serializes() {
        let s = session([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], SpawnRule::Always);
        let json = serde_json::to_string(&s.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Active\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s.snapshot());
    }
}
