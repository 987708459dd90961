#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scoring system that turns the first solve of an attempt into a report.
//!
//! The surrounding application reads the published [`PuzzleReport`] and hands
//! it to whatever persistence or summary screen it uses. The system publishes
//! at most one report between resets, no matter how often the engine is
//! poked after the solve.

use car_parking_core::{Event, PuzzleReport};
use tracing::info;

/// Pure scoring system that latches the first solve since the last reset.
#[derive(Clone, Debug)]
pub struct Scoring {
    perfect_moves: u32,
    armed: bool,
    last_report: Option<PuzzleReport>,
}

impl Scoring {
    /// Creates a scoring system for a level with the given perfect move count.
    #[must_use]
    pub const fn new(perfect_moves: u32) -> Self {
        Self {
            perfect_moves,
            armed: true,
            last_report: None,
        }
    }

    /// Returns the last report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&PuzzleReport> {
        self.last_report.as_ref()
    }

    /// Consumes engine events and publishes a report on the first solve.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<PuzzleReport>) {
        for event in events {
            match *event {
                Event::PuzzleReset => self.armed = true,
                Event::PuzzleSolved { move_count } if self.armed => {
                    let report = PuzzleReport::new(move_count, self.perfect_moves);
                    info!(
                        move_count,
                        stars = report.stars.stars(),
                        perfect_moves = self.perfect_moves,
                        "puzzle report published"
                    );
                    self.armed = false;
                    self.last_report = Some(report);
                    out.push(report);
                }
                _ => {}
            }
        }
    }
}
