//! Day-by-day traversal of a finished simulation.
//!
//! A display loop keeps a [`Playback`] next to the result it renders instead of
//! recomputing anything per frame.

use std::iter::FusedIterator;

use crate::output::{DaySnapshot, SimulationResult};

#[derive(Debug, Clone)]
pub struct Playback<'a> {
    result: &'a SimulationResult,
    cursor: usize,
}

impl<'a> Playback<'a> {
    pub fn new(result: &'a SimulationResult) -> Self {
        Playback { result, cursor: 0 }
    }

    /// The day the next call to `next` yields.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor; seeking past the last day finishes the playback.
    pub fn seek(&mut self, day: usize) {
        self.cursor = day.min(self.result.days() + 1);
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn remaining(&self) -> usize {
        self.result.days() + 1 - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }
}

impl Iterator for Playback<'_> {
    type Item = DaySnapshot;

    fn next(&mut self) -> Option<DaySnapshot> {
        let snapshot = self.result.snapshot(self.cursor)?;
        self.cursor += 1;
        Some(snapshot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for Playback<'_> {}

impl FusedIterator for Playback<'_> {}
