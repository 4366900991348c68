//! Cycle detection over the register transition.
//!
//! All strategies walk the pure transition `RegisterCore::next_state` from a
//! start state, so the register being analyzed is never stepped.

use crate::analysis::{AnalysisError, PeriodInfo};
use crate::lfsr::{RegisterCore, Word};
use hashbrown::HashMap;
use log::debug;

/// Widths up to this use the visited-state table under `Auto`.  Above it the
/// table could grow past what fits in memory.
const VISITED_MAX_WIDTH: u32 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodStrategy {
    /// Scan back to the start state for nonsingular registers, otherwise
    /// `Visited` for narrow registers and `Brent` for wide ones.
    Auto,
    /// Record every visited state with the step it was first seen at and stop
    /// at the first repeat.
    Visited,
    /// Brent's cycle detection in constant memory.
    Brent,
}

impl Default for PeriodStrategy {
    fn default() -> Self {
        PeriodStrategy::Auto
    }
}

/// Finds the cycle reached from `start`, examining at most `max_steps`
/// transitions while looking for the first repeated state.
pub fn detect<T: Word>(
    core: &RegisterCore<T>,
    start: T,
    strategy: PeriodStrategy,
    max_steps: u64,
) -> Result<PeriodInfo, AnalysisError> {
    debug!(
        "searching period from {:#x} with {:?}, budget {}",
        start, strategy, max_steps
    );
    match strategy {
        PeriodStrategy::Auto if core.is_nonsingular() => {
            return_to_start(core, start, max_steps)
        }
        PeriodStrategy::Auto if core.width() <= VISITED_MAX_WIDTH => {
            visited(core, start, max_steps)
        }
        PeriodStrategy::Auto | PeriodStrategy::Brent => {
            brent(core, start, max_steps)
        }
        PeriodStrategy::Visited => visited(core, start, max_steps),
    }
}

// Valid only when the transition is a bijection: every state is on a cycle.
fn return_to_start<T: Word>(
    core: &RegisterCore<T>,
    start: T,
    max_steps: u64,
) -> Result<PeriodInfo, AnalysisError> {
    let mut state = start;
    for step in 1..=max_steps {
        state = core.next_state(state);
        if state == start {
            return Ok(PeriodInfo::new(step, 0, core.nonzero_states()));
        }
    }
    Err(AnalysisError::PeriodNotFound { max_steps })
}

fn visited<T: Word>(
    core: &RegisterCore<T>,
    start: T,
    max_steps: u64,
) -> Result<PeriodInfo, AnalysisError> {
    let mut seen: HashMap<T, u64> = HashMap::new();
    let mut state = start;
    seen.insert(state, 0);
    for step in 1..=max_steps {
        state = core.next_state(state);
        if let Some(first) = seen.get(&state) {
            return Ok(PeriodInfo::new(
                step - first,
                *first,
                core.nonzero_states(),
            ));
        }
        seen.insert(state, step);
    }
    Err(AnalysisError::PeriodNotFound { max_steps })
}

// The walk for the cycle length can overshoot the first repeat by up to
// twice the cycle it finds, so it gets a wider limit and the budget is
// checked against the first repeat once lead-in and length are known.
fn brent<T: Word>(
    core: &RegisterCore<T>,
    start: T,
    max_steps: u64,
) -> Result<PeriodInfo, AnalysisError> {
    if max_steps == 0 {
        return Err(AnalysisError::PeriodNotFound { max_steps });
    }
    let limit = max_steps.saturating_mul(3).saturating_add(2);

    // Find the cycle length: the tortoise waits at powers of two while the
    // hare runs ahead until they meet.
    let mut power: u64 = 1;
    let mut length: u64 = 1;
    let mut tortoise = start;
    let mut hare = core.next_state(start);
    let mut evaluated: u64 = 1;
    while tortoise != hare {
        if power == length {
            tortoise = hare;
            power = power.saturating_mul(2);
            length = 0;
        }
        if evaluated >= limit {
            return Err(AnalysisError::PeriodNotFound { max_steps });
        }
        hare = core.next_state(hare);
        length += 1;
        evaluated += 1;
    }

    // Find the lead-in: start two walkers `length` apart and advance both
    // until they meet at the cycle entry.
    let mut tortoise = start;
    let mut hare = start;
    for _ in 0..length {
        hare = core.next_state(hare);
    }
    let mut offset: u64 = 0;
    while tortoise != hare {
        tortoise = core.next_state(tortoise);
        hare = core.next_state(hare);
        offset += 1;
    }

    // The first repeat happens at step `offset + length`.
    if offset.saturating_add(length) > max_steps {
        return Err(AnalysisError::PeriodNotFound { max_steps });
    }
    Ok(PeriodInfo::new(length, offset, core.nonzero_states()))
}
