use crate::config::ShiftConfig;
use crate::error::Result;
use crate::shift::{parse, CodeShift, ShiftInput};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Caller-owned memo of recently planned transitions.
///
/// Inputs are compared structurally; render callbacks compare by identity.
/// Planning is pure, so a miss only costs time.
///
/// ```
/// use codeshift::{HighlightedLine, PlanCache, ShiftConfig, ShiftInput};
/// use std::sync::Arc;
///
/// let mut cache = PlanCache::new(4);
/// let input = ShiftInput::new(vec![HighlightedLine::from("a")], vec![]);
/// let first = cache.get_or_parse(&input, &ShiftConfig::default()).unwrap();
/// let second = cache.get_or_parse(&input, &ShiftConfig::default()).unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct PlanCache {
    capacity: usize,
    // most recently used first
    entries: VecDeque<(ShiftInput, ShiftConfig, Arc<CodeShift>)>,
}

impl Default for PlanCache {
    fn default() -> Self {
        PlanCache::new(16)
    }
}

impl PlanCache {
    pub fn new(capacity: usize) -> Self {
        PlanCache {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Returns the cached plan for `input`, planning and storing it on a miss.
    /// Errors are returned as is and never cached.
    pub fn get_or_parse(&mut self, input: &ShiftInput, config: &ShiftConfig) -> Result<Arc<CodeShift>> {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|(i, c, _)| i == input && c == config)
        {
            debug!(pos, "plan cache hit");
            if let Some(entry) = self.entries.remove(pos) {
                let shift = Arc::clone(&entry.2);
                self.entries.push_front(entry);
                return Ok(shift);
            }
        }

        debug!(len = self.entries.len(), "plan cache miss");
        let shift = Arc::new(parse(input, config)?);
        if self.capacity > 0 {
            self.entries.truncate(self.capacity - 1);
            self.entries
                .push_front((input.clone(), config.clone(), Arc::clone(&shift)));
        }
        Ok(shift)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
