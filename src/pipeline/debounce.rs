// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Single-slot debouncing of pass triggers.

use std::time::{Duration, Instant};

use crate::pipeline::Trigger;

/// At most one pending pass. A new trigger merges into the pending one and
/// pushes its deadline back, so a burst of edits runs a single pass once
/// the burst is over.
#[derive(Debug, Clone)]
pub struct PendingPass {
    delay: Duration,
    trigger: Option<Trigger>,
    due: Option<Instant>,
}

impl PendingPass {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            trigger: None,
            due: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Applies to triggers pushed from now on.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn push(&mut self, trigger: Trigger, now: Instant) {
        self.trigger = Some(match self.trigger.take() {
            Some(pending) => pending.merge(trigger),
            None => trigger,
        });
        self.due = Some(now + self.delay);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    pub fn is_pending(&self) -> bool {
        self.trigger.is_some()
    }

    /// Takes the pending trigger once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<Trigger> {
        match self.due {
            Some(due) if due <= now => self.cancel(),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<Trigger> {
        self.due = None;
        self.trigger.take()
    }
}
