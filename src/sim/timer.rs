//! Cancellable one-shot timer
//!
//! Advanced by elapsed simulation time rather than a wall clock, so it stays
//! deterministic and never blocks the tick.

use serde::{Deserialize, Serialize};

/// Identifies one scheduled shot. Tokens are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// A single-slot one-shot timer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneShotTimer {
    pending: Option<(TimerToken, f32)>,
    next_token: u64,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a shot `delay` seconds from now, replacing any pending one
    pub fn schedule(&mut self, delay: f32) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending = Some((token, delay.max(0.0)));
        token
    }

    /// Cancel the shot if it is still pending. Returns whether it was.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some((pending, _)) if pending == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Seconds until the pending shot fires
    pub fn remaining(&self) -> Option<f32> {
        self.pending.map(|(_, remaining)| remaining)
    }

    /// Let `dt` seconds pass. Returns the token that fired, if any.
    pub fn advance(&mut self, dt: f32) -> Option<TimerToken> {
        let (token, remaining) = self.pending.as_mut()?;
        *remaining -= dt;
        if *remaining <= 0.0 {
            let token = *token;
            self.pending = None;
            return Some(token);
        }
        None
    }
}
