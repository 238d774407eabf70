// SPDX-License-Identifier: MPL-2.0
//! Loading placeholder state with animated spinner.

use std::time::{Duration, Instant};

/// Delay after which the placeholder mentions that the archive is slow.
const SLOW_THRESHOLD: Duration = Duration::from_secs(8);

/// Spinner rotation speed in radians per tick.
const SPINNER_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct State {
    is_loading: bool,
    started_at: Option<Instant>,
    /// Current spinner rotation angle in radians.
    spinner_rotation: f32,
    slow: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    StartLoading,
    /// Request finished (success, failure or superseded).
    StopLoading,
    SpinnerTick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The request crossed the slow threshold on this tick.
    BecameSlow,
}

impl State {
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::StartLoading => {
                self.is_loading = true;
                self.started_at = Some(Instant::now());
                self.slow = false;
                Effect::None
            }
            Message::StopLoading => {
                *self = Self::default();
                Effect::None
            }
            Message::SpinnerTick => {
                if !self.is_loading {
                    return Effect::None;
                }
                self.spinner_rotation += SPINNER_SPEED;
                if self.spinner_rotation > std::f32::consts::TAU {
                    self.spinner_rotation -= std::f32::consts::TAU;
                }
                let elapsed = self.started_at.map(|started| started.elapsed());
                if !self.slow && elapsed.is_some_and(|e| e > SLOW_THRESHOLD) {
                    self.slow = true;
                    return Effect::BecameSlow;
                }
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.spinner_rotation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn is_slow(&self) -> bool {
        self.slow
    }

    #[must_use]
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }
}
