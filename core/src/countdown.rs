use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    Running(u32),
    /// Reported by exactly one tick, the one that reached zero.
    Expired,
    /// Ticks after expiry change nothing.
    AlreadyExpired,
}

/// Whole-second session clock counting down to zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total: u32,
    remaining: u32,
}

impl Countdown {
    pub const fn new(total_secs: u32) -> Self {
        Self {
            total: total_secs,
            remaining: total_secs,
        }
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn reset(&mut self) {
        self.remaining = self.total;
    }

    pub fn tick(&mut self) -> CountdownTick {
        match self.remaining {
            0 => CountdownTick::AlreadyExpired,
            1 => {
                self.remaining = 0;
                CountdownTick::Expired
            }
            _ => {
                self.remaining -= 1;
                CountdownTick::Running(self.remaining)
            }
        }
    }

    pub fn formatted(&self) -> String {
        format_clock(self.remaining)
    }
}

/// `MM:SS`, both fields zero-padded.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
