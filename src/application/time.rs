//! Timing and stepping of the engine loop.

use std::thread;
use std::time::{Duration, Instant};

use super::settings::EngineParams;

/// The timing of one tick, passed to every component hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameTime {
    /// The time since the loop started.
    pub total: Duration,
    /// The time since the previous tick.
    pub elapsed: Duration,
    /// The number of ticks before this one.
    pub tick: u64,
}

pub(crate) struct Clock {
    start: Instant,
    last: Instant,
    tick: u64,
    min_frame_duration: Option<Duration>,
}

impl Clock {
    pub fn new(params: &EngineParams) -> Self {
        let now = Instant::now();
        Clock {
            start: now,
            last: now,
            tick: 0,
            min_frame_duration: params.min_frame_duration(),
        }
    }

    /// Starts a new tick.
    pub fn advance(&mut self) -> GameTime {
        let now = Instant::now();
        let time = GameTime {
            total: now - self.start,
            elapsed: now - self.last,
            tick: self.tick,
        };

        self.last = now;
        self.tick += 1;
        time
    }

    /// Blocks until the current tick lasted at least the minimum frame
    /// duration, cooperatively giving up timeslices to the OS scheduler.
    pub fn wait(&self) {
        if let Some(td) = self.min_frame_duration {
            while self.last.elapsed() <= td {
                if (self.last.elapsed() + Duration::from_millis(2)) < td {
                    thread::sleep(Duration::from_millis(1));
                } else {
                    thread::yield_now();
                }
            }
        }
    }
}
