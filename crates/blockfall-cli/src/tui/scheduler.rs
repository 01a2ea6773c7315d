use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::HostEvent;

/// Decides when gravity fires, when to redraw, and otherwise waits for input.
///
/// Gravity is armed with an interval and disarmed with `None`. Re-arming with
/// the interval that is already active keeps the pending deadline, so input
/// between two gravity steps never delays the next one. Any other change
/// restarts the countdown from now.
#[derive(Debug)]
pub(super) struct Scheduler {
    gravity: Option<Duration>,
    next_gravity: Option<Instant>,
    dirty: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub(super) fn new() -> Self {
        Self {
            gravity: None,
            next_gravity: None,
            dirty: true,
        }
    }

    pub(super) fn set_gravity_interval(&mut self, interval: Option<Duration>) {
        self.set_gravity_interval_at(interval, Instant::now());
    }

    fn set_gravity_interval_at(&mut self, interval: Option<Duration>, now: Instant) {
        if interval == self.gravity {
            return;
        }
        self.gravity = interval;
        self.next_gravity = interval.map(|interval| now + interval);
    }

    pub(super) fn gravity_interval(&self) -> Option<Duration> {
        self.gravity
    }

    /// Blocks until gravity is due, a redraw is pending, or a terminal event
    /// arrives.
    pub(super) fn next(&mut self) -> io::Result<HostEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn due_event(&mut self, now: Instant) -> Option<HostEvent> {
        if let (Some(interval), Some(at)) = (self.gravity, self.next_gravity)
            && now >= at
        {
            self.next_gravity = Some(now + interval);
            self.dirty = true;
            return Some(HostEvent::Gravity);
        }
        if self.dirty {
            self.dirty = false;
            return Some(HostEvent::Render);
        }
        None
    }

    fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_gravity
            .map(|at| at.saturating_duration_since(now))
    }
}
