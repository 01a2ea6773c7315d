use std::{io, time::Duration};

use tracing::debug;

use super::{App, event::HostEvent, scheduler::Scheduler};

/// Owns the scheduler and drives an [`App`] inside a ratatui terminal.
#[derive(Debug, Default)]
pub struct Runtime {
    scheduler: Scheduler,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gravity interval, `None` while disarmed.
    #[must_use]
    pub fn gravity_interval(&self) -> Option<Duration> {
        self.scheduler.gravity_interval()
    }

    /// Arms gravity with `interval`, or disarms it with `None`.
    pub fn set_gravity_interval(&mut self, interval: Option<Duration>) {
        if interval != self.gravity_interval() {
            debug!(?interval, "gravity re-armed");
        }
        self.scheduler.set_gravity_interval(interval);
    }

    /// Runs `app` until it asks to exit, restoring the terminal afterwards.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.scheduler.next()? {
                    HostEvent::Gravity => app.on_gravity(&mut self),
                    HostEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    HostEvent::Terminal(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
