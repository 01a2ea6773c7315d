//! Minimal terminal runtime: a gravity-aware event scheduler and the loop
//! that feeds it into an [`App`].

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod runtime;
mod scheduler;
