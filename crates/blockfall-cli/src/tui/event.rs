use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum HostEvent {
    /// The gravity interval elapsed.
    Gravity,
    /// State changed since the last frame.
    Render,
    Terminal(CrosstermEvent),
}
