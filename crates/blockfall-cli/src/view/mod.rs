pub use self::play::PlayApp;

mod name_input;
mod play;
mod widgets;
