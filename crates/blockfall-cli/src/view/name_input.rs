use blockfall_engine::{MAX_NAME_LEN, PlayerName, PlayerNameError};

/// Text field for the player's name on the game-over dialog.
///
/// Holds at most [`MAX_NAME_LEN`] characters; further input is ignored.
#[derive(Debug, Default, Clone)]
pub(crate) struct NameInput {
    text: String,
}

impl NameInput {
    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn push(&mut self, c: char) {
        if c.is_control() || self.text.chars().count() >= MAX_NAME_LEN {
            return;
        }
        self.text.push(c);
    }

    pub(crate) fn backspace(&mut self) {
        self.text.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }

    /// The validated name, or why it cannot be saved yet.
    pub(crate) fn player_name(&self) -> Result<PlayerName, PlayerNameError> {
        PlayerName::new(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> NameInput {
        let mut input = NameInput::default();
        text.chars().for_each(|c| input.push(c));
        input
    }

    #[test]
    fn test_length_capped() {
        let input = typed("abcdefghijklmnop");
        assert_eq!(input.as_str(), "abcdefghij");
    }

    #[test]
    fn test_multibyte_counts_chars() {
        let input = typed("ééééééééééé");
        assert_eq!(input.as_str().chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut input = typed("Ann");
        input.backspace();
        assert_eq!(input.as_str(), "An");
        input.clear();
        assert_eq!(input.as_str(), "");
        input.backspace();
        assert_eq!(input.as_str(), "");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(typed("   ").player_name(), Err(PlayerNameError::Empty));
        assert_eq!(typed(" Bo ").player_name().unwrap().as_str(), "Bo");
    }

    #[test]
    fn test_control_chars_ignored() {
        let input = typed("a\tb");
        assert_eq!(input.as_str(), "ab");
    }
}
