use crate::consts::MAX_NAME_LENGTH;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;

/// Text field for the player's name.  Kept across games so that the same
/// player can restart without retyping it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct NameField {
    text: String,
}

impl NameField {
    pub(crate) fn new(initial: Option<String>) -> NameField {
        let mut field = NameField::default();
        for ch in initial.iter().flat_map(|s| s.trim().chars()) {
            field.push(ch);
        }
        field
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// Append `ch` to the name.  Returns `false` if `ch` is a control or
    /// other non-printing character or if the name is already full.
    pub(crate) fn push(&mut self, ch: char) -> bool {
        if ch.general_category_group() == GeneralCategoryGroup::Other {
            return false;
        }
        self.text.push(ch);
        if self.text.graphemes(true).count() > MAX_NAME_LENGTH {
            let _ = self.text.pop();
            return false;
        }
        true
    }

    /// Delete the last grapheme cluster
    pub(crate) fn backspace(&mut self) {
        if let Some((i, _)) = self.text.grapheme_indices(true).next_back() {
            self.text.truncate(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn typed(s: &str) -> NameField {
        let mut field = NameField::default();
        for ch in s.chars() {
            field.push(ch);
        }
        field
    }

    #[rstest]
    #[case("alice", "alice")]
    #[case("al\tice\u{7}", "alice")]
    #[case("bob\u{200B}", "bob")]
    #[case("Zoë", "Zoë")]
    #[case("abcdefghijklmnopqrstuvwxyz", "abcdefghijklmnop")]
    fn typing(#[case] input: &str, #[case] name: &str) {
        assert_eq!(typed(input).as_str(), name);
    }

    #[test]
    fn combining_mark_at_limit() {
        let mut field = typed("abcdefghijklmnop");
        assert!(field.push('\u{301}'));
        assert_eq!(field.as_str(), "abcdefghijklmnop\u{301}");
        assert!(!field.push('q'));
    }

    #[rstest]
    #[case("alice", "alic")]
    #[case("Zoe\u{301}", "Zo")]
    #[case("", "")]
    fn test_backspace(#[case] before: &str, #[case] after: &str) {
        let mut field = NameField {
            text: before.to_owned(),
        };
        field.backspace();
        assert_eq!(field.as_str(), after);
    }

    #[test]
    fn initial_name_is_trimmed() {
        let field = NameField::new(Some(String::from("  carol  ")));
        assert_eq!(field.as_str(), "carol");
    }
}
