use std::fmt;

use constants::alphabet::{ALPHABET, get_mnemonic};
use serde::{Deserialize, Serialize};

use crate::error::ArError;

/// One uppercase flashcard letter, `A` through `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Letter(char);

impl Letter {
    pub const COUNT: usize = 26;

    /// Accepts either case; anything outside A-Z is rejected.
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self(upper))
    }

    /// All letters in registration order (A to Z).
    pub fn all() -> impl Iterator<Item = Letter> {
        ALPHABET.iter().map(|&c| Letter(c))
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Zero-based position in the alphabet.
    pub fn index(self) -> usize {
        (self.0 as u8 - b'A') as usize
    }

    pub fn mnemonic(self) -> Option<&'static str> {
        get_mnemonic(self.0)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Letter {
    type Error = ArError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Letter::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ArError::InvalidConfig(format!("'{value}' is not a letter A-Z")))
    }
}

impl From<Letter> for String {
    fn from(letter: Letter) -> Self {
        letter.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_letters_are_in_alphabet_order() {
        let letters: String = Letter::all().map(Letter::as_char).collect();
        assert_eq!(letters, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(Letter::all().count(), Letter::COUNT);
    }

    #[test]
    fn from_char_normalises_case_and_rejects_non_letters() {
        assert_eq!(Letter::from_char('q'), Letter::from_char('Q'));
        assert_eq!(Letter::from_char('q').map(Letter::index), Some(16));
        assert!(Letter::from_char('1').is_none());
        assert!(Letter::from_char('é').is_none());
    }

    #[test]
    fn deserializes_from_single_char_string() {
        let letter: Letter = serde_json::from_str("\"m\"").expect("letter");
        assert_eq!(letter.as_char(), 'M');
        assert!(serde_json::from_str::<Letter>("\"MN\"").is_err());
        assert_eq!(serde_json::to_string(&letter).expect("json"), "\"M\"");
    }
}
