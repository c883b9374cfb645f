use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LabelError {
    #[error("option index {0} has no letter label (max {max})", max = OptionLabel::MAX_OPTIONS)]
    IndexOutOfRange(usize),

    #[error("invalid option label: {0:?}")]
    Invalid(String),
}

//
// ─── OPTION LABEL ──────────────────────────────────────────────────────────────
//

/// Letter identifying an answer option within a question (`A`, `B`, `C`, ...).
///
/// The label is the canonical identity of an option; two options may share the
/// same display text but never the same label. Stored as a zero-based position
/// so `A` is option 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct OptionLabel(u8);

impl OptionLabel {
    /// Number of distinct labels (`A` through `Z`).
    pub const MAX_OPTIONS: usize = 26;

    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);

    /// Label for the option at `index` in display order.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::IndexOutOfRange` past the last letter.
    pub fn from_index(index: usize) -> Result<Self, LabelError> {
        if index >= Self::MAX_OPTIONS {
            return Err(LabelError::IndexOutOfRange(index));
        }
        u8::try_from(index)
            .map(Self)
            .map_err(|_| LabelError::IndexOutOfRange(index))
    }

    /// Parse a single letter, accepting either case.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Invalid` for anything other than an ASCII letter.
    pub fn from_char(ch: char) -> Result<Self, LabelError> {
        if !ch.is_ascii_alphabetic() {
            return Err(LabelError::Invalid(ch.to_string()));
        }
        let upper = ch.to_ascii_uppercase() as u8;
        Ok(Self(upper - b'A'))
    }

    /// Zero-based display position.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(b'A' + self.0)
    }
}

impl TryFrom<char> for OptionLabel {
    type Error = LabelError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Self::from_char(ch)
    }
}

impl From<OptionLabel> for char {
    fn from(label: OptionLabel) -> Self {
        label.as_char()
    }
}

impl FromStr for OptionLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_char(ch),
            _ => Err(LabelError::Invalid(trimmed.to_owned())),
        }
    }
}

impl fmt::Debug for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionLabel({})", self.as_char())
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_display_order() {
        let labels: Vec<char> = (0..4)
            .map(|i| OptionLabel::from_index(i).unwrap().as_char())
            .collect();
        assert_eq!(labels, vec!['A', 'B', 'C', 'D']);
        assert_eq!(OptionLabel::from_index(25).unwrap().as_char(), 'Z');
    }

    #[test]
    fn index_past_z_is_rejected() {
        let err = OptionLabel::from_index(26).unwrap_err();
        assert_eq!(err, LabelError::IndexOutOfRange(26));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("b".parse::<OptionLabel>().unwrap(), OptionLabel::B);
        assert_eq!(" C ".parse::<OptionLabel>().unwrap(), OptionLabel::C);
        assert_eq!(OptionLabel::from_char('d').unwrap().to_string(), "D");
    }

    #[test]
    fn parse_rejects_non_letters() {
        assert!("".parse::<OptionLabel>().is_err());
        assert!("AB".parse::<OptionLabel>().is_err());
        assert!("1".parse::<OptionLabel>().is_err());
        assert!(OptionLabel::from_char('é').is_err());
    }

    #[test]
    fn serializes_as_letter() {
        let json = serde_json::to_string(&OptionLabel::C).unwrap();
        assert_eq!(json, "\"C\"");
        let back: OptionLabel = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(back, OptionLabel::A);
    }
}
