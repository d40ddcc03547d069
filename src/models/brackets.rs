use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition bracket a user or team is classified under.
///
/// Brackets are stored as free-form text on user and team rows; values that do
/// not map to a known bracket are rejected at the gate rather than silently
/// treated as unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bracket {
    #[serde(rename = "PSU")]
    Psu,
    Educational,
    Open,
}

impl Bracket {
    /// Parses the stored bracket value. Matching is case-insensitive and
    /// tolerates surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "psu" => Some(Bracket::Psu),
            "educational" => Some(Bracket::Educational),
            "open" => Some(Bracket::Open),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Bracket::Psu => "PSU",
            Bracket::Educational => "Educational",
            Bracket::Open => "Open",
        }
    }

    /// Maximum team size for the bracket. `None` means unlimited.
    pub fn member_limit(self) -> Option<i64> {
        match self {
            Bracket::Psu => Some(4),
            Bracket::Educational | Bracket::Open => None,
        }
    }

    /// Email domain the bracket requires of its participants, if any.
    pub fn required_email_suffix(self) -> Option<&'static str> {
        match self {
            Bracket::Psu => Some("psu.edu"),
            Bracket::Educational | Bracket::Open => None,
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Bracket;

    #[test]
    fn parse_accepts_known_brackets_case_insensitively() {
        assert_eq!(Bracket::parse("PSU"), Some(Bracket::Psu));
        assert_eq!(Bracket::parse("psu"), Some(Bracket::Psu));
        assert_eq!(Bracket::parse(" Educational "), Some(Bracket::Educational));
        assert_eq!(Bracket::parse("open"), Some(Bracket::Open));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(Bracket::parse("Sponsors"), None);
        assert_eq!(Bracket::parse(""), None);
    }

    #[test]
    fn only_psu_is_size_limited() {
        assert_eq!(Bracket::Psu.member_limit(), Some(4));
        assert_eq!(Bracket::Educational.member_limit(), None);
        assert_eq!(Bracket::Open.member_limit(), None);
    }

    #[test]
    fn only_psu_requires_an_email_domain() {
        assert_eq!(Bracket::Psu.required_email_suffix(), Some("psu.edu"));
        assert_eq!(Bracket::Educational.required_email_suffix(), None);
        assert_eq!(Bracket::Open.required_email_suffix(), None);
    }
}
