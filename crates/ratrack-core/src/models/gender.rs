use std::fmt;

use serde::{Deserialize, Serialize};

/// Sex as the scoring model expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Map free-form input onto the model's two codes.
    ///
    /// Missing or empty input is `F`. Input whose upper-cased form starts
    /// with `M`, or is exactly `"1"`, is `M`. Everything else is `F`.
    pub fn normalize(raw: Option<&str>) -> Gender {
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return Gender::Female;
        };
        let upper = raw.to_uppercase();
        if upper.starts_with('M') || upper == "1" {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_matches_expected_codes() {
        assert_eq!(Gender::normalize(None), Gender::Female);
        assert_eq!(Gender::normalize(Some("")), Gender::Female);
        assert_eq!(Gender::normalize(Some("male")), Gender::Male);
        assert_eq!(Gender::normalize(Some("M")), Gender::Male);
        assert_eq!(Gender::normalize(Some("1")), Gender::Male);
        assert_eq!(Gender::normalize(Some("female")), Gender::Female);
        assert_eq!(Gender::normalize(Some("0")), Gender::Female);
        assert_eq!(Gender::normalize(Some("10")), Gender::Female);
    }
}
