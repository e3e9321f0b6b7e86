//! Raw form inputs, kept as the user typed them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ratrack_core::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    MonthsSinceLastTest,
    CurrentAge,
    CurrentGender,
    #[serde(rename = "currentESR")]
    CurrentEsr,
    #[serde(rename = "currentCRP")]
    CurrentCrp,
    #[serde(rename = "currentRF")]
    CurrentRf,
    #[serde(rename = "currentAntiCCP")]
    CurrentAntiCcp,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::MonthsSinceLastTest,
        FormField::CurrentAge,
        FormField::CurrentGender,
        FormField::CurrentEsr,
        FormField::CurrentCrp,
        FormField::CurrentRf,
        FormField::CurrentAntiCcp,
    ];

    /// Name as it appears in the request payload.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FormField::MonthsSinceLastTest => "monthsSinceLastTest",
            FormField::CurrentAge => "currentAge",
            FormField::CurrentGender => "currentGender",
            FormField::CurrentEsr => "currentESR",
            FormField::CurrentCrp => "currentCRP",
            FormField::CurrentRf => "currentRF",
            FormField::CurrentAntiCcp => "currentAntiCCP",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|f| f.wire_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::MissingField {
                field: s.to_string(),
            })
    }
}

/// Current-appointment inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressForm {
    pub months_since_last_test: String,
    pub current_age: String,
    pub current_gender: String,
    #[serde(rename = "currentESR")]
    pub current_esr: String,
    #[serde(rename = "currentCRP")]
    pub current_crp: String,
    #[serde(rename = "currentRF")]
    pub current_rf: String,
    #[serde(rename = "currentAntiCCP")]
    pub current_anti_ccp: String,
}

impl ProgressForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::MonthsSinceLastTest => &self.months_since_last_test,
            FormField::CurrentAge => &self.current_age,
            FormField::CurrentGender => &self.current_gender,
            FormField::CurrentEsr => &self.current_esr,
            FormField::CurrentCrp => &self.current_crp,
            FormField::CurrentRf => &self.current_rf,
            FormField::CurrentAntiCcp => &self.current_anti_ccp,
        }
    }

    pub(crate) fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::MonthsSinceLastTest => &mut self.months_since_last_test,
            FormField::CurrentAge => &mut self.current_age,
            FormField::CurrentGender => &mut self.current_gender,
            FormField::CurrentEsr => &mut self.current_esr,
            FormField::CurrentCrp => &mut self.current_crp,
            FormField::CurrentRf => &mut self.current_rf,
            FormField::CurrentAntiCcp => &mut self.current_anti_ccp,
        }
    }

    /// Parse a required numeric input.
    pub(crate) fn number(&self, field: FormField) -> Result<f64, ValidationError> {
        let raw = self.get(field).trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingField {
                field: field.wire_name().to_string(),
            });
        }
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| ValidationError::InvalidNumber {
                field: field.wire_name().to_string(),
                value: raw.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!("currentESR".parse::<FormField>().unwrap(), FormField::CurrentEsr);
        assert_eq!("currentesr".parse::<FormField>().unwrap(), FormField::CurrentEsr);
        assert!("currentWeight".parse::<FormField>().is_err());
    }

    #[test]
    fn numbers_must_be_present_and_finite() {
        let mut form = ProgressForm::default();
        assert!(matches!(
            form.number(FormField::CurrentCrp),
            Err(ValidationError::MissingField { .. })
        ));
        *form.slot(FormField::CurrentCrp) = "inf".to_string();
        assert!(matches!(
            form.number(FormField::CurrentCrp),
            Err(ValidationError::InvalidNumber { .. })
        ));
        *form.slot(FormField::CurrentCrp) = " 4.5 ".to_string();
        assert_eq!(form.number(FormField::CurrentCrp).unwrap(), 4.5);
    }
}
