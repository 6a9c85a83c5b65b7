//! # Health-E Types
//!
//! Validated field types shared by the intake and lookup controllers.
//!
//! Each type can only be constructed from input that passes its validator,
//! so downstream code never has to re-check field shape. The raw, per-input
//! sanitization helpers live in [`fields`] and are also used directly by the
//! controllers while a value is still being edited.

pub mod fields;

use std::str::FromStr;

/// Errors that can occur when constructing validated field types.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The name was not one-or-more alphabetic words of total length >= 2.
    #[error("name must be at least two letters (letters and spaces only)")]
    InvalidName,
    /// The age was empty, not a whole number, or outside 0..=120.
    #[error("age must be a whole number between 0 and 120")]
    InvalidAge,
    /// The sex selection was not exactly "Male" or "Female".
    #[error("sex must be Male or Female")]
    InvalidSex,
    /// The reference token did not normalize to exactly 20 characters.
    #[error("reference ID must be exactly 20 characters (A-Z and 0-9)")]
    InvalidReportRef,
}

/// A patient name that has passed sanitization and validation.
///
/// Construction sanitizes the input (letters and single spaces only), trims
/// it, and requires at least two characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientName(String);

impl PatientName {
    /// Creates a new `PatientName` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidName` if the sanitized, trimmed input does
    /// not validate as a name.
    pub fn new(input: impl AsRef<str>) -> Result<Self, FieldError> {
        let cleaned = fields::sanitize_name(input.as_ref());
        let trimmed = cleaned.trim();
        if !fields::is_valid_name(trimmed) {
            return Err(FieldError::InvalidName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PatientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PatientName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientName::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A patient age between 0 and 120 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Age(u8);

impl Age {
    /// Parses an age from its raw text-field value.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidAge` if the value is empty, not a whole
    /// number, or outside 0..=120.
    pub fn parse(input: &str) -> Result<Self, FieldError> {
        if !fields::is_valid_age(input) {
            return Err(FieldError::InvalidAge);
        }
        let value: u8 = input.trim().parse().map_err(|_| FieldError::InvalidAge)?;
        Ok(Self(value))
    }

    /// Returns the age in years.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u16::deserialize(deserializer)?;
        if value > 120 {
            return Err(serde::de::Error::custom(FieldError::InvalidAge));
        }
        Ok(Self(value as u8))
    }
}

/// Patient sex as collected on the intake form.
///
/// The wire format is the exact strings `"Male"` and `"Female"`; anything
/// else fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Returns the wire/display form of the selection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl FromStr for Sex {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Sex::Male),
            "Female" => Ok(Sex::Female),
            _ => Err(FieldError::InvalidSex),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A 20-character uppercase alphanumeric report reference token.
///
/// Construction normalizes the input first (uppercase, strip everything
/// outside `[A-Z0-9]`, truncate), then requires exactly 20 characters. The
/// token's existence is backend-authoritative; this type only enforces shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRef(String);

impl ReportRef {
    /// Parses a reference token from raw input, normalizing it first.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidReportRef` if the normalized value is not
    /// exactly 20 characters long.
    pub fn parse(input: &str) -> Result<Self, FieldError> {
        let normalized = fields::normalize_ref(input);
        if normalized.len() != fields::REPORT_REF_LEN {
            return Err(FieldError::InvalidReportRef);
        }
        Ok(Self(normalized))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReportRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ReportRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ReportRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ReportRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ReportRef::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_name_sanitizes_before_validating() {
        let name = PatientName::new(" Jo3hn   D0e ").expect("should sanitize to a valid name");
        assert_eq!(name.as_str(), "John Doe");
    }

    #[test]
    fn test_patient_name_rejects_single_letter() {
        let err = PatientName::new("J").expect_err("should reject one-letter name");
        assert!(matches!(err, FieldError::InvalidName));
    }

    #[test]
    fn test_patient_name_rejects_digits_only() {
        let err = PatientName::new("12345").expect_err("should reject digits");
        assert!(matches!(err, FieldError::InvalidName));
    }

    #[test]
    fn test_age_parse_accepts_bounds() {
        assert_eq!(Age::parse("0").expect("0 is valid").value(), 0);
        assert_eq!(Age::parse("120").expect("120 is valid").value(), 120);
    }

    #[test]
    fn test_age_parse_rejects_out_of_range_and_fractional() {
        assert!(matches!(Age::parse("121"), Err(FieldError::InvalidAge)));
        assert!(matches!(Age::parse("-1"), Err(FieldError::InvalidAge)));
        assert!(matches!(Age::parse("3.5"), Err(FieldError::InvalidAge)));
        assert!(matches!(Age::parse(""), Err(FieldError::InvalidAge)));
    }

    #[test]
    fn test_sex_wire_format_is_exact() {
        assert_eq!("Male".parse::<Sex>().expect("Male parses"), Sex::Male);
        assert_eq!("Female".parse::<Sex>().expect("Female parses"), Sex::Female);
        assert!(matches!("male".parse::<Sex>(), Err(FieldError::InvalidSex)));
        assert!(matches!("Other".parse::<Sex>(), Err(FieldError::InvalidSex)));
    }

    #[test]
    fn test_sex_serializes_to_exact_strings() {
        assert_eq!(
            serde_json::to_string(&Sex::Male).expect("serialize"),
            "\"Male\""
        );
        assert_eq!(
            serde_json::to_string(&Sex::Female).expect("serialize"),
            "\"Female\""
        );
    }

    #[test]
    fn test_report_ref_normalizes_then_checks_length() {
        let token = ReportRef::parse("abcdefghij 1234-5678-90").expect("should normalize to 20");
        assert_eq!(token.as_str(), "ABCDEFGHIJ1234567890");
    }

    #[test]
    fn test_report_ref_rejects_short_tokens() {
        let err = ReportRef::parse("ab-12 cd!").expect_err("six characters is too short");
        assert!(matches!(err, FieldError::InvalidReportRef));
    }
}
