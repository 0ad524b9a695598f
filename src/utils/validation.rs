use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer};
use validator::ValidationError;

use crate::models::job::{EDUCATION_LEVELS, EXPERIENCE_LEVELS, INDUSTRIES, JOB_TYPES};

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new(code);
        err.message = Some(format!("must be one of: {}", allowed.join(", ")).into());
        Err(err)
    }
}

pub fn validate_job_type(value: &str) -> Result<(), ValidationError> {
    one_of(value, JOB_TYPES, "job_type")
}

pub fn validate_education(value: &str) -> Result<(), ValidationError> {
    one_of(value, EDUCATION_LEVELS, "education")
}

pub fn validate_industry(value: &str) -> Result<(), ValidationError> {
    one_of(value, INDUSTRIES, "industry")
}

pub fn validate_experience(value: &str) -> Result<(), ValidationError> {
    one_of(value, EXPERIENCE_LEVELS, "experience")
}

/// Treats blank query values as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Query-string number where an empty value (`?page=`) means absent.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
