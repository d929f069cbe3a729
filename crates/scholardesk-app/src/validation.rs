// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::format_description;

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";
pub const MAX_SEMESTER: i64 = 12;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidPhone,
    InvalidDate,
    InvalidSemester,
    InvalidScore,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPhone => f.write_str("invalid phone number"),
            Self::InvalidDate => f.write_str("invalid date value"),
            Self::InvalidSemester => f.write_str("invalid semester value"),
            Self::InvalidScore => f.write_str("invalid score value"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Trimmed phone number. Empty input is allowed; otherwise only digits,
/// spaces, and `+ - ( )` may appear, with at least one digit.
pub fn parse_phone(input: &str) -> ValidationResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let allowed = trimmed
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '(' | ')' | ' '));
    if !allowed || !trimmed.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(trimmed.to_owned())
}

pub fn parse_required_date(input: &str) -> ValidationResult<Date> {
    parse_date(input.trim())
}

pub fn format_date(value: Option<Date>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn check_semester(value: i64) -> ValidationResult<i64> {
    if !(1..=MAX_SEMESTER).contains(&value) {
        return Err(ValidationError::InvalidSemester);
    }
    Ok(value)
}

pub fn check_score(value: f64) -> ValidationResult<f64> {
    if !value.is_finite() || !(0.0..=MAX_SCORE).contains(&value) {
        return Err(ValidationError::InvalidScore);
    }
    Ok(value)
}

fn parse_date(input: &str) -> ValidationResult<Date> {
    Date::parse(input, &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}
