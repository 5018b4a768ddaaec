//! Form validation rules.
//!
//! Every rule is a stateless predicate over the cached record list, the
//! candidate form and the current editing target. [`validate`] applies them in
//! order and reports the first failure.

use crate::domain::entry::{Entry, EntryForm};
use thiserror::Error;

/// User-facing reasons a form submission is refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Sr no must be a number and not a duplicate.")]
    InvalidSrno,
    #[error("Name cannot be a number.")]
    NumericName,
    #[error("Branch cannot be a number.")]
    NumericBranch,
    #[error("Roll no must be a number less than or equal to 99.")]
    InvalidRollno,
}

pub const MAX_ROLLNO: i64 = 99;

/// Parses serial number input typed as text.
pub fn parse_srno(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidSrno)
}

/// Whether `srno` already belongs to a record other than the editing target.
pub fn is_duplicate_srno(entries: &[Entry], srno: i32, editing: Option<i32>) -> bool {
    entries
        .iter()
        .filter(|e| Some(e.srno) != editing)
        .any(|e| e.srno == srno)
}

/// Digits only (`^[0-9]+$`); the empty string is not numeric.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Integer prefix parsing with the loose semantics of a browser `parseInt(s, 10)`:
/// leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit and `None` is returned when no digit was read.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    // Overlong inputs saturate; they are far beyond any accepted roll number anyway.
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

pub fn is_valid_rollno(rollno: &str) -> bool {
    matches!(parse_int_prefix(rollno), Some(n) if n <= MAX_ROLLNO)
}

/// Applies the rules in order; the first failure wins.
///
/// On success the form is converted into the [`Entry`] that should be sent.
/// A form without a serial number fails rule 1.
pub fn validate(
    entries: &[Entry],
    form: &EntryForm,
    editing: Option<i32>,
) -> Result<Entry, ValidationError> {
    let srno = match form.srno {
        Some(srno) if !is_duplicate_srno(entries, srno, editing) => srno,
        _ => return Err(ValidationError::InvalidSrno),
    };
    if is_numeric(&form.name) {
        return Err(ValidationError::NumericName);
    }
    if is_numeric(&form.branch) {
        return Err(ValidationError::NumericBranch);
    }
    if !is_valid_rollno(&form.rollno) {
        return Err(ValidationError::InvalidRollno);
    }

    Ok(Entry::new(
        srno,
        form.name.clone(),
        form.branch.clone(),
        form.rollno.clone(),
    ))
}
