//! Email identifier used to name an account.
//!
//! The accepted grammar is a deliberately small subset of RFC 5322:
//!
//! - exactly one `@`, with a non-empty local part and domain on either side
//! - local part: at most 64 characters, alphanumerics plus `# + ! % _ & * . -`,
//!   no leading/trailing `.` or `-`, no `..`
//! - domain: dot-separated labels of alphanumerics and `-`, no label starting
//!   or ending with `-`, no `..`, at least two labels
//! - top-level label: 2 to 13 letters
//!
//! "Letter" means a Unicode `L*` general category and "digit" means `Nd`, both
//! restricted to the Basic Multilingual Plane. Lengths count UTF-16 code units.
//! Letters of either case are accepted everywhere and the original case is kept.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const MAX_LOCAL_PART_LEN: usize = 64;
const MIN_TOP_LEVEL_LEN: usize = 2;
const MAX_TOP_LEVEL_LEN: usize = 13;
const LOCAL_PART_SYMBOLS: &str = "#+!%_&*.-";

/// Returns `true` when `email` satisfies the identifier grammar.
pub fn is_email_valid(email: &str) -> bool {
    check(email).is_ok()
}

/// Validated email identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl ValueObject for Email {}

impl Email {
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        check(&value).map_err(DomainError::invalid_identifier)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn local_part(&self) -> &str {
        self.split().0
    }

    pub fn domain(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Validated on construction: exactly one '@'.
        self.0.split_once('@').unwrap_or((self.0.as_str(), ""))
    }
}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Runs the rules in order and reports the first one that fails.
fn check(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("email is empty".to_string());
    }

    let (local, domain) = match email.split_once('@') {
        Some((local, domain)) if !domain.contains('@') => (local, domain),
        Some(_) => return Err(format!("{email:?} contains more than one '@'")),
        None => return Err(format!("{email:?} is missing '@'")),
    };
    if local.is_empty() {
        return Err(format!("{email:?} has an empty local part"));
    }
    if domain.is_empty() {
        return Err(format!("{email:?} has an empty domain"));
    }

    check_local_part(local).map_err(|reason| format!("{email:?}: local part {reason}"))?;
    check_domain(domain).map_err(|reason| format!("{email:?}: domain {reason}"))
}

/// Letters are the `L*` general categories. Characters outside the Basic
/// Multilingual Plane never count, since each is a surrogate pair in UTF-16.
fn is_letter(c: char) -> bool {
    c.len_utf16() == 1
        && matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
        )
}

/// Letters plus decimal digits (`Nd`); `²`, `½` and `Ⅻ` are not digits.
fn is_letter_or_digit(c: char) -> bool {
    is_letter(c)
        || (c.len_utf16() == 1 && get_general_category(c) == GeneralCategory::DecimalNumber)
}

/// Lengths are measured in UTF-16 code units.
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn check_local_part(local: &str) -> Result<(), &'static str> {
    if utf16_len(local) > MAX_LOCAL_PART_LEN {
        return Err("is longer than 64 characters");
    }
    check_edges_and_dots(local)?;
    if !local
        .chars()
        .all(|c| is_letter_or_digit(c) || LOCAL_PART_SYMBOLS.contains(c))
    {
        return Err("contains a forbidden character");
    }
    Ok(())
}

fn check_domain(domain: &str) -> Result<(), &'static str> {
    check_edges_and_dots(domain)?;

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((top_level, rest)) = labels.split_last() else {
        return Err("is empty");
    };
    if rest.is_empty() {
        return Err("has no top-level label");
    }

    for label in rest {
        if label.is_empty() {
            return Err("has an empty label");
        }
        if !label.chars().all(|c| is_letter_or_digit(c) || c == '-') {
            return Err("label contains a forbidden character");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err("label starts or ends with '-'");
        }
    }

    let len = utf16_len(top_level);
    if !(MIN_TOP_LEVEL_LEN..=MAX_TOP_LEVEL_LEN).contains(&len) {
        return Err("top-level label must be 2 to 13 characters");
    }
    if !top_level.chars().all(is_letter) {
        return Err("top-level label must be letters only");
    }
    Ok(())
}

fn check_edges_and_dots(part: &str) -> Result<(), &'static str> {
    if part.starts_with(['.', '-']) || part.ends_with(['.', '-']) {
        return Err("starts or ends with '.' or '-'");
    }
    if part.contains("..") {
        return Err("contains '..'");
    }
    Ok(())
}
