// ABOUTME: Parses free-text ingredient lines such as "Flour 2 cups"
// ABOUTME: Splits a line into name, numeric quantity and unit around the first number
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::errors::MALFORMED_INGREDIENT_MESSAGE;
use crate::models::IngredientRequest;

/// `<name><quantity><unit>`: the quantity is the first run of digits and
/// points, name and unit are words made of letters, spaces, hyphens and
/// apostrophes. No delimiter is required around the number.
static INGREDIENT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^([\p{L}\s'\-]*?)([0-9.]+)([\p{L}\s'\-]*)$").ok()
});

/// Structured form of an ingredient line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    /// Trimmed name
    pub name: String,
    /// Parsed quantity
    pub quantity: f64,
    /// Trimmed unit
    pub unit: String,
}

impl From<ParsedIngredient> for IngredientRequest {
    fn from(parsed: ParsedIngredient) -> Self {
        Self {
            name: parsed.name,
            quantity: parsed.quantity,
            unit: parsed.unit,
        }
    }
}

/// The line does not decompose into `name quantity unit`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", MALFORMED_INGREDIENT_MESSAGE)]
pub struct MalformedIngredientError {
    /// The rejected input
    pub line: String,
}

/// Whether `text` can stand as an ingredient name or unit: at least one
/// letter, otherwise only letters, spaces, hyphens and apostrophes
#[must_use]
pub fn is_ingredient_word(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
        && text
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '\'' || c == '-')
}

/// Parse a single ingredient line.
///
/// ```
/// use meals::ingredients::parse_ingredient_line;
///
/// let garlic = parse_ingredient_line("Garlic 1 clove").unwrap();
/// assert_eq!(garlic.name, "Garlic");
/// assert_eq!(garlic.unit, "clove");
/// ```
///
/// # Errors
///
/// Returns [`MalformedIngredientError`] when there is no numeric run, the run
/// is not a valid number, or the name or unit is empty
pub fn parse_ingredient_line(line: &str) -> Result<ParsedIngredient, MalformedIngredientError> {
    let malformed = || MalformedIngredientError {
        line: line.to_owned(),
    };

    let pattern = INGREDIENT_PATTERN.as_ref().ok_or_else(malformed)?;
    let captures = pattern.captures(line.trim()).ok_or_else(malformed)?;

    let name = captures.get(1).map_or("", |m| m.as_str()).trim();
    let number = captures.get(2).map_or("", |m| m.as_str());
    let unit = captures.get(3).map_or("", |m| m.as_str()).trim();

    if !is_ingredient_word(name) || !is_ingredient_word(unit) {
        return Err(malformed());
    }
    let quantity: f64 = number.parse().map_err(|_| malformed())?;
    if !quantity.is_finite() {
        return Err(malformed());
    }

    Ok(ParsedIngredient {
        name: name.to_owned(),
        quantity,
        unit: unit.to_owned(),
    })
}
