//! Conversions from raw SISTEMA attribute strings to display strings.
//!
//! SISTEMA stores most values in an encoded form: fractions instead of
//! percentages, prefixed enumeration codes (`plC`, `catB`, `fncStart`),
//! integer checkboxes and comma-joined checklists. These helpers are pure
//! and know nothing about which attribute they are applied to.

/// Display marker for an MTTFD that is replaced by a fault exclusion.
pub const FAULT_EXCLUSION: &str = "FE";

/// Display marker for an unbounded number of operations.
pub const UNBOUNDED: &str = "INF";

/// Errors raised while decoding a raw attribute value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    /// A numeric value could not be parsed.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// An enumeration code was empty.
    #[error("expected a value code, found an empty string")]
    EmptyCode,

    /// A checklist token does not end in a two-digit option number.
    #[error("'{0}' is not a checklist option")]
    ChecklistToken(String),

    /// A checklist option number has no known meaning.
    #[error("unknown checklist option {0}")]
    ChecklistOption(u8),
}

/// Parses a decimal value as stored by SISTEMA.
///
/// # Errors
///
/// Returns [`FormatError::NotANumber`] if the string is not a number.
pub fn number(raw: &str) -> Result<f64, FormatError> {
    raw.trim()
        .parse()
        .map_err(|_| FormatError::NotANumber(raw.to_string()))
}

/// Renders a fraction (typically 0–1) as a percentage, e.g. `0.9` → `90%`.
///
/// The result is rounded to six decimal places so that binary floating-point
/// noise does not leak into the report.
///
/// # Errors
///
/// Returns [`FormatError::NotANumber`] if the value is not a number.
pub fn percent(raw: &str) -> Result<String, FormatError> {
    let value = (number(raw)? * 100.0 * 1e6).round() / 1e6;
    Ok(format!("{value}%"))
}

/// Decodes a performance level code such as `plC` to its letter.
///
/// `plN` (no PL) renders as `-` and `plU` (not applicable) as `n.a.`; any
/// other code renders as its lower-cased final character.
///
/// # Errors
///
/// Returns [`FormatError::EmptyCode`] if the code is empty.
pub fn pl_letter(raw: &str) -> Result<String, FormatError> {
    match raw {
        "plN" => Ok("-".to_string()),
        "plU" => Ok("n.a.".to_string()),
        _ => last_char(raw).map(|c| c.to_lowercase().to_string()),
    }
}

/// Decodes a SIL code such as `sil2`; the `silN` code renders as `-`.
///
/// # Errors
///
/// Returns [`FormatError::EmptyCode`] if the code is empty.
pub fn sil_level(raw: &str) -> Result<String, FormatError> {
    last_char(raw).map(|c| if c == 'N' { "-".to_string() } else { c.to_string() })
}

/// Renders an integer checkbox attribute as `true` or `false`.
///
/// # Errors
///
/// Returns [`FormatError::NotANumber`] if the value is not an integer.
pub fn checkbox(raw: &str) -> Result<String, FormatError> {
    checked(raw).map(|checked| checked.to_string())
}

/// Whether an integer checkbox attribute is ticked.
///
/// # Errors
///
/// Returns [`FormatError::NotANumber`] if the value is not an integer.
pub fn checked(raw: &str) -> Result<bool, FormatError> {
    raw.trim()
        .parse::<i64>()
        .map(|value| value > 0)
        .map_err(|_| FormatError::NotANumber(raw.to_string()))
}

/// Splits a comma-joined list into trimmed tokens.
///
/// An empty (or whitespace-only) string is an empty list, not a list
/// containing one empty token.
#[must_use]
pub fn tokens(raw: &str) -> Vec<&str> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::trim).collect()
}

/// Decodes a multi-select checklist into its option numbers.
///
/// Each token ends in a two-digit option number (`PLReq01, PLReq04`) and the
/// prefix carries no information. Order is preserved.
///
/// # Errors
///
/// Returns [`FormatError::ChecklistToken`] if a token does not end in a
/// number.
pub fn checklist(raw: &str) -> Result<Vec<u8>, FormatError> {
    tokens(raw)
        .into_iter()
        .map(|token| {
            let start = token
                .char_indices()
                .rev()
                .nth(1)
                .map_or(0, |(index, _)| index);
            token[start..]
                .parse()
                .map_err(|_| FormatError::ChecklistToken(token.to_string()))
        })
        .collect()
}

/// Renders a list of PL codes as comma-separated letters.
///
/// # Errors
///
/// Returns an error if any code is empty.
pub fn pl_list(raw: &str) -> Result<String, FormatError> {
    let letters = tokens(raw)
        .into_iter()
        .map(pl_letter)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(letters.join(", "))
}

/// Renders a number of operations, where any negative value means the
/// number is unbounded.
///
/// # Errors
///
/// Returns [`FormatError::NotANumber`] if the value is not a number.
pub fn operations(raw: &str) -> Result<String, FormatError> {
    if number(raw)? < 0.0 {
        Ok(UNBOUNDED.to_string())
    } else {
        Ok(raw.to_string())
    }
}

/// Whether an MTTFD value claims a fault exclusion.
///
/// SISTEMA stores a fault exclusion as a negative MTTFD. An empty value is
/// not a fault exclusion.
///
/// # Errors
///
/// Returns [`FormatError::NotANumber`] if the value is neither empty nor a
/// number.
pub fn fault_excluded(raw: &str) -> Result<bool, FormatError> {
    if raw.trim().is_empty() {
        return Ok(false);
    }
    Ok(number(raw)? < 0.0)
}

/// Renders the set of ticked function types, e.g. `fncStop,fncStart` →
/// `Start, Stop`. SISTEMA lists them alphabetically.
#[must_use]
pub fn function_types(raw: &str) -> String {
    let mut functions: Vec<_> = tokens(raw)
        .into_iter()
        .map(|token| strip_chars(token, 3))
        .collect();
    functions.sort_unstable();
    functions.join(", ")
}

/// Renders a technology code, e.g. `tecElectromechanical` →
/// `electromechanical`.
#[must_use]
pub fn technology(raw: &str) -> String {
    strip_chars(raw, 3).to_lowercase()
}

/// Removes a fixed-length code prefix.
#[must_use]
pub fn strip_chars(raw: &str, count: usize) -> &str {
    raw.char_indices().nth(count).map_or("", |(index, _)| &raw[index..])
}

/// Returns the final character of a code.
///
/// # Errors
///
/// Returns [`FormatError::EmptyCode`] if the code is empty.
pub fn last_char(raw: &str) -> Result<char, FormatError> {
    raw.chars().next_back().ok_or(FormatError::EmptyCode)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("0.9", "90%"; "typical coverage")]
    #[test_case("0.99", "99%"; "high coverage")]
    #[test_case("0.07", "7%"; "float noise is rounded away")]
    #[test_case("0.605", "60.5%"; "fractional percent")]
    #[test_case("1", "100%"; "integer input")]
    fn percent_renders(raw: &str, expected: &str) {
        assert_eq!(percent(raw).unwrap(), expected);
    }

    #[test]
    fn percent_rejects_text() {
        assert_eq!(
            percent("high"),
            Err(FormatError::NotANumber("high".to_string()))
        );
    }

    #[test_case("plA", "a")]
    #[test_case("ple", "e")]
    #[test_case("plN", "-")]
    #[test_case("plU", "n.a.")]
    fn pl_letter_decodes(raw: &str, expected: &str) {
        assert_eq!(pl_letter(raw).unwrap(), expected);
    }

    #[test]
    fn pl_letter_rejects_empty() {
        assert_eq!(pl_letter(""), Err(FormatError::EmptyCode));
    }

    #[test_case("sil1", "1")]
    #[test_case("sil3", "3")]
    #[test_case("silN", "-")]
    fn sil_level_decodes(raw: &str, expected: &str) {
        assert_eq!(sil_level(raw).unwrap(), expected);
    }

    #[test_case("1", "true")]
    #[test_case("0", "false")]
    #[test_case("-1", "false")]
    fn checkbox_renders(raw: &str, expected: &str) {
        assert_eq!(checkbox(raw).unwrap(), expected);
    }

    #[test]
    fn empty_checklist_is_empty() {
        assert_eq!(checklist("").unwrap(), Vec::<u8>::new());
        assert_eq!(checklist("  ").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn checklist_keeps_order() {
        assert_eq!(checklist("optA01, optB02").unwrap(), vec![1, 2]);
        assert_eq!(checklist("CATReq10,CATReq03").unwrap(), vec![10, 3]);
    }

    #[test]
    fn checklist_rejects_bad_token() {
        assert_eq!(
            checklist("PLReq01,PLReqXX"),
            Err(FormatError::ChecklistToken("PLReqXX".to_string()))
        );
    }

    #[test]
    fn pl_list_uses_the_same_empty_rule() {
        assert_eq!(pl_list("").unwrap(), "");
        assert_eq!(pl_list("plD, plE").unwrap(), "d, e");
    }

    #[test_case("-5", UNBOUNDED; "negative is unbounded")]
    #[test_case("-1", UNBOUNDED; "minus one is unbounded")]
    #[test_case("120000", "120000"; "finite is verbatim")]
    #[test_case("0", "0"; "zero is finite")]
    fn operations_renders(raw: &str, expected: &str) {
        assert_eq!(operations(raw).unwrap(), expected);
    }

    #[test_case("-1", true)]
    #[test_case("150", false)]
    #[test_case("", false)]
    fn fault_exclusion_from_sign(raw: &str, expected: bool) {
        assert_eq!(fault_excluded(raw).unwrap(), expected);
    }

    #[test]
    fn function_types_are_sorted_and_stripped() {
        assert_eq!(function_types("fncStop,fncStart"), "Start, Stop");
        assert_eq!(function_types(""), "");
    }

    #[test]
    fn technology_is_lower_cased() {
        assert_eq!(technology("tecElectromechanical"), "electromechanical");
        assert_eq!(technology("te"), "");
    }
}
