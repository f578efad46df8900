//! The tab catalogue: every tab of every node kind.
//!
//! Each module owns its field table, the predicates gating its fields, and
//! the formatters and computations those fields map to. Tabs shared by
//! several node kinds ([`documentation`], [`mttfd`]) are templates taking a
//! small set of per-kind options.

pub mod category;
pub mod ccf;
pub mod dc;
pub mod documentation;
pub mod mttfd;
pub mod pl;
pub mod plr;
pub mod project;
pub mod safety_function;

use crate::domain::{format, tab::FormatResultExt, RenderError, TabContext};

/// Formats a name field as "Name of <kind>: <name>".
///
/// # Errors
///
/// Never fails; the signature matches [`Formatter`](crate::domain::tab::Formatter).
pub fn name_of(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(format!("Name of {}: {raw}", context.node().kind().noun()))
}

/// Formats an integer checkbox attribute.
///
/// # Errors
///
/// Returns an error if the value is not an integer.
pub fn checkbox(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    format::checkbox(raw).in_row(context)
}

/// Formats a fraction as a percentage.
///
/// # Errors
///
/// Returns an error if the value is not a number.
pub fn percent(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    format::percent(raw).in_row(context)
}

/// Formats a PL code as its letter.
///
/// # Errors
///
/// Returns an error if the code is empty.
pub fn pl_letter(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    format::pl_letter(raw).in_row(context)
}
