//! The safety function's PLr tab.
//!
//! The required performance level is either entered directly or read off
//! the risk graph from the severity, frequency and avoidance parameters.
//! Either way the resulting PLr is shown; the remaining fields belong to
//! exactly one of the two methods.

use crate::domain::{
    selection::{PlrMethod, Selection},
    Field, RenderError, Tab, TabContext,
};

use super::pl_letter;

const FIELDS: &[Field] = &[
    Field::untitled("plrdet").formatted(method),
    Field::new("Required Performance Level", "plr").formatted(pl_letter),
    // Direct entry.
    Field::new("Documentation", "plrdocumentation").shown_if(direct),
    Field::new("Document", "plrdocument").shown_if(direct),
    Field::new("Source", "plrstandard").shown_if(direct),
    Field::new("File", "plrstandardfile").shown_if(direct),
    // Risk graph.
    Field::new("Severity of injury", "riskparams")
        .formatted(severity)
        .shown_if(risk_graph),
    Field::new("Frequency and/or exposure times to hazard", "riskparamf")
        .formatted(frequency)
        .shown_if(risk_graph),
    Field::new("Possibility of avoiding hazard or limiting harm", "riskparamp")
        .formatted(avoidance)
        .shown_if(risk_graph),
    Field::new("Documentation", "plrgraphdocumentation").shown_if(risk_graph),
    Field::new("Document", "plrgraphdocument").shown_if(risk_graph),
];

/// The PLr tab of a safety function.
#[must_use]
pub fn tab() -> Tab {
    Tab::new("PLr", FIELDS)
}

fn selected(context: &TabContext<'_>) -> Result<PlrMethod, RenderError> {
    context.selection("plrdet")
}

fn direct(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == PlrMethod::Direct)
}

fn risk_graph(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == PlrMethod::RiskGraph)
}

fn method(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(PlrMethod::decode(raw)?.label().to_string())
}

/// Risk graph parameters are stored as `0` for the severe branch (S2, F2,
/// P2) and `1` for the mild one.
fn risk_parameter(prefix: char, raw: &str) -> Result<String, RenderError> {
    let level = match raw {
        "0" => '2',
        "1" => '1',
        _ => {
            return Err(crate::domain::selection::UnknownSelection {
                selection: "risk graph parameter",
                code: raw.to_string(),
            }
            .into());
        }
    };
    Ok(format!("{prefix}{level}"))
}

fn severity(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    risk_parameter('S', raw)
}

fn frequency(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    risk_parameter('F', raw)
}

fn avoidance(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    risk_parameter('P', raw)
}
