//! The MTTFD tab shared by subsystems, blocks and elements.
//!
//! Blocks and elements can enter their MTTFD directly (or claim a fault
//! exclusion), derive it from wear data (B10/B10D) or from failure-rate data
//! (lambda, MTTF or MTBF). A subsystem only offers direct entry and
//! derivation from its blocks, so its variant of the tab drops the fields of
//! the other methods.
//!
//! A claimed fault exclusion replaces the MTTFD value with
//! [`FAULT_EXCLUSION`](format::FAULT_EXCLUSION) and hides the fields of the
//! wear-data and failure-rate methods.

use crate::domain::{
    format,
    selection::{B10Input, FailureRateInput, MttfdMethod, Selection},
    tab::FormatResultExt,
    Field, RenderError, Tab, TabContext,
};

use super::percent;

const FIELDS: &[Field] = &[
    Field::untitled("mttfddet").formatted(method),
    Field::new("MTTFD", "mttfd").formatted(mttfd),
    Field::computed(Some("Fault exclusion"), "fault_exclusion", fault_exclusion)
        .shown_if(direct_or_excluded),
    // B10/B10D.
    Field::new("Use B10/B10D", "calcb10ddet")
        .formatted(b10_input)
        .shown_if(wear_data),
    Field::new("B10", "b10").shown_if(b10),
    Field::new("B10D", "b10d").shown_if(b10d),
    Field::new("B10 RDF", "rdfb10").formatted(percent).shown_if(b10),
    Field::new("nop", "nop").formatted(operations).shown_if(wear_data),
    Field::new("d_op", "nopday").shown_if(wear_data),
    Field::new("h_op", "nophour").shown_if(wear_data),
    Field::new("t_cycle", "nopcycle").shown_if(wear_data),
    // Lambda/MTTF/MTBF.
    Field::new("Use Lambda/MTTF/MTBF", "calcmttfddet")
        .formatted(failure_rate_input)
        .shown_if(failure_rate),
    Field::new("Lambda", "lambda").shown_if(lambda),
    Field::new("MTTF", "mttf").shown_if(mttf),
    Field::new("MTBF", "mtbf").shown_if(mtbf),
    Field::new("Lambda/MTTF/MTBF RDF", "rdfmttf")
        .formatted(percent)
        .shown_if(failure_rate),
    Field::new("Documentation", "mttfddocumentation"),
    Field::new("Mission time", "missiontime"),
];

/// Per-kind variations of the MTTFD tab.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Source names of fields the kind does not show.
    pub exclude: &'static [&'static str],
}

impl Options {
    /// Subsystems enter their MTTFD directly or derive it from blocks.
    pub const SUBSYSTEM: Self = Self {
        exclude: &[
            "fault_exclusion",
            "calcb10ddet",
            "b10",
            "b10d",
            "rdfb10",
            "nop",
            "nopday",
            "nophour",
            "nopcycle",
            "calcmttfddet",
            "lambda",
            "mttf",
            "mtbf",
            "rdfmttf",
            "missiontime",
        ],
    };

    /// Blocks and elements show every field.
    pub const COMPONENT: Self = Self { exclude: &[] };
}

/// The MTTFD tab with the given options applied. The tab is only shown
/// when the node's MTTFD contributes to its parent's.
#[must_use]
pub fn tab(options: Options) -> Tab {
    let fields: Vec<_> = FIELDS
        .iter()
        .filter(|field| !options.exclude.contains(&field.source_name()))
        .copied()
        .collect();
    Tab::new("MTTFD", fields).shown_if(relevant)
}

fn relevant(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(context.node().state().mttfd_relevant)
}

fn selected(context: &TabContext<'_>) -> Result<MttfdMethod, RenderError> {
    context.selection("mttfddet")
}

fn excluded(context: &TabContext<'_>) -> Result<bool, RenderError> {
    format::fault_excluded(context.attribute("mttfd")?).in_row(context)
}

fn direct_or_excluded(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == MttfdMethod::Direct || excluded(context)?)
}

fn wear_data(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == MttfdMethod::B10d && !excluded(context)?)
}

fn b10(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(wear_data(context)? && context.selection::<B10Input>("calcb10ddet")? == B10Input::B10)
}

fn b10d(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(wear_data(context)? && context.selection::<B10Input>("calcb10ddet")? == B10Input::B10d)
}

fn failure_rate(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == MttfdMethod::FailureRate && !excluded(context)?)
}

fn failure_rate_is(context: &TabContext<'_>, input: FailureRateInput) -> Result<bool, RenderError> {
    Ok(failure_rate(context)? && context.selection::<FailureRateInput>("calcmttfddet")? == input)
}

fn lambda(context: &TabContext<'_>) -> Result<bool, RenderError> {
    failure_rate_is(context, FailureRateInput::Lambda)
}

fn mttf(context: &TabContext<'_>) -> Result<bool, RenderError> {
    failure_rate_is(context, FailureRateInput::Mttf)
}

fn mtbf(context: &TabContext<'_>) -> Result<bool, RenderError> {
    failure_rate_is(context, FailureRateInput::Mtbf)
}

fn method(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(MttfdMethod::decode(raw)?.label(context.node().kind().sub_items())?)
}

fn mttfd(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    if format::fault_excluded(raw).in_row(context)? {
        Ok(format::FAULT_EXCLUSION.to_string())
    } else {
        Ok(raw.to_string())
    }
}

fn fault_exclusion(context: &TabContext<'_>) -> Result<String, RenderError> {
    Ok(excluded(context)?.to_string())
}

fn b10_input(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(B10Input::decode(raw)?.label().to_string())
}

fn failure_rate_input(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    FailureRateInput::decode(raw)?;
    Ok(format::strip_chars(raw, "calcMTTFd".len()).to_string())
}

fn operations(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    format::operations(raw).in_row(context)
}
