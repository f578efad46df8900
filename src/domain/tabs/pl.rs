//! The subsystem's PL tab.
//!
//! The PL of a subsystem is entered directly (as a PL or as a SIL, each with
//! a PFHD) or derived from the subsystem's sub-items. Directly entered
//! values come from one of two attributes depending on whether the PL/SIL is
//! linked to the PFHD. Derived methods instead show the checklist of
//! conditions the user confirmed.

use crate::domain::{
    format,
    selection::{PlMethod, Selection},
    tab::FormatResultExt,
    Field, RenderError, Tab, TabContext,
};

use super::{checkbox, pl_letter};

const FIELDS: &[Field] = &[
    Field::untitled("pldet").formatted(method),
    Field::computed(Some("Performance Level"), "pl", performance_level).shown_if(pl_direct),
    Field::computed(Some("Safety Integrity Level"), "sil", integrity_level).shown_if(sil_direct),
    Field::new("PL/SIL linked to PFHD", "isplpfhbind")
        .formatted(checkbox)
        .shown_if(direct),
    Field::new("PFHD", "pfh").shown_if(direct),
    Field::new("Software suitable up to PL", "pldirectsoftware")
        .formatted(pl_letter)
        .shown_if(direct),
    Field::untitled("plconditions")
        .formatted(conditions)
        .shown_if(derived),
    Field::new("Documentation", "pldocumentation"),
    Field::new("Mission time", "missiontime").shown_if(direct),
];

/// Conditions confirmed when deriving the PL, keyed by option number.
/// Options 5 to 7 only apply to the simplified method.
const CONDITIONS: &[(u8, &str)] = &[
    (1, "Behaviour of the safety function under fault conditions"),
    (2, "safety-related software according to clause 4.6 or no software included"),
    (3, "systematic failure"),
    (4, "Ability to perform a safety function under expected environmental conditions"),
    (5, "subsystem is the output part of the SRP/CS"),
    (6, "subsystem consists of mechanical, hydraulic or pneumatic components"),
    (7, "no application-specific reliability data are available for the components"),
];

/// The PL tab of a subsystem.
#[must_use]
pub fn tab() -> Tab {
    Tab::new("PL", FIELDS)
}

fn selected(context: &TabContext<'_>) -> Result<PlMethod, RenderError> {
    context.selection("pldet")
}

fn pl_direct(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == PlMethod::Direct)
}

fn sil_direct(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == PlMethod::SilDirect)
}

fn direct(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)?.is_direct())
}

fn derived(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(!selected(context)?.is_direct())
}

fn method(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(PlMethod::decode(raw)?.label().to_string())
}

fn linked_to_pfhd(context: &TabContext<'_>) -> Result<bool, RenderError> {
    format::checked(context.attribute("isplpfhbind")?).in_row(context)
}

fn performance_level(context: &TabContext<'_>) -> Result<String, RenderError> {
    let attribute = if linked_to_pfhd(context)? {
        "pldirectbindcal"
    } else {
        "pldirectnobind"
    };
    format::pl_letter(context.attribute(attribute)?).in_row(context)
}

fn integrity_level(context: &TabContext<'_>) -> Result<String, RenderError> {
    let attribute = if linked_to_pfhd(context)? {
        "sildirectbindcal"
    } else {
        "sildirectnobind"
    };
    format::sil_level(context.attribute(attribute)?).in_row(context)
}

/// The stored checklist may hold options the selected method does not
/// offer; only the applicable ones are listed.
fn conditions(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    let limit = if selected(context)? == PlMethod::SubItemsSimple { 7 } else { 4 };

    let lines = format::checklist(raw)
        .in_row(context)?
        .into_iter()
        .filter(|&option| option <= limit)
        .map(|option| {
            CONDITIONS
                .iter()
                .find(|&&(key, _)| key == option)
                .map(|&(_, text)| text)
                .ok_or(format::FormatError::ChecklistOption(option))
                .in_row(context)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines.join("\n"))
}
