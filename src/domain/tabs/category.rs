//! The subsystem's Category tab.

use crate::domain::{
    format,
    selection::Category,
    tab::FormatResultExt,
    Field, RenderError, Tab, TabContext,
};

use super::checkbox;

const FIELDS: &[Field] = &[
    Field::computed(Some("Category of subsystem"), "category", category),
    Field::new("Reduced test frequency", "reducedtestingrate")
        .formatted(checkbox)
        .shown_if(category_two),
    Field::new("Requirements for the category", "catconditions")
        .formatted(requirements)
        .shown_if(category_known),
    Field::new("Documentation", "catdocumentation"),
    Field::new("Source", "catstandard"),
    Field::new("File", "catstandardfile"),
];

/// Requirement texts keyed by option number, with the categories each
/// requirement applies to.
const REQUIREMENTS: &[(u8, &str, &str)] = &[
    (1, "B1234", "Basic safety principles are being used."),
    (2, "1", "Well-tried components are being used."),
    (3, "1234", "Well-tried safety principles are being used."),
    (4, "34", "A single fault tolerance and reasonable fault detection are given."),
    (5, "4", "Accumulation of faults does not lead to a loss of the safety function."),
    (6, "2", "The requirements for the test frequency are satisfied."),
    (10, "B1234", "Accordance with relevant standards to withstand the expected influences."),
];

/// The Category tab of a subsystem; hidden when the PL is entered directly.
#[must_use]
pub fn tab() -> Tab {
    Tab::new("Category", FIELDS).shown_if(pl_derived)
}

fn pl_derived(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(context
        .node()
        .state()
        .pl_method
        .is_some_and(|method| !method.is_direct()))
}

fn selected(context: &TabContext<'_>) -> Category {
    context.node().state().category.unwrap_or(Category::Unknown)
}

fn category_two(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context) == Category::Two)
}

fn category_known(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context) != Category::Unknown)
}

fn category(context: &TabContext<'_>) -> Result<String, RenderError> {
    Ok(selected(context).to_string())
}

/// Lists the ticked requirements that apply to the category, one per line.
/// The list starts on the line after the title.
fn requirements(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    let Some(symbol) = selected(context).symbol() else {
        return Ok(String::new());
    };

    let mut lines = vec![""];
    for option in format::checklist(raw).in_row(context)? {
        let &(_, categories, text) = REQUIREMENTS
            .iter()
            .find(|&&(key, ..)| key == option)
            .ok_or(format::FormatError::ChecklistOption(option))
            .in_row(context)?;
        if categories.contains(symbol) {
            lines.push(text);
        }
    }

    Ok(lines.join("\n"))
}
