//! The subsystem's CCF tab.
//!
//! Measures against common cause failure are stored in their own table and
//! refer back to the subsystem they are applied to.

use crate::domain::{
    selection::{CcfMethod, Selection},
    Field, RenderError, Tab, TabContext,
};

const MEASURES_TABLE: &str = "ccfmeasureops";

const FIELDS: &[Field] = &[
    Field::untitled("ccfscoredet").formatted(method),
    Field::computed(None, "measures", applied_measures).shown_if(measures),
    Field::new("Total points", "ccfscore").shown_if(direct),
    Field::new("Documentation", "ccfdocumentation"),
    Field::new("Document", "ccfdocument"),
];

/// The CCF tab of a subsystem. CCF only applies to architectures with
/// diagnostics (categories 2 to 4) whose PL is not entered directly.
#[must_use]
pub fn tab() -> Tab {
    Tab::new("CCF", FIELDS).shown_if(applicable)
}

fn applicable(context: &TabContext<'_>) -> Result<bool, RenderError> {
    let state = context.node().state();
    let derived = state.pl_method.is_some_and(|method| !method.is_direct());
    let diagnostics = state.category.is_some_and(|category| category.has_diagnostics());
    Ok(derived && diagnostics)
}

fn selected(context: &TabContext<'_>) -> Result<CcfMethod, RenderError> {
    context.selection("ccfscoredet")
}

fn direct(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == CcfMethod::Direct)
}

fn measures(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == CcfMethod::Measures)
}

fn method(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(CcfMethod::decode(raw)?.label().to_string())
}

fn applied_measures(context: &TabContext<'_>) -> Result<String, RenderError> {
    let mut lines = Vec::new();
    for row in context
        .store()
        .rows_referencing(MEASURES_TABLE, "componentopoid", context.node().oid())
    {
        lines.push(format!("Type: {}", row.require("heading")?));
        lines.push(format!("Measure: {}", row.require("description")?));
        lines.push(format!("Points: {}", row.require("score")?));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::{
        domain::tabs::testing::{tab_lines, tab_text},
        fixtures::DocumentBuilder,
    };

    fn document(overrides: &[(&str, &str)]) -> DocumentBuilder {
        DocumentBuilder::new()
            .project("pr", &[])
            .safety_function("sf", "pr", &[])
            .subsystem("sb", "sf", overrides)
            .subsystem("other", "sf", &[])
            .row(
                "ccfmeasureops",
                "c1",
                &[
                    ("componentopoid", "sb"),
                    ("heading", "Separation"),
                    ("description", "Physical separation"),
                    ("score", "15"),
                ],
            )
            .row(
                "ccfmeasureops",
                "c2",
                &[
                    ("componentopoid", "other"),
                    ("heading", "Diversity"),
                    ("description", "Different technologies"),
                    ("score", "20"),
                ],
            )
            .row(
                "ccfmeasureops",
                "c3",
                &[
                    ("componentopoid", "sb"),
                    ("heading", "Environmental"),
                    ("description", "EMC protection"),
                    ("score", "25"),
                ],
            )
    }

    #[test_case("catB", "detSubItems", false; "category b")]
    #[test_case("cat1", "detSubItems", false; "category 1")]
    #[test_case("cat2", "detSubItems", true; "category 2")]
    #[test_case("cat4", "detSubItemsSimple", true; "simplified method")]
    #[test_case("cat3", "detDirect", false; "direct pl")]
    #[test_case("catN", "detSubItems", false; "unknown category")]
    fn shown_for_derived_pl_with_diagnostics(cat: &str, pldet: &str, shown: bool) {
        let text = tab_text(&document(&[("cat", cat), ("pldet", pldet)]), "sb", "CCF");

        assert_eq!(text.is_some(), shown);
    }

    #[test]
    fn direct_score() {
        let lines = tab_lines(
            &document(&[("cat", "cat3"), ("ccfscoredet", "detDirect")]),
            "sb",
            "CCF",
        );

        assert_eq!(
            lines,
            [
                "Enter CCF evaluation directly",
                "Total points: 65",
                "Documentation: ",
                "Document: "
            ]
        );
    }

    #[test]
    fn measures_in_document_order() {
        let lines = tab_lines(
            &document(&[("cat", "cat3"), ("ccfscoredet", "detMeasures")]),
            "sb",
            "CCF",
        );

        assert_eq!(
            lines,
            [
                "Select applied measures to evaluate CCF",
                "Type: Separation",
                "Measure: Physical separation",
                "Points: 15",
                "Type: Environmental",
                "Measure: EMC protection",
                "Points: 25",
                "Documentation: ",
                "Document: "
            ]
        );
    }
}
