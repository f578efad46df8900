//! Diagnostic coverage: the DC tab of blocks and elements and the DCavg tab
//! of subsystems.
//!
//! A block or element either enters its DC directly, averages it over its
//! elements, or selects one of the applied diagnostic measures defined in a
//! separate table. A selected measure is shown with its type, description,
//! DC range and the PLs it is insufficient for.

use crate::domain::{
    format,
    selection::{DcMethod, Selection, UnknownSelection},
    tab::FormatResultExt,
    Field, RenderError, Tab, TabContext,
};

use super::percent;

const FIELDS: &[Field] = &[
    Field::untitled("dcdet").formatted(method),
    // Direct entry.
    Field::new("Diagnostic coverage", "dc")
        .formatted(percent)
        .shown_if(direct),
    Field::new("Documentation", "dcdocumentation").shown_if(direct),
    // Applied measures.
    Field::computed(None, "measure", measure).shown_if(measures),
    Field::new("Documentation", "dcmeasuredocumentation").shown_if(measures),
];

const AVERAGE_FIELDS: &[Field] = &[
    Field::untitled("dcavgdet").formatted(average_method),
    Field::new("DCavg", "dcavg").formatted(percent),
    Field::new("Documentation", "dcavgdocumentation"),
];

/// The DC tab of a block or element.
#[must_use]
pub fn tab() -> Tab {
    Tab::new("DC", FIELDS).shown_if(relevant)
}

/// The DCavg tab of a subsystem.
#[must_use]
pub fn average() -> Tab {
    Tab::new("DCavg", AVERAGE_FIELDS).shown_if(relevant)
}

fn relevant(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(context.node().state().dc_relevant)
}

fn selected(context: &TabContext<'_>) -> Result<DcMethod, RenderError> {
    context.selection("dcdet")
}

fn direct(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == DcMethod::Direct)
}

fn measures(context: &TabContext<'_>) -> Result<bool, RenderError> {
    Ok(selected(context)? == DcMethod::Measures)
}

fn method(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(DcMethod::decode(raw)?.label(context.node().kind().sub_items())?)
}

fn average_method(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    match DcMethod::decode(raw)? {
        DcMethod::Direct => Ok("Enter DCavg value directly".to_string()),
        DcMethod::SubItems => Ok("Determine DCavg value from blocks".to_string()),
        DcMethod::Measures => Err(UnknownSelection {
            selection: "DCavg determination method",
            code: raw.to_string(),
        }
        .into()),
    }
}

/// Renders the applied measure the node refers to. The measure lives in
/// another table, so a dangling reference is an error.
fn measure(context: &TabContext<'_>) -> Result<String, RenderError> {
    let row = context.store().row(context.attribute("dcmeasureopoid")?)?;
    let dc = |attribute: &str| -> Result<String, RenderError> {
        format::percent(row.require(attribute)?).in_row(context)
    };

    let lines = [
        format!("Type of measure: {}", row.require("heading")?),
        format!("Description of measure: {}", row.require("description")?),
        format!("DC selection from: {}", dc("dcmin")?),
        format!("DC selection to: {}", dc("dcmax")?),
        format!("Diagnostic coverage: {}", dc("dc")?),
        format!(
            "Measure insufficient for PL: {}",
            format::pl_list(row.require("insufficientpls")?).in_row(context)?
        ),
    ];
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::{
            tabs::testing::{tab_lines, tab_text, titles},
            RenderError, TabContext, Tree,
        },
        fixtures::DocumentBuilder,
        storage::NotFound,
    };

    /// A block (with one element) in channel 1 of a category 3 subsystem
    /// whose DCavg is derived from blocks.
    fn document(block: &[(&str, &str)], element: &[(&str, &str)]) -> DocumentBuilder {
        DocumentBuilder::new()
            .project("pr", &[])
            .safety_function("sf", "pr", &[])
            .subsystem(
                "sb",
                "sf",
                &[("cat", "cat3"), ("pldet", "detSubItems"), ("dcavgdet", "detSubItems")],
            )
            .channel("ch", "sb", "ch1")
            .block("bl", "ch", block)
            .element("el", "bl", element)
            .row(
                "dcmeasureops",
                "m1",
                &[
                    ("heading", "Input device"),
                    ("description", "Cross monitoring"),
                    ("dcmin", "0.9"),
                    ("dcmax", "0.99"),
                    ("dc", "0.99"),
                    ("insufficientpls", "plE"),
                ],
            )
    }

    #[test]
    fn direct_dc_is_a_percentage() {
        let lines = tab_lines(&document(&[("dcdet", "detDirect"), ("dc", "0.6")], &[]), "bl", "DC");

        assert_eq!(
            lines,
            ["Enter DC value directly", "Diagnostic coverage: 60%", "Documentation: "]
        );
    }

    #[test]
    fn selected_measure_is_expanded() {
        let lines = tab_lines(
            &document(&[("dcdet", "detMeasures"), ("dcmeasureopoid", "m1")], &[]),
            "bl",
            "DC",
        );

        assert_eq!(
            lines,
            [
                "Select applied measures to evaluate DC",
                "Type of measure: Input device",
                "Description of measure: Cross monitoring",
                "DC selection from: 90%",
                "DC selection to: 99%",
                "Diagnostic coverage: 99%",
                "Measure insufficient for PL: e",
                "Documentation: ",
            ]
        );
    }

    #[test]
    fn sub_items_show_only_the_method() {
        let document = document(&[("dcdet", "detSubItems")], &[("dcdet", "detDirect")]);

        assert_eq!(tab_lines(&document, "bl", "DC"), ["Determine DC value from elements"]);
        assert_eq!(
            titles(&tab_lines(&document, "el", "DC")),
            ["Diagnostic coverage", "Documentation"]
        );
    }

    #[test]
    fn element_tab_hidden_unless_block_derives_from_elements() {
        let document = document(&[("dcdet", "detDirect")], &[]);

        assert!(tab_text(&document, "bl", "DC").is_some());
        assert_eq!(tab_text(&document, "el", "DC"), None);
    }

    #[test]
    fn dangling_measure_is_not_found() {
        let store = document(&[("dcdet", "detMeasures"), ("dcmeasureopoid", "gone")], &[]).store();
        let tree = Tree::build(&store).unwrap();
        let node = tree.node(tree.find("bl").unwrap());
        let context = TabContext::new(node, &store);

        assert_eq!(
            super::tab().render_fields(&context),
            Err(RenderError::NotFound(NotFound("gone".to_string())))
        );
    }

    #[test]
    fn average_tab() {
        let lines = tab_lines(&document(&[], &[]), "sb", "DCavg");

        assert_eq!(lines, ["Determine DCavg value from blocks", "DCavg: 90%", "Documentation: "]);
    }

    #[test]
    fn average_hidden_below_category_two() {
        let document = DocumentBuilder::new()
            .project("pr", &[])
            .safety_function("sf", "pr", &[])
            .subsystem("sb", "sf", &[("cat", "cat1"), ("pldet", "detSubItems")]);

        assert_eq!(tab_text(&document, "sb", "DCavg"), None);
    }
}
