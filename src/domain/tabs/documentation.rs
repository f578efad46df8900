//! The Documentation tab shared by subsystems, blocks and elements.

use crate::domain::{
    format,
    selection::{Category, CategoryError},
    Field, RenderError, Tab, TabContext,
};

use super::name_of;

const FIELDS: &[Field] = &[
    Field::untitled("name").formatted(name_of),
    Field::new("Reference designator", "equipmentid"),
    Field::new("Inventory number", "inventoryno"),
    Field::new("Device Manufacturer", "manufacturer"),
    Field::new("Device Identifier", "deviceid"),
    Field::new("Device group", "devicegroup"),
    Field::new("Part number", "partno"),
    Field::new("Revision", "revision"),
    Field::new("Function", "functiontypes").formatted(function_types),
    Field::new("Technology", "technology").formatted(technology),
    Field::new("Category", "cat").formatted(category),
    Field::new("Use case", "usecase"),
    Field::new("Description of the use case", "usecasedocumentation"),
    Field::new("Documentation", "description"),
    Field::new("Document", "document"),
];

/// Per-kind variations of the Documentation tab.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Source names of fields the kind does not show.
    pub exclude: &'static [&'static str],
}

impl Options {
    /// Subsystems have a dedicated Category tab and no technology.
    pub const SUBSYSTEM: Self = Self {
        exclude: &["technology", "cat"],
    };

    /// Blocks show every field.
    pub const BLOCK: Self = Self { exclude: &[] };

    /// Elements have no category of their own.
    pub const ELEMENT: Self = Self { exclude: &["cat"] };
}

/// The Documentation tab with the given options applied.
#[must_use]
pub fn tab(options: Options) -> Tab {
    let fields: Vec<_> = FIELDS
        .iter()
        .filter(|field| !options.exclude.contains(&field.source_name()))
        .copied()
        .collect();
    Tab::new("Documentation", fields)
}

fn function_types(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(format::function_types(raw))
}

fn technology(_: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    Ok(format::technology(raw))
}

fn category(context: &TabContext<'_>, raw: &str) -> Result<String, RenderError> {
    match Category::decode(raw) {
        Ok(category) => Ok(category.to_string()),
        Err(CategoryError::Unknown(error)) => Err(error.into()),
        Err(CategoryError::Format(error)) => Err(RenderError::format(context, error)),
    }
}
