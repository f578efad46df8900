//! The project's Documentation tab.

use crate::domain::{Field, Tab};

use super::name_of;

const FIELDS: &[Field] = &[
    Field::untitled("name").formatted(name_of),
    Field::new("Creation date", "createdate"),
    Field::new("Home folder for standards", "standardsfolder"),
    Field::new("Home folder for documents", "documentsfolder"),
    Field::new("Project status", "status"),
    Field::new("Project number", "number"),
    Field::new("Project version", "version"),
    Field::new("Authors", "author"),
    Field::new("Project managers", "manager"),
    Field::new("Inspectors", "tester"),
    Field::new("Dangerous point/machine", "machinename"),
    Field::new("Documentation", "documentation"),
    Field::new("Document", "document"),
];

/// The Documentation tab of the project node.
#[must_use]
pub fn documentation() -> Tab {
    Tab::new("Documentation", FIELDS)
}

#[cfg(test)]
mod tests {
    use crate::{domain::tabs::testing::tab_lines, fixtures};

    #[test]
    fn lists_project_metadata() {
        let lines = tab_lines(&fixtures::demo(), "pr", "Documentation");

        assert_eq!(lines[0], "Name of project: Demo");
        assert!(lines.contains(&"Authors: J. Doe".to_string()));
        assert!(lines.contains(&"Dangerous point/machine: Press".to_string()));
        assert_eq!(lines.len(), FIELDS_LEN);
    }

    const FIELDS_LEN: usize = super::FIELDS.len();
}
