//! The safety function's Documentation tab.

use crate::domain::{Field, Tab};

use super::name_of;

const FIELDS: &[Field] = &[
    Field::untitled("name").formatted(name_of),
    Field::new("Type of safety function", "sftype"),
    Field::new("Triggering event", "triggerevent"),
    Field::new("Reaction and Behaviour on power failure", "reaction"),
    Field::new("Safe state", "safestate"),
    Field::new("Operation mode", "opmode"),
    Field::new("Demand rate", "requestfrequency"),
    Field::new("Running-on time", "responsetime"),
    Field::new("Priority", "priority"),
    Field::new("Documentation", "documentation"),
    Field::new("Document", "document"),
];

/// The Documentation tab of a safety function.
#[must_use]
pub fn documentation() -> Tab {
    Tab::new("Documentation", FIELDS)
}

#[cfg(test)]
mod tests {
    use crate::{domain::tabs::testing::tab_lines, fixtures};

    #[test]
    fn names_the_safety_function() {
        let lines = tab_lines(&fixtures::demo(), "sf", "Documentation");

        assert_eq!(lines[0], "Name of safety function: Stop");
        assert_eq!(lines[1], "Type of safety function: Safety-related stop");
        assert!(lines.contains(&"Safe state: Motor off".to_string()));
    }
}
