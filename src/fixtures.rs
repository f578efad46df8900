//! Synthetic project documents for tests.
//!
//! Rows of each node kind are pre-filled with every attribute the renderer
//! reads, so tests only spell out the values they care about.

use crate::storage::RowStore;

const PROJECT: &[(&str, &str)] = &[
    ("name", "Demo"),
    ("createdate", "2022-05-01"),
    ("standardsfolder", ""),
    ("documentsfolder", ""),
    ("status", "Draft"),
    ("number", "P-1"),
    ("version", "1"),
    ("author", "J. Doe"),
    ("manager", ""),
    ("tester", ""),
    ("machinename", "Press"),
    ("documentation", ""),
    ("document", ""),
];

const SAFETY_FUNCTION: &[(&str, &str)] = &[
    ("name", "Stop"),
    ("sftype", "Safety-related stop"),
    ("triggerevent", "Door opened"),
    ("reaction", ""),
    ("safestate", "Motor off"),
    ("opmode", "Automatic"),
    ("requestfrequency", ""),
    ("responsetime", ""),
    ("priority", ""),
    ("documentation", ""),
    ("document", ""),
    ("plrdet", "detDirect"),
    ("plr", "plC"),
    ("plrdocumentation", ""),
    ("plrdocument", ""),
    ("plrstandard", "ISO 13849-1"),
    ("plrstandardfile", ""),
    ("riskparams", "0"),
    ("riskparamf", "1"),
    ("riskparamp", "1"),
    ("plrgraphdocumentation", ""),
    ("plrgraphdocument", ""),
];

const DOCUMENTATION: &[(&str, &str)] = &[
    ("equipmentid", ""),
    ("inventoryno", ""),
    ("manufacturer", "ACME"),
    ("deviceid", ""),
    ("devicegroup", ""),
    ("partno", ""),
    ("revision", ""),
    ("functiontypes", "fncStop"),
    ("technology", "tecElectronic"),
    ("cat", "catB"),
    ("usecase", ""),
    ("usecasedocumentation", ""),
    ("description", ""),
    ("document", ""),
];

const SUBSYSTEM: &[(&str, &str)] = &[
    ("name", "Sensor"),
    ("pldet", "detSubItems"),
    ("pldirectbindcal", "plE"),
    ("pldirectnobind", "plD"),
    ("sildirectbindcal", "sil3"),
    ("sildirectnobind", "sil2"),
    ("isplpfhbind", "0"),
    ("pfh", "1.0E-7"),
    ("pldirectsoftware", "plE"),
    ("plconditions", ""),
    ("pldocumentation", ""),
    ("missiontime", "20"),
    ("reducedtestingrate", "0"),
    ("catconditions", ""),
    ("catdocumentation", ""),
    ("catstandard", ""),
    ("catstandardfile", ""),
    ("mttfddet", "detSubItems"),
    ("mttfd", "62"),
    ("mttfddocumentation", ""),
    ("dcavgdet", "detSubItems"),
    ("dcavg", "0.9"),
    ("dcavgdocumentation", ""),
    ("ccfscoredet", "detDirect"),
    ("ccfscore", "65"),
    ("ccfdocumentation", ""),
    ("ccfdocument", ""),
];

const COMPONENT: &[(&str, &str)] = &[
    ("name", "Component"),
    ("mttfddet", "detDirect"),
    ("mttfd", "150"),
    ("calcb10ddet", "calcB10dB10"),
    ("b10", "20000"),
    ("b10d", "40000"),
    ("rdfb10", "0.5"),
    ("nop", "57600"),
    ("nopday", "240"),
    ("nophour", "16"),
    ("nopcycle", "240"),
    ("calcmttfddet", "calcMTTFdMTTF"),
    ("lambda", "1.0E-6"),
    ("mttf", "200"),
    ("mtbf", "210"),
    ("rdfmttf", "0.5"),
    ("mttfddocumentation", ""),
    ("missiontime", "20"),
    ("dcdet", "detDirect"),
    ("dc", "0.9"),
    ("dcdocumentation", ""),
    ("dcmeasureopoid", ""),
    ("dcmeasuredocumentation", ""),
];

/// Builds the XML text of a project document, one table per kind, in the
/// order tables are first used.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    tables: Vec<(String, Vec<Vec<(String, String)>>)>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raw row with exactly the given attributes (plus `oid`).
    pub fn row(mut self, table: &str, oid: &str, attributes: &[(&str, &str)]) -> Self {
        let mut row = vec![("oid".to_string(), oid.to_string())];
        row.extend(
            attributes
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string())),
        );

        if let Some((_, rows)) = self.tables.iter_mut().find(|(name, _)| name == table) {
            rows.push(row);
        } else {
            self.tables.push((table.to_string(), vec![row]));
        }
        self
    }

    fn node(
        self,
        table: &str,
        oid: &str,
        parent: Option<(&str, &str)>,
        defaults: &[&[(&str, &str)]],
        overrides: &[(&str, &str)],
    ) -> Self {
        let mut attributes: Vec<(&str, &str)> = Vec::new();
        if let Some(parent) = parent {
            attributes.push(parent);
        }
        for &(name, value) in defaults.iter().copied().flatten() {
            if !attributes.iter().any(|(existing, _)| *existing == name) {
                attributes.push((name, value));
            }
        }
        for &(name, value) in overrides {
            match attributes.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = value,
                None => attributes.push((name, value)),
            }
        }
        self.row(table, oid, &attributes)
    }

    pub fn project(self, oid: &str, overrides: &[(&str, &str)]) -> Self {
        self.node("projectops", oid, None, &[PROJECT], overrides)
    }

    pub fn safety_function(self, oid: &str, project: &str, overrides: &[(&str, &str)]) -> Self {
        self.node(
            "sfops",
            oid,
            Some(("projectopoid", project)),
            &[SAFETY_FUNCTION],
            overrides,
        )
    }

    pub fn subsystem(self, oid: &str, safety_function: &str, overrides: &[(&str, &str)]) -> Self {
        self.node(
            "componentops",
            oid,
            Some(("sfopoid", safety_function)),
            &[SUBSYSTEM, DOCUMENTATION],
            overrides,
        )
    }

    pub fn channel(self, oid: &str, subsystem: &str, channel_type: &str) -> Self {
        self.row(
            "channelops",
            oid,
            &[("componentopoid", subsystem), ("channeltype", channel_type)],
        )
    }

    pub fn block(self, oid: &str, channel: &str, overrides: &[(&str, &str)]) -> Self {
        self.node(
            "blocops",
            oid,
            Some(("parentopoid", channel)),
            &[COMPONENT, DOCUMENTATION],
            overrides,
        )
    }

    pub fn element(self, oid: &str, block: &str, overrides: &[(&str, &str)]) -> Self {
        self.node(
            "elementops",
            oid,
            Some(("parentopoid", block)),
            &[COMPONENT, DOCUMENTATION],
            overrides,
        )
    }

    /// Renders the document as XML text.
    pub fn build(&self) -> String {
        let mut xml =
            String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sistema>\n  <tables>\n");
        for (name, rows) in &self.tables {
            xml.push_str(&format!("    <table table_name=\"{}\">\n      <rows>\n", escape(name)));
            for row in rows {
                xml.push_str("        <row");
                for (attribute, value) in row {
                    xml.push_str(&format!(" {attribute}=\"{}\"", escape(value)));
                }
                xml.push_str("/>\n");
            }
            xml.push_str("      </rows>\n    </table>\n");
        }
        xml.push_str("  </tables>\n</sistema>\n");
        xml
    }

    /// Parses the document into a row store.
    pub fn store(&self) -> RowStore {
        RowStore::parse(&self.build()).expect("fixture documents are well-formed")
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The smallest complete project: one safety function with one subsystem
/// whose PL is entered directly.
pub fn demo() -> DocumentBuilder {
    DocumentBuilder::new()
        .project("pr", &[("name", "Demo")])
        .safety_function("sf", "pr", &[("name", "Stop"), ("plr", "plC")])
        .subsystem(
            "sb",
            "sf",
            &[
                ("name", "Guard"),
                ("cat", "catB"),
                ("pldet", "detDirect"),
                ("pldirectnobind", "plC"),
            ],
        )
}
