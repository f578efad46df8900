use serde::{Deserialize, Serialize};

/// Presentation settings for the report.
///
/// The defaults reproduce the layout SISTEMA users expect; a project may
/// override them with an `ssm2txt.toml` file next to the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Width of the horizontal rule closing each node's title block.
    title_rule_width: usize,

    /// Width of the horizontal rule underlining each tab title.
    tab_rule_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title_rule_width: default_title_rule_width(),
            tab_rule_width: default_tab_rule_width(),
        }
    }
}

impl Config {
    /// The name of the configuration file looked up next to a source
    /// document.
    pub const FILE_NAME: &'static str = "ssm2txt.toml";

    /// Parses the configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is invalid, names an unknown
    /// version, or sets a rule width of zero.
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(content).map_err(|e| format!("Failed to parse config file: {e}"))?;
        if config.title_rule_width == 0 || config.tab_rule_width == 0 {
            return Err("Invalid config file: rule widths must be at least 1".to_string());
        }
        Ok(config)
    }

    /// Returns the width of the rule closing a node's title block.
    #[must_use]
    pub const fn title_rule_width(&self) -> usize {
        self.title_rule_width
    }

    /// Returns the width of the rule underlining a tab title.
    #[must_use]
    pub const fn tab_rule_width(&self) -> usize {
        self.tab_rule_width
    }
}

const fn default_title_rule_width() -> usize {
    80
}

const fn default_tab_rule_width() -> usize {
    40
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_title_rule_width")]
        title_rule_width: usize,

        #[serde(default = "default_tab_rule_width")]
        tab_rule_width: usize,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                title_rule_width,
                tab_rule_width,
            } => Self {
                title_rule_width,
                tab_rule_width,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            title_rule_width: config.title_rule_width,
            tab_rule_width: config.tab_rule_width,
        }
    }
}
