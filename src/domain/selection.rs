//! Enumerated selections stored as prefixed codes.
//!
//! Many parameter groups in SISTEMA are driven by a single "determination
//! method" attribute (`pldet`, `mttfddet`, `dcdet`, ...) whose value picks one
//! of a handful of mutually exclusive entry methods. Each selection type
//! owns an immutable table from code to variant.

use std::fmt;

use crate::domain::format::{self, FormatError};

/// A set of mutually exclusive options encoded as string codes.
pub trait Selection: Copy + Eq + 'static {
    /// Human-readable name of the selection, used in error messages.
    const NAME: &'static str;

    /// Every code with the variant it selects.
    const CODES: &'static [(&'static str, Self)];

    /// Decodes a raw attribute value.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSelection`] if the code is not in [`Self::CODES`].
    fn decode(code: &str) -> Result<Self, UnknownSelection> {
        Self::CODES
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|&(_, selection)| selection)
            .ok_or_else(|| UnknownSelection {
                selection: Self::NAME,
                code: code.to_string(),
            })
    }
}

/// A raw code did not match any option of a selection.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {selection} '{code}'")]
pub struct UnknownSelection {
    /// The selection being decoded.
    pub selection: &'static str,
    /// The offending code.
    pub code: String,
}

/// How the required performance level of a safety function is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlrMethod {
    /// PLr entered directly.
    Direct,
    /// PLr derived from the S/F/P risk graph.
    RiskGraph,
}

impl Selection for PlrMethod {
    const NAME: &'static str = "PLr determination method";
    const CODES: &'static [(&'static str, Self)] = &[
        ("detDirect", Self::Direct),
        ("detMeasures", Self::RiskGraph),
    ];
}

impl PlrMethod {
    /// The label SISTEMA shows for this method.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "Enter PLr value directly",
            Self::RiskGraph => "Determine PLr value from risk graph",
        }
    }
}

/// How the performance level of a subsystem is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlMethod {
    /// PL and PFHD entered directly.
    Direct,
    /// SIL and PFHD entered directly.
    SilDirect,
    /// Derived from category, MTTFD and DCavg.
    SubItems,
    /// Derived from category and DCavg only.
    SubItemsSimple,
}

impl Selection for PlMethod {
    const NAME: &'static str = "PL determination method";
    const CODES: &'static [(&'static str, Self)] = &[
        ("detDirect", Self::Direct),
        ("detSILDirect", Self::SilDirect),
        ("detSubItems", Self::SubItems),
        ("detSubItemsSimple", Self::SubItemsSimple),
    ];
}

impl PlMethod {
    /// The label SISTEMA shows for this method.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "Enter PL/PFHD directly",
            Self::SilDirect => "Enter SIL/PFHD directly",
            Self::SubItems => "Determine PL/PFHD from Category, MTTFD and DCavg",
            Self::SubItemsSimple => "Determine PL/PFHD from Category and DCavg",
        }
    }

    /// Whether the PL (or SIL) is entered directly rather than derived.
    #[must_use]
    pub const fn is_direct(self) -> bool {
        matches!(self, Self::Direct | Self::SilDirect)
    }
}

/// How an MTTFD value is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MttfdMethod {
    /// Entered directly (or claimed as a fault exclusion).
    Direct,
    /// Derived from the node's children.
    SubItems,
    /// Derived from B10/B10D wear data.
    B10d,
    /// Derived from failure-rate data (lambda, MTTF or MTBF).
    FailureRate,
}

impl Selection for MttfdMethod {
    const NAME: &'static str = "MTTFD determination method";
    const CODES: &'static [(&'static str, Self)] = &[
        ("detDirect", Self::Direct),
        ("detSubItems", Self::SubItems),
        ("detB10D", Self::B10d),
        ("detMTTF", Self::FailureRate),
    ];
}

impl MttfdMethod {
    /// The label SISTEMA shows for this method.
    ///
    /// `children` names the sub-items (`blocks`, `elements`); nodes without
    /// children cannot derive their MTTFD from them.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSelection`] when deriving from sub-items is selected
    /// on a node that has none.
    pub fn label(self, children: Option<&str>) -> Result<String, UnknownSelection> {
        Ok(match self {
            Self::Direct => "Enter MTTFD value directly".to_string(),
            Self::SubItems => {
                let children = children.ok_or_else(|| UnknownSelection {
                    selection: Self::NAME,
                    code: "detSubItems".to_string(),
                })?;
                format!("Determine MTTFD value from {children}")
            }
            Self::B10d => "Determine MTTFD value from B10D/B10 value".to_string(),
            Self::FailureRate => {
                "Determine MTTFD value from Lambda/MTTF/MTBF and RDF value".to_string()
            }
        })
    }
}

/// Whether wear data is given as B10 (with RDF) or directly as B10D.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum B10Input {
    /// B10 and the ratio of dangerous failures.
    B10,
    /// B10D directly.
    B10d,
}

impl Selection for B10Input {
    const NAME: &'static str = "B10/B10D selection";
    const CODES: &'static [(&'static str, Self)] = &[
        ("calcB10dB10", Self::B10),
        ("calcB10dDirect", Self::B10d),
    ];
}

impl B10Input {
    /// The label SISTEMA shows for this option.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::B10 => "B10",
            Self::B10d => "B10D",
        }
    }
}

/// Which failure-rate figure an MTTFD is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureRateInput {
    /// Failure rate lambda.
    Lambda,
    /// Mean time to failure.
    Mttf,
    /// Mean time between failures.
    Mtbf,
}

impl Selection for FailureRateInput {
    const NAME: &'static str = "Lambda/MTTF/MTBF selection";
    const CODES: &'static [(&'static str, Self)] = &[
        ("calcMTTFdLambda", Self::Lambda),
        ("calcMTTFdMTTF", Self::Mttf),
        ("calcMTTFdMTBF", Self::Mtbf),
    ];
}

/// How a diagnostic coverage value is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcMethod {
    /// Entered directly.
    Direct,
    /// Averaged over the node's children.
    SubItems,
    /// Taken from a selected applied measure.
    Measures,
}

impl Selection for DcMethod {
    const NAME: &'static str = "DC determination method";
    const CODES: &'static [(&'static str, Self)] = &[
        ("detDirect", Self::Direct),
        ("detSubItems", Self::SubItems),
        ("detMeasures", Self::Measures),
    ];
}

impl DcMethod {
    /// The label SISTEMA shows for this method on a DC tab.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSelection`] when deriving from sub-items is selected
    /// on a node that has none.
    pub fn label(self, children: Option<&str>) -> Result<String, UnknownSelection> {
        Ok(match self {
            Self::Direct => "Enter DC value directly".to_string(),
            Self::SubItems => format!(
                "Determine DC value from {}",
                children.ok_or_else(|| UnknownSelection {
                    selection: Self::NAME,
                    code: "detSubItems".to_string(),
                })?
            ),
            Self::Measures => "Select applied measures to evaluate DC".to_string(),
        })
    }
}

/// How the CCF score of a subsystem is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CcfMethod {
    /// Total points entered directly.
    Direct,
    /// Points summed over the selected measures.
    Measures,
}

impl Selection for CcfMethod {
    const NAME: &'static str = "CCF determination method";
    const CODES: &'static [(&'static str, Self)] = &[
        ("detDirect", Self::Direct),
        ("detMeasures", Self::Measures),
    ];
}

impl CcfMethod {
    /// The label SISTEMA shows for this method.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "Enter CCF evaluation directly",
            Self::Measures => "Select applied measures to evaluate CCF",
        }
    }
}

/// The type of a channel within a subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelType {
    /// The first functional channel.
    One,
    /// The second (redundant) functional channel.
    Two,
    /// The test channel of a category 2 architecture.
    Test,
}

impl Selection for ChannelType {
    const NAME: &'static str = "channel type";
    const CODES: &'static [(&'static str, Self)] = &[
        ("ch1", Self::One),
        ("ch2", Self::Two),
        ("chTest", Self::Test),
    ];
}

impl ChannelType {
    /// The fixed name SISTEMA gives the channel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::One => "Channel 1",
            Self::Two => "Channel 2",
            Self::Test => "Test Channel",
        }
    }

    /// The project-tree acronym for the channel.
    #[must_use]
    pub const fn acronym(self) -> &'static str {
        match self {
            Self::Test => "TE",
            Self::One | Self::Two => "CH",
        }
    }

    /// Whether the channel is part of the architecture of a category.
    #[must_use]
    pub const fn applies_to(self, category: Category) -> bool {
        match self {
            Self::One => true,
            Self::Two => matches!(category, Category::Three | Category::Four),
            Self::Test => matches!(category, Category::Two),
        }
    }
}

/// The designated architecture category of a subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Category B.
    B,
    /// Category 1.
    One,
    /// Category 2.
    Two,
    /// Category 3.
    Three,
    /// Category 4.
    Four,
    /// Not yet selected (`catN`).
    Unknown,
}

impl Category {
    /// Decodes a category code such as `catB` or `cat3` by its final
    /// character.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or its final character is not a
    /// category.
    pub fn decode(raw: &str) -> Result<Self, CategoryError> {
        Ok(match format::last_char(raw)? {
            'B' => Self::B,
            '1' => Self::One,
            '2' => Self::Two,
            '3' => Self::Three,
            '4' => Self::Four,
            'N' => Self::Unknown,
            _ => {
                return Err(UnknownSelection {
                    selection: "category",
                    code: raw.to_string(),
                }
                .into());
            }
        })
    }

    /// The category as a single character, as used in requirement tables.
    #[must_use]
    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::B => Some('B'),
            Self::One => Some('1'),
            Self::Two => Some('2'),
            Self::Three => Some('3'),
            Self::Four => Some('4'),
            Self::Unknown => None,
        }
    }

    /// Whether the architecture has diagnostics, i.e. DCavg and CCF apply.
    #[must_use]
    pub const fn has_diagnostics(self) -> bool {
        matches!(self, Self::Two | Self::Three | Self::Four)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "{symbol}"),
            None => f.write_str("Unknown"),
        }
    }
}

/// A category code could not be decoded.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CategoryError {
    /// The code was empty.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The code does not name a category.
    #[error(transparent)]
    Unknown(#[from] UnknownSelection),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn decode_known_codes() {
        assert_eq!(PlMethod::decode("detSILDirect"), Ok(PlMethod::SilDirect));
        assert_eq!(MttfdMethod::decode("detB10D"), Ok(MttfdMethod::B10d));
        assert_eq!(ChannelType::decode("chTest"), Ok(ChannelType::Test));
    }

    #[test]
    fn decode_unknown_code() {
        let error = DcMethod::decode("detGuess").unwrap_err();
        assert_eq!(error.to_string(), "unknown DC determination method 'detGuess'");
    }

    #[test]
    fn sub_items_label_names_children() {
        assert_eq!(
            MttfdMethod::SubItems.label(Some("elements")).unwrap(),
            "Determine MTTFD value from elements"
        );
        assert!(MttfdMethod::SubItems.label(None).is_err());
        assert!(DcMethod::SubItems.label(None).is_err());
    }

    #[test_case("catB", Category::B, "B")]
    #[test_case("cat1", Category::One, "1")]
    #[test_case("cat2", Category::Two, "2")]
    #[test_case("cat4", Category::Four, "4")]
    #[test_case("catN", Category::Unknown, "Unknown")]
    fn category_decodes(raw: &str, expected: Category, display: &str) {
        let category = Category::decode(raw).unwrap();
        assert_eq!(category, expected);
        assert_eq!(category.to_string(), display);
    }

    #[test]
    fn category_rejects_garbage() {
        assert!(Category::decode("catX").is_err());
        assert!(Category::decode("").is_err());
    }

    #[test_case(ChannelType::One, Category::B, true)]
    #[test_case(ChannelType::Two, Category::Two, false)]
    #[test_case(ChannelType::Two, Category::Three, true)]
    #[test_case(ChannelType::Test, Category::Two, true)]
    #[test_case(ChannelType::Test, Category::Four, false)]
    #[test_case(ChannelType::Two, Category::Unknown, false)]
    fn channel_applicability(channel: ChannelType, category: Category, expected: bool) {
        assert_eq!(channel.applies_to(category), expected);
    }
}
