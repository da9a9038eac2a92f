//! Chart selector.
//!
//! A selector names which derived series a request wants. User-facing text
//! (CLI arguments, the labels of the dashboard select box) is parsed
//! into a [`Selector`]; anything unrecognized is an
//! [`InvalidSelector`](crate::PipelineError::InvalidSelector) error carrying
//! the offending text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// Which derived series to build from a normalized event table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Selector {
    /// Diaper changes counted per outcome (`End Condition`).
    Diaper,

    /// Cumulative minutes of at-breast feeding over time.
    Breastfeeding,

    /// Cumulative bottle volume over time.
    Bottle,

    /// Cumulative number of diaper changes over time.
    DiaperCumulative,
}

impl Selector {
    pub const ALL: [Selector; 4] = [
        Selector::Diaper,
        Selector::Breastfeeding,
        Selector::Bottle,
        Selector::DiaperCumulative,
    ];

    /// Canonical name, accepted back by `from_str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Selector::Diaper => "diaper",
            Selector::Breastfeeding => "breastfeeding",
            Selector::Bottle => "bottle",
            Selector::DiaperCumulative => "diaper-cumulative",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Selector::Diaper => "Diaper changes counted by outcome",
            Selector::Breastfeeding => "Cumulative time nursing at the breast",
            Selector::Bottle => "Cumulative oz of formula or breast milk by bottle",
            Selector::DiaperCumulative => "Cumulative number of diaper changes",
        }
    }

    /// True when the selector yields a categorical count table rather than
    /// a cumulative series.
    pub fn is_categorical(&self) -> bool {
        matches!(self, Selector::Diaper)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Selector {
    type Err = PipelineError;

    /// Parse a selector name.
    /// Case, spaces, hyphens and underscores are ignored, so the dashboard
    /// labels ("Breast Feeding", "Formula", "Diapers") parse as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "diaper" | "diapertypes" | "diapertype" => Ok(Selector::Diaper),
            "breastfeeding" | "nursing" | "breast" => Ok(Selector::Breastfeeding),
            "bottle" | "bottlefeeding" | "formula" => Ok(Selector::Bottle),
            "diapercumulative" | "cumulativediapers" | "diapers" => {
                Ok(Selector::DiaperCumulative)
            }
            _ => Err(PipelineError::invalid_selector(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_from_str() {
        assert_eq!("diaper".parse::<Selector>().unwrap(), Selector::Diaper);
        assert_eq!(
            "Breast Feeding".parse::<Selector>().unwrap(),
            Selector::Breastfeeding
        );
        assert_eq!("FORMULA".parse::<Selector>().unwrap(), Selector::Bottle);
        assert_eq!(
            "Diapers".parse::<Selector>().unwrap(),
            Selector::DiaperCumulative
        );
        assert_eq!(
            "diaper_cumulative".parse::<Selector>().unwrap(),
            Selector::DiaperCumulative
        );
    }

    #[test]
    fn test_selector_round_trips_canonical_name() {
        for selector in Selector::ALL {
            assert_eq!(selector.as_str().parse::<Selector>().unwrap(), selector);
        }
    }

    #[test]
    fn test_unknown_selector_keeps_input_text() {
        let err = "Solids".parse::<Selector>().unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidSelector {
                value: "Solids".to_string()
            }
        );
    }
}
