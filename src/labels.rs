//! Closed label catalogue and display-key lookups.
//!
//! Effect-parameter labels are a fixed enumeration; anything else coming out
//! of a record is an error rather than a silently passed-through string.

use crate::table::Key;
use crate::types::{Method, Target};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Distribution family of a simulated effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectFamily {
    LogNormal,
    Normal,
}

impl EffectFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectFamily::LogNormal => "log-normal",
            EffectFamily::Normal => "normal",
        }
    }
}

/// One of the six simulated effect settings.
///
/// Declaration order is the canonical row order of a power table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectLabel {
    LogNormal02,
    LogNormal06,
    LogNormal09,
    Normal2,
    Normal3,
    Normal4,
}

impl EffectLabel {
    pub const ALL: [EffectLabel; 6] = [
        EffectLabel::LogNormal02,
        EffectLabel::LogNormal06,
        EffectLabel::LogNormal09,
        EffectLabel::Normal2,
        EffectLabel::Normal3,
        EffectLabel::Normal4,
    ];

    /// Label as written by the simulation program
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectLabel::LogNormal02 => "meanlog=0.2, sdlog=1",
            EffectLabel::LogNormal06 => "meanlog=0.6, sdlog=1",
            EffectLabel::LogNormal09 => "meanlog=0.9, sdlog=1",
            EffectLabel::Normal2 => "mean=2, sd=1",
            EffectLabel::Normal3 => "mean=3, sd=1",
            EffectLabel::Normal4 => "mean=4, sd=1",
        }
    }

    pub fn parse(label: &str) -> Option<EffectLabel> {
        EffectLabel::ALL.into_iter().find(|l| l.as_str() == label)
    }

    pub fn family(&self) -> EffectFamily {
        match self {
            EffectLabel::LogNormal02 | EffectLabel::LogNormal06 | EffectLabel::LogNormal09 => EffectFamily::LogNormal,
            EffectLabel::Normal2 | EffectLabel::Normal3 | EffectLabel::Normal4 => EffectFamily::Normal,
        }
    }

    /// Effect magnitude as shown in the second row-key level
    pub fn magnitude(&self) -> &'static str {
        match self {
            EffectLabel::LogNormal02 => "0.2",
            EffectLabel::LogNormal06 => "0.6",
            EffectLabel::LogNormal09 => "0.9",
            EffectLabel::Normal2 => "2",
            EffectLabel::Normal3 => "3",
            EffectLabel::Normal4 => "4",
        }
    }
}

impl fmt::Display for EffectLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display strings used when building table keys.
///
/// Defaults cover every enumerated value; a layout file may override the
/// family symbols and individual method names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayLabels {
    pub lognormal_symbol: String,
    pub normal_symbol: String,
    /// Method id (e.g. `nparld`) → header name
    pub methods: HashMap<String, String>,
}

impl Default for DisplayLabels {
    fn default() -> Self {
        DisplayLabels {
            lognormal_symbol: "mu_log".to_string(),
            normal_symbol: "mu_norm".to_string(),
            methods: HashMap::new(),
        }
    }
}

impl DisplayLabels {
    pub fn family_symbol(&self, family: EffectFamily) -> &str {
        match family {
            EffectFamily::LogNormal => &self.lognormal_symbol,
            EffectFamily::Normal => &self.normal_symbol,
        }
    }

    pub fn method_name(&self, method: Method) -> &str {
        self.methods.get(method.as_str()).map(|s| s.as_str()).unwrap_or_else(|| method.display_name())
    }

    pub fn scenario_name(&self, scenario: u32) -> String {
        format!("Scenario {}", scenario)
    }

    /// Power-table row key: (family symbol, magnitude)
    pub fn effect_row_key(&self, label: EffectLabel) -> Key {
        Key::new([self.family_symbol(label.family()), label.magnitude()])
    }

    /// Power-table column key: (method, outcome, scenario)
    pub fn power_column_key(&self, method: Method, target: Target, scenario: u32) -> Key {
        Key::new([self.method_name(method).to_string(), target.as_str().to_string(), self.scenario_name(scenario)])
    }

    /// Alpha-error column key: outcome
    pub fn outcome_column_key(&self, target: Target) -> Key {
        Key::single(target.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_label() {
        for label in EffectLabel::ALL {
            assert_eq!(EffectLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(EffectLabel::parse("mean=5, sd=1"), None);
        assert_eq!(EffectLabel::parse("meanlog=0.2,sdlog=1"), None);
    }

    #[test]
    fn test_canonical_order_is_lognormal_first() {
        let mut shuffled = vec![EffectLabel::Normal4, EffectLabel::LogNormal06, EffectLabel::Normal2, EffectLabel::LogNormal02];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![EffectLabel::LogNormal02, EffectLabel::LogNormal06, EffectLabel::Normal2, EffectLabel::Normal4]
        );
    }

    #[test]
    fn test_family_split() {
        let lognormal = EffectLabel::ALL.iter().filter(|l| l.family() == EffectFamily::LogNormal).count();
        assert_eq!(lognormal, 3);
        assert_eq!(EffectLabel::Normal3.family(), EffectFamily::Normal);
    }

    #[test]
    fn test_default_row_and_column_keys() {
        let labels = DisplayLabels::default();
        assert_eq!(labels.effect_row_key(EffectLabel::LogNormal09), Key::new(["mu_log", "0.9"]));
        assert_eq!(
            labels.power_column_key(Method::PrioritizedMatchedGpc, Target::Pain, 2),
            Key::new(["prioritized matched GPC", "Pain", "Scenario 2"])
        );
        assert_eq!(labels.outcome_column_key(Target::Pruritus), Key::single("Pruritus"));
    }

    #[test]
    fn test_method_name_override() {
        let mut labels = DisplayLabels::default();
        labels.methods.insert("nparld".to_string(), "nparLD (ATS)".to_string());
        assert_eq!(labels.method_name(Method::Nparld), "nparLD (ATS)");
        assert_eq!(labels.method_name(Method::UnivariateMatchedGpc), "univariate matched GPC");
    }
}
