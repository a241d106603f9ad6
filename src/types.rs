/// Core data structures for simulation result records
///
/// This module defines the in-memory shape of one result record as written by
/// the simulation program, plus the value type carried through every table.
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

/// One simulation run's output document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRecord {
    /// Testing procedure that produced this record
    pub method: Method,

    /// Clinical outcome under test
    pub target: Target,

    /// Effect-generation scenario (power records only)
    #[serde(default)]
    pub scenario: Option<u32>,

    /// Test directionality
    pub side: Side,

    /// Effect-parameter label → result, in document order
    #[serde(default)]
    pub power: Option<OrderedMap<EffectResult>>,

    /// Null-effect result
    #[serde(default)]
    pub alpha_error: Option<EffectResult>,
}

/// Result for a single effect setting (or the null effect)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EffectResult {
    /// Period label → rejection rate
    pub rejection_rate: OrderedMap<RateValue>,
}

/// A rejection rate as found in a record.
///
/// Integers and placeholders are kept verbatim so that formatting can pass
/// them through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateValue::Integer(i) => write!(f, "{}", i),
            RateValue::Float(x) => write!(f, "{}", x),
            RateValue::Text(s) => f.write_str(s),
        }
    }
}

/// Statistical testing procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    Nparld,
    UnivariateMatchedGpc,
    UnivariateUnmatchedGpc,
    PrioritizedMatchedGpc,
    PrioritizedUnmatchedGpc,
    NonPrioritizedUnmatchedGpc,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Nparld,
        Method::UnivariateMatchedGpc,
        Method::UnivariateUnmatchedGpc,
        Method::PrioritizedMatchedGpc,
        Method::PrioritizedUnmatchedGpc,
        Method::NonPrioritizedUnmatchedGpc,
    ];

    /// Identifier used by the simulation program
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Nparld => "nparld",
            Method::UnivariateMatchedGpc => "univariate-matched-gpc",
            Method::UnivariateUnmatchedGpc => "univariate-unmatched-gpc",
            Method::PrioritizedMatchedGpc => "prioritized-matched-gpc",
            Method::PrioritizedUnmatchedGpc => "prioritized-unmatched-gpc",
            Method::NonPrioritizedUnmatchedGpc => "non-prioritized-unmatched-gpc",
        }
    }

    /// Name shown in table headers
    pub fn display_name(&self) -> &'static str {
        match self {
            Method::Nparld => "nparLD",
            Method::UnivariateMatchedGpc => "univariate matched GPC",
            Method::UnivariateUnmatchedGpc => "univariate unmatched GPC",
            Method::PrioritizedMatchedGpc => "prioritized matched GPC",
            Method::PrioritizedUnmatchedGpc => "prioritized unmatched GPC",
            Method::NonPrioritizedUnmatchedGpc => "non prioritized unmatched GPC",
        }
    }

    pub fn from_id(id: &str) -> Option<Method> {
        Method::ALL.into_iter().find(|m| m.as_str() == id)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinical outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    #[serde(alias = "pruritus")]
    Pruritus,
    #[serde(alias = "pain")]
    Pain,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Pruritus => "Pruritus",
            Target::Pain => "Pain",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Test directionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "one-sided", alias = "one_sided")]
    OneSided,
    #[serde(rename = "two-sided", alias = "two_sided")]
    TwoSided,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::OneSided => "one-sided",
            Side::TwoSided => "two-sided",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String-keyed map that keeps document order.
///
/// Label order inside a record is compared across column groups, so the
/// sorted `BTreeMap` that `serde_json` produces by default is not usable here.
/// Duplicate keys are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new(entries: Vec<(String, V)>) -> Self {
        OrderedMap(entries)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                let mut seen = HashSet::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    if !seen.insert(key.clone()) {
                        return Err(de::Error::custom(format!("duplicate key `{}`", key)));
                    }
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
