//! Shared learn search parameter models.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Course,
    Bootcamp,
    Program,
    Video,
    Userlist,
    LearningPath,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Course,
        ResourceType::Bootcamp,
        ResourceType::Program,
        ResourceType::Video,
        ResourceType::Userlist,
        ResourceType::LearningPath,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Course => "course",
            ResourceType::Bootcamp => "bootcamp",
            ResourceType::Program => "program",
            ResourceType::Video => "video",
            ResourceType::Userlist => "userlist",
            ResourceType::LearningPath => "learningpath",
        }
    }

    /// Types whose documents carry nested scheduling `runs`.
    pub fn has_runs(&self) -> bool {
        matches!(self, ResourceType::Course | ResourceType::Bootcamp | ResourceType::Program)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OfferedByType {
    #[serde(rename = "MITx")]
    Mitx,
    #[serde(rename = "OCW")]
    Ocw,
    #[serde(rename = "xPro")]
    Xpro,
    #[serde(rename = "Bootcamps")]
    Bootcamps,
    #[serde(rename = "MicroMasters")]
    MicroMasters,
}

impl OfferedByType {
    pub const ALL: [OfferedByType; 5] = [
        OfferedByType::Mitx,
        OfferedByType::Ocw,
        OfferedByType::Xpro,
        OfferedByType::Bootcamps,
        OfferedByType::MicroMasters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferedByType::Mitx => "MITx",
            OfferedByType::Ocw => "OCW",
            OfferedByType::Xpro => "xPro",
            OfferedByType::Bootcamps => "Bootcamps",
            OfferedByType::MicroMasters => "MicroMasters",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Free,
    Paid,
}

impl PriceType {
    pub const ALL: [PriceType; 2] = [PriceType::Free, PriceType::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Free => "free",
            PriceType::Paid => "paid",
        }
    }
}

/// Parameters of one simulated search session.
///
/// Sets are ordered so the generated search document only depends on which
/// filters were chosen, never on the order they were sampled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    pub text: String,
    pub types: BTreeSet<ResourceType>,
    pub offered_by: BTreeSet<OfferedByType>,
    pub price: BTreeSet<PriceType>,
}

impl QueryParams {
    pub fn new(
        text: impl Into<String>,
        types: impl IntoIterator<Item = ResourceType>,
        offered_by: impl IntoIterator<Item = OfferedByType>,
        price: impl IntoIterator<Item = PriceType>,
    ) -> Self {
        Self {
            text: text.into(),
            types: types.into_iter().collect(),
            offered_by: offered_by.into_iter().collect(),
            price: price.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_values_match_index_values() {
        let types = ResourceType::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>();
        assert_eq!(types, ["course", "bootcamp", "program", "video", "userlist", "learningpath"]);
        for t in ResourceType::ALL {
            let serialized = serde_json::to_value(t).unwrap();
            assert_eq!(serialized, serde_json::Value::String(t.as_str().to_string()));
        }
        for o in OfferedByType::ALL {
            let serialized = serde_json::to_value(o).unwrap();
            assert_eq!(serialized, serde_json::Value::String(o.as_str().to_string()));
        }
    }

    #[test]
    fn only_courses_bootcamps_and_programs_have_runs() {
        let with_runs = ResourceType::ALL.into_iter().filter(|t| t.has_runs()).collect::<Vec<_>>();
        assert_eq!(with_runs, [ResourceType::Course, ResourceType::Bootcamp, ResourceType::Program]);
    }

    #[test]
    fn params_ignore_sampling_order_and_duplicates() {
        let a = QueryParams::new(
            "Albedo",
            [ResourceType::Video, ResourceType::Course, ResourceType::Video],
            [OfferedByType::Ocw],
            [],
        );
        let b = QueryParams::new("Albedo", [ResourceType::Course, ResourceType::Video], [OfferedByType::Ocw], []);
        assert_eq!(a, b);
        assert_eq!(a.types.len(), 2);
    }
}
