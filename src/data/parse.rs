use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawHierarchyFile {
    #[serde(default)]
    pub(super) nodes: Vec<RawNode>,
    #[serde(default)]
    pub(super) links: Vec<RawLink>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawNode {
    pub(super) id: String,
    #[serde(default)]
    pub(super) label: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) number_of_instances: u64,
    pub(super) distance_to_root: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawLink {
    pub(super) parent: String,
    pub(super) child: String,
}

pub(super) fn parse_hierarchy_document(raw: &str) -> Result<RawHierarchyFile> {
    serde_json::from_str(raw).context("invalid taxonomy JSON document")
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawPopTotal {
    Number(f64),
    Text(String),
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawPopulationRecord {
    #[serde(rename = "Location")]
    pub(super) location: String,
    #[serde(rename = "PopTotal")]
    pub(super) pop_total: RawPopTotal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PopulationDatum {
    pub location: String,
    pub population: f64,
}

pub(super) fn parse_population_document(raw: &str) -> Result<Vec<RawPopulationRecord>> {
    serde_json::from_str(raw).context("invalid population JSON document")
}

pub(super) fn to_population_datum(record: RawPopulationRecord) -> Result<PopulationDatum> {
    let pop_total = match record.pop_total {
        RawPopTotal::Number(value) => value,
        RawPopTotal::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            anyhow!(
                "non-numeric PopTotal {:?} for location {}",
                text,
                record.location
            )
        })?,
    };

    if !pop_total.is_finite() {
        return Err(anyhow!(
            "non-finite PopTotal for location {}",
            record.location
        ));
    }

    Ok(PopulationDatum {
        location: record.location,
        population: pop_total * 1000.0,
    })
}
