use std::fs;

use anyhow::{Context, Result};

use super::graph::{self, TaxonomyGraph};
use super::parse::{
    PopulationDatum, parse_hierarchy_document, parse_population_document, to_population_datum,
};

pub fn parse_taxonomy_graph(raw_text: &str) -> Result<TaxonomyGraph> {
    let raw = parse_hierarchy_document(raw_text)?;
    graph::build(raw)
}

pub fn load_taxonomy_graph(path: &str) -> Result<TaxonomyGraph> {
    let raw_text = fs::read_to_string(path)
        .with_context(|| format!("failed to read taxonomy document {path}"))?;
    parse_taxonomy_graph(&raw_text).with_context(|| format!("invalid taxonomy document {path}"))
}

pub fn parse_population_data(raw_text: &str) -> Result<Vec<PopulationDatum>> {
    let records = parse_population_document(raw_text)?;
    records
        .into_iter()
        .map(to_population_datum)
        .collect::<Result<Vec<_>>>()
}

pub fn load_population_data(path: &str) -> Result<Vec<PopulationDatum>> {
    let raw_text = fs::read_to_string(path)
        .with_context(|| format!("failed to read population document {path}"))?;
    parse_population_data(&raw_text).with_context(|| format!("invalid population document {path}"))
}
