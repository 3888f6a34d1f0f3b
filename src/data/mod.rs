mod collect;
mod graph;
mod parse;

pub use collect::{
    load_population_data, load_taxonomy_graph, parse_population_data, parse_taxonomy_graph,
};
pub use graph::{EdgeKind, TaxonomyEdge, TaxonomyGraph, TaxonomyNode};
pub use parse::PopulationDatum;
