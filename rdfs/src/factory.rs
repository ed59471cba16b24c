//! Shortcuts for the common case:
//! inference over sophia graphs and streams, with terms as identifiers.
use sophia_api::graph::Graph;
use sophia_api::ns::rdfs;
use sophia_api::term::{SimpleTerm, Term};
use sophia_api::triple::Triple;

use crate::closure::ClosureIndex;
use crate::config::RdfsConfig;
use crate::graph::{GraphStore, InfGraph};
use crate::query::InfStore;
use crate::stream::{InferenceSink, StreamProcessor};
use crate::term_space::SimpleTermSpace;
use crate::SchemaError;

/// Compile the RDFS schema contained in `vocab`.
pub fn schema_index<G: Graph>(
    vocab: &G,
    config: RdfsConfig,
) -> Result<ClosureIndex<SimpleTerm<'static>>, G::Error> {
    ClosureIndex::from_graph(vocab, &mut SimpleTermSpace, config).map_err(|e| match e {
        SchemaError::Graph(e) => e,
        SchemaError::TermSpace(never) => match never {},
    })
}

/// Wrap `data` into a [`Graph`] that also contains
/// everything derivable from `data` and the schema compiled in `index`.
pub fn rdfs_graph<'a, G: Graph>(
    index: &'a ClosureIndex<SimpleTerm<'static>>,
    data: G,
) -> InfGraph<'a, G> {
    InfStore::new(index, &SimpleTermSpace, GraphStore(data))
}

/// Wrap `sink` into a [`StreamProcessor`] that forwards everything it receives,
/// together with everything derivable from it and the schema compiled in `index`.
pub fn rdfs_stream<'a, K>(
    index: &'a ClosureIndex<SimpleTerm<'static>>,
    sink: K,
) -> StreamProcessor<'a, SimpleTermSpace, K>
where
    K: InferenceSink<SimpleTerm<'static>>,
{
    StreamProcessor::new(index, &SimpleTermSpace, sink)
}

/// Drop all triples whose predicate belongs to the RDFS namespace.
///
/// This is useful to present inferred data without its schema.
pub fn strip_rdfs<I>(triples: I) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    I::Item: Triple,
{
    triples.into_iter().filter(|t| {
        t.p()
            .iri()
            .map_or(true, |iri| !iri.as_str().starts_with(rdfs::PREFIX.as_str()))
    })
}
