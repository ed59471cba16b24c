//! This crate is part of [Sophia],
//! an [RDF] and [Linked Data] toolkit in Rust.
//!
//! It provides [RDFS] inference that does not materialize the deductive closure of a graph.
//! The schema (`rdfs:subClassOf`, `rdfs:subPropertyOf`, `rdfs:domain`, `rdfs:range`)
//! is compiled once into a [`ClosureIndex`](closure::ClosureIndex);
//! data triples are then either
//! * expanded one at a time by the [`RuleEngine`](engine::RuleEngine),
//!   possibly while flowing through a [`StreamProcessor`](stream::StreamProcessor), or
//! * queried through an [`InfStore`](query::InfStore),
//!   which answers triple patterns as if the closure was present in the underlying store.
//!
//! All components are generic over a [`TermSpace`](term_space::TermSpace),
//! so that inference can run directly on terms, or on compact interned identifiers.
//!
//! The inference covers rules rdfs2, rdfs3, rdfs5, rdfs7, rdfs9 and rdfs11 of [RDF 1.1 Semantics].
//! Axiomatic triples, `rdfs:Resource`, `rdfs:Literal` and container membership are not covered.
//!
//! [Sophia]: https://docs.rs/sophia/latest/sophia/
//! [RDF]: https://www.w3.org/TR/rdf-primer/
//! [RDFS]: https://www.w3.org/TR/rdf-schema/
//! [Linked Data]: http://linkeddata.org/
//! [RDF 1.1 Semantics]: https://www.w3.org/TR/rdf11-mt/#patterns-of-rdfs-entailment-informative
#![deny(missing_docs)]

pub mod closure;
pub mod config;
pub mod engine;
pub mod factory;
pub mod graph;
pub mod query;
pub mod store;
pub mod stream;
pub mod term_space;
pub mod vocab;

mod _dedup;
mod _error;
pub use _error::*;


#[cfg(test)]
fn test_setup() {
    TEST_SETUP.call_once(|| {
        env_logger::init();
    });
}

#[cfg(test)]
static TEST_SETUP: std::sync::Once = std::sync::Once::new();
