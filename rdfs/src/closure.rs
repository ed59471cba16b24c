//! The [`ClosureIndex`] is the compiled form of an RDFS schema.
//!
//! It holds the transitive closures of `rdfs:subClassOf` and `rdfs:subPropertyOf`
//! (in both directions, with and without reflexivity),
//! and the `rdfs:domain` and `rdfs:range` declarations (in both directions).
//! It is immutable once built, and can therefore be shared by any number of readers.
use std::collections::{HashMap, HashSet};

use sophia_api::graph::Graph;
use sophia_api::ns::rdfs;
use sophia_api::term::matcher::Any;
use sophia_api::triple::Triple;

use crate::config::RdfsConfig;
use crate::term_space::{TermId, TermSpace};
use crate::vocab::RdfsVocab;
use crate::SchemaError;

type Relation<X> = HashMap<X, HashSet<X>>;

/// The precomputed closures of an RDFS schema.
///
/// All lookups return a set, which is empty for terms that the schema does not mention.
#[derive(Clone, Debug)]
pub struct ClosureIndex<X> {
    vocab: RdfsVocab<X>,
    config: RdfsConfig,
    super_classes: Relation<X>,
    super_classes_inc: Relation<X>,
    sub_classes: Relation<X>,
    sub_classes_inc: Relation<X>,
    super_properties: Relation<X>,
    super_properties_inc: Relation<X>,
    sub_properties: Relation<X>,
    sub_properties_inc: Relation<X>,
    domain: Relation<X>,
    range: Relation<X>,
    properties_by_domain: Relation<X>,
    properties_by_range: Relation<X>,
    classes: HashSet<X>,
    empty: HashSet<X>,
}

impl<X: TermId> ClosureIndex<X> {
    /// Compile the schema found in `triples`.
    ///
    /// Triples whose predicate is not one of the four schema predicates of `vocab` are ignored.
    pub fn from_triples<I>(vocab: RdfsVocab<X>, triples: I, config: RdfsConfig) -> Self
    where
        I: IntoIterator<Item = [X; 3]>,
    {
        let mut sc_edges = Relation::new();
        let mut sp_edges = Relation::new();
        let mut domain = Relation::new();
        let mut range = Relation::new();
        let mut properties_by_domain = Relation::new();
        let mut properties_by_range = Relation::new();
        for [s, p, o] in triples {
            if p == vocab.sub_class_of {
                relate(&mut sc_edges, s, o);
            } else if p == vocab.sub_property_of {
                relate(&mut sp_edges, s, o);
            } else if p == vocab.domain {
                relate(&mut properties_by_domain, o.clone(), s.clone());
                relate(&mut domain, s, o);
            } else if p == vocab.range {
                relate(&mut properties_by_range, o.clone(), s.clone());
                relate(&mut range, s, o);
            }
        }

        let (super_classes, sub_classes) = transitive_closure(&sc_edges);
        let (super_properties, sub_properties) = transitive_closure(&sp_edges);

        let classes: HashSet<X> = nodes(&sc_edges)
            .chain(properties_by_domain.keys())
            .chain(properties_by_range.keys())
            .cloned()
            .collect();
        let properties: HashSet<X> = nodes(&sp_edges)
            .chain(domain.keys())
            .chain(range.keys())
            .cloned()
            .collect();

        let index = ClosureIndex {
            super_classes_inc: reflexive(&super_classes, &classes),
            sub_classes_inc: reflexive(&sub_classes, &classes),
            super_properties_inc: reflexive(&super_properties, &properties),
            sub_properties_inc: reflexive(&sub_properties, &properties),
            vocab,
            config,
            super_classes,
            sub_classes,
            super_properties,
            sub_properties,
            domain,
            range,
            properties_by_domain,
            properties_by_range,
            classes,
            empty: HashSet::new(),
        };
        log::debug!(
            "compiled RDFS schema: {} classes, {} properties, {} domain and {} range declarations",
            index.classes.len(),
            properties.len(),
            index.domain.values().map(HashSet::len).sum::<usize>(),
            index.range.values().map(HashSet::len).sum::<usize>(),
        );
        index
    }

    /// Compile the schema found in the sophia [`Graph`] `schema`,
    /// mapping its terms into `space`.
    pub fn from_graph<G, S>(
        schema: &G,
        space: &mut S,
        config: RdfsConfig,
    ) -> Result<Self, SchemaError<G::Error, S::Error>>
    where
        G: Graph,
        S: TermSpace<Id = X>,
    {
        let vocab = RdfsVocab::new(space).map_err(SchemaError::TermSpace)?;
        let mut triples = vec![];
        let schema_predicates = [
            rdfs::subClassOf,
            rdfs::subPropertyOf,
            rdfs::domain,
            rdfs::range,
        ];
        for t in schema.triples_matching(Any, schema_predicates, Any) {
            let t = t.map_err(SchemaError::Graph)?;
            triples.push([
                space.ensure_id(t.s()).map_err(SchemaError::TermSpace)?,
                space.ensure_id(t.p()).map_err(SchemaError::TermSpace)?,
                space.ensure_id(t.o()).map_err(SchemaError::TermSpace)?,
            ]);
        }
        Ok(Self::from_triples(vocab, triples, config))
    }

    /// The identifiers of the RDFS vocabulary used by this index.
    pub fn vocab(&self) -> &RdfsVocab<X> {
        &self.vocab
    }

    /// The configuration of this index.
    pub fn config(&self) -> RdfsConfig {
        self.config
    }

    /// The strict super-classes of `c` (`rdfs:subClassOf+`).
    pub fn super_classes(&self, c: &X) -> &HashSet<X> {
        self.super_classes.get(c).unwrap_or(&self.empty)
    }

    /// The super-classes of `c`, including `c` itself if the schema mentions it.
    pub fn super_classes_inc(&self, c: &X) -> &HashSet<X> {
        self.super_classes_inc.get(c).unwrap_or(&self.empty)
    }

    /// The strict sub-classes of `c` (`^rdfs:subClassOf+`).
    pub fn sub_classes(&self, c: &X) -> &HashSet<X> {
        self.sub_classes.get(c).unwrap_or(&self.empty)
    }

    /// The sub-classes of `c`, including `c` itself if the schema mentions it.
    pub fn sub_classes_inc(&self, c: &X) -> &HashSet<X> {
        self.sub_classes_inc.get(c).unwrap_or(&self.empty)
    }

    /// The strict super-properties of `p` (`rdfs:subPropertyOf+`).
    pub fn super_properties(&self, p: &X) -> &HashSet<X> {
        self.super_properties.get(p).unwrap_or(&self.empty)
    }

    /// The super-properties of `p`, including `p` itself if the schema mentions it.
    pub fn super_properties_inc(&self, p: &X) -> &HashSet<X> {
        self.super_properties_inc.get(p).unwrap_or(&self.empty)
    }

    /// The strict sub-properties of `p` (`^rdfs:subPropertyOf+`).
    pub fn sub_properties(&self, p: &X) -> &HashSet<X> {
        self.sub_properties.get(p).unwrap_or(&self.empty)
    }

    /// The sub-properties of `p`, including `p` itself if the schema mentions it.
    pub fn sub_properties_inc(&self, p: &X) -> &HashSet<X> {
        self.sub_properties_inc.get(p).unwrap_or(&self.empty)
    }

    /// The classes declared as `rdfs:domain` of `p`.
    pub fn domain(&self, p: &X) -> &HashSet<X> {
        self.domain.get(p).unwrap_or(&self.empty)
    }

    /// The classes declared as `rdfs:range` of `p`.
    pub fn range(&self, p: &X) -> &HashSet<X> {
        self.range.get(p).unwrap_or(&self.empty)
    }

    /// The properties declaring `c` as their `rdfs:domain`.
    pub fn properties_by_domain(&self, c: &X) -> &HashSet<X> {
        self.properties_by_domain.get(c).unwrap_or(&self.empty)
    }

    /// The properties declaring `c` as their `rdfs:range`.
    pub fn properties_by_range(&self, c: &X) -> &HashSet<X> {
        self.properties_by_range.get(c).unwrap_or(&self.empty)
    }

    /// Whether at least one `rdfs:domain` declaration exists.
    pub fn has_domain_declarations(&self) -> bool {
        !self.domain.is_empty()
    }

    /// Whether at least one `rdfs:range` declaration exists.
    pub fn has_range_declarations(&self) -> bool {
        !self.range.is_empty()
    }

    /// All classes mentioned by the schema,
    /// in the `rdfs:subClassOf` hierarchy or as a domain or range.
    pub fn classes(&self) -> &HashSet<X> {
        &self.classes
    }
}

fn relate<X: TermId>(rel: &mut Relation<X>, from: X, to: X) {
    rel.entry(from).or_default().insert(to);
}

fn nodes<X: TermId>(edges: &Relation<X>) -> impl Iterator<Item = &X> {
    edges.keys().chain(edges.values().flatten())
}

/// Compute the transitive closure of `edges`, and its inverse.
///
/// A node belongs to its own closure only if it lies on a cycle.
fn transitive_closure<X: TermId>(edges: &Relation<X>) -> (Relation<X>, Relation<X>) {
    let mut up = Relation::new();
    for start in edges.keys() {
        let mut reached = HashSet::new();
        let mut stack: Vec<&X> = edges[start].iter().collect();
        while let Some(x) = stack.pop() {
            if reached.insert(x.clone()) {
                if let Some(next) = edges.get(x) {
                    stack.extend(next);
                }
            }
        }
        up.insert(start.clone(), reached);
    }
    let mut down = Relation::new();
    for (x, ancestors) in &up {
        for a in ancestors {
            relate(&mut down, a.clone(), x.clone());
        }
    }
    (up, down)
}

fn reflexive<X: TermId>(rel: &Relation<X>, nodes: &HashSet<X>) -> Relation<X> {
    nodes
        .iter()
        .map(|x| {
            let mut set = rel.get(x).cloned().unwrap_or_default();
            set.insert(x.clone());
            (x.clone(), set)
        })
        .collect()
}
