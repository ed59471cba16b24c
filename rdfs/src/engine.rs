//! The [`RuleEngine`] applies the RDFS rules to one triple at a time.
//!
//! Given a [`ClosureIndex`], a single pass over a triple derives everything
//! that [rules] rdfs2, rdfs3, rdfs7 and rdfs9 (and, with
//! [`derived_schema`](crate::config::RdfsConfig::derived_schema), rdfs5, rdfs6, rdfs10 and rdfs11)
//! would eventually derive from that triple and the schema.
//! No fixpoint iteration is required, because the closures are precomputed.
//!
//! [rules]: https://www.w3.org/TR/rdf11-mt/#patterns-of-rdfs-entailment-informative
use std::collections::HashSet;

use crate::closure::ClosureIndex;
use crate::term_space::TermSpace;

/// Derives the RDFS consequences of individual triples.
///
/// This is a cheap handle (two references) and can be freely copied.
pub struct RuleEngine<'a, S: TermSpace> {
    index: &'a ClosureIndex<S::Id>,
    space: &'a S,
}

impl<'a, S: TermSpace> Clone for RuleEngine<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: TermSpace> Copy for RuleEngine<'a, S> {}

impl<'a, S: TermSpace> RuleEngine<'a, S> {
    /// Build a rule engine for the schema compiled in `index`,
    /// whose identifiers belong to `space`.
    pub fn new(index: &'a ClosureIndex<S::Id>, space: &'a S) -> Self {
        RuleEngine { index, space }
    }

    /// The schema used by this engine.
    pub fn index(&self) -> &'a ClosureIndex<S::Id> {
        self.index
    }

    /// The term space used by this engine.
    pub fn space(&self) -> &'a S {
        self.space
    }

    /// Pass to `emit` every triple derived from `(s, p, o)`.
    ///
    /// The triple itself is not emitted, unless it is derivable from itself
    /// (e.g. `(c rdfs:subClassOf c)` with `derived_schema`).
    /// The same triple may be emitted several times.
    pub fn process<F>(&self, s: &S::Id, p: &S::Id, o: &S::Id, emit: &mut F)
    where
        F: FnMut([S::Id; 3]),
    {
        self.sub_class(s, p, o, emit);
        self.sub_property(s, p, o, emit);
        self.domain(s, p, o, emit);
        self.range(s, p, o, emit);
    }

    /// Pass to `emit` the triple itself, then every triple derived from it.
    pub fn expand<F>(&self, triple: [S::Id; 3], emit: &mut F)
    where
        F: FnMut([S::Id; 3]),
    {
        emit(triple.clone());
        let [s, p, o] = triple;
        self.process(&s, &p, &o, emit);
    }

    /// Add to `acc` the triple itself and every triple derived from it.
    pub fn expand_into<C>(&self, acc: &mut C, triple: [S::Id; 3])
    where
        C: Extend<[S::Id; 3]>,
    {
        self.expand(triple, &mut |t| acc.extend(Some(t)));
    }

    /// The distinct triples derived from `triple`, excluding `triple` itself.
    pub fn derive(&self, triple: &[S::Id; 3]) -> HashSet<[S::Id; 3]> {
        let mut derived = HashSet::new();
        let [s, p, o] = triple;
        self.process(s, p, o, &mut |t| {
            derived.insert(t);
        });
        derived.remove(triple);
        derived
    }

    /// The union of `triples` and everything derived from them.
    pub fn expand_all<I>(&self, triples: I) -> HashSet<[S::Id; 3]>
    where
        I: IntoIterator<Item = [S::Id; 3]>,
    {
        let mut acc = HashSet::new();
        for t in triples {
            self.expand_into(&mut acc, t);
        }
        acc
    }

    // rdfs9: (s rdf:type o) (o rdfs:subClassOf c) => (s rdf:type c)
    // and, with derived schema, rdfs10 and rdfs11
    fn sub_class<F>(&self, s: &S::Id, p: &S::Id, o: &S::Id, emit: &mut F)
    where
        F: FnMut([S::Id; 3]),
    {
        let vocab = self.index.vocab();
        let derived_schema = self.index.config().derived_schema();
        if p == &vocab.rdf_type {
            for c in self.index.super_classes(o) {
                emit([s.clone(), p.clone(), c.clone()]);
            }
            if derived_schema {
                self.sub_class(o, &vocab.sub_class_of, o, emit);
            }
        }
        if derived_schema && p == &vocab.sub_class_of {
            for c in self.index.super_classes(o) {
                emit([o.clone(), p.clone(), c.clone()]);
            }
            for c in self.index.sub_classes(o) {
                emit([c.clone(), p.clone(), o.clone()]);
            }
            emit([s.clone(), p.clone(), s.clone()]);
            emit([o.clone(), p.clone(), o.clone()]);
        }
    }

    // rdfs7: (s p o) (p rdfs:subPropertyOf q) => (s q o)
    // and, with derived schema, rdfs5 and rdfs6
    fn sub_property<F>(&self, s: &S::Id, p: &S::Id, o: &S::Id, emit: &mut F)
    where
        F: FnMut([S::Id; 3]),
    {
        let vocab = self.index.vocab();
        let supers = self.index.super_properties(p);
        for q in supers {
            emit([s.clone(), q.clone(), o.clone()]);
        }
        if !self.index.config().derived_schema() {
            return;
        }
        if p == &vocab.sub_property_of {
            for q in self.index.super_properties(o) {
                emit([o.clone(), p.clone(), q.clone()]);
            }
            for q in self.index.sub_properties(o) {
                emit([q.clone(), p.clone(), o.clone()]);
            }
            emit([s.clone(), p.clone(), s.clone()]);
            emit([o.clone(), p.clone(), o.clone()]);
        } else if !supers.is_empty() {
            self.sub_property(p, &vocab.sub_property_of, p, emit);
        }
    }

    // rdfs2: (s p o) (p rdfs:domain c) => (s rdf:type c)
    // applied to p and its super-properties
    fn domain<F>(&self, s: &S::Id, p: &S::Id, _o: &S::Id, emit: &mut F)
    where
        F: FnMut([S::Id; 3]),
    {
        let vocab = self.index.vocab();
        for q in self.index.super_properties_inc(p) {
            for c in self.index.domain(q) {
                self.typed(s, c, emit);
                if self.index.config().derived_schema() {
                    emit([q.clone(), vocab.domain.clone(), c.clone()]);
                }
            }
        }
    }

    // rdfs3: (s p o) (p rdfs:range c) => (o rdf:type c), unless o is a literal
    // applied to p and its super-properties
    fn range<F>(&self, _s: &S::Id, p: &S::Id, o: &S::Id, emit: &mut F)
    where
        F: FnMut([S::Id; 3]),
    {
        if self.space.is_literal(o) {
            return;
        }
        let vocab = self.index.vocab();
        for q in self.index.super_properties_inc(p) {
            for c in self.index.range(q) {
                self.typed(o, c, emit);
                if self.index.config().derived_schema() {
                    emit([q.clone(), vocab.range.clone(), c.clone()]);
                }
            }
        }
    }

    fn typed<F>(&self, x: &S::Id, c: &S::Id, emit: &mut F)
    where
        F: FnMut([S::Id; 3]),
    {
        let rdf_type = &self.index.vocab().rdf_type;
        emit([x.clone(), rdf_type.clone(), c.clone()]);
        self.sub_class(x, rdf_type, c, emit);
    }
}

#[cfg(test)]
mod test;
