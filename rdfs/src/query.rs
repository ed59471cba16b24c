//! The [`InfStore`] answers triple patterns over a base [`TripleStore`]
//! as if the RDFS closure of the base data was materialized.
//!
//! Each pattern is classified into a [`Pattern`],
//! and answered by a strategy that only scans the base store where needed.
//! Whether duplicates may be returned depends on the [`Shape`] of the pattern
//! (see [`Shape::multiplicity`]).
use std::collections::HashSet;
use std::iter::once_with;

use resiter::{Filter, Map};

use crate::_dedup::ResultIteratorDistinct;
use crate::closure::ClosureIndex;
use crate::config::RdfsConfig;
use crate::engine::RuleEngine;
use crate::store::{TripleScan, TripleStore};
use crate::term_space::TermSpace;
use crate::vocab::RdfsVocab;

/// A triple pattern, with its bound positions,
/// classified according to the strategy used to answer it.
#[derive(Debug)]
pub enum Pattern<'p, X> {
    /// `(s rdf:type c)`
    TypeCheck(&'p X, &'p X),
    /// `(s rdf:type ?)`
    TypesOf(&'p X),
    /// `(? rdf:type c)`
    InstancesOf(&'p X),
    /// `(? rdf:type ?)`
    AllTypes,
    /// `(s ? o)` or `(s ? ?)`
    FromSubject(&'p X, Option<&'p X>),
    /// `(? ? o)`
    ToObject(&'p X),
    /// `(? ? ?)`
    Everything,
    /// any pattern with a bound predicate other than `rdf:type`
    Property(Option<&'p X>, &'p X, Option<&'p X>),
}

impl<'p, X: PartialEq> Pattern<'p, X> {
    /// Classify the pattern `(s, p, o)`, where `None` stands for a wildcard.
    pub fn new(vocab: &RdfsVocab<X>, s: Option<&'p X>, p: Option<&'p X>, o: Option<&'p X>) -> Self {
        use Pattern::*;
        match (s, p, o) {
            (Some(s), Some(p), Some(o)) if p == &vocab.rdf_type => TypeCheck(s, o),
            (Some(s), Some(p), None) if p == &vocab.rdf_type => TypesOf(s),
            (None, Some(p), Some(o)) if p == &vocab.rdf_type => InstancesOf(o),
            (None, Some(p), None) if p == &vocab.rdf_type => AllTypes,
            (s, Some(p), o) => Property(s, p, o),
            (Some(s), None, o) => FromSubject(s, o),
            (None, None, Some(o)) => ToObject(o),
            (None, None, None) => Everything,
        }
    }

    /// The shape of this pattern.
    pub fn shape(&self) -> Shape {
        match self {
            Pattern::TypeCheck(..) => Shape::TypeCheck,
            Pattern::TypesOf(_) => Shape::TypesOf,
            Pattern::InstancesOf(_) => Shape::InstancesOf,
            Pattern::AllTypes => Shape::AllTypes,
            Pattern::FromSubject(..) => Shape::FromSubject,
            Pattern::ToObject(_) => Shape::ToObject,
            Pattern::Everything => Shape::Everything,
            Pattern::Property(..) => Shape::Property,
        }
    }
}

/// The shape of a [`Pattern`], without the bound terms.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Shape {
    /// See [`Pattern::TypeCheck`]
    TypeCheck,
    /// See [`Pattern::TypesOf`]
    TypesOf,
    /// See [`Pattern::InstancesOf`]
    InstancesOf,
    /// See [`Pattern::AllTypes`]
    AllTypes,
    /// See [`Pattern::FromSubject`]
    FromSubject,
    /// See [`Pattern::ToObject`]
    ToObject,
    /// See [`Pattern::Everything`]
    Everything,
    /// See [`Pattern::Property`]
    Property,
}

impl Shape {
    /// Whether the answers to patterns of this shape are guaranteed to be distinct.
    ///
    /// Patterns on types, and patterns with only the object bound, always return sets.
    /// `(? ? ?)` returns a set only when schema triples are derived.
    /// Other shapes may contain duplicates.
    pub fn multiplicity(self, config: RdfsConfig) -> Multiplicity {
        use Shape::*;
        match self {
            TypeCheck | TypesOf | InstancesOf | ToObject => Multiplicity::Set,
            Everything if config.derived_schema() => Multiplicity::Set,
            Everything | AllTypes | FromSubject | Property => Multiplicity::Bag,
        }
    }
}

/// See [`Shape::multiplicity`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Multiplicity {
    /// No triple is returned twice
    Set,
    /// Triples may be returned several times
    Bag,
}

/// A [`TripleStore`] containing the RDFS closure of a base store,
/// computed on demand.
pub struct InfStore<'a, S: TermSpace, B> {
    engine: RuleEngine<'a, S>,
    base: B,
}

impl<'a, S, B> InfStore<'a, S, B>
where
    S: TermSpace,
    B: TripleStore<S::Id>,
{
    /// Wrap `base`, using the schema compiled in `index`.
    pub fn new(index: &'a ClosureIndex<S::Id>, space: &'a S, base: B) -> Self {
        InfStore {
            engine: RuleEngine::new(index, space),
            base,
        }
    }

    /// The underlying store.
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Unwrap the underlying store.
    pub fn into_base(self) -> B {
        self.base
    }

    /// The rule engine used by this store.
    pub fn engine(&self) -> RuleEngine<'a, S> {
        self.engine
    }

    /// The schema used by this store.
    pub fn index(&self) -> &'a ClosureIndex<S::Id> {
        self.engine.index()
    }

    /// Iterate over all asserted or inferred triples matching `(s, p, o)`,
    /// where `None` matches any identifier.
    ///
    /// The base store is only scanned when the returned iterator is first pulled.
    pub fn find(
        &self,
        s: Option<&S::Id>,
        p: Option<&S::Id>,
        o: Option<&S::Id>,
    ) -> TripleScan<'_, S::Id, B::Error> {
        let pattern = Pattern::new(self.index().vocab(), s, p, o);
        let shape = pattern.shape();
        log::trace!("find {s:?} {p:?} {o:?} as {shape:?}");
        let triples = match pattern {
            Pattern::TypeCheck(s, c) => self.type_check(s, c),
            Pattern::TypesOf(s) => self.types_of(s),
            Pattern::InstancesOf(c) => self.instances_of(c),
            Pattern::AllTypes => self.all_types(),
            Pattern::FromSubject(s, o) => self.from_subject(s, o),
            Pattern::ToObject(o) => self.to_object(o),
            Pattern::Everything => self.inferred(self.base.scan(None, None, None)),
            Pattern::Property(s, p, o) => self.property(s, p, o),
        };
        match shape.multiplicity(self.index().config()) {
            Multiplicity::Set => Box::new(triples.distinct_ok()),
            Multiplicity::Bag => triples,
        }
    }

    /// Whether `s` has type `c`, either asserted or inferred.
    pub fn has_type(&self, s: &S::Id, c: &S::Id) -> Result<bool, B::Error> {
        let index = self.index();
        if self.base.contains(s, &index.vocab().rdf_type, c)? {
            return Ok(true);
        }
        let mut types = HashSet::new();
        self.range_types(s, &mut types)?;
        if types.contains(c) {
            return Ok(true);
        }
        self.domain_types(s, &mut types)?;
        if types.contains(c) {
            return Ok(true);
        }
        self.asserted_types(s, &mut types)?;
        Ok(types
            .iter()
            .any(|t| t == c || index.super_classes(t).contains(c)))
    }

    /// All the types of `s`, either asserted or inferred.
    pub fn types(&self, s: &S::Id) -> Result<HashSet<S::Id>, B::Error> {
        let mut types = HashSet::new();
        self.range_types(s, &mut types)?;
        self.domain_types(s, &mut types)?;
        self.asserted_types(s, &mut types)?;
        let index = self.index();
        let supers: Vec<_> = types
            .iter()
            .flat_map(|t| index.super_classes(t))
            .cloned()
            .collect();
        types.extend(supers);
        Ok(types)
    }

    fn type_check(&self, s: &S::Id, c: &S::Id) -> TripleScan<'_, S::Id, B::Error> {
        let (s, c) = (s.clone(), c.clone());
        Box::new(
            once_with(move || -> Result<_, B::Error> {
                let found = self.has_type(&s, &c)?;
                Ok(found.then(|| [s, self.index().vocab().rdf_type.clone(), c]))
            })
            .filter_map(Result::transpose),
        )
    }

    fn types_of(&self, s: &S::Id) -> TripleScan<'_, S::Id, B::Error> {
        let s = s.clone();
        Box::new(
            once_with(move || -> Result<_, B::Error> {
                let rdf_type = &self.index().vocab().rdf_type;
                Ok(self
                    .types(&s)?
                    .into_iter()
                    .map(|c| [s.clone(), rdf_type.clone(), c])
                    .collect::<Vec<_>>())
            })
            .flat_map(spread),
        )
    }

    fn instances_of(&self, c: &S::Id) -> TripleScan<'_, S::Id, B::Error> {
        let index = self.index();
        let space = self.engine.space();
        let rdf_type = index.vocab().rdf_type.clone();
        let mut classes = index.sub_classes(c).clone();
        classes.insert(c.clone());
        let by_domain: HashSet<S::Id> = classes
            .iter()
            .flat_map(|k| index.properties_by_domain(k))
            .flat_map(|q| index.sub_properties_inc(q))
            .cloned()
            .collect();
        let by_range: HashSet<S::Id> = classes
            .iter()
            .flat_map(|k| index.properties_by_range(k))
            .flat_map(|q| index.sub_properties_inc(q))
            .cloned()
            .collect();

        let typed = {
            let (rdf_type, c) = (rdf_type.clone(), c.clone());
            move |x| [x, rdf_type.clone(), c.clone()]
        };
        let asserted = classes
            .into_iter()
            .flat_map(move |k| self.base.scan(None, Some(&rdf_type), Some(&k)))
            .map_ok(|[x, _, _]| x);
        let subjects = by_domain
            .into_iter()
            .flat_map(move |p| self.base.scan(None, Some(&p), None))
            .map_ok(|[x, _, _]| x);
        let objects = by_range
            .into_iter()
            .flat_map(move |p| self.base.scan(None, Some(&p), None))
            .map_ok(|[_, _, y]| y)
            .filter(move |r| !matches!(r, Ok(y) if space.is_literal(y)));
        Box::new(asserted.chain(subjects).chain(objects).map_ok(typed))
    }

    fn all_types(&self) -> TripleScan<'_, S::Id, B::Error> {
        let rdf_type = self.index().vocab().rdf_type.clone();
        Box::new(
            self.inferred(self.base.scan(None, None, None))
                .filter_ok(move |t| t[1] == rdf_type),
        )
    }

    fn from_subject(&self, s: &S::Id, o: Option<&S::Id>) -> TripleScan<'_, S::Id, B::Error> {
        let mut triples = self.base.scan(Some(s), None, None);
        if self.index().has_range_declarations() {
            triples = Box::new(triples.chain(self.deferred(None, None, Some(s))));
        }
        let (s, o) = (s.clone(), o.cloned());
        Box::new(
            self.inferred(triples)
                .filter_ok(move |t| t[0] == s && o.as_ref().map_or(true, |o| &t[2] == o)),
        )
    }

    fn to_object(&self, o: &S::Id) -> TripleScan<'_, S::Id, B::Error> {
        let vocab = self.index().vocab();
        let rdf_type = vocab.rdf_type.clone();
        let mut triples: TripleScan<'_, S::Id, B::Error> = Box::new(
            self.base
                .scan(None, None, Some(o))
                .filter_ok(move |t| t[1] != rdf_type)
                .chain(self.instances_of(o)),
        );
        if self.index().config().derived_schema() {
            triples = Box::new(
                triples
                    .chain(self.deferred(None, Some(&vocab.range), Some(o)))
                    .chain(self.deferred(None, Some(&vocab.domain), Some(o)))
                    .chain(self.deferred(Some(o), Some(&vocab.sub_class_of), None))
                    .chain(self.deferred(None, Some(&vocab.sub_class_of), Some(o))),
            );
        }
        let o = o.clone();
        Box::new(self.inferred(triples).filter_ok(move |t| t[2] == o))
    }

    fn property(
        &self,
        s: Option<&S::Id>,
        p: &S::Id,
        o: Option<&S::Id>,
    ) -> TripleScan<'_, S::Id, B::Error> {
        let asserted = self.base.scan(s, Some(p), o);
        let subs = self.index().sub_properties(p);
        if subs.is_empty() {
            return asserted;
        }
        let (s, p, o) = (s.cloned(), p.clone(), o.cloned());
        Box::new(asserted.chain(subs.iter().flat_map(move |q| {
            let p = p.clone();
            self.base
                .scan(s.as_ref(), Some(q), o.as_ref())
                .map_ok(move |[x, _, y]| [x, p.clone(), y])
        })))
    }

    /// Expand every triple of `triples` with the rule engine.
    fn inferred<'s>(
        &'s self,
        triples: TripleScan<'s, S::Id, B::Error>,
    ) -> TripleScan<'s, S::Id, B::Error> {
        let engine = self.engine;
        Box::new(triples.flat_map(move |res| {
            spread(res.map(|t| {
                let mut acc = vec![];
                engine.expand_into(&mut acc, t);
                acc
            }))
        }))
    }

    /// Scan the base store, but only once the result is pulled.
    fn deferred(
        &self,
        s: Option<&S::Id>,
        p: Option<&S::Id>,
        o: Option<&S::Id>,
    ) -> TripleScan<'_, S::Id, B::Error> {
        let (s, p, o) = (s.cloned(), p.cloned(), o.cloned());
        Box::new(once_with(move || self.base.scan(s.as_ref(), p.as_ref(), o.as_ref())).flatten())
    }

    fn range_types(&self, s: &S::Id, acc: &mut HashSet<S::Id>) -> Result<(), B::Error> {
        let index = self.index();
        if !index.has_range_declarations() || self.engine.space().is_literal(s) {
            return Ok(());
        }
        for t in self.base.scan(None, None, Some(s)) {
            let [_, p, _] = t?;
            for q in index.super_properties_inc(&p) {
                acc.extend(index.range(q).iter().cloned());
            }
        }
        Ok(())
    }

    fn domain_types(&self, s: &S::Id, acc: &mut HashSet<S::Id>) -> Result<(), B::Error> {
        let index = self.index();
        if !index.has_domain_declarations() {
            return Ok(());
        }
        for t in self.base.scan(Some(s), None, None) {
            let [_, p, _] = t?;
            for q in index.super_properties_inc(&p) {
                acc.extend(index.domain(q).iter().cloned());
            }
        }
        Ok(())
    }

    fn asserted_types(&self, s: &S::Id, acc: &mut HashSet<S::Id>) -> Result<(), B::Error> {
        let rdf_type = &self.index().vocab().rdf_type;
        for t in self.base.scan(Some(s), Some(rdf_type), None) {
            let [_, _, c] = t?;
            acc.insert(c);
        }
        Ok(())
    }
}

impl<'a, S, B> TripleStore<S::Id> for InfStore<'a, S, B>
where
    S: TermSpace,
    B: TripleStore<S::Id>,
{
    type Error = B::Error;

    fn scan(
        &self,
        s: Option<&S::Id>,
        p: Option<&S::Id>,
        o: Option<&S::Id>,
    ) -> TripleScan<'_, S::Id, Self::Error> {
        self.find(s, p, o)
    }
}

/// Turn a batch of triples, or the error that prevented it, into a stream of results.
fn spread<X, E>(res: Result<Vec<[X; 3]>, E>) -> impl Iterator<Item = Result<[X; 3], E>> {
    let (triples, err) = match res {
        Ok(triples) => (triples, None),
        Err(err) => (vec![], Some(err)),
    };
    triples.into_iter().map(Ok).chain(err.map(Err))
}
