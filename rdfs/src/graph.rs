//! Integration with sophia's [`Graph`] and [`MutableGraph`] traits.
//!
//! * [`GraphStore`] turns any [`Graph`] into a [`TripleStore`] of [`SimpleTerm`]s;
//! * [`InfStore`] is a [`Graph`] whenever it works on [`SimpleTermSpace`];
//! * [`GraphSink`] turns any [`MutableGraph`] into an [`InferenceSink`].
use sophia_api::graph::{GTripleSource, Graph, MutableGraph};
use sophia_api::quad::Spog;
use sophia_api::term::matcher::TermMatcher;
use sophia_api::term::{SimpleTerm, Term};
use sophia_api::triple::Triple;

use crate::query::InfStore;
use crate::store::{TripleScan, TripleStore};
use crate::stream::InferenceSink;
use crate::term_space::{SimpleTermSpace, TermSpace};

/// A [`TripleStore`] view of a sophia [`Graph`].
#[derive(Clone, Debug, Default)]
pub struct GraphStore<G>(pub G);

impl<G: Graph> TripleStore<SimpleTerm<'static>> for GraphStore<G> {
    type Error = G::Error;

    fn scan(
        &self,
        s: Option<&SimpleTerm<'static>>,
        p: Option<&SimpleTerm<'static>>,
        o: Option<&SimpleTerm<'static>>,
    ) -> TripleScan<'_, SimpleTerm<'static>, Self::Error> {
        Box::new(
            self.0
                .triples_matching(Slot::from(s), Slot::from(p), Slot::from(o))
                .map(|r| r.map(|t| t.to_spo().map(Term::into_term::<SimpleTerm<'static>>))),
        )
    }
}

/// A [`TermMatcher`] matching either a given term, or anything.
#[derive(Clone, Debug)]
struct Slot(Option<SimpleTerm<'static>>);

impl From<Option<&SimpleTerm<'static>>> for Slot {
    fn from(value: Option<&SimpleTerm<'static>>) -> Self {
        Slot(value.cloned())
    }
}

impl TermMatcher for Slot {
    type Term = SimpleTerm<'static>;

    fn matches<T2: Term + ?Sized>(&self, term: &T2) -> bool {
        match &self.0 {
            Some(t) => Term::eq(t, term.borrow_term()),
            None => true,
        }
    }

    fn constant(&self) -> Option<&Self::Term> {
        self.0.as_ref()
    }
}

impl<'a, S, B> Graph for InfStore<'a, S, B>
where
    S: TermSpace<Id = SimpleTerm<'static>>,
    B: TripleStore<SimpleTerm<'static>>,
{
    type Triple<'x> = [SimpleTerm<'static>; 3] where Self: 'x;
    type Error = B::Error;

    fn triples(&self) -> GTripleSource<Self> {
        self.find(None, None, None)
    }

    fn triples_matching<'s, SM, PM, OM>(
        &'s self,
        sm: SM,
        pm: PM,
        om: OM,
    ) -> GTripleSource<'s, Self>
    where
        SM: TermMatcher + 's,
        PM: TermMatcher + 's,
        OM: TermMatcher + 's,
    {
        let s = sm.constant().map(|t| t.borrow_term().into_term::<SimpleTerm<'static>>());
        let p = pm.constant().map(|t| t.borrow_term().into_term::<SimpleTerm<'static>>());
        let o = om.constant().map(|t| t.borrow_term().into_term::<SimpleTerm<'static>>());
        Box::new(
            self.find(s.as_ref(), p.as_ref(), o.as_ref())
                .filter(move |r| match r {
                    Ok([ts, tp, to]) => sm.matches(ts) && pm.matches(tp) && om.matches(to),
                    Err(_) => true,
                }),
        )
    }
}

/// An [`InferenceSink`] inserting everything in a sophia [`MutableGraph`].
///
/// Graph names of quads are dropped.
#[derive(Clone, Debug, Default)]
pub struct GraphSink<G>(pub G);

impl<G: MutableGraph> InferenceSink<SimpleTerm<'static>> for GraphSink<G> {
    type Error = G::MutationError;

    fn triple(&mut self, [s, p, o]: [SimpleTerm<'static>; 3]) -> Result<(), Self::Error> {
        self.0.insert(s, p, o).map(|_| ())
    }

    fn quad(&mut self, (spo, _): Spog<SimpleTerm<'static>>) -> Result<(), Self::Error> {
        self.triple(spo)
    }
}

/// An [`InfStore`] over a sophia [`Graph`], itself usable as a [`Graph`].
pub type InfGraph<'a, G> = InfStore<'a, SimpleTermSpace, GraphStore<G>>;
