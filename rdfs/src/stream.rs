//! The [`StreamProcessor`] adds RDFS inference to a stream of triples or quads.
//!
//! Every item is forwarded to an [`InferenceSink`], immediately followed by its derivations.
//! The output is a bag: the same triple may be forwarded several times.
use std::convert::Infallible;
use std::error::Error;

use sophia_api::quad::{Quad, Spog};
use sophia_api::source::{QuadSource, StreamResult, TripleSource};
use sophia_api::term::{SimpleTerm, Term};
use sophia_api::triple::Triple;

use crate::closure::ClosureIndex;
use crate::engine::RuleEngine;
use crate::term_space::{SimpleTermSpace, TermSpace};

/// The receiving end of a [`StreamProcessor`].
pub trait InferenceSink<X> {
    /// The error raised by this sink.
    type Error: Error + 'static;

    /// Receive a triple.
    fn triple(&mut self, triple: [X; 3]) -> Result<(), Self::Error>;

    /// Receive a quad.
    fn quad(&mut self, quad: Spog<X>) -> Result<(), Self::Error>;
}

impl<X> InferenceSink<X> for Vec<Spog<X>> {
    type Error = Infallible;

    fn triple(&mut self, triple: [X; 3]) -> Result<(), Self::Error> {
        self.push((triple, None));
        Ok(())
    }

    fn quad(&mut self, quad: Spog<X>) -> Result<(), Self::Error> {
        self.push(quad);
        Ok(())
    }
}

impl<X, K: InferenceSink<X> + ?Sized> InferenceSink<X> for &mut K {
    type Error = K::Error;

    fn triple(&mut self, triple: [X; 3]) -> Result<(), Self::Error> {
        K::triple(*self, triple)
    }

    fn quad(&mut self, quad: Spog<X>) -> Result<(), Self::Error> {
        K::quad(*self, quad)
    }
}

/// Forwards triples and quads to an [`InferenceSink`], together with their RDFS derivations.
///
/// Derivations of a quad are sent as quads in the same graph.
pub struct StreamProcessor<'a, S: TermSpace, K> {
    engine: RuleEngine<'a, S>,
    sink: K,
}

impl<'a, S, K> StreamProcessor<'a, S, K>
where
    S: TermSpace,
    K: InferenceSink<S::Id>,
{
    /// Build a stream processor feeding `sink`, using the schema compiled in `index`.
    pub fn new(index: &'a ClosureIndex<S::Id>, space: &'a S, sink: K) -> Self {
        StreamProcessor {
            engine: RuleEngine::new(index, space),
            sink,
        }
    }

    /// The sink of this processor.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Unwrap the sink of this processor.
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Forward `triple`, then everything derived from it.
    ///
    /// Stops at the first error raised by the sink.
    pub fn triple(&mut self, triple: [S::Id; 3]) -> Result<(), K::Error> {
        log::trace!("processing triple {triple:?}");
        let engine = self.engine;
        let sink = &mut self.sink;
        let mut res = Ok(());
        engine.expand(triple, &mut |t| {
            if res.is_ok() {
                res = sink.triple(t);
            }
        });
        res
    }

    /// Forward `quad`, then everything derived from it, in the same graph.
    ///
    /// Stops at the first error raised by the sink.
    pub fn quad(&mut self, quad: Spog<S::Id>) -> Result<(), K::Error> {
        log::trace!("processing quad {quad:?}");
        let (spo, g) = quad;
        let engine = self.engine;
        let sink = &mut self.sink;
        let mut res = Ok(());
        engine.expand(spo, &mut |t| {
            if res.is_ok() {
                res = sink.quad((t, g.clone()));
            }
        });
        res
    }
}

impl<'a, K> StreamProcessor<'a, SimpleTermSpace, K>
where
    K: InferenceSink<SimpleTerm<'static>>,
{
    /// Process all the triples of `source`.
    pub fn process_triples<TS: TripleSource>(
        &mut self,
        mut source: TS,
    ) -> StreamResult<(), TS::Error, K::Error> {
        source.try_for_each_triple(|t| self.triple(t.to_spo().map(Term::into_term)))
    }

    /// Process all the quads of `source`.
    pub fn process_quads<QS: QuadSource>(
        &mut self,
        mut source: QS,
    ) -> StreamResult<(), QS::Error, K::Error> {
        source.try_for_each_quad(|q| {
            let (spo, g) = q.to_spog();
            self.quad((spo.map(Term::into_term), g.map(Term::into_term)))
        })
    }
}
