//! A [`TermSpace`] maps RDF [terms](Term) to the identifiers that inference operates on.
//!
//! Inference never looks inside identifiers:
//! it only compares and hashes them,
//! and asks the term space whether an identifier denotes a literal.
//! Hence the same [closure index](crate::closure::ClosureIndex)
//! and [rule engine](crate::engine::RuleEngine)
//! can work directly on terms ([`SimpleTermSpace`])
//! or on short numeric indices ([`IndexedTermSpace`]).
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::convert::Infallible;
use std::error::Error;
use std::fmt::Debug;
use std::hash::Hash;

use sophia_api::term::{FromTerm, SimpleTerm, Term, TermKind};

use crate::IndexOverflow;

/// What inference requires from identifiers.
///
/// This trait is automatically implemented by all eligible types.
pub trait TermId: Clone + Debug + Eq + Hash + 'static {}
impl<T> TermId for T where T: Clone + Debug + Eq + Hash + 'static {}

/// A space of identifiers for RDF terms.
pub trait TermSpace {
    /// The type of identifiers in this space.
    type Id: TermId;
    /// The error raised when a term can not be mapped into this space.
    type Error: Error + 'static;

    /// Get the identifier of term `t`, allocating one if necessary.
    fn ensure_id<T: Term>(&mut self, t: T) -> Result<Self::Id, Self::Error>;

    /// Whether `id` identifies a literal.
    fn is_literal(&self, id: &Self::Id) -> bool;
}

/// The trivial [`TermSpace`], where terms are their own identifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleTermSpace;

impl TermSpace for SimpleTermSpace {
    type Id = SimpleTerm<'static>;
    type Error = Infallible;

    fn ensure_id<T: Term>(&mut self, t: T) -> Result<Self::Id, Self::Error> {
        Ok(SimpleTerm::from_term(t))
    }

    fn is_literal(&self, id: &Self::Id) -> bool {
        id.kind() == TermKind::Literal
    }
}

/// Abstraction of the short numeric indices used by [`IndexedTermSpace`].
pub trait Index: Copy + Debug + Eq + Hash + Ord + 'static {
    /// Convert a position in the term space into an index,
    /// failing if it does not fit.
    fn from_usize(other: usize) -> Result<Self, IndexOverflow>;
    /// Convert this index into a position in the term space.
    fn into_usize(self) -> usize;
}

impl Index for usize {
    fn from_usize(other: usize) -> Result<Self, IndexOverflow> {
        Ok(other)
    }
    fn into_usize(self) -> usize {
        self
    }
}

impl Index for u32 {
    fn from_usize(other: usize) -> Result<Self, IndexOverflow> {
        other
            .try_into()
            .map_err(|_| IndexOverflow("u32", u32::MAX as usize))
    }
    fn into_usize(self) -> usize {
        self as usize
    }
}

impl Index for u16 {
    fn from_usize(other: usize) -> Result<Self, IndexOverflow> {
        other
            .try_into()
            .map_err(|_| IndexOverflow("u16", u16::MAX as usize))
    }
    fn into_usize(self) -> usize {
        self as usize
    }
}

/// A [`TermSpace`] interning terms as numeric [indices](Index).
#[derive(Clone, Debug)]
pub struct IndexedTermSpace<I: Index> {
    t2i: HashMap<SimpleTerm<'static>, I>,
    i2t: Vec<SimpleTerm<'static>>,
}

impl<I: Index> IndexedTermSpace<I> {
    /// Build an empty term space.
    pub fn new() -> Self {
        IndexedTermSpace {
            t2i: HashMap::new(),
            i2t: vec![],
        }
    }

    /// The number of terms in this space.
    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    /// Whether this space contains no term at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the index of term `t`, if it has already been interned.
    pub fn get_id<T: Term>(&self, t: T) -> Option<I> {
        let key = SimpleTerm::from_term_ref(&t);
        self.t2i.get(&key).copied()
    }

    /// Get the term identified by `i`, if any.
    pub fn term(&self, i: I) -> Option<&SimpleTerm<'static>> {
        self.i2t.get(i.into_usize())
    }
}

impl<I: Index> Default for IndexedTermSpace<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Index> TermSpace for IndexedTermSpace<I> {
    type Id = I;
    type Error = IndexOverflow;

    fn ensure_id<T: Term>(&mut self, t: T) -> Result<Self::Id, Self::Error> {
        let t = SimpleTerm::from_term(t);
        match self.t2i.entry(t) {
            Entry::Vacant(e) => {
                let i = I::from_usize(self.i2t.len())?;
                self.i2t.push(e.key().clone());
                e.insert(i);
                Ok(i)
            }
            Entry::Occupied(e) => Ok(*e.get()),
        }
    }

    fn is_literal(&self, id: &Self::Id) -> bool {
        self.term(*id)
            .is_some_and(|t| t.kind() == TermKind::Literal)
    }
}
