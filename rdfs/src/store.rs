//! The [`TripleStore`] trait abstracts the base data that inference is layered on.
//!
//! It is implemented by standard collections of identifier triples,
//! and by any sophia [`Graph`](sophia_api::graph::Graph) through
//! [`GraphStore`](crate::graph::GraphStore).
use std::collections::{BTreeSet, HashSet};
use std::convert::Infallible;
use std::error::Error;

use crate::term_space::TermId;

/// A fallible iterator over identifier triples.
pub type TripleScan<'a, X, E> = Box<dyn Iterator<Item = Result<[X; 3], E>> + 'a>;

/// A queryable set (or bag) of identifier triples.
pub trait TripleStore<X: TermId> {
    /// The error raised by this store.
    type Error: Error + 'static;

    /// Iterate over all triples matching the given pattern,
    /// where `None` matches any identifier.
    fn scan(&self, s: Option<&X>, p: Option<&X>, o: Option<&X>) -> TripleScan<'_, X, Self::Error>;

    /// Whether this store contains the triple `(s, p, o)`.
    fn contains(&self, s: &X, p: &X, o: &X) -> Result<bool, Self::Error> {
        Ok(self.scan(Some(s), Some(p), Some(o)).next().transpose()?.is_some())
    }
}

impl<'a, X: TermId, T: TripleStore<X> + ?Sized> TripleStore<X> for &'a T {
    type Error = T::Error;

    fn scan(&self, s: Option<&X>, p: Option<&X>, o: Option<&X>) -> TripleScan<'_, X, Self::Error> {
        T::scan(*self, s, p, o)
    }

    fn contains(&self, s: &X, p: &X, o: &X) -> Result<bool, Self::Error> {
        T::contains(*self, s, p, o)
    }
}

impl<X: TermId> TripleStore<X> for [[X; 3]] {
    type Error = Infallible;

    fn scan(&self, s: Option<&X>, p: Option<&X>, o: Option<&X>) -> TripleScan<'_, X, Self::Error> {
        filtered(self.iter(), s, p, o)
    }
}

impl<X: TermId> TripleStore<X> for Vec<[X; 3]> {
    type Error = Infallible;

    fn scan(&self, s: Option<&X>, p: Option<&X>, o: Option<&X>) -> TripleScan<'_, X, Self::Error> {
        filtered(self.iter(), s, p, o)
    }
}

impl<X: TermId, H: std::hash::BuildHasher> TripleStore<X> for HashSet<[X; 3], H> {
    type Error = Infallible;

    fn scan(&self, s: Option<&X>, p: Option<&X>, o: Option<&X>) -> TripleScan<'_, X, Self::Error> {
        filtered(self.iter(), s, p, o)
    }

    fn contains(&self, s: &X, p: &X, o: &X) -> Result<bool, Self::Error> {
        Ok(HashSet::contains(self, &[s.clone(), p.clone(), o.clone()]))
    }
}

impl<X: TermId + Ord> TripleStore<X> for BTreeSet<[X; 3]> {
    type Error = Infallible;

    fn scan(&self, s: Option<&X>, p: Option<&X>, o: Option<&X>) -> TripleScan<'_, X, Self::Error> {
        filtered(self.iter(), s, p, o)
    }

    fn contains(&self, s: &X, p: &X, o: &X) -> Result<bool, Self::Error> {
        Ok(BTreeSet::contains(self, &[s.clone(), p.clone(), o.clone()]))
    }
}

fn filtered<'a, X, I>(
    triples: I,
    s: Option<&X>,
    p: Option<&X>,
    o: Option<&X>,
) -> TripleScan<'a, X, Infallible>
where
    X: TermId,
    I: Iterator<Item = &'a [X; 3]> + 'a,
{
    let pattern = [s.cloned(), p.cloned(), o.cloned()];
    Box::new(
        triples
            .filter(move |t| {
                pattern
                    .iter()
                    .zip(t.iter())
                    .all(|(pat, x)| pat.as_ref().map_or(true, |pat| pat == x))
            })
            .cloned()
            .map(Ok),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::*;
    use sophia_api::term::SimpleTerm;

    type T = SimpleTerm<'static>;

    fn check<B: TripleStore<T>>(store: B)
    where
        B::Error: std::fmt::Debug,
    {
        let scan = |s: Option<&str>, p: Option<&str>, o: Option<&str>| {
            let (s, p, o) = (s.map(term), p.map(term), o.map(term));
            store
                .scan(s.as_ref(), p.as_ref(), o.as_ref())
                .collect::<Result<HashSet<_>, _>>()
                .unwrap()
        };
        assert_eq!(scan(None, None, None).len(), 10);
        assert_eq!(
            scan(Some("z"), None, None),
            triples(&[("z", "q", "\"lit"), ("z", "q", "y")])
        );
        assert_eq!(
            scan(None, Some("type"), None),
            triples(&[("a", "type", "T2"), ("b", "type", "S2"), ("y", "type", "Q1")])
        );
        assert_eq!(scan(None, None, Some("e")), triples(&[("c", "q", "e")]));
        assert_eq!(scan(Some("e"), Some("r"), Some("g")), triples(&[("e", "r", "g")]));
        assert!(scan(Some("e"), Some("r"), Some("f")).is_empty());
        assert!(scan(Some("nothing"), None, None).is_empty());

        assert!(store.contains(&term("c"), &term("p"), &term("d")).unwrap());
        assert!(!store.contains(&term("c"), &term("pTop"), &term("d")).unwrap());
    }

    #[test]
    fn vec() {
        check(parse(DATA));
    }

    #[test]
    fn slice() {
        check(parse(DATA).as_slice());
    }

    #[test]
    fn hash_set() {
        check(parse(DATA).into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn reference() {
        let data = parse(DATA);
        check(&data);
    }

    #[test]
    fn btree_set() {
        let data: BTreeSet<[usize; 3]> = [[0, 1, 2], [0, 1, 3], [4, 1, 2]].into_iter().collect();
        let objects = |s: usize| {
            data.scan(Some(&s), None, None)
                .map(|r| r.map(|[_, _, o]| o))
                .collect::<Result<Vec<_>, _>>()
                .unwrap()
        };
        assert_eq!(objects(0), vec![2, 3]);
        assert_eq!(objects(4), vec![2]);
        assert!(objects(1).is_empty());
        assert!(TripleStore::contains(&data, &4, &1, &2).unwrap());
        assert!(!TripleStore::contains(&data, &4, &1, &3).unwrap());
    }
}
