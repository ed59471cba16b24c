use std::collections::HashSet;
use std::hash::Hash;

pub trait ResultIteratorDistinct<T, E>: Iterator<Item = Result<T, E>> + Sized {
    /// Drop the `Ok` items already yielded; errors are always passed through.
    fn distinct_ok(self) -> DistinctOk<Self, T> {
        DistinctOk {
            inner: self,
            seen: HashSet::new(),
        }
    }
}
impl<I, T, E> ResultIteratorDistinct<T, E> for I where I: Iterator<Item = Result<T, E>> {}

pub struct DistinctOk<I, T> {
    inner: I,
    seen: HashSet<T>,
}

impl<I, T, E> Iterator for DistinctOk<I, T>
where
    I: Iterator<Item = Result<T, E>>,
    T: Clone + Eq + Hash,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(t) => {
                    if self.seen.insert(t.clone()) {
                        return Some(Ok(t));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn distinct_ok() {
        let items: Vec<Result<u8, &str>> = vec![Ok(1), Ok(2), Ok(1), Err("x"), Ok(3), Err("x"), Ok(2)];
        let got: Vec<_> = items.into_iter().distinct_ok().collect();
        assert_eq!(got, vec![Ok(1), Ok(2), Err("x"), Ok(3), Err("x")]);
    }
}
