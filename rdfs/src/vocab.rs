//! Identifiers of the RDF and RDFS terms driving inference.
use sophia_api::ns::{rdf, rdfs};

use crate::term_space::{TermId, TermSpace};

/// The identifiers, in some [`TermSpace`], of the five terms that inference cares about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RdfsVocab<X> {
    /// `rdf:type`
    pub rdf_type: X,
    /// `rdfs:subClassOf`
    pub sub_class_of: X,
    /// `rdfs:subPropertyOf`
    pub sub_property_of: X,
    /// `rdfs:domain`
    pub domain: X,
    /// `rdfs:range`
    pub range: X,
}

impl<X: TermId> RdfsVocab<X> {
    /// Map the RDFS vocabulary into `space`.
    pub fn new<S>(space: &mut S) -> Result<Self, S::Error>
    where
        S: TermSpace<Id = X>,
    {
        Ok(RdfsVocab {
            rdf_type: space.ensure_id(rdf::type_)?,
            sub_class_of: space.ensure_id(rdfs::subClassOf)?,
            sub_property_of: space.ensure_id(rdfs::subPropertyOf)?,
            domain: space.ensure_id(rdfs::domain)?,
            range: space.ensure_id(rdfs::range)?,
        })
    }

    /// Whether `p` is one of the four predicates that make up a schema.
    pub fn is_schema_predicate(&self, p: &X) -> bool {
        p == &self.sub_class_of
            || p == &self.sub_property_of
            || p == &self.domain
            || p == &self.range
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::term_space::{IndexedTermSpace, SimpleTermSpace};
    use sophia_api::term::Term;

    #[test]
    fn simple_vocab() -> Result<(), Box<dyn std::error::Error>> {
        let vocab = RdfsVocab::new(&mut SimpleTermSpace)?;
        assert!(Term::eq(&vocab.rdf_type, rdf::type_));
        assert!(Term::eq(&vocab.range, rdfs::range));
        assert!(vocab.is_schema_predicate(&vocab.domain));
        assert!(!vocab.is_schema_predicate(&vocab.rdf_type));
        Ok(())
    }

    #[test]
    fn indexed_vocab() -> Result<(), Box<dyn std::error::Error>> {
        let mut space = IndexedTermSpace::<u16>::new();
        let vocab = RdfsVocab::new(&mut space)?;
        assert_eq!(vocab.rdf_type, 0);
        assert_eq!(vocab.range, 4);
        assert_eq!(RdfsVocab::new(&mut space)?, vocab);
        assert_eq!(space.len(), 5);
        Ok(())
    }
}
