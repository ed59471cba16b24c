use std::collections::HashSet;

use sophia_api::term::SimpleTerm;
use test_case::test_case;

use super::*;
use crate::config::RdfsConfig;
use crate::term_space::{IndexedTermSpace, SimpleTermSpace, TermSpace};
use crate::test::*;

#[test_case(("a", "type", "T2"), &[("a", "type", "T1"), ("a", "type", "T")]; "rdfs9")]
#[test_case(("b", "type", "S2"), &[("b", "type", "T2"), ("b", "type", "T1"), ("b", "type", "T")]; "rdfs9 chain")]
#[test_case(("a", "type", "Z"), &[]; "unknown class")]
#[test_case(("c", "p", "d"), &[("c", "pTop", "d"), ("c", "type", "P"), ("d", "type", "X"), ("d", "type", "X1")]; "rdfs7 rdfs2 rdfs3")]
#[test_case(("e", "ppp", "f"), &[
    ("e", "pp", "f"), ("e", "p", "f"), ("e", "pTop", "f"),
    ("e", "type", "P2"), ("e", "type", "P1"), ("e", "type", "P"),
    ("f", "type", "X"), ("f", "type", "X1"),
]; "inherited domain and range")]
#[test_case(("e", "r", "g"), &[
    ("e", "type", "T2"), ("e", "type", "T1"), ("e", "type", "T"),
    ("g", "type", "U"), ("g", "type", "T"),
]; "domain and range")]
#[test_case(("z", "q", "y"), &[("y", "type", "Q")]; "range")]
#[test_case(("z", "q", "\"lit"), &[]; "range literal")]
#[test_case(("w", "pTop", "\"42"), &[]; "inherited range literal")]
#[test_case(("a", "knows", "b"), &[]; "unknown property")]
#[test_case(("T2", "subClassOf", "T1"), &[]; "schema triple")]
fn derive(triple: (&str, &str, &str), expected: &[(&str, &str, &str)]) {
    let index = schema_index(RdfsConfig::new());
    let engine = RuleEngine::new(&index, &SimpleTermSpace);
    let (s, p, o) = triple;
    assert_eq!(engine.derive(&tr(s, p, o)), triples(expected));
}

#[test_case(("a", "type", "T2"), &[
    ("a", "type", "T1"), ("a", "type", "T"),
    ("T2", "subClassOf", "T1"), ("T2", "subClassOf", "T"),
    ("S2", "subClassOf", "T2"), ("T2", "subClassOf", "T2"),
]; "rdfs9 and rdfs10")]
#[test_case(("T2", "subClassOf", "T1"), &[
    ("T1", "subClassOf", "T"), ("T2", "subClassOf", "T2"), ("S2", "subClassOf", "T1"),
    ("T1", "subClassOf", "T1"),
]; "rdfs11")]
#[test_case(("pp", "subPropertyOf", "p"), &[
    ("p", "subPropertyOf", "pTop"), ("ppp", "subPropertyOf", "p"),
    ("pp", "subPropertyOf", "pp"), ("p", "subPropertyOf", "p"),
]; "rdfs5")]
#[test_case(("z", "q", "y"), &[
    ("y", "type", "Q"), ("Q1", "subClassOf", "Q"), ("Q", "subClassOf", "Q"), ("q", "range", "Q"),
]; "rdfs3 and rdfs10")]
#[test_case(("c", "p", "d"), &[
    ("c", "pTop", "d"),
    ("p", "subPropertyOf", "pTop"), ("pp", "subPropertyOf", "p"), ("ppp", "subPropertyOf", "p"),
    ("p", "subPropertyOf", "p"),
    ("c", "type", "P"), ("P1", "subClassOf", "P"), ("P2", "subClassOf", "P"), ("P", "subClassOf", "P"),
    ("p", "domain", "P"),
    ("d", "type", "X"), ("d", "type", "X1"), ("X", "subClassOf", "X1"), ("X", "subClassOf", "X"),
    ("pTop", "range", "X"),
]; "rdfs2 rdfs3 with inherited range")]
#[test_case(("z", "q", "\"lit"), &[]; "range literal")]
fn derive_with_schema(triple: (&str, &str, &str), expected: &[(&str, &str, &str)]) {
    let index = schema_index(RdfsConfig::new().with_derived_schema(true));
    let engine = RuleEngine::new(&index, &SimpleTermSpace);
    let (s, p, o) = triple;
    assert_eq!(engine.derive(&tr(s, p, o)), triples(expected));
}

#[test]
fn derive_with_schema_sub_property() {
    let index = schema_index(RdfsConfig::new().with_derived_schema(true));
    let engine = RuleEngine::new(&index, &SimpleTermSpace);
    let derived = engine.derive(&tr("e", "ppp", "f"));
    for expected in [
        ("e", "pTop", "f"),
        ("e", "type", "P2"),
        ("ppp", "subPropertyOf", "pp"),
        ("ppp", "subPropertyOf", "pTop"),
        ("ppp", "subPropertyOf", "ppp"),
        ("pp", "domain", "P2"),
        ("p", "domain", "P"),
        ("pTop", "range", "X"),
        ("P2", "subClassOf", "P"),
        ("P2", "subClassOf", "P2"),
        ("X", "subClassOf", "X1"),
    ] {
        let (s, p, o) = expected;
        assert!(derived.contains(&tr(s, p, o)), "{expected:?} not derived");
    }
    assert!(!derived.contains(&tr("e", "ppp", "f")));
    for (s, p, o) in [("ppp", "domain", "P2"), ("ppp", "domain", "P"), ("ppp", "range", "X")] {
        assert!(!derived.contains(&tr(s, p, o)), "({s} {p} {o}) is not entailed");
    }
}

#[test]
fn expand_emits_triple_first() {
    let index = schema_index(RdfsConfig::new());
    let engine = RuleEngine::new(&index, &SimpleTermSpace);
    let mut emitted = vec![];
    engine.expand(tr("a", "type", "T2"), &mut |t| emitted.push(t));
    assert_eq!(emitted[0], tr("a", "type", "T2"));
    assert_eq!(emitted.len(), 3);
}

#[test]
fn expand_into() {
    let index = schema_index(RdfsConfig::new());
    let engine = RuleEngine::new(&index, &SimpleTermSpace);
    let mut acc: Vec<[SimpleTerm<'static>; 3]> = vec![tr("x", "y", "z")];
    engine.expand_into(&mut acc, tr("z", "q", "y"));
    assert_eq!(acc, vec![tr("x", "y", "z"), tr("z", "q", "y"), tr("y", "type", "Q")]);
}

#[test]
fn expand_all_is_the_closure() {
    crate::test_setup();
    let index = schema_index(RdfsConfig::new());
    let engine = RuleEngine::new(&index, &SimpleTermSpace);
    let expanded = engine.expand_all(parse(DATA));
    assert_eq!(expanded, materialize(&parse(SCHEMA), &parse(DATA)));
}

#[test]
fn indexed_space() -> Result<(), Box<dyn std::error::Error>> {
    let mut space = IndexedTermSpace::<u16>::new();
    let index = ClosureIndex::from_graph(&parse(SCHEMA), &mut space, RdfsConfig::new())?;
    let mut id = |name: &str| space.ensure_id(term(name));
    let [z, q, lit, y, qq] = [id("z")?, id("q")?, id("\"lit")?, id("y")?, id("Q")?];
    let rdf_type = index.vocab().rdf_type;

    let engine = RuleEngine::new(&index, &space);
    assert!(engine.derive(&[z, q, lit]).is_empty());
    assert_eq!(
        engine.derive(&[z, q, y]),
        HashSet::from([[y, rdf_type, qq]])
    );
    Ok(())
}
