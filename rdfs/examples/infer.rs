//! Read an RDFS schema from the [Turtle] file given as first argument,
//! and a graph in [Turtle] from the standard input,
//! then print this graph in [N-Triples],
//! together with everything that RDFS entails from it and the schema.
//!
//! Triples are written as soon as they are read or derived,
//! so the output may contain duplicates (pipe it to `sort -u` if needed).
//!
//! Set `SOPHIA_RDFS_DERIVED=true` to also derive schema-level triples,
//! which is useful when the input graph contains the schema itself.
//!
//! [Turtle]: https://www.w3.org/TR/turtle/
//! [N-Triples]: https://www.w3.org/TR/n-triples/

use std::convert::Infallible;
use std::fs::File;
use std::io::{self, stdin, stdout, BufReader, BufWriter, Stdout};
use std::iter::once;
use std::process::exit;

use sophia_api::prelude::*;
use sophia_api::quad::Spog;
use sophia_api::source::StreamError::{SinkError, SourceError};
use sophia_api::term::SimpleTerm;
use sophia_inmem::graph::LightGraph;
use sophia_rdfs::config::RdfsConfig;
use sophia_rdfs::factory::{rdfs_stream, schema_index};
use sophia_rdfs::stream::InferenceSink;
use sophia_turtle::parser::turtle;
use sophia_turtle::serializer::nt::NtSerializer;

/// Writes every triple it receives as N-Triples.
struct NtSink(NtSerializer<BufWriter<Stdout>>);

impl InferenceSink<SimpleTerm<'static>> for NtSink {
    type Error = io::Error;

    fn triple(&mut self, triple: [SimpleTerm<'static>; 3]) -> Result<(), Self::Error> {
        match self.0.serialize_triples(once(Ok::<_, Infallible>(triple))) {
            Ok(_) => Ok(()),
            Err(SourceError(never)) => match never {},
            Err(SinkError(e)) => Err(e),
        }
    }

    fn quad(&mut self, (spo, _): Spog<SimpleTerm<'static>>) -> Result<(), Self::Error> {
        self.triple(spo)
    }
}

fn main() {
    env_logger::init();
    let Some(schema_path) = std::env::args().nth(1) else {
        eprintln!("usage: infer <schema.ttl> < data.ttl");
        exit(-1);
    };
    let config = match RdfsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };

    let schema_file = match File::open(&schema_path) {
        Ok(f) => BufReader::new(f),
        Err(e) => {
            eprintln!("Can not open {schema_path}: {e}");
            exit(1);
        }
    };
    let schema: LightGraph = match turtle::parse_bufread(schema_file).collect_triples() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error while parsing schema: {e}");
            exit(1);
        }
    };
    let index = match schema_index(&schema, config) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error while compiling schema: {e}");
            exit(1);
        }
    };

    let sink = NtSink(NtSerializer::new(BufWriter::new(stdout())));
    let mut stream = rdfs_stream(&index, sink);
    let input = turtle::parse_bufread(BufReader::new(stdin()));
    match stream.process_triples(input) {
        Ok(_) => {}
        Err(SourceError(e)) => {
            eprintln!("Error while parsing input: {e}");
            exit(1);
        }
        Err(SinkError(e)) => {
            eprintln!("Error while serializing output: {e}");
            exit(1);
        }
    }
}
