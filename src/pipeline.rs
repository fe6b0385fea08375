//! The normalization pipeline: parse, delete, walk, serialize.

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::Error;
use crate::fieldpath::{self, Path};
use crate::rules;
use crate::serialize::{self, Config};

/// Cluster-generated metadata fields stripped from every document before the
/// rewrite walk runs. Comma-delimited because the label key contains dots.
const GENERATED_FIELD_SPECS: &[&str] = &[
    "metadata,creationTimestamp",
    "metadata,generation",
    "metadata,labels,paas.redhat.com/appcode",
    "metadata,namespace",
    "metadata,resourceVersion",
    "metadata,uid",
];

static GENERATED_FIELDS: Lazy<Vec<Path>> =
    Lazy::new(|| GENERATED_FIELD_SPECS.iter().map(|s| Path::parse(s)).collect());

/// Normalizer applies the full rewrite pass to YAML streams.
///
/// Processing is single-threaded and stateless across calls: each input is
/// one parse → delete → walk → serialize pass with no shared mutable state.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: Config,
}

impl Normalizer {
    /// Creates a normalizer, rejecting serialization configs the backend
    /// cannot honor.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Normalizer { config })
    }

    /// Creates a normalizer with the default serialization config.
    pub fn with_defaults() -> Self {
        Normalizer {
            config: Config::default(),
        }
    }

    /// Normalizes one YAML stream. Every document in the stream is parsed,
    /// stripped of generated fields, rewritten through the rule table, and
    /// re-emitted in its original position. A stream of N documents always
    /// produces N documents.
    pub fn normalize_str(&self, input: &str) -> Result<String, Error> {
        if input.trim().is_empty() {
            return Ok(String::new());
        }

        let mut docs = Vec::new();
        for de in serde_yaml::Deserializer::from_str(input) {
            let doc = Value::deserialize(de).map_err(Error::Parse)?;
            docs.push(normalize_document(doc));
        }
        serialize::emit(&docs, &self.config)
    }
}

/// Runs the structural pass over one parsed document: fixed-path deletions
/// first, then the rewrite walk.
pub fn normalize_document(mut doc: Value) -> Value {
    for path in GENERATED_FIELDS.iter() {
        fieldpath::delete_all(&mut doc, path);
    }
    rules::walk(&doc)
}
