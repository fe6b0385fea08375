//! # Tekton Normalize
//!
//! A single-pass, stateless rewriter for Kubernetes/Tekton YAML manifests.
//!
//! Each input stream is parsed, every document is stripped of
//! cluster-generated metadata fields, rewritten through an ordered rule
//! table (duration collapsing, `apiVersion` rewrites, noise-key removal,
//! embedded-JSON expansion), and re-emitted as block-style YAML in the
//! original document order.
//!
//! ## Modules
//!
//! - [`duration`] - Duration scalar normalization (`"15m0s"` → `"15m"`)
//! - [`fieldpath`] - Deletion paths and anywhere-nested field removal
//! - [`rules`] - The ordered rewrite rule table and recursive tree walk
//! - [`serialize`] - Serialization configuration and document emission
//! - [`pipeline`] - The parse → delete → walk → serialize pass
//! - [`error`] - Crate error types

pub mod duration;
pub mod error;
pub mod fieldpath;
pub mod pipeline;
pub mod rules;
pub mod serialize;

pub use error::Error;
pub use fieldpath::Path as FieldPath;
pub use pipeline::Normalizer;
pub use serialize::Config;
