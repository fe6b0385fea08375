//! Serialization configuration and document emission.

use serde_yaml::Value;

use crate::error::Error;

/// Serialization options, passed explicitly through the pipeline rather than
/// held in process-wide mutable state.
///
/// The serde_yaml backend always emits block-style collections and does not
/// preserve the original scalar quoting, so the only honorable configuration
/// is the default one; anything else is rejected up front by [`validate`].
///
/// [`validate`]: Config::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Emit block-style collections (flow style is not supported).
    pub block_style: bool,
    /// Preserve original scalar quoting (not supported).
    pub preserve_quotes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            block_style: true,
            preserve_quotes: false,
        }
    }
}

impl Config {
    /// Checks that the YAML backend can honor this configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.block_style {
            return Err(Error::UnsupportedConfig {
                option: "flow-style output",
            });
        }
        if self.preserve_quotes {
            return Err(Error::UnsupportedConfig {
                option: "quote preservation",
            });
        }
        Ok(())
    }
}

/// Serializes documents as one block-style YAML stream, separated by `---`
/// markers, in the order given. An empty document list yields an empty
/// string. Mapping keys keep their insertion order.
pub fn emit(docs: &[Value], config: &Config) -> Result<String, Error> {
    config.validate()?;

    let mut out = String::new();
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        out.push_str(&serde_yaml::to_string(doc).map_err(Error::Emit)?);
    }
    Ok(out)
}
