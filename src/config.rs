//! Compiler configuration

use std::path::Path;

use serde::Deserialize;

use crate::ast::Node;
use crate::collector::Compiled;
use crate::error::{CompileError, CompileResult};
use crate::transpiler::{Dialect, SqlGenerator};

/// Settings for one compiler instance, loadable from TOML.
///
/// ```toml
/// dialect = "oracle"
/// in_clause_length = 500
/// substitute_binds = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Target database
    pub dialect: Dialect,

    /// Split `IN` lists longer than this; unset uses the dialect's cap
    pub in_clause_length: Option<usize>,

    /// Inline quoted values instead of placeholders
    pub substitute_binds: bool,
}

impl CompilerConfig {
    /// Create a new configuration builder
    pub fn builder() -> CompilerConfigBuilder {
        CompilerConfigBuilder::default()
    }

    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> CompileResult<Self> {
        toml::from_str(text).map_err(|e| CompileError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CompileResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), dialect = %config.dialect, "loaded compiler config");
        Ok(config)
    }

    /// The generator these settings describe.
    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        self.dialect.generator_with(self)
    }

    /// Compile with the configured dialect and bind mode.
    pub fn compile(&self, node: &Node) -> CompileResult<Compiled> {
        let generator = self.generator();
        if self.substitute_binds {
            generator.compile_substituted(node)
        } else {
            generator.compile(node)
        }
    }
}

/// Builder for CompilerConfig
#[derive(Debug, Default)]
pub struct CompilerConfigBuilder {
    config: CompilerConfig,
}

impl CompilerConfigBuilder {
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    pub fn in_clause_length(mut self, max: usize) -> Self {
        self.config.in_clause_length = Some(max);
        self
    }

    pub fn substitute_binds(mut self, enabled: bool) -> Self {
        self.config.substitute_binds = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CompilerConfig {
        self.config
    }
}
