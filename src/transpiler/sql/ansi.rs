use crate::ast::Kind;
use crate::quoting::{AnsiQuoting, Quoting};
use crate::transpiler::dispatch::Visitor;
use crate::transpiler::traits::{self, GeneratorOptions, SqlGenerator};

/// The base generator: double-quoted identifiers, `?` binds and no overrides.
#[derive(Debug, Clone, Default)]
pub struct AnsiGenerator {
    options: GeneratorOptions,
}

impl AnsiGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Visitor for AnsiGenerator {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn handles(&self, kind: Kind) -> bool {
        traits::handles(kind)
    }
}

impl SqlGenerator for AnsiGenerator {
    fn quoting(&self) -> &dyn Quoting {
        &AnsiQuoting
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }
}
