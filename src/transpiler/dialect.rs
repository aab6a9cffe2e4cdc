use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::transpiler::sql::ansi::AnsiGenerator;
use crate::transpiler::sql::db2::Db2Generator;
use crate::transpiler::sql::mysql::MysqlGenerator;
use crate::transpiler::sql::oracle::{Oracle12Generator, OracleGenerator};
use crate::transpiler::sql::postgres::PostgresGenerator;
use crate::transpiler::sql::sqlite::SqliteGenerator;
use crate::transpiler::sql::sqlserver::SqlServerGenerator;
use crate::transpiler::traits::{GeneratorOptions, SqlGenerator};

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Ansi,
    #[serde(alias = "postgresql")]
    Postgres,
    MySQL,
    SQLite,
    /// ROWNUM-based pagination.
    Oracle,
    /// `OFFSET ... ROWS FETCH FIRST ... ROWS ONLY` pagination.
    Oracle12,
    #[serde(alias = "mssql")]
    SqlServer,
    Db2,
}

impl Dialect {
    pub const ALL: [Dialect; 8] = [
        Dialect::Ansi,
        Dialect::Postgres,
        Dialect::MySQL,
        Dialect::SQLite,
        Dialect::Oracle,
        Dialect::Oracle12,
        Dialect::SqlServer,
        Dialect::Db2,
    ];

    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        self.generator_with(&CompilerConfig::default())
    }

    /// A generator for this dialect using every setting of `config` except
    /// its dialect.
    pub fn generator_with(&self, config: &CompilerConfig) -> Box<dyn SqlGenerator> {
        let options = GeneratorOptions {
            in_clause_length: config.in_clause_length.or(self.default_in_clause_length()),
        };
        match self {
            Dialect::Ansi => Box::new(AnsiGenerator::with_options(options)),
            Dialect::Postgres => Box::new(PostgresGenerator::with_options(options)),
            Dialect::MySQL => Box::new(MysqlGenerator::with_options(options)),
            Dialect::SQLite => Box::new(SqliteGenerator::with_options(options)),
            Dialect::Oracle => Box::new(OracleGenerator::with_options(options)),
            Dialect::Oracle12 => Box::new(Oracle12Generator::with_options(options)),
            Dialect::SqlServer => Box::new(SqlServerGenerator::with_options(options)),
            Dialect::Db2 => Box::new(Db2Generator::with_options(options)),
        }
    }

    /// The vendor cap on `IN` list length.
    pub fn default_in_clause_length(&self) -> Option<usize> {
        match self {
            Dialect::Oracle | Dialect::Oracle12 => Some(1000),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Ansi => "ansi",
            Dialect::Postgres => "postgres",
            Dialect::MySQL => "mysql",
            Dialect::SQLite => "sqlite",
            Dialect::Oracle => "oracle",
            Dialect::Oracle12 => "oracle12",
            Dialect::SqlServer => "sqlserver",
            Dialect::Db2 => "db2",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" => Ok(Dialect::Ansi),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySQL),
            "sqlite" => Ok(Dialect::SQLite),
            "oracle" => Ok(Dialect::Oracle),
            "oracle12" => Ok(Dialect::Oracle12),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            "db2" => Ok(Dialect::Db2),
            other => Err(CompileError::Config(format!("unknown dialect '{}'", other))),
        }
    }
}
