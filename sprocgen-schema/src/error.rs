use miette::Diagnostic;
use thiserror::Error;

use crate::Driver;

/// Result type for schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to start the database runtime")]
    #[diagnostic(code(sprocgen::runtime))]
    Runtime {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to connect to {driver} database")]
    #[diagnostic(
        code(sprocgen::connect),
        help("check the connection string and that the server is reachable")
    )]
    Connect {
        driver: Driver,
        #[source]
        source: DatabaseError,
    },

    #[error("failed to read column metadata for table '{table}'")]
    #[diagnostic(code(sprocgen::query))]
    Query {
        table: String,
        #[source]
        source: DatabaseError,
    },

    #[error("failed to decode column metadata for table '{table}'")]
    #[diagnostic(code(sprocgen::scan))]
    Scan {
        table: String,
        #[source]
        source: DatabaseError,
    },

    #[error("table '{table}' has no columns")]
    #[diagnostic(
        code(sprocgen::table_not_found),
        help("check the table name and that the connection targets the right database and schema")
    )]
    TableNotFound { table: String },
}

/// Failure reported by one of the database clients.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Tiberius(#[from] tiberius::error::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("column {index} is NULL")]
    UnexpectedNull { index: usize },
}

impl Error {
    pub(crate) fn connect(driver: Driver, source: impl Into<DatabaseError>) -> Box<Self> {
        Box::new(Error::Connect {
            driver,
            source: source.into(),
        })
    }

    pub(crate) fn query(table: &str, source: impl Into<DatabaseError>) -> Box<Self> {
        Box::new(Error::Query {
            table: table.to_string(),
            source: source.into(),
        })
    }

    pub(crate) fn scan(table: &str, source: impl Into<DatabaseError>) -> Box<Self> {
        Box::new(Error::Scan {
            table: table.to_string(),
            source: source.into(),
        })
    }
}
