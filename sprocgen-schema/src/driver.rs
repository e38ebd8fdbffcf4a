//! Supported database drivers.

use std::{fmt, str::FromStr};

/// A database engine sprocgen can introspect.
///
/// The identifier returned by [`Driver::as_str`] is also the name of the
/// driver's template directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// MySQL / MariaDB
    MySql,
    /// PostgreSQL
    Postgres,
    /// Microsoft SQL Server
    SqlServer,
}

impl Driver {
    /// Every supported driver.
    pub const ALL: [Driver; 3] = [Driver::MySql, Driver::Postgres, Driver::SqlServer];

    /// Returns the driver identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::MySql => "mysql",
            Driver::Postgres => "postgres",
            Driver::SqlServer => "mssql",
        }
    }

    /// The column catalog query for this driver, taking the table name as
    /// its only bind parameter.
    ///
    /// Columns: name, base type, max length (nullable), primary-key flag.
    /// Only the schema of the connection is searched.
    pub fn metadata_query(&self) -> &'static str {
        match self {
            Driver::MySql => MYSQL_METADATA_QUERY,
            Driver::Postgres => POSTGRES_METADATA_QUERY,
            Driver::SqlServer => MSSQL_METADATA_QUERY,
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Driver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(Driver::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Driver::Postgres),
            "mssql" | "sqlserver" => Ok(Driver::SqlServer),
            _ => Err(format!(
                "unknown driver '{}', expected 'mysql', 'postgres' or 'mssql'",
                s
            )),
        }
    }
}

// Key usage is joined to PRIMARY KEY constraints before the outer join, so
// foreign-key usage of a column never yields an extra row.
const MYSQL_METADATA_QUERY: &str = r#"SELECT CAST(col.COLUMN_NAME AS CHAR) AS ColumnName,
       CAST(col.DATA_TYPE AS CHAR) AS DataType,
       CAST(col.CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS MaxLength,
       CAST(CASE WHEN con.CONSTRAINT_NAME IS NULL THEN 0 ELSE 1 END AS SIGNED) AS IsPrimaryKey
FROM INFORMATION_SCHEMA.COLUMNS col
LEFT JOIN (INFORMATION_SCHEMA.KEY_COLUMN_USAGE ke
    INNER JOIN INFORMATION_SCHEMA.TABLE_CONSTRAINTS con
        ON con.TABLE_SCHEMA = ke.TABLE_SCHEMA
       AND con.TABLE_NAME = ke.TABLE_NAME
       AND con.CONSTRAINT_SCHEMA = ke.CONSTRAINT_SCHEMA
       AND con.CONSTRAINT_NAME = ke.CONSTRAINT_NAME
       AND con.CONSTRAINT_TYPE = 'PRIMARY KEY')
    ON col.TABLE_SCHEMA = ke.TABLE_SCHEMA
   AND col.TABLE_NAME = ke.TABLE_NAME
   AND col.COLUMN_NAME = ke.COLUMN_NAME
WHERE col.TABLE_NAME = ?
  AND col.TABLE_SCHEMA = DATABASE()
ORDER BY col.ORDINAL_POSITION"#;

const POSTGRES_METADATA_QUERY: &str = r#"SELECT CAST(col.COLUMN_NAME AS TEXT) AS ColumnName,
       CAST(col.DATA_TYPE AS TEXT) AS DataType,
       CAST(col.CHARACTER_MAXIMUM_LENGTH AS BIGINT) AS MaxLength,
       CAST(CASE WHEN con.CONSTRAINT_NAME IS NULL THEN 0 ELSE 1 END AS BIGINT) AS IsPrimaryKey
FROM INFORMATION_SCHEMA.COLUMNS col
LEFT JOIN (INFORMATION_SCHEMA.KEY_COLUMN_USAGE ke
    INNER JOIN INFORMATION_SCHEMA.TABLE_CONSTRAINTS con
        ON con.TABLE_SCHEMA = ke.TABLE_SCHEMA
       AND con.TABLE_NAME = ke.TABLE_NAME
       AND con.CONSTRAINT_SCHEMA = ke.CONSTRAINT_SCHEMA
       AND con.CONSTRAINT_NAME = ke.CONSTRAINT_NAME
       AND con.CONSTRAINT_TYPE = 'PRIMARY KEY')
    ON col.TABLE_SCHEMA = ke.TABLE_SCHEMA
   AND col.TABLE_NAME = ke.TABLE_NAME
   AND col.COLUMN_NAME = ke.COLUMN_NAME
WHERE col.TABLE_NAME = $1
  AND col.TABLE_SCHEMA = current_schema()
ORDER BY col.ORDINAL_POSITION"#;

const MSSQL_METADATA_QUERY: &str = r#"SELECT CAST(col.COLUMN_NAME AS NVARCHAR(128)) AS ColumnName,
       CAST(col.DATA_TYPE AS NVARCHAR(128)) AS DataType,
       CAST(col.CHARACTER_MAXIMUM_LENGTH AS BIGINT) AS MaxLength,
       CAST(CASE WHEN con.CONSTRAINT_NAME IS NULL THEN 0 ELSE 1 END AS BIGINT) AS IsPrimaryKey
FROM INFORMATION_SCHEMA.COLUMNS col
LEFT JOIN (INFORMATION_SCHEMA.KEY_COLUMN_USAGE ke
    INNER JOIN INFORMATION_SCHEMA.TABLE_CONSTRAINTS con
        ON con.TABLE_SCHEMA = ke.TABLE_SCHEMA
       AND con.TABLE_NAME = ke.TABLE_NAME
       AND con.CONSTRAINT_SCHEMA = ke.CONSTRAINT_SCHEMA
       AND con.CONSTRAINT_NAME = ke.CONSTRAINT_NAME
       AND con.CONSTRAINT_TYPE = 'PRIMARY KEY')
    ON col.TABLE_SCHEMA = ke.TABLE_SCHEMA
   AND col.TABLE_NAME = ke.TABLE_NAME
   AND col.COLUMN_NAME = ke.COLUMN_NAME
WHERE col.TABLE_NAME = @P1
  AND col.TABLE_SCHEMA = SCHEMA_NAME()
ORDER BY col.ORDINAL_POSITION"#;
