//! Column catalog reader.

use sqlx::{ColumnIndex, Connection, Decode, Row, Type, mysql::MySqlConnection, postgres::PgConnection};
use tokio::net::TcpStream;
use tokio_util::compat::TokioAsyncWriteCompatExt;

use crate::{DatabaseError, Driver, Error, Result};

/// Length SQL Server reports for `varchar(max)` and friends.
const UNLIMITED_LENGTH: i64 = -1;

/// One column as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    pub name: String,
    /// Base type with its length suffix applied, see [`format_column_type`].
    pub column_type: String,
    pub is_primary_key: bool,
}

/// A table's columns in the order the catalog returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<SchemaColumn>,
}

/// Append the character length to a base type name.
///
/// `-1` marks an unbounded type and becomes `(max)`; no length leaves the
/// type untouched.
pub fn format_column_type(base: &str, max_length: Option<i64>) -> String {
    match max_length {
        Some(UNLIMITED_LENGTH) => format!("{}(max)", base),
        Some(length) => format!("{}({})", base, length),
        None => base.to_string(),
    }
}

/// Read the column catalog of `table` over a single connection.
///
/// Drives the query on a current-thread runtime; the call blocks until the
/// connection is closed again.
pub fn read_table(driver: Driver, connection_string: &str, table: &str) -> Result<TableDescription> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| Box::new(Error::Runtime { source }))?;

    tracing::debug!(%driver, table, "reading column metadata");
    let columns = runtime.block_on(fetch_columns(driver, connection_string, table))?;

    if columns.is_empty() {
        return Err(Box::new(Error::TableNotFound {
            table: table.to_string(),
        }));
    }

    tracing::debug!(table, columns = columns.len(), "read column metadata");
    Ok(TableDescription {
        name: table.to_string(),
        columns,
    })
}

async fn fetch_columns(
    driver: Driver,
    connection_string: &str,
    table: &str,
) -> Result<Vec<SchemaColumn>> {
    match driver {
        Driver::MySql => {
            let mut conn = MySqlConnection::connect(connection_string)
                .await
                .map_err(|e| Error::connect(driver, e))?;
            let rows = sqlx::query(driver.metadata_query())
                .bind(table)
                .fetch_all(&mut conn)
                .await
                .map_err(|e| Error::query(table, e))?;
            let columns = scan_rows(&rows, table)?;
            conn.close().await.map_err(|e| Error::connect(driver, e))?;
            Ok(columns)
        }
        Driver::Postgres => {
            let mut conn = PgConnection::connect(connection_string)
                .await
                .map_err(|e| Error::connect(driver, e))?;
            let rows = sqlx::query(driver.metadata_query())
                .bind(table)
                .fetch_all(&mut conn)
                .await
                .map_err(|e| Error::query(table, e))?;
            let columns = scan_rows(&rows, table)?;
            conn.close().await.map_err(|e| Error::connect(driver, e))?;
            Ok(columns)
        }
        Driver::SqlServer => fetch_sql_server_columns(connection_string, table).await,
    }
}

/// Parse an ADO.NET (`server=tcp:host,1433;...`) or JDBC
/// (`jdbc:sqlserver://host:1433;...`) connection string.
fn sql_server_config(connection_string: &str) -> tiberius::Result<tiberius::Config> {
    if connection_string.starts_with("jdbc:") {
        tiberius::Config::from_jdbc_string(connection_string)
    } else {
        tiberius::Config::from_ado_string(connection_string)
    }
}

async fn fetch_sql_server_columns(connection_string: &str, table: &str) -> Result<Vec<SchemaColumn>> {
    let driver = Driver::SqlServer;
    let config = sql_server_config(connection_string).map_err(|e| Error::connect(driver, e))?;

    let tcp = TcpStream::connect(config.get_addr())
        .await
        .map_err(|e| Error::connect(driver, e))?;
    tcp.set_nodelay(true).map_err(|e| Error::connect(driver, e))?;

    let mut client = tiberius::Client::connect(config, tcp.compat_write())
        .await
        .map_err(|e| Error::connect(driver, e))?;
    let rows = client
        .query(driver.metadata_query(), &[&table])
        .await
        .map_err(|e| Error::query(table, e))?
        .into_first_result()
        .await
        .map_err(|e| Error::query(table, e))?;

    let columns = rows
        .iter()
        .map(|row| scan_sql_server_row(row).map_err(|e| Error::scan(table, e)))
        .collect::<Result<Vec<_>>>()?;
    client.close().await.map_err(|e| Error::connect(driver, e))?;
    Ok(columns)
}

fn scan_sql_server_row(row: &tiberius::Row) -> std::result::Result<SchemaColumn, DatabaseError> {
    let name: &str = row
        .try_get(0)?
        .ok_or(DatabaseError::UnexpectedNull { index: 0 })?;
    let data_type: &str = row
        .try_get(1)?
        .ok_or(DatabaseError::UnexpectedNull { index: 1 })?;
    let max_length: Option<i64> = row.try_get(2)?;
    let is_primary_key: i64 = row
        .try_get(3)?
        .ok_or(DatabaseError::UnexpectedNull { index: 3 })?;

    Ok(SchemaColumn {
        name: name.to_string(),
        column_type: format_column_type(data_type, max_length),
        is_primary_key: is_primary_key != 0,
    })
}

fn scan_rows<R>(rows: &[R], table: &str) -> Result<Vec<SchemaColumn>>
where
    R: Row,
    usize: ColumnIndex<R>,
    for<'r> String: Decode<'r, R::Database> + Type<R::Database>,
    for<'r> i64: Decode<'r, R::Database> + Type<R::Database>,
{
    rows.iter()
        .map(|row| scan_row(row).map_err(|e| Error::scan(table, e)))
        .collect()
}

fn scan_row<R>(row: &R) -> std::result::Result<SchemaColumn, sqlx::Error>
where
    R: Row,
    usize: ColumnIndex<R>,
    for<'r> String: Decode<'r, R::Database> + Type<R::Database>,
    for<'r> i64: Decode<'r, R::Database> + Type<R::Database>,
{
    let name: String = row.try_get(0)?;
    let data_type: String = row.try_get(1)?;
    let max_length: Option<i64> = row.try_get(2)?;
    let is_primary_key: i64 = row.try_get(3)?;

    Ok(SchemaColumn {
        column_type: format_column_type(&data_type, max_length),
        name,
        is_primary_key: is_primary_key != 0,
    })
}
