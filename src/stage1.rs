use crate::error::{Error, Result};
use crate::types::*;

// --------------------------------------------------------------------------------------------------------------------
// Catalog sources
// --------------------------------------------------------------------------------------------------------------------

/// Read-only access to a database catalog
pub trait Catalog {
    /// List the base tables of a schema, views excluded
    fn list_base_tables(&mut self, schema: &str) -> Result<Vec<TableMeta>>;

    /// List the columns of a table, in ordinal order
    fn list_columns(&mut self, schema: &str, table: &str) -> Result<Vec<ColumnMeta>>;
}

/// A table together with its columns, as consumed by the translation stage
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub meta: TableMeta,
    pub columns: Vec<ColumnMeta>,
}

/// PostgreSQL catalog, read through `pg_catalog`
pub struct PgCatalog {
    client: postgres::Client,
}

impl PgCatalog {
    pub fn connect(conn_config: &postgres::config::Config) -> Result<Self> {
        let client = conn_config.connect(postgres::NoTls).map_err(Error::Connect)?;
        Ok(Self { client })
    }
}

impl Catalog for PgCatalog {
    fn list_base_tables(&mut self, schema: &str) -> Result<Vec<TableMeta>> {
        let tables_sql = include_str!("resources/tables.sql");
        let rows = self
            .client
            .query(tables_sql, &[&schema])
            .map_err(|e| Error::Query(format!("tables of {}", schema), e))?;
        rows.iter().map(|row| parse_table(schema, row)).collect()
    }

    fn list_columns(&mut self, schema: &str, table: &str) -> Result<Vec<ColumnMeta>> {
        let columns_sql = include_str!("resources/columns.sql");
        let rows = self
            .client
            .query(columns_sql, &[&schema, &table])
            .map_err(|e| Error::Query(format!("columns of {}.{}", schema, table), e))?;
        rows.iter()
            .map(|row| parse_column(row).map_err(|e| Error::Query(format!("columns of {}.{}", schema, table), e)))
            .collect()
    }
}

// --------------------------------------------------------------------------------------------------------------------
// Functions
// --------------------------------------------------------------------------------------------------------------------

/// Get every table of the schema that has at least one column
///
/// A failing table list is fatal, and so is an empty one. A table whose columns cannot be read is skipped.
pub fn run(catalog: &mut dyn Catalog, schema: &str) -> Result<Vec<LoadedTable>> {
    let tables = catalog.list_base_tables(schema)?;
    if tables.is_empty() {
        return Err(Error::NoTables(schema.to_string()));
    }
    debug!("found {} tables in {}", tables.len(), schema);

    let mut loaded = Vec::with_capacity(tables.len());
    for meta in tables {
        let columns = match catalog.list_columns(&meta.schema_name, &meta.table_name) {
            Ok(columns) => columns,
            Err(e) => {
                warn!("skipping {}.{}: {}", meta.schema_name, meta.table_name, e);
                continue;
            }
        };
        if columns.is_empty() {
            debug!("skipping {}.{}: no columns", meta.schema_name, meta.table_name);
            continue;
        }
        loaded.push(LoadedTable { meta, columns });
    }

    // Done
    Ok(loaded)
}

// --------------------------------------------------------------------------------------------------------------------
// Private stuff
// --------------------------------------------------------------------------------------------------------------------

fn parse_table(schema: &str, row: &postgres::row::Row) -> Result<TableMeta> {
    let table_name = row
        .try_get("name")
        .map_err(|e| Error::Query(format!("tables of {}", schema), e))?;
    let comment = row
        .try_get("comment")
        .map_err(|e| Error::Query(format!("tables of {}", schema), e))?;
    Ok(TableMeta {
        schema_name: schema.to_string(),
        table_name,
        comment,
    })
}

fn parse_column(row: &postgres::row::Row) -> std::result::Result<ColumnMeta, postgres::Error> {
    Ok(ColumnMeta {
        column_name: row.try_get("name")?,
        data_type: row.try_get("data_type")?,
        column_type: row.try_get("column_type")?,
        is_nullable: row.try_get("is_nullable")?,
        column_key: row.try_get("column_key")?,
        extra: row.try_get("extra")?,
        column_default: row.try_get("column_default")?,
        comment: row.try_get("comment")?,
    })
}
