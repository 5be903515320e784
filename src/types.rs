use postgres::types::{accepts, FromSql, Type};
use std::error::Error;

// --------------------------------------------------------------------------------------------------------------------
// Catalog metadata
// --------------------------------------------------------------------------------------------------------------------

/// A base table, as listed by the catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TableMeta {
    pub schema_name: String,
    pub table_name: String,
    #[serde(default)]
    pub comment: String,
}

/// A column of a base table. The catalog returns them in ordinal order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnMeta {
    pub column_name: String,
    /// Catalog type name, e.g. `int` or `varchar`
    pub data_type: String,
    /// Raw declaration, e.g. `int(11) unsigned`
    pub column_type: String,
    pub is_nullable: bool,
    #[serde(default)]
    pub column_key: KeyRole,
    #[serde(default)]
    pub extra: String,
    #[serde(default)]
    pub column_default: Option<String>,
    #[serde(default)]
    pub comment: String,
}

/// Index role of a column
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyRole {
    #[default]
    None,
    #[serde(alias = "PRI")]
    Primary,
    #[serde(alias = "UNI")]
    Unique,
    #[serde(alias = "MUL")]
    Indexed,
}

impl KeyRole {
    /// Decode the `COLUMN_KEY` codes used by the information schema
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "pri" => KeyRole::Primary,
            "uni" => KeyRole::Unique,
            "mul" => KeyRole::Indexed,
            _ => KeyRole::None,
        }
    }
}

impl ColumnMeta {
    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_ascii_lowercase().contains("auto_increment")
    }
}

/// Parse the key role as computed by the columns query
impl<'a> FromSql<'a> for KeyRole {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        let code = postgres_protocol::types::text_from_sql(raw)?;
        Ok(KeyRole::from_code(code))
    }

    accepts!(TEXT, VARCHAR);
}
