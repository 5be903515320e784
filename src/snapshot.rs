use std::path::Path;

use crate::error::{Error, Result};
use crate::stage1::Catalog;
use crate::types::*;

/// Offline copy of one schema's catalog, stored as RON or JSON
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Snapshot {
    pub schema: String,
    pub tables: Vec<SnapshotTable>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SnapshotTable {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub columns: Vec<ColumnMeta>,
}

impl Snapshot {
    /// Read every table of a schema from another catalog, columns included
    pub fn capture(catalog: &mut dyn Catalog, schema: &str) -> Result<Self> {
        let mut tables = Vec::new();
        for table in catalog.list_base_tables(schema)? {
            let columns = catalog.list_columns(schema, &table.table_name)?;
            tables.push(SnapshotTable {
                name: table.table_name,
                comment: table.comment,
                columns,
            });
        }
        Ok(Self {
            schema: schema.to_string(),
            tables,
        })
    }

    /// Load a snapshot, JSON if the extension says so and RON otherwise
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Io(path.to_path_buf(), e))?;
        if is_json(path) {
            serde_json::from_str(&text).map_err(|e| Error::Json(path.to_path_buf(), e))
        } else {
            ron::from_str(&text).map_err(|e| Error::Ron(path.to_path_buf(), e))
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| Error::Json(path.to_path_buf(), e))?
        } else {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| Error::Ron(path.to_path_buf(), e))?
        };
        crate::output::write_atomic(path, &text)
    }
}

/// Catalog served from a snapshot
pub struct SnapshotCatalog {
    snapshot: Snapshot,
}

impl SnapshotCatalog {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Snapshot::load(path)?))
    }
}

impl Catalog for SnapshotCatalog {
    fn list_base_tables(&mut self, schema: &str) -> Result<Vec<TableMeta>> {
        if self.snapshot.schema != schema {
            return Ok(Vec::new());
        }
        let tables = self
            .snapshot
            .tables
            .iter()
            .map(|t| TableMeta {
                schema_name: schema.to_string(),
                table_name: t.name.clone(),
                comment: t.comment.clone(),
            })
            .collect();
        Ok(tables)
    }

    fn list_columns(&mut self, schema: &str, table: &str) -> Result<Vec<ColumnMeta>> {
        if self.snapshot.schema != schema {
            return Ok(Vec::new());
        }
        let columns = self
            .snapshot
            .tables
            .iter()
            .find(|t| t.name == table)
            .map(|t| t.columns.clone())
            .unwrap_or_default();
        Ok(columns)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = r#"(
        schema: "shop",
        tables: [
            (
                name: "user_account",
                comment: "registered users",
                columns: [
                    (
                        column_name: "id",
                        data_type: "bigint",
                        column_type: "bigint(20) unsigned",
                        is_nullable: false,
                        column_key: Primary,
                        extra: "auto_increment",
                    ),
                    (
                        column_name: "nick_name",
                        data_type: "varchar",
                        column_type: "varchar(50)",
                        is_nullable: true,
                        comment: "display name",
                    ),
                ],
            ),
        ],
    )"#;

    #[test]
    fn reads_ron_with_defaults() {
        let snapshot: Snapshot = ron::from_str(SHOP).unwrap();
        let mut catalog = SnapshotCatalog::new(snapshot);

        let tables = catalog.list_base_tables("shop").unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].schema_name, "shop");
        assert_eq!(tables[0].comment, "registered users");

        let columns = catalog.list_columns("shop", "user_account").unwrap();
        assert_eq!(columns[0].column_key, KeyRole::Primary);
        assert_eq!(columns[1].column_key, KeyRole::None);
        assert_eq!(columns[1].column_default, None);
        assert_eq!(columns[1].comment, "display name");
    }

    #[test]
    fn other_schemas_are_empty() {
        let snapshot: Snapshot = ron::from_str(SHOP).unwrap();
        let mut catalog = SnapshotCatalog::new(snapshot);
        assert!(catalog.list_base_tables("billing").unwrap().is_empty());
        assert!(catalog.list_columns("shop", "missing").unwrap().is_empty());
    }

    #[test]
    fn json_accepts_catalog_key_codes() {
        let text = r#"{
            "schema": "shop",
            "tables": [{
                "name": "tag",
                "columns": [{
                    "column_name": "slug",
                    "data_type": "varchar",
                    "column_type": "varchar(20)",
                    "is_nullable": false,
                    "column_key": "UNI",
                    "column_default": "''"
                }]
            }]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(text).unwrap();
        let column = &snapshot.tables[0].columns[0];
        assert_eq!(column.column_key, KeyRole::Unique);
        assert_eq!(column.column_default.as_deref(), Some("''"));
    }

    #[test]
    fn save_and_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot: Snapshot = ron::from_str(SHOP).unwrap();
        for name in &["shop.ron", "shop.json"] {
            let path = dir.path().join(name);
            snapshot.save(&path).unwrap();
            assert_eq!(Snapshot::load(&path).unwrap(), snapshot);
        }
        let text = std::fs::read_to_string(dir.path().join("shop.json")).unwrap();
        assert!(text.trim_start().starts_with('{'));
    }
}
