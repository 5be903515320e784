use itertools::Itertools;

use crate::config::{Config, Language};
use crate::stage1::LoadedTable;

pub mod golang;
pub mod mapping;
pub mod naming;
pub mod rust;
pub mod tags;

use mapping::FieldType;
use tags::TagFragment;

// --------------------------------------------------------------------------------------------------------------------
// Derived declarations
// --------------------------------------------------------------------------------------------------------------------

/// One record type, derived from a table
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub ident: String,
    /// Raw table name
    pub table: String,
    pub comment: String,
    pub fields: Vec<FieldDecl>,
}

/// One field, derived from a column
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub ident: String,
    /// Raw column name
    pub column: String,
    pub ty: FieldType,
    pub tags: Vec<TagFragment>,
    pub comment: String,
}

// --------------------------------------------------------------------------------------------------------------------
// Public functions
// --------------------------------------------------------------------------------------------------------------------

/// Render the whole generation unit
pub fn run(tables: &[LoadedTable], config: &Config) -> String {
    let decls: Vec<TypeDecl> = tables.iter().map(|table| declare(table, config)).collect();
    match config.language {
        Language::Go => golang::render(&decls, config),
        Language::Rust => rust::render(&decls, config),
    }
}

/// Translate a table into its record type, keeping the column order
pub fn declare(table: &LoadedTable, config: &Config) -> TypeDecl {
    let fields = table
        .columns
        .iter()
        .map(|column| FieldDecl {
            ident: naming::snake_to_pascal(&column.column_name),
            column: column.column_name.clone(),
            ty: mapping::field_type(column),
            tags: tags::fragments(column, &config.tags),
            comment: column.comment.clone(),
        })
        .collect();

    TypeDecl {
        ident: naming::snake_to_pascal(&table.meta.table_name),
        table: table.meta.table_name.clone(),
        comment: table.meta.comment.clone(),
        fields,
    }
}

/// Identifiers a renderer is about to emit for one type that will not compile: empty, starting with a digit, or
/// shared by two columns. `fields` pairs each raw column name with its identifier.
pub(crate) fn ident_problems(decl: &TypeDecl, fields: &[(&str, String)]) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(reason) = invalid_ident(&decl.ident) {
        problems.push(format!("table {:?} gives the type name {:?}, which {}", decl.table, decl.ident, reason));
    }
    for (i, (column, ident)) in fields.iter().enumerate() {
        if let Some(reason) = invalid_ident(ident) {
            problems.push(format!(
                "column {:?} of table {:?} gives the field name {:?}, which {}",
                column, decl.table, ident, reason
            ));
        }
        if let Some((earlier, _)) = fields[..i].iter().find(|(_, other)| other == ident) {
            problems.push(format!(
                "columns {:?} and {:?} of table {:?} both give the field name {:?}",
                earlier, column, decl.table, ident
            ));
        }
    }
    problems
}

fn invalid_ident(ident: &str) -> Option<&'static str> {
    match ident.trim_start_matches("r#").chars().next() {
        None => Some("is empty"),
        Some(c) if c.is_ascii_digit() => Some("starts with a digit"),
        Some(_) => None,
    }
}

/// Collapse a catalog comment onto a single line
pub(crate) fn one_line(comment: &str) -> String {
    comment.split_whitespace().join(" ")
}
