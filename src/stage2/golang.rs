use itertools::Itertools;

use crate::config::{Config, NullStyle};
use crate::stage2::mapping::{FieldType, Scalar};
use crate::stage2::tags::TagFragment;
use crate::stage2::{ident_problems, one_line, FieldDecl, TypeDecl};

// --------------------------------------------------------------------------------------------------------------------
// Public functions
// --------------------------------------------------------------------------------------------------------------------

/// Render the declarations as a Go source file
pub fn render(decls: &[TypeDecl], config: &Config) -> String {
    for decl in decls {
        let fields: Vec<_> = decl.fields.iter().map(|f| (f.column.as_str(), f.ident.clone())).collect();
        for problem in ident_problems(decl, &fields) {
            warn!("{}", problem);
        }
    }

    let needs_sql = config.null_style == NullStyle::SqlNull
        && decls.iter().flat_map(|d| &d.fields).any(|f| f.ty.nullable);

    let mut code = header(config, needs_sql);
    if config.table_constants && !decls.is_empty() {
        code.push_str(&constants(decls));
    }
    for decl in decls {
        code.push_str(&type_block(decl, config));
    }
    code
}

/// Go type of a field, wrapped when nullable
pub fn go_type(ty: &FieldType, null_style: NullStyle) -> String {
    let base = match ty.scalar {
        Scalar::Int8 => "int8",
        Scalar::Int16 => "int16",
        Scalar::Int => "int",
        Scalar::Int64 => "int64",
        Scalar::Float64 => "float64",
        Scalar::Text => "string",
    };
    let base = if ty.unsigned { format!("u{}", base) } else { base.to_string() };
    match (ty.nullable, null_style) {
        (false, _) => base,
        (true, NullStyle::Pointer) => format!("*{}", base),
        (true, NullStyle::SqlNull) => sql_null(&base),
    }
}

/// `database/sql` wrapper holding exactly the given Go type, the generic `sql.Null[T]` (Go 1.22) when no named one does
fn sql_null(base: &str) -> String {
    match base {
        "string" => "sql.NullString".to_string(),
        "float64" => "sql.NullFloat64".to_string(),
        "int64" => "sql.NullInt64".to_string(),
        "int16" => "sql.NullInt16".to_string(),
        "uint8" => "sql.NullByte".to_string(),
        _ => format!("sql.Null[{}]", base),
    }
}

// --------------------------------------------------------------------------------------------------------------------
// Private functions
// --------------------------------------------------------------------------------------------------------------------

fn header(config: &Config, needs_sql: bool) -> String {
    let mut code = String::from("// Code generated by schemagen. DO NOT EDIT.\n");
    if let Some(generated_at) = &config.generated_at {
        code.push_str(&format!("// datetime {}\n", generated_at));
    }
    code.push_str(&format!("\npackage {}\n\n", config.package));
    if needs_sql {
        code.push_str("import \"database/sql\"\n\n");
    }
    code
}

/// `TableUserAccount = "user_account"`, one per table
fn constants(decls: &[TypeDecl]) -> String {
    let lines = decls
        .iter()
        .map(|decl| format!("\tTable{} = \"{}\"\n", decl.ident, escape(&decl.table)))
        .join("");
    format!("const (\n{})\n\n", lines)
}

fn type_block(decl: &TypeDecl, config: &Config) -> String {
    let title = format!("{} {} {}", decl.ident, decl.table, one_line(&decl.comment));
    let mut code = format!("// {}\n", title.trim_end());
    code.push_str(&format!("type {} struct {{\n", decl.ident));
    for field in &decl.fields {
        code.push_str(&field_line(field, config));
    }
    code.push_str("}\n\n");
    code
}

fn field_line(field: &FieldDecl, config: &Config) -> String {
    let mut line = format!("\t{} {}", field.ident, go_type(&field.ty, config.null_style));
    if !field.tags.is_empty() {
        line.push_str(&format!(" `{}`", tag_block(&field.tags)));
    }
    let comment = one_line(&field.comment);
    if !comment.is_empty() {
        line.push_str(&format!(" // {}", comment));
    }
    line.push('\n');
    line
}

/// `json:"id" xorm:"pk int(11)"`
fn tag_block(tags: &[TagFragment]) -> String {
    tags.iter()
        .map(|tag| format!("{}:\"{}\"", tag.convention.key(), escape(&tag.value)))
        .join(" ")
}

/// Make a value safe inside a quoted string within a raw (backquoted) struct tag
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"").replace('`', "'")
}
