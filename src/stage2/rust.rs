use heck::{ShoutySnakeCase, SnakeCase};

use crate::config::Config;
use crate::stage2::mapping::{FieldType, Scalar};
use crate::stage2::tags::Convention;
use crate::stage2::{ident_problems, one_line, FieldDecl, TypeDecl};

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

// --------------------------------------------------------------------------------------------------------------------
// Public functions
// --------------------------------------------------------------------------------------------------------------------

/// Render the declarations as a Rust module
pub fn render(decls: &[TypeDecl], config: &Config) -> String {
    if config.tags.xorm || config.tags.gorm {
        warn!("xorm and gorm tags have no Rust counterpart, ignoring them");
    }
    let serializable = config.tags.json.is_some();

    let mut scope = codegen::Scope::new();
    if serializable {
        scope.import("serde", "Deserialize");
        scope.import("serde", "Serialize");
    }

    if config.table_constants {
        for decl in decls {
            scope.raw(&format!(
                "pub const TABLE_{}: &str = {:?};",
                decl.table.to_shouty_snake_case(),
                decl.table
            ));
        }
    }

    for decl in decls {
        let fields: Vec<_> = decl.fields.iter().map(|f| (f.column.as_str(), gen_fld_name(&f.column))).collect();
        for problem in ident_problems(decl, &fields) {
            warn!("{}", problem);
        }
        gen_struct(&mut scope, decl, serializable);
    }

    format!("{}{}\n", header(config), scope.to_string())
}

/// Rust type of a field, wrapped in an `Option` when nullable
pub fn rs_type(ty: &FieldType) -> String {
    let base = match (ty.scalar, ty.unsigned) {
        (Scalar::Int8, false) => "i8",
        (Scalar::Int8, true) => "u8",
        (Scalar::Int16, false) => "i16",
        (Scalar::Int16, true) => "u16",
        (Scalar::Int, false) => "i32",
        (Scalar::Int, true) => "u32",
        (Scalar::Int64, false) => "i64",
        (Scalar::Int64, true) => "u64",
        (Scalar::Float64, _) => "f64",
        (Scalar::Text, _) => "String",
    };
    if ty.nullable {
        format!("Option<{}>", base)
    } else {
        base.to_string()
    }
}

/// Convert a column name to a safe Rust field name
pub fn gen_fld_name(column: &str) -> String {
    let name = column.to_snake_case();
    if KEYWORDS.contains(&name.as_str()) {
        format!("r#{}", name)
    } else {
        name
    }
}

// --------------------------------------------------------------------------------------------------------------------
// Private functions
// --------------------------------------------------------------------------------------------------------------------

fn header(config: &Config) -> String {
    let mut code = String::from("// Code generated by schemagen. DO NOT EDIT.\n");
    if let Some(generated_at) = &config.generated_at {
        code.push_str(&format!("// datetime {}\n", generated_at));
    }
    code.push('\n');
    code
}

fn gen_struct(scope: &mut codegen::Scope, decl: &TypeDecl, serializable: bool) {
    // Create the new struct definition
    let new_struct = scope.new_struct(&decl.ident);

    // Make it public and describe where it comes from
    new_struct.vis("pub");
    let doc = format!("{} {}", decl.table, one_line(&decl.comment));
    new_struct.doc(doc.trim_end());

    // Add the derives
    new_struct.derive("Debug");
    new_struct.derive("Clone");
    if serializable {
        new_struct.derive("Serialize");
        new_struct.derive("Deserialize");
    }

    // Generate the struct fields
    for field in &decl.fields {
        new_struct.push_field(gen_field(field));
    }
}

fn gen_field(field: &FieldDecl) -> codegen::Field {
    let rs_name = gen_fld_name(&field.column);
    let mut fld = codegen::Field::new(&rs_name, rs_type(&field.ty));
    fld.vis("pub");

    let comment = one_line(&field.comment);
    if !comment.is_empty() {
        fld.doc(comment);
    }

    // Only the serialization tag means something to serde
    if let Some(json) = field.tags.iter().find(|t| t.convention == Convention::Json) {
        let (name, omit_empty) = match json.value.strip_suffix(",omitempty") {
            Some(name) => (name, true),
            None => (json.value.as_str(), false),
        };
        let mut options = Vec::new();
        if name != rs_name.trim_start_matches("r#") {
            options.push(format!("rename = {:?}", name));
        }
        if omit_empty && field.ty.nullable {
            options.push("skip_serializing_if = \"Option::is_none\"".to_string());
        }
        if !options.is_empty() {
            fld.annotation(format!("#[serde({})]", options.join(", ")));
        }
    }

    fld
}
