use crate::types::ColumnMeta;

/// Scalar a catalog type maps to, before any modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Int8,
    Int16,
    /// Platform default width
    Int,
    Int64,
    Float64,
    Text,
}

/// Target type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    pub scalar: Scalar,
    pub unsigned: bool,
    pub nullable: bool,
}

impl Scalar {
    pub fn is_integer(self) -> bool {
        matches!(self, Scalar::Int8 | Scalar::Int16 | Scalar::Int | Scalar::Int64)
    }
}

/// Map a catalog type name, case-insensitively; unknown types are text
pub fn base_scalar(data_type: &str) -> Scalar {
    match data_type.to_ascii_lowercase().as_str() {
        "tinyint" => Scalar::Int8,
        "smallint" => Scalar::Int16,
        "int" | "integer" | "mediumint" => Scalar::Int,
        "bigint" => Scalar::Int64,
        "float" | "double" | "decimal" => Scalar::Float64,
        _ => Scalar::Text,
    }
}

/// Whether a full column declaration reads as an unsigned integer
///
/// Purely textual: both `unsigned` and `int` must appear somewhere in the declaration.
pub fn is_unsigned(column_type: &str) -> bool {
    let column_type = column_type.to_ascii_lowercase();
    column_type.contains("unsigned") && column_type.contains("int")
}

/// Resolve the target type of a column: base type, then unsigned, then nullable
pub fn field_type(column: &ColumnMeta) -> FieldType {
    let scalar = base_scalar(&column.data_type);
    FieldType {
        scalar,
        unsigned: scalar.is_integer() && is_unsigned(&column.column_type),
        nullable: column.is_nullable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyRole;

    fn column(data_type: &str, column_type: &str, is_nullable: bool) -> ColumnMeta {
        ColumnMeta {
            column_name: "c".into(),
            data_type: data_type.into(),
            column_type: column_type.into(),
            is_nullable,
            column_key: KeyRole::None,
            extra: String::new(),
            column_default: None,
            comment: String::new(),
        }
    }

    #[test]
    fn fixed_table() {
        assert_eq!(base_scalar("tinyint"), Scalar::Int8);
        assert_eq!(base_scalar("SMALLINT"), Scalar::Int16);
        assert_eq!(base_scalar("int"), Scalar::Int);
        assert_eq!(base_scalar("Integer"), Scalar::Int);
        assert_eq!(base_scalar("mediumint"), Scalar::Int);
        assert_eq!(base_scalar("bigint"), Scalar::Int64);
        assert_eq!(base_scalar("float"), Scalar::Float64);
        assert_eq!(base_scalar("double"), Scalar::Float64);
        assert_eq!(base_scalar("DECIMAL"), Scalar::Float64);
    }

    #[test]
    fn unknown_types_are_text() {
        for name in &["varchar", "datetime", "json", "", "int unsigned", "bool"] {
            assert_eq!(base_scalar(name), Scalar::Text, "{}", name);
        }
    }

    #[test]
    fn unsigned_needs_both_words() {
        assert!(is_unsigned("int(10) unsigned"));
        assert!(is_unsigned("tinyint unsigned zerofill"));
        assert!(is_unsigned("BIGINT(20) UNSIGNED"));
        assert!(!is_unsigned("decimal(10,2) unsigned"));
        assert!(!is_unsigned("varchar(10)"));
        assert!(!is_unsigned("int(11)"));
    }

    #[test]
    fn modifiers_compose() {
        let ty = field_type(&column("int", "int(10) unsigned", true));
        assert_eq!(
            ty,
            FieldType {
                scalar: Scalar::Int,
                unsigned: true,
                nullable: true
            }
        );

        let ty = field_type(&column("bigint", "bigint(20)", false));
        assert!(!ty.unsigned && !ty.nullable);

        let ty = field_type(&column("varchar", "varchar(10)", true));
        assert_eq!(ty.scalar, Scalar::Text);
        assert!(ty.nullable && !ty.unsigned);
    }

    #[test]
    fn unsigned_only_touches_integers() {
        let ty = field_type(&column("double", "double unsigned /* int */", false));
        assert_eq!(ty.scalar, Scalar::Float64);
        assert!(!ty.unsigned);
    }
}
