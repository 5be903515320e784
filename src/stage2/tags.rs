use crate::config::{JsonName, JsonTag, TagOptions};
use crate::stage2::naming::pascal_to_snake;
use crate::types::{ColumnMeta, KeyRole};

/// Tag conventions, in the order they are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Convention {
    Json,
    Xorm,
    Gorm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagFragment {
    pub convention: Convention,
    pub value: String,
}

impl Convention {
    pub fn key(self) -> &'static str {
        match self {
            Convention::Json => "json",
            Convention::Xorm => "xorm",
            Convention::Gorm => "gorm",
        }
    }
}

/// Build every selected tag for a column: json, then xorm, then gorm
pub fn fragments(column: &ColumnMeta, options: &TagOptions) -> Vec<TagFragment> {
    let mut tags = Vec::new();
    if let Some(json) = &options.json {
        tags.push(TagFragment {
            convention: Convention::Json,
            value: json_tag(column, json),
        });
    }
    if options.xorm {
        tags.push(TagFragment {
            convention: Convention::Xorm,
            value: xorm_tag(column),
        });
    }
    if options.gorm {
        tags.push(TagFragment {
            convention: Convention::Gorm,
            value: gorm_tag(column),
        });
    }
    tags
}

/// External field name used by serializers
pub fn json_name(column: &ColumnMeta, name: JsonName) -> String {
    match name {
        JsonName::Raw => column.column_name.clone(),
        JsonName::Snake => pascal_to_snake(&column.column_name),
    }
}

/// `nick_name` or `nick_name,omitempty`
pub fn json_tag(column: &ColumnMeta, json: &JsonTag) -> String {
    let name = json_name(column, json.name);
    if json.omit_empty {
        format!("{},omitempty", name)
    } else {
        name
    }
}

/// Space separated flags, e.g. `autoincr pk bigint(20) unsigned not null`
pub fn xorm_tag(column: &ColumnMeta) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if column.is_auto_increment() {
        parts.push("autoincr");
    }
    match column.column_key {
        KeyRole::Primary => parts.push("pk"),
        KeyRole::Unique => parts.push("unique"),
        KeyRole::Indexed => parts.push("index"),
        KeyRole::None => {}
    }
    parts.push(&column.column_type);
    if column.is_nullable {
        parts.push("default null");
    } else {
        parts.push("not null");
        match column.column_default.as_deref() {
            Some("0") => parts.push("default 0"),
            Some("''") => parts.push("default ''"),
            _ => {}
        }
    }
    parts.join(" ").trim_end().to_string()
}

/// Semicolon separated `key:value` list, e.g. `column:id;primary_key;type:int(11);not_null;comment:''`
pub fn gorm_tag(column: &ColumnMeta) -> String {
    let mut tag = format!("column:{};", column.column_name);
    if column.is_auto_increment() {
        tag.push_str("auto_increment;");
    }
    match column.column_key {
        KeyRole::Primary => tag.push_str("primary_key;"),
        KeyRole::Unique => tag.push_str("unique;"),
        KeyRole::Indexed => tag.push_str("index;"),
        KeyRole::None => {}
    }
    tag.push_str(&format!("type:{};", column.column_type));
    if column.is_nullable {
        tag.push_str("default_null;");
    } else {
        tag.push_str("not_null;");
        match column.column_default.as_deref() {
            Some("0") => tag.push_str("default 0;"),
            Some("''") => tag.push_str("default '';"),
            _ => {}
        }
    }
    // Quotes are doubled as in SQL, `;` would otherwise end the comment early
    let comment = column.comment.replace('\'', "''").replace(';', "\\;");
    tag.push_str(&format!("comment:'{}'", comment));
    tag.trim_end_matches(';').to_string()
}
