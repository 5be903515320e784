use std::path::PathBuf;

/// Everything a generation run needs to know, built once at start-up
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Schema (database) to introspect
    pub schema: String,
    pub language: Language,
    /// Package label written in the file header
    pub package: String,
    pub tags: TagOptions,
    pub null_style: NullStyle,
    /// Emit one table-name constant per table ahead of the types
    pub table_constants: bool,
    pub output_dir: PathBuf,
    /// Defaults to `<schema>.<extension>`
    pub file_name: Option<String>,
    /// Timestamp written in the header, if any
    pub generated_at: Option<String>,
    /// Run the external formatter, and what to do when it fails
    pub format: Option<FormatPolicy>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Go,
    Rust,
}

/// Which tag conventions to attach to each field
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TagOptions {
    pub json: Option<JsonTag>,
    pub xorm: bool,
    pub gorm: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct JsonTag {
    pub name: JsonName,
    pub omit_empty: bool,
}

/// External field name used by the serialization tag
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum JsonName {
    /// The catalog column name, untouched
    Raw,
    /// The column name in snake case
    Snake,
}

/// How nullable columns are wrapped in Go
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum NullStyle {
    /// `*int64`
    Pointer,
    /// `sql.NullInt64`
    SqlNull,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FormatPolicy {
    /// Log the failure and keep the unformatted text
    Warn,
    /// Abort the run
    Fatal,
}

impl Language {
    pub fn extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rs",
        }
    }

    /// Formatter that reads source on stdin and prints it on stdout
    pub fn formatter_command(self) -> (&'static str, Vec<&'static str>) {
        match self {
            Language::Go => ("gofmt", vec![]),
            Language::Rust => ("rustfmt", vec!["--emit", "stdout", "--edition", "2018"]),
        }
    }
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            json: Some(JsonTag {
                name: JsonName::Raw,
                omit_empty: false,
            }),
            xorm: false,
            gorm: false,
        }
    }
}

impl TagOptions {
    pub fn any(&self) -> bool {
        self.json.is_some() || self.xorm || self.gorm
    }
}

impl Config {
    pub fn new(schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
            language: Language::Go,
            package: "model".to_string(),
            tags: TagOptions::default(),
            null_style: NullStyle::Pointer,
            table_constants: false,
            output_dir: PathBuf::from("."),
            file_name: None,
            generated_at: None,
            format: None,
        }
    }

    pub fn output_file_name(&self) -> String {
        match &self.file_name {
            Some(name) => name.clone(),
            None => format!("{}.{}", self.schema, self.language.extension()),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_defaults_to_schema_name() {
        let mut config = Config::new("shop");
        assert_eq!(config.output_file_name(), "shop.go");
        config.language = Language::Rust;
        assert_eq!(config.output_file_name(), "shop.rs");
        config.file_name = Some("models.rs".to_string());
        assert_eq!(config.output_path(), PathBuf::from("./models.rs"));
    }

    #[test]
    fn json_is_on_by_default() {
        let tags = TagOptions::default();
        assert!(tags.any());
        assert!(!tags.xorm && !tags.gorm);
        let none = TagOptions {
            json: None,
            xorm: false,
            gorm: false,
        };
        assert!(!none.any());
    }
}
