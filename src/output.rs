use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::FormatPolicy;
use crate::error::{Error, Result};

// --------------------------------------------------------------------------------------------------------------------
// Formatters
// --------------------------------------------------------------------------------------------------------------------

/// Post-processing applied to the generated text before it is written
pub trait Formatter {
    fn format(&self, source: &str) -> Result<String>;
}

/// Leaves the text as it is
pub struct NoFormatter;

impl Formatter for NoFormatter {
    fn format(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Pipes the text through an external program, e.g. `gofmt` or `rustfmt`
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new<S: AsRef<str>>(program: &str, args: &[S]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Format(format!("cannot run {}: {}", self.program, e)))?;

        // Feed the whole text and close stdin, otherwise the formatter never finishes
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| Error::Format(format!("{}: {}", self.program, e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Format(format!("{}: {}", self.program, e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Format(format!("{} {}: {}", self.program, output.status, stderr.trim())));
        }
        String::from_utf8(output.stdout).map_err(|e| Error::Format(format!("{}: {}", self.program, e)))
    }
}

// --------------------------------------------------------------------------------------------------------------------
// Functions
// --------------------------------------------------------------------------------------------------------------------

/// Format the text according to the policy
///
/// Under `FormatPolicy::Warn` a formatter failure is logged and the raw text is kept.
pub fn format(formatter: &dyn Formatter, policy: Option<FormatPolicy>, source: String) -> Result<String> {
    match policy {
        None => Ok(source),
        Some(policy) => match formatter.format(&source) {
            Ok(formatted) => Ok(formatted),
            Err(e) if policy == FormatPolicy::Warn => {
                warn!("{}, keeping the unformatted output", e);
                Ok(source)
            }
            Err(e) => Err(e),
        },
    }
}

/// Replace the file with the given text, all or nothing
///
/// The text goes to a temporary file next to the target, which is then renamed over it.
pub fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let output_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&output_dir).map_err(|e| Error::Write(output_dir.clone(), e))?;

    let mut file = tempfile::NamedTempFile::new_in(&output_dir).map_err(|e| Error::Write(path.to_path_buf(), e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| Error::Write(path.to_path_buf(), e))?;
    file.persist(path).map_err(|e| Error::Write(path.to_path_buf(), e.error))?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Formatter for Failing {
        fn format(&self, _source: &str) -> Result<String> {
            Err(Error::Format("boom".to_string()))
        }
    }

    struct Upper;

    impl Formatter for Upper {
        fn format(&self, source: &str) -> Result<String> {
            Ok(source.to_uppercase())
        }
    }

    #[test]
    fn formatting_is_optional() {
        let text = format(&Upper, None, "package model".to_string()).unwrap();
        assert_eq!(text, "package model");
        let text = format(&Upper, Some(FormatPolicy::Fatal), "package model".to_string()).unwrap();
        assert_eq!(text, "PACKAGE MODEL");
    }

    #[test]
    fn formatter_failure_follows_policy() {
        let text = format(&Failing, Some(FormatPolicy::Warn), "raw".to_string()).unwrap();
        assert_eq!(text, "raw");
        assert!(matches!(
            format(&Failing, Some(FormatPolicy::Fatal), "raw".to_string()),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn missing_formatter_program_is_an_error() {
        let formatter = CommandFormatter::new("schemagen-no-such-formatter", &["--check"]);
        assert!(matches!(formatter.format("x"), Err(Error::Format(_))));
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.go");
        write_atomic(&path, "first version, rather long").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        // Only the target is left behind
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
