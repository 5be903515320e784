#[macro_use]
extern crate log;

#[macro_use]
extern crate quick_error;

#[macro_use]
extern crate serde;

pub mod config;
pub mod error;
pub mod output;
pub mod snapshot;
pub mod stage1;
pub mod stage2;
pub mod types;

use std::path::PathBuf;

pub use config::Config;
pub use error::{Error, Result};
pub use stage1::Catalog;

// Run the transformation
pub fn run(catalog: &mut dyn Catalog, config: &Config) -> Result<String> {
    let tables = stage1::run(catalog, &config.schema)?;
    let code = stage2::run(&tables, config);
    Ok(code)
}

/// Run the transformation and write the generated file, returning its path
///
/// Nothing is written when the catalog cannot be read or the schema is empty.
pub fn generate(catalog: &mut dyn Catalog, config: &Config, formatter: &dyn output::Formatter) -> Result<PathBuf> {
    let code = run(catalog, config)?;
    let code = output::format(formatter, config.format, code)?;
    let path = config.output_path();
    output::write_atomic(&path, &code)?;
    Ok(path)
}
