use clap::{Parser, ValueEnum};
use std::{path::PathBuf, str::FromStr};

use schemagen::config::{Config, FormatPolicy, JsonName, JsonTag, Language, NullStyle, TagOptions};
use schemagen::output::{CommandFormatter, Formatter, NoFormatter};
use schemagen::snapshot::{Snapshot, SnapshotCatalog};
use schemagen::stage1::{Catalog, PgCatalog};

#[derive(Parser)]
#[command(version, author)]
struct Opts {
    /// PostgreSQL connection string,
    /// for details please refer to https://www.postgresql.org/docs/current/libpq-connect.html#LIBPQ-CONNSTRING
    #[arg(long, conflicts_with_all = ["host", "port", "user", "password", "dbname", "snapshot"])]
    url: Option<String>,
    /// PostgreSQL host name
    #[arg(short = 'H', long, default_value = "localhost")]
    host: String,
    /// PostgreSQL port
    #[arg(short, long, default_value = "5432")]
    port: u16,
    /// PostgreSQL user name
    #[arg(short, long, default_value = "postgres")]
    user: String,
    /// PostgreSQL password
    #[arg(short = 'w', long)]
    password: Option<String>,
    /// PostgreSQL database name
    #[arg(short, long, default_value = "postgres")]
    dbname: String,
    /// Read the catalog from a RON or JSON snapshot instead of a database
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Save the catalog of the schema to a RON or JSON snapshot before generating
    #[arg(long)]
    dump_snapshot: Option<PathBuf>,
    /// Schema to introspect
    #[arg(short, long, default_value = "public")]
    schema: String,
    /// Language of the generated code
    #[arg(short, long, value_enum, default_value = "go")]
    lang: Lang,
    /// Package name written in the generated file
    #[arg(long, default_value = "model")]
    package: String,
    /// Name used by the json tag
    #[arg(long, value_enum, default_value = "raw")]
    json_name: JsonNameArg,
    /// Add omitempty to the json tag
    #[arg(long)]
    omit_empty: bool,
    /// Do not add the json tag
    #[arg(long, conflicts_with_all = ["json_name", "omit_empty"])]
    no_json: bool,
    /// Add the xorm tag
    #[arg(long)]
    xorm: bool,
    /// Add the gorm tag
    #[arg(long)]
    gorm: bool,
    /// How nullable columns are represented in Go
    #[arg(long, value_enum, default_value = "pointer")]
    null_style: NullStyleArg,
    /// Emit a table name constant for every table
    #[arg(long)]
    table_constants: bool,
    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    /// Output file name, `<schema>.go` or `<schema>.rs` by default
    #[arg(short, long)]
    file_name: Option<String>,
    /// Run gofmt or rustfmt on the result, a failure only prints a warning
    #[arg(long)]
    format: bool,
    /// Like --format, but a formatter failure aborts
    #[arg(long)]
    format_strict: bool,
    /// Leave the generation time out of the header
    #[arg(long)]
    no_timestamp: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
    Go,
    Rust,
}

#[derive(Clone, Copy, ValueEnum)]
enum JsonNameArg {
    Raw,
    Snake,
}

#[derive(Clone, Copy, ValueEnum)]
enum NullStyleArg {
    Pointer,
    SqlNull,
}

impl Opts {
    fn config(&self) -> Config {
        let json = if self.no_json {
            None
        } else {
            Some(JsonTag {
                name: match self.json_name {
                    JsonNameArg::Raw => JsonName::Raw,
                    JsonNameArg::Snake => JsonName::Snake,
                },
                omit_empty: self.omit_empty,
            })
        };
        let format = if self.format_strict {
            Some(FormatPolicy::Fatal)
        } else if self.format {
            Some(FormatPolicy::Warn)
        } else {
            None
        };

        Config {
            schema: self.schema.clone(),
            language: match self.lang {
                Lang::Go => Language::Go,
                Lang::Rust => Language::Rust,
            },
            package: self.package.clone(),
            tags: TagOptions {
                json,
                xorm: self.xorm,
                gorm: self.gorm,
            },
            null_style: match self.null_style {
                NullStyleArg::Pointer => NullStyle::Pointer,
                NullStyleArg::SqlNull => NullStyle::SqlNull,
            },
            table_constants: self.table_constants,
            output_dir: self.output_dir.clone(),
            file_name: self.file_name.clone(),
            generated_at: if self.no_timestamp {
                None
            } else {
                Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
            },
            format,
        }
    }

    fn conn_config(&self) -> schemagen::Result<postgres::config::Config> {
        // Read the PostgreSQL connection configuration
        if let Some(url) = &self.url {
            return postgres::config::Config::from_str(url).map_err(schemagen::Error::Connect);
        }
        let mut conn_config = postgres::config::Config::new();
        conn_config.host(&self.host);
        conn_config.port(self.port);
        conn_config.user(&self.user);
        if let Some(password) = &self.password {
            conn_config.password(password);
        }
        conn_config.dbname(&self.dbname);
        Ok(conn_config)
    }

    fn catalog(&self) -> schemagen::Result<Box<dyn Catalog>> {
        match &self.snapshot {
            Some(path) => Ok(Box::new(SnapshotCatalog::open(path)?)),
            None => Ok(Box::new(PgCatalog::connect(&self.conn_config()?)?)),
        }
    }
}

fn try_main(opts: Opts) -> schemagen::Result<()> {
    let config = opts.config();
    let mut catalog = opts.catalog()?;

    if let Some(path) = &opts.dump_snapshot {
        Snapshot::capture(catalog.as_mut(), &config.schema)?.save(path)?;
    }

    let formatter: Box<dyn Formatter> = match config.format {
        Some(_) => {
            let (program, args) = config.language.formatter_command();
            Box::new(CommandFormatter::new(program, &args[..]))
        }
        None => Box::new(NoFormatter),
    };

    // Run the transformation and write the result
    schemagen::generate(catalog.as_mut(), &config, formatter.as_ref())?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse the program options
    let opts: Opts = Opts::parse();
    if let Err(e) = try_main(opts) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
