use std::path::PathBuf;

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        /// The catalog could not be reached
        Connect(err: postgres::Error) {
            display("cannot connect to the catalog: {}", err)
            source(err)
        }
        /// A catalog lookup failed
        Query(what: String, err: postgres::Error) {
            display("catalog query failed ({}): {}", what, err)
            source(err)
        }
        /// The schema has no base tables at all
        NoTables(schema: String) {
            display("schema {:?} has no base tables", schema)
        }
        Ron(path: PathBuf, err: ron::Error) {
            display("invalid snapshot {}: {}", path.display(), err)
            source(err)
        }
        Json(path: PathBuf, err: serde_json::Error) {
            display("invalid snapshot {}: {}", path.display(), err)
            source(err)
        }
        Io(path: PathBuf, err: std::io::Error) {
            display("{}: {}", path.display(), err)
            source(err)
        }
        /// The generated file could not be persisted
        Write(path: PathBuf, err: std::io::Error) {
            display("cannot write {}: {}", path.display(), err)
            source(err)
        }
        Format(msg: String) {
            display("formatter failed: {}", msg)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
