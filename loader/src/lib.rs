//! Load Luban binary tables from disk.
//!
//! # Overview
//!
//! Generated table readers ask for a table by name and decode its rows from a
//! [`ByteBuf`]. A [`Source`] resolves that name to bytes: [`Directory`] reads
//! `<root>/<name>.<extension>` from the filesystem. [`Tables`] loads a set of named
//! tables through any source, failing on the first table that cannot be read.
//!
//! # Example
//!
//! ```no_run
//! use luban_buffer::ReadBuf;
//! use luban_loader::{Config, Directory, Tables};
//!
//! let source = Directory::new(Config::new("output/bytes"));
//! let mut tables = Tables::load(&source, ["item", "monster"]).unwrap();
//! let item = tables.get_mut("item").unwrap();
//! let rows = item.read_size().unwrap();
//! println!("item has {rows} rows");
//! ```

use luban_buffer::ByteBuf;
use std::{
    collections::BTreeMap,
    io::{Error as IoError, ErrorKind},
    path::PathBuf,
};
use thiserror::Error;
use tracing::{debug, info};

/// Default extension of exported table files.
pub const DEFAULT_EXTENSION: &str = "bytes";

/// Errors that can occur when loading tables.
#[derive(Error, Debug)]
pub enum Error {
    #[error("table name invalid, must be a file name without separators: {0}")]
    TableNameInvalid(String),
    #[error("table missing: {0}")]
    TableMissing(String),
    #[error("table read failed: {0} error: {1}")]
    TableReadFailed(String, IoError),
    #[error("table duplicate: {0}")]
    TableDuplicate(String),
}

/// Configuration for a [`Directory`] source.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding the exported table files.
    pub root: PathBuf,

    /// Extension of each table file, without the leading dot.
    pub extension: String,
}

impl Config {
    /// Returns a configuration reading `<root>/<name>.bytes`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Resolves a table name to its encoded bytes.
pub trait Source {
    /// Returns a buffer holding the entire encoded table `name`.
    fn load(&self, name: &str) -> Result<ByteBuf, Error>;
}

/// A [`Source`] backed by a directory of table files.
#[derive(Clone, Debug)]
pub struct Directory {
    cfg: Config,
}

impl Directory {
    /// Creates a source over `cfg.root`. The directory is not touched until a table is loaded.
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Returns the path that holds table `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.cfg
            .root
            .join(format!("{name}.{}", self.cfg.extension))
    }
}

/// Returns true if `name` names a file directly under the root.
fn valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl Source for Directory {
    fn load(&self, name: &str) -> Result<ByteBuf, Error> {
        if !valid_name(name) {
            return Err(Error::TableNameInvalid(name.to_string()));
        }
        let path = self.path(name);
        let data = std::fs::read(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::TableMissing(name.to_string()),
            _ => Error::TableReadFailed(name.to_string(), err),
        })?;
        debug!(name, path = %path.display(), size = data.len(), "read table");
        Ok(ByteBuf::from(data))
    }
}

/// A set of loaded tables keyed by name.
#[derive(Debug, Default)]
pub struct Tables {
    tables: BTreeMap<String, ByteBuf>,
}

impl Tables {
    /// Loads every table in `names` from `source`.
    pub fn load<'a, S: Source + ?Sized>(
        source: &S,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, Error> {
        let mut tables = BTreeMap::new();
        for name in names {
            if tables.contains_key(name) {
                return Err(Error::TableDuplicate(name.to_string()));
            }
            let buf = source.load(name)?;
            info!(name, size = buf.size(), "loaded table");
            tables.insert(name.to_string(), buf);
        }
        Ok(Self { tables })
    }

    /// Returns the number of loaded tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no table was loaded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the buffer of table `name`.
    pub fn get(&self, name: &str) -> Option<&ByteBuf> {
        self.tables.get(name)
    }

    /// Returns the buffer of table `name` for decoding.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ByteBuf> {
        self.tables.get_mut(name)
    }

    /// Removes table `name`, handing its buffer to the caller.
    pub fn take(&mut self, name: &str) -> Option<ByteBuf> {
        self.tables.remove(name)
    }

    /// Iterates over the loaded tables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ByteBuf)> {
        self.tables.iter().map(|(name, buf)| (name.as_str(), buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, collections::HashMap, path::Path};

    /// In-memory source that records every request.
    #[derive(Default)]
    struct Memory {
        tables: HashMap<String, Vec<u8>>,
        requests: RefCell<Vec<String>>,
    }

    impl Source for Memory {
        fn load(&self, name: &str) -> Result<ByteBuf, Error> {
            self.requests.borrow_mut().push(name.to_string());
            self.tables
                .get(name)
                .map(|data| ByteBuf::from(data.as_slice()))
                .ok_or_else(|| Error::TableMissing(name.to_string()))
        }
    }

    #[test]
    fn test_tables_load() {
        let mut source = Memory::default();
        source.tables.insert("item".into(), vec![1, 2, 3]);
        source.tables.insert("skill".into(), vec![]);

        let tables = Tables::load(&source, ["skill", "item"]).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables.get("item").unwrap().as_slice(), &[1, 2, 3]);
        assert!(tables.get("skill").unwrap().is_empty());
        let names: Vec<_> = tables.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["item", "skill"]);
    }

    #[test]
    fn test_tables_stop_at_first_failure() {
        let mut source = Memory::default();
        source.tables.insert("item".into(), vec![1]);

        let err = Tables::load(&source, ["missing", "item"]).unwrap_err();
        assert!(matches!(err, Error::TableMissing(name) if name == "missing"));
        assert_eq!(*source.requests.borrow(), ["missing"]);
    }

    #[test]
    fn test_tables_duplicate() {
        let mut source = Memory::default();
        source.tables.insert("item".into(), vec![1]);
        let err = Tables::load(&source, ["item", "item"]).unwrap_err();
        assert!(matches!(err, Error::TableDuplicate(name) if name == "item"));
    }

    #[test]
    fn test_tables_take() {
        let mut source = Memory::default();
        source.tables.insert("item".into(), vec![7]);
        let mut tables = Tables::load(&source, ["item"]).unwrap();
        let buf = tables.take("item").unwrap();
        assert_eq!(buf.as_slice(), &[7]);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_valid_name() {
        assert!(valid_name("item"));
        assert!(valid_name("tb.item"));
        assert!(!valid_name(""));
        assert!(!valid_name("../item"));
        assert!(!valid_name("a/b"));
        assert!(!valid_name("/item"));
        assert!(!valid_name(".."));
        assert!(!valid_name("item/"));
        assert!(!valid_name("a\\b"));
    }

    #[test]
    fn test_directory_path() {
        let source = Directory::new(Config {
            root: PathBuf::from("data"),
            extension: "bin".into(),
        });
        assert_eq!(source.path("item"), Path::new("data").join("item.bin"));
    }
}
