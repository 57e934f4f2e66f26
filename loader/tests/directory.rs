//! Loading tables from a directory on disk.

use luban_buffer::{ReadBuf, WriteBuf};
use luban_loader::{Config, Directory, Error, Source, Tables};
use rand::{thread_rng, Rng};
use std::{fs, path::PathBuf};

/// A scratch directory removed on drop.
struct Scratch(PathBuf);

impl Scratch {
    fn new() -> Self {
        let suffix: u64 = thread_rng().gen();
        let path = std::env::temp_dir().join(format!("luban-loader-{suffix:016x}"));
        fs::create_dir_all(&path).unwrap();
        Self(path)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_load_exported_table() {
    let scratch = Scratch::new();

    // Two rows of (id, name)
    let mut table = luban_buffer::ByteBuf::new();
    table.write_size(2);
    for (id, name) in [(1001, "sword"), (1002, "shield")] {
        table.write_int(id);
        table.write_string(name);
    }
    fs::write(scratch.0.join("item.bytes"), table.as_slice()).unwrap();

    let source = Directory::new(Config::new(&scratch.0));
    let mut buf = source.load("item").unwrap();
    assert_eq!(buf.size(), table.size());
    assert_eq!(buf.read_size().unwrap(), 2);
    assert_eq!(buf.read_int().unwrap(), 1001);
    assert_eq!(buf.read_string().unwrap(), "sword");
    assert_eq!(buf.read_int().unwrap(), 1002);
    assert_eq!(buf.read_string().unwrap(), "shield");
    assert!(buf.is_empty());
}

#[test]
fn test_custom_extension() {
    let scratch = Scratch::new();
    fs::write(scratch.0.join("skill.bin"), [0x05]).unwrap();
    fs::write(scratch.0.join("skill.bytes"), [0x06]).unwrap();

    let source = Directory::new(Config {
        root: scratch.0.clone(),
        extension: "bin".into(),
    });
    assert_eq!(source.load("skill").unwrap().as_slice(), &[0x05]);
}

#[test]
fn test_missing_table() {
    let scratch = Scratch::new();
    let source = Directory::new(Config::new(&scratch.0));
    assert!(matches!(source.load("item"), Err(Error::TableMissing(name)) if name == "item"));
}

#[test]
fn test_name_cannot_escape_root() {
    let scratch = Scratch::new();
    let source = Directory::new(Config::new(scratch.0.join("inner")));
    fs::write(scratch.0.join("item.bytes"), [1]).unwrap();
    assert!(matches!(source.load("../item"), Err(Error::TableNameInvalid(_))));
}

#[test]
fn test_tables_from_directory() {
    let scratch = Scratch::new();
    fs::write(scratch.0.join("item.bytes"), [1, 2]).unwrap();
    fs::write(scratch.0.join("monster.bytes"), [3]).unwrap();

    let source = Directory::new(Config::new(&scratch.0));
    let tables = Tables::load(&source, ["item", "monster"]).unwrap();
    assert_eq!(tables.get("item").unwrap().as_slice(), &[1, 2]);
    assert_eq!(tables.get("monster").unwrap().as_slice(), &[3]);

    let err = Tables::load(&source, ["item", "quest"]).unwrap_err();
    assert!(matches!(err, Error::TableMissing(name) if name == "quest"));
}
