use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    rc::Rc,
};

/// `Source` represents some literal source code: whether a file on disk, a
/// REPL line, or an in-memory snippet. It's a string paired with a path, the
/// path serving as the source's name for diagnostics. Sources without a real
/// path point at `./source`.
#[derive(Debug, PartialEq, Eq)]
pub struct Source {
    pub contents: String,
    pub path: PathBuf,
}

impl Source {
    /// Creates a new `Source` given both contents and a path. Does not
    /// re-validate that the path's contents match what's passed in — use
    /// `Source::path` to load straight from disk.
    pub fn new(source: &str, path: &Path) -> Rc<Source> {
        Rc::new(Source {
            contents: source.to_string(),
            path: path.to_owned(),
        })
    }

    /// Builds a `Source` by reading a file from disk.
    pub fn path(path: &Path) -> io::Result<Rc<Source>> {
        let mut source = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut source)?;
        Ok(Source::new(&source, path))
    }

    /// Builds a `Source` out of a bare string, pointing at `./source`.
    pub fn source(source: &str) -> Rc<Source> {
        Source::new(source, &PathBuf::from("./source"))
    }
}
