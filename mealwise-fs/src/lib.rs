//! Capability-based file access for menu and session documents.
//!
//! Every helper resolves an ambient directory once and performs the actual
//! read or write through a `cap-std` handle, so callers only ever pass UTF-8
//! paths around.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole UTF-8 document into memory.
///
/// # Errors
/// Returns the underlying I/O error, or [`io::ErrorKind::InvalidData`] when
/// the contents are not UTF-8.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Report whether `path` names an existing regular file.
///
/// A missing file or parent directory yields `Ok(false)`.
///
/// # Errors
/// Returns other I/O errors, such as permission failures.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_parent_dir(path) {
        Ok(pair) => pair,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Returns the underlying I/O error when a directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Replace the contents of `path` with `contents`.
///
/// The data is first written to a sibling `.tmp` file and then renamed over
/// the target, so readers never observe a half-written document. Missing
/// parent directories are created. A failed rename removes the staging file.
///
/// # Errors
/// Returns the underlying I/O error when writing or renaming fails.
pub fn write_atomically(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    let staging = format!(".{name}.tmp");
    dir.write(staging.as_str(), contents)?;
    if let Err(err) = dir.rename(staging.as_str(), &dir, name.as_str()) {
        // The rename error is the one reported; cleanup failure is ignored.
        drop(dir.remove_file(staging.as_str()));
        return Err(err);
    }
    Ok(())
}

/// Open the directory containing `path` and return it with the file name.
///
/// # Errors
/// Returns an error when `path` has no file name or the directory cannot be
/// opened.
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `dir` into an ambient anchor (root, drive or current directory) and
/// the path below it.
fn split_anchor(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut anchor = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in dir.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => anchor.push(component),
            other => relative.push(other),
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    let base = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((base, relative))
}
