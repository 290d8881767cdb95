// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

/// Create `dir` (and parents) if missing; error out if the path exists but
/// is something other than a directory.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Write `contents` to `path` via a temp file in the same directory, then
/// rename into place. A crash mid-write leaves only the dot-prefixed temp,
/// which snapshot listing ignores; readers never see a partial file.
///
/// The parent directory must already exist — creating it is the caller's job.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let tmp = temp_path(path)?;
    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "bad file name"))?;
    let tmp_name = format!(".{name}.tmp");
    Ok(match parent {
        Some(p) => p.join(tmp_name),
        None => PathBuf::from(tmp_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_atomic_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.csv");

        write_atomic(&path, "one\n").unwrap();
        write_atomic(&path, "two\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "two\n");
        // no temp leftovers
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_atomic_fails_without_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("snap.csv");
        assert!(write_atomic(&path, "x").is_err());
    }
}
