use std::fs;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use walkdir::WalkDir;

/// Download directory relative to the user's home directory.
pub const DEFAULT_DOWNLOAD_DIR: &str = "Documents/Magazines/MagPi";

/// `~/Documents/Magazines/MagPi`.
pub fn default_download_dir() -> anyhow::Result<PathBuf> {
    let home = home::home_dir().context("Could not get user home dir")?;
    Ok(home.join(DEFAULT_DOWNLOAD_DIR))
}

pub fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).with_context(|| {
            format!("Could not create download directory {}", dir.display())
        })?;
    }
    Ok(())
}

/// Searches the whole tree under `dir` for a file called `file_name`.
///
/// Returns the first match in file-name order, wherever it lives below `dir`.
/// Anything that is not a directory counts, symlinks included.
pub fn find_downloaded(dir: &Path, file_name: &str) -> anyhow::Result<Option<PathBuf>> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Could not scan {}", dir.display()))?;
        if !entry.file_type().is_dir() && entry.file_name() == file_name {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

/// Copies `reader` into `dir/file_name`, replacing any file at that path.
pub fn write_file<R: Read>(dir: &Path, file_name: &str, mut reader: R) -> anyhow::Result<PathBuf> {
    let path = dir.join(file_name);
    let mut file =
        fs::File::create(&path).with_context(|| format!("Could not create {}", path.display()))?;
    io::copy(&mut reader, &mut file)
        .with_context(|| format!("Could not write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn default_dir_is_under_home() {
        let dir = default_download_dir().unwrap();
        assert!(dir.ends_with("Documents/Magazines/MagPi"));
    }

    #[test]
    fn ensure_dir_creates_parents() {
        let root = tempdir().unwrap();
        let dir = root.path().join("a").join("b");
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_dir(&dir).unwrap();
    }

    #[test]
    fn find_in_nested_directory() {
        let root = tempdir().unwrap();
        let nested = root.path().join("2024");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("issue142.pdf"), b"%PDF").unwrap();

        let found = find_downloaded(root.path(), "issue142.pdf").unwrap();
        assert_eq!(found, Some(nested.join("issue142.pdf")));
    }

    #[test]
    fn find_is_exact_and_ignores_directories() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("issue142.pdf")).unwrap();
        fs::write(root.path().join("Issue142.pdf"), b"%PDF").unwrap();
        fs::write(root.path().join("issue142.pdf.bak"), b"%PDF").unwrap();

        assert_eq!(find_downloaded(root.path(), "issue142.pdf").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn find_symlinked_copy() {
        let root = tempdir().unwrap();
        let archive = tempdir().unwrap();
        fs::write(archive.path().join("issue142.pdf"), b"%PDF").unwrap();
        let links = root.path().join("links");
        fs::create_dir(&links).unwrap();
        std::os::unix::fs::symlink(
            archive.path().join("issue142.pdf"),
            links.join("issue142.pdf"),
        )
        .unwrap();

        let found = find_downloaded(root.path(), "issue142.pdf").unwrap();
        assert_eq!(found, Some(links.join("issue142.pdf")));
    }

    #[test]
    fn find_in_missing_dir_fails() {
        let root = tempdir().unwrap();
        assert!(find_downloaded(&root.path().join("missing"), "x.pdf").is_err());
    }

    #[test]
    fn write_replaces_existing_file() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("x.pdf"), b"old contents").unwrap();

        let path = write_file(root.path(), "x.pdf", &b"new"[..]).unwrap();
        assert_eq!(path, root.path().join("x.pdf"));
        assert_eq!(fs::read(path).unwrap(), b"new");
    }
}
