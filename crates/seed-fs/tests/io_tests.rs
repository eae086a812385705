use pretty_assertions::assert_eq;
use seed_fs::{Error, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.sql");

    io::write_atomic(&path, b"INSERT INTO t (id) VALUES\n(1);").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "INSERT INTO t (id) VALUES\n(1);");
}

#[test]
fn test_write_atomic_requires_parent_dir() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/data.sql");

    let err = io::write_atomic(&path, b"x").unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(!temp.path().join("nested").exists());
}

#[test]
fn test_write_atomic_failed_rename_removes_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.sql");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), "x").unwrap();

    let err = io::write_atomic(&path, b"content").unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["data.sql".to_string()]);
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.sql");

    io::write_atomic(&path, b"content").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["data.sql".to_string()]);
}

#[test]
fn test_read_document_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.sql");
    fs::write(&path, "-- seed\n").unwrap();

    assert_eq!(io::read_document(&path).unwrap(), "-- seed\n");
}

#[test]
fn test_read_document_missing_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = io::read_document(&temp.path().join("missing.sql")).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("missing.sql"));
}

#[test]
fn test_write_document_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data.sql");
    fs::write(&path, "original").unwrap();

    io::write_document(&path, "updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_document_refuses_missing_target() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.sql");

    let err = io::write_document(&path, "content").unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert!(!path.exists());
}
