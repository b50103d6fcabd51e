use bndl_util::fs::{copy_file, ensure_dir, find_ancestor_with};
use tempfile::TempDir;

#[test]
fn test_find_ancestor_with_direct() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Bndl.toml"), "").unwrap();
    let result = find_ancestor_with(tmp.path(), "Bndl.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_nested() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Bndl.toml"), "").unwrap();
    let nested = tmp.path().join("a").join("b").join("c");
    std::fs::create_dir_all(&nested).unwrap();
    let result = find_ancestor_with(&nested, "Bndl.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_not_found() {
    let tmp = TempDir::new().unwrap();
    let result = find_ancestor_with(tmp.path(), "NonExistent.file");
    assert_eq!(result, None);
}

#[test]
fn test_ensure_dir_creates_nested() {
    let tmp = TempDir::new().unwrap();
    let deep = tmp.path().join("x").join("y").join("z");
    assert!(!deep.exists());
    ensure_dir(&deep).unwrap();
    assert!(deep.is_dir());
}

#[test]
fn test_copy_file_creates_parents() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("api-2.0.0.jar");
    std::fs::write(&src, b"bundle bytes").unwrap();
    let dest = tmp.path().join("cache").join("com.acme.api").join("2.0.0.jar");

    let written = copy_file(&src, &dest).unwrap();

    assert_eq!(written, 12);
    assert_eq!(std::fs::read(&dest).unwrap(), b"bundle bytes");
    assert!(!dest.with_extension("jar.part").exists());
}

#[test]
fn test_copy_file_missing_source() {
    let tmp = TempDir::new().unwrap();
    let result = copy_file(&tmp.path().join("missing.jar"), &tmp.path().join("out.jar"));
    assert!(result.is_err());
    assert!(!tmp.path().join("out.jar").exists());
}
