use bndl_core::bundle::{Bundle, BundleArchive, BundleInfo};
use bndl_core::version::Version;
use bndl_util::hash::sha256_bytes;
use tempfile::TempDir;

fn archived(tmp: &TempDir, sha256: Option<String>) -> Bundle {
    let source = tmp.path().join("remote").join("api-2.0.0.jar");
    std::fs::create_dir_all(source.parent().unwrap()).unwrap();
    std::fs::write(&source, b"api classes").unwrap();
    Bundle::new(BundleInfo::new("com.acme.api", Version::new(2, 0, 0))).with_archive(
        BundleArchive {
            source,
            cached: tmp.path().join("cache").join("com.acme.api-2.0.0.jar"),
            sha256,
        },
    )
}

#[test]
fn test_synchronize_copies_archive() {
    let tmp = TempDir::new().unwrap();
    let bundle = archived(&tmp, None);
    assert!(!bundle.is_synchronized());

    bundle.synchronize().unwrap();

    assert!(bundle.is_synchronized());
    let cached = &bundle.archive().unwrap().cached;
    assert_eq!(std::fs::read(cached).unwrap(), b"api classes");
}

#[test]
fn test_synchronize_verifies_checksum() {
    let tmp = TempDir::new().unwrap();
    let bundle = archived(&tmp, Some(sha256_bytes(b"api classes")));
    bundle.synchronize().unwrap();
    assert!(bundle.is_synchronized());
}

#[test]
fn test_checksum_mismatch_removes_cached_copy() {
    let tmp = TempDir::new().unwrap();
    let bundle = archived(&tmp, Some(sha256_bytes(b"something else")));

    let err = bundle.synchronize().unwrap_err();

    assert!(err.to_string().contains("checksum mismatch"), "got: {err}");
    assert!(!bundle.is_synchronized());
}

#[test]
fn test_missing_source_fails() {
    let tmp = TempDir::new().unwrap();
    let bundle = Bundle::new(BundleInfo::new("gone", Version::new(1, 0, 0))).with_archive(
        BundleArchive {
            source: tmp.path().join("missing.jar"),
            cached: tmp.path().join("cache").join("gone-1.0.0.jar"),
            sha256: None,
        },
    );
    let err = bundle.synchronize().unwrap_err();
    assert!(err.to_string().contains("cannot copy"), "got: {err}");
}
