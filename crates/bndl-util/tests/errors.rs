use bndl_util::errors::BndlError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = BndlError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = BndlError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_resolution_error_display() {
    let err = BndlError::Resolution {
        message: "no provider for com.acme.api".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Resolution failed: no provider for com.acme.api"
    );
}

#[test]
fn test_repository_error_display() {
    let err = BndlError::Repository {
        message: "index unreadable".to_string(),
    };
    assert_eq!(err.to_string(), "Repository error: index unreadable");
}

#[test]
fn test_sync_error_display() {
    let err = BndlError::Sync {
        message: "checksum mismatch".to_string(),
    };
    assert_eq!(err.to_string(), "Synchronization failed: checksum mismatch");
}

#[test]
fn test_generic_error_display() {
    let err = BndlError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: BndlError = io_err.into();
    assert!(matches!(err, BndlError::Io(_)));
}
