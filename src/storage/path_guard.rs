//! Request path validation
//!
//! Decides whether a caller-supplied relative name may be used to address
//! a file inside the storage root. Every read that uses client input goes
//! through here before it touches the filesystem.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Why a candidate name was refused. Reasons are for diagnostics only;
/// callers surface the same generic response regardless of the variant.
#[derive(Debug)]
pub enum PathRejection {
    Empty,
    ParentTraversal,
    SeparatorInName,
    HomeExpansion,
    AbsolutePath,
    EscapesRoot,
    Unresolvable(io::Error),
}

impl fmt::Display for PathRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRejection::Empty => write!(f, "empty path"),
            PathRejection::ParentTraversal => write!(f, "contains parent directory reference"),
            PathRejection::SeparatorInName => write!(f, "contains path separator"),
            PathRejection::HomeExpansion => write!(f, "starts with home directory reference"),
            PathRejection::AbsolutePath => write!(f, "is an absolute path"),
            PathRejection::EscapesRoot => write!(f, "resolves outside the storage root"),
            PathRejection::Unresolvable(e) => write!(f, "could not resolve path: {}", e),
        }
    }
}

/// Syntactic gate: reject any name that could address something other than
/// a direct child of the storage root. Disallowing separators outright
/// restricts retrieval to files placed directly inside the root, which is
/// the intended policy.
pub fn validate_name(candidate: &str) -> Result<(), PathRejection> {
    if candidate.is_empty() {
        return Err(PathRejection::Empty);
    }
    if candidate.contains("..") {
        return Err(PathRejection::ParentTraversal);
    }
    if candidate.contains('/') {
        return Err(PathRejection::SeparatorInName);
    }
    if candidate.contains('\\') {
        return Err(PathRejection::SeparatorInName);
    }
    if candidate.starts_with('~') {
        return Err(PathRejection::HomeExpansion);
    }
    if Path::new(candidate).is_absolute() {
        return Err(PathRejection::AbsolutePath);
    }
    Ok(())
}

/// Full gate: syntactic checks plus canonicalization. The canonical form of
/// `root/candidate` must stay prefixed by the canonical form of `root`;
/// syntactic rejection alone is not sufficient when symlinks are involved.
///
/// A candidate whose file does not exist yet is accepted lexically (the
/// syntactic gate guarantees a single path component, which cannot escape),
/// so that absence surfaces as a not-found downstream rather than a
/// validation failure. Every other resolution failure is a rejection.
pub fn resolve_under_root(root: &Path, candidate: &str) -> Result<PathBuf, PathRejection> {
    validate_name(candidate)?;

    let canonical_root = root.canonicalize().map_err(PathRejection::Unresolvable)?;
    let joined = canonical_root.join(candidate);

    match joined.canonicalize() {
        Ok(resolved) => {
            if resolved.starts_with(&canonical_root) {
                Ok(resolved)
            } else {
                Err(PathRejection::EscapesRoot)
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(joined),
        Err(e) => Err(PathRejection::Unresolvable(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rejects_empty_name() {
        assert!(matches!(validate_name(""), Err(PathRejection::Empty)));
    }

    #[test]
    fn test_rejects_parent_traversal() {
        assert!(matches!(
            validate_name("../secret.txt"),
            Err(PathRejection::ParentTraversal)
        ));
        assert!(matches!(
            validate_name("..\\secret.txt"),
            Err(PathRejection::ParentTraversal)
        ));
        // The two-character sequence is enough on its own
        assert!(matches!(
            validate_name("photo..png"),
            Err(PathRejection::ParentTraversal)
        ));
    }

    #[test]
    fn test_rejects_separators() {
        assert!(matches!(
            validate_name("subdir/photo.png"),
            Err(PathRejection::SeparatorInName)
        ));
        assert!(matches!(
            validate_name("subdir\\photo.png"),
            Err(PathRejection::SeparatorInName)
        ));
    }

    #[test]
    fn test_rejects_home_expansion() {
        assert!(matches!(
            validate_name("~root"),
            Err(PathRejection::HomeExpansion)
        ));
    }

    #[test]
    fn test_rejects_classic_traversal_payloads() {
        for payload in ["../../etc/passwd", "/etc/passwd", "..", "images/../../etc/passwd"] {
            assert!(validate_name(payload).is_err(), "accepted {:?}", payload);
        }
    }

    #[test]
    fn test_accepts_plain_file_names() {
        for name in ["cat.png", "photo-1.jpeg", "with space.gif", "no_extension"] {
            assert!(validate_name(name).is_ok(), "rejected {:?}", name);
        }
    }

    #[test]
    fn test_resolve_accepts_existing_child() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("cat.png"), b"data").unwrap();

        let resolved = resolve_under_root(root.path(), "cat.png").unwrap();
        assert!(resolved.starts_with(root.path().canonicalize().unwrap()));
        assert!(resolved.ends_with("cat.png"));
    }

    #[test]
    fn test_resolve_accepts_absent_child() {
        let root = TempDir::new().unwrap();
        let resolved = resolve_under_root(root.path(), "missing.png").unwrap();
        assert!(resolved.ends_with("missing.png"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = TempDir::new().unwrap();
        assert!(resolve_under_root(root.path(), "../cat.png").is_err());
    }

    #[test]
    fn test_resolve_rejects_missing_root() {
        let root = TempDir::new().unwrap();
        let gone = root.path().join("nonexistent");
        assert!(matches!(
            resolve_under_root(&gone, "cat.png"),
            Err(PathRejection::Unresolvable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlink_escape() {
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, b"secret").unwrap();

        let root = TempDir::new().unwrap();
        std::os::unix::fs::symlink(&secret, root.path().join("link.txt")).unwrap();

        assert!(matches!(
            resolve_under_root(root.path(), "link.txt"),
            Err(PathRejection::EscapesRoot)
        ));
    }
}
