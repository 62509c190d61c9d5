//! Collision-free destination names
//!
//! Given a directory and a desired file name, finds a name that does not
//! exist yet by appending `_01`, `_02`, ... to the stem. The search is bounded:
//! once suffix [`MAX_SUFFIX`] is reached the last candidate is returned even if
//! it collides, flagged as unresolved.

use std::path::{Path, PathBuf};

/// Highest collision suffix tried before giving up
pub const MAX_SUFFIX: u32 = 99;

/// Outcome of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Path to use
    pub path: PathBuf,

    /// False when every suffix up to the ceiling was taken and `path` collides
    pub resolved: bool,
}

/// Produces unique destination paths
///
/// The result reflects the filesystem at call time only; callers racing with
/// other writers must re-check.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl PathResolver {
    /// Creates a resolver
    pub fn new() -> Self {
        Self
    }

    /// Resolve `target_dir/desired_name` to a free path
    pub fn resolve(&self, target_dir: &Path, desired_name: &str) -> Resolution {
        let mut candidate = target_dir.join(desired_name);
        if !candidate.exists() {
            return Resolution {
                path: candidate,
                resolved: true,
            };
        }

        let (stem, extension) = split_name(desired_name);
        for suffix in 1..=MAX_SUFFIX {
            candidate = target_dir.join(suffixed_name(stem, extension, suffix));
            if !candidate.exists() {
                return Resolution {
                    path: candidate,
                    resolved: true,
                };
            }
        }

        tracing::warn!(
            target_dir = %target_dir.display(),
            desired_name = %desired_name,
            max_suffix = MAX_SUFFIX,
            "Collision suffixes exhausted, reusing last candidate"
        );
        Resolution {
            path: candidate,
            resolved: false,
        }
    }
}

/// Splits `name.ext` on the last dot; dotfiles keep their leading dot in the stem
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

fn suffixed_name(stem: &str, extension: Option<&str>, suffix: u32) -> String {
    match extension {
        Some(ext) => format!("{stem}_{suffix:02}.{ext}"),
        None => format!("{stem}_{suffix:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test]
    fn test_free_name_returned_unchanged() {
        let dir = TempDir::new().unwrap();
        let resolution = PathResolver::new().resolve(dir.path(), "IMG_1.jpg");
        assert!(resolution.resolved);
        assert_eq!(resolution.path, dir.path().join("IMG_1.jpg"));
    }

    #[test]
    fn test_first_collision_gets_01() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("IMG_1.jpg"), b"x").unwrap();

        let resolution = PathResolver::new().resolve(dir.path(), "IMG_1.jpg");
        assert!(resolution.resolved);
        assert_eq!(resolution.path, dir.path().join("IMG_1_01.jpg"));
    }

    #[test]
    fn test_skips_taken_suffixes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.tif"), b"x").unwrap();
        fs::write(dir.path().join("a_01.tif"), b"x").unwrap();
        fs::write(dir.path().join("a_02.tif"), b"x").unwrap();

        let resolution = PathResolver::new().resolve(dir.path(), "a.tif");
        assert_eq!(resolution.path, dir.path().join("a_03.tif"));
    }

    #[test]
    fn test_exhausted_returns_last_candidate_unresolved() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        for n in 1..=MAX_SUFFIX {
            fs::write(dir.path().join(format!("a_{n:02}.jpg")), b"x").unwrap();
        }

        let resolution = PathResolver::new().resolve(dir.path(), "a.jpg");
        assert!(!resolution.resolved);
        assert_eq!(resolution.path, dir.path().join("a_99.jpg"));
    }

    #[test]
    fn test_last_suffix_still_resolves_when_free() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        for n in 1..MAX_SUFFIX {
            fs::write(dir.path().join(format!("a_{n:02}.jpg")), b"x").unwrap();
        }

        let resolution = PathResolver::new().resolve(dir.path(), "a.jpg");
        assert!(resolution.resolved);
        assert_eq!(resolution.path, dir.path().join("a_99.jpg"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        let resolver = PathResolver::new();
        assert_eq!(
            resolver.resolve(dir.path(), "a.jpg"),
            resolver.resolve(dir.path(), "a.jpg")
        );
    }

    #[test_case("IMG.jpg", ("IMG", Some("jpg")))]
    #[test_case("archive.tar.gz", ("archive.tar", Some("gz")))]
    #[test_case("README", ("README", None))]
    #[test_case(".hidden", (".hidden", None))]
    fn test_split_name(name: &str, expected: (&str, Option<&str>)) {
        assert_eq!(split_name(name), expected);
    }

    #[test]
    fn test_suffix_without_extension() {
        assert_eq!(suffixed_name("README", None, 7), "README_07");
    }
}
