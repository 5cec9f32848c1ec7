//! Locating schemas and the compiler executable on disk.

use std::path::{Path, PathBuf};

use crate::error::{AmError, Result};

/// Name of the schema compiler executable.
#[cfg(windows)]
pub const COMPILER_NAME: &str = "flatc.exe";
#[cfg(not(windows))]
pub const COMPILER_NAME: &str = "flatc";

/// Return the first `dir/name` that exists as a file.
///
/// No check is made that the file is executable or of a compatible version.
pub fn locate_in_paths<P: AsRef<Path>>(name: &str, dirs: &[P]) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.as_ref().join(name))
        .find(|candidate| candidate.is_file())
}

/// Like [`locate_in_paths`], but falls back to the bare name so the process
/// search path gets a chance to resolve it.
pub fn find_in_paths<P: AsRef<Path>>(name: &str, dirs: &[P]) -> PathBuf {
    locate_in_paths(name, dirs).unwrap_or_else(|| PathBuf::from(name))
}

/// Decide which compiler executable to run.
///
/// An explicit path always wins. Otherwise the search directories are tried
/// in order. When nothing is found the bare executable name is returned,
/// unless `require` is set, in which case it is a configuration error.
pub fn resolve_compiler<P: AsRef<Path>>(
    explicit: Option<&Path>,
    search_dirs: &[P],
    require: bool,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if require && !path.is_file() {
            return Err(AmError::Config {
                message: format!("Compiler not found at {}", path.display()),
                help: Some("Check --flatc or the `compiler` entry in ambuild.yaml".to_string()),
            });
        }
        return Ok(path.to_path_buf());
    }

    match locate_in_paths(COMPILER_NAME, search_dirs) {
        Some(path) => Ok(path),
        None if require => Err(AmError::Config {
            message: format!(
                "{} not found in {} search path(s)",
                COMPILER_NAME,
                search_dirs.len()
            ),
            help: Some(
                "Pass --flatc, set AMBUILD_FLATC or add `compiler_search_paths` to ambuild.yaml"
                    .to_string(),
            ),
        }),
        None => Ok(PathBuf::from(COMPILER_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_locate_first_match_wins() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        fs::write(a.path().join("sound_definition.fbs"), "table Sound {}").unwrap();
        fs::write(b.path().join("sound_definition.fbs"), "table Sound {}").unwrap();

        let found = locate_in_paths("sound_definition.fbs", &[b.path(), a.path()]);
        assert_eq!(found, Some(b.path().join("sound_definition.fbs")));
    }

    #[test]
    fn test_locate_skips_directories() {
        let a = tempdir().unwrap();
        fs::create_dir(a.path().join("flatc")).unwrap();

        assert_eq!(locate_in_paths("flatc", &[a.path()]), None);
    }

    #[test]
    fn test_find_falls_back_to_bare_name() {
        let empty: [&Path; 0] = [];
        assert_eq!(
            find_in_paths("event_definition.fbs", &empty),
            PathBuf::from("event_definition.fbs")
        );
    }

    #[test]
    fn test_resolve_compiler_explicit() {
        let empty: [&Path; 0] = [];
        let path = resolve_compiler(Some(Path::new("/opt/flatc")), &empty, false).unwrap();
        assert_eq!(path, PathBuf::from("/opt/flatc"));
    }

    #[test]
    fn test_resolve_compiler_from_search_dirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(COMPILER_NAME), "").unwrap();

        let path = resolve_compiler(None, &[dir.path()], true).unwrap();
        assert_eq!(path, dir.path().join(COMPILER_NAME));
    }

    #[test]
    fn test_resolve_compiler_unresolved() {
        let dir = tempdir().unwrap();

        let path = resolve_compiler(None, &[dir.path()], false).unwrap();
        assert_eq!(path, PathBuf::from(COMPILER_NAME));

        let err = resolve_compiler(None, &[dir.path()], true).unwrap_err();
        assert!(matches!(err, AmError::Config { .. }));
    }

    #[test]
    fn test_resolve_compiler_required_explicit_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let empty: [&Path; 0] = [];

        assert!(resolve_compiler(Some(missing.as_path()), &empty, true).is_err());
    }
}
