//! Build configuration.
//!
//! Everything the driver needs to know is gathered here once, before any
//! conversion starts. Settings come from CLI flags, then `ambuild.yaml`,
//! then the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::discovery::{resolve_compiler, Manifest};
use crate::error::Result;

/// Amplitude SDK root; schemas live in `<root>/sdk/schemas`.
pub const ENV_AMPLITUDE_ROOT: &str = "SS_AMPLITUDE_ROOT_PATH";

/// Game project root override.
pub const ENV_PROJECT_ROOT: &str = "PATH_O3DE_PROJECT";

/// Explicit compiler path.
pub const ENV_COMPILER: &str = "AMBUILD_FLATC";

/// What the driver does after a conversion fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop scheduling conversions after the first failure.
    #[default]
    FailFast,
    /// Convert every file that can be converted and report all failures.
    KeepGoing,
}

/// Configuration handed to the build driver.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Schema search paths, also passed to the compiler as include paths.
    pub schema_roots: Vec<PathBuf>,
    /// The compiler executable to run.
    pub compiler_path: PathBuf,
    pub policy: FailurePolicy,
    /// Maximum concurrent compiler processes (1 = sequential).
    pub jobs: usize,
    /// Per-invocation time limit.
    pub timeout: Option<Duration>,
    /// Rebuild every target regardless of modification times.
    pub force: bool,
}

impl BuildConfig {
    /// Create a sequential, fail-fast configuration.
    pub fn new(schema_roots: Vec<PathBuf>, compiler_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_roots,
            compiler_path: compiler_path.into(),
            policy: FailurePolicy::FailFast,
            jobs: 1,
            timeout: None,
            force: false,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Snapshot of the environment variables ambuild reads.
///
/// Kept separate from [`std::env`] so resolution can be tested without
/// touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub amplitude_root: Option<PathBuf>,
    pub project_root: Option<PathBuf>,
    pub compiler: Option<PathBuf>,
}

impl Environment {
    /// Read the process environment. Empty values count as unset.
    pub fn from_process() -> Self {
        let var = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        Self {
            amplitude_root: var(ENV_AMPLITUDE_ROOT),
            project_root: var(ENV_PROJECT_ROOT),
            compiler: var(ENV_COMPILER),
        }
    }

    /// Schema directory of the Amplitude SDK, if the SDK root is known.
    pub fn sdk_schemas(&self) -> Option<PathBuf> {
        self.amplitude_root
            .as_ref()
            .map(|root| root.join("sdk").join("schemas"))
    }

    /// Binary directory of the Amplitude SDK, if the SDK root is known.
    pub fn sdk_bin(&self) -> Option<PathBuf> {
        self.amplitude_root.as_ref().map(|root| root.join("bin"))
    }

    /// Pick the project root: explicit value, then environment, then `fallback`.
    pub fn project_root(&self, explicit: Option<&Path>, fallback: &Path) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.project_root.clone())
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

/// Command-line overrides applied on top of the manifest and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub schema_roots: Vec<PathBuf>,
    pub compiler: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub keep_going: bool,
    pub timeout_secs: Option<u64>,
    pub force: bool,
    pub require_compiler: bool,
}

/// Resolve the final configuration for a project.
pub fn resolve(
    root: &Path,
    manifest: &Manifest,
    env: &Environment,
    overrides: &Overrides,
) -> Result<BuildConfig> {
    let schema_roots = if !overrides.schema_roots.is_empty() {
        overrides.schema_roots.clone()
    } else if !manifest.schema_roots.is_empty() {
        manifest.schema_roots(root)
    } else {
        env.sdk_schemas().into_iter().collect()
    };

    let explicit = overrides
        .compiler
        .clone()
        .or_else(|| manifest.compiler.as_ref().map(|c| root.join(c)))
        .or_else(|| env.compiler.clone());

    let mut search_dirs = manifest.compiler_search_paths(root);
    search_dirs.extend(env.sdk_bin());

    let compiler_path = resolve_compiler(
        explicit.as_deref(),
        search_dirs.as_slice(),
        overrides.require_compiler,
    )?;

    let policy = if overrides.keep_going || manifest.keep_going {
        FailurePolicy::KeepGoing
    } else {
        FailurePolicy::FailFast
    };

    let jobs = overrides.jobs.or(manifest.jobs).unwrap_or(1);
    let timeout = overrides
        .timeout_secs
        .or(manifest.timeout_secs)
        .map(Duration::from_secs);

    Ok(BuildConfig::new(schema_roots, compiler_path)
        .with_policy(policy)
        .with_jobs(jobs)
        .with_timeout(timeout)
        .with_force(overrides.force))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::COMPILER_NAME;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_anything() {
        let config = resolve(
            Path::new("/game"),
            &Manifest::default(),
            &Environment::default(),
            &Overrides::default(),
        )
        .unwrap();

        assert!(config.schema_roots.is_empty());
        assert_eq!(config.compiler_path, PathBuf::from(COMPILER_NAME));
        assert_eq!(config.policy, FailurePolicy::FailFast);
        assert_eq!(config.jobs, 1);
        assert_eq!(config.timeout, None);
        assert!(!config.force);
    }

    #[test]
    fn test_environment_sdk_root() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join(COMPILER_NAME), "").unwrap();

        let env = Environment {
            amplitude_root: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let config = resolve(
            Path::new("/game"),
            &Manifest::default(),
            &env,
            &Overrides::default(),
        )
        .unwrap();

        assert_eq!(config.schema_roots, vec![dir.path().join("sdk/schemas")]);
        assert_eq!(config.compiler_path, bin.join(COMPILER_NAME));
    }

    #[test]
    fn test_manifest_beats_environment() {
        let manifest = Manifest {
            schema_roots: vec![PathBuf::from("schemas")],
            compiler: Some(PathBuf::from("tools/flatc")),
            jobs: Some(3),
            keep_going: true,
            timeout_secs: Some(20),
            ..Default::default()
        };
        let env = Environment {
            amplitude_root: Some(PathBuf::from("/sdk")),
            compiler: Some(PathBuf::from("/usr/bin/flatc")),
            ..Default::default()
        };

        let config = resolve(Path::new("/game"), &manifest, &env, &Overrides::default()).unwrap();

        assert_eq!(config.schema_roots, vec![PathBuf::from("/game/schemas")]);
        assert_eq!(config.compiler_path, PathBuf::from("/game/tools/flatc"));
        assert_eq!(config.policy, FailurePolicy::KeepGoing);
        assert_eq!(config.jobs, 3);
        assert_eq!(config.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_overrides_beat_manifest() {
        let manifest = Manifest {
            schema_roots: vec![PathBuf::from("schemas")],
            jobs: Some(3),
            ..Default::default()
        };
        let overrides = Overrides {
            schema_roots: vec![PathBuf::from("/cli/schemas")],
            compiler: Some(PathBuf::from("/cli/flatc")),
            jobs: Some(8),
            force: true,
            ..Default::default()
        };

        let config = resolve(
            Path::new("/game"),
            &manifest,
            &Environment::default(),
            &overrides,
        )
        .unwrap();

        assert_eq!(config.schema_roots, vec![PathBuf::from("/cli/schemas")]);
        assert_eq!(config.compiler_path, PathBuf::from("/cli/flatc"));
        assert_eq!(config.jobs, 8);
        assert!(config.force);
    }

    #[test]
    fn test_require_compiler_errors_when_missing() {
        let overrides = Overrides {
            require_compiler: true,
            ..Default::default()
        };
        let result = resolve(
            Path::new("/game"),
            &Manifest::default(),
            &Environment::default(),
            &overrides,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_project_root_precedence() {
        let env = Environment {
            project_root: Some(PathBuf::from("/from/env")),
            ..Default::default()
        };
        let cwd = Path::new("/cwd");

        assert_eq!(
            env.project_root(Some(Path::new("/explicit")), cwd),
            PathBuf::from("/explicit")
        );
        assert_eq!(env.project_root(None, cwd), PathBuf::from("/from/env"));
        assert_eq!(
            Environment::default().project_root(None, cwd),
            PathBuf::from("/cwd")
        );
    }

    #[test]
    fn test_jobs_never_zero() {
        let config = BuildConfig::new(vec![], "flatc").with_jobs(0);
        assert_eq!(config.jobs, 1);
    }
}
