//! File watching for `ambuild build --watch`.
//!
//! Watches the Amplitude project and schema directories and wakes the build
//! loop when a JSON definition or schema changes. Rapid saves are batched.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::discovery::is_json;
use crate::error::{AmError, Result};

/// Quiet period that ends a batch of changes.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(200);

/// Check if a changed path can affect a build.
pub fn is_relevant(path: &Path) -> bool {
    is_json(path)
        || path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("fbs"))
}

/// Recursive watcher over a set of directories.
pub struct ChangeWatcher {
    rx: mpsc::Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl ChangeWatcher {
    /// Watch every existing directory in `dirs`. Missing directories are skipped.
    pub fn new(dirs: &[PathBuf]) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(tx).map_err(|e| AmError::Config {
            message: format!("Failed to create file watcher: {}", e),
            help: None,
        })?;

        for dir in dirs.iter().filter(|d| d.is_dir()) {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .map_err(|e| AmError::Io {
                    path: dir.clone(),
                    message: format!("Failed to watch directory: {}", e),
                })?;
        }

        Ok(Self {
            rx,
            _watcher: watcher,
        })
    }

    /// Block until relevant files change and return them, sorted.
    pub fn wait_for_change(&self) -> Result<Vec<PathBuf>> {
        let mut changed = BTreeSet::new();

        while changed.is_empty() {
            let event = self.rx.recv().map_err(|_| AmError::Config {
                message: "File watcher stopped unexpectedly".to_string(),
                help: None,
            })?;
            collect(event, &mut changed)?;
        }

        while let Ok(event) = self.rx.recv_timeout(DEBOUNCE_DURATION) {
            collect(event, &mut changed)?;
        }

        Ok(changed.into_iter().collect())
    }
}

fn collect(event: notify::Result<Event>, changed: &mut BTreeSet<PathBuf>) -> Result<()> {
    let event = event.map_err(|e| AmError::Config {
        message: format!("File watcher error: {}", e),
        help: None,
    })?;

    if event.kind.is_access() {
        return Ok(());
    }

    changed.extend(event.paths.into_iter().filter(|p| is_relevant(p)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind};

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("sounds/footstep.json")));
        assert!(is_relevant(Path::new("schemas/sound_definition.fbs")));
        assert!(!is_relevant(Path::new("sounds/footstep.amsound")));
        assert!(!is_relevant(Path::new("sounds/.footstep.json.swp")));
    }

    #[test]
    fn test_collect_filters_paths() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("a/play.json"))
            .add_path(PathBuf::from("a/notes.txt"));

        let mut changed = BTreeSet::new();
        collect(Ok(event), &mut changed).unwrap();

        assert_eq!(
            changed.into_iter().collect::<Vec<_>>(),
            vec![PathBuf::from("a/play.json")]
        );
    }

    #[test]
    fn test_collect_ignores_access() {
        let event = Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(PathBuf::from("a/play.json"));

        let mut changed = BTreeSet::new();
        collect(Ok(event), &mut changed).unwrap();
        assert!(changed.is_empty());
    }
}
