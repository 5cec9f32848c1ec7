//! Source-to-target path mapping.
//!
//! Classification walks an ordered rule table and stops at the first match.
//! Markers are plain substring tests over the whole path, so a path can carry
//! several of them (the project directory itself lives under `sounds/`).
//! Earlier rules win; the order below is part of the on-disk contract.

use std::path::{Path, PathBuf};

use super::category::AssetCategory;

/// Extension used when no rule matches.
pub const DEFAULT_EXTENSION: &str = ".ambin";

/// Path segment naming the source tree.
pub const SOURCE_ROOT_SEGMENT: &str = "amplitude_project";

/// Path segment naming the build output tree.
pub const OUTPUT_ROOT_SEGMENT: &str = "amplitude_assets";

const SOURCE_EXTENSION: &str = ".json";

/// How a rule recognizes its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matcher {
    /// The file name is exactly this.
    FileName(&'static str),
    /// The path contains this text anywhere.
    Marker(&'static str),
}

impl Matcher {
    fn matches(&self, path: &Path) -> bool {
        match self {
            Matcher::FileName(name) => path.file_name().is_some_and(|f| f == *name),
            Matcher::Marker(marker) => path.to_string_lossy().contains(marker),
        }
    }
}

/// Classification rules, evaluated in order.
const RULES: [(Matcher, AssetCategory); 12] = [
    (Matcher::FileName("audio_config.json"), AssetCategory::AudioConfig),
    (Matcher::FileName("buses.json"), AssetCategory::Buses),
    (Matcher::Marker("soundbanks"), AssetCategory::Soundbanks),
    (Matcher::Marker("collections"), AssetCategory::Collections),
    (Matcher::Marker("events"), AssetCategory::Events),
    (Matcher::Marker("attenuators"), AssetCategory::Attenuators),
    (Matcher::Marker("switches"), AssetCategory::Switches),
    (Matcher::Marker("switch_containers"), AssetCategory::SwitchContainers),
    (Matcher::Marker("rtpc"), AssetCategory::Rtpc),
    (Matcher::Marker("effects"), AssetCategory::Effects),
    (Matcher::Marker("sounds"), AssetCategory::Sounds),
    (Matcher::Marker("environments"), AssetCategory::Environments),
];

/// Classify a source path by the first matching rule.
pub fn classify(source: &Path) -> Option<AssetCategory> {
    RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(source))
        .map(|(_, category)| *category)
}

/// Get the extension the compiled binary of `source` receives.
pub fn output_extension(source: &Path) -> &'static str {
    classify(source)
        .map(|c| c.extension())
        .unwrap_or(DEFAULT_EXTENSION)
}

/// Map a raw JSON asset path to the path of its compiled binary.
///
/// The trailing `.json` is replaced by the category extension and every
/// `amplitude_project` segment is rewritten to `amplitude_assets`.
pub fn map_output_path(source: &Path) -> PathBuf {
    let path = source.to_string_lossy();
    let extension = output_extension(source);

    let stem = path.strip_suffix(SOURCE_EXTENSION).unwrap_or(&path);
    let mapped = format!("{}{}", stem, extension);

    PathBuf::from(mapped.replace(SOURCE_ROOT_SEGMENT, OUTPUT_ROOT_SEGMENT))
}

/// Get the file name of the compiled binary of `source`.
pub fn output_file_name(source: &Path) -> Option<String> {
    map_output_path(source)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
