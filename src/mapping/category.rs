//! Asset category definitions.
//!
//! Every Amplitude asset belongs to exactly one category, which fixes the
//! schema used to compile it, where its sources live in the project tree and
//! which extension the compiled binary gets.

use std::fmt;

use serde::Serialize;

/// The kind of Amplitude asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    AudioConfig,
    Buses,
    Soundbanks,
    Collections,
    Sounds,
    Events,
    Attenuators,
    Switches,
    SwitchContainers,
    Rtpc,
    Effects,
    Environments,
}

/// Where the sources of a category are found inside the project directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    /// A single file directly in the project directory.
    File(&'static str),
    /// Every `.json` file below a directory, recursively.
    Directory(&'static str),
}

impl AssetCategory {
    /// All categories, in the order conversion units are built.
    pub const ALL: [AssetCategory; 12] = [
        AssetCategory::AudioConfig,
        AssetCategory::Buses,
        AssetCategory::Soundbanks,
        AssetCategory::Collections,
        AssetCategory::Sounds,
        AssetCategory::Events,
        AssetCategory::Attenuators,
        AssetCategory::Switches,
        AssetCategory::SwitchContainers,
        AssetCategory::Rtpc,
        AssetCategory::Effects,
        AssetCategory::Environments,
    ];

    /// Get the extension (with leading dot) of compiled binaries.
    pub fn extension(&self) -> &'static str {
        match self {
            AssetCategory::AudioConfig => ".amconfig",
            AssetCategory::Buses => ".ambus",
            AssetCategory::Soundbanks => ".ambank",
            AssetCategory::Collections => ".amcollection",
            AssetCategory::Sounds => ".amsound",
            AssetCategory::Events => ".amevent",
            AssetCategory::Attenuators => ".amattenuation",
            AssetCategory::Switches => ".amswitch",
            AssetCategory::SwitchContainers => ".amswitchcontainer",
            AssetCategory::Rtpc => ".amrtpc",
            AssetCategory::Effects => ".ameffect",
            AssetCategory::Environments => ".amenv",
        }
    }

    /// Get the schema file that governs this category.
    pub fn schema_file(&self) -> &'static str {
        match self {
            AssetCategory::AudioConfig => "engine_config_definition.fbs",
            AssetCategory::Buses => "buses_definition.fbs",
            AssetCategory::Soundbanks => "sound_bank_definition.fbs",
            AssetCategory::Collections => "collection_definition.fbs",
            AssetCategory::Sounds => "sound_definition.fbs",
            AssetCategory::Events => "event_definition.fbs",
            AssetCategory::Attenuators => "attenuation_definition.fbs",
            AssetCategory::Switches => "switch_definition.fbs",
            AssetCategory::SwitchContainers => "switch_container_definition.fbs",
            AssetCategory::Rtpc => "rtpc_definition.fbs",
            AssetCategory::Effects => "effect_definition.fbs",
            AssetCategory::Environments => "environment_definition.fbs",
        }
    }

    /// Get the source layout of this category.
    pub fn layout(&self) -> SourceLayout {
        match self {
            AssetCategory::AudioConfig => SourceLayout::File("audio_config.json"),
            AssetCategory::Buses => SourceLayout::File("buses.json"),
            AssetCategory::Soundbanks => SourceLayout::Directory("soundbanks"),
            AssetCategory::Collections => SourceLayout::Directory("collections"),
            AssetCategory::Sounds => SourceLayout::Directory("sounds"),
            AssetCategory::Events => SourceLayout::Directory("events"),
            AssetCategory::Attenuators => SourceLayout::Directory("attenuators"),
            AssetCategory::Switches => SourceLayout::Directory("switches"),
            AssetCategory::SwitchContainers => SourceLayout::Directory("switch_containers"),
            AssetCategory::Rtpc => SourceLayout::Directory("rtpc"),
            AssetCategory::Effects => SourceLayout::Directory("effects"),
            AssetCategory::Environments => SourceLayout::Directory("environments"),
        }
    }

    /// Get the short name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            AssetCategory::AudioConfig => "audio-config",
            AssetCategory::Buses => "buses",
            AssetCategory::Soundbanks => "soundbanks",
            AssetCategory::Collections => "collections",
            AssetCategory::Sounds => "sounds",
            AssetCategory::Events => "events",
            AssetCategory::Attenuators => "attenuators",
            AssetCategory::Switches => "switches",
            AssetCategory::SwitchContainers => "switch-containers",
            AssetCategory::Rtpc => "rtpc",
            AssetCategory::Effects => "effects",
            AssetCategory::Environments => "environments",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
