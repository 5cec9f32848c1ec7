//! Asset categories and the source-to-binary path mapping.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use ambuild::mapping::map_output_path;
//!
//! let target = map_output_path(Path::new("game/amplitude_project/sounds/footstep.json"));
//! assert_eq!(target, Path::new("game/amplitude_assets/sounds/footstep.amsound"));
//! ```

mod category;
mod rules;

pub use category::{AssetCategory, SourceLayout};
pub use rules::{
    classify, map_output_path, output_extension, output_file_name, DEFAULT_EXTENSION,
    OUTPUT_ROOT_SEGMENT, SOURCE_ROOT_SEGMENT,
};
