//! Directory listing for extracted archives.
//!
//! An extracted archive is a flat directory: one file per preset plus the
//! `Sections.list` manifest.  Only the immediate regular files count.

use std::path::Path;

use walkdir::WalkDir;

use super::error::{PresetError, PresetResult};
use super::node::is_path_component;
use super::sections::SECTION_LIST;

/// List the preset names in `dir`, sorted, without the manifest.
///
/// A missing directory yields an empty list.
pub fn list_presets(dir: &Path) -> PresetResult<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1) // only immediate children
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            PresetError::Io {
                action: "listing",
                path,
                source: e.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == SECTION_LIST {
            continue;
        }
        names.push(name);
    }

    Ok(names)
}

/// Check a name chosen for a published preset.
pub fn validate_preset_name(name: &str) -> PresetResult<&str> {
    let trimmed = name.trim();
    if !is_path_component(trimmed) || trimmed == SECTION_LIST {
        return Err(PresetError::InvalidPresetName(name.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_files_sorted_without_manifest() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Wide"), b"a").unwrap();
        fs::write(temp.path().join("Default"), b"b").unwrap();
        fs::write(temp.path().join(SECTION_LIST), b"\"\"\n").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();

        let names = list_presets(temp.path()).unwrap();
        assert_eq!(names, vec!["Default".to_string(), "Wide".to_string()]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(list_presets(&temp.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn preset_names() {
        assert_eq!(validate_preset_name("  Soft Noise ").unwrap(), "Soft Noise");
        assert!(validate_preset_name("").is_err());
        assert!(validate_preset_name("   ").is_err());
        assert!(validate_preset_name("a/b").is_err());
        assert!(validate_preset_name(SECTION_LIST).is_err());
    }
}
