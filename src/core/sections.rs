//! The `Sections.list` manifest stored inside every preset archive.
//!
//! ```text
//! ""
//! Default<TAB>Default
//! Wide<TAB>Wide
//! ```
//!
//! The first line is a quoted empty string; every following line names one
//! preset twice, separated by a tab.

use std::fs;
use std::path::Path;

use super::error::{PresetError, PresetResult};
use super::fs::list_presets;

pub const SECTION_LIST: &str = "Sections.list";

const HEADER: &str = "\"\"";

/// Render the manifest text for `names`, in the given order.
pub fn render<S: AsRef<str>>(names: &[S]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for name in names {
        let name = name.as_ref();
        out.push_str(name);
        out.push('\t');
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// Read the preset names back from manifest text.
///
/// The header line is optional and blank lines are skipped.  For each entry
/// the first tab-separated column is taken.
pub fn parse(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && *line != HEADER)
        .map(|line| line.split('\t').next().unwrap_or(line).to_string())
        .collect()
}

/// Read the manifest in `dir`, if there is one.
pub fn read(dir: &Path) -> PresetResult<Option<Vec<String>>> {
    let path = dir.join(SECTION_LIST);
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(PresetError::io("reading", &path))?;
    Ok(Some(parse(&text)))
}

/// Replace the manifest in `dir` with one listing the presets currently in
/// the directory.  Returns the names written.
pub fn regenerate(dir: &Path) -> PresetResult<Vec<String>> {
    let path = dir.join(SECTION_LIST);
    if path.exists() {
        fs::remove_file(&path).map_err(PresetError::io("removing", &path))?;
    }

    let names = list_presets(dir)?;
    fs::write(&path, render(&names)).map_err(PresetError::io("writing", &path))?;
    tracing::debug!(path = %path.display(), entries = names.len(), "section list written");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn render_matches_archive_format() {
        assert_eq!(render(&["Default", "Wide"]), "\"\"\nDefault\tDefault\nWide\tWide\n");
        assert_eq!(render::<&str>(&[]), "\"\"\n");
    }

    #[test]
    fn parse_tolerates_missing_header_and_blank_lines() {
        assert_eq!(parse("\"\"\nA\tA\n\nB\tB\n"), vec!["A", "B"]);
        assert_eq!(parse("A\tA\r\n"), vec!["A"]);
        assert!(parse("\"\"\n").is_empty());
    }

    #[test]
    fn regenerate_replaces_stale_manifest() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SECTION_LIST), "\"\"\nGone\tGone\n").unwrap();
        fs::write(temp.path().join("Sharp"), b"x").unwrap();
        fs::write(temp.path().join("Blurry"), b"y").unwrap();

        let names = regenerate(temp.path()).unwrap();
        assert_eq!(names, vec!["Blurry", "Sharp"]);
        assert_eq!(
            read(temp.path()).unwrap(),
            Some(vec!["Blurry".to_string(), "Sharp".to_string()])
        );
    }

    #[test]
    fn read_without_manifest() {
        let temp = TempDir::new().unwrap();
        assert_eq!(read(temp.path()).unwrap(), None);
    }
}
