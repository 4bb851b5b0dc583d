//! Wrapper around the external `hidx` index-archive tool.
//!
//! `hidx -x <dir> <archive>` extracts every section of an archive into a
//! directory; `hidx -c <dir> <archive>` builds an archive from a directory
//! (using its `Sections.list` as the index).

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::core::error::{PresetError, PresetResult};

/// Something that can unpack and pack preset archives.
pub trait Archiver {
    fn extract(&self, dest_dir: &Path, archive: &Path) -> PresetResult<()>;
    fn create(&self, src_dir: &Path, archive: &Path) -> PresetResult<()>;
}

/// Shells out to the `hidx` binary.
#[derive(Debug, Clone)]
pub struct Hidx {
    binary: String,
}

impl Hidx {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Make sure the binary can be spawned at all.  Its exit status is
    /// ignored because `hidx` without arguments only prints usage.
    pub fn check_available(&self) -> PresetResult<()> {
        let status = Command::new(&self.binary)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(_) => Ok(()),
            Err(e) => Err(self.spawn_error(e)),
        }
    }

    fn run(&self, flag: &str, dir: &Path, archive: &Path) -> PresetResult<()> {
        let args: [&OsStr; 3] = [OsStr::new(flag), dir.as_os_str(), archive.as_os_str()];
        let command_line = format!(
            "{} {} {} {}",
            self.binary,
            flag,
            dir.display(),
            archive.display()
        );
        tracing::debug!(command = %command_line, "running archive tool");

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(PresetError::ToolFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr,
            });
        }
        Ok(())
    }

    fn spawn_error(&self, e: io::Error) -> PresetError {
        PresetError::ToolNotFound {
            tool: self.binary.clone(),
            source: e,
        }
    }
}

impl Archiver for Hidx {
    fn extract(&self, dest_dir: &Path, archive: &Path) -> PresetResult<()> {
        self.run("-x", dest_dir, archive)
    }

    fn create(&self, src_dir: &Path, archive: &Path) -> PresetResult<()> {
        self.run("-c", src_dir, archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_binary_is_reported() {
        let hidx = Hidx::new("nonexistent_hidx_xyz");
        let err = hidx.check_available().unwrap_err();
        assert!(matches!(err, PresetError::ToolNotFound { .. }));
        assert!(err.to_string().contains("nonexistent_hidx_xyz"));

        let err = hidx
            .extract(&PathBuf::from("/tmp"), &PathBuf::from("a.idx"))
            .unwrap_err();
        assert!(matches!(err, PresetError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_failure() {
        let hidx = Hidx::new("false");
        let err = hidx
            .create(&PathBuf::from("/tmp/remote"), &PathBuf::from("/tmp/box.idx"))
            .unwrap_err();
        match err {
            PresetError::ToolFailed { command, .. } => {
                assert_eq!(command, "false -c /tmp/remote /tmp/box.idx");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn failure_carries_tool_stderr() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let temp = TempDir::new().unwrap();
        let script = temp.path().join("fake-hidx");
        std::fs::write(&script, "#!/bin/sh\necho 'bad archive header' >&2\nexit 3\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let hidx = Hidx::new(script.to_string_lossy());
        let err = hidx
            .extract(&PathBuf::from("/tmp"), &PathBuf::from("x.idx"))
            .unwrap_err();
        match &err {
            PresetError::ToolFailed { stderr, status, .. } => {
                assert_eq!(stderr, "bad archive header");
                assert!(status.contains('3'));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().ends_with(": bad archive header"));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let hidx = Hidx::new("true");
        assert!(hidx.check_available().is_ok());
        assert!(hidx
            .extract(&PathBuf::from("/tmp/local"), &PathBuf::from("/tmp/box.idx"))
            .is_ok());
    }
}
