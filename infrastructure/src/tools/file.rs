//! File reading tool: read_file

use crew_domain::{Tool, ToolError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Default tool name
pub const READ_FILE: &str = "read_file";

/// Maximum file size to read (1 MB)
pub const MAX_READ_SIZE: u64 = 1024 * 1024;

/// Reads a UTF-8 file relative to a base directory.
///
/// The argument is the relative path. Absolute paths and `..` components are
/// rejected so the model cannot read outside `base_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFileTool {
    name: String,
    description: String,
    base_dir: PathBuf,
    max_bytes: u64,
}

impl ReadFileTool {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: READ_FILE.to_string(),
            description: "Read the contents of a text file. Input: the file path relative to the data directory.".to_string(),
            base_dir: base_dir.into(),
            max_bytes: MAX_READ_SIZE,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve the argument below `base_dir`
    fn resolve(&self, argument: &str) -> Result<PathBuf, ToolError> {
        let requested = argument
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`');
        if requested.is_empty() {
            return Err(ToolError::invalid_argument("A file path is required"));
        }

        let relative = Path::new(requested);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(ToolError::permission_denied(requested)),
            }
        }

        Ok(self.base_dir.join(relative))
    }
}

impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self, argument: &str) -> Result<String, ToolError> {
        let path = self.resolve(argument)?;
        debug!("read_file: {}", path.display());

        let metadata = fs::metadata(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ToolError::not_found(argument.trim()),
            ErrorKind::PermissionDenied => ToolError::permission_denied(argument.trim()),
            _ => ToolError::execution_failed(format!("Failed to get file metadata: {}", e)),
        })?;

        if !metadata.is_file() {
            return Err(ToolError::invalid_argument(format!(
                "'{}' is not a file",
                argument.trim()
            )));
        }

        if metadata.len() > self.max_bytes {
            return Err(ToolError::invalid_argument(format!(
                "File too large ({} bytes). Maximum size is {} bytes",
                metadata.len(),
                self.max_bytes
            )));
        }

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => ToolError::permission_denied(argument.trim()),
            ErrorKind::InvalidData => {
                ToolError::execution_failed("File is not valid UTF-8 text")
                    .with_details(argument.trim().to_string())
            }
            _ => ToolError::execution_failed(format!("Failed to read file: {}", e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_with(files: &[(&str, &str)]) -> (tempfile::TempDir, ReadFileTool) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let tool = ReadFileTool::new(dir.path());
        (dir, tool)
    }

    #[test]
    fn test_read_file_success() {
        let (_dir, tool) = tool_with(&[("tickets/march.txt", "42 tickets about login")]);
        assert_eq!(tool.run("tickets/march.txt").unwrap(), "42 tickets about login");
        assert_eq!(tool.run("  \"tickets/march.txt\"\n").unwrap(), "42 tickets about login");
    }

    #[test]
    fn test_read_file_not_found() {
        let (_dir, tool) = tool_with(&[]);
        let err = tool.run("missing.txt").unwrap_err();
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let (_dir, tool) = tool_with(&[("a.txt", "a")]);
        assert_eq!(tool.run("../secret").unwrap_err().code, "PERMISSION_DENIED");
        assert_eq!(tool.run("/etc/passwd").unwrap_err().code, "PERMISSION_DENIED");
        assert_eq!(tool.run("sub/../../x").unwrap_err().code, "PERMISSION_DENIED");
    }

    #[test]
    fn test_empty_argument_is_invalid() {
        let (_dir, tool) = tool_with(&[]);
        assert_eq!(tool.run("   ").unwrap_err().code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let (_dir, tool) = tool_with(&[("sub/a.txt", "a")]);
        assert_eq!(tool.run("sub").unwrap_err().code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_file_too_large() {
        let (dir, _) = tool_with(&[("big.txt", "0123456789")]);
        let tool = ReadFileTool::new(dir.path()).with_max_bytes(4);
        let err = tool.run("big.txt").unwrap_err();
        assert_eq!(err.code, "INVALID_ARGUMENT");
        assert!(err.message.contains("too large"));
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bin.dat"), [0xffu8, 0xfe, 0x00]).unwrap();
        let err = ReadFileTool::new(dir.path()).run("bin.dat").unwrap_err();
        assert_eq!(err.code, "EXECUTION_FAILED");
    }

    #[test]
    fn test_custom_name() {
        let tool = ReadFileTool::new(".").with_name("Support Ticket Reader");
        assert_eq!(tool.name(), "Support Ticket Reader");
        assert!(tool.description().contains("relative"));
    }
}
