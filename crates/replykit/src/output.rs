//! Where a rendered reply goes.

use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputDestination {
    /// The caller's standard output handle
    #[default]
    Stdout,
    /// A text file, written with exactly the document's content
    File(PathBuf),
}

impl OutputDestination {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => OutputDestination::File(path.to_path_buf()),
            None => OutputDestination::Stdout,
        }
    }

    /// Writes text content to this destination.
    ///
    /// `stdout` is the handle used for [`OutputDestination::Stdout`]; a
    /// trailing newline is added there so the shell prompt starts on its
    /// own line.
    pub fn write_text(&self, content: &str, stdout: &mut dyn Write) -> std::io::Result<()> {
        match self {
            OutputDestination::Stdout => writeln!(stdout, "{}", content),
            OutputDestination::File(path) => {
                validate_path(path)?;
                std::fs::write(path, content)
            }
        }
    }
}

/// Validates that a file path's parent directory exists.
fn validate_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_text_to_stdout_handle() {
        let mut buffer: Vec<u8> = Vec::new();
        OutputDestination::Stdout
            .write_text("Добрый день!", &mut buffer)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Добрый день!\n");
    }

    #[test]
    fn test_write_text_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("reply.txt");
        let dest = OutputDestination::from_path(Some(file_path.as_path()));

        let mut unused: Vec<u8> = Vec::new();
        dest.write_text("hello", &mut unused).unwrap();

        let content = std::fs::read_to_string(file_path).unwrap();
        assert_eq!(content, "hello");
        assert!(unused.is_empty());
    }

    #[test]
    fn test_write_to_invalid_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("missing").join("reply.txt");
        let dest = OutputDestination::File(file_path);

        let err = dest.write_text("hello", &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().starts_with("parent directory does not exist: "));
    }
}
