//! Source intake: file and stdin loading with an extension allow-list.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

/// Extensions accepted for review. Fixed allow-list; anything else is
/// rejected before reading the file.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "py", "java", "cpp", "c", "h", "html", "css", "json", "md", "txt",
    "rs", "go",
];

/// Whether a path's extension is on the allow-list. Files without an
/// extension are rejected.
pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            ACCEPTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Read a source file for review. Validates the extension, decodes as
/// UTF-8, and rejects empty content early so no request is wasted on it.
pub fn load_source(path: &Path) -> Result<String> {
    if !is_accepted(path) {
        bail!(
            "unsupported file type {:?} (accepted: {})",
            path.extension().unwrap_or_default(),
            ACCEPTED_EXTENSIONS.join(", ")
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if content.trim().is_empty() {
        bail!("{} is empty", path.display());
    }

    Ok(content)
}

/// Read source text from stdin (the `-` argument).
pub fn load_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("failed to read from stdin")?;
    if content.trim().is_empty() {
        bail!("no code on stdin");
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_accepted_extensions() {
        assert!(is_accepted(Path::new("lib.rs")));
        assert!(is_accepted(Path::new("app/Main.Java")));
        assert!(is_accepted(Path::new("notes.md")));
        assert!(!is_accepted(Path::new("binary.exe")));
        assert!(!is_accepted(Path::new("Makefile")));
    }

    #[test]
    fn test_load_source_rejects_wrong_extension() {
        let err = load_source(Path::new("image.png")).unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn test_load_source_reads_accepted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.py");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "print('hi')").unwrap();

        let content = load_source(&path).unwrap();
        assert_eq!(content, "print('hi')\n");
    }

    #[test]
    fn test_load_source_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.js");
        std::fs::write(&path, "  \n\t").unwrap();

        let err = load_source(&path).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
