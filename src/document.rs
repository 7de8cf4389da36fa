use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Extracted text of a single PDF file plus its source metadata.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub source: String,
    pub page: Option<u32>,
}

/// Load every `*.pdf` under `dir` into [`Document`]s.
///
/// Fails if the directory is missing or any PDF cannot be parsed.
/// Non-PDF files are skipped. Returns an empty vector for a directory
/// with no PDF files in it.
pub fn load_pdf_files(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Err(anyhow!("PDF directory not found: {}", dir.display()));
    }

    let mut documents = Vec::new();
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;

    // Deterministic ingestion order
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            continue;
        }

        log::info!("Loading {}", path.display());
        let text = pdf_extract::extract_text(&path)
            .map_err(|e| anyhow!("Failed to extract text from {}: {}", path.display(), e))?;

        documents.push(Document {
            text,
            source: path.display().to_string(),
            page: None,
        });
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_errors() {
        let result = load_pdf_files(Path::new("does/not/exist"));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_directory_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let docs = load_pdf_files(dir.path()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_non_pdf_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "plain text").unwrap();
        let docs = load_pdf_files(dir.path()).unwrap();
        assert!(docs.is_empty());
    }
}
