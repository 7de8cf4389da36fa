use crate::document::Document;

/// A bounded-length slice of a document's text, tagged with the
/// originating document's metadata.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub text: String,
    pub source: String,
    pub page: Option<u32>,
}

/// Sliding-window character splitter with overlap between chunks.
///
/// Break points prefer paragraph and line boundaries, then spaces,
/// falling back to a hard split when no boundary is found.
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for doc in documents {
            for text in self.split_text(&doc.text) {
                chunks.push(Chunk {
                    text,
                    source: doc.source.clone(),
                    page: doc.page,
                });
            }
        }
        chunks
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < text.len() {
            let mut end = snap_to_char_boundary(text, (start + self.chunk_size).min(text.len()));

            // Prefer a natural boundary when splitting mid-text
            if end < text.len() {
                let window = &text[start..end];
                let break_at = window
                    .rfind("\n\n")
                    .map(|p| p + 2)
                    .or_else(|| window.rfind('\n').map(|p| p + 1))
                    .or_else(|| window.rfind(' ').map(|p| p + 1));
                if let Some(p) = break_at {
                    if p > self.chunk_size / 3 {
                        end = start + p;
                    }
                }
            }

            // Guarantee forward progress even for pathological inputs
            if end <= start {
                end = text[start..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| start + i)
                    .unwrap_or(text.len());
            }

            let piece = text[start..end].trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }

            if end >= text.len() {
                break;
            }

            let step = end - start;
            start = if step <= self.chunk_overlap {
                end
            } else {
                snap_to_char_boundary(text, end - self.chunk_overlap)
            };
        }

        chunks
    }
}

fn snap_to_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
