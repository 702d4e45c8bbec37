/// Limits applied while reading definition documents from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Maximum number of documents loaded from one directory.
    pub max_documents_from_directory: usize,
    /// Maximum bytes allowed per document file.
    pub max_document_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_documents_from_directory: 256,
            max_document_size: 1024 * 1024,
        }
    }
}
