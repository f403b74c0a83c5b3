use crate::domain::common::RelativePath;

/// A static file written next to the manifest of one entry.
///
/// The core only carries companions to the materializer; their content is
/// computed by `CompanionProvider` adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionFile {
    pub path: RelativePath,
    pub content: String,
    pub executable: bool,
}

impl CompanionFile {
    pub fn new(path: RelativePath, content: impl Into<String>) -> Self {
        Self {
            path,
            content: content.into(),
            executable: false,
        }
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// A rendered manifest: target file name plus its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedManifest {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl RenderedManifest {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Lossy UTF-8 view, for display.
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}
