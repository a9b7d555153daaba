//! The set of files picked for the next upload.

use dropzone_utils::{UploadPolicy, format_file_size};

/// A file offered by the picker or a drop, before any checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    /// MIME type as declared by the source of the file.
    pub content_type: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }
}

/// Why a file was kept out of the selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("File \"{name}\" has an invalid type. Only JPG, PNG and PDF are allowed.")]
    InvalidType { name: String },
    #[error("File \"{name}\" is too large. Maximum size: {limit}.")]
    TooLarge { name: String, limit: String },
}

impl SelectionError {
    pub fn file_name(&self) -> &str {
        match self {
            Self::InvalidType { name } | Self::TooLarge { name, .. } => name,
        }
    }
}

/// Result of feeding a batch of files into a [`SelectionSet`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Names newly added, in input order.
    pub added: Vec<String>,
    /// Accepted files skipped because the name was already selected.
    pub duplicates: Vec<String>,
    pub rejected: Vec<SelectionError>,
}

/// Insertion-ordered files, unique by name.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    files: Vec<CandidateFile>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `file` unless a file with the same name is present.
    pub fn insert(&mut self, file: CandidateFile) -> bool {
        if self.contains(&file.name) {
            return false;
        }
        self.files.push(file);
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<CandidateFile> {
        let index = self.files.iter().position(|file| file.name == name)?;
        Some(self.files.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|file| file.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&CandidateFile> {
        self.files.iter().find(|file| file.name == name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateFile> {
        self.files.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.name.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Checks every file against `policy` and keeps the ones that pass.
    ///
    /// A rejected file does not stop the rest of the batch.
    pub fn select<I>(&mut self, files: I, policy: &UploadPolicy) -> SelectionOutcome
    where
        I: IntoIterator<Item = CandidateFile>,
    {
        let mut outcome = SelectionOutcome::default();

        for file in files {
            if let Err(error) = check(&file, policy) {
                outcome.rejected.push(error);
                continue;
            }

            let name = file.name.clone();
            if self.insert(file) {
                outcome.added.push(name);
            } else {
                outcome.duplicates.push(name);
            }
        }

        outcome
    }
}

/// Applies the type check, then the size check.
fn check(file: &CandidateFile, policy: &UploadPolicy) -> Result<(), SelectionError> {
    if !policy.is_type_allowed(&file.content_type) {
        return Err(SelectionError::InvalidType {
            name: file.name.clone(),
        });
    }
    if !policy.is_size_allowed(file.size) {
        return Err(SelectionError::TooLarge {
            name: file.name.clone(),
            limit: format_file_size(policy.max_file_size()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropzone_utils::DEFAULT_MAX_FILE_SIZE;

    fn file(name: &str, content_type: &str, size: usize) -> CandidateFile {
        CandidateFile::new(name, content_type, vec![0; size])
    }

    #[test]
    fn test_select_accepts_allowed_files_in_order() {
        let mut set = SelectionSet::new();

        let outcome = set.select(
            [
                file("b.png", "image/png", 3),
                file("a.pdf", "application/pdf", 5),
            ],
            &UploadPolicy::default(),
        );

        assert_eq!(outcome.added, ["b.png", "a.pdf"]);
        assert!(outcome.rejected.is_empty());
        assert_eq!(set.names(), ["b.png", "a.pdf"]);
    }

    #[test]
    fn test_disallowed_type_never_enters_set() {
        let mut set = SelectionSet::new();

        let outcome = set.select(
            [
                file("notes.txt", "text/plain", 3),
                file("ok.jpg", "image/jpeg", 3),
            ],
            &UploadPolicy::default(),
        );

        assert_eq!(
            outcome.rejected,
            [SelectionError::InvalidType {
                name: "notes.txt".to_owned()
            }]
        );
        assert_eq!(set.names(), ["ok.jpg"]);
    }

    #[test]
    fn test_oversized_file_never_enters_set() {
        let mut set = SelectionSet::new();
        let oversized = CandidateFile {
            name: "scan.pdf".to_owned(),
            content_type: "application/pdf".to_owned(),
            size: DEFAULT_MAX_FILE_SIZE + 1,
            bytes: Vec::new(),
        };

        let outcome = set.select([oversized], &UploadPolicy::default());

        assert!(set.is_empty());
        assert_eq!(
            outcome.rejected[0].to_string(),
            "File \"scan.pdf\" is too large. Maximum size: 10 MB."
        );
    }

    #[test]
    fn test_file_at_limit_is_accepted() {
        let mut set = SelectionSet::new();
        let policy = UploadPolicy::new(["image/png"], 4);

        let outcome = set.select([file("edge.png", "image/png", 4)], &policy);

        assert_eq!(outcome.added, ["edge.png"]);
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let mut set = SelectionSet::new();

        let outcome = set.select(
            [
                file("same.png", "image/png", 1),
                file("same.png", "image/png", 2),
            ],
            &UploadPolicy::default(),
        );

        assert_eq!(outcome.added, ["same.png"]);
        assert_eq!(outcome.duplicates, ["same.png"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("same.png").map(|f| f.size), Some(1));
    }

    #[test]
    fn test_invalid_type_message() {
        let error = SelectionError::InvalidType {
            name: "x.gif".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "File \"x.gif\" has an invalid type. Only JPG, PNG and PDF are allowed."
        );
        assert_eq!(error.file_name(), "x.gif");
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut set = SelectionSet::new();
        set.insert(file("a.png", "image/png", 1));

        assert!(set.remove("missing.png").is_none());
        assert!(set.remove("a.png").is_some());
        assert!(set.is_empty());
    }
}
