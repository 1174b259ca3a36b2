//! Typed JSON documents on top of [`TextFile`]
//!
//! Adds one failure mode to the text store: text that decodes fine but is
//! not the expected JSON shape is a [`LedgerError::MalformedDocument`], so
//! callers can tell a corrupted document apart from a wrong password.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

use super::encoder::TextEncoder;
use super::text_file::{TextFile, WriteOutcome};

/// A JSON document of type `T` stored through a [`TextFile`]
pub struct JsonFile<T> {
    file: TextFile,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a plaintext JSON store for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_text_file(TextFile::new(path))
    }

    /// Create a JSON store for `path` that passes text through `encoder`
    pub fn with_encoder(path: impl Into<PathBuf>, encoder: impl TextEncoder + 'static) -> Self {
        Self::from_text_file(TextFile::with_encoder(path, encoder))
    }

    pub fn from_text_file(file: TextFile) -> Self {
        Self {
            file,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn text_file(&self) -> &TextFile {
        &self.file
    }

    /// Read and parse the document, or `None` if the file does not exist
    pub fn read(&self) -> LedgerResult<Option<T>> {
        let Some(text) = self.file.read()? else {
            return Ok(None);
        };

        serde_json::from_str(&text).map(Some).map_err(|e| {
            LedgerError::MalformedDocument(format!(
                "Failed to parse {}: {}",
                self.file.path().display(),
                e
            ))
        })
    }

    /// Serialize and persist the document
    pub fn write(&self, document: &T) -> LedgerResult<WriteOutcome> {
        let text = serde_json::to_string_pretty(document)
            .map_err(|e| LedgerError::Json(format!("Failed to serialize document: {}", e)))?;
        self.file.write(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyDerivationParams;
    use crate::storage::encoder::PasswordEncoder;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        values: BTreeMap<u32, i64>,
    }

    fn sample() -> TestData {
        TestData {
            name: "test".to_string(),
            values: BTreeMap::from([(1, 1000), (5, -400)]),
        }
    }

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store: JsonFile<TestData> = JsonFile::new(temp_dir.path().join("missing.json"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFile::new(temp_dir.path().join("test.json"));

        store.write(&sample()).unwrap();
        assert_eq!(store.read().unwrap(), Some(sample()));
    }

    #[test]
    fn test_invalid_json_is_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let store: JsonFile<TestData> = JsonFile::new(path);
        assert!(matches!(
            store.read(),
            Err(LedgerError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shape.json");
        fs::write(&path, r#"{"name": 42}"#).unwrap();

        let store: JsonFile<TestData> = JsonFile::new(path);
        assert!(matches!(
            store.read(),
            Err(LedgerError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_encrypted_malformed_payload_is_document_error_not_decryption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("enc.json");
        let params = KeyDerivationParams::with_costs(64, 1, 1);

        TextFile::with_encoder(&path, PasswordEncoder::with_params("pw", params))
            .write("definitely not json")
            .unwrap();

        let store: JsonFile<TestData> =
            JsonFile::with_encoder(&path, PasswordEncoder::with_params("pw", params));
        assert!(matches!(
            store.read(),
            Err(LedgerError::MalformedDocument(_))
        ));

        let wrong: JsonFile<TestData> =
            JsonFile::with_encoder(&path, PasswordEncoder::with_params("nope", params));
        assert!(matches!(wrong.read(), Err(LedgerError::Decryption(_))));
    }
}
