use crate::error::LoadError;
use crate::info_log;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Immutable set of lowercase words, loaded once per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Load a dictionary from either a JSON object whose keys are the words or a
/// newline-delimited word list. `origin` is only used in error messages.
pub fn load_dictionary_from_str(data: &str, origin: &Path) -> Result<Dictionary, LoadError> {
    if !data.trim_start().starts_with(['{', '[']) {
        return Ok(Dictionary::from_words(data.lines()));
    }

    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|source| LoadError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
    match value {
        serde_json::Value::Object(map) => Ok(Dictionary::from_words(map.keys())),
        _ => Err(LoadError::NotAnObject {
            path: origin.to_path_buf(),
        }),
    }
}

pub fn load_dictionary_from_file<P: AsRef<Path>>(path: P) -> Result<Dictionary, LoadError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dictionary = load_dictionary_from_str(&data, path)?;
    info_log!(
        "Loaded {} words from '{}'",
        dictionary.len(),
        path.display()
    );
    Ok(dictionary)
}
