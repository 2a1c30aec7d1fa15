use crate::condition::Condition;
use crate::error::LoadError;
use crate::info_log;
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One puzzle: the text shown to the player and the condition cleared words must meet.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PuzzleDefinition {
    pub description: String,
    pub condition: Condition,
}

impl PuzzleDefinition {
    pub fn new(description: impl Into<String>, condition: Condition) -> Self {
        Self {
            description: description.into(),
            condition,
        }
    }
}

/// Keyed, non-empty collection of puzzle definitions. Iteration and selection follow
/// key order, so a seeded RNG always picks the same puzzles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleCatalog {
    puzzles: BTreeMap<String, PuzzleDefinition>,
}

impl PuzzleCatalog {
    /// Returns `None` when `puzzles` is empty.
    #[must_use]
    pub fn new(puzzles: BTreeMap<String, PuzzleDefinition>) -> Option<Self> {
        (!puzzles.is_empty()).then_some(Self { puzzles })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PuzzleDefinition> {
        self.puzzles.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PuzzleDefinition)> {
        self.puzzles.iter().map(|(key, puzzle)| (key.as_str(), puzzle))
    }

    /// Pick a puzzle uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> (&str, &PuzzleDefinition) {
        let index = rng.gen_range(0..self.puzzles.len());
        self.puzzles
            .iter()
            .nth(index)
            .map(|(key, puzzle)| (key.as_str(), puzzle))
            .expect("catalog is never empty")
    }
}

/// Parse a catalog of the form `{ "key": { "description": ..., "condition": ... } }`.
pub fn load_catalog_from_str(data: &str, origin: &Path) -> Result<PuzzleCatalog, LoadError> {
    let puzzles: BTreeMap<String, PuzzleDefinition> =
        serde_json::from_str(data).map_err(|source| LoadError::Json {
            path: origin.to_path_buf(),
            source,
        })?;

    for (key, puzzle) in &puzzles {
        if !puzzle.condition.is_recognized() {
            log::warn!(
                "puzzle '{}' uses unknown condition '{}'; no word will satisfy it",
                key,
                puzzle.condition
            );
        }
    }

    PuzzleCatalog::new(puzzles).ok_or_else(|| LoadError::EmptyCatalog {
        path: origin.to_path_buf(),
    })
}

pub fn load_catalog_from_file<P: AsRef<Path>>(path: P) -> Result<PuzzleCatalog, LoadError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = load_catalog_from_str(&data, path)?;
    info_log!(
        "Loaded {} puzzles from '{}'",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const CATALOG: &str = r#"{
        "pal": { "description": "Make a palindrome", "condition": "palindrome" },
        "six": { "description": "Make a six letter word", "condition": "length_six" },
        "odd": { "description": "Something strange", "condition": "made_up" }
    }"#;

    #[test]
    fn test_load_catalog() {
        let catalog = load_catalog_from_str(CATALOG, Path::new("inline")).unwrap();
        assert_eq!(catalog.len(), 3);
        let pal = catalog.get("pal").unwrap();
        assert_eq!(pal.description, "Make a palindrome");
        assert_eq!(pal.condition, Condition::Palindrome);
        assert_eq!(
            catalog.get("odd").unwrap().condition,
            Condition::Unrecognized("made_up".to_string())
        );
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = load_catalog_from_str("{}", Path::new("empty.json"));
        assert!(matches!(result, Err(LoadError::EmptyCatalog { .. })));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let result = load_catalog_from_str(
            r#"{"x": {"description": "no condition"}}"#,
            Path::new("bad.json"),
        );
        assert!(matches!(result, Err(LoadError::Json { .. })));
    }

    #[test]
    fn test_choose_reaches_every_puzzle() {
        let catalog = load_catalog_from_str(CATALOG, Path::new("inline")).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let seen: HashSet<&str> = (0..200).map(|_| catalog.choose(&mut rng).0).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_choose_is_reproducible_with_seed() {
        let catalog = load_catalog_from_str(CATALOG, Path::new("inline")).unwrap();
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| catalog.choose(&mut rng).0.to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(11), picks(11));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog_from_file(dir.path().join("word_puzzles.json"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
