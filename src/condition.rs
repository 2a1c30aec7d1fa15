//! Linguistic conditions a cleared word must satisfy.

use serde::Deserialize;
use std::fmt;

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn vowel_count(word: &str) -> usize {
    word.chars().filter(|&c| is_vowel(c)).count()
}

/// The closed set of puzzle conditions, plus a catch-all for identifiers the engine
/// does not know. An unrecognized condition is never satisfied.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Condition {
    OneVowel,
    TwoVowels,
    LengthFour,
    LengthSix,
    NoAE,
    StartT,
    EndN,
    ContainsZ,
    ContainsQ,
    Palindrome,
    AlternatingVc,
    AllConsonants,
    ThreeSyllables,
    DoubleLetters,
    OneConsonant,
    SameFirstLast,
    Unrecognized(String),
}

impl Condition {
    pub const KNOWN: [Self; 16] = [
        Self::OneVowel,
        Self::TwoVowels,
        Self::LengthFour,
        Self::LengthSix,
        Self::NoAE,
        Self::StartT,
        Self::EndN,
        Self::ContainsZ,
        Self::ContainsQ,
        Self::Palindrome,
        Self::AlternatingVc,
        Self::AllConsonants,
        Self::ThreeSyllables,
        Self::DoubleLetters,
        Self::OneConsonant,
        Self::SameFirstLast,
    ];

    #[must_use]
    pub fn parse(identifier: &str) -> Self {
        match identifier {
            "one_vowel" => Self::OneVowel,
            "two_vowels" => Self::TwoVowels,
            "length_four" => Self::LengthFour,
            "length_six" => Self::LengthSix,
            "no_a_e" => Self::NoAE,
            "start_t" => Self::StartT,
            "end_n" => Self::EndN,
            "contains_z" => Self::ContainsZ,
            "contains_q" => Self::ContainsQ,
            "palindrome" => Self::Palindrome,
            "alternating_vc" => Self::AlternatingVc,
            "all_consonants" => Self::AllConsonants,
            "three_syllables" => Self::ThreeSyllables,
            "double_letters" => Self::DoubleLetters,
            "one_consonant" => Self::OneConsonant,
            "same_first_last" => Self::SameFirstLast,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::OneVowel => "one_vowel",
            Self::TwoVowels => "two_vowels",
            Self::LengthFour => "length_four",
            Self::LengthSix => "length_six",
            Self::NoAE => "no_a_e",
            Self::StartT => "start_t",
            Self::EndN => "end_n",
            Self::ContainsZ => "contains_z",
            Self::ContainsQ => "contains_q",
            Self::Palindrome => "palindrome",
            Self::AlternatingVc => "alternating_vc",
            Self::AllConsonants => "all_consonants",
            Self::ThreeSyllables => "three_syllables",
            Self::DoubleLetters => "double_letters",
            Self::OneConsonant => "one_consonant",
            Self::SameFirstLast => "same_first_last",
            Self::Unrecognized(identifier) => identifier,
        }
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Does the lowercase `word` satisfy this condition?
    #[must_use]
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        let len = word.chars().count();
        match self {
            Self::OneVowel => vowel_count(word) == 1,
            Self::TwoVowels => vowel_count(word) == 2,
            Self::LengthFour => len == 4,
            Self::LengthSix => len == 6,
            Self::NoAE => !word.contains(['a', 'e']),
            Self::StartT => word.starts_with('t'),
            Self::EndN => word.ends_with('n'),
            Self::ContainsZ => word.contains('z'),
            Self::ContainsQ => word.contains('q'),
            Self::Palindrome => word.chars().eq(word.chars().rev()),
            Self::AlternatingVc => {
                let chars: Vec<char> = word.chars().collect();
                chars.windows(2).all(|pair| is_vowel(pair[0]) != is_vowel(pair[1]))
            }
            Self::AllConsonants => vowel_count(word) == 0,
            Self::ThreeSyllables => vowel_count(word) >= 3,
            Self::DoubleLetters => {
                let chars: Vec<char> = word.chars().collect();
                chars.windows(2).any(|pair| pair[0] == pair[1])
            }
            Self::OneConsonant => len - vowel_count(word) == 1,
            Self::SameFirstLast => match (word.chars().next(), word.chars().last()) {
                (Some(first), Some(last)) => first == last,
                _ => false,
            },
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<String> for Condition {
    fn from(identifier: String) -> Self {
        Self::parse(&identifier)
    }
}

impl From<&str> for Condition {
    fn from(identifier: &str) -> Self {
        Self::parse(identifier)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Evaluate a condition given by its identifier. Unknown identifiers yield `false`.
#[must_use]
pub fn satisfies(word: &str, identifier: &str) -> bool {
    Condition::parse(identifier).is_satisfied_by(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_checks() {
        assert!(satisfies("racecar", "palindrome"));
        assert!(!satisfies("hello", "length_six"));
        assert!(satisfies("quiz", "contains_q"));
        assert!(!satisfies("xyz", "one_vowel"));
        assert!(!satisfies("banana", "two_vowels"));
    }

    #[test]
    fn test_truth_table() {
        // (condition, satisfying word, failing word)
        let table = [
            ("one_vowel", "cat", "boat"),
            ("two_vowels", "boat", "banana"),
            ("length_four", "cats", "cat"),
            ("length_six", "garden", "hello"),
            ("no_a_e", "fork", "fare"),
            ("start_t", "tree", "stream"),
            ("end_n", "rain", "rains"),
            ("contains_z", "zebra", "bread"),
            ("contains_q", "queen", "green"),
            ("palindrome", "level", "levels"),
            ("alternating_vc", "banana", "bread"),
            ("all_consonants", "rhythm", "rhyme"),
            ("three_syllables", "banana", "boat"),
            ("double_letters", "letter", "later"),
            ("one_consonant", "idea", "ideas"),
            ("same_first_last", "sees", "seen"),
        ];
        assert_eq!(table.len(), Condition::KNOWN.len());
        for (identifier, good, bad) in table {
            assert!(satisfies(good, identifier), "{identifier} should accept {good}");
            assert!(!satisfies(bad, identifier), "{identifier} should reject {bad}");
        }
    }

    #[test]
    fn test_identifiers_round_trip() {
        for condition in Condition::KNOWN {
            assert!(condition.is_recognized());
            assert_eq!(Condition::parse(condition.identifier()), condition);
        }
    }

    #[test]
    fn test_unknown_condition_is_never_satisfied() {
        let condition = Condition::parse("rhymes_with_orange");
        assert_eq!(
            condition,
            Condition::Unrecognized("rhymes_with_orange".to_string())
        );
        assert!(!condition.is_recognized());
        assert!(!condition.is_satisfied_by("orange"));
        assert!(!satisfies("anything", "not_a_condition"));
    }

    #[test]
    fn test_edge_cases() {
        assert!(!satisfies("", "same_first_last"));
        assert!(satisfies("a", "same_first_last"));
        assert!(satisfies("a", "alternating_vc"));
        assert!(!satisfies("", "start_t"));
        assert!(satisfies("t", "one_consonant"));
        assert!(satisfies("ooze", "double_letters"));
    }

    #[test]
    fn test_deserializes_from_identifier() {
        let condition: Condition = serde_json::from_str("\"end_n\"").unwrap();
        assert_eq!(condition, Condition::EndN);
        let condition: Condition = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(condition, Condition::Unrecognized("bogus".to_string()));
    }
}
