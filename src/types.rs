use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use typed_builder::TypedBuilder;

/// Part-of-speech tag attached to a token by the annotator.
///
/// Only the two conjunction classes matter for scoring; every other Universal
/// Dependencies tag is carried through verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    /// Subordinating conjunction (`SCONJ`).
    SubordinatingConjunction,
    /// Coordinating conjunction (`CCONJ`).
    CoordinatingConjunction,
    /// Any other tag (e.g. `NOUN`, `VERB`, `PUNCT`).
    Other(String),
}

impl PartOfSpeech {
    /// Returns the tag as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            PartOfSpeech::SubordinatingConjunction => "SCONJ",
            PartOfSpeech::CoordinatingConjunction => "CCONJ",
            PartOfSpeech::Other(tag) => tag.as_str(),
        }
    }

    /// Whether this tag marks a simple connective.
    pub fn is_conjunction(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::SubordinatingConjunction | PartOfSpeech::CoordinatingConjunction
        )
    }
}

impl From<&str> for PartOfSpeech {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "SCONJ" => PartOfSpeech::SubordinatingConjunction,
            "CCONJ" => PartOfSpeech::CoordinatingConjunction,
            _ => PartOfSpeech::Other(value.to_string()),
        }
    }
}

impl From<String> for PartOfSpeech {
    fn from(value: String) -> Self {
        PartOfSpeech::from(value.as_str())
    }
}

impl Serialize for PartOfSpeech {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PartOfSpeech {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(PartOfSpeech::from(value))
    }
}

impl Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token of the essay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Surface text as it appears in the essay.
    pub text:           String,
    /// Tag assigned by the annotator.
    #[serde(alias = "pos")]
    pub part_of_speech: PartOfSpeech,
}

impl Token {
    /// Creates a token from its surface text and tag.
    pub fn new(text: impl Into<String>, part_of_speech: impl Into<PartOfSpeech>) -> Self {
        Self {
            text:           text.into(),
            part_of_speech: part_of_speech.into(),
        }
    }
}

/// A sentence span of the essay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Full text of the sentence.
    pub text: String,
}

impl Sentence {
    /// Creates a sentence from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Tokens and sentences produced by one annotation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSet {
    /// Tokens in essay order.
    #[serde(default)]
    pub tokens:    Vec<Token>,
    /// Sentences in essay order.
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl AnnotationSet {
    /// Creates an annotation set from already ordered tokens and sentences.
    pub fn new(tokens: Vec<Token>, sentences: Vec<Sentence>) -> Self {
        Self { tokens, sentences }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
/// A problem reported by the grammar checker.
pub struct GrammarIssue {
    /// Category label used for severity classification.
    pub category: String,
    /// Identifier of the rule that fired, if the checker reports one.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id:  Option<String>,
    /// Human-readable description of the problem.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message:  Option<String>,
}

impl GrammarIssue {
    /// Creates an issue carrying only a category.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            rule_id:  None,
            message:  None,
        }
    }
}
