//! Stand-in language model.
//!
//! There is no real inference here. Generation picks one of a few canned
//! continuations based on the prompt; classification scores the text against
//! a small keyword lexicon. Both are deterministic for a given input.

use crate::schema::TextGenerationRequest;

const CONTINUATIONS: [&str; 4] = [
    "a small team shipped a prototype that nobody expected to work. It did, and \
     within a year the garage had turned into an office, the office into a campus, \
     and the prototype into a product used by millions of people every day.",
    "the answer depends on the context, but a good starting point is to break the \
     problem into smaller pieces, solve each one on its own, and then check that \
     the pieces still fit together once they are combined.",
    "the morning was quiet and the streets were still wet from the night's rain. \
     People hurried past the cafe windows, coffee in hand, while the city slowly \
     woke up around them.",
    "thank you for the question. Here is a short summary: the idea is simple, the \
     details matter, and the best way to learn is to try it yourself and see what \
     happens.",
];

/// Keywords that count towards a label, for labels the model "knows".
const LEXICON: [(&str, &[&str]); 8] = [
    (
        "positive",
        &["love", "loved", "great", "superb", "excellent", "engaging", "amazing", "good", "happy", "wonderful"],
    ),
    (
        "negative",
        &["hate", "hated", "bad", "terrible", "awful", "boring", "poor", "worst", "sad", "disappointing"],
    ),
    ("neutral", &["okay", "fine", "average", "normal"]),
    (
        "technology",
        &["python", "programming", "software", "computer", "machine", "learning", "data", "science", "libraries", "code", "language"],
    ),
    ("sports", &["game", "team", "match", "score", "player", "league", "football", "tennis"]),
    ("entertainment", &["movie", "film", "music", "show", "actor", "acting", "story", "concert"]),
    ("education", &["school", "student", "teacher", "course", "learn", "university", "study"]),
    ("politics", &["election", "government", "policy", "vote", "minister", "parliament"]),
];

const FALLBACK_LABEL: &str = "neutral";
const FALLBACK_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    pub input_tokens: i32,
    pub generated_tokens: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

/// Whitespace-delimited token count.
pub fn count_tokens(text: &str) -> i32 {
    text.split_whitespace().count().try_into().unwrap_or(i32::MAX)
}

/// Expects a validated request (non-blank prompt, positive `max_length`).
pub fn generate(request: &TextGenerationRequest) -> Generation {
    let seed: usize = request.prompt.bytes().map(usize::from).sum();
    let continuation = CONTINUATIONS[seed % CONTINUATIONS.len()];

    let limit = usize::try_from(request.max_length.max(1)).unwrap_or(usize::MAX);
    let words: Vec<&str> = continuation.split_whitespace().take(limit).collect();

    Generation {
        text: words.join(" "),
        input_tokens: count_tokens(&request.prompt),
        generated_tokens: words.len().try_into().unwrap_or(i32::MAX),
    }
}

/// Expects a non-empty label list.
pub fn classify(text: &str, labels: &[String]) -> Classification {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    let scores: Vec<usize> = labels.iter().map(|label| score(&words, label)).collect();
    let total: usize = scores.iter().sum();

    let mut best = 0;
    for (index, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = index;
        }
    }

    if total == 0 {
        let label = labels
            .iter()
            .find(|label| label.eq_ignore_ascii_case(FALLBACK_LABEL))
            .unwrap_or(&labels[0]);
        return Classification {
            label: label.clone(),
            confidence: FALLBACK_CONFIDENCE,
        };
    }

    Classification {
        label: labels[best].clone(),
        confidence: 0.5 + 0.45 * (scores[best] as f64 / total as f64),
    }
}

fn score(words: &[String], label: &str) -> usize {
    let label = label.to_lowercase();
    let keywords = LEXICON
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[]);

    words
        .iter()
        .filter(|word| **word == label || keywords.contains(&word.as_str()))
        .count()
}
