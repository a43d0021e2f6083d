//! Tag Generator: derives category labels from a fixed keyword taxonomy.

use std::collections::BTreeSet;

/// One taxonomy entry: a label and the keywords that trigger it.
#[derive(Debug, Clone)]
pub struct TagRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl TagRule {
    fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Keyword-based tagger. The taxonomy is supplied at construction and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct TagGenerator {
    taxonomy: Vec<TagRule>,
}

impl TagGenerator {
    #[must_use]
    pub fn new(taxonomy: Vec<TagRule>) -> Self {
        Self { taxonomy }
    }

    /// The stock taxonomy used for showcase posts.
    #[must_use]
    pub fn default_taxonomy() -> Vec<TagRule> {
        vec![
            TagRule::new(
                "Visualization",
                &["visual", "diagram", "manim", "plot", "graph"],
            ),
            TagRule::new(
                "Study Guide",
                &["guide", "roadmap", "notes", "summary", "cheat sheet"],
            ),
            TagRule::new(
                "Quiz/Drill",
                &["quiz", "drill", "flashcard", "mcq", "question generator"],
            ),
            TagRule::new("Tool/App", &["tool", "app", "cli", "website", "interface"]),
            TagRule::new("Prompt Eng", &["prompt", "system prompt", "persona"]),
            TagRule::new(
                "Coding",
                &["code", "implementation", "python", "jupyter", "colab"],
            ),
            TagRule::new(
                "Math",
                &["derivation", "proof", "calculus", "linear algebra"],
            ),
            TagRule::new("Tutor", &["tutor", "coach", "socratic"]),
        ]
    }

    /// Tag a post from its title and cleaned body text. Matching is pure
    /// case-insensitive substring containment.
    #[must_use]
    pub fn generate(&self, title: &str, content: &str) -> BTreeSet<String> {
        let blob = format!("{title} {content}").to_lowercase();
        self.taxonomy
            .iter()
            .filter(|rule| rule.keywords.iter().any(|k| blob.contains(k.as_str())))
            .map(|rule| rule.label.clone())
            .collect()
    }
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::new(Self::default_taxonomy())
    }
}
