//! Knowledge base retrieval for grounding generated advice.
//!
//! Articles are indexed once as term-frequency vectors over title + content.
//! A question is ranked against every article by cosine similarity.

pub mod corpus;

use std::collections::HashMap;

use serde::Serialize;

use crate::compensation::format::round_to;
use crate::knowledge::corpus::{Article, ARTICLES};

const MIN_TOKEN_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "your", "with", "this", "that", "what",
    "when", "how", "can", "should", "would", "could", "from", "have", "has", "was", "were",
    "its", "it's", "they", "them", "their", "there", "than", "then", "into", "about", "our",
    "any", "all", "who", "why", "does", "did", "doing", "will", "just", "also", "more",
];

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeSource {
    pub title: String,
    pub category: String,
    /// Cosine similarity as a percentage, one decimal place.
    pub similarity: f64,
}

#[derive(Debug, Clone)]
pub struct RetrievalHit {
    pub article: &'static Article,
    pub similarity: f64,
}

impl RetrievalHit {
    pub fn source(&self) -> KnowledgeSource {
        KnowledgeSource {
            title: self.article.title.to_string(),
            category: self.article.category.to_string(),
            similarity: round_to(self.similarity * 100.0, 1),
        }
    }
}

#[derive(Debug, Clone)]
struct IndexedArticle {
    article: &'static Article,
    terms: HashMap<String, f64>,
    norm: f64,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    index: Vec<IndexedArticle>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(ARTICLES)
    }
}

impl KnowledgeBase {
    pub fn new(articles: &'static [Article]) -> Self {
        let index = articles
            .iter()
            .map(|article| {
                let terms = term_frequencies(&format!("{} {}", article.title, article.content));
                let norm = vector_norm(&terms);
                IndexedArticle {
                    article,
                    terms,
                    norm,
                }
            })
            .collect();
        Self { index }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns up to `top_k` articles with non-zero similarity, best first.
    pub fn retrieve(&self, question: &str, top_k: usize) -> Vec<RetrievalHit> {
        let query = term_frequencies(question);
        let query_norm = vector_norm(&query);
        if query_norm == 0.0 || top_k == 0 {
            return vec![];
        }

        let mut hits: Vec<RetrievalHit> = self
            .index
            .iter()
            .filter(|entry| entry.norm > 0.0)
            .map(|entry| {
                let dot: f64 = query
                    .iter()
                    .filter_map(|(term, weight)| entry.terms.get(term).map(|w| w * weight))
                    .sum();
                RetrievalHit {
                    article: entry.article,
                    similarity: dot / (query_norm * entry.norm),
                }
            })
            .filter(|hit| hit.similarity > 0.0)
            .collect();

        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(top_k);
        hits
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(&t.as_str()))
}

fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut terms = HashMap::new();
    for token in tokenize(text) {
        *terms.entry(token).or_insert(0.0) += 1.0;
    }
    terms
}

fn vector_norm(terms: &HashMap<String, f64>) -> f64 {
    terms.values().map(|w| w * w).sum::<f64>().sqrt()
}
