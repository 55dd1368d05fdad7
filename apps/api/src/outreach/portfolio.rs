//! Portfolio Matcher: maps a posting's skill tags to portfolio links.
//!
//! Backed by a CSV with `Techstack` and `Links` columns, loaded once at startup.
//! Matching is token overlap between each skill and each row's tech stack.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

/// Links returned per skill.
const LINKS_PER_SKILL: usize = 2;

#[derive(Debug, Clone, Deserialize)]
struct PortfolioRow {
    #[serde(rename = "Techstack")]
    techstack: String,
    #[serde(rename = "Links")]
    links: String,
}

#[derive(Debug, Clone)]
struct PortfolioEntry {
    techstack_lower: String,
    tokens: HashSet<String>,
    link: String,
}

#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    entries: Vec<PortfolioEntry>,
}

impl Portfolio {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut entries = Vec::new();
        for row in csv_reader.deserialize::<PortfolioRow>() {
            let row = row.context("Malformed portfolio row")?;
            let link = row.links.trim().to_string();
            if link.is_empty() {
                continue;
            }
            entries.push(PortfolioEntry {
                techstack_lower: row.techstack.to_lowercase(),
                tokens: tokenize(&row.techstack),
                link,
            });
        }
        Ok(Self { entries })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open portfolio CSV {}", path.display()))?;
        Self::from_reader(file)
    }

    /// Loads the portfolio, or starts empty with a warning if the file is
    /// unusable or has no rows with a link.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(portfolio) if portfolio.is_empty() => {
                warn!("Portfolio has no usable rows; outreach emails will carry no links");
                portfolio
            }
            Ok(portfolio) => {
                info!("Portfolio loaded with {} entries", portfolio.len());
                portfolio
            }
            Err(e) => {
                warn!("Portfolio unavailable, continuing without links: {e:#}");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to two best-matching links per skill, deduplicated in first-seen order.
    pub fn query_links(&self, skills: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for skill in skills {
            for link in self.best_links_for(skill) {
                if seen.insert(link) {
                    links.push(link.to_string());
                }
            }
        }
        links
    }

    fn best_links_for(&self, skill: &str) -> Vec<&str> {
        let skill_lower = skill.trim().to_lowercase();
        let skill_tokens = tokenize(&skill_lower);
        if skill_tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, usize)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                let overlap = skill_tokens.intersection(&entry.tokens).count();
                let phrase = usize::from(entry.techstack_lower.contains(&skill_lower));
                let score = overlap + phrase;
                (score > 0).then_some((idx, score))
            })
            .collect();

        // Highest score first; row order breaks ties.
        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(LINKS_PER_SKILL)
            .map(|(idx, _)| self.entries[idx].link.as_str())
            .collect()
    }
}

/// Lowercased words; `+`, `#` and `.` stay inside tokens so "C++", "C#" and
/// "Node.js" survive.
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
