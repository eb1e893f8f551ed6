//! Search handoff from the home prompt, and thread ranking for the search
//! view.

use std::cmp::Ordering;

use super::feed::Thread;
use super::store::{SessionStore, SEARCH_INITIAL_CONTEXTS, SEARCH_INITIAL_MSG};

/// Question typed on the home view, carried over to the search view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHandoff {
    pub question: String,
    pub contexts: Vec<String>,
}

impl SearchHandoff {
    /// Write the handoff into the session.  Blank questions are rejected.
    pub fn submit(session: &SessionStore, question: &str, contexts: &[String]) -> bool {
        let question = question.trim();
        if question.is_empty() {
            return false;
        }
        session.set_item(SEARCH_INITIAL_MSG, question);
        session.set_item(SEARCH_INITIAL_CONTEXTS, contexts.join("\n"));
        true
    }

    /// Consume a pending handoff, if any.
    pub fn take(session: &SessionStore) -> Option<Self> {
        let question = session.take_item(SEARCH_INITIAL_MSG)?;
        let contexts = session
            .take_item(SEARCH_INITIAL_CONTEXTS)
            .map(|raw| {
                raw.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Some(Self { question, contexts })
    }
}

/// Split `@name` mentions out of a prompt.  Returns the question without
/// them and the mentioned names in first-seen order, without duplicates.
pub fn split_mentions(prompt: &str) -> (String, Vec<String>) {
    let mut words = Vec::new();
    let mut mentions: Vec<String> = Vec::new();
    for word in prompt.split_whitespace() {
        let name = word
            .strip_prefix('@')
            .map(|rest| rest.trim_end_matches(|c: char| matches!(c, ',' | '.' | ';' | ':' | '?' | '!')));
        match name {
            Some(name) if !name.is_empty() => {
                if !mentions.iter().any(|m| m == name) {
                    mentions.push(name.to_string());
                }
            }
            _ => words.push(word),
        }
    }
    (words.join(" "), mentions)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RankKey {
    /// Every term was found in the title (not only the author).
    in_title: bool,
    prefix: bool,
    match_pos: usize,
    title_len: usize,
}

impl RankKey {
    fn cmp_better(self, other: Self) -> Ordering {
        other
            .in_title
            .cmp(&self.in_title)
            .then_with(|| other.prefix.cmp(&self.prefix))
            .then_with(|| self.match_pos.cmp(&other.match_pos))
            .then_with(|| self.title_len.cmp(&other.title_len))
    }
}

/// Threads matching every whitespace-separated term of `query`
/// (case-insensitive, title or author), best first.
pub fn rank_threads<'a>(threads: &'a [Thread], query: &str, limit: usize) -> Vec<&'a Thread> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(RankKey, &Thread)> = Vec::new();
    'threads: for thread in threads {
        let title = thread.title.to_lowercase();
        let author = thread.author.to_lowercase();
        let mut in_title = true;
        let mut first_pos = usize::MAX;
        for term in &terms {
            match title.find(term.as_str()) {
                Some(pos) => first_pos = first_pos.min(pos),
                None if author.contains(term.as_str()) => in_title = false,
                None => continue 'threads,
            }
        }
        ranked.push((
            RankKey {
                in_title,
                prefix: first_pos == 0,
                match_pos: first_pos,
                title_len: thread.title.chars().count(),
            },
            thread,
        ));
    }

    ranked.sort_by(|(a_rank, a), (b_rank, b)| {
        a_rank
            .cmp_better(*b_rank)
            .then_with(|| b.created.cmp(&a.created))
    });
    ranked.truncate(limit);
    ranked.into_iter().map(|(_, t)| t).collect()
}
