//! Sequence counter: picks the next day/post identifier from the question
//! slides already on disk.
//!
//! The directory listing is the only state. Two runs started at the same
//! time can pick the same identifier; this is meant for one operator
//! generating posts by hand.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::debug;

use crate::errors::AppError;
use crate::models::SequenceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPolicy {
    /// `day_<d>.png`, one post per day.
    SinglePost,
    /// `day_<d>_post_<p>.png`, two posts per day.
    TwoPosts,
}

impl CounterPolicy {
    pub fn from_posts_per_day(posts: u8) -> Option<Self> {
        match posts {
            1 => Some(CounterPolicy::SinglePost),
            2 => Some(CounterPolicy::TwoPosts),
            _ => None,
        }
    }
}

/// Next identifier given the file names already present.
pub fn next_sequence<I, S>(policy: CounterPolicy, existing: I) -> SequenceId
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match policy {
        CounterPolicy::SinglePost => {
            let days = existing
                .into_iter()
                .filter(|name| parse_daily(name.as_ref()).is_some())
                .count();
            SequenceId::daily(days as u32 + 1)
        }
        CounterPolicy::TwoPosts => {
            let mut posts_by_day: BTreeMap<u32, BTreeSet<u8>> = BTreeMap::new();
            for name in existing {
                if let Some((day, post)) = parse_day_post(name.as_ref()) {
                    posts_by_day.entry(day).or_default().insert(post);
                }
            }

            match posts_by_day.iter().next_back() {
                None => SequenceId::with_post(1, 1),
                // Counts recorded posts; the numbers themselves are not checked.
                Some((&day, posts)) if posts.len() >= 2 => SequenceId::with_post(day + 1, 1),
                Some((&day, _)) => SequenceId::with_post(day, 2),
            }
        }
    }
}

/// File names in `dir`. A directory that does not exist yet is empty.
pub fn list_artifacts(dir: &Path) -> Result<Vec<String>, AppError> {
    let scan_err = |source| AppError::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "No artifact directory yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(scan_err(e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(scan_err)?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// `day_<d>.png`
fn parse_daily(name: &str) -> Option<u32> {
    name.strip_prefix("day_")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

/// `day_<d>_post_<p>.png`
fn parse_day_post(name: &str) -> Option<(u32, u8)> {
    let stem = name.strip_prefix("day_")?.strip_suffix(".png")?;
    let (day, post) = stem.split_once("_post_")?;
    Some((day.parse().ok()?, post.parse().ok()?))
}
