use std::collections::{HashMap, HashSet};

use crate::types::{CoOccurrencePair, InteractionRecord, Recommendation};

/// Immutable co-occurrence model produced by a single fit.
///
/// Items are kept in first-seen order and addressed by position. Pair counts
/// are keyed by a position pair ordered by item identifier, which is the
/// positional form of [`CoOccurrencePair`]. `rows` is the dense similarity
/// matrix derived from the pair counts; the diagonal is never read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoOccurrenceTable {
    items: Vec<String>,
    positions: HashMap<String, usize>,
    pairs: HashMap<(usize, usize), u64>,
    rows: Vec<Vec<u64>>,
    users: usize,
    interactions: usize,
}

impl CoOccurrenceTable {
    /// Build a table from scratch.
    ///
    /// Each user's items are taken in arrival order with duplicates kept, and
    /// every index pair `(i, j)` with `i < j` in that raw list bumps the pair
    /// count once. A repeated item therefore inflates its pairs with every
    /// other entry of the list and also records a self-pair.
    pub fn build(interactions: &[InteractionRecord]) -> Self {
        let mut items: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut histories: HashMap<&str, Vec<usize>> = HashMap::new();

        for record in interactions {
            let position = match positions.get(record.item_id.as_str()) {
                Some(&position) => position,
                None => {
                    let position = items.len();
                    items.push(record.item_id.clone());
                    positions.insert(record.item_id.clone(), position);
                    position
                }
            };
            histories
                .entry(record.user_id.as_str())
                .or_default()
                .push(position);
        }

        let mut pairs: HashMap<(usize, usize), u64> = HashMap::new();
        for history in histories.values() {
            for (offset, &left) in history.iter().enumerate() {
                for &right in &history[offset + 1..] {
                    *pairs.entry(pair_key(&items, left, right)).or_insert(0) += 1;
                }
            }
        }

        let mut rows = vec![vec![0u64; items.len()]; items.len()];
        for (&(a, b), &count) in &pairs {
            if a != b {
                rows[a][b] = count;
                rows[b][a] = count;
            }
        }

        Self {
            items,
            positions,
            pairs,
            rows,
            users: histories.len(),
            interactions: interactions.len(),
        }
    }

    /// Registered items in first-seen order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.positions.contains_key(item_id)
    }

    /// Number of stored (non-zero) pairs.
    pub fn pair_total(&self) -> usize {
        self.pairs.len()
    }

    pub fn users(&self) -> usize {
        self.users
    }

    pub fn interactions(&self) -> usize {
        self.interactions
    }

    /// Raw pair count, including self-pairs. Unknown items count 0.
    pub fn pair_count(&self, a: &str, b: &str) -> u64 {
        match (self.positions.get(a), self.positions.get(b)) {
            (Some(&a), Some(&b)) => self
                .pairs
                .get(&pair_key(&self.items, a, b))
                .copied()
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Similarity between two distinct known items; `None` otherwise.
    pub fn similarity(&self, a: &str, b: &str) -> Option<u64> {
        let a = *self.positions.get(a)?;
        let b = *self.positions.get(b)?;
        (a != b).then(|| self.rows[a][b])
    }

    /// Similarity row for a known item.
    pub fn row(&self, item_id: &str) -> Option<SimilarityRow<'_>> {
        let position = *self.positions.get(item_id)?;
        Some(SimilarityRow {
            table: self,
            position,
        })
    }

    /// Stored pairs in canonical form, sorted for stable output.
    pub fn pairs(&self) -> Vec<(CoOccurrencePair, u64)> {
        let mut pairs: Vec<(CoOccurrencePair, u64)> = self
            .pairs
            .iter()
            .map(|(&(a, b), &count)| {
                (
                    CoOccurrencePair::new(self.items[a].as_str(), self.items[b].as_str()),
                    count,
                )
            })
            .collect();
        pairs.sort();
        pairs
    }

    /// Rank unseen items against `history`.
    ///
    /// Every occurrence of a known history item adds its row into the running
    /// totals; candidates that appear anywhere in `history` are skipped and
    /// unknown entries are ignored. Candidates are collected in registration
    /// order and stably sorted by descending score, so ties resolve to the
    /// first-registered item.
    pub fn rank<S: AsRef<str>>(&self, history: &[S], n: usize) -> Vec<Recommendation> {
        if n == 0 || history.is_empty() {
            return Vec::new();
        }

        let consumed: HashSet<&str> = history.iter().map(AsRef::as_ref).collect();
        let mut totals: Vec<Option<u64>> = vec![None; self.items.len()];

        for entry in history {
            let Some(&source) = self.positions.get(entry.as_ref()) else {
                continue;
            };
            for (candidate, &count) in self.rows[source].iter().enumerate() {
                if candidate == source || consumed.contains(self.items[candidate].as_str()) {
                    continue;
                }
                *totals[candidate].get_or_insert(0) += count;
            }
        }

        let mut ranked: Vec<(usize, u64)> = totals
            .into_iter()
            .enumerate()
            .filter_map(|(position, total)| total.map(|score| (position, score)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);

        ranked
            .into_iter()
            .map(|(position, score)| Recommendation {
                item_id: self.items[position].clone(),
                score,
            })
            .collect()
    }
}

/// Per-item view over every other registered item and its co-occurrence count.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRow<'a> {
    table: &'a CoOccurrenceTable,
    position: usize,
}

impl<'a> SimilarityRow<'a> {
    pub fn item_id(&self) -> &'a str {
        &self.table.items[self.position]
    }

    /// Count against `other`; `None` for unknown items or the row's own item.
    pub fn get(&self, other: &str) -> Option<u64> {
        let other = *self.table.positions.get(other)?;
        (other != self.position).then(|| self.table.rows[self.position][other])
    }

    /// Number of entries (every registered item except this one).
    pub fn len(&self) -> usize {
        self.table.items.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in registration order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        let table = self.table;
        let position = self.position;
        table.rows[position]
            .iter()
            .enumerate()
            .filter(move |(other, _)| *other != position)
            .map(move |(other, &count)| (table.items[other].as_str(), count))
    }
}

fn pair_key(items: &[String], a: usize, b: usize) -> (usize, usize) {
    if items[a] <= items[b] {
        (a, b)
    } else {
        (b, a)
    }
}
