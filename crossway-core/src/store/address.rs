//! Prefix word search over the network's addresses

use hashbrown::HashMap;

use crate::model::{Address, OsmKind};

/// Searchable address with its lowercase words
#[derive(Debug)]
struct Entry {
    address: Address,
    words: Vec<String>,
}

/// Addresses ordered by kind and OSM id, searchable by words
#[derive(Debug, Default)]
pub struct AddressIndex {
    entries: Vec<Entry>,
    by_id: HashMap<(OsmKind, i64), usize>,
}

impl AddressIndex {
    pub fn new(mut addresses: Vec<Address>) -> Self {
        addresses.sort_by_key(|a| (a.kind, a.osm_id));
        addresses.dedup_by_key(|a| (a.kind, a.osm_id));

        let entries: Vec<Entry> = addresses
            .into_iter()
            .map(|address| Entry {
                words: address.fields().flat_map(tokenize).collect(),
                address,
            })
            .collect();
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| ((entry.address.kind, entry.address.osm_id), idx))
            .collect();

        Self { entries, by_id }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Addresses containing every word of `query`. The last query word also
    /// matches as a prefix, so results narrow while the query is typed.
    /// Punctuation separates words and matching ignores case. A query without
    /// words matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Address> {
        let terms = tokenize(query);
        let Some((last, complete)) = terms.split_last() else {
            return Vec::new();
        };

        self.entries
            .iter()
            .filter(|entry| {
                complete.iter().all(|term| entry.words.contains(term))
                    && entry.words.iter().any(|word| word.starts_with(last.as_str()))
            })
            .take(limit)
            .map(|entry| entry.address.clone())
            .collect()
    }

    /// Node addresses take precedence over way addresses sharing the id
    pub fn locate(&self, osm_id: i64) -> Option<&Address> {
        [OsmKind::Node, OsmKind::Way]
            .into_iter()
            .find_map(|kind| self.by_id.get(&(kind, osm_id)))
            .map(|&idx| &self.entries[idx].address)
    }
}

/// Lowercase words; anything but letters, digits, `-` and `.` separates them
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '.'))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}
