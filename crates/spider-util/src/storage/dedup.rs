//! Order-preserving de-duplication.

use std::collections::HashSet;
use std::hash::Hash;

/// Which occurrence of a duplicated value survives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeepOccurrence {
    #[default]
    First,
    Last,
}

/// Removes duplicates from `items` without reordering the survivors.
///
/// With `KeepOccurrence::Last`, each value stays at the position of its last
/// occurrence instead of its first.
pub fn remove_duplicates_orderly<T: Eq + Hash>(items: Vec<T>, keep: KeepOccurrence) -> Vec<T> {
    let keep_mask: Vec<bool> = {
        let mut seen: HashSet<&T> = HashSet::with_capacity(items.len());
        match keep {
            KeepOccurrence::First => items.iter().map(|item| seen.insert(item)).collect(),
            KeepOccurrence::Last => {
                let mut mask: Vec<bool> = items.iter().rev().map(|item| seen.insert(item)).collect();
                mask.reverse();
                mask
            }
        }
    };

    items
        .into_iter()
        .zip(keep_mask)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrence() {
        let v = vec![3, 1, 3, 2, 1, 4];
        assert_eq!(remove_duplicates_orderly(v, KeepOccurrence::First), vec![3, 1, 2, 4]);
    }

    #[test]
    fn keeps_last_occurrence() {
        let v = vec![3, 1, 3, 2, 1, 4];
        assert_eq!(remove_duplicates_orderly(v, KeepOccurrence::Last), vec![3, 2, 1, 4]);
    }

    #[test]
    fn no_duplicates_is_unchanged() {
        let v = vec!["b", "a", "c"];
        assert_eq!(
            remove_duplicates_orderly(v.clone(), KeepOccurrence::Last),
            v
        );
        assert!(remove_duplicates_orderly(Vec::<u8>::new(), KeepOccurrence::First).is_empty());
    }

    #[test]
    fn works_with_owned_strings() {
        let urls: Vec<String> = ["/a", "/b", "/a", "/c", "/b"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            remove_duplicates_orderly(urls, KeepOccurrence::First),
            vec!["/a", "/b", "/c"]
        );
    }
}
