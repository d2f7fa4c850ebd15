use crate::index::RowKeyMap;

/// Pair-level classification of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    /// Key only in the next sheet.
    Added,
    /// Key only in the previous sheet.
    Removed,
    /// Key in both sheets; candidate for cell comparison.
    Present,
}

/// Classify the key union of a sheet pair.
///
/// Iteration order is prev keys first (in prev order), then keys only in next
/// (in next order), with no repeats — the stable order the rest of the
/// pipeline reports in.
pub fn classify(prev: &RowKeyMap, next: &RowKeyMap) -> Vec<(String, RowClass)> {
    let mut out = Vec::with_capacity(prev.len() + next.len());
    for key in prev.keys() {
        let class = if next.contains_key(key) {
            RowClass::Present
        } else {
            RowClass::Removed
        };
        out.push((key.to_string(), class));
    }
    for key in next.keys() {
        if !prev.contains_key(key) {
            out.push((key.to_string(), RowClass::Added));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(keys: &[&str]) -> RowKeyMap {
        let mut m = RowKeyMap::new();
        for k in keys {
            m.insert(k.to_string(), vec![]);
        }
        m
    }

    #[test]
    fn partitions_union_of_keys() {
        let prev = map(&["k1", "k2"]);
        let next = map(&["k1", "k3"]);
        let classes = classify(&prev, &next);
        assert_eq!(
            classes,
            vec![
                ("k1".to_string(), RowClass::Present),
                ("k2".to_string(), RowClass::Removed),
                ("k3".to_string(), RowClass::Added),
            ]
        );
    }

    #[test]
    fn order_is_prev_first_then_next_only() {
        let prev = map(&["b", "a"]);
        let next = map(&["z", "a", "b"]);
        let keys: Vec<String> = classify(&prev, &next).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "z"]);
    }

    #[test]
    fn empty_prev_yields_all_added() {
        let prev = map(&[]);
        let next = map(&["k1", "k2"]);
        let classes = classify(&prev, &next);
        assert!(classes.iter().all(|(_, c)| *c == RowClass::Added));
        assert_eq!(classes.len(), 2);
    }

    #[test]
    fn empty_next_yields_all_removed() {
        let prev = map(&["k1", "k2"]);
        let next = map(&[]);
        let classes = classify(&prev, &next);
        assert!(classes.iter().all(|(_, c)| *c == RowClass::Removed));
    }

    #[test]
    fn identical_maps_yield_all_present() {
        let prev = map(&["k1", "k2"]);
        let next = map(&["k1", "k2"]);
        let classes = classify(&prev, &next);
        assert_eq!(classes.len(), 2);
        assert!(classes.iter().all(|(_, c)| *c == RowClass::Present));
    }
}
