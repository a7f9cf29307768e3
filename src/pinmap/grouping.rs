//! Generic group-and-sort engine used to cluster pins that can share one
//! generated initialization call.

/// Partition `items` into groups of equal key, then order the groups
/// deterministically.
///
/// Keys compare by value equality. Within a group, member order is the input
/// order (stable partition). Groups are sorted by the canonicalized key
/// produced by `canon` — callers map absent (`None`) key components to zero
/// there — and on equal canonicalized keys the tie is broken by comparing the
/// member lists themselves, so even two distinct keys that canonicalize
/// identically order reproducibly across runs.
pub fn group_sorted<T, K, C>(
    items: impl IntoIterator<Item = T>,
    key_of: impl Fn(&T) -> K,
    canon: impl Fn(&K) -> C,
) -> Vec<(K, Vec<T>)>
where
    T: Ord,
    K: PartialEq,
    C: Ord,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let key = key_of(&item);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(item),
            None => groups.push((key, vec![item])),
        }
    }
    groups.sort_by(|(ka, ma), (kb, mb)| canon(ka).cmp(&canon(kb)).then_with(|| ma.cmp(mb)));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_by_key_equality_and_keeps_input_order() {
        let items = vec![("a", 1), ("b", 2), ("a", 3), ("b", 4)];
        let groups = group_sorted(items, |(k, _)| *k, |k| *k);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], ("a", vec![("a", 1), ("a", 3)]));
        assert_eq!(groups[1], ("b", vec![("b", 2), ("b", 4)]));
    }

    #[test]
    fn absent_components_canonicalize_to_zero() {
        // Some(0) and None canonicalize identically but stay distinct groups.
        let items: Vec<(Option<u32>, &str)> =
            vec![(Some(1), "fast"), (None, "absent"), (Some(0), "zero")];
        let groups = group_sorted(items, |(speed, _)| *speed, |speed| speed.unwrap_or(0));
        assert_eq!(groups.len(), 3);
        // The two zero-canonical groups come first, ordered by member lists
        // (None < Some(0) inside the members), then the explicit 1.
        assert_eq!(groups[0].0, None);
        assert_eq!(groups[1].0, Some(0));
        assert_eq!(groups[2].0, Some(1));
    }

    #[test]
    fn group_order_is_reproducible_regardless_of_input_order() {
        let forward: Vec<(Option<u32>, u8)> = vec![(None, 1), (Some(0), 2)];
        let reverse: Vec<(Option<u32>, u8)> = vec![(Some(0), 2), (None, 1)];
        let key = |(speed, _): &(Option<u32>, u8)| *speed;
        let canon = |speed: &Option<u32>| speed.unwrap_or(0);
        let a: Vec<Option<u32>> = group_sorted(forward, key, canon)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        let b: Vec<Option<u32>> = group_sorted(reverse, key, canon)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(a, b);
    }
}
