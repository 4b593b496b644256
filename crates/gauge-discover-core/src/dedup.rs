use std::collections::HashSet;
use std::hash::Hash;

/// Drop repeated values, keeping the first occurrence of each in order
pub fn deduplicate<T>(items: Vec<T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_keeps_first_occurrence_order() {
        let input = vec!["a", "b", "a", "c", "b"];
        assert_eq!(deduplicate(input), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_and_unique_inputs() {
        assert!(deduplicate(Vec::<String>::new()).is_empty());
        assert_eq!(deduplicate(vec![3, 1, 2]), vec![3, 1, 2]);
    }

    #[test]
    fn test_paths_compare_exactly() {
        let input = vec![
            PathBuf::from("/p/concepts/a.cpt"),
            PathBuf::from("/p/concepts/b.cpt"),
            PathBuf::from("/p/concepts/a.cpt"),
        ];
        assert_eq!(
            deduplicate(input),
            vec![
                PathBuf::from("/p/concepts/a.cpt"),
                PathBuf::from("/p/concepts/b.cpt"),
            ]
        );
    }
}
