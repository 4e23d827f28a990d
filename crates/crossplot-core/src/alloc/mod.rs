//! Hash collections backed by AHash.
//!
//! Used for name lookups only. Iteration order is unspecified, so nothing
//! that reaches a listener or a view may iterate these.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        let mut names: HashMap<String, u32> = HashMap::new();
        names.insert("dd".to_string(), 0);
        names.entry("dd".to_string()).or_insert(7);
        assert_eq!(names.get("dd"), Some(&0));
        assert!(!HashSet::<u32>::new().contains(&0));
    }
}
