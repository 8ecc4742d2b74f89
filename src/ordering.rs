//! Ordering policy: Display order computed from accumulated state.
//!
//! The policy is a pure projection. It borrows the accumulated items and
//! returns references in display order, leaving the arrival order of the
//! underlying state untouched. It is evaluated on every render and never
//! cached, so it always reflects the latest state.
//!
//! Sorting is stable in both directions: items with equal keys keep their
//! arrival order, which keeps repeated renders of the same state identical.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{ListError, ListResult};

type Comparator<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;

/// A sort key selector over items of type `T`.
///
/// Wraps any `Fn(&T) -> K` where `K: Ord`, erasing the key type so that
/// ascending and descending selectors with different key types can sit in
/// the same configuration.
pub struct SortKey<T> {
    compare: Arc<Comparator<T>>,
}

impl<T> SortKey<T> {
    /// Create a sort key from a key selector.
    pub fn new<K, F>(selector: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(move |a, b| selector(a).cmp(&selector(b))),
        }
    }

    /// Create a sort key from a comparator.
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
        }
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SortKey(..)")
    }
}

/// Which ordering a policy resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    /// Arrival order.
    Arrival,
    /// Stable ascending by key.
    Ascending,
    /// Stable descending by key.
    Descending,
    /// Both directions configured. Every evaluation is rejected.
    Conflicting,
}

/// Ordering configuration for a list view.
pub struct OrderingPolicy<T> {
    ascending: Option<SortKey<T>>,
    descending: Option<SortKey<T>>,
}

impl<T> OrderingPolicy<T> {
    /// Create a policy from optional ascending and descending keys.
    ///
    /// Supplying both is accepted here and rejected at evaluation time.
    pub const fn new(ascending: Option<SortKey<T>>, descending: Option<SortKey<T>>) -> Self {
        Self {
            ascending,
            descending,
        }
    }

    /// Arrival order.
    pub const fn arrival() -> Self {
        Self::new(None, None)
    }

    /// Resolve the configured mode.
    pub const fn mode(&self) -> OrderMode {
        match (&self.ascending, &self.descending) {
            (None, None) => OrderMode::Arrival,
            (Some(_), None) => OrderMode::Ascending,
            (None, Some(_)) => OrderMode::Descending,
            (Some(_), Some(_)) => OrderMode::Conflicting,
        }
    }

    /// Compute the display order of `state`.
    pub fn view<'a>(&self, state: &'a [T]) -> ListResult<Vec<&'a T>> {
        let mut ordered: Vec<&T> = state.iter().collect();
        match (&self.ascending, &self.descending) {
            (None, None) => {}
            (Some(key), None) => ordered.sort_by(|a, b| key.compare(a, b)),
            // Reversed comparator rather than reversing the sorted output,
            // so ties keep arrival order.
            (None, Some(key)) => ordered.sort_by(|a, b| key.compare(b, a)),
            (Some(_), Some(_)) => return Err(ListError::ConflictingOrder),
        }
        Ok(ordered)
    }
}

impl<T> Default for OrderingPolicy<T> {
    fn default() -> Self {
        Self::arrival()
    }
}

impl<T> Clone for OrderingPolicy<T> {
    fn clone(&self) -> Self {
        Self::new(self.ascending.clone(), self.descending.clone())
    }
}

impl<T> fmt::Debug for OrderingPolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderingPolicy")
            .field("mode", &self.mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(view: &[&T]) -> Vec<T> {
        view.iter().map(|v| **v).collect()
    }

    #[test]
    fn test_arrival_order() {
        let policy = OrderingPolicy::<i32>::arrival();
        let state = [3, 1, 2];
        assert_eq!(values(&policy.view(&state).unwrap()), vec![3, 1, 2]);
        assert_eq!(policy.mode(), OrderMode::Arrival);
    }

    #[test]
    fn test_ascending_and_descending() {
        let state = [3, 1, 2];

        let asc = OrderingPolicy::new(Some(SortKey::new(|v: &i32| *v)), None);
        assert_eq!(values(&asc.view(&state).unwrap()), vec![1, 2, 3]);

        let desc = OrderingPolicy::new(None, Some(SortKey::new(|v: &i32| *v)));
        assert_eq!(values(&desc.view(&state).unwrap()), vec![3, 2, 1]);

        // State itself is untouched
        assert_eq!(state, [3, 1, 2]);
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let state = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (2, 'e')];

        let asc = OrderingPolicy::new(Some(SortKey::new(|v: &(i32, char)| v.0)), None);
        let tags: Vec<char> = asc.view(&state).unwrap().iter().map(|v| v.1).collect();
        assert_eq!(tags, vec!['b', 'd', 'a', 'c', 'e']);

        let desc = OrderingPolicy::new(None, Some(SortKey::new(|v: &(i32, char)| v.0)));
        let tags: Vec<char> = desc.view(&state).unwrap().iter().map(|v| v.1).collect();
        assert_eq!(tags, vec!['e', 'a', 'c', 'b', 'd']);
    }

    #[test]
    fn test_conflicting_rejected_every_time() {
        let policy = OrderingPolicy::new(
            Some(SortKey::new(|v: &i32| *v)),
            Some(SortKey::new(|v: &i32| -v)),
        );
        assert_eq!(policy.mode(), OrderMode::Conflicting);
        for _ in 0..3 {
            assert!(matches!(policy.view(&[1, 2]), Err(ListError::ConflictingOrder)));
        }
        assert!(matches!(policy.view(&[]), Err(ListError::ConflictingOrder)));
    }

    #[test]
    fn test_sort_key_by_comparator() {
        let policy = OrderingPolicy::new(
            Some(SortKey::by(|a: &f64, b: &f64| a.total_cmp(b))),
            None,
        );
        let state = [2.5, -1.0, 0.0];
        assert_eq!(values(&policy.view(&state).unwrap()), vec![-1.0, 0.0, 2.5]);
    }

    #[test]
    fn test_key_on_derived_field() {
        let state = vec!["ccc".to_string(), "a".to_string(), "bb".to_string()];
        let policy = OrderingPolicy::new(None, Some(SortKey::new(String::len)));
        let view = policy.view(&state).unwrap();
        assert_eq!(view, vec!["ccc", "bb", "a"]);
    }
}
