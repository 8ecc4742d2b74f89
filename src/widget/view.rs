//! List view: Accumulated items plus everything needed to render them.

use parking_lot::RwLock;

use super::props::{ItemTemplate, ListConfig};
use super::traits::Component;
use crate::error::{ListError, ListResult};
use crate::markup::{is_valid_tag, Node};
use crate::ordering::{OrderMode, OrderingPolicy};

/// The mounted part of an [`AsyncList`](super::AsyncList).
///
/// Items are appended only by the consumption task and read only by
/// renders. The consumer waits for each render before appending again, so
/// the lock is never contended in practice; it exists because the two run
/// on different threads.
pub struct ListView<T> {
    items: RwLock<Vec<T>>,
    template: ItemTemplate<T>,
    ordering: OrderingPolicy<T>,
    config: ListConfig,
}

impl<T> ListView<T> {
    /// Create an empty view.
    pub fn new(template: ItemTemplate<T>, ordering: OrderingPolicy<T>, config: ListConfig) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            template,
            ordering,
            config,
        }
    }

    /// Drop all accumulated items.
    pub fn reset(&self) {
        self.items.write().clear();
    }

    /// Append an item and return the new length.
    pub fn append(&self, item: T) -> usize {
        let mut items = self.items.write();
        items.push(item);
        items.len()
    }

    /// Number of accumulated items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether no items have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Resolved ordering mode.
    pub const fn order_mode(&self) -> OrderMode {
        self.ordering.mode()
    }

    /// Markup options.
    pub const fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Build the list tree: a container holding one wrapper per item in
    /// display order.
    pub fn build(&self) -> ListResult<Node> {
        for tag in [&self.config.container, &self.config.element] {
            if !is_valid_tag(tag) {
                return Err(ListError::InvalidElement { tag: tag.clone() });
            }
        }

        let items = self.items.read();
        let ordered = self.ordering.view(&items)?;
        let children = ordered
            .into_iter()
            .map(|item| Node::element(self.config.element.as_str(), vec![(self.template)(item)]))
            .collect();

        Ok(Node::element(self.config.container.as_str(), children))
    }
}

impl<T: Clone> ListView<T> {
    /// Copy of the accumulated items in arrival order.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T: Send + Sync> Component for ListView<T> {
    fn render(&self) -> ListResult<Node> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::SortKey;
    use crate::widget::props::display_template;
    use std::sync::Arc;

    fn view(ordering: OrderingPolicy<i32>) -> ListView<i32> {
        let view = ListView::new(Arc::new(display_template::<i32>), ordering, ListConfig::default());
        for item in [3, 1, 2] {
            view.append(item);
        }
        view
    }

    fn texts(tree: &Node) -> Vec<String> {
        tree.children().iter().map(Node::text_content).collect()
    }

    #[test]
    fn test_build_in_arrival_order() {
        let view = view(OrderingPolicy::arrival());
        let tree = view.build().unwrap();
        assert_eq!(tree.to_markup(), "<div><div>3</div><div>1</div><div>2</div></div>");
    }

    #[test]
    fn test_build_sorted_leaves_state() {
        let view = view(OrderingPolicy::new(Some(SortKey::new(|v: &i32| *v)), None));
        assert_eq!(texts(&view.build().unwrap()), vec!["1", "2", "3"]);
        assert_eq!(view.snapshot(), vec![3, 1, 2]);

        // Evaluated again after an append, not cached
        view.append(0);
        assert_eq!(texts(&view.build().unwrap()), vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_build_conflicting_order_fails() {
        let view = view(OrderingPolicy::new(
            Some(SortKey::new(|v: &i32| *v)),
            Some(SortKey::new(|v: &i32| *v)),
        ));
        assert!(matches!(view.build(), Err(ListError::ConflictingOrder)));
        assert!(matches!(view.render(), Err(ListError::ConflictingOrder)));
    }

    #[test]
    fn test_build_custom_tags() {
        let config = ListConfig {
            element: "li".into(),
            container: "ul".into(),
        };
        let view = ListView::new(
            Arc::new(|v: &i32| Node::text(format!("n={v}"))),
            OrderingPolicy::arrival(),
            config,
        );
        view.append(5);
        assert_eq!(view.build().unwrap().to_markup(), "<ul><li>n=5</li></ul>");
    }

    #[test]
    fn test_build_invalid_tag() {
        let config = ListConfig {
            element: String::new(),
            ..ListConfig::default()
        };
        let view = ListView::new(Arc::new(display_template::<i32>), OrderingPolicy::arrival(), config);
        assert!(matches!(view.build(), Err(ListError::InvalidElement { .. })));
    }

    #[test]
    fn test_reset_empties() {
        let view = view(OrderingPolicy::arrival());
        assert_eq!(view.len(), 3);
        view.reset();
        assert!(view.is_empty());
        assert_eq!(view.build().unwrap().children().len(), 0);
    }
}
