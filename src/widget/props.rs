//! List configuration: The parameters an [`AsyncList`](super::AsyncList) is built from.

use std::fmt::{self, Display};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::error::SourceError;
use crate::markup::Node;
use crate::ordering::SortKey;

/// Per-item render function.
pub type ItemTemplate<T> = Arc<dyn Fn(&T) -> Node + Send + Sync>;

/// Fallback template: the item's display string as text.
pub fn display_template<T: Display>(item: &T) -> Node {
    Node::text(item.to_string())
}

/// An asynchronous, possibly infinite, sequence of items.
///
/// Consumed once. Elements may fail; a failure ends consumption and is
/// reported through the consumption task.
pub struct ItemSource<T> {
    inner: BoxStream<'static, Result<T, SourceError>>,
}

impl<T: Send + 'static> ItemSource<T> {
    /// Wrap a stream that cannot fail.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        Self {
            inner: stream.map(Ok).boxed(),
        }
    }

    /// Wrap a stream of results.
    pub fn from_try_stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<T, E>> + Send + 'static,
        E: Into<SourceError>,
    {
        Self {
            inner: stream.map(|item| item.map_err(Into::into)).boxed(),
        }
    }

    /// A source that yields the given items and ends.
    pub fn iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::from_stream(stream::iter(items))
    }
}

impl<T> Stream for ItemSource<T> {
    type Item = Result<T, SourceError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl<T> fmt::Debug for ItemSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemSource(..)")
    }
}

/// Markup options for a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// Tag wrapping each item.
    pub element: String,
    /// Tag wrapping the whole list.
    pub container: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            element: "div".to_string(),
            container: "div".to_string(),
        }
    }
}

/// Parameters of an [`AsyncList`](super::AsyncList).
///
/// Nothing is validated here. Conflicting sort keys and bad tags are
/// reported each time the list renders.
pub struct AsyncListProps<T> {
    pub(crate) items: ItemSource<T>,
    pub(crate) item_template: Option<ItemTemplate<T>>,
    pub(crate) fallback_template: ItemTemplate<T>,
    pub(crate) cancellation_token: Option<CancellationToken>,
    pub(crate) config: ListConfig,
    pub(crate) order_by: Option<SortKey<T>>,
    pub(crate) order_by_descending: Option<SortKey<T>>,
}

impl<T: Display + 'static> AsyncListProps<T> {
    /// Props for items rendered through their `Display` output unless a
    /// template is set.
    pub fn new(items: ItemSource<T>) -> Self {
        Self::with_fallback(items, Arc::new(display_template::<T>))
    }
}

impl<T: 'static> AsyncListProps<T> {
    /// Props for items of any type, rendered with `template`.
    pub fn templated<F>(items: ItemSource<T>, template: F) -> Self
    where
        F: Fn(&T) -> Node + Send + Sync + 'static,
    {
        let template: ItemTemplate<T> = Arc::new(template);
        let mut props = Self::with_fallback(items, template.clone());
        props.item_template = Some(template);
        props
    }

    fn with_fallback(items: ItemSource<T>, fallback_template: ItemTemplate<T>) -> Self {
        Self {
            items,
            item_template: None,
            fallback_template,
            cancellation_token: None,
            config: ListConfig::default(),
            order_by: None,
            order_by_descending: None,
        }
    }

    /// Set the per-item template.
    #[must_use]
    pub fn item_template<F>(mut self, template: F) -> Self
    where
        F: Fn(&T) -> Node + Send + Sync + 'static,
    {
        self.item_template = Some(Arc::new(template));
        self
    }

    /// Link an external cancellation token.
    #[must_use]
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Set the tag wrapping each item.
    #[must_use]
    pub fn element(mut self, tag: impl Into<String>) -> Self {
        self.config.element = tag.into();
        self
    }

    /// Set the tag wrapping the whole list.
    #[must_use]
    pub fn container(mut self, tag: impl Into<String>) -> Self {
        self.config.container = tag.into();
        self
    }

    /// Replace the markup options.
    #[must_use]
    pub fn config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    /// Display items in ascending order of `key`.
    #[must_use]
    pub fn order_by<K, F>(mut self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.order_by = Some(SortKey::new(key));
        self
    }

    /// Display items in descending order of `key`.
    #[must_use]
    pub fn order_by_descending<K, F>(mut self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.order_by_descending = Some(SortKey::new(key));
        self
    }
}

impl<T> fmt::Debug for AsyncListProps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncListProps")
            .field("item_template", &self.item_template.is_some())
            .field("cancellation_token", &self.cancellation_token.is_some())
            .field("config", &self.config)
            .field("order_by", &self.order_by.is_some())
            .field("order_by_descending", &self.order_by_descending.is_some())
            .finish_non_exhaustive()
    }
}
