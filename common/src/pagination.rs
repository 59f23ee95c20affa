//! Abstractions for offset-based pagination.

use derive_more::{From, Into};

/// A [`Page`] of nodes selected from a larger collection.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Nodes on this [`Page`].
    pub items: Vec<I>,

    /// Total number of nodes in the whole collection, disregarding the
    /// [`Arguments`] this [`Page`] was selected with.
    pub total: TotalCount,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] from the provided nodes.
    #[must_use]
    pub fn new(
        items: impl IntoIterator<Item = impl Into<I>>,
        total: TotalCount,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect::<Vec<_>>(),
            total,
        }
    }

    /// Creates an empty [`Page`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: TotalCount(0),
        }
    }
}

/// Total count of nodes in a collection.
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
pub struct TotalCount(i64);

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested [`Page`].
    page: usize,

    /// Number of nodes per [`Page`].
    size: usize,
}

impl Arguments {
    /// Creates new [`Arguments`], falling back to the first page and the
    /// provided default size when the corresponding argument is absent.
    ///
    /// Returns [`None`] if the page number or the page size is not a positive
    /// integer.
    pub fn new<Num>(
        page: Option<Num>,
        size: Option<Num>,
        default_size: usize,
    ) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        let page = match page {
            Some(num) => num.try_into().ok()?,
            None => 1,
        };
        let size = match size {
            Some(num) => num.try_into().ok()?,
            None => default_size,
        };

        (page >= 1 && size >= 1).then_some(Self { page, size })
    }

    /// Returns the number of nodes to skip before this [`Page`].
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.size
    }

    /// Returns the maximum number of nodes on this [`Page`].
    #[must_use]
    pub fn limit(&self) -> usize {
        self.size
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;

        #[doc = "Total count of [`$node`]s."]
        pub type TotalCount = $crate::pagination::TotalCount;
    };
}

#[cfg(test)]
mod spec {
    use super::Arguments;

    #[test]
    fn defaults_to_first_page() {
        let args = Arguments::new(None::<i32>, None, 20).unwrap();

        assert_eq!(args.offset(), 0);
        assert_eq!(args.limit(), 20);
    }

    #[test]
    fn computes_offset_from_page_number() {
        let args = Arguments::new(Some(3), Some(25), 20).unwrap();

        assert_eq!(args.offset(), 50);
        assert_eq!(args.limit(), 25);
    }

    #[test]
    fn rejects_non_positive_arguments() {
        assert_eq!(Arguments::new(Some(0), Some(20), 20), None);
        assert_eq!(Arguments::new(Some(1), Some(0), 20), None);
        assert_eq!(Arguments::new(Some(-1), Some(20), 20), None);
        assert_eq!(Arguments::new(Some(1), Some(-5), 20), None);
    }
}
