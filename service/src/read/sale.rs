//! [`Sale`]-related read definitions.

#[cfg(doc)]
use crate::domain::Sale;

/// Wrapper around a [`Sale`] indicating that it hasn't been called off
/// (its status is not [`Status::Cancelled`]).
///
/// [`Status::Cancelled`]: crate::domain::sale::Status::Cancelled
#[derive(Clone, Copy, Debug)]
pub struct Active<T>(pub T);

pub mod list {
    //! [`Sale`]s list definitions.

    use common::define_pagination;

    use crate::domain::sale;
    #[cfg(doc)]
    use crate::domain::Sale;

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = sale::Sale;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`sale::Status`] to select [`Sale`]s with only.
        pub status: Option<sale::Status>,
    }
}
