//! [`Notification`]-related read definitions.

pub mod list {
    //! [`Notification`]s list definitions.

    use common::define_pagination;

    use crate::domain::notification;
    #[cfg(doc)]
    use crate::domain::Notification;

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = notification::Notification;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// Indicator whether only unread [`Notification`]s should be
        /// selected.
        pub unread_only: bool,

        /// Indicator whether the oldest [`Notification`]s should go first,
        /// instead of the default newest-first order.
        pub oldest_first: bool,
    }
}
