//! [`Installment`]-related read definitions.

use crate::domain::{client, installment};
#[cfg(doc)]
use crate::domain::{Client, Installment, Notification, Sale};

/// [`Installment`] of an active [`Sale`], joined with the [`Client`] paying
/// it, as scanned by the [`Notification`] reconciliation.
#[derive(Clone, Debug)]
pub struct Due {
    /// ID of the [`Installment`].
    pub installment_id: installment::Id,

    /// [`Date`] the [`Installment`] is due on.
    ///
    /// [`Date`]: common::Date
    pub expected_at: installment::DueDate,

    /// [`Name`] of the [`Client`] paying the [`Installment`].
    ///
    /// [`Name`]: client::Name
    pub client_name: client::Name,

    /// [`Curp`] of the [`Client`] paying the [`Installment`].
    ///
    /// [`Curp`]: client::Curp
    pub client_curp: client::Curp,
}

impl Due {
    /// Renders the buyer reference mentioned in [`Notification`] texts.
    #[must_use]
    pub fn buyer(&self) -> String {
        format!("{} - {}", self.client_name, self.client_curp)
    }
}

pub mod list {
    //! [`Installment`]s list definitions.

    use common::define_pagination;

    use crate::domain::{installment, sale};
    #[cfg(doc)]
    use crate::domain::{Installment, Sale};

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = installment::Installment;

    /// Filter for [`Selector`]: ID of the [`Sale`] to list [`Installment`]s
    /// of.
    pub type Filter = sale::Id;
}
