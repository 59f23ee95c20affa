//! [`Query`] collection related to a single [`Notification`].

use common::operations::By;

use crate::domain::{installment, notification, Notification};
#[cfg(doc)]
use crate::{domain::Installment, Query};

use super::DatabaseQuery;

/// Queries a [`Notification`] by its [`notification::Id`].
pub type ById = DatabaseQuery<By<Option<Notification>, notification::Id>>;

/// Queries the [`Notification`] of an [`Installment`], if any.
pub type ByInstallment =
    DatabaseQuery<By<Option<Notification>, installment::Id>>;
