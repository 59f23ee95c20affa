//! [`Query`] collection related to the multiple [`Installment`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{
    domain::{Installment, Notification, Sale},
    Query,
};

use super::DatabaseQuery;

/// Queries a list of [`Installment`]s of a [`Sale`], ordered by their
/// number.
pub type List = DatabaseQuery<
    By<read::installment::list::Page, read::installment::list::Selector>,
>;

/// Queries [`Installment`]s of all active [`Sale`]s, joined with their
/// buyers, for the [`Notification`] reconciliation.
pub type Due = DatabaseQuery<By<Vec<read::installment::Due>, ()>>;
