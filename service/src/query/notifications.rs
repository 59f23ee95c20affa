//! [`Query`] collection related to the multiple [`Notification`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Notification, Query};

use super::DatabaseQuery;

/// Queries a list of [`Notification`]s, most recent first.
pub type List = DatabaseQuery<
    By<read::notification::list::Page, read::notification::list::Selector>,
>;
