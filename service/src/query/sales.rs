//! [`Query`] collection related to the multiple [`Sale`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Sale, Query};

use super::DatabaseQuery;

/// Queries a list of [`Sale`]s, most recently concluded first.
pub type List =
    DatabaseQuery<By<read::sale::list::Page, read::sale::list::Selector>>;
