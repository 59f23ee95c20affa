//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing the whole collection of entities.
#[derive(Clone, Copy, Debug)]
pub struct All;
