//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity availability.
#[derive(Clone, Copy, Debug)]
pub struct Availability;
