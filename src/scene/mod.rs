//! Boundary scene model: roles, selections, transforms, projected elements and the persisted
//! composition record.

pub(crate) mod element;
pub(crate) mod record;
pub(crate) mod role;
pub(crate) mod selection;
pub(crate) mod transform;
