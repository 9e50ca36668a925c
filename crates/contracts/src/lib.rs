//! Wire contracts shared between the dashboard frontend and the REST backend.

pub mod domain;
pub mod shared;
pub mod system;
