//! HTTP handlers for all web routes.

pub mod landing;
pub mod overview;
pub mod specific;
pub mod system;
