//! One module per backend resource collection. Every list goes through the
//! list cache, every mutation invalidates its resource's list on success.

pub mod branch;
pub mod department;
pub mod permission;
pub mod report;
pub mod role;
pub mod user;
