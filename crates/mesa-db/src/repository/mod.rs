//! # Repositories
//!
//! One repository per collection. Mutators that cross dashboard
//! boundaries (stock, points, status) are single-statement atomic
//! operations; nothing here does read-modify-write.

pub mod account;
pub mod menu;
pub mod reservation;
