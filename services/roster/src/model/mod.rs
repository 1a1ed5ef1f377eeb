//! Roster data model module.
//!
//! # Purpose
//! Re-exports the employee and item records and the client-supplied drafts
//! used to create or replace them.
mod employee;
mod item;

pub use employee::{Employee, EmployeeDraft};
pub use item::{Item, ItemDraft};
