//! Multi-step operations that span more than one collection

pub mod delete_user;
