//! Domain logic for the piano storefront.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! repository layer, the HTTP API, and tests. Storage and identity are
//! reached only through the collaborator traits in [`store`] and [`access`].

pub mod access;
pub mod catalog;
pub mod enquiry;
pub mod error;
pub mod featured;
pub mod listing;
pub mod notify;
pub mod roles;
pub mod store;
pub mod types;
