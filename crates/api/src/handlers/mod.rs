pub mod auth;
pub mod enquiries;
pub mod featured;
pub mod pianos;
pub mod site;
