//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod enquiry_repo;
pub mod hero_repo;
pub mod piano_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use enquiry_repo::{ChatLeadRepo, ContactMessageRepo};
pub use hero_repo::HeroBannerRepo;
pub use piano_repo::PianoRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
