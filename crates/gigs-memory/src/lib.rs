//! In-memory referencing implementation.
//!
//! A deliberately small implementation of every factory trait of
//! `gigs-types`. The harness tests use it as the library under test, and
//! integrators can use it to check their harness wiring before pointing the
//! harness at a real referencing library.

pub mod authority;
pub mod factory;
pub mod objects;

pub use authority::MemoryAuthority;
pub use factory::MemoryFactory;
pub use objects::Identification;
