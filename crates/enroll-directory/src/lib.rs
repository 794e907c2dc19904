//! Student directory: the record store behind the registration and list
//! views. The trait is the seam; the in-memory implementation stands in
//! for a real backend and is constructor-injected wherever it is used.

pub mod memory;
pub mod traits;

pub use memory::InMemoryDirectory;
pub use traits::StudentDirectory;
