mod backend;
mod disk;
mod blob;
mod errors;

pub use backend::{PhotoSource, PhotoStore};
pub use disk::DiskStore;
pub use blob::BlobStore;
pub use errors::*;
