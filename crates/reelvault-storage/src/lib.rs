//! Object storage backends and storage-key generation.
//!
//! The [`ObjectStorage`] trait is the narrow contract the upload pipeline
//! depends on: put the full bytes of an object under a key, and derive the
//! public URL for a key. Two backends implement it: S3-compatible object
//! storage for videos and the local filesystem for thumbnails.
//!
//! **Key format:** keys are generated by [`keys::generate_object_key`]:
//! an optional prefix segment, 32 bytes of CSPRNG entropy encoded with the
//! URL-safe unpadded base64 alphabet, and an extension derived from the
//! declared media type.

mod keys;
mod local;
mod s3;
mod traits;

pub use keys::generate_object_key;
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
