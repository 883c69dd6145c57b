//! Status-code keyed image store
//!
//! Maps a three digit status code to the bytes of its illustration. The
//! on-disk store keeps one `<key>.jpg` file per entry in a flat directory;
//! the directory listing is the only index.

mod error;
mod file_store;
mod key;
mod memory_store;
mod store;

pub use error::{Result, StoreError};
pub use file_store::FileImageStore;
pub use key::StatusKey;
pub use memory_store::MemoryImageStore;
pub use store::ImageStore;
