use sp_core::ports::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaCacheError {
    #[error("failed to encode cache entry: {0}")]
    Encoding(String),

    #[error("entry of {size} bytes exceeds cache capacity of {capacity} bytes")]
    EntryTooLarge { size: usize, capacity: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
