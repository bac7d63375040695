//! Port interfaces for the application layer
//!
//! Ports define the contract between the services in `sp-app` and the
//! adapters in `sp-infra`. The services never touch storage, the network,
//! the system clock or an RNG directly; every one of those goes through a
//! trait defined here so tests can swap in deterministic fakes.

mod clock;
pub mod errors;
mod key_value_store;
mod media_fetcher;
mod memory;
mod random;

pub use clock::*;
pub use errors::{FetchError, StorageError};
pub use key_value_store::KeyValueStorePort;
pub use media_fetcher::MediaFetcherPort;
pub use memory::MemoryProbePort;
pub use random::RandomSourcePort;
