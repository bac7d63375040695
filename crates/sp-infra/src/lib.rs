pub mod net;
pub mod random;
pub mod storage;
pub mod system;
pub mod time;

pub use net::HttpMediaFetcher;
pub use random::{SeededRandomSource, ThreadRandomSource};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use system::SysinfoMemoryProbe;
pub use time::SystemClock;
