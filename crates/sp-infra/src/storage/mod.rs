//! Key-value stores standing in for the browser's `localStorage`.
//! 替代浏览器 `localStorage` 的键值存储。

mod file_store;
mod item_map;
mod memory_store;

pub use file_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;
