mod memory_probe;

pub use memory_probe::SysinfoMemoryProbe;
