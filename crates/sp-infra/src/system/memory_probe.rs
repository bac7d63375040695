//! Process memory sampling through `sysinfo`.
//! 通过 `sysinfo` 采样进程内存。

use std::sync::{Mutex, PoisonError};

use sp_core::ports::MemoryProbePort;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

/// Resident memory of the current process. Reads `0` if the platform
/// does not expose it.
pub struct SysinfoMemoryProbe {
    system: Mutex<System>,
    pid: Option<Pid>,
}

impl SysinfoMemoryProbe {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(err) => {
                debug!(error = %err, "current pid unavailable, memory usage will read 0");
                None
            }
        };
        Self {
            system: Mutex::new(System::new()),
            pid,
        }
    }
}

impl Default for SysinfoMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbePort for SysinfoMemoryProbe {
    fn used_bytes(&self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(pid).map(|p| p.memory()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_some_memory_for_current_process() {
        let probe = SysinfoMemoryProbe::new();
        // Best-effort: supported platforms report a non-zero resident size.
        if cfg!(any(target_os = "linux", target_os = "macos", target_os = "windows")) {
            assert!(probe.used_bytes() > 0);
        }
    }
}
