#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub phase_elapsed: Duration,
    pub total_elapsed: Duration,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    last_checkpoint: Instant,
    peak_memory_mb: u64,
}

/// 記錄每個階段 (上傳、等待作業、讀取結果) 的耗時與記憶體
#[cfg(feature = "cli")]
pub struct RunMonitor {
    state: Option<Mutex<MonitorState>>,
    pid: Option<Pid>,
    started_at: Instant,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        let pid = if enabled {
            sysinfo::get_current_pid().ok()
        } else {
            None
        };

        // 拿不到 PID 時直接停用
        let state = pid.map(|_| {
            let mut system = System::new_with_specifics(RefreshKind::everything());
            system.refresh_all();
            Mutex::new(MonitorState {
                system,
                last_checkpoint: now,
                peak_memory_mb: 0,
            })
        });

        Self {
            state,
            pid,
            started_at: now,
        }
    }

    pub fn checkpoint(&self, phase: &str) -> Option<PhaseStats> {
        let mut state = self.state.as_ref()?.lock().ok()?;
        state.system.refresh_all();

        let (cpu_usage, memory_mb) = {
            let process = state.system.process(self.pid?)?;
            (process.cpu_usage(), process.memory() / 1024 / 1024)
        };
        state.peak_memory_mb = state.peak_memory_mb.max(memory_mb);

        let now = Instant::now();
        let phase_elapsed = now.duration_since(state.last_checkpoint);
        state.last_checkpoint = now;

        Some(PhaseStats {
            phase: phase.to_string(),
            cpu_usage,
            memory_usage_mb: memory_mb,
            peak_memory_mb: state.peak_memory_mb,
            phase_elapsed,
            total_elapsed: self.started_at.elapsed(),
        })
    }

    pub fn log_phase(&self, phase: &str) {
        if let Some(stats) = self.checkpoint(phase) {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Phase: {:?}, Total: {:?}",
                stats.phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.phase_elapsed,
                stats.total_elapsed
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 建置沒有 sysinfo
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct RunMonitor;

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_phase(&self, _phase: &str) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
