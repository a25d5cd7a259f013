use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

/// Accumulated call durations, keyed by `Type#operation`
#[derive(Debug, Default)]
pub struct ProfilingState {
    data: Mutex<BTreeMap<String, Duration>>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` to the total of `type_name#operation`
    pub fn record(&self, type_name: &str, operation: &str, elapsed: Duration) {
        let key = format!("{}#{}", type_name, operation);
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        *data.entry(key).or_insert(Duration::ZERO) += elapsed;
    }

    /// Total recorded for `type_name#operation`, if it was ever called
    pub fn total(&self, type_name: &str, operation: &str) -> Option<Duration> {
        let key = format!("{}#{}", type_name, operation);
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.get(&key).copied()
    }

    /// Writes one line per key, sorted by key
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        for (key, elapsed) in data.iter() {
            writeln!(writer, "{} took {}", key, format_duration(*elapsed))?;
        }
        Ok(())
    }
}

fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}m {}s {}ms",
        secs / 60,
        secs % 60,
        elapsed.subsec_millis()
    )
}
