//! Method-level profiling for crawlers
//!
//! A [`Profiler`] wraps a crawler in a [`ProfiledCrawler`] decorator that
//! times each of the crawler's declared operations and accumulates the
//! durations per `(type, operation)`. The accumulated data is rendered as a
//! plain-text report headed by the time the profiler was created.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use word_ripple::clock::SystemClock;
//! use word_ripple::crawler::WebCrawler;
//! use word_ripple::Profiler;
//!
//! # async fn example(crawler: Box<dyn WebCrawler>) -> Result<(), Box<dyn std::error::Error>> {
//! let profiler = Profiler::new(Arc::new(SystemClock));
//! let crawler = profiler.wrap(crawler)?;
//! let result = crawler.crawl(&["https://example.com/".to_string()]).await;
//! profiler.write_data_to(&mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

mod state;
mod wrapper;

pub use state::ProfilingState;
pub use wrapper::ProfiledCrawler;

use crate::clock::Clock;
use crate::ProfilerError;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// A type whose operations can be timed
pub trait Profiled {
    /// Name recorded for this type in the report
    fn type_name(&self) -> &'static str;

    /// Names of the operations that are timed when wrapped
    fn profiled_operations(&self) -> &'static [&'static str];
}

impl<T: Profiled + ?Sized> Profiled for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn profiled_operations(&self) -> &'static [&'static str] {
        (**self).profiled_operations()
    }
}

/// Creates profiled wrappers and reports what they recorded
pub struct Profiler {
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
    start_time: DateTime<Utc>,
}

impl Profiler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let start_time = clock.utc_now();
        Self {
            clock,
            state: Arc::new(ProfilingState::new()),
            start_time,
        }
    }

    /// Wraps `delegate` so its profiled operations are timed
    ///
    /// # Returns
    ///
    /// * `Ok(ProfiledCrawler)` - Wrapper sharing this profiler's data
    /// * `Err(ProfilerError::NoProfiledOperations)` - `delegate` declares no
    ///   timed operations
    pub fn wrap<T: Profiled>(&self, delegate: T) -> Result<ProfiledCrawler<T>, ProfilerError> {
        if delegate.profiled_operations().is_empty() {
            return Err(ProfilerError::NoProfiledOperations(
                delegate.type_name().to_string(),
            ));
        }

        Ok(ProfiledCrawler::new(
            delegate,
            Arc::clone(&self.clock),
            Arc::clone(&self.state),
        ))
    }

    /// Data recorded so far by every wrapper of this profiler
    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn write_data(&self, path: &Path) -> Result<(), ProfilerError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_data_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the report to any writer
    pub fn write_data_to<W: Write>(&self, writer: &mut W) -> Result<(), ProfilerError> {
        writeln!(
            writer,
            "Run at {}",
            self.start_time.format("%a, %d %b %Y %H:%M:%S GMT")
        )?;
        self.state.write(writer)?;
        writeln!(writer)?;
        Ok(())
    }
}
