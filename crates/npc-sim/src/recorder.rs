//! CSV event recorder for offline inspection of behavior runs.

use std::fs::File;
use std::path::Path;

use npc_core::{AgentId, Tick};
use npc_world::{Event, EventSink};

use crate::SimResult;

/// An [`EventSink`] that appends one `tick,agent,event` row per triggered
/// event.
///
/// Write errors are sticky: the first one is kept and later rows are dropped,
/// so a full disk mid-run doesn't panic the simulation.  Call
/// [`finish`][CsvEventRecorder::finish] after the run to flush and surface
/// any stored error.
pub struct CsvEventRecorder {
    writer: csv::Writer<File>,
    tick: Tick,
    error: Option<csv::Error>,
}

impl CsvEventRecorder {
    /// Create the output file and write the header row.
    pub fn create(path: impl AsRef<Path>) -> SimResult<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["tick", "agent", "event"])?;
        Ok(CsvEventRecorder { writer, tick: Tick::ZERO, error: None })
    }

    /// Flush buffered rows and report the first write error, if any.
    pub fn finish(mut self) -> SimResult<()> {
        if let Some(error) = self.error.take() {
            return Err(error.into());
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl EventSink for CsvEventRecorder {
    fn begin_tick(&mut self, tick: Tick) {
        self.tick = tick;
    }

    fn trigger(&mut self, agent: AgentId, event: Event) {
        if self.error.is_some() {
            return;
        }
        let row = [
            self.tick.0.to_string(),
            agent.index().to_string(),
            format!("{event:?}"),
        ];
        if let Err(error) = self.writer.write_record(&row) {
            self.error = Some(error);
        }
    }
}
