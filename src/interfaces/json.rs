use crate::domain::simulation::SimulationRecord;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// A stored record plus the fields derived from it at read time.
#[derive(Debug, Serialize)]
pub struct SimulationView<'a> {
    #[serde(flatten)]
    pub record: &'a SimulationRecord,
    pub client_name: String,
    pub formatted_created_at: String,
}

impl<'a> From<&'a SimulationRecord> for SimulationView<'a> {
    fn from(record: &'a SimulationRecord) -> Self {
        Self {
            record,
            client_name: record.display_name(),
            formatted_created_at: record.formatted_created_at(),
        }
    }
}

/// Pretty-prints any serializable value followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut sink: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, value)?;
    writeln!(sink)?;
    Ok(())
}
