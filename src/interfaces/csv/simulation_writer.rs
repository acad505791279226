use crate::domain::simulation::SimulationRecord;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One flattened history line, including the read-time derived columns.
#[derive(Serialize)]
struct HistoryRow<'a> {
    id: u64,
    client_name: String,
    age_category: &'a str,
    professional_category: &'a str,
    monthly_net_income: Decimal,
    loan_amount: Decimal,
    duration_years: u32,
    annual_interest_rate: Decimal,
    monthly_payment: Decimal,
    total_interest: Decimal,
    total_cost: Decimal,
    created_at: String,
}

impl<'a> From<&'a SimulationRecord> for HistoryRow<'a> {
    fn from(record: &'a SimulationRecord) -> Self {
        Self {
            id: record.id,
            client_name: record.display_name(),
            age_category: &record.age_category,
            professional_category: &record.professional_category,
            monthly_net_income: record.monthly_net_income,
            loan_amount: record.loan_amount,
            duration_years: record.duration_years,
            annual_interest_rate: record.annual_interest_rate,
            monthly_payment: record.monthly_payment,
            total_interest: record.total_interest,
            total_cost: record.total_cost,
            created_at: record.formatted_created_at(),
        }
    }
}

/// Writes simulation history as CSV, header first.
pub struct SimulationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SimulationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records(&mut self, records: &[SimulationRecord]) -> Result<()> {
        for record in records {
            self.writer.serialize(HistoryRow::from(record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
