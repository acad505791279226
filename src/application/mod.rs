//! Application layer orchestrating the loan pipeline.
//!
//! `LoanSimulator` is the single entry point used by the command line: it resolves
//! where the annual rate comes from, runs the amortization and talks to the
//! simulation history store through the domain ports.

pub mod simulator;
