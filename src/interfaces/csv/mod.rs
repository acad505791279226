pub mod simulation_writer;
