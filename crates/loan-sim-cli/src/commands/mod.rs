pub mod amortization;
pub mod simulation;
