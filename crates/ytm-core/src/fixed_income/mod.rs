pub mod yield_to_maturity;
