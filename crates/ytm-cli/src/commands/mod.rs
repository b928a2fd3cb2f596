pub mod fixed_income;
