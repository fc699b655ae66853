/// Numeric conversion helpers shared by the evaluator and the built-ins.
pub mod num;
