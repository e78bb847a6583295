/// Table-based learners for discrete grid environments
pub mod tabular;
