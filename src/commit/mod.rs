mod generator;

pub(crate) use generator::{GeneratePlan, run};
