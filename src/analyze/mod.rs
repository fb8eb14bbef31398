pub mod fingerprint;

pub use fingerprint::{partition, Partition, ProbeLine, TechClass, TechPolicy};
