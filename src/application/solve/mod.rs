pub mod service;

pub use service::{Algorithm, SolveService};
