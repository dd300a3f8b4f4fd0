pub mod algorithms;
pub mod graph;
pub mod io;
pub mod job;
pub mod observability;
pub mod plan;
