/// Simulation assembly.
pub mod builder;



/// Sparse address space.
pub mod memory;
