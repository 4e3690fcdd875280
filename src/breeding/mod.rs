//! # Breeding Operators
//!
//! Crossover and mutation: the two operators that rewrite population rows
//! each generation. Both work at the gene level and are generic over the
//! gene type; replacement gene *values* come from the domain's
//! [`GeneSpace`](crate::chromosome::GeneSpace).

pub mod crossover;
pub mod mutation;

pub use crossover::{create_offspring, crossover_points, OffspringSlot};
pub use mutation::mutate_population;
