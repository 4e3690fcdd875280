//! # Chromosome and GeneSpace
//!
//! A [`Chromosome`] is an ordered, fixed-length sequence of gene values of a
//! uniform type. The engine is polymorphic over the gene type: numeric,
//! categorical or symbolic genes all work, as long as they can be cloned,
//! compared for equality (duplicate suppression) and printed for logging.
//!
//! The [`GeneSpace`] trait is the capability interface a chromosome
//! representation must provide: how many genes a chromosome has, how to
//! build a fresh random chromosome, and how to draw a replacement value for
//! a single gene. The solver owns the crossover and mutation *mechanics*;
//! the gene space owns the gene *values*.
//!
//! ## Example
//!
//! ```rust
//! use gensolver::chromosome::{Chromosome, GeneSpace};
//! use gensolver::rng::RandomNumberGenerator;
//!
//! /// Integer genes drawn uniformly from `0..=9`.
//! #[derive(Clone, Debug)]
//! struct DigitSpace {
//!     n_genes: usize,
//! }
//!
//! impl GeneSpace for DigitSpace {
//!     type Gene = u8;
//!
//!     fn n_genes(&self) -> usize {
//!         self.n_genes
//!     }
//!
//!     fn random_gene(&self, _index: usize, rng: &mut RandomNumberGenerator) -> u8 {
//!         rng.gen_index(10) as u8
//!     }
//! }
//!
//! let space = DigitSpace { n_genes: 4 };
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let chromosome = space.new_chromosome(&mut rng);
//! assert_eq!(chromosome.len(), 4);
//! ```

use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;

/// An ordered, fixed-length sequence of gene values representing one
/// candidate solution.
///
/// Chromosomes are replaced wholesale by the generational loop (offspring
/// and refill rows); single-gene writes happen only inside the mutation
/// operator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Chromosome<G> {
    genes: Vec<G>,
}

impl<G> Chromosome<G> {
    /// Creates a chromosome from a gene vector.
    pub fn new(genes: Vec<G>) -> Self {
        Self { genes }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The gene sequence.
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// A single gene value.
    pub fn gene(&self, index: usize) -> &G {
        &self.genes[index]
    }

    /// Overwrites one gene value. Restricted to the mutation operator; the
    /// rest of the engine treats chromosomes as immutable.
    pub(crate) fn set_gene(&mut self, index: usize, gene: G) {
        self.genes[index] = gene;
    }

    /// Consumes the chromosome and returns its genes.
    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }
}

impl<G> From<Vec<G>> for Chromosome<G> {
    fn from(genes: Vec<G>) -> Self {
        Self::new(genes)
    }
}

/// Capability interface implemented per chromosome representation (binary,
/// real-valued, symbolic, ...).
///
/// The solver uses it to build the initial population, to refill rows
/// discarded by duplicate pruning, and to draw replacement values for
/// mutated genes. Implementations must be consistent: `new_chromosome` must
/// always produce chromosomes of length `n_genes`.
pub trait GeneSpace: Send + Sync {
    /// The gene value type.
    type Gene: Clone + Debug + PartialEq + Send + Sync;

    /// Number of genes in every chromosome of this space.
    fn n_genes(&self) -> usize;

    /// Draws a replacement value for the gene at `index`.
    fn random_gene(&self, index: usize, rng: &mut RandomNumberGenerator) -> Self::Gene;

    /// Builds a fresh random chromosome.
    fn new_chromosome(&self, rng: &mut RandomNumberGenerator) -> Chromosome<Self::Gene> {
        let genes = (0..self.n_genes())
            .map(|index| self.random_gene(index, rng))
            .collect();
        Chromosome::new(genes)
    }

    /// Builds `n` fresh chromosomes, used to refill the population after
    /// duplicate pruning.
    fn refill(&self, n: usize, rng: &mut RandomNumberGenerator) -> Vec<Chromosome<Self::Gene>> {
        (0..n).map(|_| self.new_chromosome(rng)).collect()
    }
}
