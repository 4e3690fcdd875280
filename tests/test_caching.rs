use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gensolver::{
    caching::MemoizedChallenge,
    chromosome::{Chromosome, GeneSpace},
    evolution::{Challenge, GenAlgSolver, SolverOptions},
    rng::RandomNumberGenerator,
};

/// Binary genes keep the key space tiny so cache hits are guaranteed.
#[derive(Clone, Debug)]
struct BitSpace {
    n_genes: usize,
}

impl GeneSpace for BitSpace {
    type Gene = u8;

    fn n_genes(&self) -> usize {
        self.n_genes
    }

    fn random_gene(&self, _index: usize, rng: &mut RandomNumberGenerator) -> u8 {
        rng.gen_index(2) as u8
    }
}

#[derive(Clone)]
struct CountingChallenge {
    evaluations: Arc<AtomicUsize>,
}

impl CountingChallenge {
    fn new() -> Self {
        Self {
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl Challenge<u8> for CountingChallenge {
    fn score(&self, chromosome: &Chromosome<u8>) -> Vec<f64> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        vec![chromosome.genes().iter().map(|&g| g as f64).sum()]
    }
}

fn canonical_key(chromosome: &Chromosome<u8>) -> Vec<u8> {
    chromosome.genes().to_vec()
}

type KeyFn = fn(&Chromosome<u8>) -> Vec<u8>;

#[test]
fn test_memoized_solve_skips_repeat_evaluations() {
    let challenge = CountingChallenge::new();
    let memoized = MemoizedChallenge::new(challenge.clone(), canonical_key as KeyFn);

    let options = SolverOptions::builder()
        .n_genes(3)
        .pop_size(10)
        .max_gen(20)
        .max_conv(1000)
        .random_seed(31)
        .build()
        .unwrap();
    let mut solver = GenAlgSolver::new(BitSpace { n_genes: 3 }, memoized, options).unwrap();

    solver.solve(None).unwrap();

    // only 8 distinct chromosomes exist, so the evaluator can run at most
    // 8 times however many rows were scored
    assert!(challenge.evaluations() <= 8);
    assert!(challenge.evaluations() >= 1);
}

#[test]
fn test_memoizer_statistics_add_up() {
    let challenge = CountingChallenge::new();
    let memoized = MemoizedChallenge::new(challenge.clone(), canonical_key as KeyFn);

    let options = SolverOptions::builder()
        .n_genes(3)
        .pop_size(10)
        .max_gen(10)
        .max_conv(1000)
        .random_seed(31)
        .build()
        .unwrap();
    // keep a handle on the cache before the solver takes ownership
    let stats_handle = memoized.clone();
    let mut solver = GenAlgSolver::new(BitSpace { n_genes: 3 }, memoized, options).unwrap();
    solver.solve(None).unwrap();

    let stats = stats_handle.stats();
    assert!(stats.hits > 0, "a tiny key space must produce cache hits");
    assert_eq!(stats.misses as usize, challenge.evaluations());
    assert!(stats.len <= stats.capacity);
}

#[test]
fn test_uncached_challenge_evaluates_directly() {
    let challenge = CountingChallenge::new();

    let options = SolverOptions::builder()
        .n_genes(3)
        .pop_size(10)
        .max_gen(5)
        .max_conv(1000)
        .random_seed(31)
        .build()
        .unwrap();
    let mut solver =
        GenAlgSolver::new(BitSpace { n_genes: 3 }, challenge.clone(), options).unwrap();
    solver.solve(None).unwrap();

    // initial evaluation scores all 10 rows, every generation re-scores 9
    assert_eq!(challenge.evaluations(), 10 + 5 * 9);
}
