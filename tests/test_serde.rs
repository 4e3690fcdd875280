#![cfg(feature = "serde")]

use gensolver::{
    chromosome::{Chromosome, GeneSpace},
    evolution::{Challenge, GenAlgSolver, RunState, SolverOptions},
    rng::RandomNumberGenerator,
};

#[derive(Clone, Debug)]
struct DigitSpace {
    n_genes: usize,
}

impl GeneSpace for DigitSpace {
    type Gene = u8;

    fn n_genes(&self) -> usize {
        self.n_genes
    }

    fn random_gene(&self, _index: usize, rng: &mut RandomNumberGenerator) -> u8 {
        rng.gen_index(10) as u8
    }
}

struct SumChallenge;

impl Challenge<u8> for SumChallenge {
    fn score(&self, chromosome: &Chromosome<u8>) -> Vec<f64> {
        vec![chromosome.genes().iter().map(|&g| g as f64).sum()]
    }
}

fn options() -> SolverOptions {
    SolverOptions::builder()
        .n_genes(4)
        .pop_size(10)
        .max_gen(100)
        .random_seed(13)
        .build()
        .unwrap()
}

#[test]
fn test_run_state_survives_a_json_round_trip() {
    let mut solver = GenAlgSolver::new(DigitSpace { n_genes: 4 }, SumChallenge, options()).unwrap();
    solver.solve(Some(5)).unwrap();

    let json = serde_json::to_string(solver.state().unwrap()).unwrap();
    let restored: RunState<u8> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.generation, 5);
    assert_eq!(
        restored.best_fitness,
        solver.state().unwrap().best_fitness
    );

    // a fresh solver continues the persisted run
    let mut resumed =
        GenAlgSolver::new(DigitSpace { n_genes: 4 }, SumChallenge, options()).unwrap();
    resumed.restore_state(restored).unwrap();
    let result = resumed.solve(Some(3)).unwrap();
    assert_eq!(result.generations, 8);
}

#[test]
fn test_options_serialize() {
    let json = serde_json::to_string(&options()).unwrap();
    let restored: SolverOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.get_pop_size(), 10);
    assert_eq!(restored.get_pop_keep(), 5);
}
