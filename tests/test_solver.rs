use gensolver::{
    chromosome::{Chromosome, GeneSpace},
    evolution::{Challenge, GenAlgSolver, SolverOptions},
    rng::RandomNumberGenerator,
    selection::SelectionMethod,
};

/// Integer genes drawn uniformly from `0..=9`.
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

/// Binary genes, used to force duplicate chromosomes quickly.
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

struct SumChallenge;

impl Challenge<u8> for SumChallenge {
    fn score(&self, chromosome: &Chromosome<u8>) -> Vec<f64> {
        vec![chromosome.genes().iter().map(|&g| g as f64).sum()]
    }
}

struct ConstantChallenge;

impl Challenge<u8> for ConstantChallenge {
    fn score(&self, _chromosome: &Chromosome<u8>) -> Vec<f64> {
        vec![1.0]
    }
}

#[test]
fn test_two_by_two_sum_maximization_end_to_end() {
    let options = SolverOptions::builder()
        .n_genes(4)
        .pop_size(10)
        .max_gen(20)
        .selection_method(SelectionMethod::TwoByTwo)
        .random_seed(42)
        .build()
        .unwrap();
    let mut solver = GenAlgSolver::new(DigitSpace { n_genes: 4 }, SumChallenge, options).unwrap();

    let result = solver.solve(None).unwrap();

    // genes are 0..=9, so the optimum is 36; 20 generations get close
    assert!(result.best_fitness <= 36.0);
    assert!(
        result.best_fitness >= 28.0,
        "expected near-optimal best, got {}",
        result.best_fitness
    );

    let state = solver.state().unwrap();
    assert!(result.best_fitness >= state.max_fitness_history[0]);
    assert_eq!(state.population.len(), 10);
}

#[test]
fn test_population_size_invariant_across_100_generations() {
    let options = SolverOptions::builder()
        .n_genes(2)
        .pop_size(8)
        .max_gen(200)
        .max_conv(1000)
        .prune_duplicates(true)
        .random_seed(7)
        .build()
        .unwrap();
    let mut solver = GenAlgSolver::new(BitSpace { n_genes: 2 }, SumChallenge, options).unwrap();

    // with 2 binary genes the population is saturated with duplicates, so
    // pruning and refilling happen on almost every generation
    for _ in 0..100 {
        solver.solve(Some(1)).unwrap();
        let state = solver.state().unwrap();
        assert_eq!(state.population.len(), 8);
        assert_eq!(state.population.fitness().len(), 8);
        assert_eq!(state.population.raw_fitness().len(), 8);
    }
    assert_eq!(solver.state().unwrap().generation, 100);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed: u64| {
        let options = SolverOptions::builder()
            .n_genes(6)
            .pop_size(12)
            .max_gen(25)
            .selection_method(SelectionMethod::RouletteWheel)
            .random_seed(seed)
            .build()
            .unwrap();
        let mut solver =
            GenAlgSolver::new(DigitSpace { n_genes: 6 }, SumChallenge, options).unwrap();
        solver.solve(None).unwrap();
        solver.state().unwrap().max_fitness_history.clone()
    };

    let first = run(99);
    let second = run(99);
    assert_eq!(first, second, "identical seeds must give identical trajectories");

    let other = run(100);
    assert_ne!(first, other, "distinct seeds should explore differently");
}

#[test]
fn test_stagnation_terminates_the_run() {
    let options = SolverOptions::builder()
        .n_genes(4)
        .pop_size(10)
        .max_gen(100)
        .max_conv(3)
        .random_seed(1)
        .build()
        .unwrap();
    let mut solver =
        GenAlgSolver::new(DigitSpace { n_genes: 4 }, ConstantChallenge, options).unwrap();

    let result = solver.solve(None).unwrap();

    assert!(result.converged);
    assert!(solver.state().unwrap().converged);
    // generation 1 sets the best, generations 2..=5 accumulate stagnation
    assert_eq!(result.generations, 5);
    assert_eq!(result.best_fitness, 1.0);
}

#[test]
fn test_resumed_run_continues_from_stored_state() {
    let options = SolverOptions::builder()
        .n_genes(4)
        .pop_size(10)
        .max_gen(100)
        .random_seed(3)
        .build()
        .unwrap();
    let mut solver = GenAlgSolver::new(DigitSpace { n_genes: 4 }, SumChallenge, options).unwrap();

    let first = solver.solve(Some(5)).unwrap();
    assert_eq!(first.generations, 5);

    let second = solver.solve(Some(5)).unwrap();
    assert_eq!(second.generations, 10);
    assert!(second.best_fitness >= first.best_fitness);

    let state = solver.state().unwrap();
    assert_eq!(state.mean_fitness_history.len(), 10);
    assert_eq!(state.max_fitness_history.len(), 10);
}

#[test]
fn test_state_round_trip_restores_a_run() {
    let build = || {
        SolverOptions::builder()
            .n_genes(4)
            .pop_size(10)
            .max_gen(100)
            .random_seed(3)
            .build()
            .unwrap()
    };
    let mut solver =
        GenAlgSolver::new(DigitSpace { n_genes: 4 }, SumChallenge, build()).unwrap();
    solver.solve(Some(4)).unwrap();
    let snapshot = solver.state().unwrap().clone();

    let mut restored =
        GenAlgSolver::new(DigitSpace { n_genes: 4 }, SumChallenge, build()).unwrap();
    restored.restore_state(snapshot).unwrap();
    let result = restored.solve(Some(2)).unwrap();

    assert_eq!(result.generations, 6);
}

#[test]
fn test_restore_rejects_mismatched_population() {
    let mut solver = GenAlgSolver::new(
        DigitSpace { n_genes: 4 },
        SumChallenge,
        SolverOptions::builder()
            .n_genes(4)
            .pop_size(10)
            .random_seed(3)
            .build()
            .unwrap(),
    )
    .unwrap();
    solver.solve(Some(1)).unwrap();
    let snapshot = solver.state().unwrap().clone();

    let mut other = GenAlgSolver::new(
        DigitSpace { n_genes: 4 },
        SumChallenge,
        SolverOptions::builder()
            .n_genes(4)
            .pop_size(20)
            .random_seed(3)
            .build()
            .unwrap(),
    )
    .unwrap();
    assert!(other.restore_state(snapshot).is_err());
}

/// Digits everywhere except gene 1, which is pinned to 5 at creation and
/// panics if the engine ever asks for a replacement value for it.
#[derive(Clone, Debug)]
struct PinnedGeneSpace;

impl GeneSpace for PinnedGeneSpace {
    type Gene = u8;

    fn n_genes(&self) -> usize {
        5
    }

    fn random_gene(&self, index: usize, rng: &mut RandomNumberGenerator) -> u8 {
        assert_ne!(index, 1, "excluded gene was targeted for mutation");
        rng.gen_index(10) as u8
    }

    fn new_chromosome(&self, rng: &mut RandomNumberGenerator) -> Chromosome<u8> {
        let genes = (0..self.n_genes())
            .map(|index| {
                if index == 1 {
                    5
                } else {
                    self.random_gene(index, rng)
                }
            })
            .collect();
        Chromosome::new(genes)
    }
}

#[test]
fn test_excluded_genes_survive_a_full_run() {
    let options = SolverOptions::builder()
        .n_genes(5)
        .pop_size(10)
        .max_gen(30)
        .excluded_genes([1])
        .random_seed(11)
        .build()
        .unwrap();
    let mut solver = GenAlgSolver::new(PinnedGeneSpace, SumChallenge, options).unwrap();
    solver.solve(None).unwrap();

    // gene 1 was identical in every parent and never mutated, so it must
    // still carry its pinned value in every row
    let state = solver.state().unwrap();
    for row in state.population.chromosomes() {
        assert_eq!(*row.gene(1), 5);
    }
}
