//! GA parameters.

use serde::{Deserialize, Serialize};

/// Genetic algorithm parameters.
///
/// Defaults reproduce the reference search: 60 individuals, 200 generations,
/// tournament size 5, crossover rate 0.8, mutation rate 0.15.
///
/// # Example
///
/// ```
/// use exam_duty::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42)
///     .with_parallel(false);
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.tournament_size, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generations to run. There is no early stop.
    pub max_generations: usize,
    /// Individuals sampled per tournament.
    pub tournament_size: usize,
    /// Probability that crossover recombines a parent pair.
    pub crossover_rate: f64,
    /// Probability that a child is mutated.
    pub mutation_rate: f64,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Evaluate fitness on the rayon pool.
    pub parallel: bool,
    /// Penalty weights for the fitness function.
    pub penalties: PenaltyWeights,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 60,
            max_generations: 200,
            tournament_size: 5,
            crossover_rate: 0.8,
            mutation_rate: 0.15,
            seed: None,
            parallel: true,
            penalties: PenaltyWeights::default(),
        }
    }
}

impl GaConfig {
    /// Sets the population size (at least 1).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(1);
        self
    }

    /// Sets the generation count.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the tournament size (at least 1).
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size.max(1);
        self
    }

    /// Sets the crossover rate, clamped to [0, 1].
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the penalty weights.
    pub fn with_penalties(mut self, penalties: PenaltyWeights) -> Self {
        self.penalties = penalties;
        self
    }
}

/// Weights of the two soft constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Penalty per missing supervisor.
    pub understaffed: f64,
    /// Penalty per hour above a teacher's cap.
    pub overload_per_hour: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            understaffed: 500.0,
            overload_per_hour: 1000.0,
        }
    }
}
