//! End-to-end supervision planning.
//!
//! catalog → heuristic seed → GA refinement → per-teacher reports.
//!
//! Planning never fails. Malformed records are skipped and reported as
//! [`PlanOutcome::issues`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ga::{GaConfig, GaRunner};
use crate::models::{Catalog, Schedule};
use crate::report::{project, TeacherReport};
use crate::request::ScheduleRequest;
use crate::scheduler::{HeuristicConfig, HeuristicScheduler, ScheduleKpi, StaffingWarning};
use crate::validation::ValidationError;
use crate::Result;

/// Planner configuration. Every field has a default, so `{}` is valid JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Greedy seeding options.
    pub heuristic: HeuristicConfig,
    /// GA options.
    pub ga: GaConfig,
}

impl PlannerConfig {
    /// Parses a JSON configuration.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Sets the GA options.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the heuristic options.
    pub fn with_heuristic(mut self, heuristic: HeuristicConfig) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Result of planning one request.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// One report per roster teacher, in roster order.
    pub reports: Vec<TeacherReport>,
    /// Shortfalls left by the heuristic seed. Informational: the GA may have
    /// fixed some of them.
    pub warnings: Vec<StaffingWarning>,
    /// Problems found in the request. The offending records were skipped or
    /// neutralized; planning went ahead with the rest.
    pub issues: Vec<ValidationError>,
    /// Fitness of the heuristic seed.
    pub seed_fitness: f64,
    /// Fitness of the returned schedule.
    pub best_fitness: f64,
    /// GA generations executed.
    pub generations: usize,
    /// Quality metrics of the returned schedule.
    pub kpi: ScheduleKpi,
    /// The returned schedule.
    pub schedule: Schedule,
}

/// Runs the full pipeline.
///
/// # Example
///
/// ```
/// use exam_duty::planner::{Planner, PlannerConfig};
/// use exam_duty::ga::GaConfig;
/// use exam_duty::request::ScheduleRequest;
///
/// let request = ScheduleRequest::from_json(r#"{
///     "sessions": [{"numSession": "S1", "day": "Monday", "date": "2024-06-03",
///                   "maxSupervisor": 1, "delay": 1.0, "responsibleName": []}],
///     "teachers": [{"fullName": "Alice", "grade": "PA", "hourlyLoad": 10.0}]
/// }"#).unwrap();
///
/// let config = PlannerConfig::default()
///     .with_ga(GaConfig::default().with_max_generations(5).with_seed(1));
/// let outcome = Planner::new(config).plan(&request);
/// assert_eq!(outcome.best_fitness, 0.0);
/// assert_eq!(outcome.reports[0].sessions[0].sessions, vec!["S1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans a request with an RNG seeded from `ga.seed` (or the OS).
    ///
    /// Use [`ScheduleRequest::to_catalog`] with [`Planner::plan_catalog`]
    /// instead to reject malformed requests outright.
    pub fn plan(&self, request: &ScheduleRequest) -> PlanOutcome {
        let mut rng = match self.config.ga.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.plan_with_rng(request, &mut rng)
    }

    /// Plans a request with a caller-supplied RNG.
    pub fn plan_with_rng<R: Rng>(&self, request: &ScheduleRequest, rng: &mut R) -> PlanOutcome {
        let (catalog, issues) = request.to_catalog_lenient();
        for issue in &issues {
            warn!(kind = ?issue.kind, "{}", issue.message);
        }
        let mut outcome = self.plan_catalog(&catalog, rng);
        outcome.issues = issues;
        outcome
    }

    /// Plans an already-built catalog. Never fails.
    pub fn plan_catalog<R: Rng>(&self, catalog: &Catalog, rng: &mut R) -> PlanOutcome {
        info!(
            sessions = catalog.session_count(),
            teachers = catalog.teacher_count(),
            "planning supervision"
        );

        let heuristic =
            HeuristicScheduler::from_config(&self.config.heuristic).schedule(catalog, rng);
        let warnings = heuristic.warnings;

        let (schedule, seed_fitness, best_fitness, generations) = if catalog.is_empty() {
            (heuristic.schedule, 0.0, 0.0, 0)
        } else {
            let result = GaRunner::run_with_rng(catalog, heuristic.schedule, &self.config.ga, rng);
            (
                result.best,
                result.seed_fitness,
                result.best_fitness,
                result.generations,
            )
        };

        PlanOutcome {
            reports: project(&schedule, catalog),
            warnings,
            issues: Vec::new(),
            seed_fitness,
            best_fitness,
            generations,
            kpi: ScheduleKpi::calculate(&schedule, catalog),
            schedule,
        }
    }
}
