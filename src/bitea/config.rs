//! BitEA configuration.
//!
//! [`BitEaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use crate::error::{ColoringError, Result};
use crate::operators::LocalSearchConfig;

/// Configuration for the BitEA evolutionary loop.
///
/// # Defaults
///
/// ```
/// use u_bitea::bitea::BitEaConfig;
///
/// let config = BitEaConfig::new(5);
/// assert_eq!(config.base_color_count, 5);
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.max_generations, 10_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitea::bitea::{BitEaConfig, Selection};
///
/// let config = BitEaConfig::new(17)
///     .with_population_size(50)
///     .with_max_generations(100_000)
///     .with_selection(Selection::Tournament(3))
///     .with_workers(4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitEaConfig {
    /// Number of individuals in the population.
    ///
    /// Must be at least 2 so two distinct parents can be drawn.
    pub population_size: usize,

    /// Color count the population is initialized with (the target `k`).
    ///
    /// The run stops early once a proper coloring with at most this many
    /// colors is found.
    pub base_color_count: usize,

    /// Maximum number of children generated across all workers.
    pub max_generations: usize,

    /// Number of concurrent generator workers.
    pub workers: usize,

    /// Parent selection policy.
    pub selection: Selection,

    /// Local search applied to every child (and to each initial individual).
    pub local_search: LocalSearchConfig,

    /// Whether children attempt to drop a color class.
    pub color_reduction: bool,

    /// Whether the initial population is built in parallel using rayon.
    pub parallel_init: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed. With one worker a fixed seed gives a fully
    /// reproducible run; with several, thread interleaving can still vary.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked between children, so the actual runtime may exceed this
    /// limit by one child's worth of work per worker.
    pub time_limit_ms: Option<u64>,
}

impl Default for BitEaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            base_color_count: 3,
            max_generations: 10_000,
            workers: default_workers(),
            selection: Selection::default(),
            local_search: LocalSearchConfig::default(),
            color_reduction: true,
            parallel_init: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

impl BitEaConfig {
    /// Default configuration targeting `base_color_count` colors.
    pub fn new(base_color_count: usize) -> Self {
        Self {
            base_color_count,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the target color count.
    pub fn with_base_color_count(mut self, k: usize) -> Self {
        self.base_color_count = k;
        self
    }

    /// Sets the generation budget (children produced across all workers).
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of generator workers.
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    /// Sets the parent selection policy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the local search parameters.
    pub fn with_local_search(mut self, local_search: LocalSearchConfig) -> Self {
        self.local_search = local_search;
        self
    }

    /// Enables or disables the color reduction step.
    pub fn with_color_reduction(mut self, enabled: bool) -> Self {
        self.color_reduction = enabled;
        self
    }

    /// Enables or disables parallel population initialization.
    pub fn with_parallel_init(mut self, parallel: bool) -> Self {
        self.parallel_init = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Preset for quick runs: small population, short budget.
    ///
    /// - Population: 10, Generations: 1 000, Local search: 100 iterations
    /// - Time limit: 10s
    pub fn fast(base_color_count: usize) -> Self {
        Self {
            population_size: 10,
            max_generations: 1_000,
            local_search: LocalSearchConfig::default().with_max_iterations(100),
            time_limit_ms: Some(10_000),
            ..Self::new(base_color_count)
        }
    }

    /// Preset balancing quality and time.
    ///
    /// - Population: 20, Generations: 20 000, Local search: 500 iterations
    /// - Time limit: 60s
    pub fn balanced(base_color_count: usize) -> Self {
        Self {
            population_size: 20,
            max_generations: 20_000,
            local_search: LocalSearchConfig::default().with_max_iterations(500),
            time_limit_ms: Some(60_000),
            ..Self::new(base_color_count)
        }
    }

    /// Preset for hard instances: larger population, long budget.
    ///
    /// - Population: 50, Generations: 200 000, Local search: 2 000 iterations
    /// - Tabu tenure: 10, Time limit: 600s
    pub fn quality(base_color_count: usize) -> Self {
        Self {
            population_size: 50,
            max_generations: 200_000,
            local_search: LocalSearchConfig::default()
                .with_max_iterations(2_000)
                .with_tabu_tenure(10),
            time_limit_ms: Some(600_000),
            ..Self::new(base_color_count)
        }
    }

    /// Selects a preset from the graph size.
    ///
    /// - `vertex_count < 100` → [`fast()`](Self::fast)
    /// - `100 ≤ vertex_count < 500` → [`balanced()`](Self::balanced)
    /// - `vertex_count ≥ 500` → [`quality()`](Self::quality)
    pub fn auto_select(vertex_count: usize, base_color_count: usize) -> Self {
        if vertex_count < 100 {
            Self::fast(base_color_count)
        } else if vertex_count < 500 {
            Self::balanced(base_color_count)
        } else {
            Self::quality(base_color_count)
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(ColoringError::config("population_size must be at least 2"));
        }
        if self.base_color_count == 0 {
            return Err(ColoringError::config("base_color_count must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(ColoringError::config("max_generations must be at least 1"));
        }
        if self.workers == 0 {
            return Err(ColoringError::config("workers must be at least 1"));
        }
        if self.selection == Selection::Tournament(0) {
            return Err(ColoringError::config("tournament size must be at least 1"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(ColoringError::config("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}
