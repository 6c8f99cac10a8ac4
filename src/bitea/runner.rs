//! BitEA generational loop.
//!
//! [`BitEaRunner`] orchestrates the run:
//! seeding → initial population → concurrent generators → result.
//!
//! Generators share one population behind a read-write lock. Parents are
//! cloned under the read lock, the child is built without holding any lock,
//! and replacement happens under a short write lock. The generation budget
//! is a shared counter claimed one child at a time, so the total number of
//! children never exceeds `max_generations` regardless of worker count.

use super::config::BitEaConfig;
use super::population::Population;
use crate::coloring::Coloring;
use crate::error::{ColoringError, Result};
use crate::graph::Graph;
use crate::operators::{generate_child, local_search, random_greedy};
use crate::random::{create_rng, worker_seed};
use parking_lot::RwLock;
use rand::Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a BitEA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitEaResult {
    /// The best coloring found during the entire run.
    pub best: Coloring,

    /// Number of color classes in `best`.
    pub color_count: usize,

    /// Weighted conflict of `best` (zero for a proper coloring).
    pub best_fitness: u64,

    /// Uncolored vertices in `best`.
    pub uncolored: usize,

    /// Time from the start of the run until `best` was found.
    pub best_solution_time: Duration,

    /// Children generated across all workers.
    pub generations: usize,

    /// Children that displaced a population member.
    pub replacements: usize,

    /// Whether a proper coloring within the base color count was found.
    pub found_proper: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl BitEaResult {
    /// [`best_solution_time`](Self::best_solution_time) in seconds.
    pub fn best_solution_secs(&self) -> f32 {
        self.best_solution_time.as_secs_f32()
    }
}

/// Executes the BitEA loop.
///
/// # Usage
///
/// ```
/// use u_bitea::bitea::{BitEaConfig, BitEaRunner};
/// use u_bitea::graph::Graph;
///
/// let graph = Graph::cycle(4).unwrap();
/// let config = BitEaConfig::new(2).with_seed(42).with_max_generations(100);
/// let result = BitEaRunner::run(&graph, &config).unwrap();
/// assert_eq!(result.best_fitness, 0);
/// ```
pub struct BitEaRunner;

struct Archive {
    population: Population,
    best: Coloring,
    best_at: Duration,
    replacements: usize,
}

struct Shared<'a> {
    graph: &'a Graph,
    config: &'a BitEaConfig,
    base_seed: u64,
    start: Instant,
    deadline: Option<Instant>,
    archive: RwLock<Archive>,
    generated: AtomicUsize,
    stop: AtomicBool,
    cancel: Option<Arc<AtomicBool>>,
    cancelled: AtomicBool,
}

#[derive(Debug, Default)]
struct WorkerStats {
    worker_id: usize,
    children: usize,
    accepted: usize,
    improvements: usize,
}

impl BitEaRunner {
    /// Runs BitEA on `graph`.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidConfig`] for an invalid configuration
    /// and [`ColoringError::ResourceExhausted`] when the population cannot
    /// be allocated.
    pub fn run(graph: &Graph, config: &BitEaConfig) -> Result<BitEaResult> {
        Self::run_with_cancel(graph, config, None)
    }

    /// Runs BitEA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, every worker
    /// stops after its current child and the best coloring found so far is
    /// returned.
    pub fn run_with_cancel(
        graph: &Graph,
        config: &BitEaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BitEaResult> {
        config.validate()?;

        let start = Instant::now();
        let base_seed = config.seed.unwrap_or_else(rand::random);
        let mut master = create_rng(base_seed);

        log::info!(
            "bitea: {} vertices, {} edges, k={}, population={}, workers={}, seed={}",
            graph.size(),
            graph.edge_count(),
            config.base_color_count,
            config.population_size,
            config.workers,
            base_seed
        );

        let mut seeds: Vec<u64> = Vec::new();
        seeds
            .try_reserve_exact(config.population_size)
            .map_err(|e| ColoringError::ResourceExhausted(format!("population seeds: {e}")))?;
        seeds.extend((0..config.population_size).map(|_| master.random::<u64>()));

        let mut members: Vec<Coloring> = Vec::new();
        members
            .try_reserve_exact(config.population_size)
            .map_err(|e| ColoringError::ResourceExhausted(format!("population: {e}")))?;
        let build = |seed: &u64| initial_individual(graph, config, *seed);
        if config.parallel_init {
            members.par_extend(seeds.par_iter().map(build));
        } else {
            members.extend(seeds.iter().map(build));
        }

        let population = Population::new(members);
        let best = population
            .best()
            .cloned()
            .ok_or_else(|| ColoringError::config("population is empty"))?;
        let best_at = start.elapsed();

        log::debug!(
            "initial population ready in {:.3}s: best fitness {} with {} colors",
            best_at.as_secs_f64(),
            best.fitness(),
            best.color_count()
        );

        let shared = Shared {
            graph,
            config,
            base_seed,
            start,
            deadline: config
                .time_limit_ms
                .map(|ms| start + Duration::from_millis(ms)),
            archive: RwLock::new(Archive {
                population,
                best,
                best_at,
                replacements: 0,
            }),
            generated: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
            cancel,
            cancelled: AtomicBool::new(false),
        };

        let solved_at_start = shared.target_reached(&shared.archive.read().best);
        if !solved_at_start {
            let stats: Vec<WorkerStats> = (0..config.workers)
                .into_par_iter()
                .map(|worker_id| generator(&shared, worker_id))
                .collect();
            for s in &stats {
                log::debug!(
                    "worker {}: {} children, {} accepted, {} improvements",
                    s.worker_id,
                    s.children,
                    s.accepted,
                    s.improvements
                );
            }
        }

        let generations = shared.generated.load(Ordering::Acquire);
        let cancelled = shared.cancelled.load(Ordering::Acquire);
        let found_proper = shared.target_reached(&shared.archive.read().best);
        let archive = shared.archive.into_inner();

        log::info!(
            "bitea finished: {} colors, fitness {}, {} generations, {:.3}s{}",
            archive.best.color_count(),
            archive.best.fitness(),
            generations,
            start.elapsed().as_secs_f64(),
            if cancelled { " (cancelled)" } else { "" }
        );

        Ok(BitEaResult {
            color_count: archive.best.color_count(),
            best_fitness: archive.best.fitness(),
            uncolored: archive.best.uncolored(),
            best: archive.best,
            best_solution_time: archive.best_at,
            generations,
            replacements: archive.replacements,
            found_proper,
            cancelled,
        })
    }
}

fn initial_individual(graph: &Graph, config: &BitEaConfig, seed: u64) -> Coloring {
    let mut rng = create_rng(seed);
    let mut coloring = random_greedy(graph, config.base_color_count, &mut rng);
    local_search(graph, &mut coloring, &config.local_search);
    coloring
}

impl Shared<'_> {
    fn target_reached(&self, coloring: &Coloring) -> bool {
        let score = coloring.score();
        score.is_proper() && score.colors <= self.config.base_color_count
    }

    fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Acquire) {
            return true;
        }
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.cancelled.store(true, Ordering::Release);
                return true;
            }
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Reserves one child from the generation budget.
    fn claim(&self) -> bool {
        let max = self.config.max_generations;
        self.generated
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < max).then_some(n + 1))
            .is_ok()
    }
}

/// One worker: select, breed, replace, until the budget runs out or a stop
/// condition fires.
fn generator(shared: &Shared<'_>, worker_id: usize) -> WorkerStats {
    let config = shared.config;
    let mut rng = create_rng(worker_seed(shared.base_seed, worker_id));
    let mut stats = WorkerStats {
        worker_id,
        ..WorkerStats::default()
    };

    while !shared.should_stop() && shared.claim() {
        let (parent1, parent2) = {
            let archive = shared.archive.read();
            let (a, b) = config
                .selection
                .select_pair(archive.population.individuals(), &mut rng);
            (archive.population.get(a).clone(), archive.population.get(b).clone())
        };
        let target = parent1.color_count().min(parent2.color_count());

        let (child, report) = generate_child(
            shared.graph,
            &parent1,
            &parent2,
            target,
            &config.local_search,
            config.color_reduction,
        );
        stats.children += 1;

        let reached = shared.target_reached(&child);
        let mut archive = shared.archive.write();
        if child.score() < archive.best.score() {
            archive.best = child.clone();
            archive.best_at = shared.start.elapsed();
            stats.improvements += 1;
            log::debug!(
                "worker {worker_id}: new best fitness {} with {} colors at {:.3}s",
                report.fitness,
                report.color_count,
                archive.best_at.as_secs_f64()
            );
        }
        if archive.population.try_replace_worst(child).is_ok() {
            archive.replacements += 1;
            stats.accepted += 1;
        }
        drop(archive);

        if reached {
            log::info!(
                "worker {worker_id}: proper coloring with {} colors after {} generations",
                report.color_count,
                shared.generated.load(Ordering::Relaxed)
            );
            shared.stop.store(true, Ordering::Release);
        }
    }

    stats
}
