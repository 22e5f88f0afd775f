//! Generation loop: evaluation, elite selection, crossover, remainder fill
//! and periodic extinction events.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::config::GaConfig;
use super::fitness::evaluate;
use super::operators::{three_way_crossover, CHILD_MUTATION_RATE, FILL_MUTATION_RATE};
use super::population::{mutate, random_vector, seed_population, OffsetVector};
use super::stats::GenerationStats;
use crate::beam::BEAM_POOL_SIZE;
use crate::scheduling_block::{MaintenanceWindow, ScheduleBlock};

/// One optimizer run over a fixed block set.
///
/// The engine exclusively owns its population; blocks and maintenance
/// windows are read-only for the whole run. Fitness evaluation is a parallel
/// map over the population, synchronized at the generation boundary before
/// selection; everything else is sequential. The engine never fails after
/// construction - it is a best-effort search that always returns some
/// individual, penalized or not.
pub struct GaEngine<'a> {
    blocks: &'a [ScheduleBlock],
    maintenance: &'a [MaintenanceWindow],
    cfg: GaConfig,
    pool_size: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> GaEngine<'a> {
    pub fn new(
        blocks: &'a [ScheduleBlock],
        maintenance: &'a [MaintenanceWindow],
        cfg: GaConfig,
    ) -> Self {
        assert!(cfg.population_size > 0, "population must not be empty");
        Self {
            blocks,
            maintenance,
            cfg,
            pool_size: BEAM_POOL_SIZE,
            cancel: None,
        }
    }

    /// Installs a cancellation flag, observed once per generation boundary.
    /// A cancelled run returns the best individual found so far.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Runs the configured number of generations and returns the fittest
    /// individual together with the per-generation statistics.
    pub fn run(&self) -> (OffsetVector, Vec<GenerationStats>) {
        let mut rng = match self.cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let len = self.blocks.len();
        let mut search_limit = self.cfg.search_limit_days.saturating_sub(1);
        let mut population = seed_population(self.cfg.population_size, len, search_limit, &mut rng);
        let mut history = Vec::with_capacity(self.cfg.generations);
        let mut best_genes = population[0].clone();
        let mut best_fitness = f64::NEG_INFINITY;

        for generation in 0..self.cfg.generations {
            if self.is_cancelled() {
                info!("cancelled at generation {generation}, returning best so far");
                break;
            }

            let scores = self.score(&population, search_limit);
            let (gen_best_idx, gen_best) = argmax(&scores);
            if gen_best > best_fitness {
                best_fitness = gen_best;
                best_genes = population[gen_best_idx].clone();
            }
            let stats = GenerationStats::from_scores(generation, &scores);
            debug!(
                "generation {}: max {:.4} mean {:.4} std {:.4} limit {}",
                generation, stats.max, stats.mean, stats.std_dev, search_limit
            );
            history.push(stats);

            // Selection: the top elite_fraction (by 90th-percentile
            // threshold at the default) survives unchanged.
            let threshold = elite_threshold(&scores, self.cfg.elite_fraction);
            let elites: Vec<OffsetVector> = population
                .iter()
                .zip(&scores)
                .filter(|&(_, &s)| s >= threshold)
                .map(|(individual, _)| individual.clone())
                .collect();

            // Crossover: elite triples produce children until the quota is
            // met; every child gets the low-rate mutation pass.
            let quota = (self.cfg.crossover_fraction * self.cfg.population_size as f64).round()
                as usize;
            let mut children = Vec::with_capacity(quota + 3);
            while children.len() < quota {
                let [p1, p2, p3] = pick_triple(&elites, &mut rng);
                for mut child in three_way_crossover(p1, p2, p3, &mut rng) {
                    mutate(&mut child, CHILD_MUTATION_RATE, search_limit, &mut rng);
                    children.push(child);
                }
            }
            children.truncate(quota);

            // Remainder: mutated copies of uniformly-random incumbents, at
            // the higher fill rate.
            let mut next = elites;
            next.truncate(self.cfg.population_size);
            next.extend(children);
            next.truncate(self.cfg.population_size);
            while next.len() < self.cfg.population_size {
                let donor = rng.gen_range(0..population.len());
                let mut filler = population[donor].clone();
                mutate(&mut filler, FILL_MUTATION_RATE, search_limit, &mut rng);
                next.push(filler);
            }
            population = next;

            if self.cfg.extinction_interval > 0
                && generation > 0
                && generation % self.cfg.extinction_interval == 0
            {
                search_limit = self.extinction(&mut population, search_limit, best_fitness, &mut rng);
            }
        }

        (best_genes, history)
    }

    fn score(&self, population: &[OffsetVector], search_limit: u32) -> Vec<f64> {
        population
            .par_iter()
            .map(|individual| {
                evaluate(
                    individual,
                    self.blocks,
                    self.maintenance,
                    self.pool_size,
                    search_limit,
                )
            })
            .collect()
    }

    /// Tightens the search limit to what the best individual actually needs
    /// (capped at doubling) and replaces everyone scoring below the new
    /// floor with fresh random individuals. When nobody would be culled the
    /// population has converged, so a random half is refreshed instead. The
    /// current best member is never replaced.
    fn extinction<R: Rng>(
        &self,
        population: &mut [OffsetVector],
        prev_limit: u32,
        best_fitness: f64,
        rng: &mut R,
    ) -> u32 {
        let tightened = (-best_fitness).ceil().max(1.0) as u32;
        let limit = tightened.min(prev_limit.saturating_mul(2)).max(1);
        let floor = -(limit as f64);
        let len = self.blocks.len();

        let scores = self.score(population, limit);
        let (best_idx, _) = argmax(&scores);

        let mut culled = 0usize;
        for (i, individual) in population.iter_mut().enumerate() {
            if i != best_idx && scores[i] < floor {
                *individual = random_vector(len, limit, rng);
                culled += 1;
            }
        }
        if culled == 0 {
            for i in 0..population.len() {
                if i != best_idx && rng.gen_bool(0.5) {
                    population[i] = random_vector(len, limit, rng);
                    culled += 1;
                }
            }
        }

        info!(
            "extinction: search limit {} -> {}, {} individuals replaced",
            prev_limit, limit, culled
        );
        limit
    }
}

/// Fitness value the weakest surviving elite must reach.
fn elite_threshold(scores: &[f64], elite_fraction: f64) -> f64 {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let count = ((scores.len() as f64 * elite_fraction).ceil() as usize).clamp(1, scores.len());
    sorted[count - 1]
}

/// Samples three elites without replacement, repeating the first when the
/// elite set is smaller than a triple.
fn pick_triple<'p, R: Rng>(elites: &'p [OffsetVector], rng: &mut R) -> [&'p OffsetVector; 3] {
    let mut picked: Vec<&OffsetVector> = elites.choose_multiple(rng, 3).collect();
    while picked.len() < 3 {
        picked.push(&elites[0]);
    }
    [picked[0], picked[1], picked[2]]
}

fn argmax(scores: &[f64]) -> (usize, f64) {
    let mut idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, &s) in scores.iter().enumerate() {
        if s > best {
            best = s;
            idx = i;
        }
    }
    (idx, best)
}
