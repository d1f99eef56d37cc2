use super::demand::expand_demand;
use super::initializer::build_chromosome;
use super::placement::{pick_room, PlacementCache};
use crate::error::Result;
use crate::types::{Chromosome, Gene, RoomType, SchedulingInput, SlotId, SubjectKind};
use crate::validator::{default_soft_weights, evaluate, EvaluationReport};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::fitness::score;

/// §4.7/§6: tunables for one GA run, all with the defaults the evaluation
/// pipeline assumes unless the caller overrides them. Deserializable from
/// the `[ga]` table of the run's TOML config file; any field left out
/// falls back to [`GaParams::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaParams {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_k: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub elitism_fraction: f64,
    pub seed: Option<u64>,
    pub soft_weights: HashMap<String, i64>,
    pub wall_clock_budget_ms: Option<u64>,
    pub stagnation_limit: Option<usize>,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: 80,
            generations: 300,
            tournament_k: 3,
            crossover_rate: 0.9,
            mutation_rate: 0.05,
            elitism_fraction: 0.08,
            seed: None,
            soft_weights: default_soft_weights(),
            wall_clock_budget_ms: None,
            stagnation_limit: None,
        }
    }
}

/// §6: the outcome of one GA run, in terms of the best chromosome seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub genes: Vec<Gene>,
    pub fitness: i64,
    pub hard_breakdown: HashMap<String, u32>,
    pub soft_breakdown: HashMap<String, u32>,
    pub generations_executed: usize,
    pub cancelled: bool,
}

struct Individual {
    chromosome: Chromosome,
    fitness: i64,
    report: EvaluationReport,
}

/// §4.7/§6: run the genetic algorithm to completion (or until cancelled /
/// over budget / stagnant), returning the best chromosome seen.
///
/// `progress`, if given, is invoked once per completed generation with
/// `(generation_index, best_fitness_so_far)` — the CLI uses it to drive an
/// `indicatif` bar the same way the parent repo's phase-based progress
/// reporting works, without the engine itself depending on any UI crate.
pub fn run_scheduler(
    input: &SchedulingInput,
    params: &GaParams,
    cancel: Arc<AtomicBool>,
    progress: Option<&dyn Fn(usize, i64)>,
) -> Result<RunResult> {
    crate::parser::validate_input(input)?;

    let started = Instant::now();
    let demand = expand_demand(input)?;
    let mut cache = PlacementCache::build(input);
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut population: Vec<Chromosome> = (0..params.population_size)
        .map(|_| build_chromosome(input, &demand, &mut cache, &mut rng))
        .collect();

    let mut individuals = evaluate_population(&population, input, &params.soft_weights);

    let elite_count = ((params.elitism_fraction * params.population_size as f64).ceil() as usize)
        .clamp(0, params.population_size);

    let mut best = best_of(&individuals);
    let mut generations_executed = 0usize;
    let mut stagnant_for = 0usize;
    let mut cancelled = false;

    for _ in 0..params.generations {
        if cancel.load(Ordering::Relaxed) {
            cancelled = true;
            break;
        }
        if let Some(budget) = params.wall_clock_budget_ms {
            if started.elapsed().as_millis() as u64 >= budget {
                cancelled = true;
                break;
            }
        }

        let mut ranked: Vec<usize> = (0..individuals.len()).collect();
        ranked.sort_by(|&a, &b| individuals[b].fitness.cmp(&individuals[a].fitness));

        let mut next_population: Vec<Chromosome> = ranked[..elite_count]
            .iter()
            .map(|&i| individuals[i].chromosome.clone())
            .collect();

        while next_population.len() < params.population_size {
            let parent1 = tournament_select(&individuals, params.tournament_k, &mut rng);
            let parent2 = tournament_select(&individuals, params.tournament_k, &mut rng);

            let (mut child_a, mut child_b) = if rng.random::<f64>() < params.crossover_rate {
                crossover(parent1, parent2, &mut rng)
            } else {
                (parent1.clone(), parent2.clone())
            };

            mutate(&mut child_a, input, &mut cache, params.mutation_rate, &mut rng);
            next_population.push(child_a);
            if next_population.len() < params.population_size {
                mutate(&mut child_b, input, &mut cache, params.mutation_rate, &mut rng);
                next_population.push(child_b);
            }
        }

        population = next_population;
        individuals = evaluate_population(&population, input, &params.soft_weights);
        generations_executed += 1;

        let candidate = best_of(&individuals);
        if candidate.fitness > best.fitness {
            best = candidate;
            stagnant_for = 0;
        } else {
            stagnant_for += 1;
        }

        if let Some(limit) = params.stagnation_limit {
            if stagnant_for >= limit {
                break;
            }
        }

        if let Some(callback) = progress {
            callback(generations_executed, best.fitness);
        }
    }

    Ok(RunResult {
        genes: best.chromosome.flatten(),
        fitness: best.fitness,
        hard_breakdown: best.report.hard,
        soft_breakdown: best.report.soft,
        generations_executed,
        cancelled,
    })
}

fn evaluate_population(
    population: &[Chromosome],
    input: &SchedulingInput,
    soft_weights: &HashMap<String, i64>,
) -> Vec<Individual> {
    population
        .par_iter()
        .map(|chromosome| {
            let genes = chromosome.flatten();
            let report = evaluate(&genes, input, soft_weights);
            let fitness = score(&report);
            Individual {
                chromosome: chromosome.clone(),
                fitness,
                report,
            }
        })
        .collect()
}

fn best_of(individuals: &[Individual]) -> Individual {
    individuals
        .iter()
        .max_by_key(|ind| ind.fitness)
        .map(|ind| Individual {
            chromosome: ind.chromosome.clone(),
            fitness: ind.fitness,
            report: ind.report.clone(),
        })
        .expect("population is never empty")
}

fn tournament_select<'a, R: Rng + ?Sized>(
    individuals: &'a [Individual],
    k: usize,
    rng: &mut R,
) -> &'a Chromosome {
    let sampled = (0..individuals.len()).choose_multiple(rng, k.min(individuals.len()));
    sampled
        .into_iter()
        .map(|i| &individuals[i])
        .max_by_key(|ind| ind.fitness)
        .map(|ind| &ind.chromosome)
        .expect("tournament sample is never empty")
}

/// §4.7 step 3: section-wise single-point crossover. Sections whose two
/// parent gene lists differ in length (demand changed mid-run — it never
/// does today, but the rule is defined regardless) are inherited unchanged
/// from the longer parent.
fn crossover<R: Rng + ?Sized>(p1: &Chromosome, p2: &Chromosome, rng: &mut R) -> (Chromosome, Chromosome) {
    let mut child_a = Chromosome::new();
    let mut child_b = Chromosome::new();

    for (section_id, genes1) in &p1.sections {
        let genes2 = p2.sections.get(section_id);
        match genes2 {
            Some(genes2) if genes2.len() == genes1.len() && genes1.len() >= 2 => {
                let cut = rng.random_range(1..genes1.len());
                let mut a = genes1[..cut].to_vec();
                a.extend_from_slice(&genes2[cut..]);
                let mut b = genes2[..cut].to_vec();
                b.extend_from_slice(&genes1[cut..]);
                child_a.sections.insert(section_id.clone(), a);
                child_b.sections.insert(section_id.clone(), b);
            }
            _ => {
                let longer = if genes2.map(Vec::len).unwrap_or(0) > genes1.len() {
                    genes2.cloned().unwrap_or_default()
                } else {
                    genes1.clone()
                };
                child_a.sections.insert(section_id.clone(), longer.clone());
                child_b.sections.insert(section_id.clone(), longer);
            }
        }
    }

    (child_a, child_b)
}

/// §4.7 step 4: per-gene conflict-aware mutation. Builds fresh occupancy
/// sets from the chromosome itself (mutation only needs to avoid conflicts
/// within this one individual) and reverts any attempt that would create
/// an overlap or break the subject-day rule.
fn mutate<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    input: &SchedulingInput,
    cache: &mut PlacementCache,
    mutation_rate: f64,
    rng: &mut R,
) {
    let slot_index = input.slot_index();
    let pday = input.periods_per_day;

    let mut used_section: HashMap<crate::types::SectionId, HashSet<SlotId>> = HashMap::new();
    let mut used_faculty: HashMap<crate::types::FacultyId, HashSet<SlotId>> = HashMap::new();
    let mut used_room: HashMap<crate::types::RoomId, HashSet<SlotId>> = HashMap::new();
    let mut subject_days: HashMap<(crate::types::SectionId, crate::types::SubjectId), HashSet<usize>> =
        HashMap::new();

    for (section_id, genes) in &chromosome.sections {
        for gene in genes {
            let occupied: Vec<SlotId> = gene.occupied_slots().collect();
            used_section.entry(section_id.clone()).or_default().extend(occupied.iter().copied());
            used_faculty.entry(gene.faculty_id.clone()).or_default().extend(occupied.iter().copied());
            used_room.entry(gene.room_id.clone()).or_default().extend(occupied.iter().copied());
            if let Some(day) = slot_index.day_of(gene.start_slot) {
                subject_days
                    .entry((section_id.clone(), gene.subject_id.clone()))
                    .or_default()
                    .insert(day);
            }
        }
    }

    let section_ids: Vec<crate::types::SectionId> = chromosome.sections.keys().cloned().collect();
    for section_id in section_ids {
        let gene_count = chromosome.sections[&section_id].len();
        for gene_ix in 0..gene_count {
            if rng.random::<f64>() >= mutation_rate {
                continue;
            }

            let gene = chromosome.sections[&section_id][gene_ix].clone();
            let occupied: Vec<SlotId> = gene.occupied_slots().collect();
            let Some(day) = slot_index.day_of(gene.start_slot) else {
                continue;
            };
            let Some(&(day_first, _)) = day_bounds(input).get(day) else {
                continue;
            };

            let intra_day_positions = pday as usize - gene.block_size as usize + 1;
            let offset = rng.random_range(0..intra_day_positions) as u32;
            let new_start = day_first + offset;

            let is_lab = input
                .subject_by_id(&gene.subject_id)
                .map(|s| s.kind == SubjectKind::Lab)
                .unwrap_or(false);
            let room_type = if is_lab { RoomType::Lab } else { RoomType::Lecture };
            let section = match input.section_by_id(&section_id) {
                Some(s) => s,
                None => continue,
            };
            let Some(new_room) = pick_room(input, cache, room_type, section.student_count, rng) else {
                continue;
            };

            remove_usage(&gene, &occupied, day, &section_id, &mut used_section, &mut used_faculty, &mut used_room, &mut subject_days);

            let new_occupied: Vec<SlotId> = (0..gene.block_size).map(|k| new_start + k).collect();
            let section_free = new_occupied.iter().all(|s| !used_section.get(&section_id).is_some_and(|set| set.contains(s)));
            let faculty_free = new_occupied.iter().all(|s| !used_faculty.get(&gene.faculty_id).is_some_and(|set| set.contains(s)));
            let room_free = new_occupied.iter().all(|s| !used_room.get(&new_room).is_some_and(|set| set.contains(s)));
            let subject_day_free = !subject_days
                .get(&(section_id.clone(), gene.subject_id.clone()))
                .is_some_and(|days| days.contains(&day));

            if section_free && faculty_free && room_free && subject_day_free {
                let new_gene = Gene {
                    start_slot: new_start,
                    room_id: new_room,
                    ..gene.clone()
                };
                record_usage(&new_gene, &new_occupied, day, &section_id, &mut used_section, &mut used_faculty, &mut used_room, &mut subject_days);
                chromosome.sections.get_mut(&section_id).unwrap()[gene_ix] = new_gene;
            } else {
                // Revert: put the original footprint back.
                record_usage(&gene, &occupied, day, &section_id, &mut used_section, &mut used_faculty, &mut used_room, &mut subject_days);
            }
        }
    }
}

fn day_bounds(input: &SchedulingInput) -> Vec<(SlotId, SlotId)> {
    let pday = input.periods_per_day as usize;
    input
        .slot_order
        .chunks(pday)
        .filter(|chunk| chunk.len() == pday)
        .map(|chunk| (chunk[0], chunk[chunk.len() - 1]))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn remove_usage(
    gene: &Gene,
    occupied: &[SlotId],
    day: usize,
    section_id: &crate::types::SectionId,
    used_section: &mut HashMap<crate::types::SectionId, HashSet<SlotId>>,
    used_faculty: &mut HashMap<crate::types::FacultyId, HashSet<SlotId>>,
    used_room: &mut HashMap<crate::types::RoomId, HashSet<SlotId>>,
    subject_days: &mut HashMap<(crate::types::SectionId, crate::types::SubjectId), HashSet<usize>>,
) {
    if let Some(set) = used_section.get_mut(section_id) {
        for s in occupied {
            set.remove(s);
        }
    }
    if let Some(set) = used_faculty.get_mut(&gene.faculty_id) {
        for s in occupied {
            set.remove(s);
        }
    }
    if let Some(set) = used_room.get_mut(&gene.room_id) {
        for s in occupied {
            set.remove(s);
        }
    }
    if let Some(days) = subject_days.get_mut(&(section_id.clone(), gene.subject_id.clone())) {
        days.remove(&day);
    }
}

#[allow(clippy::too_many_arguments)]
fn record_usage(
    gene: &Gene,
    occupied: &[SlotId],
    day: usize,
    section_id: &crate::types::SectionId,
    used_section: &mut HashMap<crate::types::SectionId, HashSet<SlotId>>,
    used_faculty: &mut HashMap<crate::types::FacultyId, HashSet<SlotId>>,
    used_room: &mut HashMap<crate::types::RoomId, HashSet<SlotId>>,
    subject_days: &mut HashMap<(crate::types::SectionId, crate::types::SubjectId), HashSet<usize>>,
) {
    used_section.entry(section_id.clone()).or_default().extend(occupied.iter().copied());
    used_faculty.entry(gene.faculty_id.clone()).or_default().extend(occupied.iter().copied());
    used_room.entry(gene.room_id.clone()).or_default().extend(occupied.iter().copied());
    subject_days
        .entry((section_id.clone(), gene.subject_id.clone()))
        .or_default()
        .insert(day);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CurriculumEdge, Faculty, FacultyId, Room, RoomId, Section, SectionId, Subject, SubjectId};
    use std::collections::HashSet as Set;

    fn small_input() -> SchedulingInput {
        SchedulingInput {
            sections: vec![Section {
                id: SectionId("sec-1".into()),
                name: "Sec 1".into(),
                student_count: 20,
            }],
            subjects: vec![Subject {
                id: SubjectId("math".into()),
                required_periods_per_week: 3,
                kind: SubjectKind::Theory,
                block_size: 1,
            }],
            curriculum: vec![CurriculumEdge {
                section_id: SectionId("sec-1".into()),
                subject_id: SubjectId("math".into()),
                faculty_id: FacultyId("f1".into()),
            }],
            rooms: vec![Room {
                id: RoomId("r1".into()),
                room_type: RoomType::Lecture,
                capacity: 30,
            }],
            faculty: vec![Faculty {
                id: FacultyId("f1".into()),
                max_weekly_load: 10,
            }],
            faculty_unavailability: HashMap::new(),
            usable_slots: (1..=5).collect(),
            lunch_slots: Set::new(),
            periods_per_day: 5,
            day_count: 1,
            slot_order: (1..=5).collect(),
        }
    }

    #[test]
    fn run_scheduler_reaches_hard_feasibility_on_a_trivial_input() {
        let input = small_input();
        let params = GaParams {
            population_size: 20,
            generations: 30,
            seed: Some(7),
            ..GaParams::default()
        };
        let result = run_scheduler(&input, &params, Arc::new(AtomicBool::new(false)), None).unwrap();
        assert_eq!(result.hard_breakdown.values().sum::<u32>(), 0, "{result:?}");
        assert!(!result.cancelled);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let input = small_input();
        let params = GaParams {
            population_size: 16,
            generations: 15,
            seed: Some(99),
            ..GaParams::default()
        };
        let a = run_scheduler(&input, &params, Arc::new(AtomicBool::new(false)), None).unwrap();
        let b = run_scheduler(&input, &params, Arc::new(AtomicBool::new(false)), None).unwrap();
        assert_eq!(a.fitness, b.fitness);
        assert_eq!(a.genes, b.genes);
    }

    #[test]
    fn cancellation_flag_is_honored() {
        let input = small_input();
        let params = GaParams {
            population_size: 10,
            generations: 1000,
            seed: Some(1),
            ..GaParams::default()
        };
        let cancel = Arc::new(AtomicBool::new(true));
        let result = run_scheduler(&input, &params, cancel, None).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations_executed, 0);
    }
}
