use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Activity, AssessmentScores, Category};
use crate::scoring::is_elevated;

pub const MAX_FALLBACK_ACTIVITIES: usize = 5;

const DEFAULT_PRIORITIES: [Category; 3] = [
    Category::StressRelief,
    Category::MoodEnhancement,
    Category::FocusProductivity,
];

/// Target categories in the order they should be filled, without repeats.
pub fn priority_categories(scores: &AssessmentScores) -> Vec<Category> {
    let mut priorities = Vec::new();

    if is_elevated(scores.stress_level) {
        priorities.extend([Category::StressRelief, Category::AnxietyReduction]);
    }
    if is_elevated(scores.anxiety_score) {
        priorities.extend([Category::AnxietyReduction, Category::StressRelief]);
    }
    if is_elevated(scores.depression_score) {
        priorities.extend([Category::DepressionUplift, Category::MoodEnhancement]);
    }
    if priorities.is_empty() {
        priorities.extend(DEFAULT_PRIORITIES);
    }

    let mut seen = HashSet::new();
    priorities.retain(|category| seen.insert(*category));
    priorities
}

/// Picks up to five catalog activities: one per priority category first,
/// then uniformly random backfill from whatever has not been picked.
pub fn select_fallback<R: Rng + ?Sized>(
    scores: &AssessmentScores,
    catalog: &[Activity],
    rng: &mut R,
) -> Vec<Activity> {
    let mut selected: Vec<&Activity> = Vec::new();
    let mut selected_ids: HashSet<u32> = HashSet::new();

    for category in priority_categories(scores) {
        if selected.len() >= MAX_FALLBACK_ACTIVITIES {
            break;
        }

        let matched = catalog
            .iter()
            .find(|activity| activity.category == category && !selected_ids.contains(&activity.id));

        if let Some(activity) = matched {
            selected_ids.insert(activity.id);
            selected.push(activity);
        }
    }

    while selected.len() < MAX_FALLBACK_ACTIVITIES {
        let remaining: Vec<&Activity> = catalog
            .iter()
            .filter(|activity| !selected_ids.contains(&activity.id))
            .collect();

        let Some(activity) = remaining.choose(&mut *rng).copied() else {
            break;
        };

        selected_ids.insert(activity.id);
        selected.push(activity);
    }

    selected
        .into_iter()
        .take(MAX_FALLBACK_ACTIVITIES)
        .cloned()
        .collect()
}
