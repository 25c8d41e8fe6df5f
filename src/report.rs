use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Activity, Category, Dimension, RecommendationResult};
use crate::scoring::{self, ScoreBand};

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
    pub total_minutes: u32,
}

pub fn summarize_by_category(activities: &[Activity]) -> Vec<CategorySummary> {
    let mut map: HashMap<Category, (usize, u32)> = HashMap::new();

    for activity in activities {
        let entry = map.entry(activity.category).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += activity.duration;
    }

    let mut summaries: Vec<CategorySummary> = map
        .into_iter()
        .map(|(category, (count, total_minutes))| CategorySummary {
            category,
            count,
            total_minutes,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    summaries
}

pub fn build_report(result: &RecommendationResult, generated_on: NaiveDate) -> String {
    let scores = &result.scores;
    let summaries = summarize_by_category(&result.activities);

    let mut output = String::new();

    let _ = writeln!(output, "# Wellness Assessment Report");
    let _ = writeln!(
        output,
        "Generated on {} using {}",
        generated_on,
        result.technique.label()
    );
    if result.is_local() {
        let _ = writeln!(
            output,
            "> Local mode: the recommendation service was unavailable, activities come from the built-in catalog."
        );
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Scores");

    for dimension in Dimension::ALL {
        let score = scores.score(dimension);
        let _ = writeln!(
            output,
            "- {}: {:.1}/10 ({})",
            dimension.label(),
            score,
            ScoreBand::from_score(score)
        );
    }
    let _ = writeln!(
        output,
        "- Sleep: {:.1} hours ({})",
        scores.sleep_hours,
        scoring::sleep_label(scores.sleep_hours)
    );
    let _ = writeln!(
        output,
        "- Steps: {} per day ({})",
        scores.steps_per_day,
        scoring::activity_label(scores.steps_per_day)
    );
    let _ = writeln!(output, "- Mood: {}", scores.mood);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Activity Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No activities were recommended.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} activities ({} minutes)",
                summary.category, summary.count, summary.total_minutes
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommended Activities");

    if result.activities.is_empty() {
        let _ = writeln!(output, "No activities were recommended.");
    }

    for activity in result.activities.iter() {
        let _ = writeln!(output);
        let _ = writeln!(output, "### {} (#{})", activity.name, activity.id);
        let _ = writeln!(
            output,
            "{} | {} | {} min | {} intensity",
            activity.activity_type, activity.category, activity.duration, activity.intensity
        );
        if let Some(matched) = &activity.match_percentage {
            let _ = writeln!(output, "Match: {matched}");
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "{}", activity.description);

        let benefits = list_items(&activity.benefits);
        if !benefits.is_empty() {
            let _ = writeln!(output);
            let _ = writeln!(output, "Benefits:");
            for benefit in benefits {
                let _ = writeln!(output, "- {benefit}");
            }
        }

        let steps = list_items(&activity.instructions);
        if !steps.is_empty() {
            let _ = writeln!(output);
            let _ = writeln!(output, "Instructions:");
            for (position, step) in steps.iter().enumerate() {
                let _ = writeln!(output, "{}. {}", position + 1, step);
            }
        }

        if let Some(link) = activity.video_link.as_deref().filter(|link| !link.is_empty()) {
            let _ = writeln!(output);
            let _ = writeln!(output, "Video: {link}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Next Steps");

    let elevated: Vec<&str> = Dimension::ALL
        .into_iter()
        .filter(|dimension| scoring::is_elevated(scores.score(*dimension)))
        .map(Dimension::label)
        .collect();

    if elevated.is_empty() {
        let _ = writeln!(
            output,
            "- Keep up your current routine and reassess in a couple of weeks."
        );
    } else {
        let _ = writeln!(
            output,
            "- Elevated: {}. Consider talking to a mental health professional.",
            elevated.join(", ")
        );
    }
    let _ = writeln!(output, "- Try one recommended activity each day this week.");

    output
}

/// Splits multi-line catalog text into items, dropping `-` bullets and
/// `1.` numbering.
fn list_items(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("- ").unwrap_or(line);
            match line.split_once(". ") {
                Some((marker, rest)) if !marker.is_empty() && marker.chars().all(|c| c.is_ascii_digit()) => {
                    rest.trim()
                }
                _ => line,
            }
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback_catalog;
    use crate::models::{AssessmentScores, Mood, Source, Technique};

    fn result(source: Source) -> RecommendationResult {
        RecommendationResult {
            scores: AssessmentScores {
                stress_level: 7.5,
                anxiety_score: 2.5,
                depression_score: 0.0,
                sleep_hours: 5.5,
                steps_per_day: 12000,
                mood: Mood::Stressed,
            },
            activities: fallback_catalog()[..3].to_vec(),
            source,
            technique: Technique::Hybrid,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    #[test]
    fn report_lists_scores_and_bands() {
        let report = build_report(&result(Source::Remote), date());

        assert!(report.starts_with("# Wellness Assessment Report"));
        assert!(report.contains("Generated on 2026-05-04 using Hybrid AI Engine"));
        assert!(report.contains("- Stress: 7.5/10 (High)"));
        assert!(report.contains("- Anxiety: 2.5/10 (Low)"));
        assert!(report.contains("- Sleep: 5.5 hours (Poor sleep)"));
        assert!(report.contains("- Steps: 12000 per day (Very Active)"));
        assert!(report.contains("Elevated: Stress."));
        assert!(!report.contains("Local mode"));
    }

    #[test]
    fn report_renders_activities() {
        let report = build_report(&result(Source::Remote), date());

        assert!(report.contains("### Ocean Breathing Meditation (#1)"));
        assert!(report.contains("- Calms the nervous system"));
        assert!(report.contains("1. Imagine ocean waves"));
        assert!(report.contains("Video: https://youtu.be/tEmt1Znux58"));
    }

    #[test]
    fn local_results_are_marked() {
        let report = build_report(&result(Source::Local), date());
        assert!(report.contains("> Local mode"));
    }

    #[test]
    fn empty_results_still_render() {
        let mut empty = result(Source::Remote);
        empty.activities.clear();
        let report = build_report(&empty, date());
        assert!(report.contains("No activities were recommended."));
    }

    #[test]
    fn categories_are_counted() {
        let mut activities = fallback_catalog().to_vec();
        activities.truncate(2);
        activities.push(activities[0].clone());

        let summaries = summarize_by_category(&activities);
        assert_eq!(summaries[0].category, Category::StressRelief);
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].total_minutes, 24);
        assert_eq!(summaries[1].count, 1);
    }

    #[test]
    fn list_markers_are_stripped() {
        assert_eq!(list_items("- one\n- two\n"), vec!["one", "two"]);
        assert_eq!(list_items("1. first\n10. tenth"), vec!["first", "tenth"]);
        assert_eq!(list_items("Plain sentence. More"), vec!["Plain sentence. More"]);
        assert!(list_items("").is_empty());
    }
}
