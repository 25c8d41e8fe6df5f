use std::fmt;

use crate::models::{AnswerValue, AssessmentScores, Dimension, LifestyleInput, QuestionnaireAnswers};

pub const MAX_SCORE: f64 = 10.0;
pub const ELEVATED_THRESHOLD: f64 = 7.0;

pub fn compute_scores(answers: &QuestionnaireAnswers, lifestyle: &LifestyleInput) -> AssessmentScores {
    AssessmentScores {
        stress_level: dimension_score(answers, Dimension::Stress),
        anxiety_score: dimension_score(answers, Dimension::Anxiety),
        depression_score: dimension_score(answers, Dimension::Depression),
        sleep_hours: lifestyle.sleep_hours,
        steps_per_day: lifestyle.steps_per_day,
        mood: lifestyle.mood,
    }
}

pub fn dimension_score(answers: &QuestionnaireAnswers, dimension: Dimension) -> f64 {
    let raw: f64 = answers
        .answers(dimension)
        .iter()
        .map(|answer| answer_weight(*answer))
        .sum();

    round_to_tenth(raw.min(MAX_SCORE))
}

pub fn answer_weight(answer: AnswerValue) -> f64 {
    match answer {
        AnswerValue::Never => 0.0,
        AnswerValue::Sometimes => 0.25,
        AnswerValue::Often => 0.75,
        AnswerValue::AlmostAlways => 1.0,
    }
}

/// Half away from zero; scores are never negative so this is half-up.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn is_elevated(score: f64) -> bool {
    score >= ELEVATED_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score <= 3.0 {
            ScoreBand::Low
        } else if score <= 6.0 {
            ScoreBand::Moderate
        } else if score <= 8.0 {
            ScoreBand::High
        } else {
            ScoreBand::VeryHigh
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreBand::Low => "Low",
            ScoreBand::Moderate => "Moderate",
            ScoreBand::High => "High",
            ScoreBand::VeryHigh => "Very High",
        };
        f.write_str(label)
    }
}

pub fn sleep_label(hours: f64) -> &'static str {
    if hours < 6.0 {
        "Poor sleep"
    } else if hours < 8.0 {
        "Average sleep"
    } else {
        "Good sleep"
    }
}

pub fn activity_label(steps: u32) -> &'static str {
    match steps {
        0..=4_999 => "Sedentary",
        5_000..=9_999 => "Moderately Active",
        _ => "Very Active",
    }
}
