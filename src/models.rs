use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

pub const QUESTIONS_PER_DIMENSION: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Stress,
    Anxiety,
    Depression,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Stress, Dimension::Anxiety, Dimension::Depression];

    pub fn key(self) -> &'static str {
        match self {
            Dimension::Stress => "stress",
            Dimension::Anxiety => "anxiety",
            Dimension::Depression => "depression",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Stress => "Stress",
            Dimension::Anxiety => "Anxiety",
            Dimension::Depression => "Depression",
        }
    }

    /// Flat wire name of a question, e.g. `stress_3`. Questions are 1-based.
    pub fn field_name(self, question: usize) -> String {
        format!("{}_{}", self.key(), question)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnswerValue {
    #[default]
    Never,
    Sometimes,
    Often,
    #[serde(rename = "Almost Always", alias = "AlmostAlways")]
    AlmostAlways,
}

impl AnswerValue {
    #[cfg(test)]
    pub const ALL: [AnswerValue; 4] = [
        AnswerValue::Never,
        AnswerValue::Sometimes,
        AnswerValue::Often,
        AnswerValue::AlmostAlways,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerValue::Never => "Never",
            AnswerValue::Sometimes => "Sometimes",
            AnswerValue::Often => "Often",
            AnswerValue::AlmostAlways => "Almost Always",
        }
    }

    /// Lenient parse used for answer files and the interactive prompt.
    /// Accepts the wire spelling in any case and the N/S/O/A shorthands.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "never" | "n" => Some(AnswerValue::Never),
            "sometimes" | "s" => Some(AnswerValue::Sometimes),
            "often" | "o" => Some(AnswerValue::Often),
            "almost always" | "almostalways" | "almost_always" | "a" => {
                Some(AnswerValue::AlmostAlways)
            }
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Calm,
    #[default]
    Neutral,
    Tired,
    Stressed,
    Angry,
    Sad,
    Anxious,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Neutral,
        Mood::Tired,
        Mood::Stressed,
        Mood::Angry,
        Mood::Sad,
        Mood::Anxious,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Calm => "Calm",
            Mood::Neutral => "Neutral",
            Mood::Tired => "Tired",
            Mood::Stressed => "Stressed",
            Mood::Angry => "Angry",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ten answer slots per dimension, every slot pre-filled with `Never`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionnaireAnswers {
    stress: [AnswerValue; QUESTIONS_PER_DIMENSION],
    anxiety: [AnswerValue; QUESTIONS_PER_DIMENSION],
    depression: [AnswerValue; QUESTIONS_PER_DIMENSION],
}

impl QuestionnaireAnswers {
    #[cfg(test)]
    pub fn uniform(value: AnswerValue) -> Self {
        Self {
            stress: [value; QUESTIONS_PER_DIMENSION],
            anxiety: [value; QUESTIONS_PER_DIMENSION],
            depression: [value; QUESTIONS_PER_DIMENSION],
        }
    }

    pub fn answers(&self, dimension: Dimension) -> &[AnswerValue; QUESTIONS_PER_DIMENSION] {
        match dimension {
            Dimension::Stress => &self.stress,
            Dimension::Anxiety => &self.anxiety,
            Dimension::Depression => &self.depression,
        }
    }

    fn answers_mut(&mut self, dimension: Dimension) -> &mut [AnswerValue; QUESTIONS_PER_DIMENSION] {
        match dimension {
            Dimension::Stress => &mut self.stress,
            Dimension::Anxiety => &mut self.anxiety,
            Dimension::Depression => &mut self.depression,
        }
    }

    /// Answer for a 1-based question; anything out of range reads as `Never`.
    pub fn answer(&self, dimension: Dimension, question: usize) -> AnswerValue {
        question
            .checked_sub(1)
            .and_then(|index| self.answers(dimension).get(index).copied())
            .unwrap_or_default()
    }

    /// Stores an answer for a 1-based question. Returns false and leaves the
    /// answers untouched when the question index is out of range.
    pub fn set(&mut self, dimension: Dimension, question: usize, value: AnswerValue) -> bool {
        match question
            .checked_sub(1)
            .and_then(|index| self.answers_mut(dimension).get_mut(index))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleInput {
    #[serde(rename = "Sleep_Hours")]
    pub sleep_hours: f64,
    #[serde(rename = "Steps_Per_Day")]
    pub steps_per_day: u32,
    #[serde(rename = "Mood")]
    pub mood: Mood,
}

pub const DEFAULT_SLEEP_HOURS: f64 = 7.0;
pub const DEFAULT_STEPS_PER_DAY: u32 = 5000;

impl Default for LifestyleInput {
    fn default() -> Self {
        Self {
            sleep_hours: DEFAULT_SLEEP_HOURS,
            steps_per_day: DEFAULT_STEPS_PER_DAY,
            mood: Mood::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentScores {
    #[serde(rename = "Stress_Level")]
    pub stress_level: f64,
    #[serde(rename = "Anxiety_Score")]
    pub anxiety_score: f64,
    #[serde(rename = "Depression_Score")]
    pub depression_score: f64,
    #[serde(rename = "Sleep_Hours")]
    pub sleep_hours: f64,
    #[serde(rename = "Steps_Per_Day")]
    pub steps_per_day: u32,
    #[serde(rename = "Mood")]
    pub mood: Mood,
}

impl AssessmentScores {
    pub fn score(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Stress => self.stress_level,
            Dimension::Anxiety => self.anxiety_score,
            Dimension::Depression => self.depression_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Stress Relief")]
    StressRelief,
    #[serde(rename = "Anxiety Reduction")]
    AnxietyReduction,
    #[serde(rename = "Depression Uplift")]
    DepressionUplift,
    #[serde(rename = "Mood Enhancement")]
    MoodEnhancement,
    #[serde(rename = "Focus & Productivity")]
    FocusProductivity,
    #[serde(rename = "Sleep Improvement")]
    SleepImprovement,
    #[serde(rename = "Physical Activity")]
    PhysicalActivity,
    #[serde(rename = "General Wellness")]
    GeneralWellness,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::StressRelief => "Stress Relief",
            Category::AnxietyReduction => "Anxiety Reduction",
            Category::DepressionUplift => "Depression Uplift",
            Category::MoodEnhancement => "Mood Enhancement",
            Category::FocusProductivity => "Focus & Productivity",
            Category::SleepImprovement => "Sleep Improvement",
            Category::PhysicalActivity => "Physical Activity",
            Category::GeneralWellness => "General Wellness",
        }
    }

    /// Unknown labels land in `GeneralWellness`.
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "stressrelief" => Category::StressRelief,
            "anxietyreduction" => Category::AnxietyReduction,
            "depressionuplift" => Category::DepressionUplift,
            "moodenhancement" => Category::MoodEnhancement,
            "focusproductivity" | "focusandproductivity" => Category::FocusProductivity,
            "sleepimprovement" => Category::SleepImprovement,
            "physicalactivity" => Category::PhysicalActivity,
            _ => Category::GeneralWellness,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Intensity::Low),
            "medium" | "moderate" => Some(Intensity::Medium),
            "high" => Some(Intensity::High),
            _ => None,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub category: Category,
    pub duration: u32,
    pub intensity: Intensity,
    pub benefits: String,
    pub recommended_when: String,
    pub instructions: String,
    pub tips: String,
    pub precautions: String,
    pub equipment: String,
    pub video_link: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_percentage: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Local,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote => f.write_str("remote"),
            Source::Local => f.write_str("local"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    #[default]
    Hybrid,
    Cosine,
}

impl Technique {
    pub fn label(self) -> &'static str {
        match self {
            Technique::Hybrid => "Hybrid AI Engine",
            Technique::Cosine => "Cosine Similarity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub scores: AssessmentScores,
    pub activities: Vec<Activity>,
    pub source: Source,
    pub technique: Technique,
}

impl RecommendationResult {
    pub fn is_local(&self) -> bool {
        self.source == Source::Local
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub user_id: String,
    pub activity_id: u32,
    pub rating: u8,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
    pub scores: AssessmentScores,
}

impl Feedback {
    pub fn new(
        user_id: impl Into<String>,
        activity_id: u32,
        rating: u8,
        comment: impl Into<String>,
        scores: AssessmentScores,
    ) -> Result<Self, FeedbackError> {
        if !(1..=5).contains(&rating) {
            return Err(FeedbackError::InvalidRating(rating));
        }

        Ok(Self {
            user_id: user_id.into(),
            activity_id,
            rating,
            comment: comment.into(),
            timestamp: Utc::now(),
            scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_parse_accepts_wire_and_shorthand() {
        assert_eq!(AnswerValue::parse("Almost Always"), Some(AnswerValue::AlmostAlways));
        assert_eq!(AnswerValue::parse("almostalways"), Some(AnswerValue::AlmostAlways));
        assert_eq!(AnswerValue::parse(" o "), Some(AnswerValue::Often));
        assert_eq!(AnswerValue::parse("rarely"), None);
    }

    #[test]
    fn answer_serializes_with_space() {
        let json = serde_json::to_string(&AnswerValue::AlmostAlways).unwrap();
        assert_eq!(json, "\"Almost Always\"");
    }

    #[test]
    fn out_of_range_questions_are_ignored() {
        let mut answers = QuestionnaireAnswers::default();
        assert!(!answers.set(Dimension::Stress, 0, AnswerValue::Often));
        assert!(!answers.set(Dimension::Stress, 11, AnswerValue::Often));
        assert_eq!(answers, QuestionnaireAnswers::default());
        assert_eq!(answers.answer(Dimension::Stress, 42), AnswerValue::Never);

        assert!(answers.set(Dimension::Anxiety, 10, AnswerValue::Often));
        assert_eq!(answers.answer(Dimension::Anxiety, 10), AnswerValue::Often);
    }

    #[test]
    fn category_parse_is_lenient() {
        assert_eq!(Category::parse("Focus & Productivity"), Category::FocusProductivity);
        assert_eq!(Category::parse("stress relief"), Category::StressRelief);
        assert_eq!(Category::parse("Gardening"), Category::GeneralWellness);
    }

    #[test]
    fn mood_parse_falls_back_to_none() {
        assert_eq!(Mood::parse("tired"), Some(Mood::Tired));
        assert_eq!(Mood::parse("Okay"), None);
    }

    #[test]
    fn feedback_rejects_out_of_range_rating() {
        let scores = AssessmentScores {
            stress_level: 1.0,
            anxiety_score: 1.0,
            depression_score: 1.0,
            sleep_hours: 7.0,
            steps_per_day: 5000,
            mood: Mood::Calm,
        };

        assert!(matches!(
            Feedback::new("user", 1, 0, "", scores.clone()),
            Err(FeedbackError::InvalidRating(0))
        ));
        assert!(Feedback::new("user", 1, 6, "", scores.clone()).is_err());
        assert!(Feedback::new("user", 1, 5, "great", scores).is_ok());
    }
}
