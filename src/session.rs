use serde_json::{Map, Value};

use crate::models::{
    AnswerValue, AssessmentScores, Dimension, LifestyleInput, Mood, QuestionnaireAnswers,
    DEFAULT_SLEEP_HOURS, DEFAULT_STEPS_PER_DAY, QUESTIONS_PER_DIMENSION,
};
use crate::scoring;

pub const MAX_SLEEP_HOURS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    BasicInfo,
    Stress,
    Anxiety,
    Depression,
}

impl Step {
    pub fn next(self) -> Self {
        match self {
            Step::BasicInfo => Step::Stress,
            Step::Stress => Step::Anxiety,
            Step::Anxiety | Step::Depression => Step::Depression,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Step::BasicInfo | Step::Stress => Step::BasicInfo,
            Step::Anxiety => Step::Stress,
            Step::Depression => Step::Anxiety,
        }
    }

    pub fn dimension(self) -> Option<Dimension> {
        match self {
            Step::BasicInfo => None,
            Step::Stress => Some(Dimension::Stress),
            Step::Anxiety => Some(Dimension::Anxiety),
            Step::Depression => Some(Dimension::Depression),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::BasicInfo => "Basic Info",
            Step::Stress => "Stress",
            Step::Anxiety => "Anxiety",
            Step::Depression => "Depression",
        }
    }

    pub fn progress_percent(self) -> u8 {
        match self {
            Step::BasicInfo => 25,
            Step::Stress => 50,
            Step::Anxiety => 75,
            Step::Depression => 100,
        }
    }

    pub fn is_last(self) -> bool {
        self == Step::Depression
    }
}

/// Frozen questionnaire state handed to scoring and the orchestrator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionInput {
    pub answers: QuestionnaireAnswers,
    pub lifestyle: LifestyleInput,
}

impl SessionInput {
    pub fn scores(&self) -> AssessmentScores {
        scoring::compute_scores(&self.answers, &self.lifestyle)
    }

    /// Builds an input from loose flat fields (`stress_1`, `Sleep_Hours`, ...).
    /// Missing or unreadable answers count as `Never`; lifestyle values fall
    /// back to their defaults.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut answers = QuestionnaireAnswers::default();

        for dimension in Dimension::ALL {
            for question in 1..=QUESTIONS_PER_DIMENSION {
                let value = fields
                    .get(&dimension.field_name(question))
                    .and_then(Value::as_str)
                    .and_then(AnswerValue::parse)
                    .unwrap_or_default();
                answers.set(dimension, question, value);
            }
        }

        let sleep_hours = lookup(fields, &["Sleep_Hours", "sleep_hours"])
            .and_then(as_number)
            .unwrap_or(DEFAULT_SLEEP_HOURS);

        let steps_per_day = lookup(fields, &["Steps_Per_Day", "steps_per_day"])
            .and_then(as_number)
            .map(|steps| steps.max(0.0).min(f64::from(u32::MAX)).round() as u32)
            .unwrap_or(DEFAULT_STEPS_PER_DAY);

        let mood = lookup(fields, &["Mood", "mood"])
            .and_then(Value::as_str)
            .and_then(Mood::parse)
            .unwrap_or_default();

        Self {
            answers,
            lifestyle: LifestyleInput {
                sleep_hours,
                steps_per_day,
                mood,
            },
        }
    }

    /// Flat wire fields: every answer plus the lifestyle values.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();

        for dimension in Dimension::ALL {
            for question in 1..=QUESTIONS_PER_DIMENSION {
                let answer = self.answers.answer(dimension, question);
                fields.insert(
                    dimension.field_name(question),
                    Value::String(answer.as_str().to_string()),
                );
            }
        }

        fields.insert("Sleep_Hours".to_string(), Value::from(self.lifestyle.sleep_hours));
        fields.insert("Steps_Per_Day".to_string(), Value::from(self.lifestyle.steps_per_day));
        fields.insert(
            "Mood".to_string(),
            Value::String(self.lifestyle.mood.as_str().to_string()),
        );
        fields
    }
}

fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| fields.get(*key))
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// In-progress questionnaire: basic info, then stress, anxiety and
/// depression questions. Moving between steps never drops answers.
#[derive(Debug, Clone, Default)]
pub struct AssessmentSession {
    step: Step,
    answers: QuestionnaireAnswers,
    lifestyle: LifestyleInput,
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn answers(&self) -> &QuestionnaireAnswers {
        &self.answers
    }

    pub fn lifestyle(&self) -> &LifestyleInput {
        &self.lifestyle
    }

    pub fn set_answer(&mut self, dimension: Dimension, question: usize, value: AnswerValue) -> bool {
        self.answers.set(dimension, question, value)
    }

    pub fn set_sleep_hours(&mut self, hours: f64) {
        if hours.is_finite() {
            self.lifestyle.sleep_hours = hours.clamp(0.0, MAX_SLEEP_HOURS);
        }
    }

    pub fn set_steps_per_day(&mut self, steps: u32) {
        self.lifestyle.steps_per_day = steps;
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.lifestyle.mood = mood;
    }

    pub fn next(&mut self) -> Step {
        self.step = self.step.next();
        self.step
    }

    pub fn back(&mut self) -> Step {
        self.step = self.step.previous();
        self.step
    }

    pub fn progress_percent(&self) -> u8 {
        self.step.progress_percent()
    }

    pub fn submit(&self) -> SessionInput {
        SessionInput {
            answers: self.answers.clone(),
            lifestyle: self.lifestyle.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
