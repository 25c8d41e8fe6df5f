use crate::models::{Dimension, QUESTIONS_PER_DIMENSION};

const STRESS: [&str; QUESTIONS_PER_DIMENSION] = [
    "I find it hard to wind down.",
    "I feel that I am using a lot of nervous energy.",
    "I tend to overreact to situations.",
    "I feel that I am rather touchy.",
    "I feel that I am getting agitated easily.",
    "I find it difficult to relax after work or school.",
    "I feel nervous or anxious without any apparent reason.",
    "I feel that I am under pressure in my daily life.",
    "I find it hard to control my irritations.",
    "I feel tense or 'on edge' frequently.",
];

const ANXIETY: [&str; QUESTIONS_PER_DIMENSION] = [
    "I feel nervous, anxious, or on edge.",
    "I have panic or sudden feelings of fear.",
    "I worry excessively about different things.",
    "I find it difficult to control my worrying.",
    "I have trouble relaxing.",
    "I feel restless or unable to sit still.",
    "I feel heart racing or palpitations.",
    "I feel short of breath or tense physically.",
    "I have irrational fears about certain situations.",
    "I feel impending doom or that something bad will happen.",
];

const DEPRESSION: [&str; QUESTIONS_PER_DIMENSION] = [
    "I feel downhearted or blue.",
    "I have lost interest in things I usually enjoy.",
    "I feel that life is meaningless.",
    "I feel hopeless about the future.",
    "I feel that I am a failure.",
    "I have trouble sleeping or sleep too much.",
    "I feel fatigued or low on energy.",
    "I have difficulty concentrating on tasks.",
    "I feel that I am not worth much.",
    "I experience little pleasure in daily activities.",
];

pub fn questions(dimension: Dimension) -> &'static [&'static str; QUESTIONS_PER_DIMENSION] {
    match dimension {
        Dimension::Stress => &STRESS,
        Dimension::Anxiety => &ANXIETY,
        Dimension::Depression => &DEPRESSION,
    }
}

/// Text of a 1-based question.
pub fn question_text(dimension: Dimension, question: usize) -> Option<&'static str> {
    questions(dimension).get(question.checked_sub(1)?).copied()
}
