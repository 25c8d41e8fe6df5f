use once_cell::sync::Lazy;

use crate::models::{Activity, Category, Intensity};

struct SeedActivity {
    id: u32,
    name: &'static str,
    activity_type: &'static str,
    category: Category,
    duration: u32,
    intensity: Intensity,
    benefits: &'static str,
    recommended_when: &'static str,
    instructions: &'static str,
    tips: &'static str,
    precautions: &'static str,
    equipment: &'static str,
    video_link: &'static str,
    description: &'static str,
}

impl SeedActivity {
    fn into_activity(self) -> Activity {
        Activity {
            id: self.id,
            name: self.name.to_string(),
            activity_type: self.activity_type.to_string(),
            category: self.category,
            duration: self.duration,
            intensity: self.intensity,
            benefits: self.benefits.to_string(),
            recommended_when: self.recommended_when.to_string(),
            instructions: self.instructions.to_string(),
            tips: self.tips.to_string(),
            precautions: self.precautions.to_string(),
            equipment: self.equipment.to_string(),
            video_link: Some(self.video_link.to_string()),
            description: self.description.to_string(),
            match_percentage: None,
        }
    }
}

static CATALOG: Lazy<Vec<Activity>> = Lazy::new(|| {
    let seeds = vec![
        SeedActivity {
            id: 1,
            name: "Ocean Breathing Meditation",
            activity_type: "Breathing Exercise",
            category: Category::StressRelief,
            duration: 12,
            intensity: Intensity::Low,
            benefits: "- Calms the nervous system\n- Reduces cortisol levels\n- Improves oxygen flow\n- Enhances mental clarity",
            recommended_when: "When feeling overwhelmed or stressed",
            instructions: "1. Imagine ocean waves\n2. Inhale as wave comes in\n3. Hold at the peak\n4. Exhale as wave recedes\n5. Sync with natural rhythm",
            tips: "- Use calming music\n- Practice near water\n- Focus on sound of breath",
            precautions: "- Stop if dizzy\n- Sit comfortably",
            equipment: "None",
            video_link: "https://youtu.be/tEmt1Znux58",
            description: "A wave-like breathing pattern to mimic ocean rhythms",
        },
        SeedActivity {
            id: 2,
            name: "Sunrise Yoga Flow",
            activity_type: "Yoga",
            category: Category::MoodEnhancement,
            duration: 25,
            intensity: Intensity::Medium,
            benefits: "- Boosts serotonin\n- Increases energy\n- Improves flexibility\n- Enhances positivity",
            recommended_when: "Morning or when feeling low energy",
            instructions: "1. Gentle warm-up stretches\n2. Sun salutation sequence\n3. Standing poses\n4. Cool-down stretches\n5. Final relaxation",
            tips: "- Practice facing east\n- Wear comfortable clothes\n- Stay hydrated",
            precautions: "- Avoid if injured\n- Modify as needed",
            equipment: "Yoga mat",
            video_link: "https://youtu.be/v7AYKMP6rOE",
            description: "Morning yoga sequence to energize and uplift",
        },
        SeedActivity {
            id: 3,
            name: "Forest Sound Bath",
            activity_type: "Meditation",
            category: Category::AnxietyReduction,
            duration: 18,
            intensity: Intensity::Low,
            benefits: "- Reduces anxiety\n- Lowers heart rate\n- Improves focus\n- Promotes relaxation",
            recommended_when: "When feeling anxious or restless",
            instructions: "1. Find quiet space\n2. Play forest sounds\n3. Focus on different sounds\n4. Breathe naturally\n5. Gradually expand awareness",
            tips: "- Use headphones\n- Dim the lights\n- Add essential oils",
            precautions: "- Not while driving\n- Use moderate volume",
            equipment: "Headphones",
            video_link: "https://youtu.be/H_uc-uQ3Nkc",
            description: "Nature sound meditation for anxiety relief",
        },
        SeedActivity {
            id: 4,
            name: "Gratitude Garden Journal",
            activity_type: "Journaling",
            category: Category::DepressionUplift,
            duration: 15,
            intensity: Intensity::Low,
            benefits: "- Shifts perspective\n- Increases positivity\n- Enhances mindfulness\n- Improves sleep",
            recommended_when: "Evening or when feeling down",
            instructions: "1. Plant seeds of gratitude\n2. Water with details\n3. Watch growth daily\n4. Harvest insights weekly",
            tips: "- Use colored pens\n- Add drawings\n- Review weekly",
            precautions: "- Be gentle\n- Don't force positivity",
            equipment: "Journal",
            video_link: "https://youtu.be/4iA4zz_qto",
            description: "Creative journaling using garden metaphor",
        },
        SeedActivity {
            id: 5,
            name: "Energy Dance Break",
            activity_type: "Physical Exercise",
            category: Category::FocusProductivity,
            duration: 10,
            intensity: Intensity::Medium,
            benefits: "- Increases dopamine\n- Boosts circulation\n- Enhances creativity\n- Reduces fatigue",
            recommended_when: "Afternoon slump or when stuck",
            instructions: "1. Play favorite upbeat song\n2. Move freely to rhythm\n3. Express through movement\n4. Gradually slow down\n5. End with deep breath",
            tips: "- No judgment\n- Have fun\n- Involve friends",
            precautions: "- Clear space\n- Wear supportive shoes",
            equipment: "Music player",
            video_link: "https://youtu.be/ah4PAK18Rtg",
            description: "Short dance session to boost energy and focus",
        },
        SeedActivity {
            id: 6,
            name: "Progressive Muscle Relaxation",
            activity_type: "Relaxation",
            category: Category::SleepImprovement,
            duration: 15,
            intensity: Intensity::Low,
            benefits: "- Releases tension\n- Reduces anxiety symptoms\n- Promotes better sleep",
            recommended_when: "When feeling physically tense or before bed",
            instructions: "1. Lie down comfortably\n2. Tense feet muscles for 5 seconds\n3. Release and notice relaxation\n4. Move upward through body\n5. End with facial muscles",
            tips: "- Practice before bed\n- Breathe slowly between groups",
            precautions: "- Avoid over-tensing\n- Skip injured areas",
            equipment: "Yoga mat or comfortable surface",
            video_link: "https://www.youtube.com/watch?v=86HUcX8ZtAk",
            description: "Systematic tensing and relaxing of muscle groups to relieve tension",
        },
        SeedActivity {
            id: 7,
            name: "Mindful Walking",
            activity_type: "Walking",
            category: Category::PhysicalActivity,
            duration: 20,
            intensity: Intensity::Low,
            benefits: "- Reduces stress\n- Improves mood\n- Increases mindfulness\n- Adds daily steps",
            recommended_when: "When feeling disconnected or need mental clarity",
            instructions: "1. Walk at natural pace\n2. Notice sensations in feet\n3. Pay attention to breathing\n4. Observe surroundings without judgment\n5. Continue for 20 minutes",
            tips: "- Walk in nature if possible\n- Leave phone behind",
            precautions: "- Stay aware of surroundings",
            equipment: "Comfortable shoes",
            video_link: "https://www.youtube.com/watch?v=5TiGackg35s",
            description: "Walking meditation to bring awareness to the present moment",
        },
        SeedActivity {
            id: 8,
            name: "Deep Breathing",
            activity_type: "Breathing Exercise",
            category: Category::StressRelief,
            duration: 10,
            intensity: Intensity::Low,
            benefits: "- Reduces anxiety\n- Lowers blood pressure\n- Promotes relaxation\n- Improves focus",
            recommended_when: "When feeling anxious or overwhelmed",
            instructions: "1. Sit comfortably with straight back\n2. Inhale deeply through nose for 4 counts\n3. Hold breath for 4 counts\n4. Exhale slowly through mouth for 6 counts\n5. Repeat for 10 minutes",
            tips: "- Practice in quiet environment\n- Focus on belly breathing",
            precautions: "- Stop if feeling dizzy",
            equipment: "None",
            video_link: "https://www.youtube.com/watch?v=tEmt1Znux58",
            description: "Controlled breathing techniques to calm the nervous system",
        },
    ];

    seeds.into_iter().map(SeedActivity::into_activity).collect()
});

/// Built-in activities for offline recommendations. Read-only and shared
/// across every caller.
pub fn fallback_catalog() -> &'static [Activity] {
    &CATALOG
}
