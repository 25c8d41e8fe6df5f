use serde_json::{Map, Value};

use crate::models::{Activity, Category, Intensity};

const DEFAULT_NAME: &str = "Activity";
const DEFAULT_TYPE: &str = "Wellness";
const DEFAULT_DURATION_MINUTES: u32 = 15;
const DEFAULT_DESCRIPTION: &str = "Personalized activity based on your assessment";

const ID_KEYS: &[&str] = &["id", "activity_id", "Activity_ID"];
const NAME_KEYS: &[&str] = &["name", "Activity_Type"];
const DURATION_KEYS: &[&str] = &["duration", "Duration_Minutes"];
const INTENSITY_KEYS: &[&str] = &["intensity", "Intensity_Level"];
const TYPE_KEYS: &[&str] = &["type", "category", "Activity_Category"];
const CATEGORY_KEYS: &[&str] = &["category", "Activity_Category", "type"];
const DESCRIPTION_KEYS: &[&str] = &["one_line_description", "description", "Short_Description"];

/// Maps one remote activity object onto the canonical shape. Every field
/// accepts its legacy aliases and falls back to a default, so this never
/// fails. `index` is the 0-based position in the response and provides the
/// id when none is present.
pub fn normalize_activity(raw: &Value, index: usize) -> Activity {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);
    let fallback_id = u32::try_from(index + 1).unwrap_or(u32::MAX);

    Activity {
        id: pick_u32(fields, ID_KEYS).unwrap_or(fallback_id),
        name: pick_text(fields, NAME_KEYS).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        activity_type: pick_text(fields, TYPE_KEYS).unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        category: pick_text(fields, CATEGORY_KEYS)
            .map(|label| Category::parse(&label))
            .unwrap_or(Category::GeneralWellness),
        duration: pick_u32(fields, DURATION_KEYS).unwrap_or(DEFAULT_DURATION_MINUTES),
        intensity: pick_text(fields, INTENSITY_KEYS)
            .and_then(|label| Intensity::parse(&label))
            .unwrap_or_default(),
        benefits: text_or_empty(fields, &["benefits", "Benefits"]),
        recommended_when: text_or_empty(fields, &["recommended_when", "Recommended_When"]),
        instructions: text_or_empty(fields, &["instructions", "Step_By_Step_Instructions"]),
        tips: text_or_empty(fields, &["tips", "Tips"]),
        precautions: text_or_empty(fields, &["precautions", "Precautions"]),
        equipment: text_or_empty(fields, &["equipment", "Required_Equipment"]),
        video_link: pick_text(fields, &["video_link", "Video_Link"]),
        description: pick_text(fields, DESCRIPTION_KEYS)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        match_percentage: pick_text(fields, &["match_percentage"]),
    }
}

pub fn normalize_activities(raw: &[Value]) -> Vec<Activity> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| normalize_activity(value, index))
        .collect()
}

/// First alias holding a non-empty string or a number.
fn pick_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// First alias holding a positive whole number, as a JSON number or a
/// numeric string such as `"15"`.
fn pick_u32(fields: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|key| {
        let parsed = match fields.get(*key)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }?;

        if parsed.is_finite() && parsed >= 1.0 && parsed <= f64::from(u32::MAX) {
            Some(parsed.round() as u32)
        } else {
            None
        }
    })
}

fn text_or_empty(fields: &Map<String, Value>, keys: &[&str]) -> String {
    pick_text(fields, keys).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_fields_pass_through() {
        let raw = json!({
            "id": 12,
            "name": "Body Scan",
            "type": "Meditation",
            "category": "Anxiety Reduction",
            "duration": 20,
            "intensity": "Low",
            "benefits": "- Calms\n- Grounds",
            "video_link": "https://example.com/scan",
            "description": "Slow attention sweep",
        });

        let activity = normalize_activity(&raw, 0);
        assert_eq!(activity.id, 12);
        assert_eq!(activity.name, "Body Scan");
        assert_eq!(activity.activity_type, "Meditation");
        assert_eq!(activity.category, Category::AnxietyReduction);
        assert_eq!(activity.duration, 20);
        assert_eq!(activity.intensity, Intensity::Low);
        assert_eq!(activity.benefits, "- Calms\n- Grounds");
        assert_eq!(activity.video_link.as_deref(), Some("https://example.com/scan"));
        assert_eq!(activity.description, "Slow attention sweep");
    }

    #[test]
    fn legacy_aliases_are_accepted() {
        let raw = json!({
            "activity_id": 7,
            "Activity_Type": "Deep Breathing",
            "Activity_Category": "Stress Relief",
            "Duration_Minutes": "10",
            "Intensity_Level": "High",
            "Step_By_Step_Instructions": "1. Inhale\n2. Exhale",
            "Required_Equipment": "None",
            "one_line_description": "Controlled breathing",
            "match_percentage": "91.2%",
        });

        let activity = normalize_activity(&raw, 3);
        assert_eq!(activity.id, 7);
        assert_eq!(activity.name, "Deep Breathing");
        assert_eq!(activity.category, Category::StressRelief);
        assert_eq!(activity.activity_type, "Stress Relief");
        assert_eq!(activity.duration, 10);
        assert_eq!(activity.intensity, Intensity::High);
        assert_eq!(activity.instructions, "1. Inhale\n2. Exhale");
        assert_eq!(activity.equipment, "None");
        assert_eq!(activity.description, "Controlled breathing");
        assert_eq!(activity.match_percentage.as_deref(), Some("91.2%"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let activity = normalize_activity(&json!({}), 4);
        assert_eq!(activity.id, 5);
        assert_eq!(activity.name, DEFAULT_NAME);
        assert_eq!(activity.activity_type, DEFAULT_TYPE);
        assert_eq!(activity.category, Category::GeneralWellness);
        assert_eq!(activity.duration, DEFAULT_DURATION_MINUTES);
        assert_eq!(activity.intensity, Intensity::Medium);
        assert_eq!(activity.description, DEFAULT_DESCRIPTION);
        assert!(activity.video_link.is_none());
        assert!(activity.tips.is_empty());
    }

    #[test]
    fn non_object_input_is_still_total() {
        let activity = normalize_activity(&json!("not an activity"), 0);
        assert_eq!(activity.id, 1);
        assert_eq!(activity.name, DEFAULT_NAME);
    }

    #[test]
    fn blank_and_unparseable_aliases_are_skipped() {
        let raw = json!({
            "id": null,
            "activity_id": "abc",
            "Activity_ID": 9,
            "name": "  ",
            "Activity_Type": "Journaling",
            "duration": 0,
            "Duration_Minutes": 25.0,
            "intensity": "extreme",
        });

        let activity = normalize_activity(&raw, 0);
        assert_eq!(activity.id, 9);
        assert_eq!(activity.name, "Journaling");
        assert_eq!(activity.duration, 25);
        assert_eq!(activity.intensity, Intensity::Medium);
    }

    #[test]
    fn list_positions_supply_ids() {
        let activities = normalize_activities(&[json!({"name": "A"}), json!({"name": "B"})]);
        let ids: Vec<u32> = activities.iter().map(|activity| activity.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
