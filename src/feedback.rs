use tracing::{info, warn};

use crate::error::FeedbackError;
use crate::models::Feedback;
use crate::remote::{FeedbackRequest, RecommendationService};

/// Sends a rating for a recommended activity. Returns the user id the
/// service assigned, falling back to the one that was sent.
pub async fn submit(
    service: &dyn RecommendationService,
    feedback: &Feedback,
) -> Result<String, FeedbackError> {
    let request = FeedbackRequest::from(feedback);

    match service.submit_feedback(&request).await {
        Ok(receipt) => {
            let user_id = receipt
                .assigned_user_id()
                .unwrap_or_else(|| feedback.user_id.clone());
            info!(
                activity_id = feedback.activity_id,
                rating = feedback.rating,
                user_id = %user_id,
                message = receipt.message.as_deref().unwrap_or_default(),
                "feedback recorded"
            );
            Ok(user_id)
        }
        Err(err) => {
            warn!(activity_id = feedback.activity_id, error = %err, "feedback submission failed");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::RemoteError;
    use crate::models::{AssessmentScores, Mood};
    use crate::remote::{AssessRequest, FeedbackReceipt, HealthReport, RecommendRequest, RemoteEnvelope};

    struct RecordingService {
        receipt: Option<serde_json::Value>,
        sent: Mutex<Vec<FeedbackRequest>>,
    }

    #[async_trait]
    impl RecommendationService for RecordingService {
        async fn assess(&self, _request: &AssessRequest) -> Result<RemoteEnvelope, RemoteError> {
            Err(RemoteError::Status(404))
        }

        async fn recommend(&self, _request: &RecommendRequest) -> Result<RemoteEnvelope, RemoteError> {
            Err(RemoteError::Status(404))
        }

        async fn health(&self) -> Result<HealthReport, RemoteError> {
            Ok(HealthReport::default())
        }

        async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackReceipt, RemoteError> {
            self.sent.lock().unwrap().push(request.clone());
            match &self.receipt {
                Some(body) => Ok(serde_json::from_value(body.clone()).unwrap()),
                None => Err(RemoteError::Network("connection refused".to_string())),
            }
        }
    }

    fn scores() -> AssessmentScores {
        AssessmentScores {
            stress_level: 8.0,
            anxiety_score: 3.5,
            depression_score: 1.0,
            sleep_hours: 5.0,
            steps_per_day: 2500,
            mood: Mood::Anxious,
        }
    }

    #[tokio::test]
    async fn assigned_user_id_wins() {
        let service = RecordingService {
            receipt: Some(json!({"success": true, "user_id": 88})),
            sent: Mutex::new(Vec::new()),
        };
        let feedback = Feedback::new("local-user", 2, 5, "Loved it", scores()).unwrap();

        let user_id = submit(&service, &feedback).await.unwrap();
        assert_eq!(user_id, "88");

        let sent = service.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recommended_activity_id, 2);
        assert_eq!(sent[0].stress_level, 8.0);
    }

    #[tokio::test]
    async fn missing_user_id_keeps_local_one() {
        let service = RecordingService {
            receipt: Some(json!({"success": true})),
            sent: Mutex::new(Vec::new()),
        };
        let feedback = Feedback::new("local-user", 2, 3, "", scores()).unwrap();
        assert_eq!(submit(&service, &feedback).await.unwrap(), "local-user");
    }

    #[tokio::test]
    async fn network_failure_is_wrapped() {
        let service = RecordingService {
            receipt: None,
            sent: Mutex::new(Vec::new()),
        };
        let feedback = Feedback::new("local-user", 2, 3, "", scores()).unwrap();
        assert!(matches!(
            submit(&service, &feedback).await,
            Err(FeedbackError::Remote(RemoteError::Network(_)))
        ));
    }
}
