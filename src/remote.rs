use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::RemoteError;
use crate::models::{AssessmentScores, Feedback};
use crate::session::SessionInput;

/// Body for `POST /assess`: flat answers, lifestyle values and the locally
/// computed scores in one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AssessRequest(pub Map<String, Value>);

impl AssessRequest {
    pub fn new(input: &SessionInput, scores: &AssessmentScores) -> Self {
        let mut fields = input.to_fields();
        fields.insert("Stress_Level".to_string(), Value::from(scores.stress_level));
        fields.insert("Anxiety_Score".to_string(), Value::from(scores.anxiety_score));
        fields.insert("Depression_Score".to_string(), Value::from(scores.depression_score));
        fields.insert("Sleep_Hours".to_string(), Value::from(scores.sleep_hours));
        fields.insert("Steps_Per_Day".to_string(), Value::from(scores.steps_per_day));
        fields.insert("Mood".to_string(), Value::from(scores.mood.as_str()));
        Self(fields)
    }
}

/// Body for `POST /recommend` (cosine similarity).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendRequest {
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
    pub top_n: usize,
}

impl RecommendRequest {
    pub fn new(scores: &AssessmentScores, top_n: usize) -> Self {
        Self {
            stress_level: scores.stress_level,
            anxiety_score: scores.anxiety_score,
            depression_score: scores.depression_score,
            sleep_hours: scores.sleep_hours,
            steps_per_day: scores.steps_per_day,
            top_n,
        }
    }
}

/// Response shared by `/assess` and `/recommend`. Activities stay as raw
/// JSON until normalized; embedded scores are informational only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteEnvelope {
    #[serde(default)]
    pub success: bool,
    /// Scores computed by the service; local scores are authoritative.
    #[serde(default)]
    #[allow(dead_code)]
    pub assessment_scores: Option<Value>,
    #[serde(default)]
    pub recommendations: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RemoteEnvelope {
    pub fn into_recommendations(self) -> Result<Vec<Value>, RemoteError> {
        if !self.success {
            return Err(RemoteError::Rejected(
                self.error
                    .unwrap_or_else(|| "success flag was false".to_string()),
            ));
        }
        Ok(self.recommendations.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub activities_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRequest {
    pub user_id: String,
    pub recommended_activity_id: u32,
    pub activity_rating: u8,
    pub feedback_comment: String,
    pub timestamp: String,
    pub stress_level: f64,
    pub anxiety_score: f64,
    pub depression_score: f64,
    pub sleep_hours: f64,
    pub steps_per_day: u32,
    pub mood_description: String,
}

impl From<&Feedback> for FeedbackRequest {
    fn from(feedback: &Feedback) -> Self {
        Self {
            user_id: feedback.user_id.clone(),
            recommended_activity_id: feedback.activity_id,
            activity_rating: feedback.rating,
            feedback_comment: feedback.comment.clone(),
            timestamp: feedback.timestamp.to_rfc3339(),
            stress_level: feedback.scores.stress_level,
            anxiety_score: feedback.scores.anxiety_score,
            depression_score: feedback.scores.depression_score,
            sleep_hours: feedback.scores.sleep_hours,
            steps_per_day: feedback.scores.steps_per_day,
            mood_description: feedback.scores.mood.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl FeedbackReceipt {
    /// The service hands back numeric ids; accept strings too.
    pub fn assigned_user_id(&self) -> Option<String> {
        match self.user_id.as_ref()? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// The remote scoring/recommendation collaborator.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn assess(&self, request: &AssessRequest) -> Result<RemoteEnvelope, RemoteError>;

    async fn recommend(&self, request: &RecommendRequest) -> Result<RemoteEnvelope, RemoteError>;

    async fn health(&self) -> Result<HealthReport, RemoteError>;

    async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackReceipt, RemoteError>;
}

pub struct HttpRecommendationService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRecommendationService {
    pub fn new(config: &ClientConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "POST to recommendation service");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RecommendationService for HttpRecommendationService {
    async fn assess(&self, request: &AssessRequest) -> Result<RemoteEnvelope, RemoteError> {
        self.post_json("/assess", request).await
    }

    async fn recommend(&self, request: &RecommendRequest) -> Result<RemoteEnvelope, RemoteError> {
        self.post_json("/recommend", request).await
    }

    async fn health(&self) -> Result<HealthReport, RemoteError> {
        let url = self.endpoint("/health");
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        Ok(response.json::<HealthReport>().await?)
    }

    async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackReceipt, RemoteError> {
        let receipt: FeedbackReceipt = tokio::time::timeout(
            self.timeout,
            self.post_json("/activity-feedback", request),
        )
        .await
        .map_err(|_| RemoteError::Timeout(self.timeout))??;

        if !receipt.success {
            return Err(RemoteError::Rejected(
                receipt
                    .error
                    .clone()
                    .unwrap_or_else(|| "feedback was not recorded".to_string()),
            ));
        }
        Ok(receipt)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerValue, Dimension, Mood};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_scores() -> AssessmentScores {
        AssessmentScores {
            stress_level: 7.5,
            anxiety_score: 2.5,
            depression_score: 0.0,
            sleep_hours: 6.0,
            steps_per_day: 4200,
            mood: Mood::Stressed,
        }
    }

    #[test]
    fn assess_body_merges_answers_and_scores() {
        let mut input = SessionInput::default();
        input.answers.set(Dimension::Stress, 1, AnswerValue::Often);
        let body = serde_json::to_value(AssessRequest::new(&input, &sample_scores())).unwrap();

        assert_eq!(body["stress_1"], json!("Often"));
        assert_eq!(body["depression_10"], json!("Never"));
        assert_eq!(body["Stress_Level"], json!(7.5));
        assert_eq!(body["Steps_Per_Day"], json!(4200));
        assert_eq!(body["Mood"], json!("Stressed"));
    }

    #[test]
    fn recommend_body_uses_wire_names() {
        let body = serde_json::to_value(RecommendRequest::new(&sample_scores(), 5)).unwrap();
        assert_eq!(
            body,
            json!({
                "Stress_Level": 7.5,
                "Anxiety_Score": 2.5,
                "Depression_Score": 0.0,
                "Sleep_Hours": 6.0,
                "Steps_Per_Day": 4200,
                "top_n": 5,
            })
        );
    }

    #[test]
    fn envelope_without_success_is_rejected() {
        let envelope: RemoteEnvelope =
            serde_json::from_value(json!({"success": false, "error": "No recommender available"}))
                .unwrap();
        match envelope.into_recommendations() {
            Err(RemoteError::Rejected(reason)) => assert_eq!(reason, "No recommender available"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn envelope_missing_list_means_empty() {
        let envelope: RemoteEnvelope = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(envelope.into_recommendations().unwrap().is_empty());
    }

    #[test]
    fn feedback_body_carries_score_snapshot() {
        let mut feedback =
            Feedback::new("42", 3, 4, "Helped me unwind", sample_scores()).unwrap();
        feedback.timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();

        let body = serde_json::to_value(FeedbackRequest::from(&feedback)).unwrap();
        assert_eq!(body["recommended_activity_id"], json!(3));
        assert_eq!(body["activity_rating"], json!(4));
        assert_eq!(body["mood_description"], json!("Stressed"));
        assert_eq!(body["timestamp"], json!("2026-03-01T09:30:00+00:00"));
    }

    #[test]
    fn receipt_user_id_accepts_numbers() {
        let receipt: FeedbackReceipt =
            serde_json::from_value(json!({"success": true, "user_id": 17})).unwrap();
        assert_eq!(receipt.assigned_user_id().as_deref(), Some("17"));
    }

    #[test]
    fn urls_are_joined_without_double_slashes() {
        assert_eq!(join_url("http://localhost:5000/", "/assess"), "http://localhost:5000/assess");
        assert_eq!(join_url("http://localhost:5000", "health"), "http://localhost:5000/health");
    }

    mod http {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        use super::*;
        use crate::models::Technique;
        use crate::orchestrator::RecommendationOrchestrator;
        use std::sync::Arc;

        fn service_for(server: &MockServer) -> HttpRecommendationService {
            let config = ClientConfig {
                api_base_url: server.uri(),
                ..ClientConfig::default()
            };
            HttpRecommendationService::new(&config).unwrap()
        }

        #[tokio::test]
        async fn server_error_maps_to_status() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/recommend"))
                .respond_with(ResponseTemplate::new(500))
                .expect(1)
                .mount(&server)
                .await;

            let result = service_for(&server)
                .recommend(&RecommendRequest::new(&sample_scores(), 5))
                .await;
            assert!(matches!(result, Err(RemoteError::Status(500))), "{result:?}");
        }

        #[tokio::test]
        async fn undecodable_body_maps_to_malformed() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/assess"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_raw("<html>not json</html>", "application/json"),
                )
                .mount(&server)
                .await;

            let request = AssessRequest::new(&SessionInput::default(), &sample_scores());
            let result = service_for(&server).assess(&request).await;
            assert!(matches!(result, Err(RemoteError::Malformed(_))), "{result:?}");
        }

        #[tokio::test]
        async fn unsuccessful_feedback_is_rejected() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/activity-feedback"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"success": false, "error": "Rating already saved"})),
                )
                .mount(&server)
                .await;

            let feedback = Feedback::new("7", 3, 4, "", sample_scores()).unwrap();
            let result = service_for(&server)
                .submit_feedback(&FeedbackRequest::from(&feedback))
                .await;
            match result {
                Err(RemoteError::Rejected(reason)) => assert_eq!(reason, "Rating already saved"),
                other => panic!("unexpected {other:?}"),
            }
        }

        #[tokio::test]
        async fn health_report_is_decoded() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/health"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "status": "healthy",
                    "timestamp": "2026-03-01T09:30:00",
                    "activities_count": 10
                })))
                .mount(&server)
                .await;

            let report = service_for(&server).health().await.unwrap();
            assert_eq!(report.status.as_deref(), Some("healthy"));
            assert_eq!(report.activities_count, Some(10));
        }

        #[tokio::test]
        async fn orchestrator_falls_back_when_service_errors() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/assess"))
                .respond_with(ResponseTemplate::new(503))
                .expect(1)
                .mount(&server)
                .await;

            let config = ClientConfig {
                api_base_url: server.uri(),
                ..ClientConfig::default()
            };
            let service = HttpRecommendationService::new(&config).unwrap();
            let orchestrator = RecommendationOrchestrator::new(Arc::new(service), &config).with_seed(3);
            let input = SessionInput::default();

            let result = orchestrator
                .get_recommendations(&input, None, Technique::Hybrid)
                .await;
            assert!(result.is_local());
            assert_eq!(result.scores, input.scores());
            assert_eq!(result.activities.len(), 5);
        }

        #[tokio::test]
        async fn orchestrator_uses_remote_list_when_available() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/recommend"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "success": true,
                    "recommendations": [
                        {"Activity_ID": 2, "Activity_Type": "Deep Breathing", "Activity_Category": "Stress Relief"}
                    ]
                })))
                .expect(1)
                .mount(&server)
                .await;

            let config = ClientConfig {
                api_base_url: server.uri(),
                ..ClientConfig::default()
            };
            let service = HttpRecommendationService::new(&config).unwrap();
            let orchestrator = RecommendationOrchestrator::new(Arc::new(service), &config);

            let result = orchestrator
                .get_recommendations(&SessionInput::default(), None, Technique::Cosine)
                .await;
            assert!(!result.is_local());
            assert_eq!(result.activities.len(), 1);
            assert_eq!(result.activities[0].id, 2);
            assert_eq!(result.activities[0].name, "Deep Breathing");
        }
    }
}
