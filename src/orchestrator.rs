use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::catalog::fallback_catalog;
use crate::config::ClientConfig;
use crate::error::RemoteError;
use crate::models::{Activity, AssessmentScores, RecommendationResult, Source, Technique};
use crate::normalize::normalize_activities;
use crate::recommend::select_fallback;
use crate::remote::{AssessRequest, RecommendRequest, RecommendationService};
use crate::session::SessionInput;

/// Turns a submitted questionnaire into recommendations. Scores are always
/// computed locally; the remote service only supplies the activity list, and
/// any failure there is answered from the built-in catalog.
pub struct RecommendationOrchestrator {
    service: Option<Arc<dyn RecommendationService>>,
    catalog: &'static [Activity],
    timeout: Duration,
    top_n: usize,
    seed: Option<u64>,
}

impl RecommendationOrchestrator {
    pub fn new(service: Arc<dyn RecommendationService>, config: &ClientConfig) -> Self {
        Self {
            service: Some(service),
            catalog: fallback_catalog(),
            timeout: config.timeout(),
            top_n: config.top_n(),
            seed: None,
        }
    }

    /// Never contacts the remote service.
    pub fn offline(config: &ClientConfig) -> Self {
        Self {
            service: None,
            catalog: fallback_catalog(),
            timeout: config.timeout(),
            top_n: config.top_n(),
            seed: None,
        }
    }

    /// Makes the random backfill reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub async fn get_recommendations(
        &self,
        input: &SessionInput,
        previous: Option<&RecommendationResult>,
        technique: Technique,
    ) -> RecommendationResult {
        let scores = match previous {
            Some(result) => result.scores.clone(),
            None => input.scores(),
        };

        let Some(service) = self.service.as_deref() else {
            info!("no recommendation service configured, using local catalog");
            return self.fallback(scores, technique);
        };

        match self.fetch_remote(service, input, &scores, technique).await {
            Ok(activities) => {
                info!(
                    technique = ?technique,
                    count = activities.len(),
                    "received remote recommendations"
                );
                RecommendationResult {
                    scores,
                    activities,
                    source: Source::Remote,
                    technique,
                }
            }
            Err(err) => {
                warn!(technique = ?technique, error = %err, "remote recommendations failed, using local mode");
                self.fallback(scores, technique)
            }
        }
    }

    /// One fresh cycle against another technique, reusing the scores already
    /// held in `previous`.
    pub async fn switch_technique(
        &self,
        previous: &RecommendationResult,
        input: &SessionInput,
        technique: Technique,
    ) -> RecommendationResult {
        self.get_recommendations(input, Some(previous), technique)
            .await
    }

    pub async fn retry(&self, previous: &RecommendationResult, input: &SessionInput) -> RecommendationResult {
        self.get_recommendations(input, Some(previous), previous.technique)
            .await
    }

    async fn fetch_remote(
        &self,
        service: &dyn RecommendationService,
        input: &SessionInput,
        scores: &AssessmentScores,
        technique: Technique,
    ) -> Result<Vec<Activity>, RemoteError> {
        let exchange = async {
            match technique {
                Technique::Hybrid => service.assess(&AssessRequest::new(input, scores)).await,
                Technique::Cosine => {
                    service
                        .recommend(&RecommendRequest::new(scores, self.top_n))
                        .await
                }
            }
        };

        let envelope = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| RemoteError::Timeout(self.timeout))??;

        let raw = envelope.into_recommendations()?;
        Ok(normalize_activities(&raw))
    }

    fn fallback(&self, scores: AssessmentScores, technique: Technique) -> RecommendationResult {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let activities = select_fallback(&scores, self.catalog, &mut rng);

        RecommendationResult {
            scores,
            activities,
            source: Source::Local,
            technique,
        }
    }
}
