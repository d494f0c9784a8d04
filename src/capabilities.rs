//! Seams to the external model capabilities. The core never interprets
//! class identities or trusts advisory text; these traits expose exactly the
//! aggregate signals the pipeline consumes.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use image::RgbImage;
use serde::Deserialize;
use serde_json::json;
use tokio::time::Duration;

use crate::types::Detection;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Raw class logits from the image-classifier capability. The label space is
/// deliberately opaque; only aggregate statistics are read.
#[derive(Debug, Clone)]
pub struct ClassScores {
    pub logits: Vec<f64>,
}

impl ClassScores {
    /// Softmax probability of the strongest class.
    pub fn max_probability(&self) -> f64 {
        if self.logits.is_empty() {
            return 0.0;
        }
        let max = self.logits.iter().cloned().fold(f64::MIN, f64::max);
        let denom: f64 = self.logits.iter().map(|l| (l - max).exp()).sum();
        1.0 / denom
    }

    pub fn mean_logit(&self) -> f64 {
        if self.logits.is_empty() {
            return 0.0;
        }
        self.logits.iter().sum::<f64>() / self.logits.len() as f64
    }
}

/// Object-detection capability: labeled boxes with confidences.
pub trait ObjectDetector: Send + Sync {
    fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>>;
}

/// Image-classification capability: a logit vector over an image region.
pub trait EmotionClassifier: Send + Sync {
    fn classify(&self, image: &RgbImage) -> Result<ClassScores>;
}

/// Sampling options forwarded to the advisory text capability.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

/// Free-text advisory capability. Output is untrusted until parsed and
/// confidence-validated downstream.
#[async_trait]
pub trait AdvisoryModel: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}

/// One advisory call bounded by `timeout`. Any failure — transport error,
/// timeout, empty handle — collapses to `None`; callers fall back rather
/// than retry.
pub async fn generate_bounded(
    model: Option<&dyn AdvisoryModel>,
    prompt: &str,
    options: &GenerationOptions,
    timeout: Duration,
) -> Option<String> {
    let model = model?;
    match tokio::time::timeout(timeout, model.generate(prompt, options)).await {
        Ok(Ok(text)) => Some(text),
        Ok(Err(err)) => {
            log_warn!("advisory call failed: {err}");
            None
        }
        Err(_) => {
            log_warn!("advisory call timeout (> {}s)", timeout.as_secs());
            None
        }
    }
}

/// Client for a local LLM server speaking the `/api/generate` protocol.
pub struct LocalLlmClient {
    base_url: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl LocalLlmClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AdvisoryModel for LocalLlmClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": {
                    "temperature": options.temperature,
                    "num_predict": options.max_tokens,
                },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("advisory server returned {}", response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_probability_of_uniform_logits_is_uniform() {
        let scores = ClassScores {
            logits: vec![1.0, 1.0, 1.0, 1.0],
        };
        assert!((scores.max_probability() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn max_probability_tracks_dominant_logit() {
        let scores = ClassScores {
            logits: vec![10.0, 0.0, 0.0],
        };
        assert!(scores.max_probability() > 0.99);
        assert!((scores.mean_logit() - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_logits_are_harmless() {
        let scores = ClassScores { logits: vec![] };
        assert_eq!(scores.max_probability(), 0.0);
        assert_eq!(scores.mean_logit(), 0.0);
    }

    #[tokio::test]
    async fn bounded_generate_without_model_is_none() {
        let out = generate_bounded(
            None,
            "prompt",
            &GenerationOptions::default(),
            Duration::from_secs(1),
        )
        .await;
        assert!(out.is_none());
    }
}
