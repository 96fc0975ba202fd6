//! Replicate-specific request/response payloads.

use serde::{Deserialize, Serialize};

/// Pinned version of `prunaai/hidream-l1-fast`.
pub const HIDREAM_VERSION: &str =
    "91752cc0b07ccd5976f1db2b6b7f10296ac12d6cb2ba87056f79b17ffacca5f5";

/// Request body for `POST /v1/predictions`.
#[derive(Debug, Serialize)]
pub struct CreatePredictionRequest {
    pub version: String,
    pub input: HidreamInput,
}

/// Model input for hidream-l1-fast.
///
/// Everything except the two prompt strings is fixed, so identical requests
/// produce reproducible predictions.
#[derive(Debug, Clone, Serialize)]
pub struct HidreamInput {
    pub prompt: String,
    pub negative_prompt: String,
    pub seed: u32,
    pub model_type: String,
    pub resolution: String,
    pub speed_mode: String,
    pub output_format: String,
    pub output_quality: u32,
}

impl HidreamInput {
    pub fn new(prompt: String, negative_prompt: String) -> Self {
        Self {
            prompt,
            negative_prompt,
            seed: 10,
            model_type: "fast".to_string(),
            resolution: "1024 × 1024 (Square)".to_string(),
            speed_mode: "Extra Juiced 🚀 (even more speed)".to_string(),
            output_format: "jpg".to_string(),
            output_quality: 80,
        }
    }
}

/// Prediction lifecycle states reported by Replicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

/// Prediction output: one URL or a list of URLs depending on the model.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutput {
    One(String),
    Many(Vec<String>),
}

impl PredictionOutput {
    fn first_url(&self) -> Option<&str> {
        let url = match self {
            PredictionOutput::One(url) => url.as_str(),
            PredictionOutput::Many(urls) => urls.first()?.as_str(),
        };
        let url = url.trim();
        (!url.is_empty()).then_some(url)
    }
}

/// Poll URLs attached to a prediction resource.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionUrls {
    pub get: Option<String>,
}

/// A prediction resource as returned by both create and poll calls.
#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<PredictionOutput>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub urls: Option<PredictionUrls>,
}

/// What a terminal prediction actually delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionOutcome {
    Success { url: String },
    NoImage,
    Failed { message: String },
}

impl Prediction {
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self.status,
            PredictionStatus::Starting | PredictionStatus::Processing
        )
    }

    /// Classify the prediction. Non-terminal states classify as `Failed` so
    /// a pending prediction can never be mistaken for a result.
    pub fn outcome(&self) -> PredictionOutcome {
        match self.status {
            PredictionStatus::Succeeded => {
                match self.output.as_ref().and_then(PredictionOutput::first_url) {
                    Some(url) => PredictionOutcome::Success {
                        url: url.to_string(),
                    },
                    None => PredictionOutcome::NoImage,
                }
            }
            PredictionStatus::Failed | PredictionStatus::Canceled => PredictionOutcome::Failed {
                message: self.error.clone().unwrap_or_else(|| {
                    format!("Prediction {} reported {:?}", self.id, self.status)
                }),
            },
            PredictionStatus::Starting | PredictionStatus::Processing => {
                PredictionOutcome::Failed {
                    message: format!("Prediction {} never reached a terminal state", self.id),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(json: serde_json::Value) -> Prediction {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_input_fixed_parameters() {
        let input = HidreamInput::new("a prompt".to_string(), "a negative".to_string());
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json["seed"], 10);
        assert_eq!(json["model_type"], "fast");
        assert_eq!(json["resolution"], "1024 × 1024 (Square)");
        assert_eq!(json["output_format"], "jpg");
        assert_eq!(json["output_quality"], 80);
    }

    #[test]
    fn test_outcome_single_url_output() {
        let prediction = prediction(serde_json::json!({
            "id": "p1",
            "status": "succeeded",
            "output": "https://replicate.delivery/out.jpg"
        }));

        assert_eq!(
            prediction.outcome(),
            PredictionOutcome::Success {
                url: "https://replicate.delivery/out.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_outcome_url_list_output_takes_first() {
        let prediction = prediction(serde_json::json!({
            "id": "p1",
            "status": "succeeded",
            "output": ["https://replicate.delivery/a.jpg", "https://replicate.delivery/b.jpg"]
        }));

        assert_eq!(
            prediction.outcome(),
            PredictionOutcome::Success {
                url: "https://replicate.delivery/a.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_outcome_no_image() {
        for output in [
            serde_json::json!(null),
            serde_json::json!([]),
            serde_json::json!(""),
        ] {
            let prediction = prediction(serde_json::json!({
                "id": "p1",
                "status": "succeeded",
                "output": output
            }));
            assert_eq!(prediction.outcome(), PredictionOutcome::NoImage);
        }
    }

    #[test]
    fn test_outcome_failed_carries_provider_message() {
        let prediction = prediction(serde_json::json!({
            "id": "p1",
            "status": "failed",
            "error": "NSFW content detected"
        }));

        assert_eq!(
            prediction.outcome(),
            PredictionOutcome::Failed {
                message: "NSFW content detected".to_string()
            }
        );
    }

    #[test]
    fn test_outcome_canceled_without_message() {
        let prediction = prediction(serde_json::json!({
            "id": "p9",
            "status": "canceled"
        }));

        match prediction.outcome() {
            PredictionOutcome::Failed { message } => assert!(message.contains("p9")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_is_terminal() {
        for (status, terminal) in [
            ("starting", false),
            ("processing", false),
            ("succeeded", true),
            ("failed", true),
            ("canceled", true),
        ] {
            let prediction = prediction(serde_json::json!({
                "id": "p1",
                "status": status
            }));
            assert_eq!(prediction.is_terminal(), terminal, "status {}", status);
        }
    }
}
