//! Recommendation service for turning a prediction into farm guidance
//!
//! Two strategies sit behind one call: a completion-API strategy used when a
//! Groq credential is configured, and a local rule set used otherwise. The
//! call never fails; a completion failure is logged with the request id and
//! answered by the rules instead.

use shared::{FieldObservation, RecommendationSource, RecommendationText};
use uuid::Uuid;

use crate::config::GroqConfig;
use crate::external::GroqClient;

/// Rainfall below this many millimeters counts as a dry season
const DRY_SEASON_RAINFALL_MM: f64 = 250.0;

/// Recommendation strategy selected once at startup
#[derive(Clone)]
pub enum Recommender {
    /// Completion API first, rules on failure
    Ai(GroqClient),
    /// Rules only
    Heuristic,
}

impl Recommender {
    /// Pick the strategy from the environment: completion-backed when a
    /// Groq API key is present, rule-based otherwise
    pub fn from_env(config: &GroqConfig) -> Self {
        match GroqClient::from_env(config) {
            Some(client) => Recommender::Ai(client),
            None => Recommender::Heuristic,
        }
    }

    /// Label used by the health endpoint
    pub fn mode(&self) -> &'static str {
        match self {
            Recommender::Ai(_) => RecommendationSource::Completion.as_str(),
            Recommender::Heuristic => RecommendationSource::RuleBased.as_str(),
        }
    }

    /// Produce guidance for an observation and its predicted yield.
    ///
    /// Completion failures are logged against the request id and answered
    /// by the rule set; the farmer never sees them as errors.
    pub async fn recommend(
        &self,
        request_id: Uuid,
        observation: &FieldObservation,
        predicted_yield: f64,
    ) -> RecommendationText {
        let client = match self {
            Recommender::Ai(client) => client,
            Recommender::Heuristic => {
                return RecommendationText::rule_based(heuristic_lines(observation));
            }
        };

        let prompt = build_prompt(observation, predicted_yield);
        match client.complete(&prompt).await {
            Ok(text) => RecommendationText::completion(text),
            Err(e) => {
                tracing::warn!(
                    "AI recommendation failed for request {}: {}. Falling back to rule-based advice",
                    request_id,
                    e
                );
                RecommendationText::rule_based(heuristic_lines(observation))
            }
        }
    }
}

/// Build the completion prompt from the observation and predicted yield
fn build_prompt(observation: &FieldObservation, predicted_yield: f64) -> String {
    format!(
        "You are an agronomist advising a smallholder farmer.\n\
         \n\
         Field observation:\n\
         - Region: {}\n\
         - Crop: {}\n\
         - Soil type: {}\n\
         - Rainfall: {} mm\n\
         - Temperature: {} C\n\
         - Fertilizer used: {}\n\
         - Irrigation used: {}\n\
         - Weather condition: {}\n\
         - Days to harvest: {}\n\
         - Predicted yield: {:.2} tons per hectare\n\
         \n\
         Give exactly five numbered recommendations ordered by expected impact, \
         one for each of: soil nutrition, irrigation, pest and disease management, \
         weather adaptation, and harvest and storage. \
         End with an \"Immediate 48-hour Action Checklist\" containing three quick \
         actions and one safety reminder.",
        display_text(observation.region.as_deref()),
        display_text(observation.crop.as_deref()),
        display_text(observation.soil_type.as_deref()),
        observation.rainfall_mm,
        observation.temperature_celsius,
        display_flag(observation.fertilizer_used),
        display_flag(observation.irrigation_used),
        display_text(observation.weather.as_deref()),
        observation.days_to_harvest,
        predicted_yield
    )
}

fn display_text(value: Option<&str>) -> &str {
    value.unwrap_or("unspecified")
}

fn display_flag(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Three lines of local advice keyed on the fertilizer flag, the irrigation
/// flag and the rainfall level
fn heuristic_lines(observation: &FieldObservation) -> String {
    let fertilizer_line = if observation.fertilizer_used {
        "match timing/rates to crop needs: split applications around peak nutrient uptake."
    } else {
        "test+apply balanced fertilizer: start with a soil test and correct the gaps it finds."
    };

    let irrigation_line = if observation.irrigation_used {
        "optimize schedule to avoid stress: water early in the day and track soil moisture."
    } else {
        "consider small-scale irrigation to conserve moisture: even drip lines on key rows help."
    };

    let rainfall_line = if observation.rainfall_mm < DRY_SEASON_RAINFALL_MM {
        "use mulching/cover crops: they keep scarce rainfall where roots can reach it."
    } else {
        "monitor drainage, avoid waterlogging: clear field channels before the next heavy rain."
    };

    format!("{}\n{}\n{}", fertilizer_line, irrigation_line, rainfall_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> FieldObservation {
        FieldObservation {
            region: Some("North".to_string()),
            crop: Some("Wheat".to_string()),
            soil_type: Some("Loam".to_string()),
            rainfall_mm: 300.0,
            temperature_celsius: 22.0,
            fertilizer_used: false,
            irrigation_used: true,
            weather: Some("Sunny".to_string()),
            days_to_harvest: 90.0,
        }
    }

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_heuristic_always_has_three_lines() {
        let mut observation = observation();
        for fertilizer in [false, true] {
            for irrigation in [false, true] {
                for rainfall in [0.0, 249.99, 250.0, 1000.0] {
                    observation.fertilizer_used = fertilizer;
                    observation.irrigation_used = irrigation;
                    observation.rainfall_mm = rainfall;

                    assert_eq!(lines(&heuristic_lines(&observation)).len(), 3);
                }
            }
        }
    }

    #[test]
    fn test_heuristic_fertilizer_branches() {
        let mut observation = observation();

        observation.fertilizer_used = false;
        let advice = heuristic_lines(&observation);
        assert!(lines(&advice)[0].starts_with("test+apply balanced fertilizer"));

        observation.fertilizer_used = true;
        let advice = heuristic_lines(&observation);
        assert!(lines(&advice)[0].starts_with("match timing/rates to crop needs"));
    }

    #[test]
    fn test_heuristic_irrigation_branches() {
        let mut observation = observation();

        observation.irrigation_used = true;
        let advice = heuristic_lines(&observation);
        assert!(lines(&advice)[1].starts_with("optimize schedule to avoid stress"));

        observation.irrigation_used = false;
        let advice = heuristic_lines(&observation);
        assert!(lines(&advice)[1].starts_with("consider small-scale irrigation to conserve moisture"));
    }

    #[test]
    fn test_heuristic_rainfall_boundary() {
        let mut observation = observation();

        observation.rainfall_mm = 249.99; // just under the dry-season cutoff
        let advice = heuristic_lines(&observation);
        assert!(lines(&advice)[2].starts_with("use mulching/cover crops"));

        observation.rainfall_mm = 250.0; // cutoff itself counts as wet
        let advice = heuristic_lines(&observation);
        assert!(lines(&advice)[2].starts_with("monitor drainage, avoid waterlogging"));
    }

    #[test]
    fn test_heuristic_reference_case() {
        // No fertilizer, irrigation in place, 300mm of rain
        let advice = heuristic_lines(&observation());
        let advice_lines = lines(&advice);

        assert!(advice_lines[0].starts_with("test+apply balanced fertilizer"));
        assert!(advice_lines[1].starts_with("optimize schedule to avoid stress"));
        assert!(advice_lines[2].starts_with("monitor drainage, avoid waterlogging"));
    }

    #[test]
    fn test_prompt_embeds_every_field_and_the_yield() {
        let prompt = build_prompt(&observation(), 4.21);

        assert!(prompt.contains("Region: North"));
        assert!(prompt.contains("Crop: Wheat"));
        assert!(prompt.contains("Soil type: Loam"));
        assert!(prompt.contains("Rainfall: 300 mm"));
        assert!(prompt.contains("Temperature: 22 C"));
        assert!(prompt.contains("Fertilizer used: No"));
        assert!(prompt.contains("Irrigation used: Yes"));
        assert!(prompt.contains("Weather condition: Sunny"));
        assert!(prompt.contains("Days to harvest: 90"));
        assert!(prompt.contains("Predicted yield: 4.21 tons per hectare"));
    }

    #[test]
    fn test_prompt_requests_five_points_and_checklist() {
        let prompt = build_prompt(&observation(), 4.21);

        assert!(prompt.contains("exactly five numbered recommendations"));
        assert!(prompt.contains("Immediate 48-hour Action Checklist"));
        assert!(prompt.contains("three quick actions and one safety reminder"));
    }

    #[test]
    fn test_prompt_labels_missing_text_fields() {
        let mut observation = observation();
        observation.region = None;

        let prompt = build_prompt(&observation, 4.21);

        assert!(prompt.contains("Region: unspecified"));
    }

    #[test]
    fn test_heuristic_recommender_reports_rule_based_source() {
        let recommender = Recommender::Heuristic;

        let recommendation = tokio_test::block_on(recommender.recommend(
            Uuid::new_v4(),
            &observation(),
            4.21,
        ));

        assert_eq!(recommendation.source, RecommendationSource::RuleBased);
        assert_eq!(lines(&recommendation.text).len(), 3);
    }

    #[test]
    fn test_mode_labels() {
        let config = GroqConfig {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            timeout_secs: 30,
        };

        assert_eq!(Recommender::Heuristic.mode(), "rule_based");
        let ai = Recommender::Ai(GroqClient::new("test-key".to_string(), &config));
        assert_eq!(ai.mode(), "completion");
    }
}
