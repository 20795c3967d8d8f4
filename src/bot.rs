//! Analysis orchestrator
//!
//! Composes classifier, weather client, and explanation engine into one
//! call: classify → fetch weather → explain → assemble.

use crate::classifier::{DiseaseClassifier, Prediction};
use crate::config::Config;
use crate::error::Result;
use crate::knowledge::{self, Language};
use crate::weather::{WeatherClient, WeatherReading};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One completed analysis. Not persisted; lifetime ends with the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub prediction: Prediction,
    pub weather: WeatherReading,
    pub explanation: String,
}

pub struct DiseaseBot {
    classifier: DiseaseClassifier,
    weather: WeatherClient,
}

impl DiseaseBot {
    /// Composition root: loads the model exactly once (a failed load is
    /// fatal here, before any request is served) and wires up the weather
    /// client. The bot is reused for all subsequent calls.
    pub fn new(config: &Config) -> Result<Self> {
        let classifier = DiseaseClassifier::load(&config.model_path)?;
        let weather = WeatherClient::new(config.weather_api_key());
        Ok(Self { classifier, weather })
    }

    /// Full analysis of a leaf image on disk.
    ///
    /// Classifier errors abort the call with no partial result. A weather
    /// failure does not: humidity degrades to 0 for the explanation and
    /// the failed reading stays visible in the result for display.
    pub async fn analyze(
        &self,
        image_path: &Path,
        location: &str,
        language: Language,
    ) -> Result<AnalysisResult> {
        let prediction = self.classifier.classify(image_path)?;
        self.finish(prediction, location, language).await
    }

    /// Same pipeline for an image already held in memory.
    pub async fn analyze_bytes(
        &self,
        image_bytes: &[u8],
        location: &str,
        language: Language,
    ) -> Result<AnalysisResult> {
        let prediction = self.classifier.classify_bytes(image_bytes)?;
        self.finish(prediction, location, language).await
    }

    async fn finish(
        &self,
        prediction: Prediction,
        location: &str,
        language: Language,
    ) -> Result<AnalysisResult> {
        let weather = self.weather.fetch(location).await;
        let explanation = knowledge::explain(
            prediction.label,
            weather.humidity_or_default(),
            language,
        );

        Ok(AnalysisResult {
            prediction,
            weather,
            explanation,
        })
    }
}
