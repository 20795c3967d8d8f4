//! Tomato Doctor
//!
//! Classifies a photographed tomato leaf into one of three health states,
//! correlates the result with live local weather, and composes a bilingual
//! treatment recommendation.

pub mod bot;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod scanner;
pub mod weather;

pub use bot::{AnalysisResult, DiseaseBot};
pub use classifier::{ClassLabel, DiseaseClassifier, Prediction};
pub use error::{Result, TomatoDoctorError};
pub use knowledge::{explain, Language};
pub use weather::{WeatherClient, WeatherReading};
