use clap::Parser;
use serde::Serialize;
use tomato_doctor::bot::{AnalysisResult, DiseaseBot};
use tomato_doctor::cli::{Cli, Commands};
use tomato_doctor::config::Config;
use tomato_doctor::error::{Result, TomatoDoctorError};
use tomato_doctor::weather::WeatherReading;
use tomato_doctor::{classifier, scanner};

/// One line of the batch report: the analysis result plus the file it
/// came from.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRecord {
    file_name: String,
    #[serde(flatten)]
    result: AnalysisResult,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, location, language, json } => {
            if !json {
                println!("🍅 tomato-doctor - leaf analysis\n");
            }

            let location = location.unwrap_or_else(|| config.default_location.clone());

            if cli.verbose && !json {
                println!("  model: {}", config.model_path.display());
                println!("  location: {location}");
            }

            let bot = DiseaseBot::new(&config)?;
            let result = bot.analyze(&image, &location, language).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&result);
            }
        }

        Commands::Batch { folder, output, location, language } => {
            println!("🍅 tomato-doctor - batch analysis\n");

            // 1. Scan
            println!("[1/3] Scanning for leaf images...");
            let images = scanner::scan_folder(&folder)?;
            println!("✔ Found {} image(s)\n", images.len());

            if images.is_empty() {
                return Err(TomatoDoctorError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }

            let location = location.unwrap_or_else(|| config.default_location.clone());

            // 2. Analyze
            println!("[2/3] Analyzing...");
            let bot = DiseaseBot::new(&config)?;
            let mut records = Vec::new();

            for info in &images {
                if cli.verbose {
                    println!("  {}", info.file_name);
                }

                match bot.analyze(&info.path, &location, language).await {
                    Ok(result) => records.push(BatchRecord {
                        file_name: info.file_name.clone(),
                        result,
                    }),
                    Err(TomatoDoctorError::InvalidImage(reason)) => {
                        eprintln!("  ⚠ Skipping {}: {reason}", info.file_name);
                    }
                    Err(e) => return Err(e),
                }
            }
            println!("✔ Analyzed {} image(s)\n", records.len());

            // 3. Save
            println!("[3/3] Writing report...");
            let output = output.unwrap_or_else(|| folder.join("diagnosis.json"));
            let json = serde_json::to_string_pretty(&records)?;
            std::fs::write(&output, json)?;
            println!("✔ Report written: {}", output.display());

            println!("\n✅ Done");
        }

        Commands::Config { set_api_key, set_model_path, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if let Some(path) = set_model_path {
                config.model_path = path;
                config.save()?;
                println!("✔ Model path saved");
            }

            if show {
                println!("Configuration:");
                println!("  model path: {}", config.model_path.display());
                println!("  default location: {}", config.default_location);
                println!(
                    "  API key: {}",
                    if config.weather_api_key().is_some() { "set" } else { "not set" }
                );
            }
        }

        Commands::Check => {
            println!("🔍 Health check");
            println!("{}", "=".repeat(30));

            println!("  config file: {}", Config::config_path()?.display());

            if !config.model_path.exists() {
                println!("❌ Model file missing: {}", config.model_path.display());
                return Err(TomatoDoctorError::ModelUnavailable(
                    config.model_path.display().to_string(),
                ));
            }
            println!("✅ Model file present");

            classifier::DiseaseClassifier::load(&config.model_path)?;
            println!("✅ Model loads");

            if config.weather_api_key().is_none() {
                println!("⚠ Weather API key not set (analysis will run in degraded mode)");
            } else {
                println!("✅ Weather API key set");
            }

            println!("✅ Health check passed");
        }
    }

    Ok(())
}

fn print_report(result: &AnalysisResult) {
    println!("🔍 Prediction: {}", result.prediction.label.display_name());
    println!("📊 Confidence: {:.2}%", result.prediction.confidence * 100.0);

    match &result.weather {
        WeatherReading::Success { temperature_c, humidity_pct } => {
            println!("🌡️ Temperature: {temperature_c}°C");
            println!("💧 Humidity: {humidity_pct}%");
        }
        WeatherReading::Failure { reason } => {
            println!("🌤️ Weather unavailable ({reason})");
        }
    }

    println!("{}", result.explanation);
}
