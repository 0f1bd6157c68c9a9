use pricecast::application::ml::inference_service::InferenceService;
use pricecast::application::ml::model_loader::ModelLoader;
use pricecast::config::Config;
use pricecast::infrastructure::telemetry::{self, ChannelWriterFactory};
use pricecast::interfaces::PredictionApp;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // 1. Logging (Stdout + UI log panel)
    let (log_tx, log_rx) = crossbeam_channel::unbounded();
    if let Err(e) = telemetry::init(&config.logging, Some(ChannelWriterFactory::new(log_tx))) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Pricecast {} starting...", env!("CARGO_PKG_VERSION"));

    // 2. Load the model once; the window shows the outcome either way
    let loader = ModelLoader::from_config(&config.model);
    let startup = InferenceService::start(&config.model.model_path, &loader);
    match &startup {
        Ok(service) => info!(
            model = service.predictor_name(),
            version = service.predictor_version(),
            "Inference service ready"
        ),
        Err(e) => error!(error = %e, "Inference service unavailable, predictions disabled"),
    }

    let app = PredictionApp::new(startup, log_rx);

    // 3. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 760.0])
            .with_title("Price Predictor (USD/EUR)"),
        ..Default::default()
    };

    eframe::run_native(
        "Price Predictor (USD/EUR)",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
