//! TernakPro - offline recommendation runner
//!
//! Menjalankan satu rekomendasi tanpa HTTP server, dengan pipeline yang
//! sama dengan `POST /api/recommend`.
//!
//! Usage:
//!   ternakpro [--model <artifact.json>] [request.json]
//!
//! Tanpa file request, JSON dibaca dari stdin.

use eyre::{eyre, Result, WrapErr};
use std::io::Read;
use std::path::PathBuf;
use ternakpro::api::ApiResponse;
use ternakpro::core::load_model;
use ternakpro::{assemble, knowledge, DecisionEngine, RecommendationRequest, ServiceConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Log ke stderr supaya stdout tetap JSON murni
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = ServiceConfig::from_env()?;
    let mut request_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model" => {
                let path = args.next().ok_or_else(|| eyre!("Usage: --model <artifact.json>"))?;
                config.model_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("Usage: ternakpro [--model <artifact.json>] [request.json]");
                return Ok(());
            }
            other => request_path = Some(PathBuf::from(other)),
        }
    }

    let raw = match &request_path {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let request: RecommendationRequest =
        serde_json::from_str(&raw).wrap_err("Invalid recommendation request")?;
    request.validate()?;

    let (model_state, artifact) = load_model(&config).await;
    let engine = DecisionEngine::from_artifact(artifact);
    info!(strategy = engine.strategy_name(), "Decision engine ready");

    let prediction = engine.recommend(&request);
    let profile = knowledge::lookup(prediction.recommended_animal.as_str());
    let data = assemble(&request, &prediction, profile, &model_state)?;

    println!("{}", serde_json::to_string_pretty(&ApiResponse::success(data))?);
    Ok(())
}
