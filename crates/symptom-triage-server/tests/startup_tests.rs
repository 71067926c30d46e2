//! Model initialization on the server's startup path.

use clap::Parser;
use symptom_triage_core::ModelSource;
use symptom_triage_server::server::build_predictor;
use symptom_triage_server::ServerConfig;

fn config(model_path: &std::path::Path, extra: &[&str]) -> ServerConfig {
    let path = model_path.to_string_lossy().into_owned();
    let mut args = vec![
        "symptom-triage-server",
        "--model-path",
        path.as_str(),
        "--replicas",
        "5",
        "--trees",
        "5",
    ];
    args.extend_from_slice(extra);
    ServerConfig::try_parse_from(args).unwrap()
}

#[tokio::test]
async fn trains_once_then_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disease_model.bin");

    let first = build_predictor(&config(&path, &[])).await.unwrap();
    assert_eq!(first.source(), ModelSource::Trained);
    assert!(path.exists());

    let second = build_predictor(&config(&path, &[])).await.unwrap();
    assert_eq!(second.source(), ModelSource::Loaded);
    assert_eq!(second.model(), first.model());
}

#[tokio::test]
async fn retrain_flag_ignores_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disease_model.bin");

    build_predictor(&config(&path, &[])).await.unwrap();
    let retrained = build_predictor(&config(&path, &["--retrain"])).await.unwrap();

    assert_eq!(retrained.source(), ModelSource::Trained);
}

#[tokio::test]
async fn corrupt_artifact_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disease_model.bin");
    std::fs::write(&path, b"garbage").unwrap();

    assert!(build_predictor(&config(&path, &[])).await.is_err());
}
