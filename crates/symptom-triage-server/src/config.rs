//! Service configuration from command-line flags and environment.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use symptom_triage_core::{ForestConfig, TrainingConfig};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "symptom-triage-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Disease prediction and appointment scheduling service", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "TRIAGE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// Persisted model artifact; loaded if present, written after training
    #[arg(long, env = "MODEL_PATH", default_value = "disease_model.bin")]
    pub model_path: PathBuf,

    /// Copies of each disease profile in the training set
    #[arg(long, env = "TRAINING_REPLICAS", default_value_t = 100)]
    pub replicas: usize,

    /// Trees in the random forest
    #[arg(long, env = "FOREST_TREES", default_value_t = 200)]
    pub trees: usize,

    /// Training seed
    #[arg(long, env = "FOREST_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Ignore any persisted model and retrain, overwriting the artifact
    #[arg(long)]
    pub retrain: bool,

    /// Verbose logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.replicas == 0 {
            return Err(ConfigError::NotPositive("TRAINING_REPLICAS"));
        }
        if self.trees == 0 {
            return Err(ConfigError::NotPositive("FOREST_TREES"));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            replicas: self.replicas,
            forest: ForestConfig {
                n_trees: self.trees,
                seed: self.seed,
                ..ForestConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["symptom-triage-server"]).unwrap();

        assert_eq!(config.port, 5001);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5001");
        assert_eq!(config.model_path, PathBuf::from("disease_model.bin"));
        assert_eq!(config.training_config(), TrainingConfig::default());
        assert!(!config.retrain);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override() {
        let config = ServerConfig::try_parse_from([
            "symptom-triage-server",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--trees",
            "10",
            "--retrain",
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.training_config().forest.n_trees, 10);
        assert!(config.retrain);
    }

    #[test]
    fn test_rejects_zero_sizes() {
        let config =
            ServerConfig::try_parse_from(["symptom-triage-server", "--replicas", "0"]).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive("TRAINING_REPLICAS"))
        );
    }

    #[test]
    fn test_host_reads_prefixed_env() {
        use clap::CommandFactory;

        let command = ServerConfig::command();
        let host = command
            .get_arguments()
            .find(|arg| arg.get_id() == "host")
            .unwrap();
        assert_eq!(host.get_env(), Some(std::ffi::OsStr::new("TRIAGE_HOST")));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(ServerConfig::try_parse_from(["symptom-triage-server", "--port", "99999"]).is_err());
    }
}
