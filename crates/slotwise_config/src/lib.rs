use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `config/default.*` at the workspace root
/// 2. `config/{RUN_ENV}.*` (RUN_ENV defaults to "debug")
/// 3. Environment variables prefixed with `SLOTWISE`, `__` as separator
///    (e.g. `SLOTWISE__SERVER__PORT=8086`)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "SLOTWISE".to_string());

    let config_root = config_root();
    let default_path = config_root.join("config/default");
    let env_path = config_root.join(format!("config/{}", run_env));
    debug!(
        run_env = %run_env,
        config_root = %config_root.display(),
        "loading configuration"
    );

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_string_lossy().as_ref()).required(false))
        .add_source(File::with_name(env_path.to_string_lossy().as_ref()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

/// Resolve the directory the `config/` folder lives under.
///
/// Uses `SLOTWISE_CONFIG_ROOT` when set; otherwise walks up from the crate
/// manifest to the workspace root at compile-time layout, falling back to
/// the current directory for installed binaries.
fn config_root() -> PathBuf {
    if let Ok(root) = env::var("SLOTWISE_CONFIG_ROOT") {
        return PathBuf::from(root);
    }
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2) // go from crates/slotwise_config to workspace root
        .map(|p| p.to_path_buf())
        .filter(|p| p.join("config").is_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// This function checks if the dotenv file has already been loaded using a
/// `OnceCell`. If not, it loads the file named by `DOTENV_OVERRIDE`, or
/// `.env` when that is unset. Missing files are ignored.
pub fn ensure_dotenv_loaded() {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());
    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });
}
