use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOCAL_ENV_PATH: &str = "config/local.env";

/// `RUST_LOG` wins over `--log-level`; `--debug` forces DEBUG for the fallback.
pub fn init_logging(level: &str, debug: bool, json: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Exports `KEY=value` pairs from `config/local.env` unless already set, so
/// secrets such as `DIAMOND_DIGEST__SUMMARY__API_KEY` can live outside the
/// YAML file.
pub fn load_local_env_overrides() {
    load_env_file(Path::new(LOCAL_ENV_PATH));
}

pub fn load_env_file(path: &Path) {
    if !path.exists() {
        return;
    }

    match fs::read_to_string(path) {
        Ok(contents) => {
            for (idx, raw_line) in contents.lines().enumerate() {
                let line = raw_line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let Some((key, value)) = line.split_once('=') else {
                    warn!(line = idx + 1, "invalid local.env entry; skipping");
                    continue;
                };
                let key = key.trim();
                if key.is_empty() || env::var(key).is_ok() {
                    continue;
                }
                env::set_var(key, unescape_value(value.trim()));
            }
            info!(path = %path.display(), "Loaded environment overrides");
        }
        Err(err) => {
            warn!(path = %path.display(), ?err, "failed to read environment overrides");
        }
    }
}

fn unescape_value(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        let inner = &value[1..value.len() - 1];
        inner
            .replace("\\\"", "\"")
            .replace("\\n", "\n")
            .replace("\\t", "\t")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn unescape_strips_quotes() {
        assert_eq!(unescape_value("\"a\\tb\""), "a\tb");
        assert_eq!(unescape_value("plain"), "plain");
        assert_eq!(unescape_value("\""), "\"");
    }

    #[test]
    #[serial]
    fn env_file_does_not_clobber_existing_vars() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "# secrets\nDD_TEST_NEW=\"fresh\"\nDD_TEST_SET=from-file\nnot-a-pair"
        )
        .unwrap();
        env::set_var("DD_TEST_SET", "from-shell");
        env::remove_var("DD_TEST_NEW");

        load_env_file(file.path());

        assert_eq!(env::var("DD_TEST_NEW").as_deref(), Ok("fresh"));
        assert_eq!(env::var("DD_TEST_SET").as_deref(), Ok("from-shell"));
        env::remove_var("DD_TEST_NEW");
        env::remove_var("DD_TEST_SET");
    }
}
