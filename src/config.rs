//! Configuración de los binarios.
//! Carga `.env` una sola vez y lee `ARQ_LOG` / `ARQ_OUTPUT`.
//! El motor (`arq-core`) no lee configuración; esto sólo afecta a
//! logging y al formato de salida de `main-core` y `arq`.
use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::errors::AppError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Filtro por defecto cuando ni `ARQ_LOG` ni `RUST_LOG` están definidos.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Cómo se imprime el contexto resultante.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    pub fn render(self, value: &serde_json::Value) -> Result<String, AppError> {
        let out = match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Compact => serde_json::to_string(value)?,
        };
        Ok(out)
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "compact" | "json" => Ok(OutputFormat::Compact),
            other => Err(AppError::Config(format!("ARQ_OUTPUT={other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directiva para `EnvFilter` (p.ej. `arq_core=debug`).
    pub log_filter: String,
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_filter: DEFAULT_LOG_FILTER.to_string(),
               output: OutputFormat::default() }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let log_filter = non_empty("ARQ_LOG").or_else(|| non_empty("RUST_LOG"))
                                             .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let output = match non_empty("ARQ_OUTPUT") {
            Some(raw) => raw.parse()?,
            None => OutputFormat::default(),
        };
        Ok(Self { log_filter, output })
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
