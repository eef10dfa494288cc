use arq_core::ArqError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error del motor: {0}")]
    Engine(#[from] ArqError),
    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
}

impl AppError {
    /// Errores de contrato o de entrada (el caller pasó algo inválido).
    pub fn is_input_error(&self) -> bool {
        !matches!(self, AppError::Config(_))
    }
}
