//! Errores del core.
//!
//! Sólo los errores de contrato (entrada inválida, params/returns faltantes) y
//! de resolución se propagan al caller. Los fallos de negocio (soft/hard) se
//! registran en el `Context` y nunca aparecen aquí.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ArqError {
    #[error("context must be an arq Context or a JSON object")] InvalidContext,
    #[error("parameters not in context: {}", .0.join(", "))] ParametersNotInContext(Vec<String>),
    #[error("return values not in context: {}", .0.join(", "))] ReturnValuesNotInContext(Vec<String>),
    #[error("key not in scope: {0}")] MissingKey(String),
    #[error("cannot decode `{key}`: {message}")] Decode { key: String, message: String },
    #[error("invalid action path: {0:?}")] InvalidPath(String),
    #[error("no action or namespace at path: {0}")] UnresolvedPath(String),
    #[error("path is a namespace, not an action: {0}")] NotAnAction(String),
    #[error("path is an action, not a namespace: {0}")] NotANamespace(String),
    #[error("path already registered: {0}")] DuplicatePath(String),
    #[error("{0}")] Body(String),
}

impl ArqError {
    /// Error fatal levantado desde la lógica de un body. Se propaga sin
    /// tocar el estado de fallo del contexto.
    pub fn body(message: impl std::fmt::Display) -> Self {
        Self::Body(message.to_string())
    }

    /// Lista de claves faltantes para errores de contrato.
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            Self::ParametersNotInContext(keys) | Self::ReturnValuesNotInContext(keys) => Some(keys),
            _ => None,
        }
    }
}
