//! Validación de contratos (params / returns).
//!
//! La misma comprobación sirve como pre-condición y post-condición; sólo
//! cambia el error producido.
use crate::context::Context;
use crate::errors::ArqError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    /// Claves requeridas antes de ejecutar el body.
    Params,
    /// Claves que una ejecución exitosa debe dejar en el contexto.
    Returns,
}

impl ContractKind {
    fn error(self, missing: Vec<String>) -> ArqError {
        match self {
            ContractKind::Params => ArqError::ParametersNotInContext(missing),
            ContractKind::Returns => ArqError::ReturnValuesNotInContext(missing),
        }
    }
}

/// Claves de `required` ausentes en `ctx`, en el orden declarado.
pub fn missing_keys(ctx: &Context, required: &[String]) -> Vec<String> {
    required.iter().filter(|k| !ctx.contains_key(k)).cloned().collect()
}

pub fn validate_required(ctx: &Context, required: &[String], kind: ContractKind) -> Result<(), ArqError> {
    let missing = missing_keys(ctx, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(kind.error(missing))
    }
}
