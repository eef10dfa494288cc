//! Unidad de ejecución (`Runnable`): liga un body a un contexto durante una
//! llamada y conduce su ciclo de vida.
//!
//! Estados (lineales, sin retrocesos):
//! `CHECK_ALREADY_FAILED -> VALIDATE_PARAMS -> IMPORT -> EXECUTE_BODY ->
//! EXPORT -> RUN_SEQUENCE? -> VALIDATE_RETURNS? -> DONE`
//!
//! - Contexto ya fallido: retorna `Outcome::Nothing` sin validar ni ejecutar.
//! - Params faltantes: error al caller, el body no corre.
//! - `Interrupt::Failure` se absorbe aquí; el export ocurre igual.
//! - `Interrupt::Error` se propaga sin export.
//! - Returns sólo se validan si el contexto sigue exitoso.
use std::sync::Arc;

use log::debug;

use crate::context::Context;
use crate::contract::{validate_required, ContractKind};
use crate::errors::ArqError;
use crate::registry::Registry;
use crate::scope::{ExportPolicy, Scope};
use crate::sequence::{run_sequence, Outcome};
use crate::signal::{BodyResult, Interrupt};

/// Body compartible de una acción o unidad anónima.
pub type BodyFn = Arc<dyn Fn(&mut Scope<'_>) -> BodyResult + Send + Sync>;

pub struct Runnable<'a> {
    ctx: &'a mut Context,
    params: &'a [String],
    returns: &'a [String],
    body: &'a BodyFn,
    policy: ExportPolicy,
    registry: Option<&'a Registry>,
    label: &'a str,
}

impl<'a> Runnable<'a> {
    pub fn new(ctx: &'a mut Context, params: &'a [String], returns: &'a [String], body: &'a BodyFn) -> Self {
        Self { ctx,
               params,
               returns,
               body,
               policy: ExportPolicy::default(),
               registry: None,
               label: "<unit>" }
    }

    pub fn with_policy(mut self, policy: ExportPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_registry(mut self, registry: Option<&'a Registry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn labelled(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    /// Ejecuta el ciclo completo y devuelve el valor capturado del body.
    pub fn call(mut self) -> Result<Outcome, ArqError> {
        if self.ctx.is_failed() {
            debug!("unit:skip label={} ctx={} (context already failed)", self.label, self.ctx.id());
            return Ok(Outcome::Nothing);
        }

        validate_required(self.ctx, self.params, ContractKind::Params)?;

        let outcome = self.execute_body()?;

        if let Outcome::Sequence(items) = &outcome {
            run_sequence(self.ctx, items, self.registry)?;
        }

        if self.ctx.is_successful() {
            validate_required(self.ctx, self.returns, ContractKind::Returns)?;
        }

        Ok(outcome)
    }

    fn execute_body(&mut self) -> Result<Outcome, ArqError> {
        let mut scope = Scope::import(self.ctx, self.returns, self.policy, self.registry);
        match (self.body)(&mut scope) {
            Ok(outcome) => {
                scope.export();
                Ok(outcome)
            }
            Err(Interrupt::Failure(_)) => {
                debug!("unit:abort label={} (failure signal)", self.label);
                scope.export();
                Ok(Outcome::Nothing)
            }
            Err(Interrupt::Error(err)) => Err(err),
        }
    }
}
