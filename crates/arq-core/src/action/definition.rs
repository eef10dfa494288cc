use std::fmt;

use log::debug;
use serde_json::Value;

use super::ActionBuilder;
use crate::context::Context;
use crate::errors::ArqError;
use crate::registry::Registry;
use crate::runnable::{BodyFn, Runnable};
use crate::scope::ExportPolicy;

/// Acción inmutable lista para invocarse.
#[derive(Clone)]
pub struct Action {
    pub(super) name: String,
    pub(super) params: Vec<String>,
    pub(super) returns: Vec<String>,
    pub(super) policy: ExportPolicy,
    pub(super) body: BodyFn,
}

impl Action {
    #[inline]
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder::new(name)
    }

    /// Etiqueta usada en logs y como valor por defecto al registrar.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required_inputs(&self) -> &[String] {
        &self.params
    }

    pub fn required_outputs(&self) -> &[String] {
        &self.returns
    }

    pub fn export_policy(&self) -> ExportPolicy {
        self.policy
    }

    pub fn body(&self) -> &BodyFn {
        &self.body
    }

    /// Ejecuta la acción contra `ctx` y devuelve el mismo contexto, haya
    /// fallado o no. Sólo los errores de contrato o fatales salen como `Err`.
    pub fn call<'c>(&self, ctx: &'c mut Context) -> Result<&'c mut Context, ArqError> {
        self.call_in(ctx, None)
    }

    /// Como `call`, dejando `registry` disponible para `Scope::call_path`
    /// dentro del body y de las secuencias que produzca.
    pub fn call_in<'c>(&self, ctx: &'c mut Context, registry: Option<&Registry>) -> Result<&'c mut Context, ArqError> {
        debug!("call:start action={} ctx={}", self.name, ctx.id());
        Runnable::new(ctx, &self.params, &self.returns, &self.body).with_policy(self.policy)
                                                                    .with_registry(registry)
                                                                    .labelled(&self.name)
                                                                    .call()?;
        debug!("call:done action={} ctx={} failed={}", self.name, ctx.id(), ctx.is_failed());
        Ok(ctx)
    }

    /// Entrada dinámica: un objeto JSON se envuelve en un contexto nuevo;
    /// cualquier otro valor es `InvalidContext` y nada se ejecuta.
    pub fn call_value(&self, input: Value) -> Result<Context, ArqError> {
        let mut ctx = Context::from_value(input)?;
        self.call(&mut ctx)?;
        Ok(ctx)
    }

    /// Envuelve un mapa plano en un contexto nuevo y lo ejecuta.
    pub fn call_map<K, V, I>(&self, entries: I) -> Result<Context, ArqError>
        where K: Into<String>,
              V: Into<Value>,
              I: IntoIterator<Item = (K, V)>
    {
        let mut ctx: Context = entries.into_iter().collect();
        self.call(&mut ctx)?;
        Ok(ctx)
    }

    /// Ejecuta contra un contexto vacío.
    pub fn call_empty(&self) -> Result<Context, ArqError> {
        let mut ctx = Context::new();
        self.call(&mut ctx)?;
        Ok(ctx)
    }

    /// Copia de la acción (mismo body) con otra política de export.
    pub fn with_export_policy(&self, policy: ExportPolicy) -> Self {
        Self { policy, ..self.clone() }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
         .field("name", &self.name)
         .field("params", &self.params)
         .field("returns", &self.returns)
         .field("policy", &self.policy)
         .finish_non_exhaustive()
    }
}
