//! Valor de retorno de un body y ejecución de secuencias (fan-out).
//!
//! Si un body devuelve `Outcome::Sequence`, el `Runnable` ejecuta cada item
//! en orden contra el mismo contexto. Cada item vuelve a comprobar
//! `is_failed()` como primer paso, así que un fallo corta los siguientes.
use std::fmt;
use std::sync::Arc;

use log::{debug, trace};
use serde_json::Value;

use crate::action::Action;
use crate::context::Context;
use crate::errors::ArqError;
use crate::registry::Registry;
use crate::runnable::{BodyFn, Runnable};
use crate::scope::Scope;
use crate::signal::BodyResult;

/// Item invocable dentro de una secuencia.
#[derive(Clone)]
pub enum Invocable {
    /// Acción con contrato propio; se invoca con su `call` completo.
    Action(Arc<Action>),
    /// Unidad anónima creada con `Scope::run` (sin params ni returns).
    Unit(BodyFn),
}

impl Invocable {
    pub fn unit<F>(body: F) -> Self
        where F: Fn(&mut Scope<'_>) -> BodyResult + Send + Sync + 'static
    {
        Invocable::Unit(Arc::new(body))
    }

    fn label(&self) -> &str {
        match self {
            Invocable::Action(a) => a.name(),
            Invocable::Unit(_) => "<unit>",
        }
    }
}

impl fmt::Debug for Invocable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocable::Action(a) => f.debug_tuple("Action").field(&a.name()).finish(),
            Invocable::Unit(_) => f.write_str("Unit"),
        }
    }
}

impl From<Arc<Action>> for Invocable {
    fn from(action: Arc<Action>) -> Self {
        Invocable::Action(action)
    }
}

impl From<&Arc<Action>> for Invocable {
    fn from(action: &Arc<Action>) -> Self {
        Invocable::Action(Arc::clone(action))
    }
}

/// Lo que devuelve un body.
#[derive(Debug, Clone, Default)]
pub enum Outcome {
    /// Sin valor (también el resultado de un body abortado o cortocircuitado).
    #[default]
    Nothing,
    Value(Value),
    Sequence(Vec<Invocable>),
}

impl Outcome {
    pub fn value(v: impl Into<Value>) -> Self {
        Outcome::Value(v.into())
    }

    pub fn sequence<I, T>(items: I) -> Self
        where I: IntoIterator<Item = T>,
              T: Into<Invocable>
    {
        Outcome::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Outcome::Nothing)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Vec<Invocable>> for Outcome {
    fn from(items: Vec<Invocable>) -> Self {
        Outcome::Sequence(items)
    }
}

/// Ejecuta `items` en orden contra `ctx`. Los resultados de cada item se
/// descartan; sólo importa la mutación del contexto.
pub(crate) fn run_sequence(ctx: &mut Context, items: &[Invocable], registry: Option<&Registry>) -> Result<(), ArqError> {
    debug!("sequence:start ctx={} items={}", ctx.id(), items.len());
    for (idx, item) in items.iter().enumerate() {
        trace!("sequence:item ctx={} idx={idx} item={}", ctx.id(), item.label());
        match item {
            Invocable::Action(action) => {
                action.call_in(ctx, registry)?;
            }
            Invocable::Unit(body) => {
                Runnable::new(ctx, &[], &[], body).with_registry(registry).call()?;
            }
        }
    }
    debug!("sequence:done ctx={} failed={}", ctx.id(), ctx.is_failed());
    Ok(())
}
