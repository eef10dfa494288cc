//! Scope local de un body y su traducción desde/hacia el `Context`.
//!
//! Al entrar al body se copian todas las entradas del contexto a bindings
//! locales (`import`). El body lee/escribe esos bindings con `get`/`set`; el
//! contexto no cambia hasta `export`, que escribe los bindings de vuelta.
//!
//! Los nombres que empiezan con `_` son internos y nunca se exportan.
use std::str::FromStr;

use indexmap::IndexMap;
use log::trace;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;
use crate::context::{decode, Context};
use crate::errors::ArqError;
use crate::registry::Registry;
use crate::sequence::Invocable;
use crate::signal::{BodyResult, Halt};

/// Prefijo de bindings internos (no exportables).
pub const INTERNAL_PREFIX: char = '_';

pub fn is_internal(name: &str) -> bool {
    name.starts_with(INTERNAL_PREFIX)
}

/// Qué bindings locales vuelven al contexto en `export`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportPolicy {
    /// Todo binding no interno, incluidos los creados por el body.
    #[default]
    AllLocals,
    /// Sólo claves ya presentes en el contexto más los returns declarados.
    KnownKeys,
}

impl FromStr for ExportPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all_locals" => Ok(ExportPolicy::AllLocals),
            "known" | "known_keys" => Ok(ExportPolicy::KnownKeys),
            other => Err(format!("unknown export policy: {other}")),
        }
    }
}

/// Vista local que recibe el body de una unidad.
pub struct Scope<'s> {
    ctx: &'s mut Context,
    locals: IndexMap<String, Value>,
    returns: &'s [String],
    policy: ExportPolicy,
    registry: Option<&'s Registry>,
}

impl<'s> Scope<'s> {
    pub(crate) fn import(ctx: &'s mut Context,
                         returns: &'s [String],
                         policy: ExportPolicy,
                         registry: Option<&'s Registry>)
                         -> Self {
        let mut scope = Self { ctx,
                               locals: IndexMap::new(),
                               returns,
                               policy,
                               registry };
        scope.import_context();
        scope
    }

    fn import_context(&mut self) {
        for (k, v) in self.ctx.iter() {
            self.locals.insert(k.to_string(), v.clone());
        }
        trace!("scope:import ctx={} keys={}", self.ctx.id(), self.locals.len());
    }

    pub(crate) fn export(&mut self) {
        let mut written = 0usize;
        for (k, v) in &self.locals {
            if is_internal(k) {
                continue;
            }
            if self.policy == ExportPolicy::KnownKeys && !self.ctx.contains_key(k) && !self.returns.contains(k) {
                continue;
            }
            self.ctx.insert(k.clone(), v.clone());
            written += 1;
        }
        trace!("scope:export ctx={} written={written} policy={:?}", self.ctx.id(), self.policy);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.locals.get(key)
    }

    /// Como `get`, pero un binding ausente es `MissingKey`.
    pub fn require(&self, key: &str) -> Result<&Value, ArqError> {
        self.get(key).ok_or_else(|| ArqError::MissingKey(key.to_string()))
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ArqError> {
        decode(key, self.require(key)?)
    }

    /// Falso sólo para bindings ausentes, `null` o `false`.
    pub fn truthy(&self, key: &str) -> bool {
        !matches!(self.get(key), None | Some(Value::Null) | Some(Value::Bool(false)))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.locals.insert(key.into(), value.into())
    }

    /// Quita el binding local. No borra la clave del contexto al exportar.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.locals.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.locals.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.locals.keys().map(String::as_str)
    }

    pub fn fail(&mut self, message: Option<&str>) {
        self.ctx.fail(message);
    }

    pub fn fail_now(&mut self, message: Option<&str>) -> Halt {
        self.ctx.fail_now(message)
    }

    pub fn is_failed(&self) -> bool {
        self.ctx.is_failed()
    }

    pub fn message(&self) -> &str {
        self.ctx.message()
    }

    /// Contexto tal como quedó tras el último import/export.
    pub fn context(&self) -> &Context {
        &*self.ctx
    }

    pub fn registry(&self) -> Option<&'s Registry> {
        self.registry
    }

    /// Invoca otra acción compartiendo el estado actual: export, llamada
    /// completa contra el mismo contexto y re-import.
    pub fn call_other(&mut self, action: &Action) -> Result<(), ArqError> {
        self.export();
        action.call_in(self.ctx, self.registry)?;
        self.import_context();
        Ok(())
    }

    /// Resuelve `path` en el registry asociado e invoca la acción como
    /// `call_other`.
    pub fn call_path(&mut self, path: &str) -> Result<(), ArqError> {
        let registry = self.registry.ok_or_else(|| ArqError::UnresolvedPath(path.to_string()))?;
        let action = registry.action(path)?;
        self.call_other(&action)
    }

    /// Unidad anónima (sin contrato) para devolver dentro de una secuencia.
    /// Exporta siempre con `ExportPolicy::AllLocals`, aunque la acción que la
    /// devuelve use `KnownKeys`.
    pub fn run<F>(&self, body: F) -> Invocable
        where F: Fn(&mut Scope<'_>) -> BodyResult + Send + Sync + 'static
    {
        Invocable::unit(body)
    }
}
