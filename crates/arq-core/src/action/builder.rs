//! Builder para `Action`.
//!
//! Las declaraciones (`params`, `returns`) pueden repetirse y se acumulan en
//! orden; las claves duplicadas se descartan conservando la primera
//! aparición. `run` congela el contrato y devuelve la `Action` inmutable.
//!
//! ```ignore
//! let echo = Action::builder("echo")
//!     .params(["ping"])
//!     .returns(["pong"])
//!     .run(|s| {
//!         let ping = s.require("ping")?.clone();
//!         s.set("pong", ping);
//!         Ok(Outcome::Nothing)
//!     });
//! ```
use std::sync::Arc;

use super::Action;
use crate::scope::{ExportPolicy, Scope};
use crate::signal::BodyResult;

#[derive(Debug, Clone)]
pub struct ActionBuilder {
    name: String,
    params: Vec<String>,
    returns: Vec<String>,
    policy: ExportPolicy,
}

impl ActionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               params: Vec::new(),
               returns: Vec::new(),
               policy: ExportPolicy::default() }
    }

    /// Añade claves requeridas antes de ejecutar el body.
    pub fn params<I, S>(mut self, keys: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        push_unique(&mut self.params, keys);
        self
    }

    /// Añade claves que una ejecución exitosa debe dejar en el contexto.
    pub fn returns<I, S>(mut self, keys: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        push_unique(&mut self.returns, keys);
        self
    }

    pub fn export_policy(mut self, policy: ExportPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fija el body y construye la acción.
    pub fn run<F>(self, body: F) -> Action
        where F: Fn(&mut Scope<'_>) -> BodyResult + Send + Sync + 'static
    {
        Action { name: self.name,
                 params: self.params,
                 returns: self.returns,
                 policy: self.policy,
                 body: Arc::new(body) }
    }

    /// Igual que `run` pero ya envuelta en `Arc`, lista para secuencias y
    /// registry.
    pub fn run_shared<F>(self, body: F) -> Arc<Action>
        where F: Fn(&mut Scope<'_>) -> BodyResult + Send + Sync + 'static
    {
        Arc::new(self.run(body))
    }
}

fn push_unique<I, S>(target: &mut Vec<String>, keys: I)
    where I: IntoIterator<Item = S>,
          S: Into<String>
{
    for key in keys {
        let key = key.into();
        if !target.contains(&key) {
            target.push(key);
        }
    }
}
