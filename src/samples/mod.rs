//! Acciones de muestra y el registry que las publica por path.
//!
//! Las usan `main-core`, el binario `arq` y los tests de integración.
mod anon_run;
mod echo;
mod failure;
mod shout;
mod spell_foo;

use std::sync::Arc;

use arq_core::{Action, ArqError, Context, Registry};
use log::{info, warn};
use serde_json::Value;

use crate::errors::AppError;

pub use anon_run::ANON_RUN;
pub use echo::ECHO;
pub use failure::FAILURE;
pub use return_test::RETURN_TEST;
pub use shout::SHOUT;
pub use spell_foo::{ADD_F, ADD_O, MAX_O_COUNT, SPELL_FOO};

/// Registry con todas las muestras.
///
/// | path              | params            | returns    |
/// |-------------------|-------------------|------------|
/// | `echo`            | ping              | pong       |
/// | `anon_run`        | name              | greeting   |
/// | `failure`         |                   | out        |
/// | `return_test`     | set_out           | out        |
/// | `spell_foo`       | string, o_count   |            |
/// | `letters.add_f`   | string            |            |
/// | `letters.add_o`   | string            |            |
/// | `shout`           | name              | greeting   |
pub fn sample_registry() -> Result<Registry, ArqError> {
    let entries: [(&str, &Arc<Action>); 8] = [("Echo", &*ECHO),
                                              ("AnonRun", &*ANON_RUN),
                                              ("Failure", &*FAILURE),
                                              ("ReturnTest", &*RETURN_TEST),
                                              ("SpellFoo", &*SPELL_FOO),
                                              ("Letters::AddF", &*ADD_F),
                                              ("Letters::AddO", &*ADD_O),
                                              ("Shout", &*SHOUT)];
    let mut registry = Registry::new();
    for (path, action) in entries {
        registry.register(path, Arc::clone(action))?;
    }
    Ok(registry)
}

/// Envuelve `input` en un contexto nuevo y ejecuta `path` en `registry`.
pub fn run_sample(registry: &Registry, path: &str, input: Value) -> Result<Context, AppError> {
    let mut ctx = Context::from_value(input)?;
    if let Err(e) = registry.call(path, &mut ctx).map(|_| ()) {
        warn!("sample:{path} ctx={} error={e}", ctx.id());
        return Err(e.into());
    }
    info!("sample:{path} ctx={} failed={} message={:?}", ctx.id(), ctx.is_failed(), ctx.message());
    Ok(ctx)
}
