//! Señal de fallo duro e interrupciones de un body.
//!
//! Un body devuelve `BodyResult`. El error distingue dos casos:
//! - `Interrupt::Failure`: el contexto ya fue marcado como fallido y el body
//!   debe abandonar sus sentencias restantes. Sólo el `Runnable` que ejecutó
//!   el body la absorbe; nunca cruza el límite de una unidad.
//! - `Interrupt::Error`: error fatal (contrato, decode, lógica) que se propaga
//!   al caller sin cambios.

use std::convert::Infallible;

use crate::errors::ArqError;
use crate::sequence::Outcome;

/// Marca de "abortar este body ahora". El constructor es privado al crate:
/// sólo `Scope::fail_now` puede producirla, y siempre tras marcar como
/// fallido el contexto del scope.
#[derive(Debug, PartialEq, Eq)]
pub struct FailureSignal {
    _private: (),
}

impl FailureSignal {
    pub(crate) fn raise() -> Self {
        Self { _private: () }
    }
}

#[derive(Debug)]
pub enum Interrupt {
    Failure(FailureSignal),
    Error(ArqError),
}

impl Interrupt {
    pub fn is_failure(&self) -> bool {
        matches!(self, Interrupt::Failure(_))
    }
}

impl From<ArqError> for Interrupt {
    fn from(err: ArqError) -> Self {
        Interrupt::Error(err)
    }
}

impl From<FailureSignal> for Interrupt {
    fn from(signal: FailureSignal) -> Self {
        Interrupt::Failure(signal)
    }
}

/// Resultado de ejecutar un body.
pub type BodyResult = Result<Outcome, Interrupt>;

/// Resultado de `fail_now`: nunca es `Ok`, pensado para usarse con `?`.
pub type Halt = Result<Infallible, Interrupt>;
