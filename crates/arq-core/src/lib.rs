//! arq-core: motor de acciones sobre un contexto compartido.
//!
//! Una `Action` declara params/returns requeridos y un body. `call` valida
//! el contrato, copia el contexto a un `Scope`, ejecuta el body, exporta el
//! scope de vuelta, corre la secuencia que el body haya devuelto y valida
//! los returns si el contexto sigue exitoso.
//!
//! Fallos de negocio (`fail` / `fail_now`) quedan en el contexto; sólo los
//! errores de contrato salen como `Err(ArqError)`.
pub mod action;
pub mod context;
pub mod contract;
pub mod errors;
pub mod registry;
pub mod runnable;
pub mod scope;
pub mod sequence;
pub mod signal;

pub use action::{Action, ActionBuilder};
pub use context::Context;
pub use contract::{missing_keys, validate_required, ContractKind};
pub use errors::ArqError;
pub use registry::{normalize_path, Namespace, Registry, Resolved};
pub use runnable::{BodyFn, Runnable};
pub use scope::{ExportPolicy, Scope};
pub use sequence::{Invocable, Outcome};
pub use signal::{BodyResult, FailureSignal, Halt, Interrupt};

// Usado por la macro `action!`.
#[doc(hidden)]
pub use once_cell;
