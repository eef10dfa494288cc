//! Macro `action!` para declarar acciones como statics perezosos.
//!
//! Exportada en la raíz del crate:
//!   use arq_core::action;
//!
//! Formas soportadas (params/returns/export opcionales, en ese orden):
//!
//! ```ignore
//! action! {
//!     pub static ECHO = "echo" => {
//!         params: [ping],
//!         returns: [pong],
//!         run(scope) {
//!             let ping = scope.require("ping")?.clone();
//!             scope.set("pong", ping);
//!             Ok(Outcome::Nothing)
//!         }
//!     }
//! }
//! ```
//!
//! El static resultante es un `Lazy<Arc<Action>>`; se usa como
//! `ECHO.call(&mut ctx)` o dentro de una secuencia con `&*ECHO`.

#[macro_export]
macro_rules! action {
    (
        $(#[$meta:meta])*
        $vis:vis static $name:ident = $label:expr => {
            $(params: [$($param:ident),+ $(,)?],)?
            $(returns: [$($ret:ident),+ $(,)?],)?
            $(export: $policy:expr,)?
            run($scope:ident) $body:block
        }
    ) => {
        $(#[$meta])*
        $vis static $name: $crate::once_cell::sync::Lazy<::std::sync::Arc<$crate::Action>> =
            $crate::once_cell::sync::Lazy::new(|| {
                $crate::Action::builder($label)
                    $(.params([$(stringify!($param)),+]))?
                    $(.returns([$(stringify!($ret)),+]))?
                    $(.export_policy($policy))?
                    .run_shared(|$scope: &mut $crate::Scope<'_>| -> $crate::BodyResult { $body })
            });
    };
}
