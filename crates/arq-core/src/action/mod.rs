//! Definición de acciones.
//!
//! Una `Action` es inmutable: lista ordenada de params requeridos, lista
//! ordenada de returns requeridos, política de export y un body. Se construye
//! una vez (builder o macro `action!`) y se invoca cuantas veces se quiera.
//! - `definition`: el tipo `Action` y sus entry-points `call*`.
//! - `builder`: `ActionBuilder`, acumula declaraciones antes de congelarlas.
//! - `macros`: `action!`, azúcar sobre el builder para statics perezosos.

pub mod builder;
pub mod definition;
pub mod macros;

pub use builder::ActionBuilder;
pub use definition::Action;
