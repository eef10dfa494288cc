use arq_core::{action, Outcome};

action! {
    /// Escribe `out` y luego aborta; `out` igual llega al contexto.
    pub static FAILURE = "failure" => {
        returns: [out],
        run(scope) {
            scope.set("out", "arq");
            scope.fail_now(None)?;
            Ok(Outcome::Nothing)
        }
    }
}
