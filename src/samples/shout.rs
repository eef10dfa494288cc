use arq_core::{action, Outcome};

action! {
    /// `anon_run` invocado por path, con el saludo en mayúsculas.
    /// Requiere ejecutarse a través de un `Registry`.
    pub static SHOUT = "shout" => {
        params: [name],
        returns: [greeting],
        run(scope) {
            scope.call_path("anon_run")?;
            if scope.is_failed() {
                return Ok(Outcome::Nothing);
            }
            let greeting: String = scope.get_as("greeting")?;
            scope.set("greeting", greeting.to_uppercase());
            Ok(Outcome::Nothing)
        }
    }
}
