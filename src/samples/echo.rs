use arq_core::{action, Outcome};

action! {
    /// Copia `ping` en `pong`.
    pub static ECHO = "echo" => {
        params: [ping],
        returns: [pong],
        run(scope) {
            let ping = scope.require("ping")?.clone();
            scope.set("pong", ping);
            Ok(Outcome::Nothing)
        }
    }
}
