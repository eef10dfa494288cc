use arq_core::{action, Outcome};
use serde_json::json;

action! {
    /// Saludo armado en dos unidades anónimas que comparten el contexto.
    pub static ANON_RUN = "anon_run" => {
        params: [name],
        returns: [greeting],
        run(scope) {
            Ok(Outcome::sequence([
                scope.run(|s| {
                    let name = s.require("name")?.clone();
                    s.set("greeting", json!(["hello", name]));
                    Ok(Outcome::Nothing)
                }),
                scope.run(|s| {
                    let parts: Vec<String> = s.get_as("greeting")?;
                    s.set("greeting", parts.join(" "));
                    Ok(Outcome::Nothing)
                }),
            ]))
        }
    }
}
