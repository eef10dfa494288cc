use arq_core::{action, ArqError, Invocable, Outcome};

/// Tope de `o_count`; por encima es un error fatal, no un fallo de negocio.
pub const MAX_O_COUNT: i64 = 10_000;

action! {
    /// Agrega una `o` por cada `o_count` tras una `f`. Necesita al menos 2.
    pub static SPELL_FOO = "spell_foo" => {
        params: [string, o_count],
        run(scope) {
            let o_count: i64 = scope.get_as("o_count")?;
            if o_count < 2 {
                scope.fail_now(Some("o_count must be >=2"))?;
            }
            if o_count > MAX_O_COUNT {
                return Err(ArqError::body(format!("o_count must be <={MAX_O_COUNT}, got {o_count}")).into());
            }
            let mut items = vec![Invocable::from(&*ADD_F)];
            items.extend((0..o_count).map(|_| Invocable::from(&*ADD_O)));
            Ok(Outcome::from(items))
        }
    }
}

action! {
    pub static ADD_F = "add_f" => {
        params: [string],
        run(scope) {
            let mut string: String = scope.get_as("string")?;
            string.push('f');
            scope.set("string", string);
            Ok(Outcome::Nothing)
        }
    }
}

action! {
    pub static ADD_O = "add_o" => {
        params: [string],
        run(scope) {
            let mut string: String = scope.get_as("string")?;
            string.push('o');
            scope.set("string", string);
            Ok(Outcome::Nothing)
        }
    }
}
