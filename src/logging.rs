//! Logging de diagnóstico para los binarios.
//!
//! `arq-core` emite por la fachada `log`; aquí se instala un subscriber
//! `tracing` (stderr, formato compacto) que también recoge esos registros.
//! La salida de producto (el contexto JSON) va siempre a stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global con `filter` como directiva.
///
/// Devuelve `false` si ya había uno instalado (tests, segundo init).
/// Una directiva inválida cae a `warn`.
///
/// ```bash
/// ARQ_LOG=arq_core=debug cargo run --bin arq -- run echo '{"ping":"hi"}'
/// ```
pub fn init(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry().with(filter)
                                  .with(fmt::layer().with_writer(std::io::stderr).compact())
                                  .try_init()
                                  .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        let _ = init("warn");
        assert!(!init("debug"));
    }
}
