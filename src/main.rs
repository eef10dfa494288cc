//! Demo: ejecuta cada muestra del registry con una entrada fija y muestra
//! el contexto resultante. Los errores de contrato se imprimen y no cortan
//! la demo.
use arq_rust::config::AppConfig;
use arq_rust::errors::AppError;
use arq_rust::samples::run_sample;
use arq_rust::{logging, sample_registry};
use serde_json::{json, Value};

fn demo_inputs() -> Vec<(&'static str, Value)> {
    vec![("echo", json!({ "ping": "hello world" })),
         ("echo", json!({})),
         ("anon_run", json!({ "name": "Ada" })),
         ("failure", json!({})),
         ("return_test", json!({ "set_out": true })),
         ("return_test", json!({ "set_out": false })),
         ("spell_foo", json!({ "string": "lorem ipsum ", "o_count": 3 })),
         ("spell_foo", json!({ "string": "lorem ipsum ", "o_count": 1 })),
         ("letters.add_f", json!({ "string": "f?" })),
         ("shout", json!({ "name": "Ada" }))]
}

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    logging::init(&config.log_filter);

    let registry = sample_registry()?;
    println!("== arq demo ({} acciones)", registry.len());
    for (path, input) in demo_inputs() {
        println!("-- {path} {input}");
        match run_sample(&registry, path, input) {
            Ok(ctx) => {
                let status = if ctx.is_failed() { "FAILED" } else { "OK" };
                println!("   {status}: {}", config.output.render(&serde_json::to_value(&ctx)?)?);
            }
            Err(e) => println!("   ERROR: {e}"),
        }
    }
    Ok(())
}
