//! Ciclo de vida de `Action::call`: contratos, fallos soft/hard y
//! cortocircuito sobre contextos fallidos.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arq_core::{Action, ArqError, Context, Outcome};
use serde_json::json;

fn echo() -> Action {
    Action::builder("echo").params(["ping"])
                           .returns(["pong"])
                           .run(|s| {
                               let ping = s.require("ping")?.clone();
                               s.set("pong", ping);
                               Ok(Outcome::Nothing)
                           })
}

#[test]
fn echo_copies_ping_into_pong() {
    let mut ctx: Context = [("ping", json!("hi"))].into_iter().collect();
    let out = echo().call(&mut ctx).expect("echo succeeds");
    assert_eq!(out.get("pong"), Some(&json!("hi")));
    assert!(!out.is_failed());
    assert_eq!(out.message(), "");
}

#[test]
fn call_returns_the_same_context() {
    let mut ctx: Context = [("ping", json!("hello world"))].into_iter().collect();
    let id = ctx.id();
    let returned_id = echo().call(&mut ctx).unwrap().id();
    assert_eq!(id, returned_id);
}

#[test]
fn missing_param_raises_before_body_runs() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let action = Action::builder("guarded").params(["ping"]).run(move |s| {
                                                              counter.fetch_add(1, Ordering::SeqCst);
                                                              s.set("touched", true);
                                                              Ok(Outcome::Nothing)
                                                          });

    let mut ctx = Context::new();
    let err = action.call(&mut ctx).unwrap_err();
    assert_eq!(err, ArqError::ParametersNotInContext(vec!["ping".into()]));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(ctx.is_empty());
    assert!(ctx.is_successful());
}

#[test]
fn missing_params_are_listed_in_declared_order() {
    let action = Action::builder("spell").params(["string", "o_count"]).run(|_| Ok(Outcome::Nothing));
    let err = action.call_map([("unrelated", 1)]).unwrap_err();
    assert_eq!(err.missing_keys(), Some(&["string".to_string(), "o_count".to_string()][..]));
}

#[test]
fn successful_run_without_output_raises_missing_returns() {
    let action = Action::builder("return_test").params(["set_out"])
                                               .returns(["out"])
                                               .run(|s| {
                                                   if s.truthy("set_out") {
                                                       s.set("out", "value");
                                                   }
                                                   Ok(Outcome::Nothing)
                                               });

    let err = action.call_map([("set_out", false)]).unwrap_err();
    assert_eq!(err, ArqError::ReturnValuesNotInContext(vec!["out".into()]));

    let ctx = action.call_map([("set_out", true)]).expect("out is set");
    assert_eq!(ctx.get("out"), Some(&json!("value")));
}

#[test]
fn soft_failure_skips_return_validation_and_keeps_running() {
    let action = Action::builder("soft").returns(["out"]).run(|s| {
                                                             s.fail(Some("not today"));
                                                             s.set("after_fail", true);
                                                             Ok(Outcome::Nothing)
                                                         });

    let ctx = action.call_empty().expect("failed runs never raise missing returns");
    assert!(ctx.is_failed());
    assert_eq!(ctx.message(), "not today");
    // soft failure no aborta el body
    assert_eq!(ctx.get("after_fail"), Some(&json!(true)));
    assert!(!ctx.contains_key("out"));
}

#[test]
fn hard_failure_preserves_partial_state() {
    let action = Action::builder("failure").returns(["out"]).run(|s| {
                                                                s.set("out", "x");
                                                                s.fail_now(None)?;
                                                                s.set("out", "overwritten");
                                                                Ok(Outcome::Nothing)
                                                            });

    let ctx = action.call_empty().expect("hard failure is absorbed");
    assert_eq!(ctx.get("out"), Some(&json!("x")));
    assert!(ctx.is_failed());
    assert_eq!(ctx.message(), "");
}

#[test]
fn failed_context_short_circuits_every_call() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let action = Action::builder("strict").params(["absent"])
                                          .returns(["also_absent"])
                                          .run(move |s| {
                                              counter.fetch_add(1, Ordering::SeqCst);
                                              s.set("side_effect", 1);
                                              Ok(Outcome::Nothing)
                                          });

    let mut ctx = Context::new();
    ctx.fail(Some("earlier"));
    for _ in 0..3 {
        action.call(&mut ctx).expect("no contract errors on failed context");
    }
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(!ctx.contains_key("side_effect"));
    assert_eq!(ctx.message(), "earlier");
}

#[test]
fn call_value_rejects_non_objects_without_running() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let action = Action::builder("any").run(move |_| {
                                          counter.fetch_add(1, Ordering::SeqCst);
                                          Ok(Outcome::Nothing)
                                      });

    assert_eq!(action.call_value(json!(["ping"])).unwrap_err(), ArqError::InvalidContext);
    assert_eq!(action.call_value(json!(42)).unwrap_err(), ArqError::InvalidContext);
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    let ctx = action.call_value(json!({"ping": "hi"})).expect("object is wrapped");
    assert_eq!(ctx.get("ping"), Some(&json!("hi")));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn body_errors_propagate_unchanged() {
    let action = Action::builder("decode").params(["n"]).run(|s| {
                                                            let n: u32 = s.get_as("n")?;
                                                            s.set("double", n * 2);
                                                            Ok(Outcome::Nothing)
                                                        });

    let err = action.call_map([("n", "three")]).unwrap_err();
    assert!(matches!(err, ArqError::Decode { ref key, .. } if key == "n"));

    let ctx = action.call_map([("n", 3)]).unwrap();
    assert_eq!(ctx.get("double"), Some(&json!(6)));
}

#[test]
fn new_locals_are_exported_but_internal_ones_are_not() {
    let action = Action::builder("locals").run(|s| {
                                              s.set("_scratch", "hidden");
                                              s.set("created", "visible");
                                              Ok(Outcome::Nothing)
                                          });
    let ctx = action.call_empty().unwrap();
    assert_eq!(ctx.get("created"), Some(&json!("visible")));
    assert!(!ctx.contains_key("_scratch"));
}

#[test]
fn known_keys_policy_only_exports_context_keys_and_returns() {
    let action = Action::builder("narrow").params(["a"])
                                          .returns(["out"])
                                          .export_policy(arq_core::ExportPolicy::KnownKeys)
                                          .run(|s| {
                                              s.set("a", 2);
                                              s.set("out", "ok");
                                              s.set("temp", "dropped");
                                              Ok(Outcome::Nothing)
                                          });
    let ctx = action.call_map([("a", 1)]).unwrap();
    assert_eq!(ctx.get("a"), Some(&json!(2)));
    assert_eq!(ctx.get("out"), Some(&json!("ok")));
    assert!(!ctx.contains_key("temp"));
}

#[test]
fn fatal_body_error_skips_export() {
    let action = Action::builder("fatal").run(|s| {
                                             s.set("partial", true);
                                             Err(ArqError::body("disk on fire").into())
                                         });

    let mut ctx = Context::new();
    let err = action.call(&mut ctx).unwrap_err();
    assert_eq!(err, ArqError::Body("disk on fire".into()));
    assert_eq!(err.to_string(), "disk on fire");
    assert!(!ctx.contains_key("partial"));
    assert!(ctx.is_successful());
}

#[test]
fn body_is_shared_with_runnable_units() {
    let action = echo();
    let mut ctx: Context = [("ping", 1)].into_iter().collect();
    let params = action.required_inputs().to_vec();
    let out = arq_core::Runnable::new(&mut ctx, &params, &[], action.body()).call().unwrap();
    assert!(out.is_nothing());
    assert_eq!(ctx.get("pong"), Some(&json!(1)));
}

#[test]
fn hard_failure_of_an_inner_context_stays_there() {
    let inner = Action::builder("inner").run(|s| {
                                            s.fail_now(Some("inner only"))?;
                                            Ok(Outcome::Nothing)
                                        });
    let outer = Action::builder("outer").returns(["after"]).run(move |s| {
        let mut own = Context::new();
        inner.call(&mut own)?;
        s.set("inner_failed", own.is_failed());
        s.set("after", true);
        Ok(Outcome::Nothing)
    });

    let ctx = outer.call_empty().expect("outer completes");
    assert!(ctx.is_successful());
    assert_eq!(ctx.message(), "");
    assert_eq!(ctx.get("inner_failed"), Some(&json!(true)));
    assert_eq!(ctx.get("after"), Some(&json!(true)));
}
