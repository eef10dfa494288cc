//! Contexto compartido de una llamada.
//!
//! Un `Context` es un mapa clave -> `serde_json::Value` más un estado de
//! fallo (`failed` + `message`). Fluye por `&mut` a través de cada acción y
//! unidad anidada durante una llamada top-level.
//!
//! Invariante: una vez `failed == true` no vuelve a `false`.
use indexmap::IndexMap;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ArqError;
use crate::signal::{FailureSignal, Halt, Interrupt};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Correlación para logs; no participa en la igualdad.
    #[serde(skip, default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(default)]
    entries: IndexMap<String, Value>,
    #[serde(default)]
    failed: bool,
    #[serde(default)]
    message: String,
}

impl Context {
    pub fn new() -> Self {
        Self::with_entries(IndexMap::new())
    }

    pub fn with_entries(entries: IndexMap<String, Value>) -> Self {
        Self { id: Uuid::new_v4(),
               entries,
               failed: false,
               message: String::new() }
    }

    /// Envuelve un objeto JSON. Cualquier otro valor es `InvalidContext`.
    pub fn from_value(value: Value) -> Result<Self, ArqError> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            _ => Err(ArqError::InvalidContext),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Marca el contexto como fallido sin abortar al caller.
    pub fn fail(&mut self, message: Option<&str>) {
        self.failed = true;
        if let Some(m) = message {
            self.message = m.to_string();
        }
        info!("ctx={} failed message={:?}", self.id, self.message);
    }

    /// `fail` y además produce la señal que aborta el body. Público sólo vía
    /// `Scope::fail_now`, así la señal siempre corresponde al contexto del
    /// body que la recibe.
    pub(crate) fn fail_now(&mut self, message: Option<&str>) -> Halt {
        self.fail(message);
        Err(Interrupt::Failure(FailureSignal::raise()))
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn is_successful(&self) -> bool {
        !self.failed
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Decodifica el valor de `key` al tipo pedido.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ArqError> {
        let value = self.get(key).ok_or_else(|| ArqError::MissingKey(key.to_string()))?;
        decode(key, value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn entries(&self) -> &IndexMap<String, Value> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserta todas las entradas dadas (last write wins).
    pub fn merge<K, V, I>(&mut self, entries: I)
        where K: Into<String>,
              V: Into<Value>,
              I: IntoIterator<Item = (K, V)>
    {
        for (k, v) in entries {
            self.insert(k, v);
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T, ArqError> {
    serde_json::from_value(value.clone()).map_err(|e| ArqError::Decode { key: key.to_string(),
                                                                         message: e.to_string() })
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.failed == other.failed && self.message == other.message
    }
}

impl From<IndexMap<String, Value>> for Context {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self::with_entries(entries)
    }
}

impl From<serde_json::Map<String, Value>> for Context {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl TryFrom<Value> for Context {
    type Error = ArqError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Context::new();
        ctx.merge(iter);
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fail_is_sticky_and_keeps_message() {
        let mut ctx = Context::new();
        assert!(ctx.is_successful());
        ctx.fail(Some("first"));
        assert!(ctx.is_failed());
        assert_eq!(ctx.message(), "first");

        // sin mensaje no pisa el anterior
        ctx.fail(None);
        assert!(ctx.is_failed());
        assert_eq!(ctx.message(), "first");
    }

    #[test]
    fn fail_now_yields_failure_interrupt() {
        let mut ctx = Context::new();
        let res = ctx.fail_now(None);
        assert!(matches!(res, Err(Interrupt::Failure(_))));
        assert!(ctx.is_failed());
        assert_eq!(ctx.message(), "");
    }

    #[test]
    fn from_value_wraps_objects_only() {
        let ctx = Context::from_value(json!({"ping": "hi", "n": 2})).expect("object wraps");
        assert_eq!(ctx.get("ping"), Some(&json!("hi")));
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["ping", "n"]);

        assert_eq!(Context::from_value(json!([1, 2])), Err(ArqError::InvalidContext));
        assert_eq!(Context::from_value(json!("ctx")), Err(ArqError::InvalidContext));
        assert_eq!(Context::from_value(Value::Null), Err(ArqError::InvalidContext));
    }

    #[test]
    fn map_operations_last_write_wins() {
        let mut ctx: Context = [("a", json!(1))].into_iter().collect();
        assert_eq!(ctx.insert("a", 2), Some(json!(1)));
        ctx.insert("b", "x");
        assert_eq!(ctx.len(), 2);
        assert!(ctx.contains_key("b"));
        assert_eq!(ctx.remove("a"), Some(json!(2)));
        assert!(!ctx.contains_key("a"));
        assert_eq!(ctx.get_as::<String>("b").unwrap(), "x");
    }

    #[test]
    fn get_as_reports_missing_and_decode_errors() {
        let ctx: Context = [("n", json!("not a number"))].into_iter().collect();
        assert_eq!(ctx.get_as::<u32>("missing"), Err(ArqError::MissingKey("missing".into())));
        assert!(matches!(ctx.get_as::<u32>("n"), Err(ArqError::Decode { key, .. }) if key == "n"));
    }

    #[test]
    fn equality_ignores_correlation_id() {
        let a: Context = [("k", json!(true))].into_iter().collect();
        let b: Context = [("k", json!(true))].into_iter().collect();
        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_entries_and_failure_state() {
        let mut ctx: Context = [("out", json!("arq"))].into_iter().collect();
        ctx.fail(Some("boom"));
        let v = serde_json::to_value(&ctx).unwrap();
        assert_eq!(v, json!({"entries": {"out": "arq"}, "failed": true, "message": "boom"}));
    }
}
