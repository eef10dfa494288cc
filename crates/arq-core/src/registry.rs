//! Registry de acciones por path.
//!
//! Reemplaza la búsqueda dinámica por convención de nombres con una tabla
//! explícita construida al arrancar. Los paths se normalizan: segmentos
//! separados por `.`, `::` o `/`, cada uno pasado de CamelCase a snake_case
//! (`Letters::AddF` -> `letters.add_f`).
//!
//! `resolve` devuelve una acción o un `Namespace` encadenable con `get`.
use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use crate::action::Action;
use crate::context::Context;
use crate::errors::ArqError;

#[derive(Debug, Clone)]
pub enum Resolved<'r> {
    Action(Arc<Action>),
    Namespace(Namespace<'r>),
}

#[derive(Debug, Default, Clone)]
pub struct Registry {
    actions: BTreeMap<String, Arc<Action>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra `action` en `path`. Un path no puede ser a la vez acción y
    /// prefijo de otra acción.
    pub fn register(&mut self, path: &str, action: Arc<Action>) -> Result<(), ArqError> {
        let key = normalize_path(path)?;
        let taken = self.actions.contains_key(&key)
                    || self.is_namespace(&key)
                    || ancestors(&key).any(|prefix| self.actions.contains_key(prefix));
        if taken {
            return Err(ArqError::DuplicatePath(key));
        }
        debug!("registry:register path={key} action={}", action.name());
        self.actions.insert(key, action);
        Ok(())
    }

    /// Registra usando el nombre de la acción como path.
    pub fn register_named(&mut self, action: Arc<Action>) -> Result<(), ArqError> {
        let path = action.name().to_string();
        self.register(&path, action)
    }

    /// Path vacío resuelve al namespace raíz.
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>, ArqError> {
        if path.trim().is_empty() {
            return Ok(Resolved::Namespace(Namespace { registry: self,
                                                      prefix: String::new() }));
        }
        let key = normalize_path(path)?;
        if let Some(action) = self.actions.get(&key) {
            return Ok(Resolved::Action(Arc::clone(action)));
        }
        if self.is_namespace(&key) {
            return Ok(Resolved::Namespace(Namespace { registry: self, prefix: key }));
        }
        Err(ArqError::UnresolvedPath(key))
    }

    pub fn action(&self, path: &str) -> Result<Arc<Action>, ArqError> {
        match self.resolve(path)? {
            Resolved::Action(action) => Ok(action),
            Resolved::Namespace(ns) => Err(ArqError::NotAnAction(ns.prefix)),
        }
    }

    pub fn namespace(&self, path: &str) -> Result<Namespace<'_>, ArqError> {
        match self.resolve(path)? {
            Resolved::Namespace(ns) => Ok(ns),
            Resolved::Action(_) => Err(ArqError::NotANamespace(normalize_path(path)?)),
        }
    }

    /// Paths registrados en orden lexicográfico.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Resuelve y ejecuta la acción con este registry disponible para
    /// invocaciones anidadas por path.
    pub fn call<'c>(&self, path: &str, ctx: &'c mut Context) -> Result<&'c mut Context, ArqError> {
        let action = self.action(path)?;
        action.call_in(ctx, Some(self))
    }

    fn is_namespace(&self, key: &str) -> bool {
        let prefix = format!("{key}.");
        self.actions.range(prefix.clone()..).next().is_some_and(|(k, _)| k.starts_with(&prefix))
    }
}

/// Nodo intermedio del árbol de paths.
#[derive(Debug, Clone)]
pub struct Namespace<'r> {
    registry: &'r Registry,
    prefix: String,
}

impl<'r> Namespace<'r> {
    pub fn path(&self) -> &str {
        &self.prefix
    }

    /// Resuelve `segment` relativo a este namespace.
    pub fn get(&self, segment: &str) -> Result<Resolved<'r>, ArqError> {
        if self.prefix.is_empty() {
            self.registry.resolve(segment)
        } else {
            let tail = normalize_path(segment)?;
            self.registry.resolve(&format!("{}.{tail}", self.prefix))
        }
    }

    /// Nombres de los hijos inmediatos (acciones o namespaces), sin repetir.
    pub fn children(&self) -> Vec<&'r str> {
        let mut out: Vec<&'r str> = Vec::new();
        for key in self.registry.actions.keys() {
            let rest = if self.prefix.is_empty() {
                Some(key.as_str())
            } else {
                key.strip_prefix(self.prefix.as_str()).and_then(|r| r.strip_prefix('.'))
            };
            if let Some(child) = rest.and_then(|r| r.split('.').next()) {
                if out.last() != Some(&child) {
                    out.push(child);
                }
            }
        }
        out
    }
}

/// Normaliza un path a segmentos snake_case unidos por `.`.
pub fn normalize_path(path: &str) -> Result<String, ArqError> {
    let segments: Vec<String> = path.replace("::", ".")
                                    .replace('/', ".")
                                    .split('.')
                                    .map(|s| snake_case(s.trim()))
                                    .collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ArqError::InvalidPath(path.to_string()));
    }
    Ok(segments.join("."))
}

fn ancestors(key: &str) -> impl Iterator<Item = &str> {
    key.match_indices('.').map(move |(i, _)| &key[..i])
}

fn snake_case(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c.is_whitespace() {
            out.push('_');
            continue;
        }
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
