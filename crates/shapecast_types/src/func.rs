//! Constructor functions and the process-wide function registry.
//!
//! A constructor function is an opaque closure. To make types that carry
//! closures serializable, every [`Func`] has a stable handle and is
//! registered in the global [`FunctionRegistry`] when created; ASTs record
//! the handle and the compiler looks the closure up again.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use shapecast_foundation::{Error, Result, Value};
use tracing::trace;

/// Signature of a constructor function body.
pub type FnBody = dyn Fn(Value) -> Result<Value> + Send + Sync;

static FUNCTIONS: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::new);
static ANONYMOUS: AtomicU64 = AtomicU64::new(0);

/// A registered constructor function.
///
/// Two functions are equal when their handles are equal.
#[derive(Clone)]
pub struct Func {
    handle: Arc<str>,
    body: Arc<FnBody>,
}

impl Func {
    /// Registers an anonymous function under a fresh `fn#N` handle.
    ///
    /// The global registry never forgets a function, so every call adds an
    /// entry that lives until the process exits. Code that builds the same
    /// type repeatedly should use [`Func::named`] with a fixed handle.
    pub fn new(body: impl Fn(Value) -> Result<Value> + Send + Sync + 'static) -> Self {
        let id = ANONYMOUS.fetch_add(1, Ordering::Relaxed);
        let func = Self {
            handle: format!("fn#{id}").into(),
            body: Arc::new(body),
        };
        FUNCTIONS.insert(func.clone());
        func
    }

    /// Returns the function registered under `handle`, registering `body`
    /// there if nothing is.
    ///
    /// The first registration wins; later bodies for the same handle are
    /// discarded.
    pub fn named(
        handle: &str,
        body: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        FUNCTIONS.fetch_or_register(handle, body)
    }

    /// Returns the stable handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Applies the function.
    ///
    /// # Errors
    ///
    /// Returns whatever error the function body raises.
    pub fn call(&self, input: Value) -> Result<Value> {
        (self.body)(input)
    }
}

impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Func {}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Func({})", self.handle)
    }
}

/// Handle-to-function lookup table.
pub struct FunctionRegistry {
    functions: RwLock<HashMap<Arc<str>, Func>>,
}

impl FunctionRegistry {
    fn new() -> Self {
        Self {
            functions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static FunctionRegistry {
        &FUNCTIONS
    }

    fn insert(&self, func: Func) {
        trace!(handle = %func.handle, "registered function");
        self.functions.write().insert(func.handle.clone(), func);
    }

    /// Registers `body` under `handle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is already taken.
    pub fn register(
        &self,
        handle: &str,
        body: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Result<Func> {
        let mut functions = self.functions.write();
        if functions.contains_key(handle) {
            return Err(Error::invalid_argument(format!(
                "function handle already registered: {handle}"
            )));
        }
        let func = Func {
            handle: handle.into(),
            body: Arc::new(body),
        };
        trace!(handle, "registered function");
        functions.insert(func.handle.clone(), func.clone());
        Ok(func)
    }

    /// Returns the function under `handle`, registering `body` if absent.
    pub fn fetch_or_register(
        &self,
        handle: &str,
        body: impl Fn(Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Func {
        if let Some(func) = self.functions.read().get(handle) {
            return func.clone();
        }
        self.functions
            .write()
            .entry(handle.into())
            .or_insert_with(|| {
                trace!(handle, "registered function");
                Func {
                    handle: handle.into(),
                    body: Arc::new(body),
                }
            })
            .clone()
    }

    /// Looks a function up by handle.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is registered under `handle`.
    pub fn get(&self, handle: &str) -> Result<Func> {
        self.functions
            .read()
            .get(handle)
            .cloned()
            .ok_or_else(|| Error::unknown_function(handle))
    }

    /// Returns true if a function is registered under `handle`.
    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        self.functions.read().contains_key(handle)
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.read().len())
            .finish()
    }
}
