//! Invocation of host-implemented natives.
//!
//! Each registered descriptor has exactly one host entry point, keyed by
//! the descriptor's [`SymbolName`]. [`NativeRegistry::invoke`] checks the
//! argument list against the descriptor before the call and the result
//! list against the declared return types after it, so a host bug shows
//! up as a [`DispatchError`] instead of a mistyped value in the caller.

mod error;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tala_natives::{CallableDescriptor, SymbolName};

use crate::{OutputSink, Value};

pub use error::DispatchError;

/// Session properties visible to natives, by name.
pub type Properties = BTreeMap<String, String>;

/// What a native can reach while it runs.
pub struct NativeContext<'a> {
    properties: &'a Properties,
    output: &'a OutputSink,
}

impl<'a> NativeContext<'a> {
    pub fn new(properties: &'a Properties, output: &'a OutputSink) -> Self {
        NativeContext { properties, output }
    }

    /// Look up a session property.
    pub fn property(&self, name: &str) -> Option<&'a str> {
        self.properties.get(name).map(String::as_str)
    }

    #[inline]
    pub fn output(&self) -> &'a OutputSink {
        self.output
    }
}

/// A host implementation of one native function or action.
///
/// `args` holds the receiver first (for attached functions and actions)
/// followed by the declared parameters. The returned list must match the
/// declared return types slot for slot; a fallible callable reports
/// failure through its last slot, never by panicking.
pub trait NativeCallable: Send + Sync {
    fn execute(&self, ctx: &mut NativeContext<'_>, args: &[Value]) -> Vec<Value>;
}

/// Adapter implementing [`NativeCallable`] for a closure or function.
struct NativeFn<F>(F);

impl<F> NativeCallable for NativeFn<F>
where
    F: Fn(&mut NativeContext<'_>, &[Value]) -> Vec<Value> + Send + Sync,
{
    fn execute(&self, ctx: &mut NativeContext<'_>, args: &[Value]) -> Vec<Value> {
        (self.0)(ctx, args)
    }
}

#[derive(Clone)]
struct NativeEntry {
    descriptor: CallableDescriptor,
    callable: Arc<dyn NativeCallable>,
}

/// Host entry points by callable identity.
#[derive(Clone, Default)]
pub struct NativeRegistry {
    entries: FxHashMap<SymbolName, NativeEntry>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `callable` as the implementation of `descriptor`.
    ///
    /// Returns `true` if an earlier implementation was replaced.
    #[tracing::instrument(level = "debug", skip_all, fields(params = descriptor.params().len()))]
    pub fn register(
        &mut self,
        descriptor: CallableDescriptor,
        callable: Arc<dyn NativeCallable>,
    ) -> bool {
        let key = descriptor.symbol().clone();
        let replaced = self
            .entries
            .insert(
                key,
                NativeEntry {
                    descriptor,
                    callable,
                },
            )
            .is_some();
        if replaced {
            tracing::debug!("native implementation replaced");
        }
        replaced
    }

    /// Bind a closure or function as the implementation of `descriptor`.
    pub fn register_fn<F>(&mut self, descriptor: CallableDescriptor, f: F) -> bool
    where
        F: Fn(&mut NativeContext<'_>, &[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        self.register(descriptor, Arc::new(NativeFn(f)))
    }

    /// Remove the implementation bound to `symbol`.
    pub fn unregister(&mut self, symbol: &SymbolName) -> bool {
        self.entries.remove(symbol).is_some()
    }

    /// The descriptor an implementation was registered with.
    pub fn descriptor(&self, symbol: &SymbolName) -> Option<&CallableDescriptor> {
        self.entries.get(symbol).map(|entry| &entry.descriptor)
    }

    pub fn contains(&self, symbol: &SymbolName) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call the implementation bound to `symbol`.
    ///
    /// `args` includes the receiver, if the callable has one.
    #[tracing::instrument(level = "trace", skip_all, fields(args = args.len()))]
    pub fn invoke(
        &self,
        ctx: &mut NativeContext<'_>,
        symbol: &SymbolName,
        args: &[Value],
    ) -> Result<Vec<Value>, DispatchError> {
        let entry = self.entries.get(symbol).ok_or(DispatchError::UnknownNative)?;
        let descriptor = &entry.descriptor;

        if args.len() != descriptor.arg_count() {
            return Err(DispatchError::ArityMismatch {
                expected: descriptor.arg_count(),
                found: args.len(),
            });
        }
        for (index, (declared, arg)) in descriptor.arg_types().zip(args).enumerate() {
            if !arg.conforms_to(declared) {
                return Err(DispatchError::ArgumentType {
                    index,
                    expected: declared.clone(),
                    found: arg.ty(),
                });
            }
        }

        let results = entry.callable.execute(ctx, args);

        let returns = descriptor.returns();
        if results.len() != returns.len() {
            return Err(DispatchError::ResultCount {
                expected: returns.len(),
                found: results.len(),
            });
        }
        for (index, (declared, result)) in returns.iter().zip(&results).enumerate() {
            if !result.conforms_to(declared) {
                return Err(DispatchError::ResultType {
                    index,
                    expected: declared.clone(),
                    found: result.ty(),
                });
            }
        }

        tracing::trace!(results = results.len(), "native returned");
        Ok(results)
    }
}

impl fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}
