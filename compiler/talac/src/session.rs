//! The compilation session.
//!
//! A `Session` replaces process-wide registries: it owns the interner and
//! every table natives register into, and hands out shared handles to the
//! passes that need them.
//!
//! # Lifecycle
//!
//! 1. **Bootstrap** (`Session::new`): builtins are registered under write
//!    guards, unless the configuration disables them.
//! 2. **Registration**: hosts add their own natives, packages, and
//!    conversions. Registration is serialized per table.
//! 3. **Checking**: [`Session::check_conversions`] resolves many units in
//!    parallel under a single read guard.
//! 4. **Execution**: [`Session::invoke`] and [`Session::convert`] run host
//!    code for resolved call sites and conversions.

use std::sync::Arc;

use rayon::prelude::*;
use tala_diagnostic::{Diagnostic, DiagnosticQueue};
use tala_eval::builtins::{builtin_conversions, builtin_natives};
use tala_eval::{
    ConversionFn, ConversionRuntime, ConvertError, DispatchError, NativeCallable, NativeContext,
    NativeRegistry, OutputSink, Value,
};
use tala_ir::{ConversionExpr, ConversionOperator, Name, SharedInterner, Span, Ty};
use tala_natives::{
    check_call, CallableDescriptor, CallableKind, ConversionChecker, MemberName, Package,
    SharedConversionTable, SharedPackageTable, SharedRegistry, Symbol, SymbolName,
};

use crate::SessionConfig;

/// A conversion expression together with the inferred type of its operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionSite {
    pub expr: ConversionExpr,
    pub source: Ty,
}

impl ConversionSite {
    pub fn new(expr: ConversionExpr, source: Ty) -> Self {
        ConversionSite { expr, source }
    }
}

/// Owner of every registry a compilation uses.
pub struct Session {
    config: SessionConfig,
    interner: SharedInterner,
    packages: SharedPackageTable,
    conversions: SharedConversionTable,
    natives: SharedRegistry<NativeRegistry>,
    runtime: SharedRegistry<ConversionRuntime>,
    output: OutputSink,
}

impl Session {
    /// Create a session writing native output to stdout.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_output(config, OutputSink::Stdout)
    }

    /// Create a session with an explicit output sink.
    #[tracing::instrument(level = "debug", skip_all, fields(builtins = config.load_builtins))]
    pub fn with_output(config: SessionConfig, output: OutputSink) -> Self {
        let session = Session {
            config,
            interner: SharedInterner::new(),
            packages: SharedPackageTable::default(),
            conversions: SharedConversionTable::default(),
            natives: SharedRegistry::default(),
            runtime: SharedRegistry::default(),
            output,
        };
        if session.config.load_builtins {
            session.register_builtins();
        }
        session
    }

    fn register_builtins(&self) {
        for builtin in builtin_natives(&self.interner) {
            self.register_native(builtin.descriptor, builtin.callable);
        }
        for builtin in builtin_conversions(&self.interner) {
            self.register_conversion(builtin.operator, builtin.routine);
        }
        tracing::debug!(
            packages = self.packages.read().len(),
            conversions = self.conversions.read().len(),
            "builtins registered"
        );
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Intern a string in the session's interner.
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn packages(&self) -> &SharedPackageTable {
        &self.packages
    }

    #[inline]
    pub fn conversions(&self) -> &SharedConversionTable {
        &self.conversions
    }

    #[inline]
    pub fn output(&self) -> &OutputSink {
        &self.output
    }

    /// Register a native function or action with its host implementation.
    ///
    /// The descriptor goes to the package table (and global scope) by kind;
    /// the implementation is bound under the same identity afterwards, under
    /// a separate lock. Until both writes land, a concurrent reader may
    /// resolve the symbol and still get `UnknownNative` from `invoke`.
    pub fn register_native(&self, descriptor: CallableDescriptor, callable: Arc<dyn NativeCallable>) {
        self.declare(descriptor.clone());
        self.natives.write().register(descriptor, callable);
    }

    fn declare(&self, descriptor: CallableDescriptor) {
        let mut packages = self.packages.write();
        match descriptor.kind() {
            CallableKind::Function => packages.register_function(descriptor),
            CallableKind::Action => packages.register_action(descriptor),
        }
    }

    /// Register a native implemented by a closure or function.
    pub fn register_native_fn<F>(&self, descriptor: CallableDescriptor, f: F)
    where
        F: Fn(&mut NativeContext<'_>, &[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        self.declare(descriptor.clone());
        self.natives.write().register_fn(descriptor, f);
    }

    /// Remove a native from its package and drop its implementation.
    ///
    /// The symbol stays in the global scope until [`Session::rebuild_scope`]
    /// runs, so code checked earlier keeps resolving; invoking it fails
    /// with [`DispatchError::UnknownNative`].
    pub fn unregister_native(&self, descriptor: &CallableDescriptor) {
        {
            let mut packages = self.packages.write();
            match descriptor.kind() {
                CallableKind::Function => packages.unregister_function(descriptor),
                CallableKind::Action => packages.unregister_action(descriptor),
            }
        }
        self.natives.write().unregister(descriptor.symbol());
    }

    /// Register a whole package of descriptors at once.
    ///
    /// Replaces any package with the same name. Host implementations are
    /// not part of a `Package`; bind them with [`Session::register_native`].
    pub fn register_package(&self, package: Package) {
        self.packages.write().register_package(package);
    }

    /// Register a conversion operator with its host routine.
    ///
    /// Returns `false` if an identical operator was already registered.
    pub fn register_conversion(&self, operator: ConversionOperator, routine: ConversionFn) -> bool {
        self.runtime.write().register(operator.implementation, routine);
        self.conversions.write().register(operator)
    }

    /// Rebuild the global scope from the current package table.
    ///
    /// Must not overlap a checking pass.
    pub fn rebuild_scope(&self) {
        self.packages.write().rebuild_scope();
    }

    /// Resolve a call site, or produce the diagnostic explaining why not.
    pub fn resolve_call(
        &self,
        span: Span,
        package: Name,
        member: MemberName,
        args: &[Ty],
    ) -> Result<Symbol, Diagnostic> {
        let packages = self.packages.read();
        check_call(&packages, &self.interner, span, package, member, args).cloned()
    }

    /// Resolve and bind every conversion in `units`.
    ///
    /// Units are checked in parallel; within a unit, a failed conversion
    /// is reported and checking moves on to the next one. Diagnostics come
    /// back in unit order.
    #[tracing::instrument(level = "debug", skip_all, fields(units = units.len()))]
    pub fn check_conversions(&self, units: &mut [Vec<ConversionSite>]) -> DiagnosticQueue {
        let table = self.conversions.read();
        let table = &*table;
        let interner = &self.interner;
        let config = &self.config.diagnostics;

        let per_unit: Vec<DiagnosticQueue> = units
            .par_iter_mut()
            .map(|unit| {
                let mut checker = ConversionChecker::with_config(table, interner, config.clone());
                for site in unit.iter_mut() {
                    let _ = checker.check(&mut site.expr, &site.source);
                }
                checker.finish()
            })
            .collect();

        let mut queue = DiagnosticQueue::with_config(config.clone());
        for unit_queue in per_unit {
            queue.extend(unit_queue);
        }
        tracing::debug!(errors = queue.error_count(), "conversion check finished");
        queue
    }

    /// Invoke the native bound to `symbol`.
    pub fn invoke(&self, symbol: &SymbolName, args: &[Value]) -> Result<Vec<Value>, DispatchError> {
        let mut ctx = NativeContext::new(&self.config.properties, &self.output);
        self.natives.read().invoke(&mut ctx, symbol, args)
    }

    /// Run a bound conversion on `operand`.
    pub fn convert(&self, expr: &ConversionExpr, operand: &Value) -> Result<Vec<Value>, ConvertError> {
        self.runtime.read().execute(expr, operand)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("packages", &self.packages.read().len())
            .field("conversions", &self.conversions.read().len())
            .field("natives", &self.natives.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
