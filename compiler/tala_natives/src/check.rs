//! Resolution entry points used by the type checker.
//!
//! Call sites resolve to a [`Symbol`] by exact signature. Conversion
//! expressions resolve to a single operator and are bound in place, which
//! fixes their result arity before code generation sees them.
//!
//! Errors are local: a failed resolution produces a diagnostic for that
//! expression and checking continues with the next one.

use std::fmt::Write as _;

use tala_diagnostic::{
    unresolved_symbol, Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode, ErrorGuaranteed,
};
use tala_ir::{ConversionExpr, Name, Span, StringLookup, Ty};

use crate::descriptor::qualified_name;
use crate::{CallableKind, ConversionError, ConversionTable, MemberName, PackageTable, Symbol};

/// Resolve the operator for `<target> operand` and bind it to `expr`.
///
/// `source` is the operand's type as inferred by the caller. On error the
/// expression is left unresolved.
#[tracing::instrument(level = "trace", skip(table, expr), fields(target = ?expr.target))]
pub fn check_conversion(
    table: &ConversionTable,
    expr: &mut ConversionExpr,
    source: &Ty,
) -> Result<(), ConversionError> {
    let operator = table.resolve(source, &expr.target)?;
    expr.bind(operator.clone());
    tracing::trace!(slots = expr.result_slots.len(), "conversion bound");
    Ok(())
}

/// Build the diagnostic for a failed conversion at `span`.
pub fn conversion_diagnostic<I: StringLookup + ?Sized>(
    error: &ConversionError,
    span: Span,
    table: &ConversionTable,
    interner: &I,
) -> Diagnostic {
    let (source, target) = error.pair();
    let source_str = source.display(interner).to_string();
    let target_str = target.display(interner).to_string();

    match error {
        ConversionError::NoSuchConversion { .. } => {
            let diag = Diagnostic::error(error.code())
                .with_message(format!(
                    "no conversion from `{source_str}` to `{target_str}`"
                ))
                .with_label(span, format!("cannot convert to `{target_str}`"));

            let targets = table.targets_from(source);
            if targets.is_empty() {
                diag
            } else {
                let mut list = String::new();
                for (i, ty) in targets.iter().enumerate() {
                    if i > 0 {
                        list.push_str(", ");
                    }
                    let _ = write!(list, "`{}`", ty.display(interner));
                }
                diag.with_note(format!("`{source_str}` converts to {list}"))
            }
        }
        ConversionError::AmbiguousConversion { candidates, .. } => Diagnostic::error(error.code())
            .with_message(format!(
                "ambiguous conversion from `{source_str}` to `{target_str}`"
            ))
            .with_label(span, format!("{candidates} operators match"))
            .with_note("exactly one operator may be registered per type pair"),
    }
}

/// Checks a batch of conversion expressions, collecting diagnostics.
pub struct ConversionChecker<'a, I: ?Sized> {
    table: &'a ConversionTable,
    interner: &'a I,
    queue: DiagnosticQueue,
    resolved: usize,
}

impl<'a, I: StringLookup + ?Sized> ConversionChecker<'a, I> {
    pub fn new(table: &'a ConversionTable, interner: &'a I) -> Self {
        Self::with_config(table, interner, DiagnosticConfig::default())
    }

    /// Checker whose queue applies `config` instead of the default limits.
    pub fn with_config(
        table: &'a ConversionTable,
        interner: &'a I,
        config: DiagnosticConfig,
    ) -> Self {
        ConversionChecker {
            table,
            interner,
            queue: DiagnosticQueue::with_config(config),
            resolved: 0,
        }
    }

    /// Resolve and bind one expression.
    ///
    /// Returns a guarantee if the expression failed to resolve.
    pub fn check(&mut self, expr: &mut ConversionExpr, source: &Ty) -> Option<ErrorGuaranteed> {
        match check_conversion(self.table, expr, source) {
            Ok(()) => {
                self.resolved += 1;
                None
            }
            Err(error) => {
                let diag = conversion_diagnostic(&error, expr.span, self.table, self.interner);
                self.queue.push(diag)
            }
        }
    }

    /// Number of expressions bound so far.
    pub fn resolved(&self) -> usize {
        self.resolved
    }

    /// Finish checking and hand back the collected diagnostics.
    pub fn finish(self) -> DiagnosticQueue {
        self.queue
    }
}

/// Resolve a call site to its symbol, or explain why it does not resolve.
///
/// `args` are the argument types excluding any receiver.
pub fn check_call<'t, I: StringLookup + ?Sized>(
    table: &'t PackageTable,
    interner: &I,
    span: Span,
    package: Name,
    member: MemberName,
    args: &[Ty],
) -> Result<&'t Symbol, Diagnostic> {
    if let Some(symbol) = table.resolve_call(package, member, args) {
        return Ok(symbol);
    }

    let name = qualified_name(package, member, interner);
    let Some(pkg) = table.get_package(package) else {
        return Err(unresolved_symbol(span, "package", interner.lookup(package)));
    };

    let registered = pkg
        .get(CallableKind::Function, member)
        .or_else(|| pkg.get(CallableKind::Action, member));
    let Some(descriptor) = registered else {
        return Err(unresolved_symbol(span, "function", &name));
    };

    let expected = descriptor.symbol().render(interner);
    if descriptor.params().len() == args.len() {
        let found: Vec<String> = args
            .iter()
            .map(|ty| ty.display(interner).to_string())
            .collect();
        Err(Diagnostic::error(ErrorCode::E2001)
            .with_message(format!(
                "no `{name}` accepts ({})",
                found.join(", ")
            ))
            .with_label(span, "argument types do not match")
            .with_note(format!("registered signature is `{expected}`")))
    } else {
        Err(Diagnostic::error(ErrorCode::E2004)
            .with_message(format!(
                "`{name}` takes {} argument(s), {} supplied",
                descriptor.params().len(),
                args.len()
            ))
            .with_label(span, "wrong number of arguments")
            .with_note(format!("registered signature is `{expected}`")))
    }
}
