use std::cell::RefCell;
use std::rc::Rc;

use crate::core::catalog::TypeCatalog;
use crate::host::ElementKind;
use crate::issues::ExpandWarning;

/// Warn-level logging capability supplied by the host.
///
/// Every resolver and flattening call receives it through an
/// [`ExpandContext`]; nothing in the core logs through ambient state.
pub trait Logger {
    fn warn(&self, warning: &ExpandWarning);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, warning: &ExpandWarning) {
        tracing::warn!(code = warning.code(), "{warning}");
    }
}

/// Keeps every warning for later reporting, and forwards it to `tracing`.
///
/// Clones share the same buffer, so one handle can be given to the plugin
/// while another is kept for the report.
#[derive(Debug, Default, Clone)]
pub struct CollectingLogger {
    warnings: Rc<RefCell<Vec<ExpandWarning>>>,
}

impl CollectingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the collected warnings.
    pub fn take(&self) -> Vec<ExpandWarning> {
        std::mem::take(&mut *self.warnings.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl Logger for CollectingLogger {
    fn warn(&self, warning: &ExpandWarning) {
        TracingLogger.warn(warning);
        self.warnings.borrow_mut().push(warning.clone());
    }
}

/// Run-scoped state threaded through one directive expansion.
pub struct ExpandContext<'a> {
    pub catalog: &'a TypeCatalog,
    pub logger: &'a dyn Logger,
    /// Element kind every descriptor of this expansion is tagged with.
    pub kind: ElementKind,
}

impl<'a> ExpandContext<'a> {
    pub fn new(catalog: &'a TypeCatalog, logger: &'a dyn Logger, kind: ElementKind) -> Self {
        Self {
            catalog,
            logger,
            kind,
        }
    }

    pub fn warn(&self, warning: ExpandWarning) {
        self.logger.warn(&warning);
    }
}
