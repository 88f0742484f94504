//! Hook registration surface of the documentation generator.

use std::path::Path;

use super::Element;

/// Named extension points a hook can be registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Called each time an element has been added to a block's element list.
    ParserFindElements,
}

impl HookPoint {
    pub fn as_str(self) -> &'static str {
        match self {
            HookPoint::ParserFindElements => "parser-find-elements",
        }
    }
}

/// Callback for [`HookPoint::ParserFindElements`].
///
/// `element` is the element just pushed onto `elements`; the hook may pop it
/// and append replacements.
pub trait ParserHook {
    fn find_elements(&mut self, elements: &mut Vec<Element>, element: &Element, block: &str, filename: &Path);
}

/// Registration capability exposed by the host to plugins.
pub trait Host {
    /// Lower priorities run first.
    fn add_hook(&mut self, point: HookPoint, hook: Box<dyn ParserHook>, priority: i32);
}

struct RegisteredHook {
    point: HookPoint,
    priority: i32,
    hook: Box<dyn ParserHook>,
}

/// In-process host: keeps registered hooks and dispatches to them.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<RegisteredHook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every `parser-find-elements` hook, in priority order.
    pub fn find_elements(&mut self, elements: &mut Vec<Element>, element: &Element, block: &str, filename: &Path) {
        for registered in &mut self.hooks {
            if registered.point == HookPoint::ParserFindElements {
                registered.hook.find_elements(elements, element, block, filename);
            }
        }
    }
}

impl Host for HookRegistry {
    fn add_hook(&mut self, point: HookPoint, hook: Box<dyn ParserHook>, priority: i32) {
        tracing::debug!(point = point.as_str(), priority, "registered hook");
        self.hooks.push(RegisteredHook {
            point,
            priority,
            hook,
        });
        // stable: equal priorities keep registration order
        self.hooks.sort_by_key(|registered| registered.priority);
    }
}
