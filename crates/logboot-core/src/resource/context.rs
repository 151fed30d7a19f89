//! Loading contexts

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use super::fs::FileSystemLoader;
use super::loader::{ResourceLoader, SharedResourceLoader};

thread_local! {
    static ACTIVE: RefCell<Vec<LoadingContext>> = const { RefCell::new(Vec::new()) };
}

/// Scope in which resource names are resolved
///
/// `classpath:` locations, bare resource names and provider manifests are
/// all looked up through the context's loader. Contexts are cheap to clone.
#[derive(Clone)]
pub struct LoadingContext {
    name: Arc<str>,
    loader: SharedResourceLoader,
}

impl LoadingContext {
    pub fn new(name: impl Into<String>, loader: SharedResourceLoader) -> Self {
        Self {
            name: Arc::from(name.into()),
            loader,
        }
    }

    /// Context resolving resources against the current directory
    pub fn current_dir() -> Self {
        Self::new("default", Arc::new(FileSystemLoader::current_dir()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn loader(&self) -> &dyn ResourceLoader {
        self.loader.as_ref()
    }

    /// Whether both handles refer to the same loader
    pub fn same_loader(&self, other: &LoadingContext) -> bool {
        Arc::ptr_eq(&self.loader, &other.loader)
    }

    /// Make this the calling thread's active context until the scope drops
    ///
    /// Scopes nest; dropping one restores the context that was active before.
    pub fn enter(&self) -> ContextScope {
        ACTIVE.with(|stack| stack.borrow_mut().push(self.clone()));
        ContextScope {
            _not_send: PhantomData,
        }
    }

    /// The calling thread's active context, if one was entered
    pub fn current() -> Option<LoadingContext> {
        ACTIVE.with(|stack| stack.borrow().last().cloned())
    }
}

impl std::fmt::Debug for LoadingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingContext")
            .field("name", &self.name)
            .field("loader", &self.loader.name())
            .finish()
    }
}

/// Active loading context for the calling thread; restored on drop
#[must_use = "the loading context is left as soon as the scope is dropped"]
pub struct ContextScope {
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

impl std::fmt::Debug for ContextScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextScope").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MemoryResourceLoader;
    use std::thread;

    fn context(name: &str) -> LoadingContext {
        LoadingContext::new(name, Arc::new(MemoryResourceLoader::new()))
    }

    #[test]
    fn test_enter_and_leave() {
        thread::spawn(|| {
            assert!(LoadingContext::current().is_none());

            let outer = context("outer");
            let inner = context("inner");
            {
                let _outer = outer.enter();
                assert_eq!(LoadingContext::current().unwrap().name(), "outer");
                {
                    let _inner = inner.enter();
                    assert_eq!(LoadingContext::current().unwrap().name(), "inner");
                }
                assert_eq!(LoadingContext::current().unwrap().name(), "outer");
            }
            assert!(LoadingContext::current().is_none());
        })
        .join()
        .unwrap();
    }

    #[test]
    fn test_context_is_per_thread() {
        let ctx = context("main");
        let _scope = ctx.enter();
        let seen = thread::spawn(|| LoadingContext::current().map(|c| c.name().to_string()))
            .join()
            .unwrap();
        assert!(seen.is_none());
    }

    #[test]
    fn test_same_loader() {
        let a = context("a");
        let b = a.clone();
        assert!(a.same_loader(&b));
        assert!(!a.same_loader(&context("a")));
    }
}
