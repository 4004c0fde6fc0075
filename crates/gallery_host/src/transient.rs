//! Transient display-reference resolution contracts.
//!
//! Browser hosts hand out capture references (blob/object URLs) that are only
//! valid while the backing resource stays alive. This service turns such a
//! reference into a base64 data URL before the resource can be revoked.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`TransientFetchService`] async methods.
pub type TransientFetchFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service resolving transient display references into data URLs.
pub trait TransientFetchService {
    /// Fetches a transient display reference as a binary resource and returns
    /// it as a base64 data URL.
    fn fetch_data_url<'a>(
        &'a self,
        path: &'a str,
    ) -> TransientFetchFuture<'a, Result<String, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op transient fetch adapter for hosts without a fetchable display surface.
pub struct NoopTransientFetchService;

impl TransientFetchService for NoopTransientFetchService {
    fn fetch_data_url<'a>(
        &'a self,
        _path: &'a str,
    ) -> TransientFetchFuture<'a, Result<String, String>> {
        Box::pin(async { Err("transient fetch unavailable: fetch_data_url".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory transient fetch adapter mapping references to canned data URLs.
pub struct MemoryTransientFetchService {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryTransientFetchService {
    /// Registers the data URL a transient reference resolves to.
    pub fn insert(&self, path: impl Into<String>, data_url: impl Into<String>) {
        self.inner.borrow_mut().insert(path.into(), data_url.into());
    }

    /// Drops a registered reference, simulating host-side revocation.
    pub fn revoke(&self, path: &str) {
        self.inner.borrow_mut().remove(path);
    }
}

impl TransientFetchService for MemoryTransientFetchService {
    fn fetch_data_url<'a>(
        &'a self,
        path: &'a str,
    ) -> TransientFetchFuture<'a, Result<String, String>> {
        Box::pin(async move {
            self.inner
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| format!("transient resource revoked or unknown: {path}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_transient_fetch_reports_unavailable() {
        let fetcher = NoopTransientFetchService;
        let fetcher_obj: &dyn TransientFetchService = &fetcher;
        let err = block_on(fetcher_obj.fetch_data_url("blob:abc")).expect_err("fetch should fail");
        assert!(err.contains("fetch_data_url"));
    }

    #[test]
    fn memory_transient_fetch_resolves_registered_references() {
        let fetcher = MemoryTransientFetchService::default();
        fetcher.insert("blob:abc", "data:image/jpeg;base64,aGk=");

        let fetcher_obj: &dyn TransientFetchService = &fetcher;
        assert_eq!(
            block_on(fetcher_obj.fetch_data_url("blob:abc")).expect("fetch"),
            "data:image/jpeg;base64,aGk="
        );

        fetcher.revoke("blob:abc");
        let err = block_on(fetcher_obj.fetch_data_url("blob:abc"))
            .expect_err("revoked reference should fail");
        assert!(err.contains("revoked"));
    }
}
