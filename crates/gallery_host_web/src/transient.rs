//! Transient fetch adapter for the browser strategy.

use gallery_host::{TransientFetchFuture, TransientFetchService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser transient fetch adapter backed by `fetch` + `FileReader`.
pub struct WebTransientFetchService;

impl TransientFetchService for WebTransientFetchService {
    fn fetch_data_url<'a>(
        &'a self,
        path: &'a str,
    ) -> TransientFetchFuture<'a, Result<String, String>> {
        Box::pin(async move { crate::data_url::fetch_as_data_url(path).await })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_web_transient_fetch_reports_unsupported() {
        let fetcher = WebTransientFetchService;
        let fetcher_obj: &dyn TransientFetchService = &fetcher;
        let err = block_on(fetcher_obj.fetch_data_url("blob:abc")).expect_err("fetch should fail");
        assert!(err.contains("wasm32"));
    }
}
