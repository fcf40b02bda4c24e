use std::sync::Arc;

use futures::channel::oneshot;

use bi_shared::{
    const_config::path::{
        PATH_REPORTS_ACCOUNT_BASE, PATH_REPORTS_ACCOUNT_BASE_EXPORT,
        PATH_REPORTS_ACCOUNT_BASE_STATS,
    },
    report::{AccountBaseFilters, AccountBaseRecord, AccountBaseStats},
};

use crate::{
    client::{process_json_body, UiCallBack, DUMMY_ARGUMENT},
    Client,
};

impl Client {
    /// Filtered report rows. Cached per filter combination, the filters are
    /// part of the cache key.
    #[tracing::instrument(skip(ui_notify))]
    pub fn account_base_report<F: UiCallBack>(
        &self,
        filters: &AccountBaseFilters,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<AccountBaseRecord>>> {
        let key =
            serde_json::to_string(filters).expect("filters are plain data and always serialize");
        if let Some(cached) = self.caches.account_base.fresh(&key) {
            let (tx, rx) = oneshot::channel();
            tx.send(Ok(cached)).expect("failed to send oneshot msg");
            ui_notify();
            return rx;
        }
        let caches = Arc::clone(&self.caches);
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body::<Vec<AccountBaseRecord>>(resp).await;
            if let Ok(rows) = &msg {
                caches.account_base.store(key, rows.clone());
            }
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(PATH_REPORTS_ACCOUNT_BASE, None, filters, on_done);
        rx
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn account_base_stats<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<AccountBaseStats>> {
        self.send_request_expect_json(
            PATH_REPORTS_ACCOUNT_BASE_STATS,
            None,
            &DUMMY_ARGUMENT,
            ui_notify,
        )
    }

    /// Raw export payload for client-side download, bypasses JSON parsing
    #[tracing::instrument(skip(ui_notify))]
    pub fn export_account_base<F: UiCallBack>(
        &self,
        filters: &AccountBaseFilters,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<u8>>> {
        self.send_request_expect_bytes(PATH_REPORTS_ACCOUNT_BASE_EXPORT, filters, ui_notify)
    }
}
