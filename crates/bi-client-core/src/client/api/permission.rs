use futures::channel::oneshot;

use bi_shared::{const_config::path::PATH_PERMISSIONS_LIST, uac::AppPermission};

use crate::{client::UiCallBack, Client};

impl Client {
    /// Permission reference data, read-only from the client's perspective
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_permissions<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<AppPermission>>> {
        self.send_cached_list_request(PATH_PERMISSIONS_LIST, |caches| &caches.permissions, ui_notify)
    }
}
