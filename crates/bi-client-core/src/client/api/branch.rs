use futures::channel::oneshot;

use bi_shared::{
    branch::{Branch, BranchCode, BranchDraft},
    const_config::path::{
        PATH_BRANCHES_CREATE, PATH_BRANCHES_LIST, PATH_BRANCH_DELETE, PATH_BRANCH_UPDATE,
    },
};

use crate::{client::UiCallBack, Client};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_branches<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Branch>>> {
        self.send_cached_list_request(PATH_BRANCHES_LIST, |caches| &caches.branches, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_branch<F: UiCallBack>(
        &self,
        args: &BranchDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Branch>> {
        self.send_mutation_expect_json(
            PATH_BRANCHES_CREATE,
            None,
            args,
            |caches| caches.branches.invalidate(),
            ui_notify,
        )
    }

    /// Branches are keyed by their code, there is no surrogate id
    #[tracing::instrument(skip(ui_notify))]
    pub fn update_branch<F: UiCallBack>(
        &self,
        code: &BranchCode,
        args: &BranchDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Branch>> {
        self.send_mutation_expect_json(
            PATH_BRANCH_UPDATE,
            Some(code.as_ref()),
            args,
            |caches| caches.branches.invalidate(),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_branch<F: UiCallBack>(
        &self,
        code: &BranchCode,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_mutation_expect_empty(
            PATH_BRANCH_DELETE,
            Some(code.as_ref()),
            &"",
            |caches| caches.branches.invalidate(),
            ui_notify,
        )
    }
}
