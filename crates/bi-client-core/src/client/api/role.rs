use futures::channel::oneshot;

use bi_shared::{
    const_config::path::{
        PATH_ROLES_CREATE, PATH_ROLES_LIST, PATH_ROLE_DELETE, PATH_ROLE_UPDATE,
    },
    id::EntityId,
    uac::{Role, RoleDraft},
};

use crate::{client::UiCallBack, Client};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_roles<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Role>>> {
        self.send_cached_list_request(PATH_ROLES_LIST, |caches| &caches.roles, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_role<F: UiCallBack>(
        &self,
        args: &RoleDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Role>> {
        self.send_mutation_expect_json(
            PATH_ROLES_CREATE,
            None,
            args,
            |caches| caches.roles.invalidate(),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_role<F: UiCallBack>(
        &self,
        id: &EntityId,
        args: &RoleDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Role>> {
        self.send_mutation_expect_json(
            PATH_ROLE_UPDATE,
            Some(id.as_ref()),
            args,
            |caches| caches.roles.invalidate(),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_role<F: UiCallBack>(
        &self,
        id: &EntityId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_mutation_expect_empty(
            PATH_ROLE_DELETE,
            Some(id.as_ref()),
            &"",
            |caches| caches.roles.invalidate(),
            ui_notify,
        )
    }
}
