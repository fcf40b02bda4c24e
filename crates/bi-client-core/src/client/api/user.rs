use futures::channel::oneshot;
use secrecy::ExposeSecret;

use bi_shared::{
    const_config::path::{
        PATH_USERS_CREATE, PATH_USERS_LIST, PATH_USER_DELETE, PATH_USER_UPDATE,
    },
    id::EntityId,
    req_args::{NewUserReqArgs, UserUpdateReqArgs},
    uac::Principal,
};

use crate::{client::UiCallBack, Client};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_users<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Principal>>> {
        self.send_cached_list_request(PATH_USERS_LIST, |caches| &caches.users, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_user<F: UiCallBack>(
        &self,
        args: NewUserReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Principal>> {
        let body = serde_json::json!({
            "email": args.email,
            "first_name": args.first_name,
            "last_name": args.last_name,
            "password": args.password.expose_secret(),
            "role": args.role,
            "branch": args.branch,
        });
        self.send_mutation_expect_json(
            PATH_USERS_CREATE,
            None,
            &body,
            |caches| caches.users.invalidate(),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_user<F: UiCallBack>(
        &self,
        id: &EntityId,
        args: &UserUpdateReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Principal>> {
        self.send_mutation_expect_json(
            PATH_USER_UPDATE,
            Some(id.as_ref()),
            args,
            |caches| caches.users.invalidate(),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_user<F: UiCallBack>(
        &self,
        id: &EntityId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_mutation_expect_empty(
            PATH_USER_DELETE,
            Some(id.as_ref()),
            &"",
            |caches| caches.users.invalidate(),
            ui_notify,
        )
    }
}
