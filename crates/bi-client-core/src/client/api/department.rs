use futures::channel::oneshot;

use bi_shared::{
    const_config::path::{
        PATH_DEPARTMENTS_CREATE, PATH_DEPARTMENTS_LIST, PATH_DEPARTMENT_DELETE,
        PATH_DEPARTMENT_UPDATE,
    },
    department::{Department, DepartmentCode, DepartmentDraft},
};

use crate::{client::UiCallBack, Client};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_departments<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Department>>> {
        self.send_cached_list_request(PATH_DEPARTMENTS_LIST, |caches| &caches.departments, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_department<F: UiCallBack>(
        &self,
        args: &DepartmentDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Department>> {
        self.send_mutation_expect_json(
            PATH_DEPARTMENTS_CREATE,
            None,
            args,
            |caches| caches.departments.invalidate(),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_department<F: UiCallBack>(
        &self,
        code: &DepartmentCode,
        args: &DepartmentDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Department>> {
        self.send_mutation_expect_json(
            PATH_DEPARTMENT_UPDATE,
            Some(code.as_ref()),
            args,
            |caches| caches.departments.invalidate(),
            ui_notify,
        )
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_department<F: UiCallBack>(
        &self,
        code: &DepartmentCode,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_mutation_expect_empty(
            PATH_DEPARTMENT_DELETE,
            Some(code.as_ref()),
            &"",
            |caches| caches.departments.invalidate(),
            ui_notify,
        )
    }
}
