//! Spins up a mock of the reporting backend on a random port so the client
//! can be exercised over real HTTP

use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use bi_client_core::config::ClientConfig;
use bi_client_core::storage::{MemorySessionStorage, PersistedSession, SessionStorage};
use bi_client_core::Client;
use bi_shared::req_args::LoginReqArgs;
use bi_shared::telemetry::{self, get_subscriber, init_subscriber};
use uuid::Uuid;

pub const TEST_EMAIL: &str = "admin@example.test";
pub const TEST_PASSWORD: &str = "correct horse battery staple";
pub const TEST_ACCESS_TOKEN: &str = "access-token-1";
pub const TEST_REFRESH_TOKEN: &str = "refresh-token-1";
pub const EXPORT_CSV: &[u8] = b"account_number,branch_code,working_balance\n0011002200,BR001,1500.5\n";

// Ensure that the `tracing` stack is only initialised once
static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("client_tests{}", Uuid::new_v4());
        let (file, path) = telemetry::create_trace_file(&log_file_name).unwrap();
        let subscriber = get_subscriber(subscriber_name, default_filter_level, file);
        init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

pub struct TestApp {
    pub core_client: Client,
    pub storage: Arc<MemorySessionStorage>,
    pub backend: web::Data<BackendState>,
    pub server_handle: tokio::task::JoinHandle<std::io::Result<()>>,
}

/// Shared state of the mock backend, inspected by tests to observe which
/// requests actually reached the network
#[derive(Debug, Default)]
pub struct BackendState {
    pub branch_list_hits: AtomicUsize,
    pub role_list_hits: AtomicUsize,
    pub report_hits: AtomicUsize,
    pub fail_logout: AtomicBool,
    pub logout_bodies: Mutex<Vec<serde_json::Value>>,
    pub branches: Mutex<Vec<serde_json::Value>>,
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener
        .local_addr()
        .expect("failed to read bound address")
        .port();

    let backend = web::Data::new(BackendState::default());
    backend
        .branches
        .lock()
        .unwrap()
        .push(branch_json("BR001", "Head Office"));

    let server = {
        let backend = backend.clone();
        HttpServer::new(move || {
            App::new().app_data(backend.clone()).service(
                web::scope("/api")
                    .route("/user-management/auth/login/", web::post().to(login))
                    .route("/user-management/auth/logout/", web::post().to(logout))
                    .route("/user-management/auth/me/", web::get().to(me))
                    .route("/user-management/roles/", web::get().to(list_roles))
                    .route(
                        "/user-management/permissions/",
                        web::get().to(list_permissions),
                    )
                    .route("/auth/branches/", web::get().to(list_branches))
                    .route("/auth/branches/", web::post().to(create_branch))
                    .route("/reports/account-base/", web::get().to(account_base))
                    .route(
                        "/reports/account-base/stats/",
                        web::get().to(account_base_stats),
                    )
                    .route(
                        "/reports/account-base/export/",
                        web::get().to(export_account_base),
                    ),
            )
        })
        .workers(1)
        .listen(listener)
        .expect("failed to listen on test port")
        .run()
    };
    let server_handle = tokio::spawn(server);

    let storage = Arc::new(MemorySessionStorage::default());
    let config = ClientConfig {
        api_base_url: format!("http://127.0.0.1:{port}/api"),
        ..Default::default()
    };
    let core_client = Client::new(config, Arc::clone(&storage) as Arc<dyn SessionStorage>);

    TestApp {
        core_client,
        storage,
        backend,
        server_handle,
    }
}

impl TestApp {
    pub fn login_args(&self) -> LoginReqArgs {
        LoginReqArgs::new(TEST_EMAIL, TEST_PASSWORD.to_string().into())
    }

    pub async fn login_assert(&self) {
        self.core_client
            .login(self.login_args(), no_cb)
            .await
            .expect("failed to receive on rx")
            .expect("login failed");
    }

    pub fn persisted(&self) -> Option<PersistedSession> {
        self.storage.load().expect("failed to read test storage")
    }

    /// Pretends a previous run saved a session, with the given access token
    pub fn seed_persisted_session(&self, access_token: &str) {
        let principal =
            serde_json::from_value(principal_json()).expect("principal fixture is valid");
        self.storage
            .save(&PersistedSession {
                access_token: access_token.to_string().into(),
                refresh_token: TEST_REFRESH_TOKEN.to_string().into(),
                principal,
            })
            .expect("failed to seed test storage");
    }
}

fn principal_json() -> serde_json::Value {
    serde_json::json!({
        "id": "1",
        "email": TEST_EMAIL,
        "first_name": "Ada",
        "last_name": "Admin",
        "is_active": true,
        "is_staff": true,
        "is_superuser": false,
        "role": "3",
        "branch": "BR001",
        "permissions": [
            "userManagement.view_customuser",
            "userManagement.view_branch"
        ],
        "date_joined": "2024-01-05T08:30:00Z",
        "last_login": null
    })
}

fn branch_json(code: &str, name: &str) -> serde_json::Value {
    serde_json::json!({"branchCode": code, "branchName": name, "user": null})
}

fn bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn login(body: web::Json<serde_json::Value>) -> HttpResponse {
    if body["email"] == TEST_EMAIL && body["password"] == TEST_PASSWORD {
        HttpResponse::Ok().json(serde_json::json!({
            "access": TEST_ACCESS_TOKEN,
            "refresh": TEST_REFRESH_TOKEN,
            "user": principal_json(),
        }))
    } else {
        HttpResponse::Unauthorized()
            .json(serde_json::json!({"message": "Invalid credentials"}))
    }
}

async fn logout(
    state: web::Data<BackendState>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    state.logout_bodies.lock().unwrap().push(body.into_inner());
    if state.fail_logout.load(Ordering::SeqCst) {
        HttpResponse::InternalServerError().body("backend exploded")
    } else {
        HttpResponse::Ok().finish()
    }
}

async fn me(req: HttpRequest) -> HttpResponse {
    if bearer(&req) == Some(TEST_ACCESS_TOKEN) {
        HttpResponse::Ok().json(principal_json())
    } else {
        HttpResponse::Unauthorized().json(serde_json::json!({"message": "Session expired"}))
    }
}

async fn list_branches(state: web::Data<BackendState>, req: HttpRequest) -> HttpResponse {
    if bearer(&req) != Some(TEST_ACCESS_TOKEN) {
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({"message": "Session expired"}));
    }
    state.branch_list_hits.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().json(state.branches.lock().unwrap().clone())
}

async fn create_branch(
    state: web::Data<BackendState>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let created = serde_json::json!({
        "branchCode": body["branchCode"],
        "branchName": body["branchName"],
        "user": null,
    });
    state.branches.lock().unwrap().push(created.clone());
    HttpResponse::Created().json(created)
}

async fn list_roles(state: web::Data<BackendState>) -> HttpResponse {
    state.role_list_hits.fetch_add(1, Ordering::SeqCst);
    HttpResponse::BadRequest()
        .json(serde_json::json!({"message": "Role service rejected the request"}))
}

async fn list_permissions() -> HttpResponse {
    HttpResponse::ServiceUnavailable().body("upstream unavailable")
}

async fn account_base(
    state: web::Data<BackendState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> HttpResponse {
    state.report_hits.fetch_add(1, Ordering::SeqCst);
    let rows = [
        serde_json::json!({
            "account_number": "0011002200",
            "customer_no": "C-1",
            "customer_name": "Acme Ltd",
            "working_balance": 1500.5,
            "branch_code": "BR001"
        }),
        serde_json::json!({
            "account_number": "0011002201",
            "customer_no": "C-2",
            "customer_name": "Globex SA",
            "working_balance": 240.0,
            "branch_code": "BR002"
        }),
    ];
    let filtered: Vec<_> = rows
        .into_iter()
        .filter(|row| match query.get("branch_code") {
            Some(code) => row["branch_code"].as_str() == Some(code.as_str()),
            None => true,
        })
        .collect();
    HttpResponse::Ok().json(filtered)
}

async fn account_base_stats() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "total_accounts": 2,
        "total_balance": 1740.5,
        "average_balance": 870.25,
        "by_branch": [
            {"branch_name": "Head Office", "count": 1, "total_balance": 1500.5, "average_balance": 1500.5},
            {"branch_name": "East", "count": 1, "total_balance": 240.0, "average_balance": 240.0}
        ]
    }))
}

async fn export_account_base() -> HttpResponse {
    HttpResponse::Ok().content_type("text/csv").body(EXPORT_CSV)
}
