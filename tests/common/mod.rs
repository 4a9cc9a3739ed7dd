#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::Layer;

use linkcut::application::services::{AuthService, LinkService, TokenService};
use linkcut::domain::entities::{Link, NewLink, NewUser, User};
use linkcut::domain::repositories::{LinkRepository, UserRepository};
use linkcut::error::AppError;
use linkcut::routes;
use linkcut::state::AppState;

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// In-memory user and link store with the same constraints as the schema.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    links: Vec<Link>,
}

impl MemoryStore {
    pub fn link_count(&self) -> usize {
        self.inner.lock().unwrap().links.len()
    }

    pub fn clicks(&self, code: &str) -> Option<i64> {
        self.inner
            .lock()
            .unwrap()
            .links
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.clicks)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.inner.lock().unwrap();
        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_email_key" }),
            ));
        }

        let user = User::new(
            tables.users.len() as i64 + 1,
            new_user.email,
            new_user.password_hash,
            Utc::now(),
        );
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.lock().unwrap().users.clone())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.lock().unwrap().users.len() as i64)
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tables = self.inner.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == new_link.owner_id) {
            return Err(AppError::not_found(
                "Referenced record not found",
                json!({ "constraint": "links_owner_id_fkey" }),
            ));
        }
        if tables.links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_code_key" }),
            ));
        }

        let link = Link::new(
            tables.links.len() as i64 + 1,
            new_link.owner_id,
            new_link.original_url,
            new_link.code,
            0,
            Utc::now(),
        );
        tables.links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.links.iter().find(|l| l.code == code).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.links.iter().find(|l| l.id == id).cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .links
            .iter()
            .rev()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut tables = self.inner.lock().unwrap();
        Ok(tables.links.iter_mut().find(|l| l.code == code).map(|l| {
            l.clicks += 1;
            l.clone()
        }))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.lock().unwrap().links.len() as i64)
    }

    async fn count_by_owner(&self) -> Result<Vec<(i64, i64)>, AppError> {
        let tables = self.inner.lock().unwrap();
        let mut counts: std::collections::BTreeMap<i64, i64> = Default::default();
        for link in &tables.links {
            *counts.entry(link.owner_id).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());

    let users: Arc<dyn UserRepository> = store.clone();
    let links: Arc<dyn LinkRepository> = store.clone();

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            users.clone(),
            TokenService::new(TEST_SECRET),
        )),
        link_service: Arc::new(LinkService::new(links, users, TEST_BASE_URL.to_string())),
    };

    (state, store)
}

/// Full application router over an in-memory store.
pub fn make_server() -> (TestServer, Arc<MemoryStore>) {
    let (state, store) = create_test_state();
    let app = routes::router(state, false, None).layer(MockConnectInfoLayer);

    (TestServer::new(app).unwrap(), store)
}

pub async fn register(server: &TestServer, email: &str, password: &str) -> i64 {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<serde_json::Value>()["userId"]
        .as_i64()
        .unwrap()
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();

    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Registers an account and returns a session token for it.
pub async fn signed_in(server: &TestServer, email: &str) -> String {
    register(server, email, "secret123").await;
    login(server, email, "secret123").await
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
