use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::AuthorizationGuard;
use auth::JwtHandler;
use serde_json::json;
use serde_json::Value;
use todo_service::domain::task::errors::TaskError;
use todo_service::domain::task::models::NewTask;
use todo_service::domain::task::models::Task;
use todo_service::domain::task::models::TaskId;
use todo_service::domain::task::models::TaskMutation;
use todo_service::domain::task::ports::TaskRepository;
use todo_service::domain::task::service::TaskService;
use todo_service::domain::user::errors::UserError;
use todo_service::domain::user::models::User;
use todo_service::domain::user::models::UserId;
use todo_service::domain::user::ports::UserRepository;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::inbound::http::router::AppState;
use todo_service::outbound::repositories::PostgresTaskRepository;
use todo_service::outbound::repositories::PostgresUserRepository;

use self::db::TestDb;

pub mod db;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const SESSION_COOKIE: &str = "better-auth.session_token";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub storage: TestStorage,
}

/// Backing store of a `TestApp`
pub enum TestStorage {
    Memory(Arc<InMemoryTaskRepository>),
    Postgres(TestDb),
}

/// A registered account as seen by a client.
pub struct SignedUpUser {
    pub id: String,
    pub token: String,
}

impl TestApp {
    /// Spawn the application over in-memory storage
    pub async fn spawn() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let tasks = Arc::new(InMemoryTaskRepository::default());

        Self::start(users, Arc::clone(&tasks), TestStorage::Memory(tasks)).await
    }

    /// Spawn the application over a fresh Postgres database
    pub async fn spawn_with_postgres(db: TestDb) -> Self {
        let users = Arc::new(PostgresUserRepository::new(db.pool.clone()));
        let tasks = Arc::new(PostgresTaskRepository::new(db.pool.clone()));

        Self::start(users, tasks, TestStorage::Postgres(db)).await
    }

    async fn start<UR, TR>(users: Arc<UR>, tasks: Arc<TR>, storage: TestStorage) -> Self
    where
        UR: UserRepository,
        TR: TaskRepository,
    {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));
        let guard = Arc::new(AuthorizationGuard::new(Arc::clone(&authenticator)));

        let user_service = Arc::new(UserService::new(users, authenticator));
        let task_service = Arc::new(TaskService::new(tasks));

        let state = AppState::new(user_service, task_service, guard, SESSION_COOKIE);
        let router = create_router(state, &["http://localhost:3000".to_string()]);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            // No cookie store: every test states its credentials explicitly
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
            storage,
        }
    }

    /// Total number of stored tasks across all owners
    pub async fn task_count(&self) -> usize {
        match &self.storage {
            TestStorage::Memory(tasks) => tasks.count(),
            TestStorage::Postgres(db) => {
                let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
                    .fetch_one(&db.pool)
                    .await
                    .expect("Failed to count tasks");
                count as usize
            }
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make GET request carrying the session cookie only
    pub fn get_with_cookie(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path)
            .header("Cookie", format!("{}={}", SESSION_COOKIE, token))
    }

    /// Register an account and return its id and session token
    pub async fn sign_up(&self, email: &str, password: &str) -> SignedUpUser {
        let response = self
            .post("/api/auth/signup")
            .json(&json!({
                "email": email,
                "password": password,
                "name": "Test User"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        SignedUpUser {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Create a task through the API and return the response body
    pub async fn create_task(&self, user: &SignedUpUser, title: &str) -> Value {
        let response = self
            .post_authenticated(&format!("/api/{}/tasks", user.id), &user.token)
            .json(&json!({ "title": title }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}

/// User storage keyed by id
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }
}

/// Task storage with sequential ids starting at 1
#[derive(Default)]
pub struct InMemoryTaskRepository {
    state: Mutex<TaskTable>,
}

#[derive(Default)]
struct TaskTable {
    next_id: i64,
    rows: BTreeMap<i64, Task>,
}

impl InMemoryTaskRepository {
    /// Total number of stored tasks across all owners
    pub fn count(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task, TaskError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let task = task.with_id(TaskId(state.next_id));
        state.rows.insert(task.id.0, task.clone());
        Ok(task)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .values()
            .filter(|t| &t.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, owner: &UserId, id: TaskId) -> Result<Option<Task>, TaskError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .get(&id.0)
            .filter(|t| &t.user_id == owner)
            .cloned())
    }

    async fn mutate(
        &self,
        owner: &UserId,
        id: TaskId,
        mutation: TaskMutation,
    ) -> Result<Task, TaskError> {
        let mut state = self.state.lock().unwrap();
        let task = state
            .rows
            .get_mut(&id.0)
            .filter(|t| &t.user_id == owner)
            .ok_or(TaskError::NotFound(id.0))?;
        task.apply(mutation);
        Ok(task.clone())
    }

    async fn delete(&self, owner: &UserId, id: TaskId) -> Result<(), TaskError> {
        let mut state = self.state.lock().unwrap();
        match state.rows.get(&id.0) {
            Some(task) if &task.user_id == owner => {
                state.rows.remove(&id.0);
                Ok(())
            }
            _ => Err(TaskError::NotFound(id.0)),
        }
    }
}
