#![allow(dead_code)]

//! Test fixtures: an in-memory implementation of both repository traits and
//! a `TestServer` wired through the real services and routes. Handler tests
//! run the full HTTP stack without a live database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

use orders_api::application::services::{OrderService, UserService};
use orders_api::domain::entities::{NewOrder, NewUser, Order, OrderStatus, User, UserPatch};
use orders_api::domain::repositories::{OrderRepository, UserRepository};
use orders_api::error::AppError;
use orders_api::state::AppState;

#[derive(Clone)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
struct OrderRow {
    id: i64,
    user_id: i64,
    product_name: String,
    amount: f64,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

/// Backing store shared by both in-memory repositories, mirroring the two
/// tables plus a creation tick so every record gets a distinct, increasing
/// `created_at`.
struct StoreInner {
    users: Vec<UserRow>,
    orders: Vec<OrderRow>,
    next_user_id: i64,
    next_order_id: i64,
    seq: i64,
    base: DateTime<Utc>,
}

impl StoreInner {
    fn new() -> Self {
        Self {
            users: Vec::new(),
            orders: Vec::new(),
            next_user_id: 1,
            next_order_id: 1,
            seq: 0,
            base: Utc::now() - Duration::hours(1),
        }
    }

    fn tick(&mut self) -> DateTime<Utc> {
        self.seq += 1;
        self.base + Duration::seconds(self.seq)
    }

    fn user_entity(&self, row: &UserRow) -> User {
        User {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            created_at: row.created_at,
            order_count: self.orders.iter().filter(|o| o.user_id == row.id).count() as i64,
        }
    }

    fn order_entity(&self, row: &OrderRow) -> Order {
        Order {
            id: row.id,
            user_id: row.user_id,
            product_name: row.product_name.clone(),
            amount: row.amount,
            status: row.status,
            created_at: row.created_at,
            user_name: self
                .users
                .iter()
                .find(|u| u.id == row.user_id)
                .map(|u| u.name.clone()),
        }
    }

    fn insert_user(&mut self, new_user: NewUser) -> Result<User, AppError> {
        if self
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            // Mirrors the unique index on lower(email).
            return Err(AppError::conflict(
                "Email already exists",
                json!({ "constraint": "users_email_lower_key" }),
            ));
        }

        let row = UserRow {
            id: self.next_user_id,
            name: new_user.name,
            email: new_user.email,
            created_at: self.tick(),
        };
        self.next_user_id += 1;
        self.users.push(row);
        let row = self.users.last().unwrap().clone();
        Ok(self.user_entity(&row))
    }

    fn insert_order(&mut self, new_order: NewOrder) -> Order {
        let row = OrderRow {
            id: self.next_order_id,
            user_id: new_order.user_id,
            product_name: new_order.product_name,
            amount: new_order.amount,
            status: OrderStatus::Pending,
            created_at: self.tick(),
        };
        self.next_order_id += 1;
        self.orders.push(row);
        let row = self.orders.last().unwrap().clone();
        self.order_entity(&row)
    }
}

fn matches_search(haystacks: &[&str], search: Option<&str>) -> bool {
    match search {
        None => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
        }
    }
}

struct InMemoryUserRepository {
    store: Arc<Mutex<StoreInner>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        self.store.lock().unwrap().insert_user(new_user)
    }

    async fn create_batch(&self, new_users: Vec<NewUser>) -> Result<Vec<User>, AppError> {
        let mut inner = self.store.lock().unwrap();

        // All-or-nothing: snapshot and restore on any failure.
        let checkpoint = (inner.users.clone(), inner.next_user_id, inner.seq);
        let mut created = Vec::with_capacity(new_users.len());
        for new_user in new_users {
            match inner.insert_user(new_user) {
                Ok(user) => created.push(user),
                Err(e) => {
                    (inner.users, inner.next_user_id, inner.seq) = checkpoint;
                    return Err(e);
                }
            }
        }
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| inner.user_entity(u)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| inner.user_entity(u)))
    }

    async fn all_emails(&self) -> Result<Vec<String>, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner.users.iter().map(|u| u.email.clone()).collect())
    }

    async fn list<'a>(
        &self,
        search: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .filter(|u| matches_search(&[&u.name, &u.email], search))
            .skip(offset as usize)
            .take(limit as usize)
            .map(|u| inner.user_entity(u))
            .collect())
    }

    async fn count<'a>(&self, search: Option<&'a str>) -> Result<i64, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .filter(|u| matches_search(&[&u.name, &u.email], search))
            .count() as i64)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner.users.iter().map(|u| inner.user_entity(u)).collect())
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let mut inner = self.store.lock().unwrap();
        let row = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(email) = patch.email {
            row.email = email;
        }

        let row = row.clone();
        Ok(inner.user_entity(&row))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.store.lock().unwrap();
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        Ok(inner.users.len() < before)
    }
}

struct InMemoryOrderRepository {
    store: Arc<Mutex<StoreInner>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError> {
        Ok(self.store.lock().unwrap().insert_order(new_order))
    }

    async fn create_batch(&self, new_orders: Vec<NewOrder>) -> Result<Vec<Order>, AppError> {
        let mut inner = self.store.lock().unwrap();
        Ok(new_orders
            .into_iter()
            .map(|no| inner.insert_order(no))
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| inner.order_entity(o)))
    }

    async fn list<'a>(
        &self,
        user_id: Option<i64>,
        search: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError> {
        let inner = self.store.lock().unwrap();
        let mut rows: Vec<&OrderRow> = inner
            .orders
            .iter()
            .filter(|o| user_id.is_none_or(|uid| o.user_id == uid))
            .filter(|o| matches_search(&[&o.product_name], search))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|o| inner.order_entity(o))
            .collect())
    }

    async fn count<'a>(&self, user_id: Option<i64>, search: Option<&'a str>) -> Result<i64, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner
            .orders
            .iter()
            .filter(|o| user_id.is_none_or(|uid| o.user_id == uid))
            .filter(|o| matches_search(&[&o.product_name], search))
            .count() as i64)
    }

    async fn list_all(&self, user_id: Option<i64>) -> Result<Vec<Order>, AppError> {
        self.list(user_id, None, 0, i64::MAX).await
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
        let inner = self.store.lock().unwrap();
        let mut rows: Vec<&OrderRow> = inner
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .collect();
        rows.sort_by_key(|o| o.id);
        Ok(rows.into_iter().map(|o| inner.order_entity(o)).collect())
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError> {
        let inner = self.store.lock().unwrap();
        Ok(inner.orders.iter().filter(|o| o.user_id == user_id).count() as i64)
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError> {
        let mut inner = self.store.lock().unwrap();
        let row = inner
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| AppError::not_found("Order not found", json!({ "id": id })))?;

        row.status = status;
        let row = row.clone();
        Ok(inner.order_entity(&row))
    }
}

/// Builds application state over a fresh in-memory store.
pub fn create_test_state() -> AppState {
    let store = Arc::new(Mutex::new(StoreInner::new()));
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository {
        store: store.clone(),
    });
    let orders: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository { store });

    AppState::new(
        Arc::new(UserService::new(users.clone(), orders.clone())),
        Arc::new(OrderService::new(orders, users)),
    )
}

/// Builds a test server with the full API route table mounted at `/api`.
pub fn make_server() -> TestServer {
    let app = Router::new()
        .nest("/api", orders_api::api::routes::api_routes())
        .with_state(create_test_state());
    TestServer::new(app).unwrap()
}

/// Creates a user over HTTP and returns its id.
pub async fn create_user(server: &TestServer, name: &str, email: &str) -> i64 {
    let response = server
        .post("/api/users")
        .json(&json!({ "name": name, "email": email }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Creates an order over HTTP and returns its id.
pub async fn create_order(server: &TestServer, user_id: i64, product: &str, amount: f64) -> i64 {
    let response = server
        .post("/api/orders")
        .json(&json!({ "user_id": user_id, "product_name": product, "amount": amount }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}
