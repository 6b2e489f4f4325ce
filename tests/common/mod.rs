//! In-process HTTP helpers: requests go straight into the router via
//! `tower::ServiceExt::oneshot`, backed by in-memory stores.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use mealplan::{build_app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "user1@mail.com";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::in_memory_for_tests(&[ADMIN_EMAIL]);
        let router = build_app(state.clone());
        Self { state, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("/api/v1{uri}"));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body, text }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Signs up and logs in, returning `(user_id, access_token)`.
    pub async fn login_as(&self, email: &str, password: &str) -> (String, String) {
        let creds = json!({ "email": email, "password": password });
        let signup = self
            .request(Method::POST, "/auth/signup", None, Some(creds.clone()))
            .await;
        assert_eq!(signup.status, StatusCode::OK, "signup failed: {}", signup.text);
        let login = self
            .request(Method::POST, "/auth/login", None, Some(creds))
            .await;
        assert_eq!(login.status, StatusCode::OK, "login failed: {}", login.text);
        (
            signup.body["id"].as_str().unwrap().to_string(),
            login.body["token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn create_food(&self, token: &str, food: Value) -> String {
        let res = self.post("/foods", token, food).await;
        assert_eq!(res.status, StatusCode::OK, "create food failed: {}", res.text);
        res.body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_meal(&self, token: &str, meal_type: &str, foods: &[&str]) -> Value {
        let res = self
            .post("/meals", token, json!({ "mealType": meal_type, "foods": foods }))
            .await;
        assert_eq!(res.status, StatusCode::OK, "create meal failed: {}", res.text);
        res.body
    }
}

pub fn mixed_nuts() -> Value {
    json!({
        "name": "Mixed Nuts",
        "calories": 200,
        "servingSize": 1,
        "servingSizeUnits": "ounces",
        "servings": 1,
        "carbs": 4,
        "protein": 10,
        "fat": 21,
        "sodium": 50
    })
}

pub fn swiss_rolls() -> Value {
    json!({
        "name": "Swiss Rolls",
        "calories": 280,
        "servingSize": 2,
        "servingSizeUnits": "cakes",
        "servings": 1,
        "carbs": 40,
        "protein": 8,
        "fat": 12,
        "sodium": 140
    })
}
