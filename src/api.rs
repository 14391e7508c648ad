// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the remote finance API.

use crate::models::{Category, NewCategory, NewTransaction, Transaction, YearMonth};
use crate::session::Session;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token is missing, expired or was rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// Any other non-success status. `message` is the server's own text.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Read and write access to one user's transactions and categories.
pub trait FinanceApi {
    fn fetch_transactions(&self, month: &YearMonth) -> Result<Vec<Transaction>, ApiError>;
    fn fetch_categories(&self) -> Result<Vec<Category>, ApiError>;
    fn create_transaction(&self, new: &NewTransaction) -> Result<i64, ApiError>;
    fn delete_transaction(&self, id: i64) -> Result<(), ApiError>;
    fn create_category(&self, new: &NewCategory) -> Result<Category, ApiError>;
}

/// Transactions and categories fetched together for one month.
#[derive(Debug, Clone)]
pub struct MonthSnapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

pub fn load_month<A: FinanceApi + ?Sized>(
    api: &A,
    month: YearMonth,
) -> Result<MonthSnapshot, ApiError> {
    let transactions = api.fetch_transactions(&month)?;
    let categories = api.fetch_categories()?;
    tracing::debug!(
        %month,
        transactions = transactions.len(),
        categories = categories.len(),
        "month loaded"
    );
    Ok(MonthSnapshot {
        transactions,
        categories,
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    msg: Option<String>,
}

#[derive(Deserialize)]
struct TokenBody {
    access_token: String,
}

#[derive(Deserialize)]
struct CreatedBody {
    id: i64,
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let err = status_error(status, &body);
    tracing::warn!(status = status.as_u16(), error = %err, "API returned an error");
    Err(err)
}

/// Maps an error response to [`ApiError`], keeping the server's message verbatim.
///
/// The message comes from `{"error": ..}` or `{"msg": ..}`, else the raw body,
/// else the status reason. 401 and 422 (rejected token) are `Unauthorized`.
pub fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.msg))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Unauthorized(message)
        }
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let text = check(resp)?.text()?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Registers a new account and returns its access token.
pub fn register(
    client: &Client,
    api_url: &str,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    authenticate(client, api_url, "auth/register", email, password)
}

pub fn login(
    client: &Client,
    api_url: &str,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    authenticate(client, api_url, "auth/login", email, password)
}

fn authenticate(
    client: &Client,
    api_url: &str,
    path: &str,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    let email = normalize_email(email);
    tracing::info!(%email, path, "authenticating");
    let resp = client
        .post(join_url(api_url, path))
        .json(&json!({ "email": email, "password": password }))
        .send()?;
    let body: TokenBody = read_json(resp)?;
    Ok(body.access_token)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// [`FinanceApi`] over HTTP, authorized by a borrowed [`Session`].
pub struct HttpApi<'s> {
    client: Client,
    session: &'s Session,
}

impl<'s> HttpApi<'s> {
    pub fn new(client: Client, session: &'s Session) -> Self {
        Self { client, session }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.get(join_url(&self.session.api_url, path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.post(join_url(&self.session.api_url, path)))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.delete(join_url(&self.session.api_url, path)))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.session.token)
    }
}

impl FinanceApi for HttpApi<'_> {
    fn fetch_transactions(&self, month: &YearMonth) -> Result<Vec<Transaction>, ApiError> {
        tracing::debug!(%month, "GET /transactions");
        let resp = self
            .get("transactions")
            .query(&[("month", month.to_string())])
            .send()?;
        read_json(resp)
    }

    fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        tracing::debug!("GET /categories");
        read_json(self.get("categories").send()?)
    }

    fn create_transaction(&self, new: &NewTransaction) -> Result<i64, ApiError> {
        tracing::debug!(kind = %new.kind, amount = %new.amount, "POST /transactions");
        let created: CreatedBody = read_json(self.post("transactions").json(new).send()?)?;
        Ok(created.id)
    }

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        tracing::debug!(id, "DELETE /transactions");
        check(self.delete(&format!("transactions/{}", id)).send()?)?;
        Ok(())
    }

    fn create_category(&self, new: &NewCategory) -> Result<Category, ApiError> {
        tracing::debug!(name = %new.name, kind = %new.kind, "POST /categories");
        read_json(self.post("categories").json(new).send()?)
    }
}
