// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! HTTPS client for the hosted backend: PostgREST-style tables under
//! `/rest/v1`, stored procedures under `/rest/v1/rpc`, and the auth service
//! under `/auth/v1`.

use super::{Backend, NewSubcategory, TransactionQuery, TransactionRow};
use crate::config::Config;
use crate::error::{AuthError, Error, Result};
use crate::models::{MainCategory, MonthlySummary, RecordId, Subcategory};
use crate::money::Money;
use crate::session::{Scope, Session};
use crate::validation::{TransactionInsert, TransactionPatch, ValidSignUp};
use crate::view::MonthRange;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

const UA: &str = concat!("pocketbook/", env!("CARGO_PKG_VERSION"));

pub const TRANSACTION_COLUMNS: &str = "id,date,description,amount,type,main_category_id,subcategory_id,payment_method,installment_number,total_installments";
const MAIN_CATEGORY_COLUMNS: &str = "id,name,icon,type";
const SUBCATEGORY_COLUMNS: &str = "id,name,main_category_id,type,workspace_id,user_id";

/// Default lifetime of an access token when the auth service omits it.
const DEFAULT_EXPIRES_IN: i64 = 3600;

pub struct RestBackend {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RestBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(UA)
            .build()?;
        Ok(RestBackend {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn rpc_url(&self, procedure: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, procedure)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Requests carry the API key and, when signed in, the user's token.
    fn request(&self, method: Method, url: &str, session: Option<&Session>) -> RequestBuilder {
        let token = session.map_or(self.anon_key.as_str(), |s| s.access_token.as_str());
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let resp = builder.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let message = error_message(&body);
        tracing::debug!(status = status.as_u16(), %message, "backend rejected request");
        Err(Error::Backend {
            status: status.as_u16(),
            message,
        })
    }

    /// Like [`send`](Self::send), but rejections become [`AuthError`]s.
    fn send_auth(&self, builder: RequestBuilder) -> Result<Response> {
        self.send(builder).map_err(|e| match e {
            Error::Backend { message, .. } => AuthError::from_backend_message(&message).into(),
            other => other,
        })
    }

    fn rpc<T: DeserializeOwned>(
        &self,
        procedure: &str,
        session: Option<&Session>,
        params: &Value,
    ) -> Result<T> {
        tracing::debug!(procedure, "calling procedure");
        let resp = self.send(
            self.request(Method::POST, &self.rpc_url(procedure), session)
                .json(params),
        )?;
        Ok(serde_json::from_str(&resp.text()?)?)
    }

    fn rpc_unit(&self, procedure: &str, session: &Session, params: &Value) -> Result<()> {
        tracing::debug!(procedure, "calling procedure");
        self.send(
            self.request(Method::POST, &self.rpc_url(procedure), Some(session))
                .json(params),
        )?;
        Ok(())
    }

    fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        session: &Session,
        query: &[(String, String)],
    ) -> Result<Vec<T>> {
        tracing::debug!(table, "querying rows");
        let resp = self.send(
            self.request(Method::GET, &self.table_url(table), Some(session))
                .query(query),
        )?;
        Ok(serde_json::from_str(&resp.text()?)?)
    }

    /// Sends a scoped PATCH/DELETE asking for the affected rows back, so an id
    /// outside the user's scope is reported instead of silently ignored.
    fn mutate_scoped(
        &self,
        method: Method,
        table: &str,
        session: &Session,
        id: &RecordId,
        body: Option<&Value>,
    ) -> Result<()> {
        let mut builder = self
            .request(method, &self.table_url(table), Some(session))
            .query(&scoped_id_filter(&session.scope(), id))
            .header("Prefer", "return=representation");
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let rows: Vec<Value> = serde_json::from_str(&self.send(builder)?.text()?)?;
        if rows.is_empty() {
            return Err(Error::Backend {
                status: 404,
                message: format!("no {} row with id {}", table, id),
            });
        }
        Ok(())
    }

    fn session_request(&self, url: &str, body: &Value) -> Result<Session> {
        let resp = self.send_auth(self.request(Method::POST, url, None).json(body))?;
        let auth: AuthResponse = serde_json::from_str(&resp.text()?)?;
        session_from_auth(auth, chrono::Utc::now().timestamp())
            .ok_or_else(|| AuthError::Other("the server did not return a session".into()).into())
    }
}

impl Backend for RestBackend {
    fn sign_up(&self, form: &ValidSignUp) -> Result<Option<Session>> {
        let body = json!({
            "email": form.email,
            "password": form.password,
            "data": { "full_name": form.full_name, "phone": form.phone },
        });
        let resp = self.send_auth(
            self.request(Method::POST, &self.auth_url("signup"), None)
                .json(&body),
        )?;
        let auth: AuthResponse = serde_json::from_str(&resp.text()?)?;
        Ok(session_from_auth(auth, chrono::Utc::now().timestamp()))
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.session_request(
            &self.auth_url("token?grant_type=password"),
            &json!({ "email": email, "password": password }),
        )
    }

    fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        self.session_request(
            &self.auth_url("token?grant_type=refresh_token"),
            &json!({ "refresh_token": refresh_token }),
        )
    }

    fn sign_out(&self, session: &Session) -> Result<()> {
        self.send_auth(self.request(Method::POST, &self.auth_url("logout"), Some(session)))?;
        Ok(())
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        self.rpc("check_email_exists", None, &json!({ "p_email": email }))
    }

    fn phone_exists(&self, phone: &str) -> Result<bool> {
        self.rpc("check_phone_exists", None, &json!({ "p_phone": phone }))
    }

    fn main_categories(&self, session: &Session) -> Result<Vec<MainCategory>> {
        self.select(
            "main_categories",
            session,
            &[
                ("select".into(), MAIN_CATEGORY_COLUMNS.into()),
                ("order".into(), "name.asc".into()),
            ],
        )
    }

    fn subcategories(&self, session: &Session) -> Result<Vec<Subcategory>> {
        self.select("subcategories", session, &subcategory_filters(&session.scope()))
    }

    fn insert_subcategory(&self, session: &Session, sub: &NewSubcategory) -> Result<()> {
        let body = json!({
            "name": sub.name,
            "main_category_id": sub.main_category_id,
            "type": sub.kind,
            "user_id": session.user_id,
            "workspace_id": session.workspace_id,
        });
        self.send(
            self.request(Method::POST, &self.table_url("subcategories"), Some(session))
                .header("Prefer", "return=minimal")
                .json(&body),
        )?;
        Ok(())
    }

    fn delete_subcategory(&self, session: &Session, id: &RecordId) -> Result<()> {
        self.mutate_scoped(Method::DELETE, "subcategories", session, id, None)
    }

    fn transactions(
        &self,
        session: &Session,
        query: &TransactionQuery,
    ) -> Result<Vec<TransactionRow>> {
        self.select("transactions", session, &transaction_filters(&session.scope(), query))
    }

    fn insert_transaction(&self, session: &Session, tx: &TransactionInsert) -> Result<()> {
        self.rpc_unit(
            "insert_transaction_with_subcategory",
            session,
            &insert_params(session, tx, None),
        )
    }

    fn insert_installments(
        &self,
        session: &Session,
        tx: &TransactionInsert,
        count: u32,
    ) -> Result<()> {
        self.rpc_unit(
            "insert_transaction_with_installments",
            session,
            &insert_params(session, tx, Some(count)),
        )
    }

    fn update_transaction(
        &self,
        session: &Session,
        id: &RecordId,
        patch: &TransactionPatch,
    ) -> Result<()> {
        let body = serde_json::to_value(patch)?;
        self.mutate_scoped(Method::PATCH, "transactions", session, id, Some(&body))
    }

    fn delete_transaction(&self, session: &Session, id: &RecordId) -> Result<()> {
        self.mutate_scoped(Method::DELETE, "transactions", session, id, None)
    }

    fn financial_summary(&self, session: &Session, range: &MonthRange) -> Result<MonthlySummary> {
        let params = json!({
            "p_user_id": session.user_id,
            "p_workspace_id": session.workspace_id,
            "p_start_date": range.start,
            "p_end_date": range.end,
        });
        let rows: OneOrMany<SummaryRow> =
            self.rpc("get_financial_summary", Some(session), &params)?;
        Ok(rows.into_first().map(SummaryRow::into_summary).unwrap_or_default())
    }
}

/// Query parameters for one month of transactions within `scope`.
pub fn transaction_filters(scope: &Scope, query: &TransactionQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), TRANSACTION_COLUMNS.to_string()),
        (scope.column().to_string(), format!("eq.{}", scope.id())),
        ("date".to_string(), format!("gte.{}", query.range.start)),
        ("date".to_string(), format!("lte.{}", query.range.end)),
    ];
    if let Some(kind) = query.kind {
        params.push(("type".to_string(), format!("eq.{}", kind)));
    }
    params.push(("order".to_string(), "date.desc,id.desc".to_string()));
    params
}

/// Shared subcategories (no owner) plus the ones owned within `scope`.
pub fn subcategory_filters(scope: &Scope) -> Vec<(String, String)> {
    vec![
        ("select".to_string(), SUBCATEGORY_COLUMNS.to_string()),
        (
            "or".to_string(),
            format!(
                "({col}.eq.{id},{col}.is.null)",
                col = scope.column(),
                id = scope.id()
            ),
        ),
        ("order".to_string(), "name.asc".to_string()),
    ]
}

pub fn scoped_id_filter(scope: &Scope, id: &RecordId) -> Vec<(String, String)> {
    vec![
        ("id".to_string(), format!("eq.{}", id)),
        (scope.column().to_string(), format!("eq.{}", scope.id())),
    ]
}

/// Parameters for the insert procedures. `installments` is only sent to the
/// installment variant.
pub fn insert_params(session: &Session, tx: &TransactionInsert, installments: Option<u32>) -> Value {
    let mut params = json!({
        "p_user_id": session.user_id,
        "p_workspace_id": session.workspace_id,
        "p_date": tx.date,
        "p_description": tx.description,
        "p_amount": tx.amount,
        "p_type": tx.kind,
        "p_main_category_id": tx.main_category_id,
        "p_subcategory_id": tx.subcategory_id,
        "p_payment_method": tx.payment_method,
    });
    if let (Some(count), Some(obj)) = (installments, params.as_object_mut()) {
        obj.insert("p_installments".to_string(), json!(count));
    }
    params
}

/// Pulls a human-readable message out of an error body from either service.
pub fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        msg: Option<String>,
        error_description: Option<String>,
        error: Option<String>,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(e) => e
            .message
            .or(e.msg)
            .or(e.error_description)
            .or(e.error)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.trim().to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
    pub user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: RecordId,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserMetadata {
    pub workspace_id: Option<RecordId>,
}

/// Builds a [`Session`] from an auth response; `None` if it carries no tokens
/// (for example a sign-up awaiting email confirmation).
pub fn session_from_auth(auth: AuthResponse, now: i64) -> Option<Session> {
    let user = auth.user?;
    let access_token = auth.access_token?;
    let refresh_token = auth.refresh_token?;
    let expires_at = auth
        .expires_at
        .unwrap_or(now + auth.expires_in.unwrap_or(DEFAULT_EXPIRES_IN));
    Some(Session {
        access_token,
        refresh_token,
        expires_at,
        user_id: user.id,
        email: user.email.unwrap_or_default(),
        workspace_id: user.user_metadata.workspace_id,
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::Many(v) => v.into_iter().next(),
            OneOrMany::One(t) => Some(t),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryRow {
    total_income: Option<Money>,
    total_expense: Option<Money>,
}

impl SummaryRow {
    fn into_summary(self) -> MonthlySummary {
        MonthlySummary {
            income: self.total_income.unwrap_or_default(),
            expense: self.total_expense.unwrap_or_default(),
        }
    }
}
