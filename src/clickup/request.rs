//! Request Building
//!
//! Turns an endpoint, a method, query parameters and an optional body into
//! an [`ApiRequest`] the transport can send.

use crate::error::CommandError;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// HTTP method used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Resource paths exposed by the API, relative to the versioned base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Teams,
    TeamSpaces(String),
    Space(String),
    SpaceFolders(String),
    Folder(String),
    FolderLists(String),
    SpaceLists(String),
    List(String),
    ListTasks(String),
}

impl Endpoint {
    /// Relative path with ids substituted and percent-encoded
    pub fn path(&self) -> Result<String, CommandError> {
        let path = match self {
            Endpoint::Teams => "team".to_string(),
            Endpoint::TeamSpaces(id) => format!("team/{}/space", segment(id)?),
            Endpoint::Space(id) => format!("space/{}", segment(id)?),
            Endpoint::SpaceFolders(id) => format!("space/{}/folder", segment(id)?),
            Endpoint::Folder(id) => format!("folder/{}", segment(id)?),
            Endpoint::FolderLists(id) => format!("folder/{}/list", segment(id)?),
            Endpoint::SpaceLists(id) => format!("space/{}/list", segment(id)?),
            Endpoint::List(id) => format!("list/{}", segment(id)?),
            Endpoint::ListTasks(id) => format!("list/{}/task", segment(id)?),
        };
        Ok(path)
    }
}

/// Escape one id for its path slot. Empty ids and dot segments are refused:
/// URL joining would collapse them into a different resource, and `%2E` is
/// decoded as a dot segment too.
fn segment(id: &str) -> Result<String, CommandError> {
    let id = id.trim();
    if matches!(id, "" | "." | "..") {
        return Err(CommandError::InvalidId(id.to_string()));
    }
    Ok(urlencoding::encode(id).into_owned())
}

/// Query parameters, in insertion order.
///
/// Entries whose value is absent, empty, or the string `false` are kept
/// here but never reach the wire; unset filters are left to the server's
/// defaults instead of being sent as empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw entry
    pub fn insert(&mut self, key: &str, value: Option<String>) -> &mut Self {
        self.entries.push((key.to_string(), value));
        self
    }

    /// Add an entry from anything displayable
    pub fn set<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        self.insert(key, value.map(|v| v.to_string()))
    }

    /// Add a boolean flag; `false` is dropped like any other default
    pub fn flag(&mut self, key: &str, value: bool) -> &mut Self {
        self.insert(key, Some(value.to_string()))
    }

    /// Add one `key[]` entry per value
    pub fn list(&mut self, key: &str, values: &[String]) -> &mut Self {
        let key = format!("{}[]", key);
        for value in values {
            self.entries.push((key.clone(), Some(value.clone())));
        }
        self
    }

    /// Entries that will actually be sent
    pub fn sanitized(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(k, v)| match v.as_deref() {
            Some(v) if keep_value(v) => Some((k.as_str(), v)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sanitized().next().is_none()
    }

    /// URL-encoded query string without the leading `?`
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.sanitized() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

fn keep_value(value: &str) -> bool {
    !value.is_empty() && value != "false" && value != "False"
}

/// A request ready for the transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: Endpoint,
    pub query: QueryParams,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            query: QueryParams::new(),
            body: None,
        }
    }

    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn delete(endpoint: Endpoint) -> Self {
        Self::new(Method::Delete, endpoint)
    }

    pub fn post<B: Serialize>(endpoint: Endpoint, body: &B) -> Result<Self> {
        Self::new(Method::Post, endpoint).with_body(body)
    }

    pub fn put<B: Serialize>(endpoint: Endpoint, body: &B) -> Result<Self> {
        Self::new(Method::Put, endpoint).with_body(body)
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body. GET requests never carry one.
    pub fn with_body<B: Serialize>(mut self, body: &B) -> Result<Self> {
        if self.method == Method::Get {
            return Ok(self);
        }
        let body = serde_json::to_value(body).context("Failed to serialize request body")?;
        self.body = Some(body).filter(|b| !b.is_null());
        Ok(self)
    }

    /// Path plus encoded query, relative to the API base
    pub fn relative_url(&self) -> Result<String, CommandError> {
        let path = self.endpoint.path()?;
        if self.query.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{}?{}", path, self.query.encode()))
        }
    }
}
