// Elmax Cloud HTTP client
//
// Owns the session, the control panel registry and the endpoint
// collections. This module holds construction, login and the request
// plumbing; the endpoint families (panels, discovery, status/commands)
// are inherent methods in their own files.

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{Credentials, Session};
use crate::constants::{self, ENDPOINT_LOGIN};
use crate::endpoints::{Endpoint, Endpoints};
use crate::error::Error;
use crate::registry::{ControlPanel, ControlPanelRegistry};
use crate::transport::ClientConfig;

/// Client for the Elmax Cloud API.
///
/// Every operation that talks to the API takes `&mut self`: the session
/// token, the registry and the endpoint collections can only change
/// through one caller at a time. Accessors hand out copies, never
/// references into that state.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    credentials: Credentials,
    session: Session,
    pub(crate) registry: ControlPanelRegistry,
    pub(crate) endpoints: Endpoints,
}

impl Client {
    /// Create a client for the production cloud.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client from an explicit `ClientConfig`.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self::with_client(http, config, credentials))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// Headers are set per request, so any client works here.
    pub fn with_client(http: reqwest::Client, config: ClientConfig, credentials: Credentials) -> Self {
        Self {
            http,
            config,
            credentials,
            session: Session::default(),
            registry: ControlPanelRegistry::new(),
            endpoints: Endpoints::default(),
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// The account this client logs in as.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    /// Control panels registered by previous listings.
    pub fn control_panels(&self) -> Vec<ControlPanel> {
        self.registry.list()
    }

    /// Copy of all three endpoint collections.
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints.clone()
    }

    pub fn zones(&self) -> Vec<Endpoint> {
        self.endpoints.zones.clone()
    }

    pub fn outputs(&self) -> Vec<Endpoint> {
        self.endpoints.outputs.clone()
    }

    pub fn areas(&self) -> Vec<Endpoint> {
        self.endpoints.areas.clone()
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Log in with the stored credentials.
    ///
    /// `POST api/ext/login` with a form body. The API does not answer
    /// bad credentials with 401; it returns a body without a `token`, so
    /// any response that does not yield one is treated as a rejection.
    /// Calling this again simply repeats the exchange.
    pub async fn connect(&mut self) -> Result<(), Error> {
        let url = self.endpoint_url(ENDPOINT_LOGIN, &[])?;
        debug!(%url, username = self.credentials.username(), "logging in");

        let form = [
            ("username", self.credentials.username()),
            ("password", self.credentials.password().expose_secret()),
        ];

        let resp = self
            .request(Method::POST, url)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        debug!(%status, "login response received");

        let authorized = extract_token(&body).is_some_and(|token| self.session.authorize(&token));
        if authorized {
            debug!("login successful");
            Ok(())
        } else {
            self.session.clear();
            warn!("{}", crate::error::INVALID_CREDENTIALS);
            Err(Error::invalid_credentials())
        }
    }

    /// Forget the session token. Local only; the API has no logout call.
    pub fn disconnect(&mut self) {
        if self.session.is_authenticated() {
            debug!("dropping session token");
        }
        self.session.clear();
    }

    /// Log in first if there is no token yet.
    ///
    /// Called at the top of every authenticated operation; a failed login
    /// is returned to the caller instead of sending a request without a token.
    pub(crate) async fn ensure_authenticated(&mut self) -> Result<(), Error> {
        if self.session.is_authenticated() {
            return Ok(());
        }
        debug!("not authenticated, logging in first");
        self.connect().await
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}/{params...}`, percent-encoding each parameter
    /// as a single path segment.
    ///
    /// Empty, `.` and `..` parameters are rejected: the URL path would drop
    /// or collapse them and address a different endpoint.
    pub(crate) fn endpoint_url(&self, path: &str, params: &[&str]) -> Result<Url, Error> {
        if let Some(bad) = params.iter().copied().find(|p| matches!(*p, "" | "." | "..")) {
            return Err(Error::InvalidPathSegment {
                segment: bad.to_owned(),
            });
        }

        let mut url = self.config.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| Error::InvalidBaseUrl {
                url: self.config.base_url.to_string(),
            })?;
            segments.pop_if_empty();
            segments.extend(path.split('/'));
            segments.extend(params);
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request with the standard headers built from the current
    /// session: user agent, accept, and the raw token if logged in.
    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(USER_AGENT, constants::USER_AGENT)
            .header(ACCEPT, constants::ACCEPT);

        match self.session.token() {
            Some(token) => builder.header(AUTHORIZATION, token),
            None => builder,
        }
    }

    /// Send an authenticated GET and decode the JSON body.
    pub(crate) async fn get_json(&self, url: Url) -> Result<Value, Error> {
        debug!("GET {}", url);

        let resp = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.read_body(resp).await?;
        decode_json(body)
    }

    /// Send an authenticated POST without a body.
    ///
    /// The body is decoded if it is JSON; anything else maps to `Value::Null`.
    pub(crate) async fn post_empty(&self, url: Url) -> Result<Value, Error> {
        debug!("POST {}", url);

        let resp = self
            .request(Method::POST, url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.read_body(resp).await?;
        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    /// Check the HTTP status and return the body text.
    async fn read_body(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            debug!(%status, "request rejected");
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview(&body),
            });
        }
        Ok(body)
    }

    /// Sort a `reqwest` failure into connection, timeout or generic transport.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        match FailureKind::of(err.is_connect(), err.is_timeout()) {
            FailureKind::Connect => Error::Connection {
                url: self.config.base_url.to_string(),
                source: err,
            },
            FailureKind::Timeout => Error::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            },
            FailureKind::Other => Error::Transport(err),
        }
    }
}

/// Which `Error` variant a transport failure becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    Connect,
    Timeout,
    Other,
}

impl FailureKind {
    /// A connect timeout reports both flags; it stays a connect failure so
    /// the error names the host.
    fn of(is_connect: bool, is_timeout: bool) -> Self {
        if is_connect {
            Self::Connect
        } else if is_timeout {
            Self::Timeout
        } else {
            Self::Other
        }
    }
}

/// Pull a string `token` out of a login response body.
fn extract_token(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("token")?.as_str().map(str::to_owned)
}

fn decode_json(body: String) -> Result<Value, Error> {
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

/// First 200 characters of a body, for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
