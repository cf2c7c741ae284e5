use crate::auth::{ApiError, Credentials, LoginResponse, SessionState};
use crate::error::{Error, Result};
use crate::rate_limiter::RateLimiter;
use crate::transport::{Request, Response, Transport};
use futures::lock::Mutex;
use http::Method;
use snoo::decode::{self, Decoded};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Authentication state plus request pacing. Every call made through a
/// session waits its turn on the rate limiter and carries the session cookie
/// once logged in.
pub struct Session<T> {
    transport: T,
    rate_limiter: RateLimiter,
    state: Mutex<SessionState>,
    errors: Mutex<Vec<ApiError>>,
    cancel: CancellationToken,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, interval: Duration) -> Self {
        Self {
            transport,
            rate_limiter: RateLimiter::new(interval),
            state: Mutex::new(SessionState::LoggedOut),
            errors: Mutex::new(Vec::new()),
            cancel: CancellationToken::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Cancelling this token aborts pacing waits in progress and makes every
    /// later call fail with [`Error::Cancelled`].
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.lock().await.is_logged_in()
    }

    /// The anti-forgery token of the current session.
    pub async fn modhash(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .credentials()
            .map(|credentials| credentials.modhash.clone())
    }

    /// Errors reported by the API during the last login attempt.
    pub async fn api_errors(&self) -> Vec<ApiError> {
        self.errors.lock().await.clone()
    }

    pub async fn errors(&self) -> Vec<String> {
        self.errors
            .lock()
            .await
            .iter()
            .map(|error| error.message.clone())
            .collect()
    }

    /// Paced request. Non-success statuses are turned into errors.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<Response> {
        self.wait_turn().await?;
        let cookie = self.cookie().await;
        self.dispatch(method, url, form, cookie).await
    }

    /// Paced GET, decoded into envelopes.
    pub async fn get(&self, url: &str) -> Result<Decoded> {
        let response = self.send(Method::GET, url, &[]).await?;
        Self::decode(url, response)
    }

    /// Like [`Session::get`], but resolves to `Ok(None)` without touching the
    /// network while logged out. The session is checked again once the
    /// request's turn comes, so a logout queued ahead of it is honored.
    pub async fn get_authenticated(&self, url: &str) -> Result<Option<Decoded>> {
        if !self.is_logged_in().await {
            debug!("Not logged in, skipping {}", url);
            return Ok(None);
        }
        self.wait_turn().await?;
        let cookie = match self.cookie().await {
            Some(cookie) => cookie,
            None => {
                debug!("Logged out while waiting, skipping {}", url);
                return Ok(None);
            }
        };
        let response = self.dispatch(Method::GET, url, &[], Some(cookie)).await?;
        Self::decode(url, response).map(Some)
    }

    async fn wait_turn(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        self.rate_limiter.wait(&self.cancel).await
    }

    /// Must be read after [`Session::wait_turn`] so the cookie matches the
    /// session at the moment the request leaves.
    async fn cookie(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .credentials()
            .map(|credentials| credentials.cookie.clone())
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        form: &[(&str, &str)],
        cookie: Option<String>,
    ) -> Result<Response> {
        debug!("{} {}", method, url);
        let request = Request {
            method,
            url: url.to_owned(),
            form: form
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            cookie,
        };
        let response = self.transport.send(request).await.map_err(|err| {
            warn!("Error while requesting {}: {}", url, err);
            err
        })?;

        if !response.status.is_success() {
            warn!("Reddit returned {} for {}", response.status, url);
            return Err(Error::Status(response.status));
        }
        Ok(response)
    }

    fn decode(url: &str, mut response: Response) -> Result<Decoded> {
        decode::decode(&mut response.body).map_err(|err| {
            warn!("Could not decode response from {}: {}", url, err);
            Error::from(err)
        })
    }

    pub async fn post(&self, url: &str, form: &[(&str, &str)]) -> Result<Response> {
        self.send(Method::POST, url, form).await
    }

    /// Logs in, replacing any existing session. On failure the errors the API
    /// reported are kept for [`Session::errors`] and the session state is left
    /// untouched.
    pub async fn login(&self, url: &str, user: &str, passwd: &str) -> bool {
        self.errors.lock().await.clear();

        let form = [("api_type", "json"), ("user", user), ("passwd", passwd)];
        let mut response = match self.post(url, &form).await {
            Ok(response) => response,
            Err(err) => {
                warn!("Login request for {} failed: {}", user, err);
                return false;
            }
        };

        let credentials = match LoginResponse::parse(&mut response.body) {
            Ok(login) => login.into_result(),
            Err(err) => {
                warn!("Could not parse login response: {}", err);
                return false;
            }
        };

        match credentials {
            Ok(credentials) => {
                self.set_credentials(credentials).await;
                info!("Logged in as {}", user);
                true
            }
            Err(errors) if errors.is_empty() => {
                warn!("Login response for {} carried no session data", user);
                false
            }
            Err(errors) => {
                let codes: Vec<_> = errors.iter().map(|error| error.code.as_str()).collect();
                info!("Login for {} rejected: {:?}", user, codes);
                *self.errors.lock().await = errors;
                false
            }
        }
    }

    async fn set_credentials(&self, credentials: Credentials) {
        *self.state.lock().await = SessionState::LoggedIn(credentials);
    }

    /// Drops the local session without telling the server.
    pub async fn clear(&self) {
        *self.state.lock().await = SessionState::LoggedOut;
    }

    /// Ends the session. The local session is always cleared, even when the
    /// request fails, so this always reports success.
    pub async fn logout(&self, url: &str) -> bool {
        let modhash = match self.modhash().await {
            Some(modhash) => modhash,
            None => return true,
        };

        let result = self.post(url, &[("uh", modhash.as_str())]).await;
        self.clear().await;
        match result {
            Ok(_) => info!("Logged out"),
            Err(err) => warn!("Logout request failed, cleared local session anyway: {}", err),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use http::StatusCode;
    use std::sync::Arc;
    use tokio::time::Instant;

    const LOGIN_OK: &str = r#"{"json": {"errors": [], "data": {"modhash": "927obqh4xeded22e6ec4b1994d81ac1719118d25a848f59af2", "cookie": "7380190,2012-11-14T13:23:24,45ac326604d67f49f05a3120a4a0df35066f9ddb"}}}"#;
    const LOGIN_REJECTED: &str =
        r#"{"json": {"errors": [["WRONG_PASSWORD", "invalid password", "passwd"]]}}"#;
    const EMPTY_LISTING: &str = r#"{"kind": "Listing", "data": {"children": []}}"#;
    const LOGIN_COOKIE: &str = "7380190,2012-11-14T13:23:24,45ac326604d67f49f05a3120a4a0df35066f9ddb";

    fn session(mock: &Arc<MockTransport>) -> Session<Arc<MockTransport>> {
        Session::new(mock.clone(), Duration::from_secs(2))
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_sends_form_and_stores_cookie() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(LOGIN_OK);
        mock.respond_ok(EMPTY_LISTING);

        assert!(session.login("http://localhost/api/login/user", "user", "hunter2").await);
        assert!(session.is_logged_in().await);
        assert_eq!(
            session.modhash().await.as_deref(),
            Some("927obqh4xeded22e6ec4b1994d81ac1719118d25a848f59af2")
        );

        session.get("http://localhost/.json").await.unwrap();
        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(
            requests[0].form,
            vec![
                ("api_type".to_owned(), "json".to_owned()),
                ("user".to_owned(), "user".to_owned()),
                ("passwd".to_owned(), "hunter2".to_owned()),
            ]
        );
        assert_eq!(requests[0].cookie, None);
        assert_eq!(requests[1].method, Method::GET);
        assert_eq!(requests[1].cookie.as_deref(), Some(LOGIN_COOKIE));
        assert_eq!(session.transport().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_login_records_errors() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(LOGIN_REJECTED);

        assert!(!session.login("http://localhost/api/login/user", "user", "passwd").await);
        assert!(!session.is_logged_in().await);
        assert!(session.errors().await.contains(&"invalid password".to_owned()));
        assert_eq!(session.api_errors().await[0].code, "WRONG_PASSWORD");
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_clears_previous_errors() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(LOGIN_REJECTED);
        mock.respond_ok(LOGIN_OK);

        assert!(!session.login("http://localhost/api/login/user", "user", "wrong").await);
        assert!(!session.errors().await.is_empty());
        assert!(session.login("http://localhost/api/login/user", "user", "right").await);
        assert!(session.errors().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_relogin_replaces_cookie() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(LOGIN_OK);
        mock.respond_ok(r#"{"json": {"errors": [], "data": {"modhash": "m2", "cookie": "c2"}}}"#);

        assert!(session.login("http://localhost/api/login/user", "user", "passwd").await);
        assert!(session.login("http://localhost/api/login/user", "user", "passwd").await);
        assert_eq!(
            session.state().await.credentials().map(|c| c.cookie.clone()),
            Some("c2".to_owned())
        );
        assert_eq!(mock.requests()[1].cookie.as_deref(), Some(LOGIN_COOKIE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_login_keeps_existing_session() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(LOGIN_OK);
        mock.respond(StatusCode::INTERNAL_SERVER_ERROR, "");
        mock.respond_ok(LOGIN_REJECTED);

        assert!(session.login("http://localhost/api/login/user", "user", "passwd").await);
        assert!(!session.login("http://localhost/api/login/user", "user", "passwd").await);
        assert!(session.is_logged_in().await);
        assert!(!session.login("http://localhost/api/login/user", "user", "bad").await);
        assert!(session.is_logged_in().await);
        assert_eq!(session.errors().await, vec!["invalid password".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_with_garbage_body() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok("<html>down for maintenance</html>");
        assert!(!session.login("http://localhost/api/login/user", "user", "passwd").await);
        assert!(!session.is_logged_in().await);
        assert!(session.errors().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_without_login_is_a_no_op() {
        let mock = MockTransport::new();
        let session = session(&mock);
        assert!(session.logout("http://localhost/logout").await);
        assert!(!session.is_logged_in().await);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_sends_modhash() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(LOGIN_OK);
        mock.respond_ok("{}");

        assert!(session.login("http://localhost/api/login/user", "user", "passwd").await);
        assert!(session.logout("http://localhost/logout").await);
        assert!(!session.is_logged_in().await);
        assert_eq!(session.modhash().await, None);

        let logout = &mock.requests()[1];
        assert_eq!(logout.url, "http://localhost/logout");
        assert_eq!(
            logout.form,
            vec![(
                "uh".to_owned(),
                "927obqh4xeded22e6ec4b1994d81ac1719118d25a848f59af2".to_owned()
            )]
        );
        assert_eq!(logout.cookie.as_deref(), Some(LOGIN_COOKIE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_session_when_request_fails() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(LOGIN_OK);
        mock.respond(StatusCode::BAD_GATEWAY, "");

        assert!(session.login("http://localhost/api/login/user", "user", "passwd").await);
        assert!(session.logout("http://localhost/logout").await);
        assert!(!session.is_logged_in().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_authenticated_get_while_logged_out() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(EMPTY_LISTING);

        assert!(session
            .get_authenticated("http://localhost/api/me.json")
            .await
            .unwrap()
            .is_none());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_queued_behind_logout_carry_no_cookie() {
        let mock = MockTransport::new();
        let session = Arc::new(session(&mock));
        mock.respond_ok(LOGIN_OK);
        mock.respond_ok("{}");
        mock.respond_ok(EMPTY_LISTING);
        mock.respond_ok(EMPTY_LISTING);

        assert!(session.login("http://localhost/api/login/user", "user", "passwd").await);

        let logout = {
            let session = session.clone();
            tokio::spawn(async move { session.logout("http://localhost/logout").await })
        };
        let me = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .get_authenticated("http://localhost/api/me.json")
                    .await
                    .map(|decoded| decoded.is_some())
            })
        };
        let page = {
            let session = session.clone();
            tokio::spawn(async move { session.get("http://localhost/.json").await.is_ok() })
        };

        assert!(logout.await.unwrap());
        assert!(!me.await.unwrap().unwrap());
        assert!(page.await.unwrap());
        assert!(!session.is_logged_in().await);

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].url, "http://localhost/logout");
        assert_eq!(requests[1].cookie.as_deref(), Some(LOGIN_COOKIE));
        assert_eq!(requests[2].url, "http://localhost/.json");
        assert_eq!(requests[2].cookie, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_success_status() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond(StatusCode::NOT_FOUND, EMPTY_LISTING);
        assert!(matches!(
            session.get("http://localhost/r/nope/.json").await,
            Err(Error::Status(StatusCode::NOT_FOUND))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_decode_failure_is_distinct_from_empty() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok("{not json");
        mock.respond_ok(EMPTY_LISTING);

        assert!(matches!(
            session.get("http://localhost/.json").await,
            Err(Error::Decode(_))
        ));
        let listing = session
            .get("http://localhost/.json")
            .await
            .unwrap()
            .into_first()
            .and_then(|thing| thing.into_variant::<snoo::models::Listing>())
            .unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_are_paced() {
        let mock = MockTransport::new();
        let session = session(&mock);
        for _ in 0..4 {
            mock.respond_ok(EMPTY_LISTING);
        }
        mock.respond_ok(LOGIN_OK);

        let start = Instant::now();
        for _ in 0..4 {
            session.get("http://localhost/.json").await.unwrap();
        }
        assert!(session.login("http://localhost/api/login/user", "user", "passwd").await);

        let times = mock.dispatch_times();
        assert_eq!(times.len(), 5);
        assert_eq!(times[0], start);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(2));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_requests_are_paced() {
        let mock = MockTransport::new();
        let session = Arc::new(session(&mock));
        for _ in 0..3 {
            mock.respond_ok(EMPTY_LISTING);
        }

        let (a, b, c) = tokio::join!(
            session.get("http://localhost/a.json"),
            session.get("http://localhost/b.json"),
            session.get("http://localhost/c.json"),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());

        let mut times = mock.dispatch_times();
        times.sort();
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(2));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_session_issues_no_requests() {
        let mock = MockTransport::new();
        let session = session(&mock);
        mock.respond_ok(EMPTY_LISTING);

        session.cancel_token().cancel();
        assert!(matches!(
            session.get("http://localhost/.json").await,
            Err(Error::Cancelled)
        ));
        assert_eq!(mock.calls(), 0);
    }
}
