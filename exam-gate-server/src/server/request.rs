use exam_gate::{
    constants::headers,
    types::{course::Course, session::SessionData, user::UserId},
};
use std::{collections::HashMap, net::IpAddr};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Route families exam-gate distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    Login,
    Logout,
    QuizShow,
    QuizStart,
    MediaPlayer,
    Other,
}

impl Route {
    /// The login/logout family. Arbitrating these would lock users out of the
    /// very flow that installs a new session.
    pub fn is_session_route(&self) -> bool {
        matches!(self, Route::Login | Route::Logout)
    }

    pub fn is_quiz_route(&self) -> bool {
        matches!(self, Route::QuizShow | Route::QuizStart)
    }
}

/// Everything exam-gate needs to know about one inbound request.
///
/// Captured once when the request arrives and passed by reference through the
/// hook pipeline and into later operations of the same request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub route: Route,
    /// `None` for anonymous requests.
    pub user: Option<UserId>,
    pub session: SessionData,
    /// Full original URL, including scheme, host and query string.
    pub url: String,
    /// Header names are stored lowercase.
    headers: HashMap<String, String>,
    pub remote_ip: Option<IpAddr>,
    pub course: Option<Course>,
    /// Instructors and preview users bypass exam client enforcement.
    pub can_preview: bool,
}

impl RequestContext {
    pub fn new(route: Route, url: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            route,
            user: None,
            session: SessionData::default(),
            url: url.into(),
            headers: HashMap::new(),
            remote_ip: None,
            course: None,
            can_preview: false,
        }
    }

    pub fn with_user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_session(mut self, session: SessionData) -> Self {
        self.session = session;
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let _ = self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_remote_ip(mut self, remote_ip: IpAddr) -> Self {
        self.remote_ip = Some(remote_ip);
        self
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.course = Some(course);
        self
    }

    pub fn with_preview(mut self, can_preview: bool) -> Self {
        self.can_preview = can_preview;
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The config-key hash asserted by the exam client, if sent.
    pub fn client_hash(&self) -> Option<&str> {
        self.header(headers::CONFIG_KEY_HASH)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.header(headers::USER_AGENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn headers_are_case_insensitive() {
        let request = RequestContext::new(Route::QuizShow, "https://x/y")
            .with_header("x-safeexambrowser-configkeyhash", "abc123")
            .with_header("USER-AGENT", "SEB/3.5");

        assert_eq!(request.client_hash(), Some("abc123"));
        assert_eq!(request.user_agent(), Some("SEB/3.5"));
        assert_eq!(request.header("X-Missing"), None);
    }

    #[test]
    fn route_families() {
        assert!(Route::Login.is_session_route());
        assert!(Route::Logout.is_session_route());
        assert!(!Route::QuizStart.is_session_route());
        assert!(Route::QuizShow.is_quiz_route());
        assert!(Route::QuizStart.is_quiz_route());
        assert!(!Route::MediaPlayer.is_quiz_route());
        assert_eq!(Route::from_str("quiz_start").unwrap(), Route::QuizStart);
        assert_eq!(Route::QuizShow.to_string(), "quiz_show");
    }
}
