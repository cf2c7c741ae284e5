use crate::error::{Error, Result};
use reqwest::Url;
use snoo::config::RedditConfig;
use snoo::models::Fullname;

/// Query parameters for paginated listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    pub after: Option<String>,
    pub before: Option<String>,
    pub limit: Option<u32>,
    /// Passed through to the query string as-is.
    pub extra: Vec<(String, String)>,
}

impl PageParams {
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(after) = self.after.as_ref() {
            query.push(("after".to_owned(), after.clone()));
        }
        if let Some(before) = self.before.as_ref() {
            query.push(("before".to_owned(), before.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_owned(), limit.to_string()));
        }
        query.extend(self.extra.iter().cloned());
        query
    }
}

/// Endpoint URLs, resolved against the configured domains.
#[derive(Debug, Clone)]
pub struct Paths {
    domain: String,
    secure_domain: String,
}

impl Paths {
    pub fn new(config: &RedditConfig) -> Self {
        Self {
            domain: with_trailing_slash(&config.domain),
            secure_domain: with_trailing_slash(&config.secure_domain),
        }
    }

    pub fn login(&self, user: &str) -> Result<String> {
        self.build(&self.secure_domain, &format!("api/login/{}", user), &[])
    }

    pub fn logout(&self) -> Result<String> {
        self.build(&self.domain, "logout", &[])
    }

    pub fn me(&self) -> Result<String> {
        self.build(&self.domain, "api/me.json", &[])
    }

    /// The front page when `subreddit` is `None`, the subreddit's page
    /// otherwise.
    pub fn page(&self, subreddit: Option<&str>, params: &PageParams) -> Result<String> {
        let path = match subreddit {
            Some(subreddit) => format!("r/{}/.json", subreddit),
            None => ".json".to_owned(),
        };
        self.build(&self.domain, &path, &params.query())
    }

    pub fn comments(&self, link_id: &str) -> Result<String> {
        let path = format!("comments/{}.json", Fullname::strip(link_id));
        self.build(&self.domain, &path, &[])
    }

    pub fn more_comments(&self, link_id: &str, comment_id: &str) -> Result<String> {
        let path = format!(
            "comments/{}/_/{}.json",
            Fullname::strip(link_id),
            Fullname::strip(comment_id)
        );
        self.build(&self.domain, &path, &[])
    }

    fn build(&self, base: &str, path: &str, query: &[(String, String)]) -> Result<String> {
        let url = format!("{}{}", base, path);
        let parsed = if query.is_empty() {
            Url::parse(&url)
        } else {
            Url::parse_with_params(&url, query)
        };
        parsed
            .map(String::from)
            .map_err(|err| Error::InvalidUrl(format!("{}: {}", url, err)))
    }
}

fn with_trailing_slash(domain: &str) -> String {
    if domain.ends_with('/') {
        domain.to_owned()
    } else {
        format!("{}/", domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> Paths {
        Paths::new(&RedditConfig::default())
    }

    #[test]
    fn test_fixed_paths() {
        let paths = paths();
        assert_eq!(
            paths.login("spez").unwrap(),
            "https://ssl.reddit.com/api/login/spez"
        );
        assert_eq!(paths.logout().unwrap(), "http://www.reddit.com/logout");
        assert_eq!(paths.me().unwrap(), "http://www.reddit.com/api/me.json");
    }

    #[test]
    fn test_page_paths() {
        let paths = paths();
        assert_eq!(
            paths.page(None, &PageParams::default()).unwrap(),
            "http://www.reddit.com/.json"
        );
        assert_eq!(
            paths.page(Some("rust"), &PageParams::default()).unwrap(),
            "http://www.reddit.com/r/rust/.json"
        );
    }

    #[test]
    fn test_page_query() {
        let params = PageParams::default()
            .after("t3_abc")
            .limit(25)
            .param("sort", "new");
        assert_eq!(
            paths().page(Some("rust"), &params).unwrap(),
            "http://www.reddit.com/r/rust/.json?after=t3_abc&limit=25&sort=new"
        );
    }

    #[test]
    fn test_comment_paths_accept_fullnames() {
        let paths = paths();
        assert_eq!(
            paths.comments("t3_13c3hb").unwrap(),
            "http://www.reddit.com/comments/13c3hb.json"
        );
        assert_eq!(
            paths.comments("13c3hb").unwrap(),
            "http://www.reddit.com/comments/13c3hb.json"
        );
        assert_eq!(
            paths.more_comments("t3_13c3hb", "t1_c72ot2z").unwrap(),
            "http://www.reddit.com/comments/13c3hb/_/c72ot2z.json"
        );
    }

    #[test]
    fn test_local_domain() {
        let config = RedditConfig::default().with_domain("http://localhost:8080");
        let paths = Paths::new(&config);
        assert_eq!(
            paths.login("user").unwrap(),
            "http://localhost:8080/api/login/user"
        );
        assert_eq!(paths.me().unwrap(), "http://localhost:8080/api/me.json");
    }

    #[test]
    fn test_invalid_domain() {
        let config = RedditConfig::default().with_domain("not a url");
        assert!(matches!(
            Paths::new(&config).me(),
            Err(Error::InvalidUrl(_))
        ));
    }
}
