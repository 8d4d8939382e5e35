//! Page resolution and length-aware pagination links.

use serde::{Deserialize, Serialize};

/// Resolves paging context from the surrounding request.
pub trait PageResolver: Send + Sync {
    /// Page requested under the `page_name` query parameter; 1 when absent.
    fn current_page(&self, page_name: &str) -> i64;

    /// Path the pagination links are built on.
    fn current_path(&self) -> String;
}

/// Fixed page and path, for callers outside a request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPageResolver {
    page: i64,
    path: String,
}

impl StaticPageResolver {
    pub fn new(page: i64, path: impl Into<String>) -> Self {
        Self {
            page,
            path: path.into(),
        }
    }
}

impl Default for StaticPageResolver {
    fn default() -> Self {
        Self::new(1, "/")
    }
}

impl PageResolver for StaticPageResolver {
    fn current_page(&self, _page_name: &str) -> i64 {
        self.page
    }

    fn current_path(&self) -> String {
        self.path.clone()
    }
}

/// A single navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub relation: String,
    pub url: String,
}

/// Pagination metadata for one page of a result set of known size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub current_page: i64,
    pub per_page: u32,
    pub total: u64,
    pub last_page: i64,
    pub path: String,
    pub page_name: String,
    /// Extra query parameters carried on every link.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
}

impl PageLinks {
    pub fn new(
        total: u64,
        per_page: u32,
        current_page: i64,
        path: impl Into<String>,
        page_name: impl Into<String>,
    ) -> Self {
        let last_page = if per_page == 0 {
            1
        } else {
            (total.div_ceil(u64::from(per_page)) as i64).max(1)
        };
        let path = path.into();
        Self {
            current_page,
            per_page,
            total,
            last_page,
            path: if path.is_empty() { "/".to_string() } else { path },
            page_name: page_name.into(),
            query: Vec::new(),
        }
    }

    /// Carry `key=value` on every generated link. The page parameter itself
    /// is ignored.
    pub fn appends(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if key != self.page_name {
            self.query.retain(|(k, _)| *k != key);
            self.query.push((key, value.into()));
        }
        self
    }

    /// URL of `page`, clamped to 1 from below.
    pub fn url(&self, page: i64) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            serializer.append_pair(key, value);
        }
        serializer.append_pair(&self.page_name, &page.max(1).to_string());

        let separator = if self.path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.path, separator, serializer.finish())
    }

    pub fn first_url(&self) -> String {
        self.url(1)
    }

    pub fn last_url(&self) -> String {
        self.url(self.last_page)
    }

    pub fn previous_url(&self) -> Option<String> {
        (self.current_page > 1).then(|| self.url(self.current_page - 1))
    }

    pub fn next_url(&self) -> Option<String> {
        self.has_more_pages().then(|| self.url(self.current_page + 1))
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn on_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// 1-based position of the first item on this page, if the page holds any.
    pub fn from(&self) -> Option<u64> {
        let first = self
            .current_page
            .checked_sub(1)?
            .checked_mul(i64::from(self.per_page))?
            .checked_add(1)?;
        (self.per_page > 0 && first >= 1 && first as u64 <= self.total).then_some(first as u64)
    }

    /// 1-based position of the last item on this page, if the page holds any.
    pub fn to(&self) -> Option<u64> {
        let first = self.from()?;
        Some((first + u64::from(self.per_page) - 1).min(self.total))
    }

    /// Navigation links: self, first, prev, next, last.
    ///
    /// `prev` is omitted on the first page and `next` on the last one.
    pub fn links(&self) -> Vec<PageLink> {
        let mut links = vec![
            PageLink {
                relation: "self".to_string(),
                url: self.url(self.current_page),
            },
            PageLink {
                relation: "first".to_string(),
                url: self.first_url(),
            },
        ];
        if let Some(url) = self.previous_url() {
            links.push(PageLink {
                relation: "prev".to_string(),
                url,
            });
        }
        if let Some(url) = self.next_url() {
            links.push(PageLink {
                relation: "next".to_string(),
                url,
            });
        }
        links.push(PageLink {
            relation: "last".to_string(),
            url: self.last_url(),
        });
        links
    }
}
