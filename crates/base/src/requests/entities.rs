#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum HttpRequestMethod {
    #[default]
    Get,
}

pub type Headers = Vec<(String, String)>;
pub type Queries = Vec<(String, String)>;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HttpRequestData {
    pub method: HttpRequestMethod,
    pub url: String,
    pub headers: Option<Headers>,
    pub queries: Option<Queries>,
}

impl HttpRequestData {
    pub fn new(method: HttpRequestMethod, url: &str) -> Self {
        Self {
            method,
            url: String::from(url),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((String::from(name), String::from(value)));
        self
    }

    pub fn with_query(mut self, param: &str, value: &str) -> Self {
        self.queries
            .get_or_insert_with(Vec::new)
            .push((String::from(param), String::from(value)));
        self
    }

    pub fn query(&self, param: &str) -> Option<&str> {
        self.queries.as_ref().and_then(|queries| {
            queries
                .iter()
                .find(|(name, _)| name == param)
                .map(|(_, value)| value.as_str())
        })
    }
}
