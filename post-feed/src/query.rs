use crate::error::ConfigError;
use post_filter::QueryParams;
use reqwest::Url;

const SEARCH_KEY: &str = "search";
const FILTERS_KEY: &str = "filters";

/// 页面地址的查询参数存储
pub trait QueryStore {
    /// 读取 `search` 与 `filters`
    fn read(&self) -> QueryParams;
    /// 写回 `search` 与 `filters`，保留其他参数
    fn write(&mut self, params: &QueryParams);
}

/// 基于 URL 的查询参数存储
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlQueryStore {
    url: Url,
}

impl UrlQueryStore {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// 解析完整地址，或 `search=..&filters=..` 形式的查询字符串
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |e: &dyn std::fmt::Display| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        };

        let url = if raw.contains("://") {
            Url::parse(raw).map_err(|e| invalid(&e))?
        } else {
            let mut url = Url::parse("http://localhost/").map_err(|e| invalid(&e))?;
            let query = raw.trim_start_matches('?');
            if !query.is_empty() {
                url.set_query(Some(query));
            }
            url
        };

        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// 当前查询字符串，没有参数时为空
    pub fn query_string(&self) -> &str {
        self.url.query().unwrap_or_default()
    }
}

impl QueryStore for UrlQueryStore {
    fn read(&self) -> QueryParams {
        let mut params = QueryParams::default();

        for (key, value) in self.url.query_pairs() {
            match &*key {
                SEARCH_KEY if params.search.is_none() => params.search = Some(value.into_owned()),
                FILTERS_KEY => params.filters.push(value.into_owned()),
                _ => {}
            }
        }

        params
    }

    fn write(&mut self, params: &QueryParams) {
        let others: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != SEARCH_KEY && key != FILTERS_KEY)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut pairs = others;
        if let Some(search) = params.search_term() {
            pairs.push((SEARCH_KEY.to_string(), search.to_string()));
        }
        for filter in &params.filters {
            pairs.push((FILTERS_KEY.to_string(), filter.clone()));
        }

        if pairs.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }
}
