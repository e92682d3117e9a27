//! Static route table: path prefixes, cache keys and TTLs

use std::fmt;

/// How long a route's responses may be served from cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Cached for the given number of seconds
    Ttl(u64),
    /// Always fetched upstream
    NoCache,
}

/// Route kinds, one per entry in [`ROUTE_TABLE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Search,
    Anime,
    Episode,
    Download,
    Recent,
    Recommendations,
    Popular,
    Upcoming,
    Home,
}

/// Static description of a prefix-matched route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub path_prefix: &'static str,
    pub kind: RouteKind,
    pub policy: CachePolicy,
}

const HOUR: u64 = 60 * 60;

/// Matched in order; the first prefix that matches wins.
pub static ROUTE_TABLE: [RouteSpec; 9] = [
    RouteSpec {
        path_prefix: "/search/",
        kind: RouteKind::Search,
        policy: CachePolicy::Ttl(HOUR),
    },
    RouteSpec {
        path_prefix: "/anime/",
        kind: RouteKind::Anime,
        policy: CachePolicy::Ttl(HOUR),
    },
    RouteSpec {
        path_prefix: "/episode/",
        kind: RouteKind::Episode,
        policy: CachePolicy::NoCache,
    },
    RouteSpec {
        path_prefix: "/download/",
        kind: RouteKind::Download,
        policy: CachePolicy::NoCache,
    },
    RouteSpec {
        path_prefix: "/recent/",
        kind: RouteKind::Recent,
        policy: CachePolicy::Ttl(5 * 60),
    },
    RouteSpec {
        path_prefix: "/recommendations/",
        kind: RouteKind::Recommendations,
        policy: CachePolicy::Ttl(HOUR),
    },
    RouteSpec {
        path_prefix: "/gogoPopular/",
        kind: RouteKind::Popular,
        policy: CachePolicy::Ttl(10 * 60),
    },
    RouteSpec {
        path_prefix: "/upcoming/",
        kind: RouteKind::Upcoming,
        policy: CachePolicy::Ttl(HOUR),
    },
    RouteSpec {
        path_prefix: "/home",
        kind: RouteKind::Home,
        policy: CachePolicy::Ttl(10 * 60),
    },
];

/// Page used when a search request carries no `page` parameter
pub const DEFAULT_SEARCH_PAGE: &str = "1";

/// Parameters extracted from a matched path, still raw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Search { query: String, page: String },
    Anime { id: String },
    Episode { id: String },
    Download { id: String },
    Recent { page: String },
    Recommendations { query: String },
    Popular { page: String },
    Upcoming { page: String },
    /// Trending titles from the metadata source next to the popular listing
    Home,
}

/// A request resolved against the route table: the row that matched and the
/// parameters it yielded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    spec: &'static RouteSpec,
    target: RouteTarget,
}

impl Route {
    /// Matches `path` against [`ROUTE_TABLE`]. Everything after the prefix
    /// is the route parameter, verbatim. `raw_query` is the undecoded query
    /// string; only search reads it, taking the first `page` value.
    pub fn match_path(path: &str, raw_query: Option<&str>) -> Option<Self> {
        let (spec, param) = ROUTE_TABLE.iter().find_map(|spec| {
            path.strip_prefix(spec.path_prefix)
                .map(|rest| (spec, rest.to_string()))
        })?;

        let target = match spec.kind {
            RouteKind::Search => RouteTarget::Search {
                query: param,
                page: first_query_value(raw_query, "page")
                    .filter(|p| !p.is_empty())
                    .unwrap_or_else(|| DEFAULT_SEARCH_PAGE.to_string()),
            },
            RouteKind::Anime => RouteTarget::Anime { id: param },
            RouteKind::Episode => RouteTarget::Episode { id: param },
            RouteKind::Download => RouteTarget::Download { id: param },
            RouteKind::Recent => RouteTarget::Recent { page: param },
            RouteKind::Recommendations => RouteTarget::Recommendations { query: param },
            RouteKind::Popular => RouteTarget::Popular { page: param },
            RouteKind::Upcoming => RouteTarget::Upcoming { page: param },
            RouteKind::Home if param.is_empty() => RouteTarget::Home,
            RouteKind::Home => return None,
        };

        Some(Self { spec, target })
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    pub fn kind(&self) -> RouteKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &'static RouteSpec {
        self.spec
    }

    pub fn policy(&self) -> CachePolicy {
        self.spec.policy
    }

    /// Cache key for cached routes, `None` for pass-through routes
    pub fn cache_key(&self) -> Option<String> {
        if self.spec.policy == CachePolicy::NoCache {
            return None;
        }

        match &self.target {
            RouteTarget::Search { query, page } => Some(format!("search_{}_{}", query, page)),
            RouteTarget::Anime { id } => Some(format!("anime_{}", id)),
            RouteTarget::Recent { page } => Some(format!("recent_{}", page)),
            RouteTarget::Recommendations { query } => {
                Some(format!("recommendations_{}", query))
            }
            RouteTarget::Popular { page } => Some(format!("gogoPopular_{}", page)),
            RouteTarget::Upcoming { page } => Some(format!("upcoming_{}", page)),
            RouteTarget::Home => Some("home".to_string()),
            RouteTarget::Episode { .. } | RouteTarget::Download { .. } => None,
        }
    }
}

/// First value of `name` in an urlencoded query string, decoded
fn first_query_value(raw_query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(raw_query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "search",
            Self::Anime => "anime",
            Self::Episode => "episode",
            Self::Download => "download",
            Self::Recent => "recent",
            Self::Recommendations => "recommendations",
            Self::Popular => "gogoPopular",
            Self::Upcoming => "upcoming",
            Self::Home => "home",
        };
        f.write_str(name)
    }
}
