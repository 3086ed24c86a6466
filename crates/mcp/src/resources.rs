// Read-only resources addressed by trello:// URIs

use crate::protocol::{ReadResourceResult, ResourceContents, ResourceInfo, ResourceTemplateInfo};
use std::sync::Arc;
use tracing::debug;
use trello_sdk::api::{boards, lists};
use trello_sdk::{RemoteApi, RemoteRequest, TrelloError};

const MIME_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A URI pattern such as `trello://boards/{boardId}/lists`, split into
/// literal and variable path segments.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    pattern: &'static str,
    scheme: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    pub fn compile(pattern: &'static str) -> Self {
        let (scheme, rest) = pattern.split_once("://").unwrap_or(("", pattern));
        let segments = rest
            .split('/')
            .map(|segment| {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => Segment::Variable(name.to_string()),
                    None => Segment::Literal(segment.to_string()),
                }
            })
            .collect();

        Self {
            pattern,
            scheme: scheme.to_string(),
            segments,
        }
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Variable names in the order they appear.
    pub fn variables(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Variable(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Match a concrete URI, returning variable bindings in declaration order.
    ///
    /// Every variable must bind a non-empty segment.
    pub fn matches(&self, uri: &str) -> Option<Vec<(String, String)>> {
        let (scheme, rest) = uri.split_once("://").unwrap_or(("", uri));
        if scheme != self.scheme {
            return None;
        }

        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut bindings = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Variable(_) if part.is_empty() => return None,
                Segment::Variable(name) => bindings.push((name.clone(), part.to_string())),
            }
        }
        Some(bindings)
    }
}

/// The resource a URI resolved to, with its variables bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRoute {
    Boards,
    Lists { board_id: String },
    Cards { list_id: String },
}

impl ResourceRoute {
    fn request(&self) -> RemoteRequest {
        match self {
            ResourceRoute::Boards => boards::my_boards_request(),
            ResourceRoute::Lists { board_id } => boards::lists_request(board_id),
            ResourceRoute::Cards { list_id } => lists::cards_request(list_id, None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResourceKind {
    Boards,
    Lists,
    Cards,
}

impl ResourceKind {
    fn name(&self) -> &'static str {
        match self {
            ResourceKind::Boards => "boards",
            ResourceKind::Lists => "lists",
            ResourceKind::Cards => "cards",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ResourceKind::Boards => "Boards of the authenticated Trello member",
            ResourceKind::Lists => "Lists on a Trello board",
            ResourceKind::Cards => "Cards on a Trello list",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            ResourceKind::Boards => "trello://boards",
            ResourceKind::Lists => "trello://boards/{boardId}/lists",
            ResourceKind::Cards => "trello://lists/{listId}/cards",
        }
    }

    fn route(&self, bindings: Vec<(String, String)>) -> Option<ResourceRoute> {
        let mut values = bindings.into_iter().map(|(_, value)| value);
        match self {
            ResourceKind::Boards => Some(ResourceRoute::Boards),
            ResourceKind::Lists => Some(ResourceRoute::Lists {
                board_id: values.next()?,
            }),
            ResourceKind::Cards => Some(ResourceRoute::Cards {
                list_id: values.next()?,
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Unknown resource: {0}")]
    UnknownUri(String),

    #[error(transparent)]
    Remote(#[from] TrelloError),

    #[error("Failed to encode resource: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serves the boards / lists / cards snapshots.
///
/// Remote failures are returned as-is; the transport reports them as
/// protocol errors rather than tool envelopes.
pub struct ResourceProvider {
    api: Arc<dyn RemoteApi>,
    templates: Vec<(ResourceKind, UriTemplate)>,
}

impl ResourceProvider {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        let templates = [ResourceKind::Boards, ResourceKind::Lists, ResourceKind::Cards]
            .into_iter()
            .map(|kind| (kind, UriTemplate::compile(kind.pattern())))
            .collect();

        Self { api, templates }
    }

    /// Resources with no variables, for `resources/list`.
    pub fn list_resources(&self) -> Vec<ResourceInfo> {
        self.templates
            .iter()
            .filter(|(_, template)| template.variables().is_empty())
            .map(|(kind, template)| ResourceInfo {
                uri: template.pattern().to_string(),
                name: kind.name().to_string(),
                description: Some(kind.description().to_string()),
                mime_type: Some(MIME_JSON.to_string()),
            })
            .collect()
    }

    /// Parameterised resources, for `resources/templates/list`.
    pub fn list_templates(&self) -> Vec<ResourceTemplateInfo> {
        self.templates
            .iter()
            .filter(|(_, template)| !template.variables().is_empty())
            .map(|(kind, template)| ResourceTemplateInfo {
                uri_template: template.pattern().to_string(),
                name: kind.name().to_string(),
                description: Some(kind.description().to_string()),
                mime_type: Some(MIME_JSON.to_string()),
            })
            .collect()
    }

    /// Find the resource a URI addresses.
    pub fn route(&self, uri: &str) -> Option<ResourceRoute> {
        self.templates.iter().find_map(|(kind, template)| {
            template
                .matches(uri)
                .and_then(|bindings| kind.route(bindings))
        })
    }

    /// Fetch the snapshot for an already-routed URI.
    pub async fn resolve(
        &self,
        uri: &str,
        route: &ResourceRoute,
    ) -> Result<ReadResourceResult, ResourceError> {
        debug!(uri, ?route, "Reading resource");
        let data = self.api.call(route.request()).await?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                text: serde_json::to_string(&data)?,
            }],
        })
    }

    /// Route and fetch in one step, for `resources/read`.
    pub async fn read(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let route = self
            .route(uri)
            .ok_or_else(|| ResourceError::UnknownUri(uri.to_string()))?;
        self.resolve(uri, &route).await
    }
}
