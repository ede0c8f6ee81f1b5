use std::{fmt, str::FromStr};

/// Kind of sharing link Graph should mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkType {
    View,
    Edit,
    Embed,
}

/// Audience of a sharing link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkScope {
    Anonymous,
    Organization,
    Users,
}

impl LinkType {
    pub fn as_graph_str(&self) -> &'static str {
        match self {
            LinkType::View => "view",
            LinkType::Edit => "edit",
            LinkType::Embed => "embed",
        }
    }

    pub fn from_graph_str(value: &str) -> Option<Self> {
        match value {
            "view" => Some(LinkType::View),
            "edit" => Some(LinkType::Edit),
            "embed" => Some(LinkType::Embed),
            _ => None,
        }
    }
}

impl LinkScope {
    pub fn as_graph_str(&self) -> &'static str {
        match self {
            LinkScope::Anonymous => "anonymous",
            LinkScope::Organization => "organization",
            LinkScope::Users => "users",
        }
    }

    pub fn from_graph_str(value: &str) -> Option<Self> {
        match value {
            "anonymous" => Some(LinkScope::Anonymous),
            "organization" => Some(LinkScope::Organization),
            "users" => Some(LinkScope::Users),
            _ => None,
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_graph_str())
    }
}

impl fmt::Display for LinkScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_graph_str())
    }
}

impl FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkType::from_graph_str(&s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown link type {s:?} (expected view, edit or embed)"))
    }
}

impl FromStr for LinkScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkScope::from_graph_str(&s.to_ascii_lowercase()).ok_or_else(|| {
            format!("unknown link scope {s:?} (expected anonymous, organization or users)")
        })
    }
}
