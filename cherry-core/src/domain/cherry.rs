//! Cherry domain types
//!
//! A cherry is a user-managed application descriptor. It is not an executable
//! artifact until it has been scaffolded and built by the external tool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Size reported for stacks missing from the lookup table
pub const UNKNOWN_SIZE: &str = "Unknown";

/// Application descriptor tracked by the registry
///
/// The `id` never changes after creation. `last_run` and `last_compiled` are
/// only present after at least one successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cherry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub stack: String,
    /// Estimated binary size, derived from the stack
    pub size: String,
    /// Scaffolded project directory
    #[serde(default)]
    pub path: Option<PathBuf>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_compiled: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub is_compiled: bool,
    #[serde(default)]
    pub favorite: bool,
}

impl Cherry {
    /// Creates a fresh cherry with default lifecycle flags
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        let stack = stack.into();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            size: estimated_size(&stack).to_string(),
            stack,
            path: None,
            created_at: Utc::now(),
            last_run: None,
            last_compiled: None,
            is_running: false,
            is_compiled: false,
            favorite: false,
        }
    }

    /// Run state as a single value
    pub fn run_state(&self) -> RunState {
        if self.is_running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }
}

/// Whether a cherry is currently marked as running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Stopped,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Running => write!(f, "Running"),
            RunState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Listing filter over the run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Running,
    Stopped,
}

impl StatusFilter {
    pub fn matches(&self, cherry: &Cherry) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Running => cherry.is_running,
            StatusFilter::Stopped => !cherry.is_running,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "running" => Ok(StatusFilter::Running),
            "stopped" => Ok(StatusFilter::Stopped),
            other => Err(format!(
                "unknown filter '{}', expected all, running or stopped",
                other
            )),
        }
    }
}

/// Technology stacks understood by the external build tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stack {
    GoGin,
    GoFyne,
    BunHono,
    RustAxum,
    TauriReact,
    Static,
}

impl Stack {
    pub const ALL: [Stack; 6] = [
        Stack::GoGin,
        Stack::GoFyne,
        Stack::BunHono,
        Stack::RustAxum,
        Stack::TauriReact,
        Stack::Static,
    ];

    /// Tag used on the wire and on the tool command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Stack::GoGin => "go-gin",
            Stack::GoFyne => "go-fyne",
            Stack::BunHono => "bun-hono",
            Stack::RustAxum => "rust-axum",
            Stack::TauriReact => "tauri-react",
            Stack::Static => "static",
        }
    }

    /// Estimated size range of a built binary
    pub fn estimated_size(&self) -> &'static str {
        match self {
            Stack::GoGin => "8-18 MB",
            Stack::GoFyne => "20-30 MB",
            Stack::BunHono => "50-100 MB",
            Stack::RustAxum => "5-15 MB",
            Stack::TauriReact => "6-14 MB",
            Stack::Static => "<2 MB",
        }
    }
}

impl std::fmt::Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stack {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stack::ALL
            .into_iter()
            .find(|stack| stack.as_str() == s)
            .ok_or_else(|| format!("unrecognized stack '{}'", s))
    }
}

/// Looks up the size range for a stack tag, `Unknown` when not in the table
pub fn estimated_size(stack: &str) -> &'static str {
    stack
        .parse::<Stack>()
        .map(|s| s.estimated_size())
        .unwrap_or(UNKNOWN_SIZE)
}

/// Directory name the build tool derives from a project name
///
/// Lowercases, keeps only ASCII letters, digits, whitespace and `-`, then
/// turns each run of whitespace or `-` into a single `-`. Edge hyphens stay.
pub fn project_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if c.is_whitespace() {
            '-'
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            c
        } else {
            continue;
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug
}
