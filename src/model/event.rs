//! Event kinds and their typed payloads.
//!
//! The feed tags each record with a `type` string. Known names map to a
//! variant here; anything else lands in [`EventKind::Unrecognized`] so the
//! caller has to decide what to do with it.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// What happened, with the payload fields each kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    CommitComment(Comment),
    Create(RefPayload),
    Delete(RefPayload),
    Deployment(DeploymentPayload),
    DeploymentStatus(StatePayload),
    Download,
    Follow,
    Fork,
    ForkApply,
    Gist,
    Gollum,
    IssueComment(IssueCommentPayload),
    Issues(IssuesPayload),
    Member(MemberPayload),
    Public,
    PullRequest(PullRequestPayload),
    PullRequestReviewComment(Comment),
    Push(PushPayload),
    Release,
    Status(StatePayload),
    TeamAdd(TeamAddPayload),
    Watch,

    /// A `type` string outside the known set. Carries the raw name.
    Unrecognized(String),
}

impl EventKind {
    /// Build a kind from the feed's `type` string and its raw payload.
    ///
    /// Fails only when a known kind's payload has the wrong shape.
    pub fn from_parts(kind: &str, payload: Value) -> Result<Self, serde_json::Error> {
        let kind = match kind {
            "CommitCommentEvent" => Self::CommitComment(comment_of(payload)?),
            "CreateEvent" => Self::Create(decode(payload)?),
            "DeleteEvent" => Self::Delete(decode(payload)?),
            "DeploymentEvent" => Self::Deployment(decode(payload)?),
            "DeploymentStatusEvent" => Self::DeploymentStatus(decode(payload)?),
            "DownloadEvent" => Self::Download,
            "FollowEvent" => Self::Follow,
            "ForkEvent" => Self::Fork,
            "ForkApplyEvent" => Self::ForkApply,
            "GistEvent" => Self::Gist,
            "GollumEvent" => Self::Gollum,
            "IssueCommentEvent" => Self::IssueComment(decode(payload)?),
            "IssuesEvent" => Self::Issues(decode(payload)?),
            "MemberEvent" => Self::Member(decode(payload)?),
            "PublicEvent" => Self::Public,
            "PullRequestEvent" => Self::PullRequest(decode(payload)?),
            "PullRequestReviewCommentEvent" => Self::PullRequestReviewComment(comment_of(payload)?),
            "PushEvent" => Self::Push(decode(payload)?),
            "ReleaseEvent" => Self::Release,
            "StatusEvent" => Self::Status(decode(payload)?),
            "TeamAddEvent" => Self::TeamAdd(decode(payload)?),
            "WatchEvent" => Self::Watch,
            other => Self::Unrecognized(other.to_string()),
        };
        Ok(kind)
    }
}

/// Decode a payload, treating a missing (`null`) payload as an empty object.
fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    match payload {
        Value::Null => serde_json::from_value(Value::Object(Map::new())),
        other => serde_json::from_value(other),
    }
}

fn comment_of(payload: Value) -> Result<Comment, serde_json::Error> {
    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Envelope {
        comment: Comment,
    }

    decode::<Envelope>(payload).map(|e| e.comment)
}

/// A comment on a commit, issue, or pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub html_url: Option<String>,
}

/// Branch or tag creation and deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RefPayload {
    /// Ref name. `None` when a whole repository was created.
    #[serde(rename = "ref")]
    pub ref_name: Option<String>,
    pub ref_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeploymentPayload {
    pub name: Option<String>,
}

/// Payloads that only carry a state string (deployment status, commit status).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatePayload {
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub number: Option<u64>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IssueCommentPayload {
    pub issue: Issue,
    pub comment: Comment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IssuesPayload {
    /// `opened`, `closed`, `reopened`, ...
    pub action: Option<String>,
    pub issue: Issue,
}

/// A user given either as a bare login or as a user object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Login(String),
    User { login: String },
}

impl UserRef {
    pub fn login(&self) -> &str {
        match self {
            Self::Login(login) | Self::User { login } => login,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemberPayload {
    pub member: Option<UserRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    pub number: Option<u64>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PullRequestPayload {
    pub action: Option<String>,
    pub number: Option<u64>,
    pub pull_request: PullRequest,
}

impl PullRequestPayload {
    /// The PR number, from the payload root or the nested pull request.
    pub fn number(&self) -> Option<u64> {
        self.number.or(self.pull_request.number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Commit {
    pub sha: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamAddPayload {
    pub user: Option<UserRef>,
}
