//! Activity records: one unit of repository activity from the feed.

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::Value;

use super::EventKind;

/// One record from a repository's activity feed.
///
/// The feed has no stable event ID; `occurred_at` doubles as the record's
/// identity within a (user, repository) scope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct ActivityRecord {
    pub kind: EventKind,
    pub occurred_at: Timestamp,
    pub actor: Actor,
    pub repository: RepositoryRef,
}

/// The user who caused the event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Actor {
    pub login: String,

    /// API URL of the user, e.g. `https://api.github.com/users/octocat`.
    #[serde(default)]
    pub url: Option<String>,
}

/// The repository an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryRef {
    /// `owner/name`.
    pub name: String,

    /// API URL, e.g. `https://api.github.com/repos/acme/widgets`.
    #[serde(default)]
    pub url: Option<String>,
}

/// JSON shape of one entry in `GET /repos/{owner}/{repo}/events`.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "type")]
    kind: String,
    created_at: Timestamp,
    actor: Actor,
    repo: RepositoryRef,
    #[serde(default)]
    payload: Value,
}

impl TryFrom<RawRecord> for ActivityRecord {
    type Error = serde_json::Error;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: EventKind::from_parts(&raw.kind, raw.payload)?,
            occurred_at: raw.created_at,
            actor: raw.actor,
            repository: raw.repo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn decodes_feed_entry() {
        let record: ActivityRecord = serde_json::from_value(json!({
            "id": "1",
            "type": "WatchEvent",
            "created_at": "2024-03-01T12:00:00Z",
            "actor": { "login": "octocat", "url": "https://api.github.com/users/octocat" },
            "repo": { "name": "acme/widgets", "url": "https://api.github.com/repos/acme/widgets" },
            "payload": { "action": "started" }
        }))
        .unwrap();

        assert_eq!(record.kind, EventKind::Watch);
        assert_eq!(record.actor.login, "octocat");
        assert_eq!(record.repository.name, "acme/widgets");
        assert_eq!(
            record.occurred_at,
            "2024-03-01T12:00:00Z".parse::<Timestamp>().unwrap()
        );
    }

    #[test]
    fn missing_payload_is_tolerated() {
        let record: ActivityRecord = serde_json::from_value(json!({
            "type": "ForkEvent",
            "created_at": "2024-03-01T12:00:00Z",
            "actor": { "login": "octocat" },
            "repo": { "name": "acme/widgets" }
        }))
        .unwrap();

        assert_eq!(record.kind, EventKind::Fork);
        assert!(record.actor.url.is_none());
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let result = serde_json::from_value::<ActivityRecord>(json!({
            "type": "ForkEvent",
            "created_at": "yesterday",
            "actor": { "login": "octocat" },
            "repo": { "name": "acme/widgets" }
        }));

        assert!(result.is_err());
    }
}
