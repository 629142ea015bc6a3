//! Link resolution: where to open an event in the browser.

use crate::model::{ActivityRecord, EventKind};

/// Shown when no better link can be derived for an event.
pub const FALLBACK_LINK: &str = "https://github.com";

/// Resolve the web URL for a record, falling back to [`FALLBACK_LINK`].
pub fn resolve_link(record: &ActivityRecord) -> String {
    derive_link(record).unwrap_or_else(|| FALLBACK_LINK.to_string())
}

fn derive_link(record: &ActivityRecord) -> Option<String> {
    let repo_url = record.repository.url.as_deref();

    match &record.kind {
        EventKind::Create(payload) => {
            let ref_name = payload.ref_name.as_deref()?;
            web_url(repo_url?, &format!("/tree/{ref_name}"))
        }
        EventKind::CommitComment(comment) | EventKind::PullRequestReviewComment(comment) => {
            comment.html_url.clone()
        }
        EventKind::IssueComment(payload) => payload.comment.html_url.clone(),
        EventKind::Delete(_) => web_url(repo_url?, ""),
        EventKind::Fork => web_url(record.actor.url.as_deref()?, ""),
        EventKind::Gollum => web_url(repo_url?, "/wiki"),
        EventKind::Issues(payload) if payload.action.as_deref() == Some("opened") => {
            payload.issue.html_url.clone()
        }
        EventKind::PullRequest(payload) => payload.pull_request.html_url.clone(),
        EventKind::Push(payload) => {
            let sha = &payload.commits.first()?.sha;
            if sha.is_empty() {
                return None;
            }
            web_url(repo_url?, &format!("/commit/{sha}"))
        }
        _ => None,
    }
}

/// Turn an API URL into its public web form, with an optional suffix.
///
/// `https://api.<host>/<kind>/<rest>` becomes `https://<host>/<rest><suffix>`,
/// so `https://api.github.com/repos/acme/widgets` maps to
/// `https://github.com/acme/widgets`. Returns `None` for anything that
/// doesn't have that shape.
pub fn web_url(api_url: &str, suffix: &str) -> Option<String> {
    let rest = api_url.strip_prefix("https://api.")?;
    let (host, path) = rest.split_once('/')?;
    let (kind, remainder) = path.split_once('/')?;
    if host.is_empty() || kind.is_empty() || remainder.is_empty() {
        return None;
    }
    Some(format!("https://{host}/{remainder}{suffix}"))
}
