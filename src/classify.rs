//! Event classification: turn an activity record into a sentence fragment.
//!
//! The fragment sits between the actor and the repository name, so it
//! reads as `@octocat pushed 2 commits to acme/widgets`.

use crate::model::{ActivityRecord, EventKind, UserRef};

/// Outcome of classifying one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    /// A displayable fragment.
    Message(String),

    /// A kind that is deliberately never shown.
    Ignored,

    /// A `type` string outside the known set.
    Unrecognized(&'a str),
}

/// Describe what a record's actor did.
///
/// Pure: the caller decides how to report [`Classification::Unrecognized`].
pub fn classify(record: &ActivityRecord) -> Classification<'_> {
    let fragment = match &record.kind {
        EventKind::CommitComment(_) => "commented on a commit at".to_string(),
        EventKind::Create(payload) => format!(
            "created the {} at",
            describe_ref(payload.ref_name.as_deref(), payload.ref_type.as_deref())
        ),
        EventKind::Delete(payload) => format!(
            "removed the {} at",
            describe_ref(payload.ref_name.as_deref(), payload.ref_type.as_deref())
        ),
        EventKind::Deployment(payload) => match &payload.name {
            Some(name) => format!("deployed {name} at"),
            None => "deployed at".to_string(),
        },
        EventKind::DeploymentStatus(payload) => {
            format!("{} status for deployment at", state(payload.state.as_deref()))
        }
        EventKind::Fork => "forked".to_string(),
        EventKind::Gollum => "updated the wiki for".to_string(),
        EventKind::IssueComment(payload) => {
            format!("commented on {} at", issue_ref(payload.issue.number))
        }
        EventKind::Issues(payload) => format!(
            "{} {} at",
            action(payload.action.as_deref()),
            issue_ref(payload.issue.number)
        ),
        EventKind::Member(payload) => format!(
            "added {} as a collaborator to",
            login(payload.member.as_ref(), "someone")
        ),
        EventKind::Public => "open sourced".to_string(),
        EventKind::PullRequest(payload) => {
            let number = payload
                .number()
                .map_or_else(|| "a pull request".to_string(), |n| format!("pull request #{n}"));
            format!("{} {number} at", action(payload.action.as_deref()))
        }
        EventKind::PullRequestReviewComment(_) => "commented on a pull request at".to_string(),
        EventKind::Push(payload) => {
            let count = payload.commits.len();
            let noun = if count == 1 { "commit" } else { "commits" };
            format!("pushed {count} {noun} to")
        }
        EventKind::Release => "published release for".to_string(),
        EventKind::Status(payload) => {
            format!("{} status of commit at", state(payload.state.as_deref()))
        }
        EventKind::TeamAdd(payload) => {
            format!("adds team member {}", login(payload.user.as_ref(), "someone"))
        }
        EventKind::Watch => "is now watching".to_string(),
        EventKind::Download | EventKind::Follow | EventKind::ForkApply | EventKind::Gist => {
            return Classification::Ignored;
        }
        EventKind::Unrecognized(kind) => return Classification::Unrecognized(kind),
    };

    Classification::Message(fragment)
}

/// `main branch`, or just `repository` when a whole repository was created.
fn describe_ref(name: Option<&str>, ref_type: Option<&str>) -> String {
    let ref_type = ref_type.unwrap_or("ref");
    match name {
        Some(name) => format!("{name} {ref_type}"),
        None => ref_type.to_string(),
    }
}

fn issue_ref(number: Option<u64>) -> String {
    number.map_or_else(|| "an issue".to_string(), |n| format!("issue #{n}"))
}

fn action(action: Option<&str>) -> &str {
    action.unwrap_or("updated")
}

fn state(state: Option<&str>) -> &str {
    state.unwrap_or("unknown")
}

fn login<'a>(user: Option<&'a UserRef>, fallback: &'a str) -> &'a str {
    user.map_or(fallback, UserRef::login)
}
