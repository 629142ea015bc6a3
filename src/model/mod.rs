//! Core data model for repowatch.
//!
//! These types represent what flows through a poll cycle:
//! activity records in, notifications out.

mod activity;
mod event;
mod notification;

pub use activity::{ActivityRecord, Actor, RepositoryRef};
pub use event::{
    Comment, Commit, DeploymentPayload, EventKind, Issue, IssueCommentPayload, IssuesPayload,
    MemberPayload, PullRequest, PullRequestPayload, PushPayload, RefPayload, StatePayload,
    TeamAddPayload, UserRef,
};
pub use notification::Notification;
