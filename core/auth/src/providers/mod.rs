//! Built-in identity provider implementations
//!
//! Ready-to-use implementations of [`Provider`](crate::provider::Provider)
//! for the supported code-hosting providers.

mod bitbucket;
mod github;
mod gitlab;

pub use bitbucket::Bitbucket;
pub use github::GitHub;
pub use gitlab::GitLab;
