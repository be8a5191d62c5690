//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Roles for messages sent to the generative backend.
///
/// # Examples
///
/// ```
/// use goldoni_core::Role;
///
/// assert_eq!(format!("{}", Role::System), "System");
/// assert_ne!(Role::User, Role::Assistant);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages are from the writer's session
    User,
    /// Assistant messages are from the model
    Assistant,
}
