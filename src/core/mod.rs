pub mod auth_form;
pub mod magic_link;
pub mod supabase;

pub use crate::domain::model::{CredentialsRequest, MagicLinkPayload, SubmissionStatus};
pub use crate::domain::ports::{ConfigProvider, MagicLinkSender};
pub use crate::utils::error::Result;
