use crate::domain::model::OutgoingEmail;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<()>;
}
