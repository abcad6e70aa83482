use crate::core::{ContactSubmission, FormTransport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Stand-in for a mail backend: waits, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl FormTransport for SimulatedTransport {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<()> {
        tracing::debug!(
            "Simulating delivery of message from {} <{}>",
            submission.name,
            submission.email
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_transport_waits_then_succeeds() {
        let transport = SimulatedTransport::default();
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        };

        let started = tokio::time::Instant::now();
        transport.deliver(&submission).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
