//! Agent routing boundary
//!
//! The shell only names an agent kind and hands over a prompt; everything
//! past that point belongs to the agent subsystem. This module holds the
//! router used when no backend is wired in: it reports unavailability
//! instead of performing any network I/O.

use async_trait::async_trait;
use tracing::debug;

use moneta_core::command::AgentKind;
use moneta_core::error::{ShellError, ShellResult};
use moneta_core::traits::shell::AgentRouter;

use crate::config::AgentConfig;

/// Router used when the agent backend is not connected
pub struct OfflineAgentRouter {
    endpoint: Option<String>,
    model: String,
}

impl OfflineAgentRouter {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AgentRouter for OfflineAgentRouter {
    async fn invoke(&self, kind: AgentKind, prompt: &str) -> ShellResult<String> {
        debug!(kind = %kind, prompt_len = prompt.len(), "agent invocation requested while offline");
        match &self.endpoint {
            None => Err(ShellError::AgentUnavailable(
                "no agent endpoint configured; set [agent].endpoint in config.toml".into(),
            )),
            Some(endpoint) => Err(ShellError::AgentUnavailable(format!(
                "agent backend at {endpoint} is not enabled in this build"
            ))),
        }
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_router_reports_missing_endpoint() {
        let router = OfflineAgentRouter::new(&AgentConfig::default());
        let err = router
            .invoke(AgentKind::Advisor, "what moved today?")
            .await
            .unwrap_err();
        assert!(matches!(err, ShellError::AgentUnavailable(msg) if msg.contains("endpoint")));
        assert!(!router.is_available());
    }
}
