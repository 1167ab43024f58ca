//! Per-tool target adapters

pub mod agents;
pub mod claude;
pub mod codex;
pub mod copilot;
pub mod vscode;

pub use agents::AgentsTarget;
pub use claude::ClaudeTarget;
pub use codex::CodexTarget;
pub use copilot::CopilotTarget;
pub use vscode::VscodeMcpTarget;

use crate::emit::TargetAdapter;

/// All built-in targets, in canonical artifact order
pub fn all() -> Vec<Box<dyn TargetAdapter>> {
    vec![
        Box::new(AgentsTarget),
        Box::new(CopilotTarget),
        Box::new(ClaudeTarget),
        Box::new(CodexTarget),
        Box::new(VscodeMcpTarget),
    ]
}
