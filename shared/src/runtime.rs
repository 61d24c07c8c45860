use serde::{Deserialize, Serialize};

/// Where the current process runs, as reported by the caller's runtime detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeFlags {
    pub is_local_runtime_group: bool,
    pub is_ci_runtime_group: bool,
    pub is_local: bool,
    pub is_cloud9: bool,
    pub is_ec2: bool,
    pub is_lambda: bool,
    pub is_batch: bool,
    pub is_ecs: bool,
    pub is_glue: bool,
}

/// Coarse classification used to pick a session lookup path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeGroup {
    Local,
    Ci,
    Cloud,
}

impl RuntimeFlags {
    /// Flags for a developer machine.
    pub fn local() -> Self {
        Self {
            is_local_runtime_group: true,
            is_local: true,
            ..Self::default()
        }
    }

    /// Flags for a CI job.
    pub fn ci() -> Self {
        Self {
            is_ci_runtime_group: true,
            ..Self::default()
        }
    }

    /// The local group wins when both group flags are set.
    pub fn group(&self) -> RuntimeGroup {
        if self.is_local_runtime_group {
            RuntimeGroup::Local
        } else if self.is_ci_runtime_group {
            RuntimeGroup::Ci
        } else {
            RuntimeGroup::Cloud
        }
    }
}
