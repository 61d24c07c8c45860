use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{
    resolve_account_id, role_arn, role_session_name, workload_role_name, BsmError, BsmResult,
    EnvReader, RuntimeFlags, SystemEnv,
};

/// Serialized form of [`EnvironmentConfig`], usually loaded from a JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentSettings {
    pub env_to_aws_profile_mapper: HashMap<String, String>,
    pub env_to_aws_region_mapper: HashMap<String, String>,
    pub default_app_env_name: String,
    pub devops_env_name: String,
    pub workload_role_name_prefix_in_ci: String,
    pub workload_role_name_suffix_in_ci: String,
    #[serde(default)]
    pub runtime: RuntimeFlags,
}

impl EnvironmentSettings {
    pub fn from_json(json: &str) -> BsmResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Maps application environments to AWS profiles, regions and CI workload roles.
///
/// Built once at startup and read-only afterwards. The devops environment is
/// guaranteed to differ from the default application environment.
#[derive(Clone)]
pub struct EnvironmentConfig {
    settings: EnvironmentSettings,
    env: Arc<dyn EnvReader>,
}

impl fmt::Debug for EnvironmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentConfig")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl TryFrom<EnvironmentSettings> for EnvironmentConfig {
    type Error = BsmError;

    fn try_from(settings: EnvironmentSettings) -> Result<Self, Self::Error> {
        Self::new(settings)
    }
}

impl EnvironmentConfig {
    pub fn new(settings: EnvironmentSettings) -> BsmResult<Self> {
        if settings.default_app_env_name == settings.devops_env_name {
            return Err(BsmError::InvalidConfiguration(format!(
                "default_app_env_name and devops_env_name cannot both be '{}'",
                settings.devops_env_name
            )));
        }

        tracing::debug!(
            "Environment config created - default: {}, devops: {}",
            settings.default_app_env_name,
            settings.devops_env_name
        );

        Ok(Self {
            settings,
            env: Arc::new(SystemEnv),
        })
    }

    /// Parse settings JSON and validate it
    pub fn from_json(json: &str) -> BsmResult<Self> {
        Self::new(EnvironmentSettings::from_json(json)?)
    }

    /// Replace the process environment with another variable source
    pub fn with_env_reader<R: EnvReader + 'static>(mut self, reader: R) -> Self {
        self.env = Arc::new(reader);
        self
    }

    pub fn settings(&self) -> &EnvironmentSettings {
        &self.settings
    }

    pub fn default_app_env_name(&self) -> &str {
        &self.settings.default_app_env_name
    }

    pub fn devops_env_name(&self) -> &str {
        &self.settings.devops_env_name
    }

    pub fn runtime(&self) -> &RuntimeFlags {
        &self.settings.runtime
    }

    pub(crate) fn env_reader(&self) -> &dyn EnvReader {
        self.env.as_ref()
    }

    /// Every environment with a profile mapping, sorted
    pub fn env_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .settings
            .env_to_aws_profile_mapper
            .keys()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Same as [`env_names`](Self::env_names) without the devops environment
    pub fn workload_env_names(&self) -> Vec<&str> {
        self.env_names()
            .into_iter()
            .filter(|name| *name != self.devops_env_name())
            .collect()
    }

    pub fn get_profile(&self, env_name: &str) -> BsmResult<&str> {
        lookup(&self.settings.env_to_aws_profile_mapper, env_name, "profile")
    }

    pub fn get_region(&self, env_name: &str) -> BsmResult<&str> {
        lookup(&self.settings.env_to_aws_region_mapper, env_name, "region")
    }

    /// ARN of the workload role a CI job assumes to deploy into `env_name`.
    ///
    /// The account id is read from `{ENV}_AWS_ACCOUNT_ID` on every call. The
    /// devops environment is rejected before anything is read.
    pub fn get_workload_role_arn_in_ci(&self, env_name: &str) -> BsmResult<String> {
        if env_name == self.devops_env_name() {
            return Err(BsmError::InvalidOperation(format!(
                "cannot derive a workload role ARN for the devops environment '{}'",
                env_name
            )));
        }

        let account_id = resolve_account_id(self.env_reader(), env_name)?;
        let role_name = workload_role_name(
            &self.settings.workload_role_name_prefix_in_ci,
            env_name,
            &self.settings.workload_role_name_suffix_in_ci,
        );
        Ok(role_arn(&account_id, &role_name))
    }

    pub fn get_session_name(&self, env_name: &str) -> String {
        role_session_name(env_name)
    }
}

fn lookup<'a>(mapping: &'a HashMap<String, String>, env_name: &str, kind: &str) -> BsmResult<&'a str> {
    mapping
        .get(env_name)
        .map(String::as_str)
        .ok_or_else(|| BsmError::UnknownEnvironment {
            env_name: env_name.to_string(),
            mapping: kind.to_string(),
        })
}
