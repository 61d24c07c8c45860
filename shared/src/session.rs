use std::time::Duration;

use crate::{BsmResult, EnvironmentConfig, RuntimeGroup};

/// Default lifetime of an assumed workload role session
pub const DEFAULT_ROLE_SESSION_DURATION: Duration = Duration::from_secs(3600);

/// How a caller should obtain AWS credentials for an environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPlan {
    /// Named profile from the local AWS CLI config
    Profile { profile: String, region: String },
    /// Whatever the default credential chain finds (CI devops identity, cloud runtime role)
    DefaultCredentials { region: Option<String> },
    /// Assume a workload role on top of the devops identity
    AssumeRole {
        role_arn: String,
        session_name: String,
        region: Option<String>,
        duration: Duration,
    },
}

/// Overrides for the assumed-role path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub session_name: Option<String>,
    pub region: Option<String>,
    pub duration: Option<Duration>,
}

impl EnvironmentConfig {
    pub fn plan_session(&self, env_name: &str) -> BsmResult<SessionPlan> {
        self.plan_session_with(env_name, &SessionOptions::default())
    }

    /// Pick the credential source for `env_name` from the runtime group.
    ///
    /// Locally every environment maps to its profile. In CI the devops
    /// environment uses the job's own credentials and workload environments
    /// assume their role. Any other runtime uses the default chain.
    pub fn plan_session_with(&self, env_name: &str, options: &SessionOptions) -> BsmResult<SessionPlan> {
        let is_devops = env_name == self.devops_env_name();

        let plan = match self.runtime().group() {
            RuntimeGroup::Local => SessionPlan::Profile {
                profile: self.get_profile(env_name)?.to_string(),
                region: self.get_region(env_name)?.to_string(),
            },
            RuntimeGroup::Ci if is_devops => SessionPlan::DefaultCredentials {
                region: self.devops_region(),
            },
            RuntimeGroup::Ci => SessionPlan::AssumeRole {
                role_arn: self.get_workload_role_arn_in_ci(env_name)?,
                session_name: options
                    .session_name
                    .clone()
                    .unwrap_or_else(|| self.get_session_name(env_name)),
                region: options.region.clone().or_else(|| self.devops_region()),
                duration: options.duration.unwrap_or(DEFAULT_ROLE_SESSION_DURATION),
            },
            RuntimeGroup::Cloud => SessionPlan::DefaultCredentials { region: None },
        };

        tracing::debug!("Session plan for {}: {:?}", env_name, plan);
        Ok(plan)
    }

    fn devops_region(&self) -> Option<String> {
        self.get_region(self.devops_env_name()).ok().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_settings;
    use crate::{BsmError, RuntimeFlags};
    use std::collections::HashMap;

    fn config_for(runtime: RuntimeFlags) -> EnvironmentConfig {
        let mut settings = sample_settings();
        settings.runtime = runtime;
        EnvironmentConfig::new(settings).unwrap().with_env_reader(HashMap::from([(
            "PROD_AWS_ACCOUNT_ID".to_string(),
            "987654321098".to_string(),
        )]))
    }

    #[test]
    fn test_local_plans_use_profiles() {
        let config = config_for(RuntimeFlags::local());

        assert_eq!(
            config.plan_session("prod").unwrap(),
            SessionPlan::Profile {
                profile: "prod-profile".to_string(),
                region: "us-west-2".to_string(),
            }
        );
        assert_eq!(
            config.plan_session("devops").unwrap(),
            SessionPlan::Profile {
                profile: "devops-profile".to_string(),
                region: "us-east-1".to_string(),
            }
        );
        assert!(matches!(
            config.plan_session("staging"),
            Err(BsmError::UnknownEnvironment { .. })
        ));
    }

    #[test]
    fn test_ci_devops_uses_default_credentials() {
        let config = config_for(RuntimeFlags::ci());
        assert_eq!(
            config.plan_session("devops").unwrap(),
            SessionPlan::DefaultCredentials {
                region: Some("us-east-1".to_string())
            }
        );
    }

    #[test]
    fn test_ci_workload_assumes_role() {
        let config = config_for(RuntimeFlags::ci());
        assert_eq!(
            config.plan_session("prod").unwrap(),
            SessionPlan::AssumeRole {
                role_arn: "arn:aws:iam::987654321098:role/WorkloadRole-prod-Role".to_string(),
                session_name: "prod_role_session".to_string(),
                region: Some("us-east-1".to_string()),
                duration: DEFAULT_ROLE_SESSION_DURATION,
            }
        );

        let options = SessionOptions {
            session_name: Some("deploy-42".to_string()),
            region: Some("eu-west-1".to_string()),
            duration: Some(Duration::from_secs(900)),
        };
        match config.plan_session_with("prod", &options).unwrap() {
            SessionPlan::AssumeRole {
                session_name,
                region,
                duration,
                ..
            } => {
                assert_eq!(session_name, "deploy-42");
                assert_eq!(region.as_deref(), Some("eu-west-1"));
                assert_eq!(duration, Duration::from_secs(900));
            }
            other => panic!("unexpected plan {:?}", other),
        }

        assert!(matches!(
            config.plan_session("dev"),
            Err(BsmError::MissingVariable { .. })
        ));
    }

    #[test]
    fn test_cloud_runtime_uses_default_chain() {
        let config = config_for(RuntimeFlags {
            is_lambda: true,
            ..RuntimeFlags::default()
        });
        assert_eq!(
            config.plan_session("anything").unwrap(),
            SessionPlan::DefaultCredentials { region: None }
        );
    }
}
