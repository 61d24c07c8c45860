use aws_config::sts::AssumeRoleProvider;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::{BsmError, BsmResult, EnvironmentConfig, SessionOptions, SessionPlan};

/// Loads and caches one `SdkConfig` per environment
pub struct SessionService {
    config: EnvironmentConfig,
    sessions: Mutex<HashMap<String, SdkConfig>>,
}

impl SessionService {
    pub fn new(config: EnvironmentConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// SDK config of the devops environment
    pub async fn devops_sdk_config(&self) -> BsmResult<SdkConfig> {
        let devops = self.config.devops_env_name().to_string();
        self.sdk_config(&devops).await
    }

    /// SDK config of the default application environment
    pub async fn default_sdk_config(&self) -> BsmResult<SdkConfig> {
        let default = self.config.default_app_env_name().to_string();
        self.sdk_config(&default).await
    }

    /// Load the SDK config for `env_name`, reusing an earlier load if there is one
    pub async fn sdk_config(&self, env_name: &str) -> BsmResult<SdkConfig> {
        self.sdk_config_with(env_name, &SessionOptions::default()).await
    }

    /// Like [`sdk_config`](Self::sdk_config) with assume-role overrides.
    ///
    /// The cache is keyed by environment name only, so the options apply to
    /// the first load of an environment.
    pub async fn sdk_config_with(&self, env_name: &str, options: &SessionOptions) -> BsmResult<SdkConfig> {
        if let Some(cached) = self.sessions.lock().await.get(env_name) {
            return Ok(cached.clone());
        }

        let plan = self.config.plan_session_with(env_name, options)?;
        let sdk_config = match plan {
            SessionPlan::AssumeRole {
                role_arn,
                session_name,
                region,
                duration,
            } => {
                let base = self.base_sdk_config().await?;
                tracing::info!("Assuming role {} for environment {}", role_arn, env_name);

                let mut builder = AssumeRoleProvider::builder(role_arn)
                    .session_name(session_name)
                    .session_length(duration)
                    .configure(&base);
                if let Some(region) = region.clone() {
                    builder = builder.region(Region::new(region));
                }
                let provider = builder.build().await;

                let mut loader = aws_config::defaults(BehaviorVersion::latest()).credentials_provider(provider);
                if let Some(region) = region {
                    loader = loader.region(Region::new(region));
                }
                loader.load().await
            }
            SessionPlan::Profile { profile, region } => load_profile(&profile, &region).await,
            SessionPlan::DefaultCredentials { region } => load_default(region.as_deref()).await,
        };

        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .entry(env_name.to_string())
            .or_insert(sdk_config);
        Ok(entry.clone())
    }

    /// Environments with a cached SDK config, sorted
    pub async fn cached_env_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sessions.lock().await.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Credentials the workload roles are assumed from
    async fn base_sdk_config(&self) -> BsmResult<SdkConfig> {
        let devops = self.config.devops_env_name();
        if let Some(cached) = self.sessions.lock().await.get(devops) {
            return Ok(cached.clone());
        }

        let sdk_config = match self.config.plan_session(devops)? {
            SessionPlan::Profile { profile, region } => load_profile(&profile, &region).await,
            SessionPlan::DefaultCredentials { region } => load_default(region.as_deref()).await,
            SessionPlan::AssumeRole { .. } => {
                return Err(BsmError::InvalidOperation(format!(
                    "devops environment '{}' cannot assume a workload role",
                    devops
                )))
            }
        };

        let mut sessions = self.sessions.lock().await;
        Ok(sessions
            .entry(devops.to_string())
            .or_insert(sdk_config)
            .clone())
    }
}

async fn load_profile(profile: &str, region: &str) -> SdkConfig {
    tracing::info!("Loading AWS profile {} in {}", profile, region);
    aws_config::defaults(BehaviorVersion::latest())
        .profile_name(profile)
        .region(Region::new(region.to_string()))
        .load()
        .await
}

async fn load_default(region: Option<&str>) -> SdkConfig {
    let loader = aws_config::defaults(BehaviorVersion::latest());
    match region {
        Some(region) => {
            tracing::info!("Loading default AWS credentials in {}", region);
            loader.region(Region::new(region.to_string())).load().await
        }
        None => {
            tracing::info!("Loading default AWS credentials");
            loader.load().await
        }
    }
}
