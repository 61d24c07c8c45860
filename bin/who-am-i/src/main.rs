use anyhow::{Context, Result};
use aws_config::SdkConfig;
use bsm_shared::{mask_account_id, mask_arn, EnvironmentConfig, SessionService};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH_VAR: &str = "WHICH_BSM_CONFIG";

/// Settings path from the first argument, falling back to WHICH_BSM_CONFIG
fn config_path() -> Result<String> {
    config_path_from(std::env::args().nth(1), std::env::var(CONFIG_PATH_VAR).ok())
}

fn config_path_from(arg: Option<String>, env_value: Option<String>) -> Result<String> {
    arg.or(env_value)
        .with_context(|| format!("pass a settings file or set {}", CONFIG_PATH_VAR))
}

async fn print_identity(name: &str, sdk_config: &SdkConfig, masked: bool) -> Result<()> {
    let identity = aws_sdk_sts::Client::new(sdk_config)
        .get_caller_identity()
        .send()
        .await
        .with_context(|| format!("GetCallerIdentity failed for {}", name))?;

    let account = identity.account().unwrap_or_default();
    let arn = identity.arn().unwrap_or_default();
    let (account, arn) = if masked {
        (mask_account_id(account), mask_arn(arn))
    } else {
        (account.to_string(), arn.to_string())
    };

    println!("--- {} ---", name);
    println!("  account: {}", account);
    println!("  arn:     {}", arn);
    if let Some(region) = sdk_config.region() {
        println!("  region:  {}", region);
    }
    Ok(())
}

async fn run(service: &SessionService) -> Result<()> {
    let config = service.config();
    let masked = !config.runtime().is_local_runtime_group;

    let mut env_names = vec![config.devops_env_name().to_string()];
    env_names.extend(config.workload_env_names().into_iter().map(str::to_string));

    for env_name in &env_names {
        let plan = config
            .plan_session(env_name)
            .with_context(|| format!("no session plan for {}", env_name))?;
        info!("Session plan for {}: {:?}", env_name, plan);

        let sdk_config = service.sdk_config(env_name).await?;
        print_identity(&format!("bsm_{}", env_name), &sdk_config, masked).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();

    let path = config_path()?;
    let json = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;
    let config = EnvironmentConfig::from_json(&json).with_context(|| format!("invalid settings in {}", path))?;
    info!(
        "Loaded settings from {} - default: {}, devops: {}",
        path,
        config.default_app_env_name(),
        config.devops_env_name()
    );

    let service = SessionService::new(config);
    if let Err(e) = run(&service).await {
        error!("who-am-i failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_precedence() {
        assert_eq!(
            config_path_from(Some("cli.json".to_string()), Some("env.json".to_string())).unwrap(),
            "cli.json"
        );
        assert_eq!(
            config_path_from(None, Some("env.json".to_string())).unwrap(),
            "env.json"
        );

        let err = config_path_from(None, None).unwrap_err();
        assert!(err.to_string().contains(CONFIG_PATH_VAR));
    }
}
