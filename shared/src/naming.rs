/// Suffix of the variable holding an environment's AWS account id in CI
pub const ACCOUNT_ID_VAR_SUFFIX: &str = "_AWS_ACCOUNT_ID";

/// Build the `{ENV}_AWS_ACCOUNT_ID` variable name; the label is uppercased
pub fn account_id_var(env_name: &str) -> String {
    format!("{}{}", env_name.to_uppercase(), ACCOUNT_ID_VAR_SUFFIX)
}

/// Workload role name following the {PREFIX}{ENV_NAME}{SUFFIX} pattern
pub fn workload_role_name(prefix: &str, env_name: &str, suffix: &str) -> String {
    format!("{}{}{}", prefix, env_name, suffix)
}

/// IAM role ARN for a role name in the given account
pub fn role_arn(account_id: &str, role_name: &str) -> String {
    format!("arn:aws:iam::{}:role/{}", account_id, role_name)
}

/// Session name used when assuming a role for an environment
pub fn role_session_name(env_name: &str) -> String {
    format!("{}_role_session", env_name)
}
