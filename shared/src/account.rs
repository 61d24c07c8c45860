use crate::{account_id_var, BsmError, BsmResult, EnvReader};

const ACCOUNT_ID_LEN: usize = 12;

/// Read the AWS account id for `env_name` from `{ENV}_AWS_ACCOUNT_ID`.
///
/// The value must be exactly 12 ASCII digits and is returned as read, so
/// leading zeros survive.
pub fn resolve_account_id<R: EnvReader + ?Sized>(reader: &R, env_name: &str) -> BsmResult<String> {
    let key = account_id_var(env_name);
    tracing::debug!("Resolving AWS account id from {}", key);

    let value = reader
        .get_var(&key)
        .ok_or_else(|| BsmError::MissingVariable { key: key.clone() })?;

    if value.chars().count() != ACCOUNT_ID_LEN {
        return Err(BsmError::InvalidFormat {
            value,
            env_name: env_name.to_string(),
            reason: "It should be a 12-digit number.".to_string(),
        });
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(BsmError::InvalidFormat {
            value,
            env_name: env_name.to_string(),
            reason: "It should contain only digits.".to_string(),
        });
    }

    Ok(value)
}
