/// Mask the middle of an AWS account id, keeping the first 2 and last 4 digits
pub fn mask_account_id(account_id: &str) -> String {
    let chars: Vec<char> = account_id.chars().collect();
    if chars.len() <= 6 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 6), tail)
}

/// Mask the account id inside an ARN such as `arn:aws:iam::123456789012:role/x`
pub fn mask_arn(arn: &str) -> String {
    let mut parts: Vec<String> = arn.splitn(6, ':').map(str::to_string).collect();
    if parts.len() == 6 && !parts[4].is_empty() {
        parts[4] = mask_account_id(&parts[4]);
    }
    parts.join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_account_id() {
        assert_eq!(mask_account_id("123456789012"), "12******9012");
        assert_eq!(mask_account_id("12345"), "*****");
        assert_eq!(mask_account_id(""), "");
    }

    #[test]
    fn test_mask_arn() {
        assert_eq!(
            mask_arn("arn:aws:iam::123456789012:role/WorkloadRole-dev-Role"),
            "arn:aws:iam::12******9012:role/WorkloadRole-dev-Role"
        );
        assert_eq!(
            mask_arn("arn:aws:sts::123456789012:assumed-role/r/session"),
            "arn:aws:sts::12******9012:assumed-role/r/session"
        );
        assert_eq!(mask_arn("not-an-arn"), "not-an-arn");
    }
}
