use std::collections::HashMap;

/// Source of environment variable values.
pub trait EnvReader: Send + Sync {
    /// Returns `None` when the variable is not set.
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment. Values that are not valid UTF-8 are
/// converted lossily so they still reach format validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvReader for SystemEnv {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl EnvReader for HashMap<String, String> {
    fn get_var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_reader() {
        let mut vars = HashMap::new();
        vars.insert("DEV_AWS_ACCOUNT_ID".to_string(), "123456789012".to_string());

        assert_eq!(vars.get_var("DEV_AWS_ACCOUNT_ID").as_deref(), Some("123456789012"));
        assert_eq!(vars.get_var("PROD_AWS_ACCOUNT_ID"), None);
    }

    #[test]
    fn test_system_reader() {
        std::env::set_var("BSM_SHARED_ENV_READER_TEST", "value");
        assert_eq!(SystemEnv.get_var("BSM_SHARED_ENV_READER_TEST").as_deref(), Some("value"));
        std::env::remove_var("BSM_SHARED_ENV_READER_TEST");
        assert_eq!(SystemEnv.get_var("BSM_SHARED_ENV_READER_TEST"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_reader_non_utf8_value() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        std::env::set_var("BSM_SHARED_NON_UTF8_TEST", OsString::from_vec(vec![0x31, 0xff, 0x32]));
        assert_eq!(SystemEnv.get_var("BSM_SHARED_NON_UTF8_TEST").as_deref(), Some("1\u{fffd}2"));
        std::env::remove_var("BSM_SHARED_NON_UTF8_TEST");
    }
}
