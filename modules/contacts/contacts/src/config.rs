use serde::{Deserialize, Serialize};

/// Configuration for the contacts module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactsConfig {
    /// `limit` used when a list or search request does not provide one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// `days` used when a birthdays request does not provide one.
    #[serde(default = "default_birthday_window_days")]
    pub default_birthday_window_days: u32,
    #[serde(default = "default_max_birthday_window_days")]
    pub max_birthday_window_days: u32,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_birthday_window_days: default_birthday_window_days(),
            max_birthday_window_days: default_max_birthday_window_days(),
        }
    }
}

impl ContactsConfig {
    /// Check that the defaults fit inside their configured maximums.
    ///
    /// # Errors
    /// Returns an error naming the first inconsistent setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_page_size == 0 {
            anyhow::bail!("contacts.max_page_size must be greater than zero");
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            anyhow::bail!(
                "contacts.default_page_size must be between 1 and {}",
                self.max_page_size
            );
        }
        if self.default_birthday_window_days > self.max_birthday_window_days {
            anyhow::bail!(
                "contacts.default_birthday_window_days must not exceed {}",
                self.max_birthday_window_days
            );
        }
        Ok(())
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    500
}

fn default_birthday_window_days() -> u32 {
    7
}

fn default_max_birthday_window_days() -> u32 {
    365
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: ContactsConfig = serde_json::from_str(r#"{"max_page_size": 50}"#).unwrap();
        assert_eq!(cfg.max_page_size, 50);
        assert_eq!(cfg.default_page_size, 10);
        assert_eq!(cfg.default_birthday_window_days, 7);
        assert_eq!(cfg.max_birthday_window_days, 365);
    }

    #[test]
    fn defaults_are_valid() {
        ContactsConfig::default().validate().unwrap();
    }

    #[test]
    fn default_page_size_above_max_is_invalid() {
        let cfg = ContactsConfig {
            default_page_size: 600,
            ..ContactsConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("default_page_size"));
    }

    #[test]
    fn default_window_above_max_is_invalid() {
        let cfg = ContactsConfig {
            default_birthday_window_days: 30,
            max_birthday_window_days: 14,
            ..ContactsConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res = serde_json::from_str::<ContactsConfig>(r#"{"page_size": 50}"#);
        assert!(res.is_err());
    }
}
