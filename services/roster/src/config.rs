use anyhow::{Context, Result, bail};
use bastion_authz::{IdentityProvider, Role, UserRecord};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_METRICS_BIND: &str = "0.0.0.0:9090";
pub const DEFAULT_REALM: &str = "bastion";

// Roster configuration sourced from environment variables, optionally
// overridden by a yaml file.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub realm: String,
    /// Replaces the built-in demo accounts when non-empty.
    pub users: Vec<UserConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserConfig {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RosterConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    realm: Option<String>,
    users: Option<Vec<UserConfig>>,
}

impl RosterConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("BASTION_ROSTER_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .with_context(|| "parse BASTION_ROSTER_BIND")?;
        let metrics_bind = std::env::var("BASTION_ROSTER_METRICS_BIND")
            .unwrap_or_else(|_| DEFAULT_METRICS_BIND.to_string())
            .parse()
            .with_context(|| "parse BASTION_ROSTER_METRICS_BIND")?;
        let realm =
            std::env::var("BASTION_ROSTER_REALM").unwrap_or_else(|_| DEFAULT_REALM.to_string());
        Ok(Self {
            bind_addr,
            metrics_bind,
            realm,
            users: Vec::new(),
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("BASTION_ROSTER_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read BASTION_ROSTER_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: RosterConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse roster config yaml")?;
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.metrics_bind {
            self.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
        }
        if let Some(value) = override_cfg.realm {
            self.realm = value;
        }
        if let Some(users) = override_cfg.users {
            for user in &users {
                if user.username.trim().is_empty() {
                    bail!("user entries need a username");
                }
                if user.username.contains(':') {
                    bail!("username {} must not contain ':'", user.username);
                }
            }
            self.users = users;
        }
        Ok(())
    }

    /// Build the identity provider for this configuration.
    pub fn identity_provider(&self) -> IdentityProvider {
        if self.users.is_empty() {
            return IdentityProvider::with_default_users();
        }
        IdentityProvider::new(self.users.iter().map(|user| {
            UserRecord::with_password(
                user.username.clone(),
                &user.password,
                user.roles.iter().map(|role| Role::new(role.as_str())),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_authz::Credential;
    use serial_test::serial;

    struct EnvGuard {
        key: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe {
                std::env::set_var(key, value);
            }
            Self { key, prev }
        }

        fn unset(key: &'static str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe {
                std::env::remove_var(key);
            }
            Self { key, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.prev {
                Some(value) => unsafe {
                    std::env::set_var(self.key, value);
                },
                None => unsafe {
                    std::env::remove_var(self.key);
                },
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_without_env() {
        let _g1 = EnvGuard::unset("BASTION_ROSTER_BIND");
        let _g2 = EnvGuard::unset("BASTION_ROSTER_METRICS_BIND");
        let _g3 = EnvGuard::unset("BASTION_ROSTER_REALM");
        let _g4 = EnvGuard::unset("BASTION_ROSTER_CONFIG");

        let config = RosterConfig::from_env_or_yaml().expect("config");
        assert_eq!(config.bind_addr, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(
            config.metrics_bind,
            DEFAULT_METRICS_BIND.parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.realm, DEFAULT_REALM);
        assert!(config.users.is_empty());
        assert_eq!(config.identity_provider().len(), 2);
    }

    #[test]
    #[serial]
    fn env_overrides_and_bad_addresses() {
        let _g1 = EnvGuard::set("BASTION_ROSTER_BIND", "127.0.0.1:7000");
        let _g2 = EnvGuard::set("BASTION_ROSTER_REALM", "shire");
        let config = RosterConfig::from_env().expect("config");
        assert_eq!(config.bind_addr, "127.0.0.1:7000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.realm, "shire");

        let _g3 = EnvGuard::set("BASTION_ROSTER_METRICS_BIND", "not-an-addr");
        let err = RosterConfig::from_env().expect_err("bad addr");
        assert!(err.to_string().contains("BASTION_ROSTER_METRICS_BIND"));
    }

    #[test]
    #[serial]
    fn yaml_file_overrides_env_and_replaces_users() {
        let _g1 = EnvGuard::unset("BASTION_ROSTER_BIND");
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roster.yaml");
        fs::write(
            &path,
            r#"
bind_addr: "127.0.0.1:8181"
realm: "rivendell"
users:
  - username: elrond
    password: vilya
    roles: [ROLE_USER, ROLE_ADMIN]
"#,
        )
        .expect("write yaml");
        let _g2 = EnvGuard::set("BASTION_ROSTER_CONFIG", path.to_str().expect("utf-8 path"));

        let config = RosterConfig::from_env_or_yaml().expect("config");
        assert_eq!(config.bind_addr, "127.0.0.1:8181".parse::<SocketAddr>().unwrap());
        assert_eq!(config.realm, "rivendell");

        let idp = config.identity_provider();
        assert_eq!(idp.len(), 1);
        let elrond = idp
            .authenticate(Some(&Credential::basic("elrond", "vilya")))
            .expect("elrond");
        assert!(elrond.has_role(&Role::admin()));
        assert!(
            idp.authenticate(Some(&Credential::basic("greg", "turnquist")))
                .is_err()
        );
    }

    #[test]
    fn yaml_rejects_bad_usernames() {
        let mut config = RosterConfig {
            bind_addr: DEFAULT_BIND.parse().unwrap(),
            metrics_bind: DEFAULT_METRICS_BIND.parse().unwrap(),
            realm: DEFAULT_REALM.to_string(),
            users: Vec::new(),
        };
        let err = config
            .apply_yaml("users:\n  - username: 'a:b'\n    password: x\n")
            .expect_err("colon");
        assert!(err.to_string().contains("must not contain"));
        assert!(config.apply_yaml("bind_addr: [").is_err());
    }
}
