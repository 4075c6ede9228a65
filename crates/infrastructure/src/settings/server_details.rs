//! Agent description (`serverDetails.ini`).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bstcheck_domain::{AgentEndpoint, DEFAULT_PORT};
use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;
use tracing::debug;

use super::{ConfigLoadError, ENV_PREFIX};

/// Section holding the agent description.
pub const SERVER_DETAILS_SECTION: &str = "server_details";

/// Platform the agent runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchType {
    /// Simulated switch (`genericx86-64`, or left empty).
    Simulated,
    /// Accton AS5712 hardware.
    As5712,
}

impl SwitchType {
    /// Returns the `switch_type` value naming this platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simulated => "genericx86-64",
            Self::As5712 => "as5712",
        }
    }
}

impl fmt::Display for SwitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchType {
    type Err = ConfigLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "genericx86-64" => Ok(Self::Simulated),
            "as5712" => Ok(Self::As5712),
            other => Err(ConfigLoadError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Contents of the `[server_details]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerDetails {
    /// Platform name; see [`SwitchType`].
    pub switch_type: String,
    /// Agent address.
    pub agent_server_ip: String,
    /// Agent REST port.
    pub agent_server_port: u16,
}

impl Default for ServerDetails {
    fn default() -> Self {
        Self {
            switch_type: String::new(),
            agent_server_ip: "127.0.0.1".to_string(),
            agent_server_port: DEFAULT_PORT,
        }
    }
}

impl ServerDetails {
    /// Returns the platform.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError::UnknownPlatform`] for unknown names.
    pub fn switch(&self) -> Result<SwitchType, ConfigLoadError> {
        self.switch_type.parse()
    }

    /// Returns the agent endpoint.
    #[must_use]
    pub fn endpoint(&self) -> AgentEndpoint {
        AgentEndpoint::new(self.agent_server_ip.trim(), self.agent_server_port)
    }
}

/// Loads `[server_details]` from `path`, then applies `BSTCHECK_*`
/// environment overrides.
///
/// A missing file or section yields the defaults. The platform is validated.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed, a value has the wrong type,
/// or the platform is unknown.
pub fn load_server_details(path: &Path) -> Result<ServerDetails, ConfigLoadError> {
    load_with_env(path, None)
}

/// Reads the overrides from `env` instead of the process environment when set.
fn load_with_env(
    path: &Path,
    env: Option<Map<String, String>>,
) -> Result<ServerDetails, ConfigLoadError> {
    let settings = Config::builder()
        .add_source(File::new(&path.to_string_lossy(), FileFormat::Ini).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        )
        .build()?;

    let details = match settings.get::<ServerDetails>(SERVER_DETAILS_SECTION) {
        Ok(details) => details,
        Err(config::ConfigError::NotFound(_)) => ServerDetails::default(),
        Err(e) => return Err(e.into()),
    };
    let switch = details.switch()?;
    debug!(
        path = %path.display(),
        switch = %switch,
        endpoint = %details.endpoint(),
        "server details loaded"
    );
    Ok(details)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("serverDetails.ini");
        fs::write(&path, contents).expect("write ini");
        path
    }

    #[test]
    fn test_loads_file_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "[server_details]\nswitch_type = as5712\nagent_server_ip = 10.1.2.3\nagent_server_port = 8090\n",
        );

        let details = load_server_details(&path).expect("details");

        assert_eq!(
            details,
            ServerDetails {
                switch_type: "as5712".into(),
                agent_server_ip: "10.1.2.3".into(),
                agent_server_port: 8090,
            }
        );
        assert_eq!(details.switch().ok(), Some(SwitchType::As5712));
        assert_eq!(details.endpoint(), AgentEndpoint::new("10.1.2.3", 8090));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");

        let details = load_server_details(&dir.path().join("absent.ini")).expect("details");

        assert_eq!(details.agent_server_port, 8080);
        assert_eq!(details.switch().ok(), Some(SwitchType::Simulated));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "[server_details]\nagent_server_ip = 10.0.0.9\n");

        let details = load_server_details(&path).expect("details");

        assert_eq!(details.endpoint(), AgentEndpoint::new("10.0.0.9", 8080));
    }

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "[server_details]\nswitch_type = as5712\nagent_server_ip = 10.1.2.3\nagent_server_port = 8090\n",
        );

        let details = load_with_env(
            &path,
            env(&[
                ("BSTCHECK_SERVER_DETAILS__AGENT_SERVER_IP", "10.9.9.9"),
                ("BSTCHECK_SERVER_DETAILS__AGENT_SERVER_PORT", "9100"),
                ("UNRELATED_AGENT_SERVER_PORT", "1"),
            ]),
        )
        .expect("details");

        assert_eq!(details.endpoint(), AgentEndpoint::new("10.9.9.9", 9100));
        assert_eq!(details.switch().ok(), Some(SwitchType::As5712));
    }

    #[test]
    fn test_environment_alone_describes_the_agent() {
        let dir = tempfile::tempdir().expect("tempdir");

        let details = load_with_env(
            &dir.path().join("absent.ini"),
            env(&[("BSTCHECK_SERVER_DETAILS__AGENT_SERVER_IP", "192.0.2.7")]),
        )
        .expect("details");

        assert_eq!(details.endpoint(), AgentEndpoint::new("192.0.2.7", 8080));
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "[server_details]\nswitch_type = tomahawk\n");

        let error = load_server_details(&path).expect_err("unknown platform");

        assert!(matches!(error, ConfigLoadError::UnknownPlatform(ref p) if p == "tomahawk"));
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "[server_details]\nagent_server_port = eighty\n");

        assert!(matches!(
            load_server_details(&path),
            Err(ConfigLoadError::Config(_))
        ));
    }

    #[test]
    fn test_switch_type_parsing() {
        assert_eq!("GenericX86-64".parse::<SwitchType>().ok(), Some(SwitchType::Simulated));
        assert_eq!("".parse::<SwitchType>().ok(), Some(SwitchType::Simulated));
        assert!("td2".parse::<SwitchType>().is_err());
    }
}
