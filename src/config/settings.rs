use serde::Deserialize;

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub hub: HubSettings,
    pub log: LogSettings,
}

/// Where the WebSocket endpoint listens.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Request path accepted for the WebSocket upgrade.
    pub path: String,
}

/// Broadcast hub tuning.
///
/// `outbound_buffer` and `send_timeout_ms` bound how long a slow connection
/// can hold up a fan-out before it is treated as failed and dropped.
#[derive(Debug, Deserialize, Clone)]
pub struct HubSettings {
    pub max_connections: usize,
    pub outbound_buffer: usize,
    pub send_timeout_ms: u64,
    pub echo_to_sender: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Every field is optional; missing values are filled from `Settings::default()`.
#[derive(Debug, Default, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub hub: Option<PartialHubSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialHubSettings {
    pub max_connections: Option<usize>,
    pub outbound_buffer: Option<usize>,
    pub send_timeout_ms: Option<u64>,
    pub echo_to_sender: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                path: "/ws".to_string(),
            },
            hub: HubSettings::default(),
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            max_connections: 1000,
            outbound_buffer: 64,
            send_timeout_ms: 100,
            echo_to_sender: true,
        }
    }
}

impl Settings {
    /// Overlays whatever `partial` specifies on top of the defaults.
    pub fn merge(partial: PartialSettings) -> Self {
        let default = Settings::default();
        let server = partial.server;
        let hub = partial.hub;
        let log = partial.log;

        Settings {
            server: ServerSettings {
                host: server
                    .as_ref()
                    .and_then(|s| s.host.clone())
                    .unwrap_or(default.server.host),
                port: server
                    .as_ref()
                    .and_then(|s| s.port)
                    .unwrap_or(default.server.port),
                path: server
                    .as_ref()
                    .and_then(|s| s.path.clone())
                    .unwrap_or(default.server.path),
            },
            hub: HubSettings {
                max_connections: hub
                    .as_ref()
                    .and_then(|h| h.max_connections)
                    .unwrap_or(default.hub.max_connections),
                outbound_buffer: hub
                    .as_ref()
                    .and_then(|h| h.outbound_buffer)
                    .unwrap_or(default.hub.outbound_buffer),
                send_timeout_ms: hub
                    .as_ref()
                    .and_then(|h| h.send_timeout_ms)
                    .unwrap_or(default.hub.send_timeout_ms),
                echo_to_sender: hub
                    .as_ref()
                    .and_then(|h| h.echo_to_sender)
                    .unwrap_or(default.hub.echo_to_sender),
            },
            log: LogSettings {
                level: log
                    .and_then(|l| l.level)
                    .unwrap_or(default.log.level),
            },
        }
    }

    /// `host:port` suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
