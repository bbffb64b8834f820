/// Dev server options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "127.0.0.1", "0.0.0.0")
    pub address: String,

    /// Port serving the site
    pub port: u16,

    /// Whether to inject the live-reload client and serve its event stream
    pub livereload: bool,

    /// Port serving the live-reload event stream
    pub livereload_port: u16,

    /// Port serving the build status page
    pub ui_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 4000,
            livereload: true,
            livereload_port: 35729,
            ui_port: 3001,
        }
    }
}

impl ServerConfig {
    /// Get the full address string for a port (e.g., "127.0.0.1:4000")
    pub fn address_string(&self, port: u16) -> String {
        if self.address.contains(':') {
            format!("[{}]:{}", self.address, port)
        } else {
            format!("{}:{}", self.address, port)
        }
    }

    /// Host name browsers should use
    fn browser_host(&self) -> String {
        match self.address.as_str() {
            "127.0.0.1" | "0.0.0.0" | "::" | "::1" => "localhost".to_string(),
            address if address.contains(':') => format!("[{}]", address),
            address => address.to_string(),
        }
    }

    /// Get the site URL (e.g., "http://localhost:4000/")
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.browser_host(), self.port)
    }

    /// Get the status page URL
    pub fn ui_url(&self) -> String {
        format!("http://{}:{}/", self.browser_host(), self.ui_port)
    }

    /// Event stream URL the injected client subscribes to
    pub fn livereload_url(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.browser_host(),
            self.livereload_port,
            crate::server::livereload::LIVERELOAD_PATH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = ServerConfig::default();
        assert_eq!(config.address_string(config.port), "127.0.0.1:4000");
        assert_eq!(config.url(), "http://localhost:4000/");
        assert_eq!(config.ui_url(), "http://localhost:3001/");
        assert_eq!(config.livereload_url(), "http://localhost:35729/__livereload");
    }

    #[test]
    fn test_public_address() {
        let config = ServerConfig {
            address: "192.168.1.5".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(config.url(), "http://192.168.1.5:4000/");

        let v6 = ServerConfig {
            address: "fe80::1".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(v6.address_string(4000), "[fe80::1]:4000");
    }
}
