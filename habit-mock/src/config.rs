/// habit-mock 配置，从环境变量读取
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Listen port
    pub port: u16,
    /// Serve `GET /habits` as a bare array
    pub bare_list: bool,
}

impl MockConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("HABIT_MOCK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            bare_list: std::env::var("HABIT_MOCK_BARE_LIST")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            bare_list: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
