use std::net::IpAddr;

use regex::Regex;

#[derive(Debug)]
pub struct DemoConfig {
    pub port: i64,
    pub base_url: String,
    pub r#match: Vec<Regex>,
    pub order: Vec<String>,
    pub hosts: Vec<String>,
    pub address: Option<IpAddr>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            base_url: "http://localhost".into(),
            r#match: Vec::new(),
            order: vec!["deny".into(), "allow".into()],
            hosts: Vec::new(),
            address: None,
        }
    }
}

lineconf::target!(DemoConfig {
    port,
    base_url,
    r#match: list,
    order: list,
    hosts: list,
    address,
});
