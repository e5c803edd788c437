use crate::parse::parse_line;
use crate::request::TileRequest;

/// Builds syntactically valid log lines with chosen fields.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: String,
    pub source_ip: String,
    pub user: String,
    pub map_token: String,
    pub zoom: String,
    pub row: String,
    pub column: String,
    /// `None` for a `.png` tile, `Some(extra)` for `<extra>.grid.json`.
    pub grid_extra: Option<String>,
    pub query: Option<String>,
    pub tail: String,
}

impl Default for LogLine {
    fn default() -> Self {
        Self {
            timestamp: "2015-03-04T10:12:55Z".to_string(),
            source_ip: "83.50.220.41".to_string(),
            user: "documentation".to_string(),
            map_token: "3f3a9a3b3c9c:1425464010917".to_string(),
            zoom: "5".to_string(),
            row: "10".to_string(),
            column: "21".to_string(),
            grid_extra: None,
            query: None,
            tail: "MISS 200".to_string(),
        }
    }
}

impl LogLine {
    pub fn tile(map_token: &str, zoom: u8, row: u32, column: u32) -> Self {
        Self {
            map_token: map_token.to_string(),
            zoom: zoom.to_string(),
            row: row.to_string(),
            column: column.to_string(),
            ..Default::default()
        }
    }

    pub fn from_ip(mut self, ip: &str) -> Self {
        self.source_ip = ip.to_string();
        self
    }

    pub fn at(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn grid(mut self, extra: &str) -> Self {
        self.grid_extra = Some(extra.to_string());
        self
    }

    pub fn path(&self) -> String {
        let resource = match &self.grid_extra {
            Some(extra) => format!("{}/{extra}.grid.json", self.column),
            None => format!("{}.png", self.column),
        };
        let query = self
            .query
            .as_ref()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();

        format!(
            "/{}/api/v1/map/{}/{}/{}/{resource}{query}",
            self.user, self.map_token, self.zoom, self.row
        )
    }

    pub fn render(&self) -> String {
        format!(
            "<134>{} cache-mad2120 fastly[308373]: {} \"-\" \"-\" Wed, 04 Mar 2015 10:12:55 GMT \"GET {} HTTP/1.1\" {}",
            self.timestamp,
            self.source_ip,
            self.path(),
            self.tail
        )
    }

    /// Parses the rendered line, panicking if it is rejected.
    pub fn request(&self) -> TileRequest {
        let line = self.render();
        parse_line(&line).unwrap_or_else(|e| panic!("{line} was rejected: {e}"))
    }
}

/// The three sample lines from the project README: zooms 5, 11 and 0.
pub const README_SAMPLE: &str = r#"<134>2015-03-04T10:12:55Z cache-mad2120 fastly[308373]: 83.50.220.41 "-" "-" Wed, 04 Mar 2015 10:12:55 GMT "GET /documentation/api/v1/map/3f3a9a3b3c9c1b6b2a0c5c1e8a3b0e4d:1425464010917.33/5/10/21.png HTTP/1.1" MISS 200
<134>2015-03-04T10:12:56Z cache-lhr6322 fastly[308373]: 79.148.231.19 "-" "-" Wed, 04 Mar 2015 10:12:56 GMT "GET /documentation/api/v1/map/documentation@tpl_6a7d8f@b4a1c2d3e4f5:1425464123456/11/1021/771/0.grid.json?callback=lgcb_1 HTTP/1.1" MISS, HIT 200
<134>2015-03-04T10:12:57Z cache-mad2120 fastly[308373]: 83.50.220.41 "-" "-" Wed, 04 Mar 2015 10:12:57 GMT "GET /documentation/api/v1/map/3f3a9a3b3c9c1b6b2a0c5c1e8a3b0e4d:1425464010917.33/0/0/0.png HTTP/1.1" HIT 200"#;
