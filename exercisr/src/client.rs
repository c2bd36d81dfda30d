use std::io;

use curl::easy::{Easy, List};
use url::Url;

use data_model::{CommandReply, RadioConfig, Uplink};

/// Outcome of one request: the HTTP status code and the raw response body.
/// The code is reported, never branched on.
pub struct Response {
    pub code: u32,
    pub body: Vec<u8>,
}

impl Response {
    /// The daemon replies with a JSON array of modem response lines. Error
    /// responses carry a different shape and come back as an empty reply.
    pub fn reply(&self) -> CommandReply {
        serde_json::from_slice(&self.body).unwrap_or_default()
    }
}

/// One running lorawanatd instance, addressed by its base URL.
pub struct Daemon {
    base_url: Url,
}

impl Daemon {
    pub fn new(base_url: Url) -> Self {
        Daemon { base_url }
    }

    pub fn status(&self) -> Result<Response, io::Error> {
        self.request("status", None)
    }

    pub fn reset(&self) -> Result<Response, io::Error> {
        self.request("reset", None)
    }

    pub fn hard_reset(&self) -> Result<Response, io::Error> {
        self.request("hard_reset", None)
    }

    pub fn join(&self) -> Result<Response, io::Error> {
        self.request("join", None)
    }

    pub fn configure(&self, radio: &RadioConfig) -> Result<Response, io::Error> {
        let body = serde_json::to_string(radio)?;
        self.request("config/set", Some(&body))
    }

    pub fn query(&self, keys: &[String]) -> Result<Response, io::Error> {
        let body = serde_json::to_string(keys)?;
        self.request("config/get", Some(&body))
    }

    pub fn send(&self, uplink: &Uplink, binary: bool) -> Result<Response, io::Error> {
        let body = serde_json::to_string(uplink)?;
        let path = if binary { "sendb" } else { "send" };
        self.request(path, Some(&body))
    }

    fn endpoint(&self, path: &str) -> Result<Url, io::Error> {
        self.base_url.join(path).map_err(|_| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not build endpoint url from daemon base url",
            )
        })
    }

    /// Issue exactly one request. A body makes it a POST with a json
    /// Content-Type, the daemon only parses bodies sent with that header.
    fn request(&self, path: &str, body: Option<&str>) -> Result<Response, io::Error> {
        let url = self.endpoint(path)?;
        let mut data = Vec::new();
        let mut easy = Easy::new();
        easy.url(url.as_str())?;

        if let Some(body) = body {
            easy.post(true)?;
            let mut headers = List::new();
            headers.append("Content-Type: application/json")?;
            easy.http_headers(headers)?;
            easy.post_fields_copy(body.as_bytes())?;
            easy.post_field_size(body.len() as u64)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|new_data| {
                data.extend_from_slice(new_data);
                Ok(new_data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok(Response { code, body: data })
    }
}

#[cfg(test)]
mod test {
    use url::Url;

    use super::Daemon;

    fn daemon() -> Daemon {
        Daemon::new(Url::parse("http://127.0.0.1:5555/").unwrap())
    }

    #[test]
    fn endpoints_join_base_url() {
        let daemon = daemon();
        assert_eq!(
            daemon.endpoint("status").unwrap().as_str(),
            "http://127.0.0.1:5555/status"
        );
        assert_eq!(
            daemon.endpoint("config/set").unwrap().as_str(),
            "http://127.0.0.1:5555/config/set"
        );
        assert_eq!(
            daemon.endpoint("sendb").unwrap().as_str(),
            "http://127.0.0.1:5555/sendb"
        );
    }

    #[test]
    fn reply_parses_line_array() {
        let response = super::Response {
            code: 200,
            body: b"[\"OK\"]".to_vec(),
        };
        assert_eq!(response.reply().lines, vec!["OK".to_owned()]);
    }

    #[test]
    fn reply_tolerates_error_body() {
        let response = super::Response {
            code: 500,
            body: b"{\"status\":\"ERROR\"}".to_vec(),
        };
        assert!(response.reply().is_empty());
    }
}
