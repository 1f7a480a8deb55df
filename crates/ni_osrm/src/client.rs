use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::{OsrmError, durations_table::DurationsTable, points::format_points};

pub const OSRM_TABLE_API_PATH: &str = "/table/v1/";

pub struct OsrmTableClientParams {
    pub osrm_url: String,
    pub profile: String,
}

#[derive(Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    durations: Option<DurationsTable>,
}

pub struct OsrmTableClient {
    params: OsrmTableClientParams,
    client: reqwest::Client,
}

/// Turns a table service reply into its durations. A non-2xx status, an
/// OSRM `code` other than `Ok` or a reply without durations is an error.
pub fn parse_table_response(status: StatusCode, body: &[u8]) -> Result<DurationsTable, OsrmError> {
    if !status.is_success() {
        return Err(OsrmError::Api {
            status: status.as_u16(),
            message: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let table: OsrmTableResponse = serde_json::from_slice(body)?;

    if table.code != "Ok" {
        return Err(OsrmError::Service {
            code: table.code,
            message: table.message.unwrap_or_default(),
        });
    }

    table.durations.ok_or(OsrmError::IncompleteResponse)
}

impl OsrmTableClient {
    pub fn new(params: OsrmTableClientParams) -> Self {
        Self::with_client(params, reqwest::Client::new())
    }

    pub fn with_client(params: OsrmTableClientParams, client: reqwest::Client) -> Self {
        Self { params, client }
    }

    pub fn table_url<P>(&self, points: &[P]) -> String
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let mut url = self.params.osrm_url.trim_end_matches('/').to_string();
        url.push_str(OSRM_TABLE_API_PATH);
        url.push_str(&self.params.profile);
        url.push('/');
        url.push_str(&format_points(points));

        url
    }

    /// Requests the all-to-all durations matrix for `points`.
    pub async fn fetch_durations<P>(&self, points: &[P]) -> Result<DurationsTable, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let url = self.table_url(points);

        debug!(points = points.len(), "OSRM: Requesting durations table");

        let response = self
            .client
            .get(url)
            .query(&[("annotations", "duration"), ("skip_waypoints", "true")])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        parse_table_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;
    use crate::points::LonLat;

    fn params(osrm_url: &str) -> OsrmTableClientParams {
        OsrmTableClientParams {
            osrm_url: osrm_url.to_string(),
            profile: String::from("driving"),
        }
    }

    /// Answers a single request on a local port with the given status line and body.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{address}")
    }

    fn local_client(osrm_url: &str) -> OsrmTableClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        OsrmTableClient::with_client(params(osrm_url), client)
    }

    #[test]
    fn test_table_url() {
        let client = OsrmTableClient::new(params("http://localhost:5000/"));

        let url = client.table_url(&[LonLat::new(-5.93, 54.6), LonLat::new(-6.5, 54.25)]);

        assert_eq!(
            url,
            "http://localhost:5000/table/v1/driving/-5.93,54.6;-6.5,54.25"
        );
    }

    #[test]
    fn test_parse_table_response() {
        let table = parse_table_response(
            StatusCode::OK,
            br#"{"code":"Ok","durations":[[0.0,61.2],[59.8,null]]}"#,
        )
        .unwrap();

        assert_eq!(
            table.rows(),
            &[vec![Some(0.0), Some(61.2)], vec![Some(59.8), None]]
        );
    }

    #[test]
    fn test_non_success_status_is_an_error() {
        let result = parse_table_response(StatusCode::NOT_FOUND, b"Not Found");

        match result {
            Err(OsrmError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[test]
    fn test_service_error_code() {
        let result = parse_table_response(
            StatusCode::OK,
            br#"{"code":"NoTable","message":"No table found"}"#,
        );

        match result {
            Err(OsrmError::Service { code, message }) => {
                assert_eq!(code, "NoTable");
                assert_eq!(message, "No table found");
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_durations() {
        let result = parse_table_response(StatusCode::OK, br#"{"code":"Ok"}"#);

        assert!(matches!(result, Err(OsrmError::IncompleteResponse)));
    }

    #[test]
    fn test_malformed_body() {
        let result = parse_table_response(StatusCode::OK, b"<html></html>");

        assert!(matches!(result, Err(OsrmError::Deserialize(_))));
    }

    #[tokio::test]
    async fn test_fetch_durations() {
        let url = serve_once("200 OK", r#"{"code":"Ok","durations":[[0,12.5],[13,0]]}"#).await;

        let table = local_client(&url)
            .fetch_durations(&[LonLat::new(-5.93, 54.6), LonLat::new(-6.5, 54.25)])
            .await
            .unwrap();

        assert_eq!(table.num_origins(), 2);
        assert_eq!(table.rows()[0][1], Some(12.5));
    }

    #[tokio::test]
    async fn test_fetch_durations_fails_on_status() {
        let url = serve_once(
            "400 Bad Request",
            r#"{"code":"InvalidQuery","message":"Query string malformed"}"#,
        )
        .await;

        let result = local_client(&url)
            .fetch_durations(&[LonLat::new(-5.93, 54.6)])
            .await;

        assert!(matches!(result, Err(OsrmError::Api { status: 400, .. })));
    }
}
