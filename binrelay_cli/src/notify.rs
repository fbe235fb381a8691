use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::warn;

use common::err::decode_error::RelayError;
use common::err::CResult;

/// POST one JSON document to the sink. Non-200 answers are logged and
/// swallowed so the stream keeps flowing; transport failures surface to
/// the caller (which also just logs them).
pub fn post_binary(client: &Client, url: &str, data: Vec<u8>) -> CResult<()> {
    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(data)
        .send()
        .map_err(|err| RelayError::SinkError(format!("post to {} failed: {}", url, err)))?;

    if response.status().as_u16() != 200 {
        warn!("invalid http response: {}", response.status());
    }

    Ok(())
}
