use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{error, info};

use common::err::decode_error::RelayError;
use common::err::CResult;
use connection::conn::connection::Connection;
use connection::conn::connection_options::ConnectionOptions;

use crate::config::Config;
use crate::notify;

/// Lets in-flight sink traffic settle after a clean end of stream.
const DRAIN_DELAY: Duration = Duration::from_millis(300);

/// Run one CDC session: connect, pick the newest binlog position, stream
/// row events through the filter into the HTTP sink. Returns cleanly when
/// the server ends the stream.
pub fn start(config: &Config) -> CResult<()> {
    let options = ConnectionOptions::new(
        config.mysql.host.clone(),
        config.mysql.port,
        config.mysql.user.clone(),
        config.mysql.pass.clone(),
    );

    let mut conn = Connection::new(options);
    conn.connect()?;
    info!(
        "connected to mysql({}@{}:{})",
        config.mysql.user, config.mysql.host, config.mysql.port
    );

    let (file, position) = newest_binlog_position(&mut conn)?;

    let http = Client::new();
    let result = conn.dump_binlog(&file, position, |event| {
        let rows = match event.rows() {
            Some(rows) if !rows.rows.is_empty() => rows,
            _ => return Ok(()),
        };

        match config.filter.filter_event(rows) {
            Ok(Some(body)) => {
                if let Err(err) = notify::post_binary(&http, &config.dest, body) {
                    error!("data trans failure: {}", err);
                }
            }
            Ok(None) => {}
            Err(err) => error!("data filter failure: {}", err),
        }
        Ok(())
    });

    match result {
        Err(RelayError::BinlogEOF) => {
            info!("binlog stream ended");
            conn.quit()?;
            thread::sleep(DRAIN_DELAY);
            Ok(())
        }
        other => other,
    }
}

/// `SHOW MASTER LOGS` lists `(file, size)` per binlog file; the last row's
/// size is the end of the newest file, where the dump starts.
fn newest_binlog_position(conn: &mut Connection) -> CResult<(String, u32)> {
    let result_set = conn.query("show master logs")?;

    let last_row = result_set.rows.last().ok_or_else(|| {
        RelayError::ConnectionError("server reported no binlog files".to_string())
    })?;

    let file = last_row
        .cells
        .first()
        .and_then(|cell| cell.clone())
        .ok_or_else(|| RelayError::Protocol("missing binlog file name".to_string()))?;
    let position = last_row
        .cells
        .get(1)
        .and_then(|cell| cell.clone())
        .ok_or_else(|| RelayError::Protocol("missing binlog file size".to_string()))?
        .parse::<u32>()?;

    Ok((file, position))
}
