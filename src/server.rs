use crate::cli::OutputFormat;
use crate::error::{ChurnError, Result};
use crate::html;
use crate::report;
use console::style;
use std::fs;
use std::path::Path;
use tiny_http::{Header, Request, Response, Server};

const MAX_BIND_ATTEMPTS: u16 = 20;

/// Serve the materialized artifact until the process is interrupted.
/// One request at a time, each one stateless: read the artifact, encode
/// per the configured format (overridable per request via `?format=`),
/// respond. A bad override gets a 400; the loop keeps running.
pub fn serve(artifact: &Path, format: OutputFormat, start_port: u16) -> Result<()> {
    let (server, port) = bind_with_retry(start_port, MAX_BIND_ATTEMPTS)?;
    println!(
        "{} http://localhost:{}/ ({} to exit)",
        style("Serving results at").bold(),
        port,
        style("Ctrl+C").yellow()
    );

    for request in server.incoming_requests() {
        respond(request, artifact, format);
    }
    Ok(())
}

/// Try `start_port`, `start_port + 1`, ... until a bind succeeds. The
/// attempt counter lives on the stack; there is no shared port state.
fn bind_with_retry(start_port: u16, attempts: u16) -> Result<(Server, u16)> {
    for attempt in 0..attempts {
        let port = start_port.saturating_add(attempt);
        match Server::http(("127.0.0.1", port)) {
            Ok(server) => return Ok((server, port)),
            Err(err) => {
                eprintln!(
                    "{} port {port} unavailable ({err}), trying the next one",
                    style("Warning:").yellow()
                );
            }
        }
    }
    Err(ChurnError::Server(format!(
        "no free port in {}..={}",
        start_port,
        start_port.saturating_add(attempts.saturating_sub(1))
    )))
}

fn respond(request: Request, artifact: &Path, default_format: OutputFormat) {
    let outcome = requested_format(request.url(), default_format)
        .and_then(|format| page(artifact, format));

    let response = match outcome {
        Ok((body, content_type)) => with_content_type(Response::from_data(body), content_type),
        Err(err @ ChurnError::UnsupportedFormat(_)) => {
            Response::from_string(err.to_string()).with_status_code(400)
        }
        Err(err) => Response::from_string(err.to_string()).with_status_code(500),
    };

    // A dropped connection is the client's problem, not ours.
    let _ = request.respond(response);
}

/// The configured format, unless the request carries a `?format=`
/// override. An unrecognized override is the requester's error and must
/// not take the server down.
fn requested_format(url: &str, default: OutputFormat) -> Result<OutputFormat> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("format=") {
            return value.parse();
        }
    }
    Ok(default)
}

fn page(artifact: &Path, format: OutputFormat) -> Result<(Vec<u8>, &'static str)> {
    let bytes = fs::read(artifact)?;
    match format {
        OutputFormat::Json => Ok((bytes, "application/json")),
        OutputFormat::Html => {
            let report = report::deserialize(&bytes)?;
            Ok((html::render(&report)?.into_bytes(), "text/html; charset=utf-8"))
        }
    }
}

fn with_content_type(
    response: Response<std::io::Cursor<Vec<u8>>>,
    content_type: &'static str,
) -> Response<std::io::Cursor<Vec<u8>>> {
    match Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
