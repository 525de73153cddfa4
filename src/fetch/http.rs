// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::time::Duration;

use log::debug;
use reqwest::{blocking::Client, StatusCode};

use crate::config::FetchConfig;
use crate::errors::AlignError;
use crate::fetch::{FetchFailureReason, FetchOutcome, RemoteSource, SequenceFetcher};
use crate::seq::fasta::parse_fasta;
use crate::seq::file::SeqFile;

/// Fetches FastA from the UniProt and RCSB web services.
pub struct HttpFetcher {
    client: Client,
    uniprot_url: String,
    pdb_url: String,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, AlignError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AlignError::Config(format!("could not build HTTP client: {e}")))?;
        Ok(HttpFetcher {
            client,
            uniprot_url: config.uniprot_url.clone(),
            pdb_url: config.pdb_url.clone(),
        })
    }

    fn url_for(&self, identifier: &str, source: RemoteSource) -> String {
        let template = match source {
            RemoteSource::UniProt => &self.uniprot_url,
            RemoteSource::Pdb => &self.pdb_url,
        };
        template.replace("{id}", identifier)
    }

    fn get_text(&self, url: &str) -> Result<String, FetchFailureReason> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchFailureReason::Transport(e.to_string()))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchFailureReason::NotFound);
        }
        if !status.is_success() {
            return Err(FetchFailureReason::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|e| FetchFailureReason::Transport(e.to_string()))
    }
}

impl SequenceFetcher for HttpFetcher {
    fn fetch(&self, identifier: &str, source: RemoteSource) -> FetchOutcome {
        let id = identifier.trim().to_uppercase();
        let url = self.url_for(&id, source);
        debug!("GET {}", url);
        match self.get_text(&url).and_then(|body| parse_response(&body)) {
            Ok(records) => FetchOutcome::Success {
                identifier: id,
                records,
            },
            Err(reason) => FetchOutcome::failure(&id, source, reason),
        }
    }
}

/// Turns a response body into records; anything that is not non-empty FastA is malformed.
pub fn parse_response(body: &str) -> Result<SeqFile, FetchFailureReason> {
    if !body.trim_start().starts_with('>') {
        return Err(FetchFailureReason::MalformedResponse(String::from(
            "response is not FASTA",
        )));
    }
    let records =
        parse_fasta(body).map_err(|e| FetchFailureReason::MalformedResponse(e.to_string()))?;
    if records.iter().all(|rec| rec.is_empty()) {
        return Err(FetchFailureReason::MalformedResponse(String::from(
            "response contains no residues",
        )));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    // Answers one request with `status` and `body`, and hands back the request head.
    fn serve_once(status: &str, body: &str) -> (u16, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let reply = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 512];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            stream.write_all(reply.as_bytes()).unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });
        (port, handle)
    }

    fn local_fetcher(port: u16) -> HttpFetcher {
        HttpFetcher {
            client: Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            uniprot_url: format!("http://127.0.0.1:{}/uniprotkb/{{id}}.fasta", port),
            pdb_url: format!("http://127.0.0.1:{}/fasta/entry/{{id}}", port),
        }
    }

    fn failure_reason(outcome: FetchOutcome) -> FetchFailureReason {
        match outcome {
            FetchOutcome::Failure(failure) => failure.reason,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_fetch_success_uppercases_identifier() {
        let (port, server) = serve_once("200 OK", ">sp|P69905|HBA_HUMAN\nMVLSPADKTNV\n");
        let outcome = local_fetcher(port).fetch(" p69905 ", RemoteSource::UniProt);
        match outcome {
            FetchOutcome::Success {
                identifier,
                records,
            } => {
                assert_eq!(identifier, "P69905");
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].header(), "sp|P69905|HBA_HUMAN");
            }
            other => panic!("unexpected {:?}", other),
        }
        let request = server.join().unwrap();
        assert!(request.starts_with("GET /uniprotkb/P69905.fasta HTTP/1.1"));
    }

    #[test]
    fn test_fetch_404_is_not_found() {
        let (port, server) = serve_once("404 Not Found", "");
        let outcome = local_fetcher(port).fetch("9ZZZ", RemoteSource::Pdb);
        assert_eq!(failure_reason(outcome), FetchFailureReason::NotFound);
        assert!(server.join().unwrap().starts_with("GET /fasta/entry/9ZZZ "));
    }

    #[test]
    fn test_fetch_503_keeps_status() {
        let (port, server) = serve_once("503 Service Unavailable", "busy");
        let outcome = local_fetcher(port).fetch("P69905", RemoteSource::UniProt);
        assert_eq!(failure_reason(outcome), FetchFailureReason::Status(503));
        server.join().unwrap();
    }

    #[test]
    fn test_fetch_html_page_is_malformed() {
        let (port, server) = serve_once("200 OK", "<html><body>Maintenance</body></html>");
        let outcome = local_fetcher(port).fetch("P69905", RemoteSource::UniProt);
        assert!(matches!(
            failure_reason(outcome),
            FetchFailureReason::MalformedResponse(_)
        ));
        server.join().unwrap();
    }

    #[test]
    fn test_fetch_closed_port_is_transport_error() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let outcome = local_fetcher(port).fetch("P69905", RemoteSource::UniProt);
        assert!(matches!(
            failure_reason(outcome),
            FetchFailureReason::Transport(_)
        ));
    }

    #[test]
    fn test_url_templates() {
        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        assert_eq!(
            fetcher.url_for("P69905", RemoteSource::UniProt),
            "https://rest.uniprot.org/uniprotkb/P69905.fasta"
        );
        assert_eq!(
            fetcher.url_for("4HHB", RemoteSource::Pdb),
            "https://www.rcsb.org/fasta/entry/4HHB"
        );
    }

    #[test]
    fn test_parse_multichain_response() {
        let body = ">4HHB_1|Chains A, C|Hemoglobin subunit alpha\nVLSPADKTNV\n\
                    >4HHB_2|Chains B, D|Hemoglobin subunit beta\nVHLTPEEKSA\n";
        let records = parse_response(body).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[1].header().starts_with("4HHB_2"));
    }

    #[test]
    fn test_parse_html_response_is_malformed() {
        let err = parse_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchFailureReason::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_header_only_response_is_malformed() {
        assert!(parse_response(">P69905\n").is_err());
    }
}
