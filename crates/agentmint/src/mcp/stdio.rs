use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting AgentMint MCP server with stdio transport...");
        eprintln!();
    }

    let reader = BufReader::new(tokio::io::stdin());
    let answered = serve_lines(reader, tokio::io::stdout(), &global).await?;

    log::debug!("stdin closed after {answered} responses");
    Ok(())
}

/// Answer one JSON-RPC message per input line until EOF.
///
/// Blank lines are skipped and notifications get no reply. Returns the number
/// of responses written.
pub async fn serve_lines<R, W>(mut reader: R, mut writer: W, global: &crate::Global) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    let mut answered = 0;

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("Received: {trimmed}");
        }

        let Some(response) = super::handle_request(trimmed, global).await else {
            continue;
        };
        let response_json = serde_json::to_string(&response)?;

        if global.verbose {
            eprintln!("Sending: {response_json}");
        }

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        answered += 1;
    }

    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> crate::Global {
        crate::Global {
            api_url: crate::config::DEFAULT_API_URL.to_string(),
            timeout: 5,
            verbose: false,
        }
    }

    #[tokio::test]
    async fn test_serve_lines_answers_each_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let mut output = Vec::new();

        let answered = serve_lines(BufReader::new(input.as_bytes()), &mut output, &global())
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(answered, 2);
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(first["result"]["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn test_serve_lines_reports_parse_errors() {
        let mut output = Vec::new();

        serve_lines(BufReader::new("not json\n".as_bytes()), &mut output, &global())
            .await
            .unwrap();

        let response: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(response["error"]["code"], -32700);
    }
}
