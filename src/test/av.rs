#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use crate::{
        api::{
            AlphaVantageClient, QuoteProvider,
            av::{parse_global_quote, parse_symbol_search},
        },
        config::Config,
        error::ProviderError,
    };

    fn global_quote_body() -> Value {
        json!({
            "Global Quote": {
                "01. symbol": "IBM",
                "02. open": "167.5000",
                "03. high": "169.2300",
                "04. low": "166.8100",
                "05. price": "168.9100",
                "06. volume": "3582512",
                "07. latest trading day": "2024-01-12",
                "08. previous close": "168.0300",
                "09. change": "0.8800",
                "10. change percent": "0.5237%"
            }
        })
    }

    #[test]
    fn parses_global_quote() {
        let quote = parse_global_quote(global_quote_body(), "IBM").unwrap();

        assert_eq!(quote.symbol(), "IBM");
        assert_eq!(*quote.price(), dec!(168.91));
        assert_eq!(*quote.change(), dec!(0.88));
        assert_eq!(*quote.change_percent(), dec!(0.5237));
        assert_eq!(*quote.previous_close(), dec!(168.03));
        assert_eq!(*quote.open(), dec!(167.50));
        assert_eq!(*quote.high(), dec!(169.23));
        assert_eq!(*quote.low(), dec!(166.81));
        assert_eq!(*quote.volume(), 3_582_512);
        assert_eq!(quote.latest_trading_day(), "2024-01-12");
    }

    #[test]
    fn negative_change_percent_keeps_sign() {
        let mut body = global_quote_body();
        body["Global Quote"]["09. change"] = json!("-1.2000");
        body["Global Quote"]["10. change percent"] = json!("-0.7142%");

        let quote = parse_global_quote(body, "IBM").unwrap();

        assert_eq!(*quote.change(), dec!(-1.2));
        assert_eq!(*quote.change_percent(), dec!(-0.7142));
    }

    #[test]
    fn missing_symbol_falls_back_to_request() {
        let mut body = global_quote_body();
        body["Global Quote"]
            .as_object_mut()
            .unwrap()
            .remove("01. symbol");

        let quote = parse_global_quote(body, "ibm").unwrap();

        assert_eq!(quote.symbol(), "IBM");
    }

    #[test]
    fn note_is_quota_exceeded() {
        let body = json!({ "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute." });

        let err = parse_global_quote(body, "IBM").unwrap_err();

        assert!(matches!(err, ProviderError::QuotaExceeded(ref msg) if msg.contains("call frequency")));
        assert!(err.is_soft_failure());
    }

    #[test]
    fn information_is_quota_exceeded() {
        let body = json!({ "Information": "We have detected your API key and our standard API rate limit is 25 requests per day." });

        let err = parse_global_quote(body, "IBM").unwrap_err();

        assert!(matches!(err, ProviderError::QuotaExceeded(_)));
    }

    #[test]
    fn error_message_is_api_error() {
        let body = json!({ "Error Message": "Invalid API call. Please retry or visit the documentation." });

        let err = parse_global_quote(body, "NOPE").unwrap_err();

        assert!(matches!(err, ProviderError::Api(ref msg) if msg.starts_with("Invalid API call")));
    }

    #[test]
    fn empty_global_quote_is_malformed() {
        let err = parse_global_quote(json!({ "Global Quote": {} }), "NOPE").unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
        assert!(!err.is_soft_failure());
    }

    #[test]
    fn missing_global_quote_is_malformed() {
        let err = parse_global_quote(json!({ "Meta Data": {} }), "IBM").unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn missing_price_is_malformed() {
        let mut body = global_quote_body();
        body["Global Quote"]
            .as_object_mut()
            .unwrap()
            .remove("05. price");

        let err = parse_global_quote(body, "IBM").unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn non_numeric_field_rejects_quote() {
        let mut body = global_quote_body();
        body["Global Quote"]["03. high"] = json!("n/a");

        let err = parse_global_quote(body, "IBM").unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(ref msg) if msg.contains("high")));
    }

    #[test]
    fn fractional_volume_rejects_quote() {
        let mut body = global_quote_body();
        body["Global Quote"]["06. volume"] = json!("12.5");

        assert!(parse_global_quote(body, "IBM").is_err());
    }

    #[test]
    fn search_keeps_provider_order() {
        let body = json!({
            "bestMatches": [
                { "1. symbol": "TSCO.LON", "2. name": "Tesco PLC", "3. type": "Equity", "9. matchScore": "0.7273" },
                { "1. symbol": "TSCDF", "2. name": "Tesco plc", "3. type": "Equity", "9. matchScore": "0.7143" },
                { "1. symbol": "TSCDY", "2. name": "Tesco plc", "3. type": "Equity", "9. matchScore": "0.7143" }
            ]
        });

        let matches = parse_symbol_search(body, "tesco").unwrap();
        let symbols: Vec<&str> = matches.iter().map(|m| m.symbol().as_str()).collect();

        assert_eq!(symbols, vec!["TSCO.LON", "TSCDF", "TSCDY"]);
        assert_eq!(matches[0].name(), "Tesco PLC");
    }

    #[test]
    fn search_skips_incomplete_records() {
        let body = json!({
            "bestMatches": [
                { "1. symbol": "BA" },
                { "1. symbol": "BA.LON", "2. name": "BAE Systems plc" }
            ]
        });

        let matches = parse_symbol_search(body, "ba").unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].symbol(), "BA.LON");
    }

    #[test]
    fn search_without_best_matches_fails() {
        assert!(parse_symbol_search(json!({}), "x").is_err());

        let err = parse_symbol_search(json!({ "Note": "limit" }), "x").unwrap_err();
        assert!(matches!(err, ProviderError::QuotaExceeded(_)));
    }

    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: String,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    fn client(base_url: String) -> AlphaVantageClient {
        let config = Config::default()
            .with_api_key("test-key".to_string())
            .with_base_url(base_url);
        AlphaVantageClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn client_requests_global_quote() {
        let (base_url, server) =
            serve_once("200 OK", "application/json", global_quote_body().to_string()).await;

        let quote = client(base_url).fetch_quote("IBM").await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(*quote.price(), dec!(168.91));
        assert!(request_line.starts_with("GET /query?"));
        assert!(request_line.contains("function=GLOBAL_QUOTE"));
        assert!(request_line.contains("symbol=IBM"));
        assert!(request_line.contains("apikey=test-key"));
    }

    #[tokio::test]
    async fn client_requests_symbol_search() {
        let body = json!({
            "bestMatches": [{ "1. symbol": "TSCO.LON", "2. name": "Tesco PLC" }]
        });
        let (base_url, server) = serve_once("200 OK", "application/json", body.to_string()).await;

        let matches = client(format!("{}/", base_url))
            .search_symbol("tesco")
            .await
            .unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(matches.len(), 1);
        assert!(request_line.starts_with("GET /query?"));
        assert!(request_line.contains("function=SYMBOL_SEARCH"));
        assert!(request_line.contains("keywords=tesco"));
        assert!(request_line.contains("apikey=test-key"));
    }

    #[tokio::test]
    async fn client_reports_http_status() {
        let (base_url, server) =
            serve_once("500 Internal Server Error", "text/plain", "oops".to_string()).await;

        let err = client(base_url).fetch_quote("IBM").await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, ProviderError::Status(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn client_reports_non_json_body() {
        let (base_url, server) = serve_once(
            "200 OK",
            "text/html",
            "<html><body>Service Unavailable</body></html>".to_string(),
        )
        .await;

        let err = client(base_url).fetch_quote("IBM").await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, ProviderError::Decode(_)));
        assert!(!err.is_soft_failure());
    }

    #[tokio::test]
    async fn client_reports_quota_marker() {
        let body = json!({ "Note": "Our standard API call frequency is 5 calls per minute." });
        let (base_url, server) = serve_once("200 OK", "application/json", body.to_string()).await;

        let err = client(base_url).fetch_quote("IBM").await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, ProviderError::QuotaExceeded(_)));
    }
}
