/// Attach a protocol to a host and port.
pub fn derive_http_url(host: &str, port: &str) -> String {
    let protocol = match port {
        "443" | "4443" => "https",
        _ => "http",
    };

    format!("{protocol}://{host}:{port}")
}
