use tokio::net::TcpListener;

/// Binds the first port in `ports` that is free on `host`.
pub async fn bind_first_available(host: &str, ports: &[u16]) -> anyhow::Result<TcpListener> {
    let mut last_error = None;
    for &port in ports {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) => {
                tracing::warn!(host, port, error = %e, "could not bind, trying next port");
                last_error = Some(e);
            }
        }
    }
    Err(match last_error {
        Some(e) => anyhow::anyhow!("no port available on {} (tried {:?}): {}", host, ports, e),
        None => anyhow::anyhow!("no ports configured"),
    })
}
