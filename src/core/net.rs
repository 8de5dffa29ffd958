use crate::core::LcError;

/// Read the response body as text, turning a non-2xx status into [`LcError::Status`].
pub(crate) async fn success_text(resp: reqwest::Response) -> Result<String, LcError> {
    let status = resp.status();
    let url = resp.url().to_string();
    if !status.is_success() {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(LcError::Status {
            status: status.as_u16(),
            url,
            body,
        });
    }
    Ok(resp.text().await?)
}

/// Send `req` and read a successful response body.
pub(crate) async fn send_text(req: reqwest::RequestBuilder) -> Result<String, LcError> {
    let resp = req.send().await?;
    success_text(resp).await
}
