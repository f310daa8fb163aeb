/// Runs blocking HTTP work on a blocking thread so it can talk to a
/// `wiremock::MockServer` living on the test's runtime.
pub async fn off_runtime<T, F>(work: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.unwrap()
}
