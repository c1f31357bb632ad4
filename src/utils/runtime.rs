use anyhow::Result;


/// The whole run is one sequential pipeline, so a current-thread runtime is enough.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
