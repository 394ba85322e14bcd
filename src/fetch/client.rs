use reqwest::blocking::{Request, Response};

/// Blocking transport seam. Everything the crate sends goes through here, so
/// tests and embedding applications can swap the real client out.
pub trait HttpClient: Send + Sync {
    fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
