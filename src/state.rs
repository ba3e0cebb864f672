use crate::db::OrmConn;

/// Shared handler state. Owns the pooled connection opened at startup.
#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
}

impl AppState {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }

    /// Closes the connection pool. Called once the server has stopped accepting requests.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.orm.close().await?;
        Ok(())
    }
}
