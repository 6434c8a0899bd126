pub enum ApiRoute {
    SaveFile,
}

impl ApiRoute {
    /// Path relative to the upload page, as the browser form resolves it.
    pub fn relative(&self) -> &'static str {
        match self {
            ApiRoute::SaveFile => "save_file",
        }
    }

    pub fn route(&self, refreshed: u32) -> String {
        format!("/home/upload/{}/{}", refreshed, self.relative())
    }

    pub fn target_raw(
        &self,
        host: impl AsRef<str>,
        port: u16,
        https: bool,
        refreshed: u32,
    ) -> String {
        let protocol = if https { "https" } else { "http" };
        let route = self.route(refreshed);
        format!("{}://{}:{}{}", protocol, host.as_ref(), port, route)
    }
}
