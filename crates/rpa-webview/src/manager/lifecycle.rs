use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::Response;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{self, ContentProvider, PROTOCOL_SCHEME};
use crate::ipc::BRIDGE_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the panel WebView as a child of the given window.
    ///
    /// The `window` must implement `raw_window_handle::HasWindowHandle`.
    /// The WebView is positioned at `bounds` within the parent window.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let events = &self.events;

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(true)
            .with_focused(true);

        // panelAPI must exist before any page script runs
        builder = builder.with_initialization_script(BRIDGE_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(events));
        builder = Self::attach_page_load_handler(builder, Arc::clone(events));
        builder = Self::attach_title_handler(builder, Arc::clone(events));
        builder = Self::attach_navigation_handler(builder, Arc::clone(events));
        builder = Self::attach_download_handlers(
            builder,
            Arc::clone(events),
            config.download_dir.clone(),
        );
        builder = self.attach_custom_protocol(builder);

        let initial_url;
        if let Some(url) = &config.url {
            builder = builder.with_url(url);
            initial_url = url.clone();
        } else if let Some(html) = &config.html {
            builder = builder.with_html(html);
            initial_url = "about:blank".to_string();
        } else {
            builder = builder.with_html("<html><body></body></html>");
            initial_url = "about:blank".to_string();
        }

        let webview = builder.build_as_child(window)?;

        debug!(url = %initial_url, "WebView created");

        Ok(WebViewHandle {
            webview,
            current_url: initial_url,
            current_title: String::new(),
        })
    }

    /// Set the content provider for serving bundled assets via `rpa://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    fn attach_custom_protocol<'a>(&self, mut builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        if let Some(provider) = &self.content_provider {
            let cp = Arc::clone(provider);
            builder = builder.with_custom_protocol(
                PROTOCOL_SCHEME.to_string(),
                move |_wv_id, request| {
                    let uri = request.uri().to_string();
                    let path = content::request_path(&uri);
                    let built = match cp.resolve(path) {
                        Some((mime, data)) => Response::builder()
                            .status(200)
                            .header("Content-Type", mime)
                            .header("Access-Control-Allow-Origin", "rpa://localhost")
                            .body(Cow::from(data)),
                        None => {
                            warn!(path = %path, "custom protocol: asset not found");
                            Response::builder()
                                .status(404)
                                .body(Cow::from(b"Not Found".to_vec()))
                        }
                    };
                    built.unwrap_or_else(|e| {
                        warn!(error = %e, "custom protocol: failed to build response");
                        let mut fallback = Response::new(Cow::from(Vec::new()));
                        *fallback.status_mut() = wry::http::StatusCode::INTERNAL_SERVER_ERROR;
                        fallback
                    })
                },
            );
        }
        builder
    }
}
