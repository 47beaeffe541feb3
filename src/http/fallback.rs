//! SPA fallback page.
//!
//! Unknown paths are answered locally with the single-page entry document so
//! client-side routing can take over. A pre-built `index.html` from the
//! public directory is preferred; otherwise a minimal page is generated whose
//! module script boots the app through the proxy.

use std::path::Path;

/// The HTML document served for unclassified paths.
#[derive(Debug, Clone)]
pub struct FallbackPage {
    html: String,
    generated: bool,
}

impl FallbackPage {
    /// Load `index.html` from the public directory, or generate one.
    pub fn load(public_dir: &Path) -> Self {
        let index = public_dir.join("index.html");
        match std::fs::read_to_string(&index) {
            Ok(html) => {
                tracing::info!(path = %index.display(), "Using prebuilt fallback page");
                Self {
                    html,
                    generated: false,
                }
            }
            Err(_) => Self {
                html: generate_index(),
                generated: true,
            },
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// True when no prebuilt index was found on disk.
    pub fn is_generated(&self) -> bool {
        self.generated
    }
}

/// Minimal SPA document. The module script resolves through the gateway and
/// is classified as a dev asset, so the generated page still loads the real
/// application bundle.
fn generate_index() -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>devgate</title>\n\
         </head>\n<body>\n<div id=\"root\"></div>\n",
    );
    html.push_str("<script type=\"module\" src=\"/src/main.tsx\"></script>\n");
    html.push_str("</body>\n</html>\n");
    html
}
