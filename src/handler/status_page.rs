//! Session status page
//!
//! Renders the authenticated-session page for `/secure`. The page links to
//! `/secure/<country>`, so it offers the flag for the caller's own location.

use super::identity::IdentityContext;
use crate::config::StatusPageConfig;
use crate::http::{self, HttpResponse};

/// Serve the status page for `ctx`
pub fn serve_status_page(ctx: &IdentityContext, options: StatusPageConfig) -> HttpResponse {
    http::build_html_response(render_status_page(ctx, options))
}

/// Render the status page document.
///
/// Header values are embedded verbatim unless `escape_html` is set.
pub fn render_status_page(ctx: &IdentityContext, options: StatusPageConfig) -> String {
    if options.escape_html {
        render(
            &escape_html(&ctx.email),
            &escape_html(&ctx.country),
            &ctx.timestamp,
        )
    } else {
        render(&ctx.email, &ctx.country, &ctx.timestamp)
    }
}

/// Escape the characters that are significant in HTML text and attribute values
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[allow(clippy::too_many_lines)]
fn render(email: &str, country: &str, timestamp: &str) -> String {
    format!(
        r##"
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Secure Application Portal</title>

  <style>
    body {{
      margin: 0;
      font-family: "Segoe UI", Roboto, Arial, sans-serif;
      background: linear-gradient(135deg, #0f2027, #203a43, #2c5364);
      height: 100vh;
      display: flex;
      align-items: center;
      justify-content: center;
    }}

    .card {{
      background: #ffffff;
      width: 520px;
      border-radius: 16px;
      box-shadow: 0 25px 50px rgba(0,0,0,0.25);
      padding: 45px 50px;
      text-align: center;
    }}

    .logo {{
      width: 64px;
      height: 64px;
      margin: 0 auto 20px;
    }}

    h1 {{
      margin: 0;
      font-size: 28px;
      color: #1f3c5b;
    }}

    .subtitle {{
      margin-top: 8px;
      color: #6b7280;
      font-size: 15px;
    }}

    .panel {{
      margin-top: 35px;
      background: #f7fafc;
      border-radius: 12px;
      padding: 25px;
      text-align: left;
    }}

    .row {{
      margin-bottom: 18px;
    }}

    .label {{
      font-size: 13px;
      color: #6b7280;
      margin-bottom: 4px;
      display: block;
    }}

    .value {{
      font-size: 15px;
      font-weight: 600;
      color: #111827;
      word-break: break-all;
    }}

    .country-link {{
      color: #2563eb;
      font-weight: 600;
      text-decoration: none;
    }}

    .country-link:hover {{
      text-decoration: underline;
    }}

    .status {{
      margin-top: 28px;
      background: #ecfdf5;
      color: #065f46;
      padding: 14px;
      border-radius: 10px;
      font-weight: 600;
      font-size: 15px;
      text-align: center;
    }}

    .footer {{
      margin-top: 35px;
      font-size: 13px;
      color: #9ca3af;
      text-align: center;
      line-height: 1.6;
    }}
  </style>
</head>

<body>
  <div class="card">

    <!-- Lock Icon -->
    <svg class="logo" viewBox="0 0 24 24" fill="none" stroke="#2563eb" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round">
      <rect x="3" y="11" width="18" height="11" rx="2" ry="2"></rect>
      <path d="M7 11V7a5 5 0 0 1 10 0v4"></path>
    </svg>

    <h1>Secure Application Portal</h1>
    <div class="subtitle">
      Protected by Zero Trust Access
    </div>

    <div class="panel">
      <div class="row">
        <span class="label">Authenticated User</span>
        <span class="value">{email}</span>
      </div>

      <div class="row">
        <span class="label">Authentication Time</span>
        <span class="value">{timestamp}</span>
      </div>

      <div class="row">
        <span class="label">Client Location</span>
        <a class="country-link" href="/secure/{country}">
          {country}
        </a>
      </div>
    </div>

    <div class="status">
      ✔ Authentication successful — Authorized session active
    </div>

    <div class="footer">
      Secured by edge tunnel &amp; Zero Trust
    </div>

  </div>
</body>
</html>
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(email: &str, country: &str) -> IdentityContext {
        IdentityContext {
            email: email.to_string(),
            country: country.to_string(),
            timestamp: "2026-10-18T09:30:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_embeds_identity_values() {
        let html = render_status_page(&ctx("alice@example.com", "JP"), StatusPageConfig::default());
        assert!(html.contains(r#"<span class="value">alice@example.com</span>"#));
        assert!(html.contains(r#"<span class="value">2026-10-18T09:30:00.000Z</span>"#));
        assert!(html.contains(r#"href="/secure/JP""#));
        assert!(html.contains("\n          JP\n"));
        assert!(html.contains("<!DOCTYPE html>"));
        // CSS braces survive formatting
        assert!(html.contains("body {\n      margin: 0;"));
    }

    #[test]
    fn test_verbatim_by_default() {
        let html = render_status_page(
            &ctx("<b>eve</b>@example.com", "\"x"),
            StatusPageConfig::default(),
        );
        assert!(html.contains("<b>eve</b>@example.com"));
        assert!(html.contains(r#"href="/secure/"x""#));
    }

    #[test]
    fn test_escaping_when_enabled() {
        let options = StatusPageConfig { escape_html: true };
        let html = render_status_page(&ctx("<b>eve</b>@example.com", "\"x"), options);
        assert!(html.contains("&lt;b&gt;eve&lt;/b&gt;@example.com"));
        assert!(html.contains(r#"href="/secure/&quot;x""#));
        assert!(!html.contains("<b>eve</b>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b<c>d\"e'f"), "a&amp;b&lt;c&gt;d&quot;e&#39;f");
        assert_eq!(escape_html("plain@example.com"), "plain@example.com");
    }

    #[test]
    fn test_serve_sets_html_content_type() {
        let resp = serve_status_page(&ctx("unknown@user", "UNKNOWN"), StatusPageConfig::default());
        assert_eq!(resp.status(), hyper::StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
    }
}
