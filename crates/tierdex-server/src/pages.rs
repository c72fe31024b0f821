//! HTML shells for the browser client.
//!
//! Rendering happens client-side in `/static/script.js`; these pages only
//! provide the element hooks and tell the script which generation to load
//! and whether a session is present.

use axum::{
  extract::Path,
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use tierdex_api::SessionUser;

const GENERATIONS: u32 = 9;
const TIERS: [&str; 6] = ["S", "A", "B", "C", "D", "F"];

/// `GET /`
pub async fn index() -> Html<String> {
  let links: String = (1..=GENERATIONS)
    .map(|g| format!("<li><a href=\"/gen/{g}\">Generation {g}</a></li>"))
    .collect();

  Html(format!(
    "<!doctype html>
<html>
<head><meta charset=\"utf-8\"><title>Tierdex</title></head>
<body>
<h1>Tierdex</h1>
<ul>{links}</ul>
</body>
</html>"
  ))
}

/// `GET /gen/{generation}` — 404 for generation 0.
///
/// The shell exposes the globals and element ids `static/script.js` drives:
/// `CURRENT_GENERATION`, `USER_LOGGED_IN`, the side panel
/// (`#current-name`, `#current-image`, `#current-position`, `#buttons`,
/// `#reset-list`), one `.rank_button[data-tier=N]` per tier, and tier rows
/// with ids `tier-N`, numbered from 1 for the top tier.
pub async fn generation(
  SessionUser(user): SessionUser,
  Path(generation): Path<u32>,
) -> Response {
  if generation == 0 {
    return (StatusCode::NOT_FOUND, Html("<h1>Not Found</h1>")).into_response();
  }

  let logged_in = user.is_some();

  let tiers: String = TIERS
    .iter()
    .zip(1..)
    .map(|(label, n)| {
      format!(
        "<div class=\"tier\" id=\"tier-{n}\"><span class=\"tier-label\">{label}</span>\
         <div class=\"tier-content\"></div></div>"
      )
    })
    .collect();

  let buttons: String = TIERS
    .iter()
    .zip(1..)
    .map(|(label, n)| format!("<button class=\"rank_button\" data-tier=\"{n}\">{label}</button>"))
    .collect();

  let account = if logged_in {
    "<button id=\"logout\" onclick=\"logout().then(() => location.reload())\">Log out</button>"
  } else {
    ""
  };

  Html(format!(
    "<!doctype html>
<html>
<head><meta charset=\"utf-8\"><title>Tierdex: Generation {generation}</title></head>
<body>
<h1>Generation {generation}</h1>
{account}
<div id=\"side-panel\">
<img id=\"current-image\" src=\"\" alt=\"\">
<p id=\"current-name\"></p>
<p id=\"current-position\"></p>
<div id=\"buttons\">{buttons}</div>
<button id=\"reset-list\">Reset</button>
</div>
<div id=\"tiers\">{tiers}</div>
<script>
const CURRENT_GENERATION = {generation};
const USER_LOGGED_IN = {logged_in};
</script>
<script src=\"/static/script.js\"></script>
</body>
</html>"
  ))
  .into_response()
}
