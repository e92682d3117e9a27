//! Static informational page served at `/`

use axum::response::Html;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Anime Gateway</title>
<style>
body{font-family:system-ui,sans-serif;margin:0;background:#f8f9fa;color:#343a40;line-height:1.6}
header{background:#343a40;color:#fff;text-align:center;padding:1.5em 0}
main{max-width:48em;margin:1em auto;padding:0 1em}
code{background:#e9ecef;padding:.1em .4em;border-radius:4px}
li{margin-bottom:.4em}
</style>
</head>
<body>
<header><h1>Anime Gateway</h1><p>Cached anime metadata from a video catalog and AniList.</p></header>
<main>
<h2>Routes</h2>
<ul>
<li><code>/home</code> - trending titles from AniList with the popular catalog listing</li>
<li><code>/search/{query}?page={n}</code> - search the catalog</li>
<li><code>/anime/{id}</code> - anime details, falls back to a search when the id is unknown</li>
<li><code>/episode/{id}</code> - episode stream sources</li>
<li><code>/download/{id}</code> - episode download links</li>
<li><code>/recent/{page}</code> - recently released episodes</li>
<li><code>/recommendations/{query}</code> - AniList recommendations for the best match</li>
<li><code>/gogoPopular/{page}</code> - popular titles from the catalog</li>
<li><code>/upcoming/{page}</code> - upcoming titles from AniList</li>
</ul>
<p>Every JSON response is shaped <code>{"results": ...}</code> or <code>{"error": "..."}</code>.</p>
</main>
</body>
</html>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
