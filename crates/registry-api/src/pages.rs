use axum::{Json, response::Html};

use registry_types::api::HealthResponse;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Prom Registry</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
    <h1>Prom Registry</h1>
    <form method="post" action="/submit">
      <label>Name <input name="name" required maxlength="100"></label>
      <label>Instagram <input name="instagram" required maxlength="100" placeholder="@handle"></label>
      <label>Entry number <input name="entry_number" required maxlength="32"></label>
      <label>Gender <input name="gender" required maxlength="32"></label>
      <button type="submit">Register</button>
    </form>
    <p>Your details are encrypted before they are stored.</p>
  </main>
</body>
</html>
"#;

const SUCCESS_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Registered</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
    <h1>You're in!</h1>
    <p>Your registration was received.</p>
    <a href="/">Back</a>
  </main>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn success() -> Html<&'static str> {
    Html(SUCCESS_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
