//! Server-rendered pages. Every interpolated value goes through [`escape`].

use axum::response::Html;

use crate::models::WeatherReport;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title} | Weatherdesk</title>
  <link rel="stylesheet" href="/static/style.css" />
</head>
<body>
  <nav><a href="/">Home</a></nav>
  <main>
{body}
  </main>
</body>
</html>"#,
        title = escape(title),
    ))
}

pub fn home(email: Option<&str>) -> Html<String> {
    let account = match email {
        Some(email) => format!(
            r#"    <p>Logged in as <strong>{}</strong>. <a href="/logout">Log out</a></p>"#,
            escape(email)
        ),
        None => r#"    <p><a href="/login">Log in</a> or <a href="/signup">sign up</a></p>"#.to_string(),
    };

    let body = format!(
        r#"    <h1>Weatherdesk</h1>
{account}
    <form action="/weather" method="get">
      <label for="city">City</label>
      <input id="city" name="city" type="text" required />
      <button type="submit">Get weather</button>
    </form>"#
    );
    layout("Home", &body)
}

pub fn signup() -> Html<String> {
    layout("Sign up", &credentials_form("Sign up", "/signup", None))
}

pub fn login(notice: Option<&str>) -> Html<String> {
    layout("Log in", &credentials_form("Log in", "/login", notice))
}

fn credentials_form(heading: &str, action: &str, notice: Option<&str>) -> String {
    let notice = notice
        .map(|n| format!("    <p class=\"notice\">{}</p>\n", escape(n)))
        .unwrap_or_default();

    format!(
        r#"    <h1>{heading}</h1>
{notice}    <form action="{action}" method="post">
      <label for="email">Email</label>
      <input id="email" name="email" type="email" required />
      <label for="password">Password</label>
      <input id="password" name="password" type="password" required />
      <button type="submit">{heading}</button>
    </form>"#
    )
}

pub fn weather_result(report: &WeatherReport) -> Html<String> {
    let body = format!(
        r#"    <h1>Weather in {city}</h1>
    <dl>
      <dt>Temperature</dt><dd>{temperature}</dd>
      <dt>Conditions</dt><dd>{weather}</dd>
      <dt>Humidity</dt><dd>{humidity}</dd>
      <dt>Wind speed</dt><dd>{wind_speed}</dd>
    </dl>
    <p><a href="/">Search again</a></p>"#,
        city = escape(&report.city),
        temperature = escape(&report.temperature),
        weather = escape(&report.weather),
        humidity = escape(&report.humidity),
        wind_speed = escape(&report.wind_speed),
    );
    layout("Weather", &body)
}

pub fn error_page(message: &str) -> Html<String> {
    let body = format!(
        r#"    <h1>Something went wrong</h1>
    <p class="error">{}</p>
    <p><a href="/">Back to home</a></p>"#,
        escape(message)
    );
    layout("Error", &body)
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
