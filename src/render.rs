use crate::data_models::{Leg, Plan};
use crate::form::FieldId;
use crate::view::{ResultsView, SEARCHING, ViewModel};

pub const EMPTY_STATE: &str = r#"<div class="muted">No plans returned.</div>"#;

const OPTIMIZE_CHOICES: [&str; 4] = ["balanced", "cheapest", "fastest", "greenest"];

/// Inner HTML of the `results` container.
pub fn render_results(results: &ResultsView) -> String {
    match results {
        ResultsView::Cleared => String::new(),
        ResultsView::Plans(plans) if plans.is_empty() => EMPTY_STATE.to_string(),
        ResultsView::Plans(plans) => plans.iter().map(render_plan_card).collect(),
    }
}

pub fn render_plan_card(plan: &Plan) -> String {
    let legs: String = plan.legs.iter().map(render_leg).collect();

    let explanation = match plan.explanation() {
        Some(text) => format!(
            "<details><summary>Explanation</summary><pre>{}</pre></details>",
            html_escape(&text)
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="result">
  <div class="top">
    <div><b>Score:</b> {score}</div>
    <div><b>Price:</b> £{price}</div>
    <div><b>Duration:</b> {duration}m</div>
    <div><b>Emissions:</b> {emissions} kg</div>
    <div><b>Risk:</b> {risk}</div>
  </div>
  <div class="body">
    <ul>{legs}</ul>
    {explanation}
  </div>
</div>"#,
        score = html_escape(&plan.score_text()),
        price = html_escape(&plan.price_text()),
        duration = html_escape(&plan.duration_text()),
        emissions = html_escape(&plan.emissions_text()),
        risk = html_escape(&plan.risk_text()),
    )
}

pub fn render_leg(leg: &Leg) -> String {
    format!(
        r#"<li><b>{from}</b> → <b>{to}</b> <span class="muted">({detail})</span></li>"#,
        from = html_escape(&leg.origin_or_default()),
        to = html_escape(&leg.destination_or_default()),
        detail = html_escape(&leg.detail()),
    )
}

/// The whole page as a function of the view-model.
pub fn render_page(view: &ViewModel) -> String {
    let form = view.form();
    let input = |field: FieldId, label: &str, kind: &str| {
        format!(
            r#"<label for="{id}">{label}</label><input id="{id}" name="{id}" type="{kind}" value="{value}">"#,
            id = field,
            value = attr_escape(form.get(field)),
        )
    };

    let options: String = OPTIMIZE_CHOICES
        .iter()
        .map(|choice| {
            let selected = if form.optimize_for.trim() == *choice {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{choice}"{selected}>{choice}</option>"#)
        })
        .collect();

    let content = format!(
        r#"<form method="post" action="/search" class="search">
  {origin}
  {destination}
  {depart_after}
  {arrive_before}
  {max_layovers}
  <label for="optimize_for">Optimize for</label><select id="optimize_for" name="optimize_for">{options}</select>
  <button id="searchBtn" type="submit">Search</button>
</form>
<h3>Request</h3>
<pre id="requestPreview">{preview}</pre>
<div id="status">{status}</div>
<div id="results">{results}</div>"#,
        origin = input(FieldId::Origin, "Origin", "text"),
        destination = input(FieldId::Destination, "Destination", "text"),
        depart_after = input(FieldId::DepartAfter, "Depart after", "datetime-local"),
        arrive_before = input(FieldId::ArriveBefore, "Arrive before", "datetime-local"),
        max_layovers = input(FieldId::MaxLayovers, "Max layovers", "number"),
        preview = html_escape(view.preview()),
        status = html_escape(&view.status().to_string()),
        results = render_results(view.results()),
    );

    build_page("Search", &content)
}

fn build_page(title: &str, content: &str) -> String {
    let fields = FieldId::ALL
        .iter()
        .map(|f| format!("\"{f}\""))
        .collect::<Vec<_>>()
        .join(",");
    let searching = serde_json::Value::from(SEARCHING);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — Orbital Travel Planner</title>
<link rel="stylesheet" href="/static/app.css">
</head>
<body>
<div class="container">
<h1>Orbital Travel Planner</h1>
{content}
</div>
<script>
const fields = [{fields}];
let previewSeq = 0;
function refreshPreview() {{
  const seq = ++previewSeq;
  const form = {{}};
  fields.forEach(id => {{ form[id] = document.getElementById(id).value; }});
  fetch("/api/preview", {{
    method: "POST",
    headers: {{"Content-Type": "application/json"}},
    body: JSON.stringify(form),
  }})
    .then(r => r.text())
    .then(text => {{
      // Only the latest keystroke's preview is shown.
      if (seq === previewSeq) document.getElementById("requestPreview").textContent = text;
    }});
}}
fields.forEach(id => document.getElementById(id).addEventListener("input", refreshPreview));
document.querySelector("form.search").addEventListener("submit", () => {{
  document.getElementById("status").textContent = {searching};
  document.getElementById("results").innerHTML = "";
}});
</script>
</body>
</html>"#,
        title = html_escape(title),
    )
}

/// Escapes the three characters that can open markup in text content.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn attr_escape(s: &str) -> String {
    html_escape(s).replace('"', "&quot;").replace('\'', "&#39;")
}
