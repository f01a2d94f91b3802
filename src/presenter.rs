//! HTML rendering for the search page.
//!
//! Rendering only reads an already computed [`SessionSnapshot`]; nothing
//! here touches the network.

use askama::Template;

use crate::{
    models::{Recommendation, SortOrder},
    services::{PipelineStatus, SessionSnapshot, SortedViews},
};

const LOADING_MARKUP: &str = "<p>Loading Data...</p>";

/// Everything needed to render the full page
pub struct PageContext<'a> {
    pub snapshot: &'a SessionSnapshot,
    pub search_term: &'a str,
    pub limit: &'a str,
    pub sort: SortOrder,
    /// Replaces the session status, e.g. for rejected form input
    pub status_override: Option<String>,
}

#[derive(Template)]
#[template(
    source = "<div class='result'><h2><a target='_blank' href='{{ url }}'>{{ title }}</a></h2><p>Recommendation Count: {{ votes }}</p><a target='_blank' href='{{ reason_url }}'>See Why People Recommend This!</a>{% if let Some(src) = image_url %}<img src='{{ src }}' title='{{ title }}'/>{% endif %}</div>",
    ext = "html"
)]
struct ResultTemplate<'a> {
    title: &'a str,
    url: &'a str,
    votes: u64,
    reason_url: &'a str,
    image_url: Option<&'a str>,
}

struct SortOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Anime Recommendations</title>
</head>
<body>
<header><h1>Anime Recommendations</h1></header>
<form id="searchForm" method="post" action="/search">
<label for="searchterm">Anime title</label>
<input id="searchterm" name="term" type="text" value="{{ term }}" onchange="fetch('/last-search', {method: 'POST', body: new URLSearchParams({term: this.value})})">
<label for="limit">Number of results</label>
<input id="limit" name="limit" type="number" min="1" value="{{ limit }}">
<label for="sorting">Sort by</label>
<select id="sorting" name="sort" onchange="location.href = '/?sort=' + this.value">{% for option in options %}<option value='{{ option.value }}'{% if option.selected %} selected{% endif %}>{{ option.label }}</option>{% endfor %}</select>
<button id="search" type="submit">Find Recommendations</button>
</form>
<div id="status">{% if !status.is_empty() %}<b>{{ status }}</b>{% endif %}</div>
<h2 id="recHeading">{{ heading }}</h2>
<div id="content">{{ content|safe }}</div>
</body>
</html>
"#,
    ext = "html"
)]
struct PageTemplate<'a> {
    term: &'a str,
    limit: &'a str,
    options: Vec<SortOption>,
    status: String,
    heading: String,
    /// Already rendered result markup
    content: String,
}

fn render<T: Template>(template: &T) -> String {
    template.render().unwrap_or_else(|err| {
        tracing::error!(error = %err, "Failed to render template");
        String::new()
    })
}

/// Markup for a single recommendation block
pub fn render_recommendation(rec: &Recommendation) -> String {
    render(&ResultTemplate {
        title: &rec.entry.title,
        url: &rec.entry.url,
        votes: rec.votes,
        reason_url: &rec.url,
        image_url: rec.entry.image_url.as_deref(),
    })
}

/// Markup for every recommendation of one view, in view order
pub fn render_results(views: &SortedViews, order: SortOrder) -> String {
    views.view(order).map(render_recommendation).collect()
}

/// Results region: the chosen view, a loading note, or nothing
pub fn render_results_region(snapshot: &SessionSnapshot, order: SortOrder) -> String {
    match (&snapshot.bundle, &snapshot.status) {
        (Some(bundle), _) => render_results(&bundle.views, order),
        (None, PipelineStatus::Searching { .. }) => LOADING_MARKUP.to_string(),
        (None, _) => String::new(),
    }
}

pub fn status_text(status: &PipelineStatus) -> String {
    match status {
        PipelineStatus::Idle => String::new(),
        PipelineStatus::Searching { query } => format!("Searching for '{}'", query),
        PipelineStatus::Success => "Success!".to_string(),
        PipelineStatus::NoResults { query } => format!("No results found for '{}'", query),
        PipelineStatus::NoRecommendations { query } => {
            format!("No recommendations found for '{}'", query)
        }
        PipelineStatus::Failed { message } => message.clone(),
    }
}

pub fn heading_text(count: usize) -> String {
    format!(
        "Here are {} Recommendations based on the title you entered:",
        count
    )
}

pub fn render_page(ctx: &PageContext<'_>) -> String {
    let status = ctx
        .status_override
        .clone()
        .unwrap_or_else(|| status_text(&ctx.snapshot.status));
    let heading = ctx
        .snapshot
        .bundle
        .as_ref()
        .map(|bundle| heading_text(bundle.views.len()))
        .unwrap_or_default();
    let options = SortOrder::ALL
        .iter()
        .map(|order| SortOption {
            value: order.as_str(),
            label: order.label(),
            selected: *order == ctx.sort,
        })
        .collect();

    render(&PageTemplate {
        term: ctx.search_term,
        limit: ctx.limit,
        options,
        status,
        heading,
        content: render_results_region(ctx.snapshot, ctx.sort),
    })
}
