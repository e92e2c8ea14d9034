//! Dashboard handler — review form, analysis views (tabs, progress bars,
//! charts), and the chat card.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use sentilens_charts::{breakdown, distribution, Chart, NO_DATA_MESSAGE};
use sentilens_common::colors::DEFAULT_ENTITY_COLOR;
use sentilens_common::format::{display_category, percent1, score3};
use sentilens_common::{ChatMessage, ChatRole, ColorMap, NamedEntity, SentilensError, Sentiment};
use serde::Deserialize;

use crate::state::{CurrentAnalysis, SharedState};

pub const VALIDATION_MESSAGE: &str = "Please enter a review.";
pub const CONNECT_ERROR_MESSAGE: &str = "Failed to connect to the server.";

#[derive(Deserialize)]
pub struct AnalyzeForm {
    pub review: String,
}

/// GET / — dashboard with the latest analysis and the chat transcript.
pub async fn dashboard(State(state): State<SharedState>) -> Html<String> {
    let analysis = state.analysis.read().await.clone();
    let transcript = state.transcript.read().await.clone();
    Html(render_page(None, analysis.as_ref(), &transcript))
}

/// POST /analyze — form flow. Empty input short-circuits before any network
/// call; a successful analysis replaces the current slot wholesale (latest
/// response wins).
pub async fn analyze_submit(
    State(state): State<SharedState>,
    Form(form): Form<AnalyzeForm>,
) -> Html<String> {
    if form.review.trim().is_empty() {
        let analysis = state.analysis.read().await.clone();
        let transcript = state.transcript.read().await.clone();
        return Html(render_page(
            Some(VALIDATION_MESSAGE),
            analysis.as_ref(),
            &transcript,
        ));
    }

    let notice = match state.predictor.analyze(&form.review).await {
        Ok(result) => {
            *state.analysis.write().await = Some(CurrentAnalysis {
                review: form.review,
                result,
            });
            None
        }
        Err(SentilensError::Predictor(msg)) => Some(msg),
        Err(err) => {
            tracing::warn!(%err, "predictor request failed");
            Some(CONNECT_ERROR_MESSAGE.to_string())
        }
    };

    let analysis = state.analysis.read().await.clone();
    let transcript = state.transcript.read().await.clone();
    Html(render_page(notice.as_deref(), analysis.as_ref(), &transcript))
}

const STYLE: &str = r#"
    * { box-sizing: border-box; }
    body { margin: 0; padding: 2.5rem 1rem; background: #0f172a; color: #fff;
           font-family: system-ui, -apple-system, sans-serif; }
    .container { max-width: 820px; margin: 0 auto; }
    h1 { color: #facc15; font-size: 2rem; }
    h2 { font-size: 1.2rem; }
    h3 { color: #facc15; font-size: 1rem; margin-bottom: .5rem; }
    textarea, input[type=text] { width: 100%; background: #1f2937; color: #fff;
        border: 1px solid #eab308; border-radius: 6px; padding: .6rem; font-size: .95rem; }
    textarea { min-height: 140px; }
    button { background: #facc15; color: #000; border: none; border-radius: 6px;
        padding: .55rem 1.2rem; font-weight: 600; cursor: pointer; margin-top: .6rem; }
    button:hover { background: #eab308; }
    .alert { background: #7f1d1d; border: 1px solid #ef4444; border-radius: 6px;
        padding: .6rem 1rem; margin: 1rem 0; }
    .card { background: #111827; border: 1px solid #374151; border-radius: 10px;
        padding: 1.4rem; margin-top: 1.6rem; }
    .muted { color: #9ca3af; font-size: .9rem; }
    .sentiment-row { display: flex; justify-content: space-between; align-items: center; }
    .badge { font-size: .8rem; font-weight: 700; padding: .25rem .8rem; border-radius: 999px; }
    .badge-positive { background: #16a34a; }
    .badge-negative { background: #dc2626; }
    .badge-neutral { background: #eab308; color: #000; }
    .progress-track { background: #374151; border-radius: 999px; height: 10px;
        overflow: hidden; flex: 1; }
    .progress-bar { height: 100%; background: #facc15; }
    .score-row { display: flex; align-items: center; gap: .8rem; margin: .45rem 0; }
    .score-label { width: 110px; font-size: .85rem; color: #d1d5db; }
    .score-value { width: 55px; text-align: right; font-size: .85rem; }
    .tabs { display: flex; gap: .4rem; margin-top: 1.2rem; background: #1f2937;
        border-radius: 8px; padding: .3rem; }
    .tab-btn { margin: 0; background: transparent; color: #d1d5db; }
    .tab-btn.active { background: #facc15; color: #000; }
    .tab-pane { display: none; padding-top: 1rem; }
    .tab-pane.active { display: block; }
    .entity-list { list-style: disc; padding-left: 1.2rem; font-size: .9rem; }
    .entity-label { font-weight: 600; }
    .chart { margin-top: 1.2rem; }
    .segment-bar { display: flex; height: 18px; border-radius: 6px; overflow: hidden; }
    .legend { list-style: none; padding: 0; font-size: .85rem; }
    .legend li { margin: .2rem 0; }
    .swatch { display: inline-block; width: 10px; height: 10px; border-radius: 2px;
        margin-right: .5rem; }
    .chart-bar-row { display: flex; align-items: center; gap: .8rem; margin: .3rem 0; }
    .chart-bar-track { flex: 1; background: #374151; border-radius: 4px; height: 14px; }
    .chart-bar { height: 100%; border-radius: 4px; }
    .transcript { max-height: 260px; overflow-y: auto; font-size: .9rem; }
    .chat-turn { margin: .4rem 0; padding: .35rem .7rem; background: #1f2937;
        border-radius: 6px; }
    .chat-user { text-align: right; }
    .download { display: inline-block; margin-top: 1.2rem; background: #facc15;
        color: #000; border-radius: 6px; padding: .5rem 1.1rem; font-weight: 600;
        text-decoration: none; }
"#;

const TAB_SCRIPT: &str = r#"
    document.querySelectorAll('.tab-btn').forEach((btn) => {
        btn.addEventListener('click', () => {
            document.querySelectorAll('.tab-btn').forEach((b) => b.classList.remove('active'));
            document.querySelectorAll('.tab-pane').forEach((p) => p.classList.remove('active'));
            btn.classList.add('active');
            document.getElementById('tab-' + btn.dataset.tab).classList.add('active');
        });
    });
"#;

fn render_page(
    notice: Option<&str>,
    analysis: Option<&CurrentAnalysis>,
    transcript: &[ChatMessage],
) -> String {
    let notice_html = notice
        .map(|msg| format!(r#"<div class="alert">{}</div>"#, escape_html(msg)))
        .unwrap_or_default();
    let review_text = analysis
        .map(|a| escape_html(&a.review))
        .unwrap_or_default();
    let result_html = analysis.map(render_result).unwrap_or_default();
    let transcript_html = render_transcript(transcript);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Sentilens — Review Analyzer</title>
    <style>{style}</style>
</head>
<body>
<div class="container">
    <h1>🛍️ Review Analyzer</h1>
    {notice}
    <form method="POST" action="/analyze">
        <textarea name="review" placeholder="Paste your product review here...">{review}</textarea>
        <button type="submit">Analyze Review</button>
    </form>
    {result}
    <div class="card">
        <h2>💬 Chatbot (Mistral via Ollama)</h2>
        <div class="transcript">{transcript}</div>
        <form method="POST" action="/chat">
            <input type="text" name="message" placeholder="Type your message...">
            <button type="submit">Send</button>
        </form>
    </div>
</div>
<script>{script}</script>
</body>
</html>"#,
        style = STYLE,
        notice = notice_html,
        review = review_text,
        result = result_html,
        transcript = transcript_html,
        script = TAB_SCRIPT,
    )
}

fn render_result(current: &CurrentAnalysis) -> String {
    let result = &current.result;
    let badge_class = match result.sentiment {
        Sentiment::Positive => "badge-positive",
        Sentiment::Negative => "badge-negative",
        Sentiment::Neutral => "badge-neutral",
    };

    let emotion_colors = ColorMap::emotions();
    let toxicity_colors = ColorMap::toxicity();

    let emotions_html = format!(
        "{}{}",
        render_score_bars(&result.emotions, &emotion_colors),
        render_chart(&distribution(
            "Emotion Distribution",
            &result.emotions,
            &emotion_colors,
        )),
    );
    let toxicity_html = format!(
        "{}{}",
        render_score_bars(&result.toxicity, &toxicity_colors),
        render_bar_chart(&breakdown(
            "Toxicity Breakdown",
            &result.toxicity,
            &toxicity_colors,
        )),
    );
    let entities_html = render_entities(&result.entities);

    let language = if result.language.is_empty() {
        "unknown".to_string()
    } else {
        escape_html(&result.language)
    };

    format!(
        r#"<div class="card">
    <div class="sentiment-row">
        <h2>Sentiment:</h2>
        <span class="badge {badge_class}">{sentiment}</span>
    </div>
    <div class="score-row">
        <div class="progress-track"><div class="progress-bar" style="width:{strength:.1}%"></div></div>
    </div>
    <p class="muted">Polarity: {polarity} | Subjectivity: {subjectivity}</p>

    <div class="tabs">
        <button class="tab-btn active" data-tab="emotions">Emotions</button>
        <button class="tab-btn" data-tab="entities">NER</button>
        <button class="tab-btn" data-tab="toxicity">Toxicity</button>
        <button class="tab-btn" data-tab="lang">Translation</button>
    </div>
    <div id="tab-emotions" class="tab-pane active">{emotions}</div>
    <div id="tab-entities" class="tab-pane">{entities}</div>
    <div id="tab-toxicity" class="tab-pane">{toxicity}</div>
    <div id="tab-lang" class="tab-pane">
        <p><strong>Detected Language:</strong> {language}</p>
        <p><strong>Translated Text:</strong> <span class="muted">{translated}</span></p>
    </div>

    <a class="download" href="/report">Download Report (PDF)</a>
</div>"#,
        badge_class = badge_class,
        sentiment = result.sentiment,
        strength = (result.score.abs() * 100.0).clamp(0.0, 100.0),
        polarity = score3(result.score),
        subjectivity = score3(result.subjectivity),
        emotions = emotions_html,
        entities = entities_html,
        toxicity = toxicity_html,
        language = language,
        translated = escape_html(&result.translated_text),
    )
}

/// One labeled progress bar per category, colored via the lookup.
fn render_score_bars(data: &BTreeMap<String, f64>, colors: &ColorMap) -> String {
    if data.is_empty() {
        return r#"<p class="muted">No data available.</p>"#.to_string();
    }
    data.iter()
        .map(|(name, value)| {
            format!(
                r#"<div class="score-row">
    <span class="score-label">{label}</span>
    <div class="progress-track"><div class="progress-bar" style="width:{width:.1}%;background:{color}"></div></div>
    <span class="score-value">{value}</span>
</div>"#,
                label = escape_html(&display_category(name)),
                width = (value * 100.0).clamp(0.0, 100.0),
                color = colors.lookup(name).unwrap_or("#FFFFFF"),
                value = percent1(*value),
            )
        })
        .collect()
}

/// Distribution chart as a proportional segment bar plus a legend. Colors
/// are precomputed per entry by the chart prep.
fn render_chart(chart: &Chart) -> String {
    if chart.is_empty() {
        return format!(
            r#"<div class="chart"><h3>{}</h3><p class="muted">{}</p></div>"#,
            escape_html(&chart.title),
            NO_DATA_MESSAGE,
        );
    }

    let total: f64 = chart.entries.iter().map(|e| e.value).sum();
    let segments: String = chart
        .entries
        .iter()
        .map(|entry| {
            let share = if total > 0.0 {
                entry.value / total * 100.0
            } else {
                0.0
            };
            format!(
                r#"<div class="segment" style="width:{share:.2}%;background:{color}" title="{name} {value:.2}%"></div>"#,
                share = share,
                color = entry.color,
                name = escape_html(&entry.name),
                value = entry.value,
            )
        })
        .collect();
    let legend: String = chart
        .entries
        .iter()
        .map(|entry| {
            format!(
                r#"<li><span class="swatch" style="background:{color}"></span>{name}: {value:.2}%</li>"#,
                color = entry.color,
                name = escape_html(&entry.name),
                value = entry.value,
            )
        })
        .collect();

    format!(
        r#"<div class="chart"><h3>{title}</h3><div class="segment-bar">{segments}</div><ul class="legend">{legend}</ul></div>"#,
        title = escape_html(&chart.title),
        segments = segments,
        legend = legend,
    )
}

/// Breakdown chart as one horizontal bar per category, width = percentage.
fn render_bar_chart(chart: &Chart) -> String {
    if chart.is_empty() {
        return format!(
            r#"<div class="chart"><h3>{}</h3><p class="muted">{}</p></div>"#,
            escape_html(&chart.title),
            NO_DATA_MESSAGE,
        );
    }

    let bars: String = chart
        .entries
        .iter()
        .map(|entry| {
            format!(
                r#"<div class="chart-bar-row">
    <span class="score-label">{name}</span>
    <div class="chart-bar-track"><div class="chart-bar" style="width:{width:.2}%;background:{color}"></div></div>
    <span class="score-value">{value:.2}%</span>
</div>"#,
                name = escape_html(&entry.name),
                width = entry.value.clamp(0.0, 100.0),
                color = entry.color,
                value = entry.value,
            )
        })
        .collect();

    format!(
        r#"<div class="chart"><h3>{title}</h3>{bars}</div>"#,
        title = escape_html(&chart.title),
        bars = bars,
    )
}

fn render_entities(entities: &[NamedEntity]) -> String {
    if entities.is_empty() {
        return r#"<p class="muted">No named entities detected.</p>"#.to_string();
    }
    let colors = ColorMap::entities();
    let items: String = entities
        .iter()
        .map(|entity| {
            format!(
                r#"<li><strong>{text}</strong> <span class="entity-label" style="color:{color}">{label}</span></li>"#,
                text = escape_html(&entity.text),
                color = colors.lookup(&entity.label).unwrap_or(DEFAULT_ENTITY_COLOR),
                label = escape_html(&entity.label),
            )
        })
        .collect();
    format!(r#"<ul class="entity-list">{items}</ul>"#)
}

fn render_transcript(messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return r#"<p class="muted">Ask the assistant about your review.</p>"#.to_string();
    }
    messages
        .iter()
        .map(|msg| {
            let (class, who) = match msg.role {
                ChatRole::User => ("chat-turn chat-user", "You"),
                ChatRole::Assistant => ("chat-turn", "Bot"),
            };
            format!(
                r#"<div class="{class}"><b>{who}:</b> {content}</div>"#,
                class = class,
                who = who,
                content = escape_html(&msg.content),
            )
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
