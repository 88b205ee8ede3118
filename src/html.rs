//! HTML dashboard generation with Chart.js visualizations
//!
//! Serializes a rendered [`Document`] into a standalone page. Slots absent
//! from the document are left out of the page.

use crate::chart::ConstructedChart;
use crate::viewport::{Document, Node, Slot};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write a dashboard page to `path`
pub fn generate(
    path: &Path,
    doc: &Document,
    charts: &[ConstructedChart],
    title: &str,
) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer, doc, charts, title)?;
    writer.flush()
}

pub fn write<W: Write>(
    writer: &mut W,
    doc: &Document,
    charts: &[ConstructedChart],
    title: &str,
) -> io::Result<()> {
    let chart_data = build_chart_data(charts)?;

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        :root {{
            --bg: #f5f5f7;
            --card: #ffffff;
            --border: #d2d2d7;
            --text: #1d1d1f;
            --dim: #86868b;
            --high: #ff3b30;
            --medium: #ff9f0a;
            --low: #34c759;
            --accent: #007aff;
            --shadow: 0 2px 8px rgba(0,0,0,0.08), 0 1px 2px rgba(0,0,0,0.04);
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Helvetica Neue', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 2.5rem 2rem; }}

        /* Header */
        .header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 2rem;
            padding-bottom: 1.25rem;
            border-bottom: 1px solid var(--border);
        }}
        .title {{ font-size: 1.875rem; font-weight: 700; letter-spacing: -0.02em; }}
        .subtitle {{ color: var(--dim); font-size: 0.9375rem; }}

        /* Severity badge */
        .severity-badge {{
            padding: 0.5rem 1rem;
            border-radius: 999px;
            font-weight: 600;
            font-size: 0.875rem;
        }}
        .severity-high {{ background: rgba(255,59,48,0.12); color: #c9302c; }}
        .severity-medium {{ background: rgba(255,159,10,0.12); color: #b36b00; }}
        .severity-low {{ background: rgba(52,199,89,0.12); color: #1d8348; }}

        /* Stats Row */
        .stats {{
            display: grid;
            grid-template-columns: repeat(4, 1fr);
            gap: 1.25rem;
            margin-bottom: 2rem;
        }}
        .card {{
            background: var(--card);
            border-radius: 16px;
            padding: 1.5rem;
            box-shadow: var(--shadow);
        }}
        .stat {{ text-align: center; }}
        .stat-value {{ font-size: 2.25rem; font-weight: 600; line-height: 1; }}
        .stat-label {{ color: var(--dim); font-size: 0.75rem; font-weight: 500; text-transform: uppercase; letter-spacing: 0.04em; margin-top: 0.5rem; }}

        /* Grids */
        .grid {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; margin-bottom: 2rem; }}
        .card-title {{ font-size: 0.9375rem; font-weight: 600; margin-bottom: 1rem; }}
        .card img {{ width: 100%; border-radius: 10px; }}

        /* Insights */
        .insights {{ padding-left: 1.25rem; }}
        .insights li {{ margin-bottom: 0.5rem; }}

        /* Timeline */
        .timeline {{ border-left: 2px solid var(--border); padding-left: 1.25rem; }}
        .timeline-item {{ position: relative; margin-bottom: 1.25rem; }}
        .timeline-dot {{
            position: absolute;
            left: -1.7rem;
            top: 0.35rem;
            width: 12px;
            height: 12px;
            border-radius: 50%;
            background: var(--accent);
        }}
        .fw-semibold {{ font-weight: 600; }}
        .mb-1 {{ margin-bottom: 0.25rem; }}
        .text-muted {{ color: var(--dim); font-size: 0.875rem; }}

        .footer {{ color: var(--dim); font-size: 0.75rem; text-align: center; margin-top: 2rem; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div>
                <div class="title">{title}</div>
                {location}
                {capture}
            </div>
            {badge}
        </div>

        <div class="stats">
            {sev_score}
            {damage}
            {buildings}
            {population}
        </div>

        <div class="grid">
            <div class="card"><div class="card-title">Original Imagery</div>{original}</div>
            <div class="card"><div class="card-title">Damage Mask</div>{masked}</div>
        </div>

        <div class="grid">
            <div class="card"><div class="card-title">Damaged vs. Undamaged Area</div>{pie}</div>
            <div class="card"><div class="card-title">Infrastructure Impact</div>{bar}</div>
        </div>

        <div class="grid">
            <div class="card"><div class="card-title">Key Observations</div>{insights}</div>
            <div class="card"><div class="card-title">Severity Breakdown</div>{timeline}</div>
        </div>

        <div class="footer">Generated by floodview</div>
    </div>

    <script>
    const charts = {chart_data};

    for (const chart of charts) {{
        const canvas = document.getElementById(chart.canvas);
        if (!canvas || typeof Chart === 'undefined') continue;
        const config = chart.config;
        const tooltip = config.options && config.options.plugins && config.options.plugins.tooltip;
        if (tooltip && tooltip.labelTemplate) {{
            const template = tooltip.labelTemplate;
            tooltip.callbacks = {{
                label: (context) => template
                    .replace('{{label}}', context.label)
                    .replace('{{value}}', context.parsed)
            }};
        }}
        new Chart(canvas, config);
    }}
    </script>
</body>
</html>
"#,
        title = escape_html(title),
        location = render_slot(doc, Slot::LocationLabel, "div", "subtitle"),
        capture = render_slot(doc, Slot::CaptureTime, "div", "subtitle"),
        badge = render_slot(doc, Slot::SeverityBadge, "span", "severity-badge"),
        sev_score = stat_card(doc, Slot::SevScore, "Severity Score"),
        damage = stat_card(doc, Slot::DamagePercent, "Area Damaged"),
        buildings = stat_card(doc, Slot::BuildingsAffected, "Buildings Affected"),
        population = stat_card(doc, Slot::PopulationAtRisk, "Population at Risk"),
        original = render_slot(doc, Slot::OriginalImage, "img", ""),
        masked = render_slot(doc, Slot::MaskedImage, "img", ""),
        pie = render_slot(doc, Slot::DamagePieChart, "canvas", ""),
        bar = render_slot(doc, Slot::ImpactBarChart, "canvas", ""),
        insights = render_slot(doc, Slot::InsightsList, "ul", "insights"),
        timeline = render_slot(doc, Slot::SeverityTimeline, "div", "timeline"),
        chart_data = chart_data,
    )?;

    Ok(())
}

fn stat_card(doc: &Document, slot: Slot, label: &str) -> String {
    if !doc.contains(slot) {
        return String::new();
    }
    format!(
        r#"<div class="card stat">{}<div class="stat-label">{}</div></div>"#,
        render_slot(doc, slot, "div", "stat-value"),
        escape_html(label)
    )
}

/// Serialize one slot as an element carrying its id; empty if absent
fn render_slot(doc: &Document, slot: Slot, tag: &str, base_class: &str) -> String {
    let Some(state) = doc.slot(slot) else {
        return String::new();
    };

    let mut classes: Vec<&str> = base_class.split_whitespace().collect();
    classes.extend(state.classes.iter().map(|c| c.as_str()));

    let mut html = String::new();
    let _ = write!(html, r#"<{} id="{}""#, tag, slot.id());
    if !classes.is_empty() {
        let _ = write!(html, r#" class="{}""#, escape_html(&classes.join(" ")));
    }
    for (name, value) in &state.attributes {
        let _ = write!(html, r#" {}="{}""#, name, escape_html(value));
    }
    if tag == "img" {
        let _ = write!(html, r#" alt="{}">"#, slot.id());
        return html;
    }
    html.push('>');

    if let Some(text) = &state.text {
        html.push_str(&escape_html(text));
    }
    for child in &state.children {
        render_node(&mut html, child);
    }
    let _ = write!(html, "</{}>", tag);
    html
}

fn render_node(html: &mut String, node: &Node) {
    html.push('<');
    html.push_str(&node.tag);
    if !node.classes.is_empty() {
        let _ = write!(html, r#" class="{}""#, escape_html(&node.classes.join(" ")));
    }
    html.push('>');
    if let Some(text) = &node.text {
        html.push_str(&escape_html(text));
    }
    for child in &node.children {
        render_node(html, child);
    }
    let _ = write!(html, "</{}>", node.tag);
}

/// JSON array of `{canvas, config}` safe to inline in a script element
fn build_chart_data(charts: &[ConstructedChart]) -> io::Result<String> {
    let entries: Vec<serde_json::Value> = charts
        .iter()
        .map(|c| serde_json::json!({ "canvas": c.canvas.id(), "config": c.config }))
        .collect();
    let json = serde_json::to_string(&entries)?;
    Ok(json.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
