use meridian_domain::entities::price_table::PriceTable;
use meridian_domain::services::aggregation::MonthlyAggregate;
use meridian_domain::services::load_report::LoadReport;
use meridian_domain::value_objects::date_window::DateWindow;
use meridian_domain::value_objects::price_column::PriceColumn;
use std::fmt::Write;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";

pub fn render_table_page(table: &PriceTable, report: &LoadReport) -> String {
    let table_html = render_table(table);
    let footer = format!(
        "{} rows shown · {} rows read · {} dropped (unparsable date) · {} duplicate dates",
        table.len(),
        report.rows_read,
        report.invalid_date,
        report.duplicates,
    );

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <link rel="stylesheet" href="{BOOTSTRAP_CSS}">
  <style>
    .table {{ margin: auto; width: 90%; }}
    h1 {{ text-align: center; margin-top: 20px; }}
    .muted {{ color: #666; text-align: center; font-size: 12px; }}
  </style>
  <title>Aligned Data Table</title>
</head>
<body>
  <h1>Data Table</h1>
  {table_html}
  <p class="muted">{footer}</p>
</body>
</html>"#,
        footer = escape_html(&footer),
    )
}

/// Bare `<table>` fragment with the cleaned header and one row per record.
/// Cells print the text as read from the file.
pub fn render_table(table: &PriceTable) -> String {
    let mut html = String::from(
        "<table border=\"0\" class=\"dataframe table table-bordered table-hover text-center\">\n",
    );
    html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
    for name in &table.columns {
        let _ = writeln!(html, "      <th>{}</th>", escape_html(name));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in &table.rows {
        html.push_str("    <tr>\n");
        for index in 0..table.columns.len() {
            let cell = row.cells.get(index).map(String::as_str).unwrap_or("");
            let _ = writeln!(html, "      <td>{}</td>", escape_html(cell));
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    html
}

pub fn render_monthly_chart_page(
    column: PriceColumn,
    window: &DateWindow,
    points: &[MonthlyAggregate],
) -> Result<String, String> {
    let points_json = serde_json::to_string(points)
        .map_err(|err| format!("failed to serialize monthly series: {err}"))?
        .replace("</", "<\\/");
    let title = format!("Monthly Average {}", column.label());
    let caption = format!(
        "{} to {} · {} months",
        window.start().format("%Y-%m-%d"),
        window.end().format("%Y-%m-%d"),
        points.len(),
    );

    let mut rows_html = String::new();
    for point in points {
        let _ = writeln!(
            rows_html,
            "        <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            point.label(),
            format_number(point.mean),
            point.samples,
        );
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <link rel="stylesheet" href="{BOOTSTRAP_CSS}">
  <title>{title}</title>
  <style>
    body {{ padding: 24px; }}
    h1 {{ text-align: center; }}
    .muted {{ color: #666; text-align: center; }}
    canvas {{ width: 100%; height: 360px; border: 1px solid #eee; border-radius: 8px; }}
    .table {{ margin: 24px auto; width: 60%; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p class="muted">{caption}</p>
  <canvas id="monthly"></canvas>
  <table class="table table-bordered table-hover text-center">
    <thead><tr><th>Month</th><th>{column}</th><th>Samples</th></tr></thead>
    <tbody>
{rows_html}    </tbody>
  </table>

  <script>
    const points = {points_json};

    function drawBars(canvas, points) {{
      const ctx = canvas.getContext('2d');
      const ratio = window.devicePixelRatio;
      const w = canvas.width = canvas.clientWidth * ratio;
      const h = canvas.height = canvas.clientHeight * ratio;
      ctx.clearRect(0, 0, w, h);

      if (!points || points.length === 0) {{
        ctx.fillStyle = '#666';
        ctx.fillText('no data', 10, 20);
        return;
      }}

      const values = points.map(p => p.mean);
      const maxV = Math.max(...values, 0);
      const minV = Math.min(...values, 0);
      const pad = 32 * ratio;
      const x0 = pad, y0 = pad / 2, x1 = w - pad / 2, y1 = h - pad;
      const slot = (x1 - x0) / points.length;

      function y(v) {{
        if (maxV === minV) return y1;
        return y1 - ((v - minV) / (maxV - minV)) * (y1 - y0);
      }}

      ctx.fillStyle = '#2b6cb0';
      for (let i = 0; i < points.length; i++) {{
        const top = y(points[i].mean);
        const base = y(0);
        ctx.fillRect(x0 + i * slot + slot * 0.1, Math.min(top, base), slot * 0.8, Math.abs(base - top));
      }}

      ctx.fillStyle = '#333';
      ctx.font = `${{10 * ratio}}px sans-serif`;
      const every = Math.max(1, Math.ceil(points.length / 12));
      for (let i = 0; i < points.length; i += every) {{
        ctx.fillText(points[i].month.slice(0, 7), x0 + i * slot, h - pad / 3);
      }}
      ctx.fillText(maxV.toLocaleString(), 2, y0 + 10 * ratio);
    }}

    drawBars(document.getElementById('monthly'), points);
    window.addEventListener('resize', () => drawBars(document.getElementById('monthly'), points));
  </script>
</body>
</html>"#,
        column = column.label(),
    ))
}

/// Whole values print without a fractional part (volumes), others as parsed.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
